//! About-page timeline: the year strip and the detail it selects.
//!
//! # Invariants
//! - Exactly one `.timeline-year-item` carries the highlight color.
//! - Image and text fade only when their content actually changes.

use crate::animate::{Animator, Tween, TweenProp, TweenValue};
use crate::dom::{Document, NodeId};
use crate::interact::{on_click, SharedAnimator};
use crate::model::TimelineEntry;
use crate::mount::{mount, mount_raw, mount_text};
use crate::render::timeline::{
    render_timeline_years, ERA_LABEL, IMAGE_FRAME, TEXT, YEARS_CONTAINER, YEAR_MOBILE,
};
use log::debug;
use std::rc::Rc;

pub const YEAR_ITEM: &str = "timeline-year-item";
pub const HIGHLIGHT: &str = "var(--color-pink)";
const FADE_MS: u64 = 200;

/// Renders the year strip, selects the first year and binds each year.
/// Returns the number of years bound.
pub fn bind_timeline(doc: &mut Document, entries: Rc<Vec<TimelineEntry>>, animator: SharedAnimator) -> usize {
    if !mount(doc, YEARS_CONTAINER, render_timeline_years(&entries)).is_mounted() {
        return 0;
    }
    select(doc, animator.as_ref(), &entries, 0);
    let years = doc.query_class_all(YEAR_ITEM);
    for year in &years {
        let entries = Rc::clone(&entries);
        let animator = Rc::clone(&animator);
        on_click(doc, *year, move |doc, event| {
            let index = doc
                .attr(event.current_target, "data-index")
                .and_then(|raw| raw.parse::<usize>().ok());
            if let Some(index) = index {
                select(doc, animator.as_ref(), &entries, index);
            }
        });
    }
    years.len()
}

/// Shows entry `index`. Out-of-range indices are ignored.
pub fn select(doc: &mut Document, animator: &dyn Animator, entries: &[TimelineEntry], index: usize) -> bool {
    let Some(entry) = entries.get(index) else {
        return false;
    };
    mount_raw(doc, ERA_LABEL, &entry.era_heading());
    if let Some(year) = mount_text(doc, YEAR_MOBILE, &entry.year).container() {
        doc.set_style(year, "color", HIGHLIGHT);
    }

    let image = doc
        .get_element_by_id(IMAGE_FRAME)
        .and_then(|frame| doc.query_first_tag(frame, "img"));
    if let Some(image) = image {
        if doc.attr(image, "src") != Some(entry.image.as_str()) {
            let src = entry.image.clone();
            crossfade(doc, animator, image, move |doc| doc.set_attr(image, "src", src));
        }
    }
    if let Some(text) = doc.get_element_by_id(TEXT) {
        if doc.inner_html(text) != entry.description {
            let html = entry.description.clone();
            crossfade(doc, animator, text, move |doc| doc.set_inner_raw(text, html));
        }
    }

    for (position, year) in doc.query_class_all(YEAR_ITEM).into_iter().enumerate() {
        if position == index {
            doc.set_style(year, "color", HIGHLIGHT);
        } else {
            doc.remove_style(year, "color");
        }
    }
    debug!("event=timeline_select module=interact index={} year={}", index, entry.year);
    true
}

fn crossfade<F>(doc: &mut Document, animator: &dyn Animator, target: NodeId, swap: F)
where
    F: FnOnce(&mut Document) + 'static,
{
    animator.to(
        doc,
        Tween::new(target, TweenProp::Opacity, TweenValue::Number(0.0), FADE_MS).on_complete(
            move |doc, animator| {
                swap(doc);
                animator.to(
                    doc,
                    Tween::new(target, TweenProp::Opacity, TweenValue::Number(1.0), FADE_MS),
                );
            },
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::{bind_timeline, HIGHLIGHT};
    use crate::animate::{Animator, InstantAnimator, TweenAnimator};
    use crate::dom::{Document, Element, Fragment};
    use crate::interact::SharedAnimator;
    use crate::model::TimelineEntry;
    use std::rc::Rc;

    fn shell() -> Document {
        Document::from_fragment(
            Fragment::new()
                .with(Element::new("h3").id("timeline-era"))
                .with(Element::new("span").id("timeline-year-mobile"))
                .with(Element::new("div").id("timeline-years-container"))
                .with(Element::new("div").id("timeline-image").child(Element::new("img").attr("src", "")))
                .with(Element::new("div").id("timeline-text")),
        )
    }

    fn entries() -> Rc<Vec<TimelineEntry>> {
        Rc::new(vec![
            TimelineEntry {
                year: "1990".to_string(),
                image: "a.jpg".to_string(),
                description: "<p>Founded</p>".to_string(),
                era_title: "Founding".to_string(),
                era_label: "創立".to_string(),
            },
            TimelineEntry {
                year: "2001".to_string(),
                image: "b.jpg".to_string(),
                description: "<p>Expanded</p>".to_string(),
                era_title: "Growth".to_string(),
                era_label: "成長".to_string(),
            },
        ])
    }

    #[test]
    fn first_year_is_selected_and_clicks_switch() {
        let mut doc = shell();
        let animator: SharedAnimator = Rc::new(InstantAnimator::new());
        assert_eq!(bind_timeline(&mut doc, entries(), animator), 2);

        let era = doc.get_element_by_id("timeline-era").expect("era");
        assert_eq!(doc.text_content(era), "Founding Era 創立時期");
        let years = doc.query_class_all("timeline-year-item");
        assert_eq!(doc.style(years[0], "color"), Some(HIGHLIGHT));

        doc.dispatch_click(years[1]);
        assert_eq!(doc.style(years[0], "color"), None);
        assert_eq!(doc.style(years[1], "color"), Some(HIGHLIGHT));
        let text = doc.get_element_by_id("timeline-text").expect("text");
        assert_eq!(doc.inner_html(text), "<p>Expanded</p>");
        let mobile = doc.get_element_by_id("timeline-year-mobile").expect("mobile");
        assert_eq!(doc.text_content(mobile), "2001");
        let img = doc.query_first_tag(doc.body(), "img").expect("img");
        assert_eq!(doc.attr(img, "src"), Some("b.jpg"));
    }

    #[test]
    fn image_swaps_at_the_bottom_of_the_fade() {
        let mut doc = shell();
        let tween = Rc::new(TweenAnimator::new());
        let animator: SharedAnimator = tween.clone();
        bind_timeline(&mut doc, entries(), animator);
        let img = doc.query_first_tag(doc.body(), "img").expect("img");
        assert_eq!(doc.attr(img, "src"), Some(""));
        tween.advance(&mut doc, 200);
        assert_eq!(doc.attr(img, "src"), Some("a.jpg"));
        tween.advance(&mut doc, 200);
        assert!(tween.is_idle());
        assert_eq!(doc.style(img, "opacity"), Some("1"));
    }

    #[test]
    fn missing_container_binds_nothing() {
        let mut doc = Document::new();
        let animator: SharedAnimator = Rc::new(InstantAnimator::new());
        assert_eq!(bind_timeline(&mut doc, entries(), animator), 0);
    }
}
