//! Horizontal image accordion on the about page.
//!
//! Exactly one `.accordion-panel` per bound wrapper is expanded. On desktop
//! panels share the row through `flex-grow` (8 vs 1); below the breakpoint
//! they stack and the expanded one is taller (360px vs 64px). Wrappers are
//! independent, so the about page can host several.

use crate::animate::{Animator, Ease, Tween, TweenProp, TweenValue};
use crate::dom::{Document, NodeId};
use crate::interact::{on_click, ResizeHandler, SharedAnimator, Viewport};
use log::debug;
use std::cell::Cell;
use std::rc::Rc;

pub const PANEL: &str = "accordion-panel";
pub const OVERLAY: &str = "accordion-overlay";
pub const CONTENT: &str = "accordion-content";

const EXPANDED_GROW: f64 = 8.0;
const COLLAPSED_GROW: f64 = 1.0;
const EXPANDED_HEIGHT_PX: f64 = 360.0;
const COLLAPSED_HEIGHT_PX: f64 = 64.0;

fn size_target(mobile: bool, expanded: bool) -> (TweenProp, TweenValue) {
    match (mobile, expanded) {
        (false, true) => (TweenProp::FlexGrow, TweenValue::Number(EXPANDED_GROW)),
        (false, false) => (TweenProp::FlexGrow, TweenValue::Number(COLLAPSED_GROW)),
        (true, true) => (TweenProp::Height, TweenValue::Px(EXPANDED_HEIGHT_PX)),
        (true, false) => (TweenProp::Height, TweenValue::Px(COLLAPSED_HEIGHT_PX)),
    }
}

#[derive(Debug)]
struct AccordionState {
    active: Cell<Option<NodeId>>,
    mobile: Cell<bool>,
}

fn kill_panel(animator: &dyn Animator, doc: &Document, panel: NodeId) {
    animator.kill_tweens_of(panel);
    for class in [OVERLAY, CONTENT] {
        if let Some(part) = doc.query_first_class(panel, class) {
            animator.kill_tweens_of(part);
        }
    }
}

/// Writes the resting layout of every panel for the current mode.
fn settle(doc: &mut Document, animator: &dyn Animator, panels: &[NodeId], active: Option<NodeId>, mobile: bool) {
    for panel in panels {
        kill_panel(animator, doc, *panel);
        let expanded = Some(*panel) == active;
        let (prop, value) = size_target(mobile, expanded);
        if mobile {
            doc.remove_style(*panel, "flex-grow");
            doc.remove_style(*panel, "flex-basis");
        } else {
            doc.remove_style(*panel, "height");
            doc.set_style(*panel, "flex-basis", "0%");
        }
        animator.set(doc, *panel, prop, value);
        let opacity = TweenValue::Number(if expanded { 1.0 } else { 0.0 });
        for class in [OVERLAY, CONTENT] {
            if let Some(part) = doc.query_first_class(*panel, class) {
                animator.set(doc, part, TweenProp::Opacity, opacity);
            }
        }
    }
}

/// Binds every panel under `scope`; the first starts expanded. Returns the
/// resize hook, or `None` when the scope holds no panels.
pub fn bind_horizontal_accordion(
    doc: &mut Document,
    scope: NodeId,
    animator: SharedAnimator,
    viewport: Viewport,
) -> Option<ResizeHandler> {
    let panels = doc.query_class(scope, PANEL);
    let first = *panels.first()?;
    let state = Rc::new(AccordionState {
        active: Cell::new(Some(first)),
        mobile: Cell::new(viewport.is_mobile()),
    });
    settle(doc, animator.as_ref(), &panels, Some(first), state.mobile.get());

    for panel in &panels {
        let state = Rc::clone(&state);
        let animator = Rc::clone(&animator);
        let viewport = viewport.clone();
        on_click(doc, *panel, move |doc, event| {
            activate(doc, animator.as_ref(), &state, &viewport, scope, event.current_target);
        });
    }

    let resize: ResizeHandler = Rc::new(move |doc: &mut Document, width: u32| {
        let mobile = viewport.is_mobile_width(width);
        if mobile == state.mobile.get() {
            return;
        }
        state.mobile.set(mobile);
        let panels = doc.query_class(scope, PANEL);
        settle(doc, animator.as_ref(), &panels, state.active.get(), mobile);
        debug!(
            "event=layout_changed module=interact widget=horizontal_accordion mobile={} width={}",
            mobile, width
        );
    });
    Some(resize)
}

fn activate(
    doc: &mut Document,
    animator: &dyn Animator,
    state: &Rc<AccordionState>,
    viewport: &Viewport,
    scope: NodeId,
    next: NodeId,
) {
    let previous = state.active.get();
    if previous == Some(next) {
        return;
    }
    state.active.set(Some(next));
    let mobile = viewport.is_mobile();
    if mobile != state.mobile.get() {
        state.mobile.set(mobile);
        let panels = doc.query_class(scope, PANEL);
        settle(doc, animator, &panels, previous, mobile);
    }

    if let Some(previous) = previous {
        kill_panel(animator, doc, previous);
        for class in [OVERLAY, CONTENT] {
            if let Some(part) = doc.query_first_class(previous, class) {
                animator.to(
                    doc,
                    Tween::new(part, TweenProp::Opacity, TweenValue::Number(0.0), 300).ease(Ease::Power2Out),
                );
            }
        }
        let (prop, value) = size_target(mobile, false);
        animator.to(doc, Tween::new(previous, prop, value, 600).ease(Ease::Power2InOut));
    }

    kill_panel(animator, doc, next);
    if let Some(overlay) = doc.query_first_class(next, OVERLAY) {
        animator.to(
            doc,
            Tween::new(overlay, TweenProp::Opacity, TweenValue::Number(1.0), 600).ease(Ease::Power2InOut),
        );
    }
    let content = doc.query_first_class(next, CONTENT);
    let state = Rc::clone(state);
    let (prop, value) = size_target(mobile, true);
    animator.to(
        doc,
        Tween::new(next, prop, value, 600)
            .ease(Ease::Power2InOut)
            .on_complete(move |doc, animator| {
                if state.active.get() != Some(next) {
                    return;
                }
                if let Some(content) = content {
                    animator.to(
                        doc,
                        Tween::new(content, TweenProp::Opacity, TweenValue::Number(1.0), 400)
                            .ease(Ease::Power2Out),
                    );
                }
            }),
    );
}

#[cfg(test)]
mod tests {
    use super::bind_horizontal_accordion;
    use crate::animate::{Animator, InstantAnimator, TweenAnimator};
    use crate::dom::{Document, Element, Fragment};
    use crate::interact::{SharedAnimator, Viewport};
    use std::rc::Rc;

    fn panels() -> Document {
        Document::from_fragment(Fragment::new().with(Element::new("div").children((0..3).map(|n| {
            Element::new("div")
                .class("accordion-panel")
                .attr("data-index", n.to_string())
                .child(Element::new("img").attr("src", format!("{n}.jpg")))
                .child(Element::new("div").class("accordion-overlay"))
                .child(Element::new("div").class("accordion-content"))
        }))))
    }

    #[test]
    fn first_panel_starts_expanded_and_click_moves_it() {
        let mut doc = panels();
        let animator: SharedAnimator = Rc::new(InstantAnimator::new());
        let body = doc.body();
        bind_horizontal_accordion(&mut doc, body, animator, Viewport::new(1280, 768)).expect("panels bound");
        let panels = doc.query_class_all("accordion-panel");
        assert_eq!(doc.style(panels[0], "flex-grow"), Some("8"));
        assert_eq!(doc.style(panels[1], "flex-grow"), Some("1"));

        doc.dispatch_click(panels[2]);
        assert_eq!(doc.style(panels[0], "flex-grow"), Some("1"));
        assert_eq!(doc.style(panels[2], "flex-grow"), Some("8"));
        let content = doc.query_first_class(panels[2], "accordion-content").expect("content");
        assert_eq!(doc.style(content, "opacity"), Some("1"));
    }

    #[test]
    fn content_fades_in_only_after_expansion() {
        let mut doc = panels();
        let tween = Rc::new(TweenAnimator::new());
        let animator: SharedAnimator = tween.clone();
        let body = doc.body();
        bind_horizontal_accordion(&mut doc, body, animator, Viewport::new(1280, 768)).expect("panels bound");
        let panels = doc.query_class_all("accordion-panel");
        let content = doc.query_first_class(panels[1], "accordion-content").expect("content");

        doc.dispatch_click(panels[1]);
        tween.advance(&mut doc, 599);
        assert_eq!(doc.style(content, "opacity"), Some("0"));
        tween.advance(&mut doc, 1);
        tween.advance(&mut doc, 400);
        assert_eq!(doc.style(content, "opacity"), Some("1"));
        assert!(tween.is_idle());
    }

    #[test]
    fn resize_across_breakpoint_keeps_expanded_panel() {
        let mut doc = panels();
        let animator: SharedAnimator = Rc::new(InstantAnimator::new());
        let viewport = Viewport::new(1280, 768);
        let body = doc.body();
        let resize = bind_horizontal_accordion(&mut doc, body, animator, viewport.clone()).expect("panels bound");
        let panels = doc.query_class_all("accordion-panel");
        doc.dispatch_click(panels[1]);

        viewport.set_width(375);
        resize(&mut doc, 375);
        assert_eq!(doc.style(panels[1], "height"), Some("360px"));
        assert_eq!(doc.style(panels[0], "height"), Some("64px"));
        assert_eq!(doc.style(panels[1], "flex-grow"), None);

        viewport.set_width(1024);
        resize(&mut doc, 1024);
        assert_eq!(doc.style(panels[1], "flex-grow"), Some("8"));
        assert_eq!(doc.style(panels[1], "height"), None);
    }

    #[test]
    fn wrappers_keep_their_own_expanded_panel() {
        let group = |id: &str| {
            Element::new("div").id(id).children((0..2).map(|_| {
                Element::new("div")
                    .class("accordion-panel")
                    .child(Element::new("div").class("accordion-content"))
            }))
        };
        let mut doc = Document::from_fragment(Fragment::new().with(group("left")).with(group("right")));
        let animator: SharedAnimator = Rc::new(InstantAnimator::new());
        for id in ["left", "right"] {
            let scope = doc.get_element_by_id(id).expect("wrapper");
            bind_horizontal_accordion(&mut doc, scope, Rc::clone(&animator), Viewport::new(1280, 768))
                .expect("panels bound");
        }
        let panels = doc.query_class_all("accordion-panel");
        doc.dispatch_click(panels[3]);
        assert_eq!(doc.style(panels[0], "flex-grow"), Some("8"));
        assert_eq!(doc.style(panels[2], "flex-grow"), Some("1"));
        assert_eq!(doc.style(panels[3], "flex-grow"), Some("8"));
    }
}
