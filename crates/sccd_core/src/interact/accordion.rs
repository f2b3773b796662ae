//! Vertical accordions and year toggles.
//!
//! # Responsibility
//! - Expand and collapse content blocks under a clickable trigger.
//! - Animate height and chevron rotation through the `Animator`.
//!
//! # Invariants
//! - Each content block is either `Collapsed` or `Expanded`; the state lives
//!   in its `data-accordion` attribute, not in the animated height.
//! - Initial state comes from a marker class in the markup.
//! - In exclusive accordions at most one item per group is expanded.

use crate::animate::{Animator, Ease, Tween, TweenProp, TweenValue};
use crate::dom::{Document, NodeId};
use crate::interact::{on_click, SharedAnimator};
use log::trace;
use std::rc::Rc;

const STATE_ATTR: &str = "data-accordion";
const INIT_ATTR: &str = "data-accordion-init";
const EXPAND_MS: u64 = 500;
const COLLAPSE_MS: u64 = 400;
const CHEVRON_MS: u64 = 300;

/// Accordion item state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccordionState {
    Collapsed,
    Expanded,
}

impl AccordionState {
    fn as_str(self) -> &'static str {
        match self {
            Self::Collapsed => "collapsed",
            Self::Expanded => "expanded",
        }
    }
}

/// Where the content of a trigger lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLookup {
    /// The trigger's next element sibling; chevron inside the trigger.
    NextSibling,
    /// A block inside the trigger's closest `group` ancestor; chevron
    /// anywhere inside that group.
    InGroup {
        group: &'static str,
        content: &'static str,
    },
}

/// Marker declaring an item initially expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialMarker {
    /// Trigger carries the class.
    Trigger(&'static str),
    /// Chevron carries the class.
    Chevron(&'static str),
}

/// One accordion flavour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccordionSpec {
    pub name: &'static str,
    pub trigger: &'static str,
    pub content: ContentLookup,
    pub chevron: &'static str,
    pub open_rotation: f64,
    pub initial: InitialMarker,
    /// Toggle `active` on the trigger with the state.
    pub mark_trigger: bool,
    /// Swap header padding while open (course list).
    pub header_padding: bool,
    /// `display: none` while collapsed, `flex` while expanded.
    pub hide_collapsed: bool,
    /// `overflow: visible` once fully expanded.
    pub release_overflow: bool,
    /// Group class inside which only one item may be expanded.
    pub exclusive_within: Option<&'static str>,
}

impl AccordionSpec {
    pub const COURSE: Self = Self {
        name: "course",
        trigger: "course-header",
        content: ContentLookup::NextSibling,
        chevron: "fa-chevron-down",
        open_rotation: 180.0,
        initial: InitialMarker::Trigger("active"),
        mark_trigger: true,
        header_padding: true,
        hide_collapsed: false,
        release_overflow: false,
        exclusive_within: None,
    };

    pub const WORKSHOP_HEADER: Self = Self {
        name: "workshop_header",
        trigger: "workshop-header",
        content: ContentLookup::NextSibling,
        chevron: "fa-chevron-down",
        open_rotation: 180.0,
        initial: InitialMarker::Trigger("active"),
        mark_trigger: true,
        header_padding: false,
        hide_collapsed: false,
        release_overflow: false,
        exclusive_within: None,
    };

    pub const WORKSHOP_YEAR: Self = Self {
        name: "workshop_year",
        trigger: "workshop-year-toggle",
        content: ContentLookup::InGroup {
            group: "grid-12",
            content: "workshop-year-items",
        },
        chevron: "fa-chevron-right",
        open_rotation: 90.0,
        initial: InitialMarker::Chevron("rotate-90"),
        mark_trigger: false,
        header_padding: false,
        hide_collapsed: true,
        release_overflow: false,
        exclusive_within: None,
    };

    pub const ACTIVITIES_YEAR: Self = Self {
        name: "activities_year",
        trigger: "activities-year-toggle",
        content: ContentLookup::InGroup {
            group: "grid-12",
            content: "activities-year-items",
        },
        chevron: "fa-chevron-right",
        open_rotation: 90.0,
        initial: InitialMarker::Chevron("rotate-90"),
        mark_trigger: false,
        header_padding: false,
        hide_collapsed: true,
        release_overflow: true,
        exclusive_within: None,
    };

    pub const SUMMER_CAMP: Self = Self {
        name: "summer_camp",
        trigger: "summer-camp-header",
        content: ContentLookup::NextSibling,
        chevron: "fa-chevron-down",
        open_rotation: 180.0,
        initial: InitialMarker::Trigger("active"),
        mark_trigger: false,
        header_padding: false,
        hide_collapsed: false,
        release_overflow: false,
        exclusive_within: Some("summer-camp-year-group"),
    };

    fn parts(&self, doc: &Document, trigger: NodeId) -> Option<(NodeId, Option<NodeId>)> {
        match self.content {
            ContentLookup::NextSibling => {
                let content = doc.next_element_sibling(trigger)?;
                Some((content, doc.query_first_class(trigger, self.chevron)))
            }
            ContentLookup::InGroup { group, content } => {
                let group = doc.closest_class(trigger, group)?;
                let content = doc.query_first_class(group, content)?;
                Some((content, doc.query_first_class(group, self.chevron)))
            }
        }
    }

    fn initially_expanded(&self, doc: &Document, trigger: NodeId, chevron: Option<NodeId>) -> bool {
        match self.initial {
            InitialMarker::Trigger(class) => doc.has_class(trigger, class),
            InitialMarker::Chevron(class) => {
                chevron.map(|chevron| doc.has_class(chevron, class)).unwrap_or(false)
            }
        }
    }
}

/// Current state of the item opened by `trigger`.
pub fn state_of(doc: &Document, spec: &AccordionSpec, trigger: NodeId) -> Option<AccordionState> {
    let (content, _) = spec.parts(doc, trigger)?;
    Some(match doc.attr(content, STATE_ATTR) {
        Some("expanded") => AccordionState::Expanded,
        _ => AccordionState::Collapsed,
    })
}

/// Sets initial state and binds every unbound trigger of `spec`.
pub fn bind_accordion(doc: &mut Document, spec: AccordionSpec, animator: SharedAnimator) -> usize {
    let mut bound = 0;
    for trigger in doc.query_class_all(spec.trigger) {
        if doc.attr(trigger, INIT_ATTR).is_some() {
            continue;
        }
        let Some((content, chevron)) = spec.parts(doc, trigger) else {
            continue;
        };
        doc.set_attr(trigger, INIT_ATTR, "1");
        // Triggers sharing one content block (records year rows) set it once.
        if doc.attr(content, STATE_ATTR).is_none() {
            let expanded = spec.initially_expanded(doc, trigger, chevron);
            doc.set_style(content, "overflow", "hidden");
            if expanded {
                animator.set(doc, content, TweenProp::Height, TweenValue::Auto);
                if spec.release_overflow {
                    doc.set_style(content, "overflow", "visible");
                }
            } else {
                animator.set(doc, content, TweenProp::Height, TweenValue::Px(0.0));
                if spec.hide_collapsed {
                    doc.set_style(content, "display", "none");
                }
            }
            write_state(doc, content, expanded);
        }

        let animator = Rc::clone(&animator);
        on_click(doc, trigger, move |doc, event| {
            toggle(doc, animator.as_ref(), &spec, event.current_target);
        });
        bound += 1;
    }
    bound
}

/// Flips the item under `trigger`.
pub fn toggle(doc: &mut Document, animator: &dyn Animator, spec: &AccordionSpec, trigger: NodeId) {
    match state_of(doc, spec, trigger) {
        Some(AccordionState::Expanded) => collapse(doc, animator, spec, trigger),
        Some(AccordionState::Collapsed) => expand(doc, animator, spec, trigger),
        None => {}
    }
}

pub fn expand(doc: &mut Document, animator: &dyn Animator, spec: &AccordionSpec, trigger: NodeId) {
    let Some((content, chevron)) = spec.parts(doc, trigger) else {
        return;
    };
    if let Some(group_class) = spec.exclusive_within {
        if let Some(group) = doc.closest_class(trigger, group_class) {
            for sibling in doc.query_class(group, spec.trigger) {
                if sibling != trigger
                    && state_of(doc, spec, sibling) == Some(AccordionState::Expanded)
                {
                    collapse(doc, animator, spec, sibling);
                }
            }
        }
    }
    trace!("event=accordion_expand module=interact accordion={}", spec.name);

    write_state(doc, content, true);
    if spec.mark_trigger {
        doc.add_class(trigger, "active");
    }
    if spec.header_padding {
        doc.remove_class(trigger, "py-md");
        doc.add_class(trigger, "pb-xs");
        let first = doc
            .parent(trigger)
            .map(|item| doc.is_first_element_child(item))
            .unwrap_or(false);
        doc.add_class(trigger, if first { "pt-sm" } else { "pt-md" });
    }
    if spec.hide_collapsed {
        doc.set_style(content, "display", "flex");
        doc.set_style(content, "overflow", "hidden");
    }

    let mut tween = Tween::new(content, TweenProp::Height, TweenValue::Auto, EXPAND_MS).ease(Ease::Power2Out);
    if spec.release_overflow {
        tween = tween.on_complete(move |doc, _| doc.set_style(content, "overflow", "visible"));
    }
    animator.to(doc, tween);
    if let Some(chevron) = chevron {
        animator.to(
            doc,
            Tween::new(chevron, TweenProp::Rotation, TweenValue::Deg(spec.open_rotation), CHEVRON_MS),
        );
    }
}

pub fn collapse(doc: &mut Document, animator: &dyn Animator, spec: &AccordionSpec, trigger: NodeId) {
    let Some((content, chevron)) = spec.parts(doc, trigger) else {
        return;
    };
    trace!("event=accordion_collapse module=interact accordion={}", spec.name);

    write_state(doc, content, false);
    if spec.mark_trigger {
        doc.remove_class(trigger, "active");
    }
    if spec.hide_collapsed {
        doc.set_style(content, "overflow", "hidden");
    }

    let header_padding = spec.header_padding;
    let hide_collapsed = spec.hide_collapsed;
    animator.to(
        doc,
        Tween::new(content, TweenProp::Height, TweenValue::Px(0.0), COLLAPSE_MS)
            .ease(Ease::Power2In)
            .on_complete(move |doc, _| {
                if header_padding {
                    for class in ["pb-xs", "pt-md", "pt-sm"] {
                        doc.remove_class(trigger, class);
                    }
                    doc.add_class(trigger, "py-md");
                }
                if hide_collapsed {
                    doc.set_style(content, "display", "none");
                }
            }),
    );
    if let Some(chevron) = chevron {
        animator.to(
            doc,
            Tween::new(chevron, TweenProp::Rotation, TweenValue::Deg(0.0), CHEVRON_MS),
        );
    }
}

fn write_state(doc: &mut Document, content: NodeId, expanded: bool) {
    let state = if expanded {
        AccordionState::Expanded
    } else {
        AccordionState::Collapsed
    };
    doc.set_attr(content, STATE_ATTR, state.as_str());
}

#[cfg(test)]
mod tests {
    use super::{bind_accordion, state_of, AccordionSpec, AccordionState};
    use crate::animate::{Animator, InstantAnimator, TweenAnimator};
    use crate::dom::{Document, Element, Fragment};
    use crate::interact::SharedAnimator;
    use crate::render::courses::{render_course_group, Program};
    use crate::render::records::render_records;
    use crate::model::{ContentRecord, YearGroup};
    use serde_json::json;
    use std::rc::Rc;

    fn course_doc() -> Document {
        let courses: Vec<ContentRecord> = serde_json::from_value(json!([
            {"type": "required", "grade": "freshman", "titleEn": "Drawing"},
            {"type": "required", "grade": "freshman", "titleEn": "Color"}
        ]))
        .expect("courses");
        Document::from_fragment(render_course_group(&courses, "required", Program::Bfa))
    }

    #[test]
    fn course_accordion_toggles_and_swaps_padding() {
        let mut doc = course_doc();
        let animator: SharedAnimator = Rc::new(InstantAnimator::new());
        assert_eq!(bind_accordion(&mut doc, AccordionSpec::COURSE, Rc::clone(&animator)), 2);
        let headers = doc.query_class_all("course-header");
        let content = doc.next_element_sibling(headers[0]).expect("content");
        assert_eq!(doc.style(content, "height"), Some("0px"));

        doc.dispatch_click(headers[0]);
        assert_eq!(state_of(&doc, &AccordionSpec::COURSE, headers[0]), Some(AccordionState::Expanded));
        assert_eq!(doc.style(content, "height"), Some("auto"));
        assert!(doc.has_class(headers[0], "active") && doc.has_class(headers[0], "pt-sm"));
        assert!(!doc.has_class(headers[0], "py-md"));

        doc.dispatch_click(headers[1]);
        assert!(doc.has_class(headers[1], "pt-md"));

        doc.dispatch_click(headers[0]);
        assert_eq!(doc.style(content, "height"), Some("0px"));
        assert!(doc.has_class(headers[0], "py-md") && !doc.has_class(headers[0], "pb-xs"));
        // non-exclusive: the second item stays open
        assert_eq!(state_of(&doc, &AccordionSpec::COURSE, headers[1]), Some(AccordionState::Expanded));
    }

    #[test]
    fn binding_twice_does_not_double_listeners() {
        let mut doc = course_doc();
        let animator: SharedAnimator = Rc::new(InstantAnimator::new());
        bind_accordion(&mut doc, AccordionSpec::COURSE, Rc::clone(&animator));
        assert_eq!(bind_accordion(&mut doc, AccordionSpec::COURSE, animator), 0);
        let header = doc.query_class_all("course-header")[0];
        assert_eq!(doc.listener_count(header), 1);
    }

    #[test]
    fn year_toggle_starts_open_and_hides_after_collapse() {
        let groups: Vec<YearGroup> = serde_json::from_value(json!([
            {"year": 2024, "items": [{"competition": "A"}]}
        ]))
        .expect("groups");
        let mut doc = Document::from_fragment(render_records(&groups));
        let tween = Rc::new(TweenAnimator::new());
        let animator: SharedAnimator = tween.clone();
        assert_eq!(bind_accordion(&mut doc, AccordionSpec::ACTIVITIES_YEAR, animator), 2);
        let items = doc.query_class_all("activities-year-items")[0];
        assert_eq!(doc.style(items, "height"), Some("auto"));

        let toggle = doc.query_class_all("activities-year-toggle")[1];
        doc.dispatch_click(toggle);
        assert_eq!(doc.style(items, "display"), None);
        tween.advance(&mut doc, 400);
        assert_eq!(doc.style(items, "display"), Some("none"));
        let chevron = doc.query_class_all("fa-chevron-right")[0];
        assert_eq!(doc.style(chevron, "transform"), Some("rotate(0deg)"));

        doc.dispatch_click(toggle);
        assert_eq!(doc.style(items, "display"), Some("flex"));
        tween.advance(&mut doc, 500);
        assert_eq!(doc.style(items, "height"), Some("auto"));
        assert_eq!(doc.style(items, "overflow"), Some("visible"));
    }

    #[test]
    fn summer_camp_is_exclusive_within_year() {
        let group = Element::new("div").class("summer-camp-year-group").children((0..2).map(|_| {
            Element::new("div")
                .class("summer-camp-item")
                .child(Element::new("div").class("summer-camp-header"))
                .child(Element::new("div").class("summer-camp-content"))
        }));
        let mut doc = Document::from_fragment(Fragment::new().with(group));
        let animator: SharedAnimator = Rc::new(InstantAnimator::new());
        bind_accordion(&mut doc, AccordionSpec::SUMMER_CAMP, animator);
        let headers = doc.query_class_all("summer-camp-header");

        doc.dispatch_click(headers[0]);
        doc.dispatch_click(headers[1]);
        let spec = AccordionSpec::SUMMER_CAMP;
        assert_eq!(state_of(&doc, &spec, headers[0]), Some(AccordionState::Collapsed));
        assert_eq!(state_of(&doc, &spec, headers[1]), Some(AccordionState::Expanded));
    }

    #[test]
    fn variants_differ_in_rotation_and_marker() {
        assert_eq!(AccordionSpec::COURSE.open_rotation, 180.0);
        assert_eq!(AccordionSpec::WORKSHOP_YEAR.open_rotation, 90.0);
        assert_ne!(AccordionSpec::COURSE, AccordionSpec::WORKSHOP_HEADER);
        assert_eq!(AccordionSpec::SUMMER_CAMP, AccordionSpec::SUMMER_CAMP);
    }
}
