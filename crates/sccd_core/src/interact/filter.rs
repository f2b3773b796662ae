//! Single-choice filters.
//!
//! # Responsibility
//! - Show exactly the candidates whose attribute matches the chosen value.
//! - Keep exactly one control marked `active`.
//! - Recompute item position classes on the activities list after filtering.
//!
//! # Invariants
//! - `all` matches every candidate; otherwise matching is exact.
//! - Candidates are looked up when a control is clicked, so filters keep
//!   working after the filtered list is mounted again.

use crate::dom::{Document, NodeId};
use crate::interact::{on_click, set_display};
use crate::render::activities::GENERAL_CONTAINER;
use crate::render::common::accent_color;
use log::debug;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const ACTIVE_CLASS: &str = "active";
pub const ALL: &str = "all";

/// Whether a candidate carrying `candidate` passes filter `value`.
pub fn matches_filter(value: &str, candidate: Option<&str>) -> bool {
    value == ALL || candidate == Some(value)
}

/// Marks `active` and unmarks every other control.
pub fn set_active(doc: &mut Document, controls: &[NodeId], active: NodeId) {
    for control in controls {
        doc.remove_class(*control, ACTIVE_CLASS);
    }
    doc.add_class(active, ACTIVE_CLASS);
}

/// Shows candidates matching `value` on `attr` with `display`, hides the
/// rest. Returns how many are shown.
pub fn apply_filter(
    doc: &mut Document,
    candidates: &[NodeId],
    value: &str,
    attr: &str,
    display: &str,
) -> usize {
    let mut shown = 0;
    for candidate in candidates {
        let visible = matches_filter(value, doc.attr(*candidate, attr));
        set_display(doc, *candidate, visible, display);
        if visible {
            shown += 1;
        }
    }
    shown
}

/// One filter control group and the elements it filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub name: &'static str,
    pub control_class: &'static str,
    pub control_attr: &'static str,
    pub target_class: &'static str,
    pub target_attr: &'static str,
    pub display: &'static str,
    /// Value applied at bind time, marking its control active.
    pub initial: Option<&'static str>,
    /// Give the clicked control the next accent color.
    pub accent: bool,
}

impl FilterSpec {
    pub const FACULTY: Self = Self {
        name: "faculty",
        control_class: "faculty-filter-btn",
        control_attr: "data-filter",
        target_class: "faculty-card",
        target_attr: "data-category",
        display: "block",
        initial: Some("fulltime"),
        accent: false,
    };

    pub const COURSES: Self = Self {
        name: "courses",
        control_class: "courses-filter-btn",
        control_attr: "data-filter",
        target_class: "courses-year-group",
        target_attr: "data-year",
        display: "block",
        initial: None,
        accent: true,
    };

    pub const WORKS: Self = Self {
        name: "works",
        control_class: "works-filter-btn",
        control_attr: "data-filter",
        target_class: "works-content",
        target_attr: "data-category",
        display: "block",
        initial: None,
        accent: false,
    };

    pub const BFA_DIVISION: Self = Self {
        name: "bfa_division",
        control_class: "bfa-division-btn",
        control_attr: "data-division",
        target_class: "bfa-division-content",
        target_attr: "data-division",
        display: "block",
        initial: None,
        accent: false,
    };
}

/// Binds every control of `spec`; returns how many were bound.
pub fn bind_filter(doc: &mut Document, spec: FilterSpec) -> usize {
    let controls = doc.query_class_all(spec.control_class);
    if controls.is_empty() || doc.query_class_all(spec.target_class).is_empty() {
        return 0;
    }
    if let Some(initial) = spec.initial {
        select(doc, &spec, initial);
    }
    let clicks = Rc::new(Cell::new(0usize));
    for control in &controls {
        let clicks = Rc::clone(&clicks);
        on_click(doc, *control, move |doc, event| {
            let value = doc
                .attr(event.current_target, spec.control_attr)
                .unwrap_or_default()
                .to_string();
            let controls = doc.query_class_all(spec.control_class);
            if spec.accent {
                for control in &controls {
                    doc.remove_style(*control, "color");
                }
                doc.set_style(event.current_target, "color", accent_color(clicks.get()));
                clicks.set(clicks.get() + 1);
            }
            set_active(doc, &controls, event.current_target);
            let targets = doc.query_class_all(spec.target_class);
            let shown = apply_filter(doc, &targets, &value, spec.target_attr, spec.display);
            debug!(
                "event=filter_applied module=interact filter={} value={} shown={}",
                spec.name, value, shown
            );
        });
    }
    controls.len()
}

fn select(doc: &mut Document, spec: &FilterSpec, value: &str) {
    let controls = doc.query_class_all(spec.control_class);
    if let Some(control) = controls
        .iter()
        .copied()
        .find(|control| doc.attr(*control, spec.control_attr) == Some(value))
    {
        set_active(doc, &controls, control);
    }
    let targets = doc.query_class_all(spec.target_class);
    apply_filter(doc, &targets, value, spec.target_attr, spec.display);
}

// -------------------------------------------------------------------
//  Activities filter with item positions
// -------------------------------------------------------------------

pub const ACTIVITIES_CONTROL: &str = "activities-filter-btn";
pub const YEAR_GROUP: &str = "workshop-year-group";
pub const ITEM: &str = "workshop-item";
pub const ITEM_HEADER: &str = "workshop-header";
pub const SEPARATOR: &str = "activities-separator";

/// Place of a visible item inside its year group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPosition {
    First,
    Middle,
    Last,
    Only,
}

impl ItemPosition {
    pub fn of(index: usize, total: usize) -> Self {
        if total == 1 {
            Self::Only
        } else if index == 0 {
            Self::First
        } else if index + 1 == total {
            Self::Last
        } else {
            Self::Middle
        }
    }

    /// Items followed by another visible item carry the bottom rule.
    pub fn has_border(self) -> bool {
        matches!(self, Self::First | Self::Middle)
    }

    pub fn header_classes(self) -> &'static [&'static str] {
        match self {
            Self::First | Self::Only => &["pb-md"],
            Self::Middle | Self::Last => &["pt-md", "pb-md"],
        }
    }
}

/// Re-applies `value` to the activities list and recomputes positions.
pub fn apply_activities_filter(doc: &mut Document, value: &str) {
    let groups = match doc.get_element_by_id(GENERAL_CONTAINER) {
        Some(list) => doc.query_class(list, YEAR_GROUP),
        None => doc.query_class_all(YEAR_GROUP),
    };
    let mut last_visible = None;
    for group in &groups {
        let items: Vec<NodeId> = doc
            .query_class(*group, ITEM)
            .into_iter()
            .filter(|item| doc.attr(*item, "data-category").is_some())
            .collect();
        apply_filter(doc, &items, value, "data-category", "");

        let visible: Vec<NodeId> = items
            .iter()
            .copied()
            .filter(|item| doc.is_shown(*item))
            .collect();
        for item in &items {
            doc.remove_class(*item, "border-b");
            doc.remove_class(*item, "border-gray-9");
            if let Some(header) = doc.query_first_class(*item, ITEM_HEADER) {
                doc.remove_class(header, "pt-md");
                doc.remove_class(header, "pb-md");
            }
        }
        for (index, item) in visible.iter().enumerate() {
            let position = ItemPosition::of(index, visible.len());
            if position.has_border() {
                doc.add_class(*item, "border-b");
                doc.add_class(*item, "border-gray-9");
            }
            if let Some(header) = doc.query_first_class(*item, ITEM_HEADER) {
                for class in position.header_classes() {
                    doc.add_class(header, class);
                }
            }
        }

        let has_visible = !visible.is_empty();
        doc.set_style(*group, "display", if has_visible { "" } else { "none" });
        if let Some(separator) = separator_after(doc, *group) {
            doc.set_style(separator, "display", if has_visible { "" } else { "none" });
        }
        if has_visible {
            last_visible = Some(*group);
        }
    }
    if let Some(separator) = last_visible.and_then(|group| separator_after(doc, group)) {
        doc.set_style(separator, "display", "none");
    }
}

fn separator_after(doc: &Document, group: NodeId) -> Option<NodeId> {
    doc.next_element_sibling(group)
        .filter(|sibling| doc.has_class(*sibling, SEPARATOR))
}

/// Binds the activities filter (default `all`) and applies it once.
pub fn bind_activities_filter(doc: &mut Document) -> usize {
    let controls = doc.query_class_all(ACTIVITIES_CONTROL);
    if controls.is_empty() || doc.query_class_all(YEAR_GROUP).is_empty() {
        return 0;
    }
    let current = Rc::new(RefCell::new(ALL.to_string()));
    sync_activities(doc, &current.borrow());
    for control in &controls {
        let current = Rc::clone(&current);
        on_click(doc, *control, move |doc, event| {
            let value = doc
                .attr(event.current_target, "data-filter")
                .unwrap_or_default()
                .to_string();
            *current.borrow_mut() = value.clone();
            sync_activities(doc, &value);
        });
    }
    controls.len()
}

fn sync_activities(doc: &mut Document, value: &str) {
    for control in doc.query_class_all(ACTIVITIES_CONTROL) {
        let selected = doc.attr(control, "data-filter") == Some(value);
        doc.toggle_class(control, ACTIVE_CLASS, Some(selected));
    }
    apply_activities_filter(doc, value);
}
