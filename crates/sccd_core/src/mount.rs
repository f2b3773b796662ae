//! Mounting rendered fragments into page containers.
//!
//! # Responsibility
//! - Replace a named container's children with a fragment.
//! - Fill single fields of detail pages (`mount_text`, `mount_attr`).
//!
//! # Invariants
//! - A missing container is a no-op, never an error.
//! - Mounting the same fragment twice leaves the same serialized container.
//! - Listeners registered on replaced nodes are dropped with them; binders
//!   must run again after every mount.

use crate::dom::{Document, Fragment, NodeId};
use log::debug;

/// Result of a mount attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    Mounted(NodeId),
    MissingContainer,
}

impl MountOutcome {
    pub fn container(self) -> Option<NodeId> {
        match self {
            Self::Mounted(node) => Some(node),
            Self::MissingContainer => None,
        }
    }

    pub fn is_mounted(self) -> bool {
        matches!(self, Self::Mounted(_))
    }
}

/// Replaces the children of `#container_id` with `fragment`.
pub fn mount(doc: &mut Document, container_id: &str, fragment: Fragment) -> MountOutcome {
    match doc.get_element_by_id(container_id) {
        Some(container) => {
            doc.replace_children(container, fragment);
            MountOutcome::Mounted(container)
        }
        None => {
            debug!(
                "event=mount_skipped module=mount status=noop container={}",
                container_id
            );
            MountOutcome::MissingContainer
        }
    }
}

/// Sets the text of `#element_id` when it exists.
pub fn mount_text(doc: &mut Document, element_id: &str, text: &str) -> MountOutcome {
    match doc.get_element_by_id(element_id) {
        Some(node) => {
            doc.set_text(node, text);
            MountOutcome::Mounted(node)
        }
        None => MountOutcome::MissingContainer,
    }
}

/// Sets authored HTML inside `#element_id` when it exists.
pub fn mount_raw(doc: &mut Document, element_id: &str, html: &str) -> MountOutcome {
    match doc.get_element_by_id(element_id) {
        Some(node) => {
            doc.set_inner_raw(node, html);
            MountOutcome::Mounted(node)
        }
        None => MountOutcome::MissingContainer,
    }
}

/// Sets one attribute of `#element_id` when it exists.
pub fn mount_attr(doc: &mut Document, element_id: &str, attr: &str, value: &str) -> MountOutcome {
    match doc.get_element_by_id(element_id) {
        Some(node) => {
            doc.set_attr(node, attr, value);
            MountOutcome::Mounted(node)
        }
        None => MountOutcome::MissingContainer,
    }
}

/// Value written into one detail-page field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Html(String),
    Attr { name: &'static str, value: String },
}

/// One field of a detail view, addressed by element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFill {
    pub element_id: &'static str,
    pub value: FieldValue,
}

impl FieldFill {
    pub fn text(element_id: &'static str, text: impl Into<String>) -> Self {
        Self {
            element_id,
            value: FieldValue::Text(text.into()),
        }
    }

    pub fn html(element_id: &'static str, html: impl Into<String>) -> Self {
        Self {
            element_id,
            value: FieldValue::Html(html.into()),
        }
    }

    pub fn attr(element_id: &'static str, name: &'static str, value: impl Into<String>) -> Self {
        Self {
            element_id,
            value: FieldValue::Attr {
                name,
                value: value.into(),
            },
        }
    }
}

/// Applies every fill; returns how many targets existed.
pub fn mount_fields(doc: &mut Document, fills: &[FieldFill]) -> usize {
    fills
        .iter()
        .map(|fill| match &fill.value {
            FieldValue::Text(text) => mount_text(doc, fill.element_id, text),
            FieldValue::Html(html) => mount_raw(doc, fill.element_id, html),
            FieldValue::Attr { name, value } => mount_attr(doc, fill.element_id, name, value),
        })
        .filter(|outcome| outcome.is_mounted())
        .count()
}
