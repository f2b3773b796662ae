//! Interaction binders.
//!
//! # Responsibility
//! - Attach click behaviour to freshly mounted markup: filters, accordions,
//!   year toggles, pagination, overlays, section switching, the timeline
//!   and the header's mobile navigation.
//! - Drive every visual transition through the `Animator` seam.
//!
//! # Invariants
//! - Binders tolerate missing controls and containers; they bind nothing.
//! - Binding the same markup twice never doubles a listener
//!   (`data-accordion-init` guard on accordion triggers).
//! - Handlers run synchronously inside `Document::dispatch_click`.

pub mod accordion;
pub mod filter;
pub mod horizontal;
pub mod navigation;
pub mod overlay;
pub mod pagination;
pub mod section_switch;
pub mod timeline;

use crate::animate::Animator;
use crate::dom::{ClickEvent, Document, NodeId};
use std::cell::Cell;
use std::rc::Rc;

/// Animator shared by every handler of one page.
pub type SharedAnimator = Rc<dyn Animator>;

/// Callback run when the viewport width changes.
pub type ResizeHandler = Rc<dyn Fn(&mut Document, u32)>;

/// Current viewport width, shared between the page and its binders.
#[derive(Debug, Clone)]
pub struct Viewport {
    width: Rc<Cell<u32>>,
    breakpoint: u32,
}

impl Viewport {
    pub fn new(width: u32, breakpoint: u32) -> Self {
        Self {
            width: Rc::new(Cell::new(width)),
            breakpoint,
        }
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn set_width(&self, width: u32) {
        self.width.set(width);
    }

    pub fn breakpoint(&self) -> u32 {
        self.breakpoint
    }

    /// Widths below the breakpoint use the mobile layout.
    pub fn is_mobile(&self) -> bool {
        self.is_mobile_width(self.width())
    }

    pub fn is_mobile_width(&self, width: u32) -> bool {
        width < self.breakpoint
    }
}

/// Registers `handler` as a click listener on `node`.
pub fn on_click<F>(doc: &mut Document, node: NodeId, handler: F)
where
    F: Fn(&mut Document, &ClickEvent) + 'static,
{
    doc.add_listener(node, Rc::new(handler));
}

/// Sets inline `display` and drops the `hidden` utility class when showing.
pub(crate) fn set_display(doc: &mut Document, node: NodeId, visible: bool, display: &str) {
    if visible {
        doc.set_style(node, "display", display);
        doc.remove_class(node, "hidden");
    } else {
        doc.set_style(node, "display", "none");
    }
}
