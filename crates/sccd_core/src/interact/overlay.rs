//! Overlays: faculty slide-in panel and library PDF viewer.
//!
//! # Invariants
//! - Opening an overlay locks body scroll; closing releases it once the
//!   exit transition has finished.
//! - Overlay shells are static page markup; a missing shell binds nothing.

use crate::animate::{Animator, Ease, Tween, TweenProp, TweenValue};
use crate::dom::{Document, NodeId};
use crate::interact::{on_click, SharedAnimator};
use crate::model::RecordIndex;
use crate::mount::{mount, mount_fields};
use crate::render::faculty::{faculty_detail_fields, render_faculty_sections, DETAIL_TYPES};
use crate::render::library::{pdf_viewer_src, CONTAINER as LIBRARY_CONTAINER};
use log::debug;
use std::rc::Rc;

pub const SLIDE_IN: &str = "faculty-slide-in";
pub const SLIDE_PANEL: &str = "faculty-panel";
pub const SLIDE_OVERLAY: &str = "faculty-overlay";
pub const SLIDE_CLOSE: &str = "faculty-close-btn";
pub const SLIDE_BACK: &str = "faculty-back-btn";
pub const SLIDE_SECTIONS: &str = "faculty-detail-sections";

pub const PDF_MODAL: &str = "pdf-viewer-modal";
pub const PDF_FRAME: &str = "pdf-iframe";
pub const PDF_CLOSE: &str = "pdf-close-btn";

const PDF_FADE_MS: u64 = 300;

fn lock_scroll(doc: &mut Document, locked: bool) {
    let body = doc.body();
    doc.set_style(body, "overflow", if locked { "hidden" } else { "" });
}

/// Whether body scroll is currently locked by an overlay.
pub fn body_scroll_locked(doc: &Document) -> bool {
    doc.style(doc.body(), "overflow") == Some("hidden")
}

// -------------------------------------------------------------------
//  Faculty slide-in
// -------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct SlideIn {
    root: NodeId,
    panel: Option<NodeId>,
    overlay: Option<NodeId>,
    back: Option<NodeId>,
}

impl SlideIn {
    fn find(doc: &Document) -> Option<Self> {
        Some(Self {
            root: doc.get_element_by_id(SLIDE_IN)?,
            panel: doc.get_element_by_id(SLIDE_PANEL),
            overlay: doc.get_element_by_id(SLIDE_OVERLAY),
            back: doc.get_element_by_id(SLIDE_BACK),
        })
    }

    fn sliders(&self) -> impl Iterator<Item = NodeId> {
        self.panel.into_iter().chain(self.back)
    }

    fn open(&self, doc: &mut Document, animator: &dyn Animator) {
        doc.remove_class(self.root, "invisible");
        doc.remove_class(self.root, "pointer-events-none");
        doc.add_class(self.root, "pointer-events-auto");
        if let Some(overlay) = self.overlay {
            animator.to(doc, Tween::new(overlay, TweenProp::Opacity, TweenValue::Number(0.8), 300));
        }
        for slider in self.sliders() {
            animator.to(
                doc,
                Tween::new(slider, TweenProp::TranslateX, TweenValue::Percent(0.0), 500)
                    .delay(300)
                    .ease(Ease::Power3Out),
            );
        }
        lock_scroll(doc, true);
    }

    fn close(&self, doc: &mut Document, animator: &dyn Animator) {
        if let Some(overlay) = self.overlay {
            animator.to(
                doc,
                Tween::new(overlay, TweenProp::Opacity, TweenValue::Number(0.0), 400).delay(100),
            );
        }
        let root = self.root;
        let mut sliders = self.sliders().peekable();
        if sliders.peek().is_none() {
            hide_slide_in(doc, root);
            return;
        }
        let mut first = true;
        for slider in sliders {
            let mut tween = Tween::new(slider, TweenProp::TranslateX, TweenValue::Percent(100.0), 500)
                .ease(Ease::Power3In);
            if first {
                tween = tween.on_complete(move |doc, _| hide_slide_in(doc, root));
                first = false;
            }
            animator.to(doc, tween);
        }
    }
}

fn hide_slide_in(doc: &mut Document, root: NodeId) {
    doc.add_class(root, "invisible");
    doc.add_class(root, "pointer-events-none");
    doc.remove_class(root, "pointer-events-auto");
    lock_scroll(doc, false);
}

/// Opens the slide-in for faculty `id`; unknown ids are ignored.
pub fn open_faculty(doc: &mut Document, animator: &dyn Animator, faculty: &RecordIndex, id: &str) -> bool {
    let (Some(slide_in), Some(member)) = (SlideIn::find(doc), faculty.get(id)) else {
        return false;
    };
    mount_fields(doc, &faculty_detail_fields(member));
    mount(doc, SLIDE_SECTIONS, render_faculty_sections(member));
    slide_in.open(doc, animator);
    debug!("event=overlay_open module=interact overlay=faculty id={}", id);
    true
}

pub fn close_faculty(doc: &mut Document, animator: &dyn Animator) {
    if let Some(slide_in) = SlideIn::find(doc) {
        slide_in.close(doc, animator);
    }
}

/// Binds card images of detail-bearing faculty and the close controls.
/// Returns how many cards open the panel.
pub fn bind_faculty_slide_in(doc: &mut Document, animator: SharedAnimator, faculty: Rc<RecordIndex>) -> usize {
    let Some(slide_in) = SlideIn::find(doc) else {
        return 0;
    };
    let mut bound = 0;
    for card in doc.query_class_all("faculty-card") {
        let category = doc.attr(card, "data-category").unwrap_or_default();
        if !DETAIL_TYPES.contains(&category) {
            continue;
        }
        let (Some(wrapper), Some(id)) = (
            doc.query_first_class(card, "faculty-card-image-wrapper"),
            doc.attr(card, "data-faculty-id").map(str::to_string),
        ) else {
            continue;
        };
        let animator = Rc::clone(&animator);
        let faculty = Rc::clone(&faculty);
        on_click(doc, wrapper, move |doc, _| {
            open_faculty(doc, animator.as_ref(), &faculty, &id);
        });
        bound += 1;
    }

    let closers = [doc.get_element_by_id(SLIDE_CLOSE), slide_in.back, slide_in.overlay];
    for closer in closers.into_iter().flatten() {
        let animator = Rc::clone(&animator);
        on_click(doc, closer, move |doc, _| close_faculty(doc, animator.as_ref()));
    }
    bound
}

// -------------------------------------------------------------------
//  PDF viewer
// -------------------------------------------------------------------

pub fn open_pdf(doc: &mut Document, animator: &dyn Animator, pdf_url: &str) -> bool {
    let (Some(modal), Some(frame)) = (doc.get_element_by_id(PDF_MODAL), doc.get_element_by_id(PDF_FRAME)) else {
        return false;
    };
    animator.kill_tweens_of(modal);
    doc.set_attr(frame, "src", pdf_viewer_src(pdf_url));
    doc.remove_style(modal, "opacity");
    doc.remove_class(modal, "hidden");
    doc.remove_class(modal, "opacity-0");
    lock_scroll(doc, true);
    debug!(
        "event=overlay_open module=interact overlay=pdf placeholder={}",
        pdf_url.trim().is_empty()
    );
    true
}

pub fn close_pdf(doc: &mut Document, animator: &dyn Animator) {
    let Some(modal) = doc.get_element_by_id(PDF_MODAL) else {
        return;
    };
    doc.add_class(modal, "opacity-0");
    animator.to(
        doc,
        Tween::new(modal, TweenProp::Opacity, TweenValue::Number(0.0), PDF_FADE_MS).on_complete(
            move |doc, _| {
                doc.add_class(modal, "hidden");
                doc.remove_style(modal, "opacity");
                if let Some(frame) = doc.get_element_by_id(PDF_FRAME) {
                    doc.set_attr(frame, "src", "");
                }
                lock_scroll(doc, false);
            },
        ),
    );
}

/// Delegated card clicks on the library list plus modal close controls.
pub fn bind_pdf_viewer(doc: &mut Document, animator: SharedAnimator) -> bool {
    let (Some(list), Some(modal), Some(close), Some(_)) = (
        doc.get_element_by_id(LIBRARY_CONTAINER),
        doc.get_element_by_id(PDF_MODAL),
        doc.get_element_by_id(PDF_CLOSE),
        doc.get_element_by_id(PDF_FRAME),
    ) else {
        return false;
    };

    let opener = Rc::clone(&animator);
    on_click(doc, list, move |doc, event| {
        let Some(card) = doc.closest_class(event.target, "library-card") else {
            return;
        };
        if let Some(pdf) = doc.attr(card, "data-pdf").map(str::to_string) {
            open_pdf(doc, opener.as_ref(), &pdf);
        }
    });

    let closer = Rc::clone(&animator);
    on_click(doc, close, move |doc, _| close_pdf(doc, closer.as_ref()));
    on_click(doc, modal, move |doc, event| {
        if event.target == modal {
            close_pdf(doc, animator.as_ref());
        }
    });
    true
}
