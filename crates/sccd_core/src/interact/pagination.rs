//! "Load more" paging of the admission list.

use crate::dom::Document;
use crate::interact::on_click;
use crate::model::ContentRecord;
use crate::mount::mount;
use crate::render::admission::{
    render_admission_list, visible_count, LIST_CONTAINER, LOAD_MORE_BUTTON, LOAD_MORE_CONTAINER,
};
use log::debug;
use std::cell::Cell;
use std::rc::Rc;

/// Renders the first page and binds the load-more button. Returns the
/// number of items shown.
pub fn bind_load_more(doc: &mut Document, items: Rc<Vec<ContentRecord>>, page_size: usize) -> usize {
    let shown = show_page(doc, &items, page_size, 0);
    let Some(button) = doc.get_element_by_id(LOAD_MORE_BUTTON) else {
        return shown;
    };
    let activations = Rc::new(Cell::new(0usize));
    on_click(doc, button, move |doc, _| {
        let next = activations.get() + 1;
        activations.set(next);
        let shown = show_page(doc, &items, page_size, next);
        debug!(
            "event=load_more module=interact activations={} shown={} total={}",
            next,
            shown,
            items.len()
        );
    });
    shown
}

fn show_page(doc: &mut Document, items: &[ContentRecord], page_size: usize, activations: usize) -> usize {
    let shown = visible_count(page_size, activations, items.len());
    mount(doc, LIST_CONTAINER, render_admission_list(items, shown));
    sync_load_more(doc, shown, items.len());
    shown
}

/// Hides the load-more row once everything is shown.
pub fn sync_load_more(doc: &mut Document, shown: usize, total: usize) {
    if let Some(container) = doc.get_element_by_id(LOAD_MORE_CONTAINER) {
        let display = if shown >= total { "none" } else { "flex" };
        doc.set_style(container, "display", display);
    }
}
