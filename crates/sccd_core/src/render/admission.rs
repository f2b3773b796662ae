//! Admission news: paged list and detail view.

use crate::dom::{Element, Fragment};
use crate::model::{ContentRecord, RecordIndex};
use crate::mount::FieldFill;
use crate::render::common::empty_state_fragment;

pub const LIST_CONTAINER: &str = "admission-list";
pub const LOAD_MORE_CONTAINER: &str = "load-more-container";
pub const LOAD_MORE_BUTTON: &str = "load-more-btn";
pub const DETAIL_CONTAINER: &str = "admission-detail-content";
pub const LIST_PAGE: &str = "admission.html";
pub const DETAIL_PAGE: &str = "admission-detail.html";

/// Items shown after `activations` load-more clicks: `min(size + size×N, total)`.
pub fn visible_count(page_size: usize, activations: usize, total: usize) -> usize {
    page_size
        .saturating_mul(activations.saturating_add(1))
        .min(total)
}

/// Link to the detail view of the record with `id`, percent-encoded.
pub fn detail_href(id: &str) -> String {
    format!("{DETAIL_PAGE}?id={}", urlencoding::encode(id))
}

/// First `visible` posts in JSON order.
pub fn render_admission_list(items: &[ContentRecord], visible: usize) -> Fragment {
    if items.is_empty() {
        return empty_state_fragment();
    }
    items
        .iter()
        .take(visible)
        .map(render_admission_item)
        .collect()
}

fn render_admission_item(item: &ContentRecord) -> Element {
    let mut link = Element::new("a")
        .class("border-b border-gray-9 pb-sm block group")
        .style("flex", "1")
        .child(
            Element::new("h5")
                .class("font-regular group-hover:font-bold transition-all duration-fast")
                .text(item.text("title")),
        );
    if let Some(id) = item.id() {
        link = link.attr("href", detail_href(&id));
    }
    Element::new("div")
        .class("admission-item flex items-baseline")
        .child(
            Element::new("h5")
                .class("font-regular")
                .style("flex", "0 0 20%")
                .text(item.text("date")),
        )
        .child(link)
}

/// Neighbour link state of a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbour {
    pub href: Option<String>,
}

/// Detail view of one admission post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionDetail {
    pub date: String,
    pub title: String,
    pub content_html: String,
    pub previous: Neighbour,
    pub next: Neighbour,
}

impl AdmissionDetail {
    /// Looks up `id`; `None` means the caller should return to the list.
    pub fn lookup(index: &RecordIndex, id: &str) -> Option<Self> {
        let item = index.get(id)?;
        let link = |neighbour: Option<&ContentRecord>| Neighbour {
            href: neighbour.and_then(ContentRecord::id).map(|id| detail_href(&id)),
        };
        Some(Self {
            date: item.text("date"),
            title: item.text("title"),
            content_html: item.text("content"),
            previous: link(index.previous(id)),
            next: link(index.next(id)),
        })
    }

    /// Field fills for the detail shell.
    pub fn fields(&self) -> Vec<FieldFill> {
        vec![
            FieldFill::text("admission-date", &self.date),
            FieldFill::text("admission-title", &self.title),
            FieldFill::html("admission-body", &self.content_html),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::{detail_href, render_admission_list, visible_count, AdmissionDetail, DETAIL_PAGE};
    use crate::location::PageLocation;
    use crate::model::{ContentRecord, RecordIndex};
    use serde_json::json;

    fn posts(count: usize) -> Vec<ContentRecord> {
        (1..=count)
            .map(|n| {
                ContentRecord::from_value(json!({
                    "id": n.to_string(),
                    "date": format!("2024.01.{n:02}"),
                    "title": format!("Post {n}"),
                    "content": format!("<p>Body {n}</p>")
                }))
            })
            .collect()
    }

    #[test]
    fn detail_links_encode_the_id() {
        assert_eq!(detail_href("7"), "admission-detail.html?id=7");
        let href = detail_href("a&b #1");
        assert_eq!(href, "admission-detail.html?id=a%26b%20%231");
        let query = href.split_once('?').map(|(_, query)| query);
        let location = PageLocation::for_page("pages", DETAIL_PAGE, query).expect("location");
        assert_eq!(location.query("id").as_deref(), Some("a&b #1"));
    }

    #[test]
    fn visible_count_grows_in_batches() {
        assert_eq!(visible_count(10, 0, 25), 10);
        assert_eq!(visible_count(10, 1, 25), 20);
        assert_eq!(visible_count(10, 2, 25), 25);
        assert_eq!(visible_count(10, 0, 4), 4);
    }

    #[test]
    fn list_renders_prefix_with_links() {
        let html = render_admission_list(&posts(12), 10).to_html();
        assert_eq!(html.matches("admission-item").count(), 10);
        assert!(html.contains("href=\"admission-detail.html?id=1\""));
        assert!(!html.contains("Post 11"));
    }

    #[test]
    fn empty_list_renders_empty_state() {
        assert!(render_admission_list(&[], 10).to_html().contains("empty-state"));
    }

    #[test]
    fn detail_links_neighbours_in_list_order() {
        let index = RecordIndex::build(posts(3));
        let first = AdmissionDetail::lookup(&index, "1").expect("first post");
        assert_eq!(first.previous.href, None);
        assert_eq!(first.next.href.as_deref(), Some("admission-detail.html?id=2"));
        let last = AdmissionDetail::lookup(&index, "3").expect("last post");
        assert_eq!(last.next.href, None);
        assert_eq!(last.content_html, "<p>Body 3</p>");
        assert!(AdmissionDetail::lookup(&index, "99").is_none());
    }
}
