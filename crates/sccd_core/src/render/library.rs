//! Library publications and the PDF viewer source.

use crate::dom::{Element, Fragment};
use crate::model::ContentRecord;
use crate::render::common::empty_state_fragment;

pub const CONTAINER: &str = "library-list-container";

/// Viewer flags appended to real PDF links.
pub const PDF_VIEW_FLAGS: &str = "#toolbar=0&navpanes=0&scrollbar=0&view=FitH";

const PLACEHOLDER_PAGE: &str = "<body style=\"margin:0;display:flex;justify-content:center;align-items:center;height:100vh;background:#f0f0f0;color:#666;font-family:sans-serif;\"><div style=\"text-align:center;\"><h3 style=\"margin-bottom:10px;color:#333;\">PDF Placeholder</h3><p>Layout Test Mode (No PDF Source)</p></div></body>";

/// Publication cards; the PDF link travels in `data-pdf`.
pub fn render_library(items: &[ContentRecord]) -> Fragment {
    if items.is_empty() {
        return empty_state_fragment();
    }
    items
        .iter()
        .map(|item| {
            Element::new("div")
                .class("library-card cursor-pointer group")
                .attr("data-pdf", item.text("pdfUrl"))
                .child(
                    Element::new("div")
                        .class("library-card-image-wrapper mb-md overflow-hidden bg-gray-2")
                        .style("aspect-ratio", "4/5")
                        .child(
                            Element::new("img")
                                .class("library-card-image w-full h-full object-cover transition-transform duration-700 group-hover:scale-105")
                                .attr("src", item.text("image"))
                                .attr("alt", item.text("titleEn"))
                                .attr("loading", "lazy"),
                        ),
                )
                .child(
                    Element::new("div")
                        .class("text-left")
                        .child(Element::new("h5").text(item.text("titleEn")))
                        .child(Element::new("h5").text(item.text("titleZh")))
                        .child(Element::new("p").class("text-p1 mt-xs").text(item.text("year"))),
                )
        })
        .collect()
}

/// Viewer `src` for a card's `data-pdf`; blank links show a placeholder page.
pub fn pdf_viewer_src(pdf_url: &str) -> String {
    let pdf_url = pdf_url.trim();
    if pdf_url.is_empty() {
        format!(
            "data:text/html;charset=utf-8,{}",
            urlencoding::encode(PLACEHOLDER_PAGE)
        )
    } else {
        format!("{pdf_url}{PDF_VIEW_FLAGS}")
    }
}

#[cfg(test)]
mod tests {
    use super::{pdf_viewer_src, render_library};
    use crate::model::ContentRecord;
    use serde_json::json;

    #[test]
    fn viewer_src_hides_toolbar_or_uses_placeholder() {
        assert_eq!(
            pdf_viewer_src("../pdf/a.pdf"),
            "../pdf/a.pdf#toolbar=0&navpanes=0&scrollbar=0&view=FitH"
        );
        let placeholder = pdf_viewer_src("  ");
        assert!(placeholder.starts_with("data:text/html;charset=utf-8,"));
        assert!(placeholder.contains("PDF%20Placeholder"));
    }

    #[test]
    fn cards_carry_pdf_attribute_even_when_blank() {
        let items = vec![
            ContentRecord::from_value(json!({"titleEn": "Annual", "pdfUrl": "a.pdf", "year": 2024})),
            ContentRecord::from_value(json!({"titleEn": "Zine"})),
        ];
        let html = render_library(&items).to_html();
        assert!(html.contains("data-pdf=\"a.pdf\""));
        assert!(html.contains("data-pdf=\"\""));
        assert!(html.contains("<p class=\"text-p1 mt-xs\">2024</p>"));
    }
}
