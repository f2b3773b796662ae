//! About-page resources accordion.

use crate::dom::{Element, Fragment};
use crate::interact::horizontal::{CONTENT, PANEL};
use crate::model::ContentRecord;
use crate::render::common::empty_state_fragment;

pub const CONTAINER: &str = "resources-accordion-container";

/// Wrapper the horizontal accordion is bound to.
pub const WRAPPER: &str = "resources-accordion";

/// One panel per resource: a label strip, then an image and bilingual text
/// revealed while the panel is expanded.
pub fn render_resources(items: &[ContentRecord]) -> Fragment {
    if items.is_empty() {
        return empty_state_fragment();
    }
    Fragment::new().with(
        Element::new("div")
            .id(WRAPPER)
            .class("accordion-wrapper colored-accordion flex flex-col md:flex-row h-auto md:h-[700px]")
            .children(items.iter().enumerate().map(|(index, item)| resource_panel(index, item))),
    )
}

fn resource_panel(index: usize, item: &ContentRecord) -> Element {
    let title = item.text("title");
    let text_en = item.opt_text("textEn").unwrap_or_else(|| item.text("descriptionEn"));
    let text_zh = item.opt_text("textZh").unwrap_or_else(|| item.text("descriptionZh"));
    Element::new("div")
        .class(&format!("{PANEL} accordion-item relative overflow-hidden cursor-pointer"))
        .attr("data-index", index.to_string())
        .child(
            Element::new("div")
                .class("accordion-label")
                .child(Element::new("div").class("accordion-label-inner").text(title.clone())),
        )
        .child(
            Element::new("div").class(&format!("{CONTENT} accordion-body")).child(
                Element::new("div")
                    .class("accordion-body-inner")
                    .child(
                        Element::new("div").class("accordion-img-wrap").child(
                            Element::new("img")
                                .class("w-full h-full object-cover")
                                .attr("src", item.text("image"))
                                .attr("alt", title),
                        ),
                    )
                    .child(
                        Element::new("div")
                            .class("accordion-text-wrap")
                            .child(Element::new("p").class("text-white mb-sm").text(text_en))
                            .child(Element::new("p").class("text-white").text(text_zh)),
                    ),
            ),
        )
}

#[cfg(test)]
mod tests {
    use super::render_resources;
    use crate::model::ContentRecord;
    use crate::render::EMPTY_STATE_TEXT;
    use serde_json::json;

    #[test]
    fn panels_fall_back_to_description_text() {
        let items = vec![
            ContentRecord::from_value(json!({
                "title": "Studio <A>", "image": "a.jpg", "textEn": "Open", "textZh": "開放"
            })),
            ContentRecord::from_value(json!({
                "title": "Lab", "descriptionEn": "Quiet", "descriptionZh": "安靜"
            })),
        ];
        let html = render_resources(&items).to_html();
        assert_eq!(html.matches("accordion-panel").count(), 2);
        assert!(html.contains("Studio &lt;A&gt;"));
        assert!(html.contains(r#"data-index="1""#));
        assert!(html.contains("Quiet") && html.contains("安靜"));
    }

    #[test]
    fn no_resources_render_the_empty_state() {
        assert!(render_resources(&[]).to_html().contains(EMPTY_STATE_TEXT));
    }
}
