//! Support page donation methods.

use crate::dom::{Element, Fragment};
use crate::model::ContentRecord;
use crate::render::common::{chevron_down, empty_state_fragment};

pub const CONTAINER: &str = "donation-methods-list";

/// One accordion item per method; `content` is authored HTML.
pub fn render_donation_methods(methods: &[ContentRecord]) -> Fragment {
    if methods.is_empty() {
        return empty_state_fragment();
    }
    methods
        .iter()
        .map(|method| {
            Element::new("div")
                .class("course-item overflow-hidden border-b border-gray-9")
                .child(
                    Element::new("div")
                        .class("course-header flex items-center justify-between py-md cursor-pointer")
                        .child(Element::new("h5").text(method.text("title")))
                        .child(chevron_down()),
                )
                .child(
                    Element::new("div")
                        .class("course-content h-0 overflow-hidden")
                        .child(Element::new("div").class("pt-xs pb-md").raw(method.text("content"))),
                )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::render_donation_methods;
    use crate::model::ContentRecord;
    use serde_json::json;

    #[test]
    fn content_is_authored_html_and_title_is_escaped() {
        let methods = vec![ContentRecord::from_value(json!({
            "title": "Bank <transfer>",
            "content": "<p>Account: 123</p>"
        }))];
        let html = render_donation_methods(&methods).to_html();
        assert!(html.contains("Bank &lt;transfer&gt;"));
        assert!(html.contains("<p>Account: 123</p>"));
    }
}
