//! Legal pages (privacy policy, terms and conditions).

use crate::model::ContentRecord;
use crate::mount::FieldFill;

/// Data file of each legal page, keyed by page file name.
pub const LEGAL_PAGES: [(&str, &str); 2] = [
    ("privacy-policy.html", "privacy-policy"),
    ("terms-and-conditions.html", "terms-and-conditions"),
];

pub fn legal_fields(document: &ContentRecord) -> Vec<FieldFill> {
    vec![
        FieldFill::text("legal-title-en", document.text("titleEn")),
        FieldFill::text("legal-title-zh", document.text("titleZh")),
        FieldFill::html("legal-content", document.text("content")),
        FieldFill::text("legal-updated-en", document.text("lastUpdatedEn")),
        FieldFill::text("legal-updated-zh", document.text("lastUpdatedZh")),
    ]
}

#[cfg(test)]
mod tests {
    use super::legal_fields;
    use crate::model::ContentRecord;
    use crate::mount::FieldValue;
    use serde_json::json;

    #[test]
    fn content_is_html_and_missing_dates_are_blank() {
        let fills = legal_fields(&ContentRecord::from_value(json!({
            "titleEn": "Privacy",
            "content": "<h2>1</h2>"
        })));
        assert_eq!(fills.len(), 5);
        assert_eq!(fills[2].value, FieldValue::Html("<h2>1</h2>".to_string()));
        assert_eq!(fills[3].value, FieldValue::Text(String::new()));
    }
}
