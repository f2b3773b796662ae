//! About-page timeline year strip.

use crate::dom::{Element, Fragment};
use crate::model::TimelineEntry;

pub const YEARS_CONTAINER: &str = "timeline-years-container";
pub const ERA_LABEL: &str = "timeline-era";
pub const YEAR_MOBILE: &str = "timeline-year-mobile";
pub const TEXT: &str = "timeline-text";
pub const IMAGE_FRAME: &str = "timeline-image";

pub fn render_timeline_years(entries: &[TimelineEntry]) -> Fragment {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Element::new("div")
                .class("timeline-year-item text-h2 font-bold text-black transition-colors duration-300 cursor-pointer flex-shrink-0")
                .attr("data-index", index.to_string())
                .text(entry.year.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::render_timeline_years;
    use crate::model::TimelineEntry;

    #[test]
    fn years_are_indexed_in_order() {
        let entries: Vec<TimelineEntry> = ["1990", "2001"]
            .iter()
            .map(|year| TimelineEntry {
                year: year.to_string(),
                image: String::new(),
                description: String::new(),
                era_title: "E".to_string(),
                era_label: "L".to_string(),
            })
            .collect();
        let html = render_timeline_years(&entries).to_html();
        assert!(html.contains("data-index=\"1\">2001</div>"));
    }
}
