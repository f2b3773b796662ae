//! Records and awards by year.

use crate::dom::{Element, Fragment};
use crate::model::{ContentRecord, YearGroup};
use crate::render::common::{chevron_right_open, empty_state_fragment, rule_row};

pub const CONTAINER: &str = "records-list-container";

/// Year blocks with a toggle, a chevron and the award rows.
pub fn render_records(groups: &[YearGroup]) -> Fragment {
    if groups.is_empty() {
        return empty_state_fragment();
    }
    let last_group = groups.len() - 1;
    groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let is_last = index == last_group;
            let mut block = Element::new("div").class("col-span-12");
            if !is_last {
                block = block.class("mb-xl");
            }
            block = block.child(
                Element::new("div")
                    .class("grid-12 items-start pb-xl")
                    .attr("data-year", group.year.as_str())
                    .child(
                        Element::new("div")
                            .class("col-span-10 md:col-span-1 md:col-start-3 activities-year-toggle cursor-pointer flex items-center order-1 md:order-2")
                            .child(Element::new("h5").text(group.year.as_str())),
                    )
                    .child(
                        Element::new("div")
                            .class("col-span-2 md:col-span-1 md:col-start-2 flex justify-end items-center activities-year-toggle cursor-pointer h-toggle order-2 md:order-1")
                            .child(chevron_right_open()),
                    )
                    .child(
                        Element::new("div")
                            .class("col-span-12 md:col-span-9 md:col-start-4 activities-year-items flex flex-col order-3 mt-md md:mt-0")
                            .children(render_rows(&group.items)),
                    ),
            );
            if !is_last {
                block = block.child(rule_row(
                    "grid-12",
                    "col-span-12 md:col-start-3 md:col-span-10 border-b border-gray-9",
                ));
            }
            block
        })
        .collect()
}

fn render_rows(items: &[ContentRecord]) -> Vec<Element> {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let padding = if index == 0 { "pb-xs pt-[4px]" } else { "py-xs" };
            let mut row = Element::new("div")
                .class("record-row grid grid-cols-12 md:grid-cols-9 gap-y-1 md:gap-y-0 items-center text-xs md:text-p1")
                .class(padding);
            if index != last {
                row = row.class("border-b border-gray-9");
            }
            row.child(
                Element::new("div")
                    .class("col-span-12 flex justify-between md:contents")
                    .child(cell("md:col-span-4 truncate md:order-2", item.text("competition")))
                    .child(cell(
                        "md:col-span-1 text-right md:text-left truncate md:order-4",
                        item.text("rank"),
                    )),
            )
            .child(
                Element::new("div")
                    .class("col-span-12 flex gap-xs md:contents")
                    .child(cell("md:col-span-1 text-left truncate md:order-5", item.text("winner")))
                    .child(cell("md:col-span-2 text-left truncate md:order-3", item.text("award")))
                    .child(cell("md:col-span-1 text-left truncate md:order-1", item.text("location"))),
            )
        })
        .collect()
}

fn cell(classes: &str, text: String) -> Element {
    Element::new("p").class(classes).text(text)
}

#[cfg(test)]
mod tests {
    use super::render_records;
    use crate::model::YearGroup;
    use serde_json::json;

    #[test]
    fn year_blocks_start_open_with_rules_between() {
        let groups: Vec<YearGroup> = serde_json::from_value(json!([
            {"year": 2024, "items": [{"competition": "A", "rank": 1}, {"competition": "B"}]},
            {"year": 2023, "items": [{"competition": "C"}]}
        ]))
        .expect("groups should deserialize");
        let html = render_records(&groups).to_html();
        assert_eq!(html.matches("rotate-90").count(), 2);
        assert_eq!(html.matches("record-row").count(), 3);
        assert_eq!(html.matches("md:col-start-3 md:col-span-10 border-b").count(), 1);
        assert!(html.contains("<h5>2024</h5>"));
    }
}
