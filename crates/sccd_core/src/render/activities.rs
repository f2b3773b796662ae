//! Activity listings: general activities, workshops, students present and
//! summer camp. All of them are year groups of collapsible items.

use crate::dom::{Element, Fragment};
use crate::model::{ContentRecord, YearGroup};
use crate::render::common::{chevron_down, chevron_right_open, empty_state_fragment, rule_row};

pub const GENERAL_CONTAINER: &str = "general-activities-list";
pub const WORKSHOP_CONTAINER: &str = "workshop-list";
pub const STUDENTS_PRESENT_CONTAINER: &str = "students-present-list";
pub const SUMMER_CAMP_CONTAINER: &str = "summer-camp-list";

/// Gallery images shown per general activity.
pub const MAX_ACTIVITY_IMAGES: usize = 5;

/// Category filter values offered on the general activities list.
pub const ACTIVITY_CATEGORIES: [(&str, &str); 6] = [
    ("all", "All 全部"),
    ("seminars", "Seminars 講座"),
    ("visits", "Visits 參訪"),
    ("exhibitions", "Exhibitions 展覽"),
    ("conferences", "Conferences 研討會"),
    ("competitions", "Competitions 競賽"),
];

/// Workshop-shaped listings share markup but differ in one labelled field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkshopKind {
    Workshop,
    StudentsPresent,
}

impl WorkshopKind {
    pub fn data_name(self) -> &'static str {
        match self {
            Self::Workshop => "workshops",
            Self::StudentsPresent => "students-present",
        }
    }

    pub fn container(self) -> &'static str {
        match self {
            Self::Workshop => WORKSHOP_CONTAINER,
            Self::StudentsPresent => STUDENTS_PRESENT_CONTAINER,
        }
    }

    fn subtitle(self) -> &'static str {
        match self {
            Self::Workshop => "Tutor 講師",
            Self::StudentsPresent => "Organizer 主辦單位",
        }
    }

    fn subtitle_field(self) -> &'static str {
        match self {
            Self::Workshop => "tutor",
            Self::StudentsPresent => "organizer",
        }
    }
}

fn separator() -> Element {
    rule_row(
        "activities-separator grid-12 pt-md pb-2xl",
        "col-span-12 border-b border-gray-9",
    )
}

fn year_toggle(year: &str) -> Element {
    Element::new("div")
        .class("col-span-12 md:col-span-1 md:col-start-1 workshop-year-toggle cursor-pointer flex items-center gap-sm order-1")
        .child(chevron_right_open())
        .child(Element::new("h5").text(year))
}

fn year_groups<F>(groups: &[YearGroup], render_item: F) -> Fragment
where
    F: Fn(usize, &[ContentRecord]) -> Element,
{
    if groups.is_empty() {
        return empty_state_fragment();
    }
    let mut fragment = Fragment::new();
    for (index, group) in groups.iter().enumerate() {
        fragment.push(
            Element::new("div")
                .class("workshop-year-group grid-12 items-start")
                .attr("data-year", group.year.as_str())
                .child(year_toggle(&group.year))
                .child(
                    Element::new("div")
                        .class("col-span-12 md:col-span-11 md:col-start-2 workshop-year-items flex flex-col order-2 mt-md md:mt-0")
                        .children((0..group.items.len()).map(|item| render_item(item, &group.items))),
                ),
        );
        if index + 1 < groups.len() {
            fragment.push(separator());
        }
    }
    fragment
}

/// General activities; item borders are assigned later by the filter.
pub fn render_general_activities(groups: &[YearGroup]) -> Fragment {
    year_groups(groups, |index, items| {
        let item = &items[index];
        let images: Vec<String> = item
            .list("images")
            .into_iter()
            .take(MAX_ACTIVITY_IMAGES)
            .collect();
        let mut details = Element::new("div").class("flex gap-xl");
        if let Some(date) = item.opt_text("date") {
            details = details.child(Element::new("h6").class("text-black").text(date));
        }
        details = details.child(
            Element::new("h6")
                .class("text-black")
                .text(item.text("categoryLabel")),
        );
        let mut body = Element::new("div")
            .class("pb-xl flex flex-col gap-md")
            .child(details);
        if !images.is_empty() {
            body = body.child(
                Element::new("div")
                    .class("activity-gallery flex gap-sm mt-md")
                    .children(images.into_iter().map(|src| {
                        Element::new("div").class("flex-1 min-w-0").child(
                            Element::new("img")
                                .class("w-full h-[160px] object-cover block")
                                .attr("src", src)
                                .attr("alt", ""),
                        )
                    })),
            );
        }
        Element::new("div")
            .class("workshop-item overflow-hidden")
            .attr("data-category", item.text("category"))
            .child(
                Element::new("div")
                    .class("workshop-header cursor-pointer group transition-colors duration-fast flex items-center justify-between")
                    .child(Element::new("div").class("text-h5 font-bold").text(item.text("title")))
                    .child(chevron_down()),
            )
            .child(
                Element::new("div")
                    .class("workshop-content h-0 overflow-hidden")
                    .child(body),
            )
    })
}

/// Workshops or students-present entries.
pub fn render_workshops(groups: &[YearGroup], kind: WorkshopKind) -> Fragment {
    year_groups(groups, |index, items| {
        let item = &items[index];
        let is_last = index + 1 == items.len();
        let mut facts = Element::new("div").class("flex-1 flex flex-col gap-lg");
        if let Some(date) = item.opt_text("date") {
            facts = facts.child(
                Element::new("div").child(Element::new("h6").class("text-black").text(date)),
            );
        }
        facts = facts
            .child(
                Element::new("div")
                    .child(Element::new("h6").class("text-black mb-xs").text(kind.subtitle()))
                    .child(
                        Element::new("p")
                            .class("text-p1")
                            .text(item.text(kind.subtitle_field())),
                    ),
            )
            .child(
                Element::new("div")
                    .child(Element::new("h6").class("mb-xs text-black").text("Introduction 介紹"))
                    .child(Element::new("p").class("text-p1").text(item.text("intro"))),
            );

        let mut header = Element::new("div")
            .class("workshop-header cursor-pointer group transition-colors duration-fast flex items-center justify-between")
            .child(Element::new("div").class("text-h5 font-bold").text(item.text("title")))
            .child(chevron_down());
        if !is_last {
            header = header.class("pb-md");
        }
        let mut entry = Element::new("div").class("workshop-item overflow-hidden");
        if !is_last {
            entry = entry.class("border-b border-gray-9");
        }
        entry.child(header).child(
            Element::new("div").class("workshop-content h-0 overflow-hidden").child(
                Element::new("div")
                    .class("pb-xl pt-xs flex gap-3xl")
                    .child(facts)
                    .child(
                        Element::new("div").style("flex", "0 0 30%").child(
                            Element::new("img")
                                .class("w-full object-cover block")
                                .attr("src", item.text("image")),
                        ),
                    ),
            ),
        )
    })
}

/// Summer camp sessions grouped by year.
pub fn render_summer_camp(groups: &[YearGroup]) -> Fragment {
    if groups.is_empty() {
        return empty_state_fragment();
    }
    let mut fragment = Fragment::new();
    for (index, group) in groups.iter().enumerate() {
        fragment.push(
            Element::new("div")
                .class("summer-camp-year-group grid-12 items-start")
                .attr("data-year", group.year.as_str())
                .child(
                    Element::new("div")
                        .class("col-start-3 col-span-1")
                        .child(Element::new("h5").text(group.year.as_str())),
                )
                .child(
                    Element::new("div")
                        .class("col-start-4 col-span-9")
                        .children(group.items.iter().map(render_camp_item)),
                ),
        );
        if index + 1 < groups.len() {
            fragment.push(rule_row(
                "grid-12 pt-xl pb-2xl",
                "col-start-3 col-span-10 border-b border-gray-9",
            ));
        }
    }
    fragment
}

fn render_camp_item(item: &ContentRecord) -> Element {
    Element::new("div")
        .class("summer-camp-item overflow-hidden")
        .child(
            Element::new("div")
                .class("summer-camp-header cursor-pointer group transition-colors duration-fast")
                .child(
                    Element::new("div")
                        .class("flex items-center justify-between pb-md")
                        .child(Element::new("h4").class("font-bold").text(item.text("title")))
                        .child(chevron_down()),
                ),
        )
        .child(
            Element::new("div").class("summer-camp-content h-0 overflow-hidden").child(
                Element::new("div")
                    .class("pb-md pt-xs flex gap-3xl")
                    .child(
                        Element::new("div")
                            .class("flex-1 flex flex-col gap-lg")
                            .child(Element::new("p").text(item.text("descriptionEn")))
                            .child(Element::new("p").text(item.text("descriptionZh"))),
                    )
                    .child(
                        Element::new("div").style("flex", "0 0 30%").child(
                            Element::new("img")
                                .class("w-full object-cover block")
                                .attr("src", item.text("image"))
                                .attr("alt", "Camp Poster"),
                        ),
                    ),
            ),
        )
}
