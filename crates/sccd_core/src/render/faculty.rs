//! Faculty roster cards and slide-in detail.

use crate::dom::{Element, Fragment};
use crate::model::ContentRecord;
use crate::mount::FieldFill;
use crate::render::common::empty_state_fragment;

/// Roster groups: `type` value and the container it renders into.
pub const FACULTY_GROUPS: [(&str, &str); 3] = [
    ("fulltime", "faculty-fulltime-list"),
    ("parttime", "faculty-parttime-list"),
    ("admin", "faculty-admin-list"),
];

/// Card types that open the slide-in panel.
pub const DETAIL_TYPES: [&str; 2] = ["fulltime", "admin"];

/// Members of one `type`, in JSON order.
pub fn members_of<'a>(records: &'a [ContentRecord], kind: &str) -> Vec<&'a ContentRecord> {
    records
        .iter()
        .filter(|record| record.text("type") == kind)
        .collect()
}

pub fn render_faculty_cards(members: &[&ContentRecord]) -> Fragment {
    if members.is_empty() {
        return empty_state_fragment();
    }
    members.iter().map(|member| render_card(member)).collect()
}

fn render_card(member: &ContentRecord) -> Element {
    let mut card = Element::new("div")
        .class("faculty-card group cursor-pointer")
        .attr("data-category", member.text("type"));
    if let Some(id) = member.id() {
        card = card.attr("data-faculty-id", id);
    }
    card.child(
        Element::new("div")
            .class("faculty-card-image-wrapper overflow-hidden mb-sm aspect-[4/5] bg-gray-2 relative")
            .child(
                Element::new("img")
                    .class("faculty-card-image w-full h-full object-cover transition-transform duration-700 group-hover:scale-105")
                    .attr("src", member.text("image"))
                    .attr("alt", member.text("nameEn"))
                    .attr("loading", "lazy"),
            ),
    )
    .child(
        Element::new("div")
            .class("text-left")
            .child(Element::new("h5").text(member.text("nameEn")))
            .child(Element::new("h5").text(member.text("nameZh")))
            .child(Element::new("p").class("text-p1 mt-xs").text(member.text("titleEn")))
            .child(Element::new("p").class("text-p1").text(member.text("titleZh"))),
    )
}

/// Biography sections shown in the slide-in panel.
pub fn render_faculty_sections(member: &ContentRecord) -> Fragment {
    member
        .records("sections")
        .iter()
        .map(|section| {
            Element::new("div")
                .class("flex gap-gutter")
                .child(
                    Element::new("div").style("flex", "0 0 25%").child(
                        Element::new("h6").class("text-black").text(format!(
                            "{} {}",
                            section.text("titleEn"),
                            section.text("titleZh")
                        )),
                    ),
                )
                .child(
                    Element::new("div").class("flex-1").child(
                        Element::new("p")
                            .class("text-p1")
                            .style("white-space", "pre-line")
                            .raw(section.text("content")),
                    ),
                )
        })
        .collect()
}

/// Field fills for the slide-in header.
pub fn faculty_detail_fields(member: &ContentRecord) -> Vec<FieldFill> {
    vec![
        FieldFill::attr("faculty-detail-image", "src", member.text("image")),
        FieldFill::text("faculty-detail-name-en", member.text("nameEn")),
        FieldFill::text("faculty-detail-name-zh", member.text("nameZh")),
        FieldFill::text("faculty-detail-title-en", member.text("titleEn")),
        FieldFill::text("faculty-detail-title-zh", member.text("titleZh")),
    ]
}
