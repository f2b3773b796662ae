//! Course catalog (BFA / MDES), grouped by grade.

use crate::dom::{Element, Fragment};
use crate::model::ContentRecord;
use crate::render::common::{chevron_down, empty_state_fragment};

/// Course kinds; each has a `.courses-year-group[data-year=…]` block.
pub const COURSE_KINDS: [&str; 2] = ["required", "elective"];

/// Degree programme of a courses page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Bfa,
    Mdes,
}

impl Program {
    /// Key of the programme in `courses.json`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Bfa => "bfa",
            Self::Mdes => "mdes",
        }
    }

    /// Grade keys and headings in display order.
    pub fn grades(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Bfa => &[
                ("freshman", "Freshman 一年級"),
                ("sophomore", "Sophomore 二年級"),
                ("junior", "Junior 三年級"),
                ("senior", "Senior 四年級"),
            ],
            Self::Mdes => &[("year1", "1st Year 一年級"), ("year2", "2nd Year 二年級")],
        }
    }
}

/// Container id holding the grade sections of `kind`.
pub fn kind_container_id(kind: &str) -> String {
    format!("courses-{kind}-list")
}

/// Grade sections for courses of `kind`; grades without courses are skipped.
pub fn render_course_group(courses: &[ContentRecord], kind: &str, program: Program) -> Fragment {
    let grades = program.grades();
    let mut fragment = Fragment::new();
    for (grade_index, (grade, heading)) in grades.iter().enumerate() {
        let grade_courses: Vec<&ContentRecord> = courses
            .iter()
            .filter(|course| course.text("type") == kind && course.text("grade") == *grade)
            .collect();
        if grade_courses.is_empty() {
            continue;
        }
        let section_class = if grade_index == grades.len() - 1 {
            "flex flex-col md:flex-row items-start"
        } else {
            "flex flex-col md:flex-row items-start border-b border-gray-9 pb-xl mb-xl"
        };
        let last = grade_courses.len() - 1;
        fragment.push(
            Element::new("div")
                .class(section_class)
                .attr("data-grade", *grade)
                .child(
                    Element::new("h5")
                        .class("w-full md:flex-[0_0_calc(25%_-_0.625rem)] pt-sm font-regular mb-md md:mb-0")
                        .text(*heading),
                )
                .child(
                    Element::new("div").class("flex flex-col w-full md:flex-1").children(
                        grade_courses
                            .iter()
                            .enumerate()
                            .map(|(index, course)| render_course_item(course, index == last)),
                    ),
                ),
        );
    }
    if fragment.is_empty() {
        return empty_state_fragment();
    }
    fragment
}

fn render_course_item(course: &ContentRecord, is_last: bool) -> Element {
    let mut item = Element::new("div").class("course-item overflow-hidden");
    if !is_last {
        item = item.class("border-b border-gray-9");
    }
    item.child(
        Element::new("div")
            .class("course-header flex items-center justify-between py-md cursor-pointer")
            .child(
                Element::new("div")
                    .child(Element::new("h5").text(course.text("titleEn")))
                    .child(Element::new("h5").text(course.text("titleZh"))),
            )
            .child(chevron_down()),
    )
    .child(
        Element::new("div")
            .class("course-content h-0 overflow-hidden")
            .child(
                Element::new("div")
                    .class("pt-xs pb-md")
                    .child(Element::new("p").text(course.text("descriptionEn")))
                    .child(Element::new("p").class("mt-sm").text(course.text("descriptionZh"))),
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::{render_course_group, Program};
    use crate::model::ContentRecord;
    use serde_json::json;

    fn courses() -> Vec<ContentRecord> {
        serde_json::from_value(json!([
            {"type": "required", "grade": "freshman", "titleEn": "Drawing"},
            {"type": "required", "grade": "freshman", "titleEn": "Color"},
            {"type": "required", "grade": "senior", "titleEn": "Thesis"},
            {"type": "elective", "grade": "junior", "titleEn": "Motion"}
        ]))
        .expect("courses should deserialize")
    }

    #[test]
    fn groups_by_grade_in_programme_order() {
        let fragment = render_course_group(&courses(), "required", Program::Bfa);
        assert_eq!(fragment.len(), 2);
        let html = fragment.to_html();
        assert!(html.find("Freshman").expect("freshman") < html.find("Senior").expect("senior"));
        assert_eq!(html.matches("course-item").count(), 3);
        assert!(!html.contains("Motion"));
    }

    #[test]
    fn missing_kind_renders_empty_state() {
        let html = render_course_group(&courses(), "elective", Program::Mdes).to_html();
        assert!(html.contains("empty-state"));
    }
}
