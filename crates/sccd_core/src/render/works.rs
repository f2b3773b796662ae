//! Student works galleries (BFA / MDES).
//!
//! Each category renders three `works-content` panels (intro, hero,
//! details) tagged with `data-category`. Only the first category is visible
//! initially; the works filter switches between them.

use crate::dom::{Element, Fragment};
use crate::model::{CategoryBucket, CategoryBuckets, ContentRecord};
use crate::render::common::video_embed;

pub const INTRO_CONTAINER: &str = "works-intro-container";
pub const HERO_CONTAINER: &str = "works-hero-container";
pub const DETAILS_CONTAINER: &str = "works-details-container";

/// Which works page is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorksEdition {
    /// Categories may carry a closing video.
    Bfa,
    /// No video section; categories without `titleHtml` have no intro.
    Mdes,
}

impl WorksEdition {
    pub fn data_name(self) -> &'static str {
        match self {
            Self::Bfa => "bfa-works",
            Self::Mdes => "mdes-works",
        }
    }
}

/// The three panels of a works page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorksFragments {
    pub intro: Fragment,
    pub hero: Fragment,
    pub details: Fragment,
}

/// Position of one image in a project's stacked collage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackPlacement {
    pub rotation: &'static str,
    pub top_px: usize,
    pub left: &'static str,
    pub z_index: i32,
}

/// Rotation alternates -4/4/-4deg, each image sits 80px lower, and the
/// `text-left` layout shifts the stack right.
pub fn stack_placement(index: usize, text_left: bool) -> StackPlacement {
    let rotation = if index == 1 { "4deg" } else { "-4deg" };
    let left = match (index, text_left) {
        (0, false) => "15%",
        (1, false) => "25%",
        (_, false) => "5%",
        (0, true) => "25%",
        (1, true) => "35%",
        (_, true) => "15%",
    };
    StackPlacement {
        rotation,
        top_px: index * 80,
        left,
        z_index: 3 - index as i32,
    }
}

pub fn render_works(buckets: &CategoryBuckets, edition: WorksEdition) -> WorksFragments {
    let mut fragments = WorksFragments::default();
    for (position, (key, bucket)) in buckets.iter().enumerate() {
        let visible = position == 0;
        let intro_html = bucket.metadata.text("titleHtml");
        if edition == WorksEdition::Bfa || !intro_html.is_empty() {
            fragments
                .intro
                .push(panel(key, visible).child(render_intro(&bucket.metadata, &intro_html)));
        }
        fragments.hero.push(
            panel(key, visible).child(
                Element::new("div").class("w-full md:mb-6xl md:mt-6xl").child(
                    Element::new("img")
                        .class("w-full aspect-video object-cover")
                        .attr("src", bucket.metadata.text("heroImage"))
                        .attr("alt", key),
                ),
            ),
        );
        fragments
            .details
            .push(render_details(key, bucket, visible, edition));
    }
    fragments
}

fn panel(key: &str, visible: bool) -> Element {
    let element = Element::new("div")
        .class("works-content")
        .attr("data-category", key);
    if visible {
        element
    } else {
        element.class("hidden")
    }
}

fn render_intro(metadata: &ContentRecord, title_html: &str) -> Element {
    Element::new("div")
        .class("grid-12 mb-6xl")
        .child(
            Element::new("div")
                .class("col-span-12 md:col-start-2 md:col-span-2 mb-lg md:mb-0")
                .child(
                    Element::new("h3")
                        .class("md:rotate--4 inline-block whitespace-nowrap")
                        .raw(title_html),
                ),
        )
        .child(
            Element::new("div")
                .class("col-span-12 md:col-start-6 md:col-span-6 pt-0 md:pt-xl")
                .child(
                    Element::new("div")
                        .class("md:rotate-3 inline-block")
                        .child(Element::new("p").class("mb-md").text(metadata.text("descriptionEn")))
                        .child(Element::new("p").text(metadata.text("descriptionZh"))),
                ),
        )
}

fn render_details(
    key: &str,
    bucket: &CategoryBucket,
    visible: bool,
    edition: WorksEdition,
) -> Element {
    let padding = match edition {
        WorksEdition::Bfa => "py-6xl",
        WorksEdition::Mdes => "pt-6xl",
    };
    let mut details = panel(key, visible).child(
        Element::new("div")
            .class("flex flex-col gap-6xl")
            .class(padding)
            .children(bucket.items.iter().map(render_project)),
    );
    if edition == WorksEdition::Bfa {
        if let Some(url) = bucket.metadata.opt_text("videoUrl") {
            details = details.child(
                Element::new("div").class("grid-12").child(
                    Element::new("div")
                        .class("col-span-12 md:col-start-2 md:col-span-10")
                        .child(
                            Element::new("div")
                                .class("w-full aspect-video bg-black")
                                .child(video_embed(&url)),
                        ),
                ),
            );
        }
    }
    details
}

fn render_project(project: &ContentRecord) -> Element {
    let layout = project.text("layout");
    let text_left = layout == "text-left";
    let stack = project
        .list("images")
        .into_iter()
        .enumerate()
        .map(|(index, src)| {
            let placement = stack_placement(index, text_left);
            Element::new("img")
                .class("absolute object-cover")
                .attr("src", src)
                .attr("alt", "Work")
                .style("aspect-ratio", "4/3")
                .style("width", "50%")
                .style("transform", format!("rotate({})", placement.rotation))
                .style("top", format!("{}px", placement.top_px))
                .style("left", placement.left)
                .style("z-index", placement.z_index.to_string())
        })
        .collect::<Vec<_>>();

    let mut copy = Element::new("div")
        .child(Element::new("h5").class("mb-sm md:mb-lg").text(project.text("title")));
    if let Some(text_en) = project.opt_text("textEn") {
        copy = copy.child(Element::new("p").class("mb-sm").text(text_en));
    }
    copy = copy.child(Element::new("p").text(project.text("textZh")));

    if layout == "image-left" {
        Element::new("div")
            .class("grid-12 works-project")
            .child(
                Element::new("div")
                    .class("col-span-12 md:col-span-6 relative flex justify-center items-center works-container md:mb-0")
                    .children(stack),
            )
            .child(
                Element::new("div")
                    .class("col-span-12 md:col-start-7 md:col-span-5 flex items-center")
                    .child(copy),
            )
    } else {
        Element::new("div")
            .class("grid-12 works-project")
            .child(
                Element::new("div")
                    .class("col-span-12 md:col-start-2 md:col-span-5 flex items-center order-2 md:order-none")
                    .child(copy),
            )
            .child(
                Element::new("div")
                    .class("col-span-12 md:col-start-7 md:col-span-6 relative flex justify-center items-center works-container order-1 md:order-none md:mb-0")
                    .children(stack),
            )
    }
}
