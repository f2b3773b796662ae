//! Degree show listing and detail page.

use crate::dom::{Element, Fragment};
use crate::model::{ContentRecord, DegreeShowIndex};
use crate::mount::FieldFill;
use crate::render::common::{accent_color, empty_state_fragment, video_embed};

pub const LIST_CONTAINER: &str = "degree-show-list";
pub const DETAIL_PAGE: &str = "degree-show-detail.html";
pub const NOT_FOUND_PAGE: &str = "404.html";
pub const GALLERY_CONTAINER: &str = "gallery-container";
pub const VIDEO_SECTION: &str = "video-section";
pub const VIDEO_WRAPPER: &str = "video-wrapper";

pub fn detail_href(year: &str) -> String {
    format!("{DETAIL_PAGE}?year={}", urlencoding::encode(year))
}

/// Newest show first; each card gets the next accent color.
pub fn render_degree_show_list(index: &DegreeShowIndex) -> Fragment {
    if index.is_empty() {
        return empty_state_fragment();
    }
    index
        .iter()
        .enumerate()
        .map(|(position, (year, show))| {
            Element::new("div")
                .class("grid-12 items-start")
                .child(
                    Element::new("div")
                        .class("col-span-12 md:col-start-1 md:col-span-1 mb-sm md:mb-0")
                        .child(Element::new("h5").text(year)),
                )
                .child(
                    Element::new("a")
                        .class("col-span-12 md:col-start-2 md:col-span-11 block degree-show-card")
                        .attr("href", detail_href(year))
                        .style("--card-color", accent_color(position))
                        .child(
                            Element::new("div")
                                .class("degree-show-img-wrapper overflow-hidden mb-md")
                                .child(
                                    Element::new("img")
                                        .class("degree-show-img w-full object-cover")
                                        .attr("src", show.text("coverImage"))
                                        .attr("alt", format!("Degree Show {year}"))
                                        .attr("loading", "lazy"),
                                ),
                        )
                        .child(Element::new("h5").class("mt-md").text(show.text("title"))),
                )
        })
        .collect()
}

/// Gallery row shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryRow {
    Halves,
    Full,
    Thirds,
}

impl GalleryRow {
    pub fn image_count(self) -> usize {
        match self {
            Self::Halves => 2,
            Self::Full => 1,
            Self::Thirds => 3,
        }
    }
}

/// Row pattern over `count` images. At image index `i`: `i%6==0` with two
/// left → halves, `i%6==3` with three left → thirds, otherwise one full row.
pub fn gallery_layout(count: usize) -> Vec<GalleryRow> {
    let mut rows = Vec::new();
    let mut index = 0;
    while index < count {
        let remaining = count - index;
        let row = match index % 6 {
            0 if remaining >= 2 => GalleryRow::Halves,
            3 if remaining >= 3 => GalleryRow::Thirds,
            _ => GalleryRow::Full,
        };
        index += row.image_count();
        rows.push(row);
    }
    rows
}

pub fn render_gallery(images: &[String]) -> Fragment {
    let mut fragment = Fragment::new();
    let mut index = 0;
    for row in gallery_layout(images.len()) {
        let cells = &images[index..index + row.image_count()];
        index += row.image_count();
        let (cell_class, img_class) = match row {
            GalleryRow::Halves => ("col-span-12 md:col-span-6", "w-full object-cover"),
            GalleryRow::Full => ("col-span-12", "w-full object-cover"),
            GalleryRow::Thirds => ("col-span-12 md:col-span-4", "w-full object-cover aspect-[4/3]"),
        };
        fragment.push(Element::new("div").class("grid-12").children(cells.iter().map(|src| {
            Element::new("div").class(cell_class).child(
                Element::new("img")
                    .class(img_class)
                    .attr("src", src.as_str())
                    .attr("alt", ""),
            )
        })));
    }
    fragment
}

/// Detail view of one year's show.
#[derive(Debug, Clone)]
pub struct DegreeShowDetail {
    pub year: String,
    pub show: ContentRecord,
    pub next_year: String,
    pub next: ContentRecord,
}

impl DegreeShowDetail {
    /// Looks up `year`; `None` means the caller should go to the 404 page.
    pub fn lookup(index: &DegreeShowIndex, year: &str) -> Option<Self> {
        let show = index.get(year)?.clone();
        let (next_year, next) = index.next_after(year)?;
        Some(Self {
            year: year.to_string(),
            show,
            next_year: next_year.to_string(),
            next: next.clone(),
        })
    }

    pub fn title(&self) -> String {
        format!("Degree Show {} - SCCD", self.year)
    }

    pub fn fields(&self) -> Vec<FieldFill> {
        let mut fills = vec![
            FieldFill::text("text-title", self.show.text("title")),
            FieldFill::text("text-year", self.year.as_str()),
            FieldFill::text("text-desc-en", self.show.text("descEn")),
            FieldFill::text("text-desc-cn", self.show.text("descCn")),
            FieldFill::attr("next-link", "href", detail_href(&self.next_year)),
            FieldFill::text("next-year", self.next_year.as_str()),
            FieldFill::text("next-title", self.next.text("title")),
            FieldFill::text("next-year-mobile", self.next_year.as_str()),
            FieldFill::text("next-title-mobile", self.next.text("title")),
        ];
        if let Some(cover) = self.show.opt_text("coverImage") {
            fills.push(FieldFill::attr("hero-img", "src", cover));
        }
        if let Some(cover) = self.next.opt_text("coverImage") {
            fills.push(FieldFill::attr("next-img", "src", cover));
        }
        fills
    }

    pub fn gallery(&self) -> Fragment {
        render_gallery(&self.show.list("images"))
    }

    /// Player markup, or `None` when the show has no video.
    pub fn video(&self) -> Option<Fragment> {
        self.show
            .opt_text("videoUrl")
            .map(|url| Fragment::new().with(video_embed(&url)))
    }
}
