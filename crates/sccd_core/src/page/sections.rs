//! Section initializers of the site and the page table built from them.
//!
//! Every initializer runs the same four steps: load its data file, render
//! a fragment, mount it into its container and bind the interactions. A
//! failed load leaves the container untouched and is returned as a
//! `SectionError`; the runtime logs it and moves on to the next section.

use crate::dom::{Document, Element, Fragment};
use crate::interact::accordion::{bind_accordion, AccordionSpec};
use crate::interact::filter::{bind_activities_filter, bind_filter, FilterSpec, ACTIVE_CLASS, ACTIVITIES_CONTROL};
use crate::interact::horizontal::{bind_horizontal_accordion, CONTENT, OVERLAY, PANEL};
use crate::interact::overlay::{
    bind_faculty_slide_in, bind_pdf_viewer, PDF_CLOSE, PDF_FRAME, PDF_MODAL, SLIDE_BACK, SLIDE_CLOSE,
    SLIDE_IN, SLIDE_OVERLAY, SLIDE_PANEL, SLIDE_SECTIONS,
};
use crate::interact::pagination::bind_load_more;
use crate::interact::section_switch::{
    bind_section_switch, initial_section, panel_id, SectionLoader, PANEL as SECTION_PANEL, SECTION_BUTTON,
};
use crate::interact::set_display;
use crate::interact::timeline::bind_timeline;
use crate::model::{
    flatten_timeline, CategoryBuckets, ContentList, ContentRecord, DegreeShowIndex, RecordIndex,
    TimelineEra, YearGroup,
};
use crate::mount::{mount, mount_fields};
use crate::page::context::{PageContext, PageServices};
use crate::page::registry::{SectionError, SectionInitializer};
use crate::render::activities::{
    render_general_activities, render_summer_camp, render_workshops, WorkshopKind, ACTIVITY_CATEGORIES,
    GENERAL_CONTAINER, SUMMER_CAMP_CONTAINER,
};
use crate::render::admission::{AdmissionDetail, DETAIL_CONTAINER, LIST_CONTAINER, LIST_PAGE, LOAD_MORE_BUTTON, LOAD_MORE_CONTAINER};
use crate::render::courses::{kind_container_id, render_course_group, Program, COURSE_KINDS};
use crate::render::degree_show::{
    render_degree_show_list, DegreeShowDetail, GALLERY_CONTAINER, LIST_CONTAINER as DEGREE_SHOW_LIST,
    NOT_FOUND_PAGE, VIDEO_SECTION, VIDEO_WRAPPER,
};
use crate::render::faculty::{members_of, render_faculty_cards, FACULTY_GROUPS};
use crate::render::legal::{legal_fields, LEGAL_PAGES};
use crate::render::library::{render_library, CONTAINER as LIBRARY_CONTAINER};
use crate::render::records::{render_records, CONTAINER as RECORDS_CONTAINER};
use crate::render::resources::{render_resources, CONTAINER as RESOURCES_CONTAINER, WRAPPER as RESOURCES_WRAPPER};
use crate::render::support::{render_donation_methods, CONTAINER as SUPPORT_CONTAINER};
use crate::render::timeline::{ERA_LABEL, IMAGE_FRAME, TEXT, YEARS_CONTAINER, YEAR_MOBILE};
use crate::render::works::{render_works, WorksEdition, DETAILS_CONTAINER, HERO_CONTAINER, INTRO_CONTAINER};
use log::{debug, warn};
use serde::Deserialize;
use std::rc::Rc;
use std::sync::Arc;

/// Sections of the activities page, in button order.
pub const ACTIVITY_SECTIONS: [(&str, &str); 5] = [
    ("general", "General 一般活動"),
    ("workshop", "Workshop 工作坊"),
    ("students-present", "Students Present 學生發表"),
    ("degree-show", "Degree Show 畢業展"),
    ("summer-camp", "Summer Camp 夏令營"),
];

/// BFA divisions toggled on the about page.
pub const BFA_DIVISIONS: [(&str, &str); 2] = [
    ("animation", "Animation 動畫"),
    ("creative-media", "Creative Media 創意媒體"),
];

/// Every page of the site and the sections it runs, in order.
pub fn site_pages() -> Vec<(&'static str, Vec<Arc<dyn SectionInitializer>>)> {
    let mut pages: Vec<(&'static str, Vec<Arc<dyn SectionInitializer>>)> = vec![
        (
            "about.html",
            vec![
                section(TimelineSection),
                section(HorizontalAccordionSection),
                section(ResourcesSection),
                section(BfaDivisionSection),
            ],
        ),
        ("activities.html", vec![section(ActivitiesSwitchSection)]),
        ("admission.html", vec![section(AdmissionListSection)]),
        ("admission-detail.html", vec![section(AdmissionDetailSection)]),
        ("bfa-courses.html", vec![section(CoursesSection(Program::Bfa))]),
        ("mdes-courses.html", vec![section(CoursesSection(Program::Mdes))]),
        ("bfa-works.html", vec![section(WorksSection(WorksEdition::Bfa))]),
        ("mdes-works.html", vec![section(WorksSection(WorksEdition::Mdes))]),
        ("degree-show.html", vec![section(DegreeShowListSection)]),
        ("degree-show-detail.html", vec![section(DegreeShowDetailSection)]),
        ("faculty.html", vec![section(FacultySection)]),
        ("general-activities.html", vec![section(GeneralActivitiesSection)]),
        ("library.html", vec![section(LibrarySection)]),
        ("records.html", vec![section(RecordsSection)]),
        ("students-present.html", vec![section(WorkshopsSection(WorkshopKind::StudentsPresent))]),
        ("summer-camp.html", vec![section(SummerCampSection)]),
        ("support.html", vec![section(SupportSection)]),
        ("workshop.html", vec![section(WorkshopsSection(WorkshopKind::Workshop))]),
    ];
    for (page, data) in LEGAL_PAGES {
        pages.push((page, vec![section(LegalSection { data })]));
    }
    pages
}

fn section<S: SectionInitializer + 'static>(initializer: S) -> Arc<dyn SectionInitializer> {
    Arc::new(initializer)
}

fn container(id: &str) -> Element {
    Element::new("div").id(id)
}

/// Filter control `#<class>-<value>`.
fn filter_button(class: &str, attr: &str, value: &str, label: &str) -> Element {
    Element::new("button")
        .id(format!("{class}-{value}"))
        .class(class)
        .attr(attr, value)
        .text(label)
}

fn filter_buttons(class: &str, attr: &str, options: &[(&str, &str)]) -> Element {
    Element::new("nav")
        .class("flex gap-md")
        .children(options.iter().map(|(value, label)| filter_button(class, attr, value, label)))
}

fn log_panel_failure(section: &str, err: &SectionError) {
    warn!(
        "event=section_failed module=page status=error section={} reason={}",
        section, err
    );
}

// -------------------------------------------------------------------
//  Admission
// -------------------------------------------------------------------

pub struct AdmissionListSection;

impl SectionInitializer for AdmissionListSection {
    fn id(&self) -> &str {
        "admission-list"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new().with(container(LIST_CONTAINER)).with(
            Element::new("div")
                .id(LOAD_MORE_CONTAINER)
                .class("flex justify-center")
                .child(Element::new("button").id(LOAD_MORE_BUTTON).text("Load More 載入更多")),
        )
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let items = ctx.load::<ContentList<ContentRecord>>("admission")?.into_vec();
        let page_size = ctx.config().admission_page_size;
        let shown = bind_load_more(ctx.doc(), Rc::new(items), page_size);
        debug!("event=admission_list module=page shown={}", shown);
        Ok(())
    }
}

pub struct AdmissionDetailSection;

impl SectionInitializer for AdmissionDetailSection {
    fn id(&self) -> &str {
        "admission-detail"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new().with(
            Element::new("article")
                .id(DETAIL_CONTAINER)
                .child(Element::new("h5").id("admission-date"))
                .child(Element::new("h2").id("admission-title"))
                .child(container("admission-body"))
                .child(
                    Element::new("nav")
                        .class("flex justify-between")
                        .child(Element::new("a").id("prev-btn").text("Previous 上一則"))
                        .child(container("prev-placeholder"))
                        .child(Element::new("a").id("next-btn").text("Next 下一則"))
                        .child(container("next-placeholder")),
                ),
        )
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let items = ctx.load::<ContentList<ContentRecord>>("admission")?.into_vec();
        let index = RecordIndex::build(items);
        let detail = ctx
            .query("id")
            .and_then(|id| AdmissionDetail::lookup(&index, id.trim()));
        let Some(detail) = detail else {
            ctx.redirect_to(LIST_PAGE);
            return Ok(());
        };
        let doc = ctx.doc();
        mount_fields(doc, &detail.fields());
        neighbour_link(doc, "prev", detail.previous.href.as_deref());
        neighbour_link(doc, "next", detail.next.href.as_deref());
        Ok(())
    }
}

/// Shows `#<side>-btn` pointing at `href`, or its placeholder when there
/// is no neighbour on that side.
fn neighbour_link(doc: &mut Document, side: &str, href: Option<&str>) {
    let button = doc.get_element_by_id(&format!("{side}-btn"));
    let placeholder = doc.get_element_by_id(&format!("{side}-placeholder"));
    if let Some(button) = button {
        if let Some(href) = href {
            doc.set_attr(button, "href", href);
        }
        set_display(doc, button, href.is_some(), "flex");
    }
    if let Some(placeholder) = placeholder {
        set_display(doc, placeholder, href.is_none(), "block");
    }
}

// -------------------------------------------------------------------
//  Faculty
// -------------------------------------------------------------------

pub struct FacultySection;

impl SectionInitializer for FacultySection {
    fn id(&self) -> &str {
        "faculty"
    }

    fn shell_containers(&self) -> Fragment {
        let mut fragment = Fragment::new().with(filter_buttons(
            FilterSpec::FACULTY.control_class,
            FilterSpec::FACULTY.control_attr,
            &[
                ("fulltime", "Full-time 專任"),
                ("parttime", "Part-time 兼任"),
                ("admin", "Administration 行政"),
            ],
        ));
        for (_, list) in FACULTY_GROUPS {
            fragment.push(container(list).class("grid grid-cols-2 md:grid-cols-4 gap-gutter"));
        }
        fragment.with(
            Element::new("div")
                .id(SLIDE_IN)
                .class("fixed inset-0 z-50 invisible pointer-events-none")
                .child(container(SLIDE_OVERLAY).class("absolute inset-0 bg-black").style("opacity", "0"))
                .child(
                    Element::new("aside")
                        .id(SLIDE_PANEL)
                        .class("absolute right-0 top-0 h-full bg-white overflow-y-auto")
                        .style("transform", "translateX(100%)")
                        .child(Element::new("button").id(SLIDE_CLOSE).text("Close"))
                        .child(Element::new("img").id("faculty-detail-image").attr("alt", ""))
                        .child(Element::new("h4").id("faculty-detail-name-en"))
                        .child(Element::new("h4").id("faculty-detail-name-zh"))
                        .child(Element::new("p").id("faculty-detail-title-en"))
                        .child(Element::new("p").id("faculty-detail-title-zh"))
                        .child(container(SLIDE_SECTIONS).class("flex flex-col gap-lg")),
                )
                .child(
                    Element::new("button")
                        .id(SLIDE_BACK)
                        .style("transform", "translateX(100%)")
                        .text("Back"),
                ),
        )
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let records = ctx.load::<ContentList<ContentRecord>>("faculty")?.into_vec();
        let animator = ctx.animator();
        let doc = ctx.doc();
        for (kind, list) in FACULTY_GROUPS {
            mount(doc, list, render_faculty_cards(&members_of(&records, kind)));
        }
        bind_filter(doc, FilterSpec::FACULTY);
        bind_faculty_slide_in(doc, animator, Rc::new(RecordIndex::build(records)));
        Ok(())
    }
}

// -------------------------------------------------------------------
//  Courses
// -------------------------------------------------------------------

/// `courses.json`: one course list per programme.
#[derive(Debug, Default, Deserialize)]
struct CourseCatalog {
    #[serde(default)]
    bfa: Option<ContentList<ContentRecord>>,
    #[serde(default)]
    mdes: Option<ContentList<ContentRecord>>,
}

impl CourseCatalog {
    fn program(self, program: Program) -> Option<Vec<ContentRecord>> {
        let list = match program {
            Program::Bfa => self.bfa,
            Program::Mdes => self.mdes,
        };
        list.map(ContentList::into_vec)
    }
}

pub struct CoursesSection(pub Program);

impl SectionInitializer for CoursesSection {
    fn id(&self) -> &str {
        "courses"
    }

    fn shell_containers(&self) -> Fragment {
        let mut fragment = Fragment::new().with(filter_buttons(
            FilterSpec::COURSES.control_class,
            FilterSpec::COURSES.control_attr,
            &[("required", "Required 必修"), ("elective", "Elective 選修")],
        ));
        for kind in COURSE_KINDS {
            fragment.push(
                Element::new("div")
                    .class(FilterSpec::COURSES.target_class)
                    .attr(FilterSpec::COURSES.target_attr, kind)
                    .child(container(&kind_container_id(kind)).class("flex-col")),
            );
        }
        fragment
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let catalog: CourseCatalog = ctx.load("courses")?;
        let animator = ctx.animator();
        let doc = ctx.doc();
        match catalog.program(self.0) {
            Some(courses) => {
                for kind in COURSE_KINDS {
                    mount(doc, &kind_container_id(kind), render_course_group(&courses, kind, self.0));
                }
            }
            None => debug!(
                "event=courses_missing module=page status=noop program={}",
                self.0.key()
            ),
        }
        bind_filter(doc, FilterSpec::COURSES);
        bind_accordion(doc, AccordionSpec::COURSE, animator);
        Ok(())
    }
}

// -------------------------------------------------------------------
//  Works
// -------------------------------------------------------------------

const WORKS_FILTER: &str = "works-filter";

pub struct WorksSection(pub WorksEdition);

impl SectionInitializer for WorksSection {
    fn id(&self) -> &str {
        "works"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new()
            .with(Element::new("nav").id(WORKS_FILTER).class("flex gap-md"))
            .with(container(INTRO_CONTAINER))
            .with(container(HERO_CONTAINER))
            .with(container(DETAILS_CONTAINER))
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let buckets: CategoryBuckets = ctx.load(self.0.data_name())?;
        let fragments = render_works(&buckets, self.0);
        let spec = FilterSpec::WORKS;
        let default_key = buckets.default_key();
        let buttons: Fragment = buckets
            .iter()
            .map(|(key, bucket)| {
                let button = filter_button(spec.control_class, spec.control_attr, key, &bucket.label(key));
                if Some(key) == default_key {
                    button.class(ACTIVE_CLASS)
                } else {
                    button
                }
            })
            .collect();
        let doc = ctx.doc();
        mount(doc, WORKS_FILTER, buttons);
        mount(doc, INTRO_CONTAINER, fragments.intro);
        mount(doc, HERO_CONTAINER, fragments.hero);
        mount(doc, DETAILS_CONTAINER, fragments.details);
        bind_filter(doc, FilterSpec::WORKS);
        Ok(())
    }
}

// -------------------------------------------------------------------
//  Records and activities
// -------------------------------------------------------------------

pub struct RecordsSection;

impl SectionInitializer for RecordsSection {
    fn id(&self) -> &str {
        "records"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new().with(container(RECORDS_CONTAINER).class("grid-12"))
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let groups = ctx.load::<ContentList<YearGroup>>("records")?.into_vec();
        let animator = ctx.animator();
        let doc = ctx.doc();
        mount(doc, RECORDS_CONTAINER, render_records(&groups));
        bind_accordion(doc, AccordionSpec::ACTIVITIES_YEAR, animator);
        Ok(())
    }
}

fn general_shell() -> Fragment {
    Fragment::new()
        .with(filter_buttons(ACTIVITIES_CONTROL, "data-filter", &ACTIVITY_CATEGORIES))
        .with(container(GENERAL_CONTAINER))
}

fn load_general_activities(doc: &mut Document, services: &PageServices) -> Result<(), SectionError> {
    let groups = services.load::<ContentList<YearGroup>>("general-activities")?.into_vec();
    mount(doc, GENERAL_CONTAINER, render_general_activities(&groups));
    bind_activities_filter(doc);
    bind_accordion(doc, AccordionSpec::WORKSHOP_YEAR, Rc::clone(&services.animator));
    bind_accordion(doc, AccordionSpec::WORKSHOP_HEADER, Rc::clone(&services.animator));
    Ok(())
}

fn load_workshops(doc: &mut Document, services: &PageServices, kind: WorkshopKind) -> Result<(), SectionError> {
    let groups = services.load::<ContentList<YearGroup>>(kind.data_name())?.into_vec();
    mount(doc, kind.container(), render_workshops(&groups, kind));
    bind_accordion(doc, AccordionSpec::WORKSHOP_YEAR, Rc::clone(&services.animator));
    bind_accordion(doc, AccordionSpec::WORKSHOP_HEADER, Rc::clone(&services.animator));
    Ok(())
}

fn load_summer_camp(doc: &mut Document, services: &PageServices) -> Result<(), SectionError> {
    let groups = services.load::<ContentList<YearGroup>>("summer-camp")?.into_vec();
    mount(doc, SUMMER_CAMP_CONTAINER, render_summer_camp(&groups));
    bind_accordion(doc, AccordionSpec::SUMMER_CAMP, Rc::clone(&services.animator));
    Ok(())
}

fn load_degree_show_list(doc: &mut Document, services: &PageServices) -> Result<(), SectionError> {
    let index: DegreeShowIndex = services.load("degree-show")?;
    mount(doc, DEGREE_SHOW_LIST, render_degree_show_list(&index));
    Ok(())
}

pub struct GeneralActivitiesSection;

impl SectionInitializer for GeneralActivitiesSection {
    fn id(&self) -> &str {
        "general-activities"
    }

    fn shell_containers(&self) -> Fragment {
        general_shell()
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let (doc, services) = ctx.split();
        load_general_activities(doc, services)
    }
}

pub struct WorkshopsSection(pub WorkshopKind);

impl SectionInitializer for WorkshopsSection {
    fn id(&self) -> &str {
        self.0.data_name()
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new().with(container(self.0.container()))
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let (doc, services) = ctx.split();
        load_workshops(doc, services, self.0)
    }
}

pub struct SummerCampSection;

impl SectionInitializer for SummerCampSection {
    fn id(&self) -> &str {
        "summer-camp"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new().with(container(SUMMER_CAMP_CONTAINER))
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let (doc, services) = ctx.split();
        load_summer_camp(doc, services)
    }
}

pub struct DegreeShowListSection;

impl SectionInitializer for DegreeShowListSection {
    fn id(&self) -> &str {
        "degree-show-list"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new().with(container(DEGREE_SHOW_LIST).class("grid grid-cols-1 md:grid-cols-3 gap-gutter"))
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let (doc, services) = ctx.split();
        load_degree_show_list(doc, services)
    }
}

/// Activities page: one panel per section, each loaded on first show.
pub struct ActivitiesSwitchSection;

impl SectionInitializer for ActivitiesSwitchSection {
    fn id(&self) -> &str {
        "activities-sections"
    }

    fn shell_containers(&self) -> Fragment {
        let mut fragment = Fragment::new().with(
            Element::new("nav")
                .class("flex flex-col gap-sm")
                .children(ACTIVITY_SECTIONS.iter().map(|(section, label)| {
                    Element::new("button")
                        .id(format!("section-btn-{section}"))
                        .class(SECTION_BUTTON)
                        .attr("data-section", *section)
                        .text(*label)
                })),
        );
        for (section, _) in ACTIVITY_SECTIONS {
            let body = match section {
                "general" => general_shell(),
                "workshop" => WorkshopsSection(WorkshopKind::Workshop).shell_containers(),
                "students-present" => WorkshopsSection(WorkshopKind::StudentsPresent).shell_containers(),
                "degree-show" => DegreeShowListSection.shell_containers(),
                _ => SummerCampSection.shell_containers(),
            };
            fragment.push(
                Element::new("section")
                    .id(panel_id(section))
                    .class(&format!("{SECTION_PANEL} hidden"))
                    .fragment(body),
            );
        }
        fragment
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let initial = initial_section(ctx.query("section").as_deref());
        let services = ctx.services().clone();
        let loader: SectionLoader = Rc::new(move |doc: &mut Document, section: &str| {
            let result = match section {
                "general" => load_general_activities(doc, &services),
                "workshop" => load_workshops(doc, &services, WorkshopKind::Workshop),
                "students-present" => load_workshops(doc, &services, WorkshopKind::StudentsPresent),
                "degree-show" => load_degree_show_list(doc, &services),
                "summer-camp" => load_summer_camp(doc, &services),
                other => {
                    debug!("event=section_unknown module=page status=noop section={}", other);
                    Ok(())
                }
            };
            if let Err(err) = result {
                log_panel_failure(section, &err);
            }
        });
        bind_section_switch(ctx.doc(), &initial, loader);
        Ok(())
    }
}

// -------------------------------------------------------------------
//  Degree show detail
// -------------------------------------------------------------------

pub struct DegreeShowDetailSection;

impl SectionInitializer for DegreeShowDetailSection {
    fn id(&self) -> &str {
        "degree-show-detail"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new()
            .with(Element::new("img").id("hero-img").attr("alt", ""))
            .with(Element::new("h1").id("text-title"))
            .with(Element::new("h5").id("text-year"))
            .with(Element::new("p").id("text-desc-en"))
            .with(Element::new("p").id("text-desc-cn"))
            .with(container(GALLERY_CONTAINER).class("flex flex-col gap-gutter"))
            .with(Element::new("section").id(VIDEO_SECTION).child(container(VIDEO_WRAPPER).class("aspect-video")))
            .with(
                Element::new("a")
                    .id("next-link")
                    .child(Element::new("img").id("next-img").attr("alt", ""))
                    .child(Element::new("h5").id("next-year"))
                    .child(Element::new("h5").id("next-title"))
                    .child(Element::new("h5").id("next-year-mobile"))
                    .child(Element::new("h5").id("next-title-mobile")),
            )
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let index: DegreeShowIndex = ctx.load("degree-show")?;
        let detail = ctx
            .query("year")
            .and_then(|year| DegreeShowDetail::lookup(&index, year.trim()));
        let Some(detail) = detail else {
            ctx.redirect_to(NOT_FOUND_PAGE);
            return Ok(());
        };
        let doc = ctx.doc();
        doc.set_title(detail.title());
        mount_fields(doc, &detail.fields());
        mount(doc, GALLERY_CONTAINER, detail.gallery());
        match detail.video() {
            Some(player) => {
                mount(doc, VIDEO_WRAPPER, player);
                if let Some(section) = doc.get_element_by_id(VIDEO_SECTION) {
                    set_display(doc, section, true, "block");
                }
            }
            None => {
                if let Some(section) = doc.get_element_by_id(VIDEO_SECTION) {
                    set_display(doc, section, false, "block");
                }
            }
        }
        Ok(())
    }
}

// -------------------------------------------------------------------
//  Library, support, legal
// -------------------------------------------------------------------

pub struct LibrarySection;

impl SectionInitializer for LibrarySection {
    fn id(&self) -> &str {
        "library"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new()
            .with(container(LIBRARY_CONTAINER).class("grid grid-cols-2 md:grid-cols-4 gap-gutter"))
            .with(
                Element::new("div")
                    .id(PDF_MODAL)
                    .class("fixed inset-0 z-50 bg-black/80 hidden opacity-0")
                    .child(Element::new("button").id(PDF_CLOSE).text("Close"))
                    .child(Element::new("iframe").id(PDF_FRAME).class("w-full h-full").attr("src", "")),
            )
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let items = ctx.load::<ContentList<ContentRecord>>("library")?.into_vec();
        let animator = ctx.animator();
        let doc = ctx.doc();
        mount(doc, LIBRARY_CONTAINER, render_library(&items));
        bind_pdf_viewer(doc, animator);
        Ok(())
    }
}

pub struct SupportSection;

impl SectionInitializer for SupportSection {
    fn id(&self) -> &str {
        "support"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new().with(container(SUPPORT_CONTAINER))
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let methods = ctx.load::<ContentList<ContentRecord>>("support")?.into_vec();
        let animator = ctx.animator();
        let doc = ctx.doc();
        mount(doc, SUPPORT_CONTAINER, render_donation_methods(&methods));
        bind_accordion(doc, AccordionSpec::COURSE, animator);
        Ok(())
    }
}

pub struct LegalSection {
    pub data: &'static str,
}

impl SectionInitializer for LegalSection {
    fn id(&self) -> &str {
        "legal"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new()
            .with(Element::new("h1").id("legal-title-en"))
            .with(Element::new("h1").id("legal-title-zh"))
            .with(Element::new("p").id("legal-updated-en"))
            .with(Element::new("p").id("legal-updated-zh"))
            .with(container("legal-content"))
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let document: ContentRecord = ctx.load(self.data)?;
        mount_fields(ctx.doc(), &legal_fields(&document));
        Ok(())
    }
}

// -------------------------------------------------------------------
//  About
// -------------------------------------------------------------------

pub struct TimelineSection;

impl SectionInitializer for TimelineSection {
    fn id(&self) -> &str {
        "timeline"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new()
            .with(Element::new("h3").id(ERA_LABEL))
            .with(Element::new("span").id(YEAR_MOBILE).class("md:hidden"))
            .with(container(YEARS_CONTAINER).class("flex gap-2xl"))
            .with(container(IMAGE_FRAME).child(Element::new("img").attr("src", "").attr("alt", "")))
            .with(container(TEXT))
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let eras = ctx.load::<ContentList<TimelineEra>>("timeline")?.into_vec();
        let entries = Rc::new(flatten_timeline(&eras));
        let animator = ctx.animator();
        bind_timeline(ctx.doc(), entries, animator);
        Ok(())
    }
}

pub struct HorizontalAccordionSection;

/// Wrapper of the static about-page image accordion.
pub const ABOUT_ACCORDION: &str = "about-accordion";

/// Images of the about-page accordion panels.
const ACCORDION_PANELS: [(&str, &str); 3] = [
    ("Design 設計", "../images/about/accordion-1.jpg"),
    ("Media 媒體", "../images/about/accordion-2.jpg"),
    ("Culture 文化", "../images/about/accordion-3.jpg"),
];

impl SectionInitializer for HorizontalAccordionSection {
    fn id(&self) -> &str {
        "horizontal-accordion"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new().with(Element::new("div").id(ABOUT_ACCORDION).class("flex flex-col md:flex-row gap-sm").children(
            ACCORDION_PANELS.iter().map(|(title, image)| {
                Element::new("div")
                    .class(&format!("{PANEL} relative overflow-hidden cursor-pointer"))
                    .child(Element::new("img").class("w-full h-full object-cover").attr("src", *image).attr("alt", ""))
                    .child(Element::new("div").class(&format!("{OVERLAY} absolute inset-0")))
                    .child(
                        Element::new("div")
                            .class(&format!("{CONTENT} absolute bottom-0 left-0"))
                            .child(Element::new("h4").text(*title)),
                    )
            }),
        ))
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        bind_accordion_in(ctx, ABOUT_ACCORDION);
        Ok(())
    }
}

/// Binds the horizontal accordion under `#wrapper_id` and hands its resize
/// hook to the page. A missing wrapper binds nothing.
fn bind_accordion_in(ctx: &mut PageContext<'_>, wrapper_id: &str) {
    let animator = ctx.animator();
    let viewport = ctx.viewport();
    let doc = ctx.doc();
    let Some(scope) = doc.get_element_by_id(wrapper_id) else {
        return;
    };
    if let Some(resize) = bind_horizontal_accordion(doc, scope, animator, viewport) {
        ctx.on_resize(resize);
    }
}

/// Resource cards of the about page, fetched and cycled as a second
/// horizontal accordion.
pub struct ResourcesSection;

impl SectionInitializer for ResourcesSection {
    fn id(&self) -> &str {
        "resources"
    }

    fn shell_containers(&self) -> Fragment {
        Fragment::new().with(container(RESOURCES_CONTAINER))
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        let items = ctx.load::<ContentList<ContentRecord>>("resources")?.into_vec();
        mount(ctx.doc(), RESOURCES_CONTAINER, render_resources(&items));
        bind_accordion_in(ctx, RESOURCES_WRAPPER);
        Ok(())
    }
}

pub struct BfaDivisionSection;

impl SectionInitializer for BfaDivisionSection {
    fn id(&self) -> &str {
        "bfa-division"
    }

    fn shell_containers(&self) -> Fragment {
        let spec = FilterSpec::BFA_DIVISION;
        let mut fragment = Fragment::new().with(filter_buttons(spec.control_class, spec.control_attr, &BFA_DIVISIONS));
        for (position, (division, label)) in BFA_DIVISIONS.iter().enumerate() {
            let mut content = Element::new("div")
                .class(spec.target_class)
                .attr(spec.target_attr, *division)
                .child(Element::new("p").text(*label));
            if position > 0 {
                content = content.style("display", "none");
            }
            fragment.push(content);
        }
        fragment
    }

    fn init(&self, ctx: &mut PageContext<'_>) -> Result<(), SectionError> {
        bind_filter(ctx.doc(), FilterSpec::BFA_DIVISION);
        Ok(())
    }
}
