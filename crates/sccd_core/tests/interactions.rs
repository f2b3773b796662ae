use sccd_core::interact::accordion::{state_of, AccordionSpec, AccordionState};
use sccd_core::render::activities::ACTIVITY_CATEGORIES;
use sccd_core::{AnimationMode, Page, PageLocation, PageRegistry, PageServices, SiteConfig, StaticFetcher};
use serde_json::json;
use std::rc::Rc;

fn open(page: &str, fetcher: StaticFetcher) -> Page {
    let registry = PageRegistry::site_default();
    let config = SiteConfig {
        animations: AnimationMode::Instant,
        ..SiteConfig::default()
    };
    let location = PageLocation::for_page("pages", page, None).unwrap();
    let services = PageServices::new(Rc::new(fetcher), location, 1280, config);
    Page::open(&registry, registry.shell_for(page).unwrap(), services).unwrap()
}

fn faculty_fetcher() -> StaticFetcher {
    let faculty = json!([
        { "id": "f1", "type": "fulltime", "nameEn": "Ada" },
        { "id": "f2", "type": "fulltime", "nameEn": "Ben" },
        { "id": "p1", "type": "parttime", "nameEn": "Cy" },
        { "id": "a1", "type": "admin", "nameEn": "Di" }
    ]);
    StaticFetcher::new().with_json("data/faculty.json", &faculty)
}

#[test]
fn faculty_cards_land_in_their_group_lists() {
    let page = open("faculty.html", faculty_fetcher());
    let doc = page.document();
    for (kind, list, expected) in [
        ("fulltime", "faculty-fulltime-list", 2),
        ("parttime", "faculty-parttime-list", 1),
        ("admin", "faculty-admin-list", 1),
    ] {
        let list = doc.get_element_by_id(list).unwrap();
        let cards = doc.query_class(list, "faculty-card");
        assert_eq!(cards.len(), expected);
        assert!(cards.iter().all(|card| doc.attr(*card, "data-category") == Some(kind)));
    }
}

#[test]
fn faculty_filter_partitions_cards_for_every_value() {
    let mut page = open("faculty.html", faculty_fetcher());

    let initially_shown: Vec<_> = {
        let doc = page.document();
        doc.query_class_all("faculty-card")
            .into_iter()
            .filter(|card| doc.is_shown(*card))
            .map(|card| doc.attr(card, "data-category").unwrap().to_string())
            .collect()
    };
    assert_eq!(initially_shown, vec!["fulltime", "fulltime"]);

    for value in ["fulltime", "parttime", "admin"] {
        assert!(page.click(&format!("faculty-filter-btn-{value}")));
        let doc = page.document();
        for card in doc.query_class_all("faculty-card") {
            let matches = doc.attr(card, "data-category") == Some(value);
            assert_eq!(doc.is_shown(card), matches, "filter={value}");
        }
        let button = doc.get_element_by_id(&format!("faculty-filter-btn-{value}")).unwrap();
        assert!(doc.has_class(button, "active"));
    }
}

#[test]
fn summer_camp_keeps_one_session_open_per_year() {
    let camps = json!([
        { "year": 2024, "items": [
            { "title": "Clay", "descriptionEn": "Pots" },
            { "title": "Code", "descriptionEn": "Games" }
        ]}
    ]);
    let mut page = open("summer-camp.html", StaticFetcher::new().with_json("data/summer-camp.json", &camps));
    let spec = AccordionSpec::SUMMER_CAMP;
    let headers = page.document().query_class_all("summer-camp-header");
    assert_eq!(headers.len(), 2);

    page.document_mut().dispatch_click(headers[0]);
    assert_eq!(state_of(page.document(), &spec, headers[0]), Some(AccordionState::Expanded));

    page.document_mut().dispatch_click(headers[1]);
    assert_eq!(state_of(page.document(), &spec, headers[0]), Some(AccordionState::Collapsed));
    assert_eq!(state_of(page.document(), &spec, headers[1]), Some(AccordionState::Expanded));

    page.document_mut().dispatch_click(headers[1]);
    assert_eq!(state_of(page.document(), &spec, headers[1]), Some(AccordionState::Collapsed));
}

#[test]
fn course_rows_toggle_and_filter_by_kind() {
    let courses = json!({
        "bfa": [
            { "type": "required", "grade": "freshman", "titleEn": "Drawing" },
            { "type": "elective", "grade": "junior", "titleEn": "Sound" }
        ]
    });
    let mut page = open("bfa-courses.html", StaticFetcher::new().with_json("data/courses.json", &courses));
    let spec = AccordionSpec::COURSE;
    let headers = page.document().query_class_all("course-header");
    assert_eq!(headers.len(), 2);
    assert_eq!(state_of(page.document(), &spec, headers[0]), Some(AccordionState::Collapsed));

    page.document_mut().dispatch_click(headers[0]);
    assert_eq!(state_of(page.document(), &spec, headers[0]), Some(AccordionState::Expanded));
    page.document_mut().dispatch_click(headers[0]);
    assert_eq!(state_of(page.document(), &spec, headers[0]), Some(AccordionState::Collapsed));

    assert!(page.click("courses-filter-btn-elective"));
    let doc = page.document();
    for group in doc.query_class_all("courses-year-group") {
        assert_eq!(doc.is_shown(group), doc.attr(group, "data-year") == Some("elective"));
    }
}

#[test]
fn works_buttons_follow_the_data_categories() {
    let works = json!({
        "animation": { "heroImage": "a.jpg", "titleEn": "Animation", "items": [] },
        "games": { "heroImage": "g.jpg", "items": [] }
    });
    let mut page = open("bfa-works.html", StaticFetcher::new().with_json("data/bfa-works.json", &works));

    {
        let doc = page.document();
        let animation = doc.get_element_by_id("works-filter-btn-animation").unwrap();
        let games = doc.get_element_by_id("works-filter-btn-games").unwrap();
        assert!(doc.has_class(animation, "active"));
        assert!(!doc.has_class(games, "active"));
        assert_eq!(doc.text_content(animation), "Animation");
        assert_eq!(doc.text_content(games), "games");
    }

    assert!(page.click("works-filter-btn-games"));
    let doc = page.document();
    let panels = doc.query_class_all("works-content");
    assert!(!panels.is_empty());
    for panel in panels {
        let category = doc.attr(panel, "data-category");
        assert!(category == Some("animation") || category == Some("games"));
        assert_eq!(doc.is_shown(panel), category == Some("games"));
    }
    let animation = doc.get_element_by_id("works-filter-btn-animation").unwrap();
    let games = doc.get_element_by_id("works-filter-btn-games").unwrap();
    assert!(doc.has_class(games, "active") && !doc.has_class(animation, "active"));
}

#[test]
fn activities_filter_partitions_items_for_every_category() {
    let activities = json!([
        { "year": 2024, "items": [
            { "title": "Talk", "category": "seminars" },
            { "title": "Museum", "category": "visits" },
            { "title": "Panel", "category": "seminars" }
        ]},
        { "year": 2023, "items": [
            { "title": "Show", "category": "exhibitions" },
            { "title": "Summit", "category": "conferences" }
        ]},
        { "year": 2022, "items": [{ "title": "Jam", "category": "competitions" }] }
    ]);
    let mut all: Vec<String> = activities
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|group| group["items"].as_array().unwrap())
        .map(|item| item["category"].as_str().unwrap().to_string())
        .collect();
    all.sort();
    let mut page = open(
        "general-activities.html",
        StaticFetcher::new().with_json("data/general-activities.json", &activities),
    );

    for (value, _) in ACTIVITY_CATEGORIES {
        assert!(page.click(&format!("activities-filter-btn-{value}")), "filter={value}");
        let doc = page.document();

        let mut visible: Vec<String> = doc
            .query_class_all("workshop-item")
            .into_iter()
            .filter(|item| doc.is_rendered(*item))
            .map(|item| doc.attr(item, "data-category").unwrap().to_string())
            .collect();
        visible.sort();
        let expected: Vec<String> = all
            .iter()
            .filter(|category| value == "all" || category.as_str() == value)
            .cloned()
            .collect();
        assert_eq!(visible, expected, "filter={value}");

        let active: Vec<_> = doc
            .query_class_all("activities-filter-btn")
            .into_iter()
            .filter(|control| doc.has_class(*control, "active"))
            .map(|control| doc.attr(control, "data-filter").unwrap().to_string())
            .collect();
        assert_eq!(active, vec![value.to_string()]);

        for group in doc.query_class_all("workshop-year-group") {
            let shown: Vec<_> = doc
                .query_class(group, "workshop-item")
                .into_iter()
                .filter(|item| doc.is_shown(*item))
                .collect();
            for (index, item) in shown.iter().enumerate() {
                let header = doc.query_first_class(*item, "workshop-header").unwrap();
                let is_last = index + 1 == shown.len();
                assert_eq!(doc.has_class(*item, "border-b"), !is_last, "filter={value} index={index}");
                assert_eq!(doc.has_class(header, "pt-md"), index > 0, "filter={value} index={index}");
                assert!(doc.has_class(header, "pb-md"));
            }
        }
    }
}
