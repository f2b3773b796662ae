use sccd_core::{AnimationMode, Page, PageLocation, PageRegistry, PageServices, SiteConfig, StaticFetcher};
use serde_json::{json, Value};
use std::rc::Rc;

fn open(page: &str, query: Option<&str>, fetcher: StaticFetcher) -> Page {
    let registry = PageRegistry::site_default();
    let config = SiteConfig {
        animations: AnimationMode::Instant,
        ..SiteConfig::default()
    };
    let location = PageLocation::for_page("pages", page, query).unwrap();
    let services = PageServices::new(Rc::new(fetcher), location, 1280, config);
    let shell = registry.shell_for(page).unwrap();
    Page::open(&registry, shell, services).unwrap()
}

fn posts(count: usize) -> Value {
    Value::Array(
        (1..=count)
            .map(|n| {
                json!({
                    "id": n.to_string(),
                    "date": "2024-03-01",
                    "title": format!("Post {n}"),
                    "content": "<p>Body</p>"
                })
            })
            .collect(),
    )
}

#[test]
fn load_more_reaches_every_post_for_any_count() {
    for total in 0..=25 {
        let fetcher = StaticFetcher::new().with_json("data/admission.json", &posts(total));
        let mut page = open("admission.html", None, fetcher);
        let mut clicks = 0;
        loop {
            let doc = page.document();
            let shown = doc.query_class_all("admission-item").len();
            assert_eq!(shown, (10 * (clicks + 1)).min(total), "total={total} clicks={clicks}");
            let row = doc.get_element_by_id("load-more-container").unwrap();
            if shown == total {
                assert_eq!(doc.style(row, "display"), Some("none"));
                break;
            }
            assert_eq!(doc.style(row, "display"), Some("flex"));
            assert!(page.click("load-more-btn"));
            clicks += 1;
        }
    }
}

#[test]
fn page_size_comes_from_config() {
    let registry = PageRegistry::site_default();
    let config = SiteConfig {
        animations: AnimationMode::Instant,
        admission_page_size: 4,
        ..SiteConfig::default()
    };
    let location = PageLocation::for_page("pages", "admission.html", None).unwrap();
    let fetcher = StaticFetcher::new().with_json("data/admission.json", &posts(9));
    let services = PageServices::new(Rc::new(fetcher), location, 1280, config);
    let mut page = Page::open(&registry, registry.shell_for("admission.html").unwrap(), services).unwrap();

    assert_eq!(page.document().query_class_all("admission-item").len(), 4);
    page.click("load-more-btn");
    page.click("load-more-btn");
    assert_eq!(page.document().query_class_all("admission-item").len(), 9);
}

#[test]
fn detail_fills_fields_and_links_neighbours() {
    let fetcher = StaticFetcher::new().with_json("data/admission.json", &posts(3));
    let page = open("admission-detail.html", Some("id=1"), fetcher);
    assert_eq!(page.redirect(), None);

    let doc = page.document();
    let title = doc.get_element_by_id("admission-title").unwrap();
    assert_eq!(doc.text_content(title), "Post 1");
    let prev = doc.get_element_by_id("prev-btn").unwrap();
    let prev_placeholder = doc.get_element_by_id("prev-placeholder").unwrap();
    let next = doc.get_element_by_id("next-btn").unwrap();
    assert_eq!(doc.style(prev, "display"), Some("none"));
    assert_eq!(doc.style(prev_placeholder, "display"), Some("block"));
    assert_eq!(doc.style(next, "display"), Some("flex"));
    assert_eq!(doc.attr(next, "href"), Some("admission-detail.html?id=2"));
}

#[test]
fn missing_or_unknown_id_redirects_to_the_list() {
    for query in [None, Some("id=99"), Some("id=")] {
        let fetcher = StaticFetcher::new().with_json("data/admission.json", &posts(3));
        let page = open("admission-detail.html", query, fetcher);
        assert_eq!(page.redirect(), Some("pages/admission.html"), "query={query:?}");
        let doc = page.document();
        let title = doc.get_element_by_id("admission-title").unwrap();
        assert_eq!(doc.text_content(title), "");
    }
}

#[test]
fn unknown_degree_show_year_redirects_to_not_found() {
    let shows = json!({
        "2023": { "title": "Drift", "coverImage": "a.jpg" },
        "2024": { "title": "Signal", "coverImage": "b.jpg", "videoUrl": "https://www.youtube.com/embed/x" }
    });
    let fetcher = StaticFetcher::new().with_json("data/degree-show.json", &shows);
    let page = open("degree-show-detail.html", Some("year=1999"), fetcher);
    assert_eq!(page.redirect(), Some("pages/404.html"));
}

#[test]
fn degree_show_detail_sets_title_and_video() {
    let shows = json!({
        "2023": { "title": "Drift", "coverImage": "a.jpg" },
        "2024": { "title": "Signal", "coverImage": "b.jpg", "videoUrl": "https://www.youtube.com/embed/x" }
    });
    let fetcher = StaticFetcher::new().with_json("data/degree-show.json", &shows);
    let page = open("degree-show-detail.html", Some("year=2024"), fetcher);
    assert_eq!(page.redirect(), None);

    let doc = page.document();
    assert_eq!(doc.title(), "Degree Show 2024 - SCCD");
    let heading = doc.get_element_by_id("text-title").unwrap();
    assert_eq!(doc.text_content(heading), "Signal");
    let video = doc.get_element_by_id("video-section").unwrap();
    assert_eq!(doc.style(video, "display"), Some("block"));
    let wrapper = doc.get_element_by_id("video-wrapper").unwrap();
    assert!(doc.query_first_tag(wrapper, "iframe").is_some());
}

#[test]
fn ids_with_reserved_characters_round_trip_through_links() {
    let items = json!([
        { "id": "q&a #1", "title": "Questions" },
        { "id": "tour 2", "title": "Campus tour" }
    ]);
    let list = open("admission.html", None, StaticFetcher::new().with_json("data/admission.json", &items));
    let doc = list.document();
    let hrefs: Vec<_> = doc
        .query_class_all("admission-item")
        .into_iter()
        .filter_map(|item| doc.query_first_tag(item, "a"))
        .filter_map(|link| doc.attr(link, "href").map(str::to_string))
        .collect();
    assert_eq!(hrefs, vec!["admission-detail.html?id=q%26a%20%231", "admission-detail.html?id=tour%202"]);

    let query = hrefs[0].split_once('?').map(|(_, query)| query);
    let detail = open("admission-detail.html", query, StaticFetcher::new().with_json("data/admission.json", &items));
    assert_eq!(detail.redirect(), None);
    let doc = detail.document();
    let title = doc.get_element_by_id("admission-title").unwrap();
    assert_eq!(doc.text_content(title), "Questions");
    let next = doc.get_element_by_id("next-btn").unwrap();
    assert_eq!(doc.attr(next, "href"), Some("admission-detail.html?id=tour%202"));
}
