use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn make_site(root: &Path) {
    fs::create_dir_all(root.join("data")).expect("create data dir");
    fs::create_dir_all(root.join("components")).expect("create components dir");
    fs::write(root.join("components/header.html"), "<nav>SCCD</nav>").expect("write header");
    fs::write(
        root.join("data/records.json"),
        json!([{ "year": 2024, "items": [{ "competition": "Gold Pencil", "rank": "1st", "winner": "Lin" }] }]).to_string(),
    )
    .expect("write records");
    fs::write(
        root.join("data/faculty.json"),
        json!([
            { "id": "f1", "type": "fulltime", "nameEn": "Ada" },
            { "id": "p1", "type": "parttime", "nameEn": "Cy" }
        ])
        .to_string(),
    )
    .expect("write faculty");
}

fn cmd(site: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("sccd");
    cmd.arg("--site-root").arg(site.path()).arg("--instant");
    cmd
}

#[test]
fn pages_lists_the_registry() {
    let site = TempDir::new().expect("create temp dir");
    cmd(&site)
        .arg("pages")
        .assert()
        .success()
        .stdout(predicate::str::contains("about.html\ttimeline,horizontal-accordion,resources,bfa-division"))
        .stdout(predicate::str::contains("admission-detail.html\tadmission-detail"));
}

#[test]
fn render_prints_document_and_report() {
    let site = TempDir::new().expect("create temp dir");
    make_site(site.path());
    cmd(&site)
        .args(["render", "records.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gold Pencil"))
        .stdout(predicate::str::contains("<nav>SCCD</nav>"))
        .stdout(predicate::str::contains(
            "page=records.html sections=1 ok=1 failed=0 header=true footer=false redirect=none",
        ));
}

#[test]
fn render_json_reports_failed_sections() {
    let site = TempDir::new().expect("create temp dir");
    make_site(site.path());
    let out = cmd(&site)
        .args(["--json", "render", "library.html", "--report-only"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&out).expect("valid json output");
    assert_eq!(value["ok"], true);
    assert_eq!(value["data"]["report"]["page"], "library.html");
    assert_eq!(value["data"]["report"]["sections"][0]["id"], "library");
    assert_eq!(value["data"]["report"]["sections"][0]["status"], "failed");
    assert!(value["data"].get("html").is_none());
}

#[test]
fn clicks_drive_the_faculty_filter() {
    let site = TempDir::new().expect("create temp dir");
    make_site(site.path());
    let out = cmd(&site)
        .args(["--json", "render", "faculty.html", "--click", "faculty-filter-btn-parttime", "--click", "missing"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&out).expect("valid json output");
    assert_eq!(value["data"]["missed_clicks"], json!(["missing"]));
    let html = value["data"]["html"].as_str().expect("html");
    assert!(html.contains(r#"id="faculty-filter-btn-parttime" class="faculty-filter-btn active""#));
    assert!(html.contains(r#"data-faculty-id="f1" style="display: none;""#));
    assert!(html.contains(r#"data-faculty-id="p1" style="display: block;""#));
}

#[test]
fn unknown_page_fails() {
    let site = TempDir::new().expect("create temp dir");
    cmd(&site)
        .args(["render", "nowhere.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page not registered: nowhere.html"));
}

#[test]
fn missing_detail_id_reports_redirect() {
    let site = TempDir::new().expect("create temp dir");
    fs::create_dir_all(site.path().join("data")).expect("create data dir");
    fs::write(site.path().join("data/admission.json"), "[]").expect("write admission");
    cmd(&site)
        .args(["render", "admission-detail.html", "--report-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("redirect=pages/admission.html"));
}
