use serde_json::json;
use std::fs;
use tabtree::{convert_tree, ConvertOptions, DateZone};
use tempfile::tempdir;

fn utc_options() -> ConvertOptions {
    ConvertOptions {
        zone: DateZone::Utc,
        ..ConvertOptions::default()
    }
}

#[test]
fn converts_tree_grouped_by_registrable_domain() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("session.tree");
    let tree = json!({
        "nodes": [
            "root",
            { "data": { "url": "https://a.example.com/x", "title": "A", "lastAccessed": 1_700_000_000_000i64 } },
            ["child", { "data": { "url": "https://b.example.com/y", "title": "B", "lastAccessed": 1_700_000_000_000i64 } }],
            ["dupe", { "data": { "url": "https://a.example.com/x", "title": "A again" } }]
        ]
    });
    fs::write(&input, tree.to_string()).unwrap();

    let summary = convert_tree(&input, &utc_options()).unwrap();

    assert_eq!(
        summary.output_path,
        dir.path().join("session-grouped-20231114-20231114.html")
    );
    assert_eq!(summary.tabs_extracted, 3);
    assert_eq!(summary.tabs_unique, 2);
    assert_eq!(summary.domain_count, 1);

    let html = fs::read_to_string(&summary.output_path).unwrap();
    assert_eq!(html.matches("<h2 id=\"example-com\">example.com</h2>").count(), 1);
    assert!(html.contains("Date Range: 2023-11-14 to 2023-11-14"));
    assert!(html.contains(">A</a>"));
    assert!(html.contains(">B</a>"));
    assert!(!html.contains("A again"));
}

#[test]
fn converts_tree_without_dates() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.tree");
    fs::write(&input, "[]").unwrap();

    let summary = convert_tree(&input, &utc_options()).unwrap();

    assert_eq!(summary.output_path, dir.path().join("empty-grouped-.html"));
    assert!(summary.date_range.is_none());
    let html = fs::read_to_string(&summary.output_path).unwrap();
    assert!(html.contains("<title>Tabs by Domain</title>"));
}

#[test]
fn explicit_output_path_is_used() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("session.tree");
    let output = dir.path().join("report.html");
    fs::write(
        &input,
        json!(["tab", { "data": { "url": "https://rust-lang.org" } }]).to_string(),
    )
    .unwrap();

    let options = ConvertOptions {
        output: Some(output.clone()),
        ..utc_options()
    };
    let summary = convert_tree(&input, &options).unwrap();

    assert_eq!(summary.output_path, output);
    assert!(fs::read_to_string(&output).unwrap().contains("rust-lang.org"));
}

#[test]
fn invalid_json_is_fatal_and_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.tree");
    fs::write(&input, "{ not json").unwrap();

    let err = convert_tree(&input, &utc_options()).unwrap_err();

    assert!(format!("{err:#}").contains("Failed to parse JSON"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn missing_input_is_fatal() {
    let dir = tempdir().unwrap();
    let err = convert_tree(&dir.path().join("nope.tree"), &utc_options()).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read"));
}
