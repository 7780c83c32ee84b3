//! End-to-end tests of the facade over a real temporary home directory.

use std::fs;
use std::io::{Cursor, Read};

use filebrowser::{Error, FileBrowser, SearchQuery};
use tempfile::TempDir;

fn browser() -> (TempDir, FileBrowser) {
    let temp_dir = TempDir::new().unwrap();
    let browser = FileBrowser::new(temp_dir.path()).unwrap();
    (temp_dir, browser)
}

#[test]
fn traversal_attempts_are_denied_everywhere() {
    let (_t, browser) = browser();

    assert!(matches!(
        browser.create_directory("../breakout"),
        Err(Error::AccessDenied)
    ));
    assert!(matches!(
        browser.delete("../../etc"),
        Err(Error::AccessDenied)
    ));
    assert!(matches!(
        browser.open_for_read("a/../../secret"),
        Err(Error::AccessDenied)
    ));

    let listing = browser.list_directory("../elsewhere");
    assert!(!listing.exists);
}

#[test]
fn listing_orders_directories_before_files() {
    let (temp_dir, browser) = browser();
    fs::write(temp_dir.path().join("b.txt"), "bb").unwrap();
    fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
    fs::create_dir(temp_dir.path().join("A")).unwrap();

    let listing = browser.list_directory("");
    let names: Vec<&str> = listing.items.iter().map(|i| i.name()).collect();

    assert_eq!(names, vec!["A", "a.txt", "b.txt"]);
    assert_eq!(listing.file_count, 2);
    assert_eq!(listing.directory_count, 1);
    assert_eq!(listing.total_size, 3);
}

#[test]
fn listing_missing_directory_reports_not_fails() {
    let (_t, browser) = browser();

    let listing = browser.list_directory("missing");

    assert!(!listing.exists);
    assert!(listing.items.is_empty());
    assert!(listing.error_message.as_deref().is_some_and(|m| !m.is_empty()));
}

#[test]
fn search_by_name_finds_only_matching_files() {
    let (temp_dir, browser) = browser();
    fs::create_dir(temp_dir.path().join("reports")).unwrap();
    fs::write(temp_dir.path().join("reports/report.txt"), "numbers").unwrap();
    fs::write(temp_dir.path().join("reports/summary.txt"), "words").unwrap();

    let results = browser.search(&SearchQuery::new("report").unwrap());

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name(), "report.txt");
}

#[test]
fn content_search_ignores_binary_files() {
    let (temp_dir, browser) = browser();
    fs::write(temp_dir.path().join("greeting.txt"), "Hello World").unwrap();
    fs::write(temp_dir.path().join("greeting.bin"), b"hello world bytes").unwrap();

    let query = SearchQuery::new("hello")
        .unwrap()
        .match_names(false)
        .match_contents(true);
    let results = browser.search(&query);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name(), "greeting.txt");
}

#[test]
fn upload_then_download_roundtrip() {
    let (_t, browser) = browser();

    let payload = b"streamed bytes".to_vec();
    let outcome = browser.write("inbox/data.txt", &mut Cursor::new(payload.clone()), 14);
    assert!(outcome.success);
    assert_eq!(outcome.size, Some(14));

    let mut downloaded = Vec::new();
    browser
        .open_for_read("inbox/data.txt")
        .unwrap()
        .read_to_end(&mut downloaded)
        .unwrap();
    assert_eq!(downloaded, payload);
}

#[test]
fn move_creates_destination_parent() {
    let (temp_dir, browser) = browser();
    fs::write(temp_dir.path().join("a.txt"), "x").unwrap();

    browser.move_entry("a.txt", "b/a.txt").unwrap();

    let root = browser.list_directory("");
    assert!(root.items.iter().all(|i| i.name() != "a.txt"));

    let moved = browser.list_directory("b");
    assert!(moved.exists);
    assert!(moved.items.iter().any(|i| i.name() == "a.txt"));
}

#[test]
fn move_to_existing_destination_fails_and_keeps_source() {
    let (temp_dir, browser) = browser();
    fs::write(temp_dir.path().join("src.txt"), "keep").unwrap();
    fs::write(temp_dir.path().join("dst.txt"), "other").unwrap();

    assert!(matches!(
        browser.move_entry("src.txt", "dst.txt"),
        Err(Error::AlreadyExists(_))
    ));
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("src.txt")).unwrap(),
        "keep"
    );
}

#[test]
fn delete_removes_directory_tree() {
    let (temp_dir, browser) = browser();
    fs::create_dir_all(temp_dir.path().join("tree/nested")).unwrap();
    fs::write(temp_dir.path().join("tree/nested/leaf.txt"), "x").unwrap();

    browser.delete("tree").unwrap();

    let root = browser.list_directory("");
    assert!(root.items.iter().all(|i| i.name() != "tree"));
}

#[test]
fn create_directory_then_conflict() {
    let (_t, browser) = browser();

    browser.create_directory("projects/alpha").unwrap();
    assert!(browser.directory_exists("projects/alpha"));
    assert!(matches!(
        browser.create_directory("projects/alpha"),
        Err(Error::AlreadyExists(_))
    ));
}

#[test]
fn listing_entries_resolve_back_to_same_paths() {
    let (temp_dir, browser) = browser();
    fs::create_dir(temp_dir.path().join("docs")).unwrap();
    fs::write(temp_dir.path().join("docs/a.txt"), "x").unwrap();

    let listing = browser.list_directory("docs");
    for item in &listing.items {
        // Re-listing the parent of any reported path must succeed: the
        // relative paths the core hands out are valid inputs to it.
        assert!(browser.file_exists(item.path()) || browser.directory_exists(item.path()));
    }
}

#[test]
fn access_denied_messages_leak_no_paths() {
    let (_t, browser) = browser();

    let err = browser.create_directory("../../victim").unwrap_err();
    let message = err.to_string();
    assert!(!message.contains("victim"));
    assert!(!message.contains('/'));
}
