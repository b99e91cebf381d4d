// Mouse selection, double-click and wheel handling in the listing

use crate::common::fixtures::TestTree;
use crate::common::harness::BrowserTestHarness;
use crossterm::event::{KeyCode, MouseEventKind};
use files::config::Config;
use std::time::Duration;

#[test]
fn test_single_click_selects() {
    let tree = TestTree::new().unwrap();
    tree.folder("docs").unwrap();
    tree.file("notes.txt", "").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("notes.txt").unwrap();

    assert_eq!(harness.selected_name().as_deref(), Some("notes.txt"));
    assert_eq!(harness.working_dir(), tree.root.as_path());
}

#[test]
fn test_double_click_folder_navigates() {
    let tree = TestTree::new().unwrap();
    tree.file("docs/inside.txt", "").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.double_click_entry("docs").unwrap();

    assert_eq!(harness.working_dir(), tree.path("docs"));
    harness.assert_screen_contains("inside.txt");
}

#[test]
fn test_double_click_file_does_nothing() {
    let tree = TestTree::new().unwrap();
    tree.file("notes.txt", "").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.double_click_entry("notes.txt").unwrap();

    assert_eq!(harness.working_dir(), tree.root.as_path());
    assert_eq!(harness.selected_name().as_deref(), Some("notes.txt"));
}

#[test]
fn test_slow_clicks_do_not_navigate() {
    let tree = TestTree::new().unwrap();
    tree.folder("docs").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("docs").unwrap();
    harness.time_source().advance(Duration::from_millis(800));
    harness.click_entry("docs").unwrap();

    assert_eq!(harness.working_dir(), tree.root.as_path());
}

#[test]
fn test_double_click_window_is_configurable() {
    let tree = TestTree::new().unwrap();
    tree.folder("docs").unwrap();

    let mut config = Config::default();
    config.browser.double_click_time_ms = 1000;
    let mut harness = BrowserTestHarness::with_config(80, 24, &tree.root, config).unwrap();
    harness.click_entry("docs").unwrap();
    harness.time_source().advance(Duration::from_millis(800));
    harness.click_entry("docs").unwrap();

    assert_eq!(harness.working_dir(), tree.path("docs"));
}

#[test]
fn test_clicks_on_different_rows_are_not_a_double_click() {
    let tree = TestTree::new().unwrap();
    tree.folder("a").unwrap();
    tree.folder("b").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("a").unwrap();
    harness.click_entry("b").unwrap();

    assert_eq!(harness.working_dir(), tree.root.as_path());
    assert_eq!(harness.selected_name().as_deref(), Some("b"));
}

#[test]
fn test_click_below_last_row_is_ignored() {
    let tree = TestTree::new().unwrap();
    tree.file("only.txt", "").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    let (column, row) = harness.entry_position("only.txt").unwrap();
    harness.click(column, row + 3).unwrap();

    assert_eq!(harness.selected_name(), None);
}

#[test]
fn test_wheel_moves_selection() {
    let tree = TestTree::new().unwrap();
    for name in ["a", "b", "c"] {
        tree.file(name, "").unwrap();
    }

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.mouse(MouseEventKind::ScrollDown, 5, 5).unwrap();
    assert_eq!(harness.selected_name().as_deref(), Some("a"));
    harness.mouse(MouseEventKind::ScrollDown, 5, 5).unwrap();
    assert_eq!(harness.selected_name().as_deref(), Some("b"));
    harness.mouse(MouseEventKind::ScrollUp, 5, 5).unwrap();
    assert_eq!(harness.selected_name().as_deref(), Some("a"));
}

#[test]
fn test_clicks_ignored_while_prompt_open() {
    let tree = TestTree::new().unwrap();
    tree.file("a.txt", "").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_text("[Create File]").unwrap();
    assert!(harness.is_prompting());

    harness.click_text("[Delete]").unwrap();
    assert!(harness.is_prompting());
    assert!(tree.path("a.txt").exists());
}

#[test]
fn test_click_after_enter_navigation_is_single() {
    let tree = TestTree::new().unwrap();
    tree.folder("a/b").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("a").unwrap();
    harness.press(KeyCode::Enter).unwrap();
    assert_eq!(harness.working_dir(), tree.path("a"));

    harness.click_entry("b").unwrap();
    assert_eq!(harness.working_dir(), tree.path("a"));
    assert_eq!(harness.selected_name().as_deref(), Some("b"));
}

#[test]
fn test_click_after_refresh_is_single() {
    let tree = TestTree::new().unwrap();
    tree.file("m.txt", "").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    let (column, row) = harness.entry_position("m.txt").unwrap();
    harness.click(column, row).unwrap();

    tree.folder("a_dir").unwrap();
    harness.press(KeyCode::Char('r')).unwrap();
    assert_eq!(harness.entry_position("a_dir").unwrap().1, row);

    harness.click(column, row).unwrap();
    assert_eq!(harness.working_dir(), tree.root.as_path());
    assert_eq!(harness.selected_name().as_deref(), Some("a_dir"));
}

#[test]
fn test_click_after_operation_is_single() {
    let tree = TestTree::new().unwrap();
    tree.file("m.txt", "").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    let (column, row) = harness.entry_position("m.txt").unwrap();
    harness.click(column, row).unwrap();

    harness.press(KeyCode::Char('n')).unwrap();
    harness.type_text("a_dir").unwrap();
    harness.press(KeyCode::Enter).unwrap();
    assert_eq!(harness.entry_names(), vec!["a_dir", "m.txt"]);

    harness.click(column, row).unwrap();
    assert_eq!(harness.working_dir(), tree.root.as_path());
}
