// Listing and folder navigation

use crate::common::fixtures::TestTree;
use crate::common::harness::BrowserTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};

#[test]
fn test_listing_shows_names_and_types_sorted() {
    let tree = TestTree::new().unwrap();
    tree.file("b.txt", "").unwrap();
    tree.folder("a").unwrap();
    tree.file("C.md", "").unwrap();

    let harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();

    assert_eq!(harness.entry_names(), vec!["a", "b.txt", "C.md"]);
    harness.assert_screen_contains("Name");
    harness.assert_screen_contains("Type");

    let (_, folder_row) = harness.entry_position("a").unwrap();
    assert!(harness.screen_row(folder_row).contains("Folder"));
    let (_, file_row) = harness.entry_position("b.txt").unwrap();
    assert!(harness.screen_row(file_row).contains("File"));
}

#[test]
fn test_header_shows_working_directory() {
    let tree = TestTree::new().unwrap();
    let harness = BrowserTestHarness::new(200, 24, &tree.root).unwrap();

    assert!(harness.screen_row(0).contains(&tree.root.display().to_string()));
}

#[test]
fn test_empty_folder_placeholder() {
    let tree = TestTree::new().unwrap();
    let harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();

    assert!(harness.entry_names().is_empty());
    harness.assert_screen_contains("(empty folder)");
}

#[test]
fn test_enter_on_folder_navigates() {
    let tree = TestTree::new().unwrap();
    tree.file("docs/readme.txt", "hi").unwrap();
    tree.file("top.txt", "").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.press(KeyCode::Down).unwrap();
    assert_eq!(harness.selected_name().as_deref(), Some("docs"));

    harness.press(KeyCode::Enter).unwrap();

    assert_eq!(harness.working_dir(), tree.path("docs"));
    assert_eq!(harness.entry_names(), vec!["readme.txt"]);
    assert_eq!(harness.selected_name(), None);
    harness.assert_screen_contains("readme.txt");
    harness.assert_screen_not_contains("top.txt");
}

#[test]
fn test_enter_on_file_does_nothing() {
    let tree = TestTree::new().unwrap();
    tree.file("notes.txt", "").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.press(KeyCode::Down).unwrap();
    harness.press(KeyCode::Enter).unwrap();

    assert_eq!(harness.working_dir(), tree.root.as_path());
    assert_eq!(harness.selected_name().as_deref(), Some("notes.txt"));
}

#[test]
fn test_keyboard_selection_moves_and_clamps() {
    let tree = TestTree::new().unwrap();
    for name in ["a", "b", "c"] {
        tree.file(name, "").unwrap();
    }

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.press(KeyCode::End).unwrap();
    assert_eq!(harness.selected_name().as_deref(), Some("c"));

    harness.press(KeyCode::Down).unwrap();
    assert_eq!(harness.selected_name().as_deref(), Some("c"));

    harness.press(KeyCode::Char('k')).unwrap();
    assert_eq!(harness.selected_name().as_deref(), Some("b"));

    harness.press(KeyCode::Home).unwrap();
    assert_eq!(harness.selected_name().as_deref(), Some("a"));

    harness.press(KeyCode::Esc).unwrap();
    assert_eq!(harness.selected_name(), None);
}

#[test]
fn test_refresh_picks_up_external_changes() {
    let tree = TestTree::new().unwrap();
    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();

    tree.file("late.txt", "").unwrap();
    harness.assert_screen_not_contains("late.txt");

    harness.press(KeyCode::Char('r')).unwrap();
    harness.assert_screen_contains("late.txt");
}

#[test]
fn test_vanished_working_directory_reports_error() {
    let tree = TestTree::new().unwrap();
    tree.folder("gone").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.press(KeyCode::Down).unwrap();
    harness.press(KeyCode::Enter).unwrap();
    std::fs::remove_dir(tree.path("gone")).unwrap();

    harness.press(KeyCode::Char('r')).unwrap();

    assert!(harness.status_is_error());
    assert!(harness.entry_names().is_empty());
    harness.assert_screen_contains("Cannot list folder");
}

#[test]
fn test_quit_keys() {
    let tree = TestTree::new().unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.press(KeyCode::Char('q')).unwrap();
    assert!(harness.should_quit());

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness
        .send_key(KeyCode::Char('c'), KeyModifiers::CONTROL)
        .unwrap();
    assert!(harness.should_quit());
}

#[test]
fn test_long_listing_scrolls_with_selection() {
    let tree = TestTree::new().unwrap();
    for i in 0..40 {
        tree.file(&format!("file{i:02}.txt"), "").unwrap();
    }

    let mut harness = BrowserTestHarness::new(80, 20, &tree.root).unwrap();
    harness.assert_screen_not_contains("file39.txt");

    harness.press(KeyCode::End).unwrap();
    assert_eq!(harness.selected_name().as_deref(), Some("file39.txt"));
    harness.assert_screen_contains("file39.txt");
    harness.assert_screen_not_contains("file00.txt");
}

#[test]
fn test_page_keys_move_by_viewport_height() {
    let tree = TestTree::new().unwrap();
    for i in 0..40 {
        tree.file(&format!("file{i:02}.txt"), "").unwrap();
    }

    let mut harness = BrowserTestHarness::new(80, 20, &tree.root).unwrap();
    let page = harness.app().browser_layout().viewport_rows as usize;
    assert!(page > 1);

    harness.press(KeyCode::Home).unwrap();
    harness.press(KeyCode::PageDown).unwrap();
    assert_eq!(harness.app().session().selected(), Some(page));

    harness.press(KeyCode::PageUp).unwrap();
    assert_eq!(harness.selected_name().as_deref(), Some("file00.txt"));
}

#[test]
fn test_page_size_ignores_listing_length() {
    let tree = TestTree::new().unwrap();
    for name in ["a", "b", "c"] {
        tree.file(name, "").unwrap();
    }

    let mut harness = BrowserTestHarness::new(80, 20, &tree.root).unwrap();
    harness.render().unwrap();
    let layout = harness.app().browser_layout();
    assert_eq!(layout.rows_area.height, 3);
    assert!(layout.viewport_rows > 3);
    assert_eq!(layout.page_size(), layout.viewport_rows as usize);
}
