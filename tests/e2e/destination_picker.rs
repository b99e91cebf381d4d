// Move and copy through the destination picker

use crate::common::fixtures::TestTree;
use crate::common::harness::BrowserTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use files::config::Config;

fn picker_rows_contain(harness: &BrowserTestHarness, text: &str) -> bool {
    let layout = harness.app().picker_layout().unwrap();
    harness.find_text_in(layout.rows_area, text).is_some()
}

#[test]
fn test_move_file_with_keyboard() {
    let tree = TestTree::new().unwrap();
    tree.file("a.txt", "payload").unwrap();
    tree.folder("dest").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("a.txt").unwrap();
    harness.press(KeyCode::Char('m')).unwrap();

    assert!(harness.is_picking());
    harness.assert_screen_contains("Select Destination Folder");
    assert!(picker_rows_contain(&harness, "dest"));
    assert!(!picker_rows_contain(&harness, "a.txt"));

    harness.press(KeyCode::Down).unwrap();
    harness.press(KeyCode::Enter).unwrap();

    assert!(harness.is_browsing());
    assert!(!tree.path("a.txt").exists());
    assert_eq!(tree.read("dest/a.txt").unwrap(), "payload");
    assert_eq!(harness.entry_names(), vec!["dest"]);
    harness.assert_screen_contains("Move: a.txt done");
}

#[test]
fn test_copy_folder_with_mouse() {
    let tree = TestTree::new().unwrap();
    tree.file("src/inner/data.txt", "42").unwrap();
    tree.folder("target").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("src").unwrap();
    harness.click_text("[Copy]").unwrap();
    assert!(harness.is_picking());

    harness.click_picker_folder("target").unwrap();
    harness.click_picker_select().unwrap();

    assert!(harness.is_browsing());
    assert_eq!(tree.read("src/inner/data.txt").unwrap(), "42");
    assert_eq!(tree.read("target/src/inner/data.txt").unwrap(), "42");
}

#[test]
fn test_expand_to_nested_destination() {
    let tree = TestTree::new().unwrap();
    tree.file("item.txt", "").unwrap();
    tree.folder("outer/nested").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("item.txt").unwrap();
    harness.press(KeyCode::Char('c')).unwrap();

    assert!(!picker_rows_contain(&harness, "nested"));
    harness.press(KeyCode::Down).unwrap();
    harness.press(KeyCode::Right).unwrap();
    assert!(picker_rows_contain(&harness, "nested"));

    harness.press(KeyCode::Down).unwrap();
    harness.press(KeyCode::Enter).unwrap();

    assert!(tree.path("item.txt").is_file());
    assert!(tree.path("outer/nested/item.txt").is_file());
}

#[test]
fn test_double_click_toggles_folder() {
    let tree = TestTree::new().unwrap();
    tree.file("item.txt", "").unwrap();
    tree.folder("outer/nested").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("item.txt").unwrap();
    harness.press(KeyCode::Char('m')).unwrap();

    harness.double_click_picker_folder("outer").unwrap();
    assert!(picker_rows_contain(&harness, "nested"));
    assert!(harness.is_picking());

    harness.double_click_picker_folder("outer").unwrap();
    assert!(!picker_rows_contain(&harness, "nested"));
}

#[test]
fn test_picker_is_rooted_at_base_directory() {
    let tree = TestTree::new().unwrap();
    tree.file("work/todo.txt", "").unwrap();
    tree.folder("archive").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.double_click_entry("work").unwrap();
    assert_eq!(harness.working_dir(), tree.path("work"));

    harness.click_entry("todo.txt").unwrap();
    harness.press(KeyCode::Char('m')).unwrap();
    assert!(picker_rows_contain(&harness, "archive"));
    assert!(picker_rows_contain(&harness, "work"));

    harness.click_picker_folder("archive").unwrap();
    harness.press(KeyCode::Enter).unwrap();

    assert!(tree.path("archive/todo.txt").is_file());
    assert!(harness.entry_names().is_empty());
}

#[test]
fn test_escape_cancels_without_changes() {
    let tree = TestTree::new().unwrap();
    tree.file("a.txt", "").unwrap();
    tree.folder("dest").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("a.txt").unwrap();
    harness.press(KeyCode::Char('m')).unwrap();
    harness.press(KeyCode::Down).unwrap();
    harness.press(KeyCode::Esc).unwrap();

    assert!(harness.is_browsing());
    assert!(tree.path("a.txt").exists());
    assert!(tree.names_in("dest").unwrap().is_empty());
    assert_eq!(harness.status_text(), None);
}

#[test]
fn test_click_outside_cancels() {
    let tree = TestTree::new().unwrap();
    tree.file("a.txt", "").unwrap();
    tree.folder("dest").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("a.txt").unwrap();
    harness.press(KeyCode::Char('c')).unwrap();
    harness.click(0, 23).unwrap();

    assert!(harness.is_browsing());
    assert!(tree.names_in("dest").unwrap().is_empty());
}

#[test]
fn test_select_without_folder_keeps_picker_open() {
    let tree = TestTree::new().unwrap();
    tree.file("a.txt", "").unwrap();
    tree.folder("dest").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("a.txt").unwrap();
    harness.press(KeyCode::Char('m')).unwrap();

    harness.click_picker_select().unwrap();
    assert!(harness.is_picking());
    harness.press(KeyCode::Enter).unwrap();
    assert!(harness.is_picking());
    assert!(tree.path("a.txt").exists());
}

#[test]
fn test_transfer_needs_selection() {
    let tree = TestTree::new().unwrap();
    tree.folder("dest").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.press(KeyCode::Char('m')).unwrap();
    assert!(harness.is_browsing());
    harness.click_text("[Copy]").unwrap();
    assert!(harness.is_browsing());
}

#[test]
fn test_move_folder_into_itself_fails() {
    let tree = TestTree::new().unwrap();
    tree.file("box/thing.txt", "").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("box").unwrap();
    harness.press(KeyCode::Char('m')).unwrap();
    harness.press(KeyCode::Down).unwrap();
    harness.press(KeyCode::Enter).unwrap();

    assert!(harness.status_is_error());
    harness.assert_screen_contains("Move failed");
    assert!(tree.path("box/thing.txt").is_file());
}

#[test]
fn test_name_conflict_in_destination_fails() {
    let tree = TestTree::new().unwrap();
    tree.file("a.txt", "new").unwrap();
    tree.file("dest/a.txt", "old").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("a.txt").unwrap();
    harness.press(KeyCode::Char('c')).unwrap();
    harness.click_picker_folder("dest").unwrap();
    harness.press(KeyCode::Enter).unwrap();

    assert!(harness.status_is_error());
    assert_eq!(tree.read("dest/a.txt").unwrap(), "old");
    assert_eq!(tree.read("a.txt").unwrap(), "new");
}

#[test]
fn test_hidden_folders_follow_config() {
    let tree = TestTree::new().unwrap();
    tree.file("a.txt", "").unwrap();
    tree.folder(".secret").unwrap();
    tree.folder("visible").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("a.txt").unwrap();
    harness.press(KeyCode::Char('m')).unwrap();
    assert!(picker_rows_contain(&harness, ".secret"));

    let mut config = Config::default();
    config.picker.show_hidden = false;
    let mut harness = BrowserTestHarness::with_config(80, 24, &tree.root, config).unwrap();
    harness.click_entry("a.txt").unwrap();
    harness.press(KeyCode::Char('m')).unwrap();
    assert!(!picker_rows_contain(&harness, ".secret"));
    assert!(picker_rows_contain(&harness, "visible"));
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_is_marked() {
    let tree = TestTree::new().unwrap();
    tree.file("a.txt", "").unwrap();
    tree.folder("loop").unwrap();
    std::os::unix::fs::symlink(&tree.root, tree.path("loop/back")).unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("a.txt").unwrap();
    harness.press(KeyCode::Char('m')).unwrap();
    harness.click_picker_folder("loop").unwrap();
    harness.press(KeyCode::Right).unwrap();

    assert!(picker_rows_contain(&harness, "back"));
    assert!(picker_rows_contain(&harness, "[loop]"));
}

#[test]
fn test_ctrl_c_quits_with_picker_open() {
    let tree = TestTree::new().unwrap();
    tree.file("a.txt", "").unwrap();
    tree.folder("dest").unwrap();

    let mut harness = BrowserTestHarness::new(80, 24, &tree.root).unwrap();
    harness.click_entry("a.txt").unwrap();
    harness.press(KeyCode::Char('m')).unwrap();
    assert!(harness.is_picking());

    harness
        .send_key(KeyCode::Char('c'), KeyModifiers::CONTROL)
        .unwrap();
    assert!(harness.should_quit());
    assert!(tree.path("a.txt").exists());
}
