//! Modal "Select Destination Folder" dialog
//!
//! `Closed -> Open -> {Confirmed(path) | Cancelled}`. The picker owns its
//! tree for as long as it is open; closing it drops every loaded node.

use crate::model::filesystem::{FileSystem, FsResult};
use crate::view::destination_tree::{DestinationTree, DestinationTreeView, NodeId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How the dialog was closed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Confirmed(PathBuf),
    Cancelled,
}

#[derive(Debug)]
pub struct DestinationPicker {
    view: DestinationTreeView,
}

impl DestinationPicker {
    /// Open the picker on `base_dir`, reading only its first level
    pub fn open(fs: Arc<dyn FileSystem>, base_dir: &Path, show_hidden: bool) -> FsResult<Self> {
        let tree = DestinationTree::new(base_dir.to_path_buf(), fs, show_hidden)?;
        tracing::debug!("Destination picker opened on {:?}", base_dir);
        Ok(Self {
            view: DestinationTreeView::new(tree),
        })
    }

    pub fn view(&self) -> &DestinationTreeView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut DestinationTreeView {
        &mut self.view
    }

    /// Confirm the current selection. With nothing selected this does
    /// nothing and the dialog stays open.
    pub fn confirm(&self) -> Option<PickerOutcome> {
        self.view
            .get_selected_path()
            .map(|p| PickerOutcome::Confirmed(p.to_path_buf()))
    }

    pub fn cancel(&self) -> PickerOutcome {
        PickerOutcome::Cancelled
    }

    /// Select a row (mouse click)
    pub fn select(&mut self, id: NodeId) {
        self.view.set_selected(Some(id));
    }

    /// Expand or collapse a row (double-click)
    pub fn toggle(&mut self, id: NodeId) {
        if let Err(e) = self.view.toggle(id) {
            tracing::warn!("Failed to expand folder in picker: {}", e);
        }
    }

    /// Handle a key press; returns the outcome once the dialog closes
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PickerOutcome> {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => return Some(self.cancel()),
            (KeyCode::Enter, _) => return self.confirm(),
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => self.view.select_prev(),
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
                self.view.select_next()
            }
            (KeyCode::PageUp, _) => self.view.select_page_up(),
            (KeyCode::PageDown, _) => self.view.select_page_down(),
            (KeyCode::Home, _) => self.view.select_first(),
            (KeyCode::End, _) => self.view.select_last(),
            (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
                if let Err(e) = self.view.expand_selected() {
                    tracing::warn!("Failed to expand folder in picker: {}", e);
                }
            }
            (KeyCode::Char(' '), _) => {
                if let Some(id) = self.view.get_selected() {
                    self.toggle(id);
                }
            }
            (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
                self.view.collapse_selected()
            }
            _ => {}
        }
        None
    }
}
