//! Browser session: where the browser is and what it shows
//!
//! All navigation state lives here rather than in globals, so any number of
//! independent sessions can exist side by side (tests create one per case).

use crate::model::filesystem::{FileSystem, FsResult};
use crate::model::listing::{list_directory, DirectoryEntry, ListingOptions};
use crate::model::operation::FileOperation;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct BrowserSession {
    fs: Arc<dyn FileSystem>,
    /// Folder whose contents are listed; changes only on navigation
    working_dir: PathBuf,
    /// Root of the destination picker; fixed for the session's lifetime
    base_dir: PathBuf,
    entries: Vec<DirectoryEntry>,
    /// Index into `entries`; at most one entry is selected
    selected: Option<usize>,
    options: ListingOptions,
}

impl std::fmt::Debug for BrowserSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserSession")
            .field("working_dir", &self.working_dir)
            .field("base_dir", &self.base_dir)
            .field("entries", &self.entries.len())
            .field("selected", &self.selected)
            .finish()
    }
}

impl BrowserSession {
    /// Start a session in `start_dir`, which also becomes the base directory
    ///
    /// # Errors
    ///
    /// Fails if `start_dir` cannot be listed.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        start_dir: PathBuf,
        options: ListingOptions,
    ) -> FsResult<Self> {
        let entries = list_directory(fs.as_ref(), &start_dir, options)?;
        Ok(Self {
            fs,
            base_dir: start_dir.clone(),
            working_dir: start_dir,
            entries,
            selected: None,
            options,
        })
    }

    pub fn fs(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    /// Select the entry at `index`; out-of-range indices clear the selection
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.entries.len());
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(self.entries.len() - 1),
            None => 0,
        });
    }

    pub fn select_prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    pub fn select_first(&mut self) {
        if !self.entries.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        if !self.entries.is_empty() {
            self.selected = Some(self.entries.len() - 1);
        }
    }

    /// Re-read the working directory and clear the selection
    ///
    /// On failure the listing is emptied, so a folder that vanished
    /// underneath the browser shows as empty rather than stale.
    pub fn refresh(&mut self) -> FsResult<()> {
        self.selected = None;
        match list_directory(self.fs.as_ref(), &self.working_dir, self.options) {
            Ok(entries) => {
                self.entries = entries;
                Ok(())
            }
            Err(e) => {
                self.entries.clear();
                Err(e)
            }
        }
    }

    /// Descend into the entry at `index`
    ///
    /// Returns `Ok(false)` without touching anything when the entry is a
    /// file or the index is out of range. The working directory only changes
    /// once the new folder has been listed successfully.
    pub fn navigate_into(&mut self, index: usize) -> FsResult<bool> {
        let Some(entry) = self.entries.get(index) else {
            return Ok(false);
        };
        if !entry.is_folder() {
            return Ok(false);
        }

        let target = entry.path.clone();
        let entries = list_directory(self.fs.as_ref(), &target, self.options)?;
        tracing::debug!("Navigated into {:?}", target);
        self.working_dir = target;
        self.entries = entries;
        self.selected = None;
        Ok(true)
    }

    /// `CreateFile(name)`; `None` for an empty (or cancelled) name
    pub fn plan_create_file(&self, name: &str) -> Option<FileOperation> {
        (!name.is_empty()).then(|| FileOperation::CreateFile {
            path: self.working_dir.join(name),
        })
    }

    /// `CreateFolder(name)`; `None` for an empty (or cancelled) name
    pub fn plan_create_folder(&self, name: &str) -> Option<FileOperation> {
        (!name.is_empty()).then(|| FileOperation::CreateFolder {
            path: self.working_dir.join(name),
        })
    }

    /// `Delete` of the selected entry; `None` when nothing is selected
    pub fn plan_delete(&self) -> Option<FileOperation> {
        self.selected_entry().map(|e| FileOperation::Delete {
            path: e.path.clone(),
        })
    }

    /// `Move` of the selected entry into `dest_dir`
    pub fn plan_move(&self, dest_dir: &Path) -> Option<FileOperation> {
        self.selected_entry().map(|e| FileOperation::Move {
            source: e.path.clone(),
            dest_dir: dest_dir.to_path_buf(),
        })
    }

    /// `Copy` of the selected entry into `dest_dir`
    pub fn plan_copy(&self, dest_dir: &Path) -> Option<FileOperation> {
        self.selected_entry().map(|e| FileOperation::Copy {
            source: e.path.clone(),
            dest_dir: dest_dir.to_path_buf(),
        })
    }

    /// Execute `operation` in place, then refresh
    ///
    /// The listing is refreshed even when the operation fails, since a
    /// partial delete or copy may already have changed the folder. The
    /// operation's error wins over a refresh error.
    pub fn apply(&mut self, operation: &FileOperation) -> FsResult<()> {
        let result = operation.execute(self.fs.as_ref());
        let refreshed = self.refresh();
        result.and(refreshed)
    }

    fn apply_planned(&mut self, operation: Option<FileOperation>) -> FsResult<()> {
        match operation {
            Some(op) => self.apply(&op),
            None => Ok(()),
        }
    }

    pub fn create_file(&mut self, name: &str) -> FsResult<()> {
        let op = self.plan_create_file(name);
        self.apply_planned(op)
    }

    pub fn create_folder(&mut self, name: &str) -> FsResult<()> {
        let op = self.plan_create_folder(name);
        self.apply_planned(op)
    }

    pub fn delete_selected(&mut self) -> FsResult<()> {
        let op = self.plan_delete();
        self.apply_planned(op)
    }

    pub fn move_selected(&mut self, dest_dir: &Path) -> FsResult<()> {
        let op = self.plan_move(dest_dir);
        self.apply_planned(op)
    }

    pub fn copy_selected(&mut self, dest_dir: &Path) -> FsResult<()> {
        let op = self.plan_copy(dest_dir);
        self.apply_planned(op)
    }
}
