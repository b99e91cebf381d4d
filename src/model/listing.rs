//! Directory listing shown in the main browser view
//!
//! A listing is derived fresh from the filesystem on every refresh and is
//! never cached: the filesystem is the only source of truth.

use super::filesystem::{EntryKind, FileSystem, FsResult};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// One row of the browser list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Full path (working directory joined with `name`)
    pub path: PathBuf,
}

impl DirectoryEntry {
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}

/// Filtering and ordering knobs, taken from the `browser` config section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    pub show_hidden: bool,
    pub folders_first: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            show_hidden: true,
            folders_first: false,
        }
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Case-insensitive name order, ties broken by the exact name so the result
/// is total and does not depend on OS enumeration order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Enumerate the immediate children of `path`.
///
/// # Errors
///
/// `NotFound` if the directory is gone, `NotADirectory` if it is a file,
/// `PermissionDenied` if it cannot be read.
pub fn list_directory(
    fs: &dyn FileSystem,
    path: &Path,
    options: ListingOptions,
) -> FsResult<Vec<DirectoryEntry>> {
    let mut entries: Vec<DirectoryEntry> = fs
        .read_dir(path)?
        .into_iter()
        .filter(|e| options.show_hidden || !is_hidden(&e.name))
        .map(|e| DirectoryEntry {
            kind: e.kind(),
            name: e.name,
            path: e.path,
        })
        .collect();

    entries.sort_by(|a, b| {
        if options.folders_first && a.kind != b.kind {
            return if a.is_folder() {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        compare_names(&a.name, &b.name)
    });

    tracing::debug!("Listed {} entries in {:?}", entries.len(), path);
    Ok(entries)
}
