//! Mutating commands as plain values
//!
//! A `FileOperation` captures everything needed to perform one toolbar
//! command, so it can be built on the UI thread, executed on a worker, and
//! reported back together with its result.

use super::filesystem::{FileSystem, FsResult};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    CreateFile { path: PathBuf },
    CreateFolder { path: PathBuf },
    Delete { path: PathBuf },
    Move { source: PathBuf, dest_dir: PathBuf },
    Copy { source: PathBuf, dest_dir: PathBuf },
}

impl FileOperation {
    /// Run the operation against `fs`
    pub fn execute(&self, fs: &dyn FileSystem) -> FsResult<()> {
        match self {
            FileOperation::CreateFile { path } => fs.create_empty_file(path),
            FileOperation::CreateFolder { path } => fs.create_folder(path),
            FileOperation::Delete { path } => fs.delete(path),
            FileOperation::Move { source, dest_dir } => {
                fs.move_entry(source, dest_dir).map(|_| ())
            }
            FileOperation::Copy { source, dest_dir } => {
                fs.copy_entry(source, dest_dir).map(|_| ())
            }
        }
    }

    /// Name of the command, for log lines
    fn verb(&self) -> &'static str {
        match self {
            FileOperation::CreateFile { .. } => "Create File",
            FileOperation::CreateFolder { .. } => "Create Folder",
            FileOperation::Delete { .. } => "Delete",
            FileOperation::Move { .. } => "Move",
            FileOperation::Copy { .. } => "Copy",
        }
    }

    /// The entry the operation acts on
    pub fn subject(&self) -> &Path {
        match self {
            FileOperation::CreateFile { path }
            | FileOperation::CreateFolder { path }
            | FileOperation::Delete { path } => path,
            FileOperation::Move { source, .. } | FileOperation::Copy { source, .. } => source,
        }
    }

    /// Last component of the subject, for short status messages
    pub fn subject_name(&self) -> String {
        self.subject()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.subject().display().to_string())
    }
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOperation::Move { source, dest_dir } | FileOperation::Copy { source, dest_dir } => {
                write!(
                    f,
                    "{} {} -> {}",
                    self.verb(),
                    source.display(),
                    dest_dir.display()
                )
            }
            _ => write!(f, "{} {}", self.verb(), self.subject().display()),
        }
    }
}
