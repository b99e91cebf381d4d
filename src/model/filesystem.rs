//! Filesystem abstraction used by the browser
//!
//! Every operation the browser performs on disk goes through the
//! [`FileSystem`] trait. The production implementation, [`StdFileSystem`],
//! is a thin layer over `std::fs`; it adds only the checks the host API does
//! not make on its own (refusing to overwrite on move/copy, refusing to copy
//! a folder into itself) and maps `io::Error`s into [`FsError`].
//!
//! The trait is synchronous. The app runs mutating operations on a blocking
//! worker (see `app::App::dispatch_operation`) so the UI thread never waits
//! on a large copy or delete.

use rust_i18n::t;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

// ============================================================================
// Entry Types
// ============================================================================

/// Type of filesystem entry as reported by the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    File,
    Directory,
    Symlink,
}

/// What the browser shows in the "Type" column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    /// Localized name for the "Type" column
    pub fn label(self) -> String {
        match self {
            EntryKind::File => t!("kind.file"),
            EntryKind::Folder => t!("kind.folder"),
        }
        .to_string()
    }
}

/// A directory entry returned by `read_dir`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Full path to the entry
    pub path: PathBuf,
    /// File/directory name (last component of path)
    pub name: String,
    /// Type of entry
    pub entry_type: EntryType,
    /// For symlinks, whether the target is a directory
    pub symlink_target_is_dir: bool,
}

impl DirEntry {
    pub fn new(path: PathBuf, name: String, entry_type: EntryType) -> Self {
        Self {
            path,
            name,
            entry_type,
            symlink_target_is_dir: false,
        }
    }

    /// Create a symlink entry with target info
    pub fn new_symlink(path: PathBuf, name: String, target_is_dir: bool) -> Self {
        Self {
            path,
            name,
            entry_type: EntryType::Symlink,
            symlink_target_is_dir: target_is_dir,
        }
    }

    /// Returns true if this entry is a directory OR a symlink pointing to a directory
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
            || (self.entry_type == EntryType::Symlink && self.symlink_target_is_dir)
    }

    pub fn kind(&self) -> EntryKind {
        if self.is_dir() {
            EntryKind::Folder
        } else {
            EntryKind::File
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failure of a filesystem operation
///
/// Every variant names the path(s) involved so the message shown to the user
/// is meaningful without further context.
#[derive(Debug)]
pub enum FsError {
    NotFound(PathBuf),
    NotADirectory(PathBuf),
    DestinationNotFolder(PathBuf),
    AlreadyExists(PathBuf),
    PermissionDenied(PathBuf),
    /// A folder copied/moved into itself or one of its descendants, or an
    /// entry moved/copied onto its own location.
    SourceEqualsDestination {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Any other OS failure
    Io { path: PathBuf, source: io::Error },
}

impl FsError {
    /// Classify an `io::Error` raised while operating on `path`.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path),
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path),
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path),
            io::ErrorKind::NotADirectory => FsError::NotADirectory(path),
            _ => FsError::Io { path, source: err },
        }
    }

    /// Short machine-friendly name of the variant, used in logs and tests
    pub fn kind_name(&self) -> &'static str {
        match self {
            FsError::NotFound(_) => "NotFound",
            FsError::NotADirectory(_) => "NotADirectory",
            FsError::DestinationNotFolder(_) => "DestinationNotFolder",
            FsError::AlreadyExists(_) => "AlreadyExists",
            FsError::PermissionDenied(_) => "PermissionDenied",
            FsError::SourceEqualsDestination { .. } => "SourceEqualsDestination",
            FsError::Io { .. } => "Io",
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::NotFound(p) => write!(f, "{} does not exist", p.display()),
            FsError::NotADirectory(p) => write!(f, "{} is not a folder", p.display()),
            FsError::DestinationNotFolder(p) => {
                write!(f, "destination {} is not a folder", p.display())
            }
            FsError::AlreadyExists(p) => write!(f, "{} already exists", p.display()),
            FsError::PermissionDenied(p) => write!(f, "permission denied: {}", p.display()),
            FsError::SourceEqualsDestination {
                source,
                destination,
            } => write!(
                f,
                "cannot place {} inside {} (it is the source itself or inside it)",
                source.display(),
                destination.display()
            ),
            FsError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type FsResult<T> = Result<T, FsError>;

/// Extension to attach a path to an `io::Result`
trait IoResultExt<T> {
    fn at(self, path: &Path) -> FsResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: &Path) -> FsResult<T> {
        self.map_err(|e| FsError::from_io(e, path))
    }
}

// ============================================================================
// FileSystem Trait
// ============================================================================

/// Filesystem operations needed by the browser
///
/// All methods are synchronous and may block for as long as the OS call
/// takes. Implementations must be shareable across threads so operations
/// can run off the UI thread.
pub trait FileSystem: Send + Sync {
    /// List immediate children of a directory (unsorted, OS order)
    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>>;

    /// Whether `path` is a folder (symlinks are followed)
    fn is_folder(&self, path: &Path) -> FsResult<bool>;

    /// Whether anything (including a dangling symlink) exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Canonical (absolute, symlink-resolved) form of `path`
    fn canonicalize(&self, path: &Path) -> FsResult<PathBuf>;

    /// Create a new empty file. Never truncates an existing entry.
    fn create_empty_file(&self, path: &Path) -> FsResult<()>;

    /// Create a folder and any missing parents. Succeeds if it already exists.
    fn create_folder(&self, path: &Path) -> FsResult<()>;

    /// Remove a file, a symlink, or a folder with all of its contents
    fn delete(&self, path: &Path) -> FsResult<()>;

    /// Move `src` into `dest_dir`, keeping its name. Returns the new path.
    fn move_entry(&self, src: &Path, dest_dir: &Path) -> FsResult<PathBuf>;

    /// Copy `src` (recursively for folders) into `dest_dir`, keeping its
    /// name. Returns the path of the copy.
    fn copy_entry(&self, src: &Path, dest_dir: &Path) -> FsResult<PathBuf>;

    /// List only the folders directly inside `path`
    fn read_dir_folders(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        Ok(self
            .read_dir(path)?
            .into_iter()
            .filter(DirEntry::is_dir)
            .collect())
    }
}

// ============================================================================
// StdFileSystem Implementation
// ============================================================================

/// Standard filesystem implementation using `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Resolve where `src` lands inside `dest_dir` and reject the
    /// combinations no move/copy can satisfy.
    fn plan_transfer(&self, src: &Path, dest_dir: &Path) -> FsResult<(PathBuf, bool)> {
        let src_meta = std::fs::symlink_metadata(src).at(src)?;

        if !self.exists(dest_dir) {
            return Err(FsError::NotFound(dest_dir.to_path_buf()));
        }
        if !self.is_folder(dest_dir)? {
            return Err(FsError::DestinationNotFolder(dest_dir.to_path_buf()));
        }

        let name = src
            .file_name()
            .ok_or_else(|| FsError::NotFound(src.to_path_buf()))?;
        let target = dest_dir.join(name);

        let src_is_dir = src_meta.is_dir();
        let canonical_dest = self.canonicalize(dest_dir)?;
        // The source itself may be a symlink: compare its own location, not
        // its target, so moving a link next to the folder it points at works.
        let canonical_src_parent = match src.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.canonicalize(parent)?,
            _ => self.canonicalize(Path::new("."))?,
        };
        let canonical_src = canonical_src_parent.join(name);

        if canonical_dest.join(name) == canonical_src
            || (src_is_dir && canonical_dest.starts_with(&canonical_src))
        {
            return Err(FsError::SourceEqualsDestination {
                source: src.to_path_buf(),
                destination: dest_dir.to_path_buf(),
            });
        }

        if self.exists(&target) {
            return Err(FsError::AlreadyExists(target));
        }

        Ok((target, src_is_dir))
    }

    /// Copy a regular file; pipes, sockets and devices are refused since
    /// reading them may never finish
    fn copy_file(src: &Path, target: &Path) -> FsResult<()> {
        let meta = std::fs::metadata(src).at(src)?;
        if !meta.is_file() {
            return Err(FsError::Io {
                path: src.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Unsupported, "not a regular file"),
            });
        }
        std::fs::copy(src, target).at(src)?;
        // Keep the modification time, like a "preserve metadata" copy
        if let Ok(modified) = std::fs::metadata(src).and_then(|m| m.modified()) {
            if let Ok(file) = std::fs::OpenOptions::new().write(true).open(target) {
                if let Err(e) = file.set_modified(modified) {
                    tracing::debug!("Could not preserve mtime on {:?}: {}", target, e);
                }
            }
        }
        Ok(())
    }

    #[cfg(unix)]
    fn copy_symlink(src: &Path, target: &Path) -> FsResult<()> {
        let link = std::fs::read_link(src).at(src)?;
        std::os::unix::fs::symlink(&link, target).at(target)
    }

    #[cfg(not(unix))]
    fn copy_symlink(src: &Path, target: &Path) -> FsResult<()> {
        // Without portable symlink creation, copy what the link points at
        // when it is a file and skip links to folders.
        match std::fs::metadata(src) {
            Ok(meta) if meta.is_file() => Self::copy_file(src, target),
            _ => Ok(()),
        }
    }

    fn copy_tree(src: &Path, target: &Path) -> FsResult<()> {
        std::fs::create_dir(target).at(target)?;

        for entry in std::fs::read_dir(src).at(src)? {
            let entry = entry.at(src)?;
            let child_src = entry.path();
            let child_target = target.join(entry.file_name());
            let file_type = entry.file_type().at(&child_src)?;

            if file_type.is_symlink() {
                Self::copy_symlink(&child_src, &child_target)?;
            } else if file_type.is_dir() {
                Self::copy_tree(&child_src, &child_target)?;
            } else {
                Self::copy_file(&child_src, &child_target)?;
            }
        }

        // Applied last so a read-only source folder can still be filled
        if let Ok(perms) = std::fs::metadata(src).map(|m| m.permissions()) {
            let _ = std::fs::set_permissions(target, perms);
        }
        Ok(())
    }

    fn copy_planned(src: &Path, target: &Path, src_is_dir: bool) -> FsResult<()> {
        let src_meta = std::fs::symlink_metadata(src).at(src)?;
        if src_meta.file_type().is_symlink() {
            Self::copy_symlink(src, target)
        } else if src_is_dir {
            Self::copy_tree(src, target)
        } else {
            Self::copy_file(src, target)
        }
    }
}

impl FileSystem for StdFileSystem {
    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path).at(path)? {
            let entry = entry.at(path)?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type().at(&path)?;

            let dir_entry = if file_type.is_symlink() {
                let target_is_dir = std::fs::metadata(&path)
                    .map(|m| m.is_dir())
                    .unwrap_or(false);
                DirEntry::new_symlink(path, name, target_is_dir)
            } else if file_type.is_dir() {
                DirEntry::new(path, name, EntryType::Directory)
            } else {
                DirEntry::new(path, name, EntryType::File)
            };

            entries.push(dir_entry);
        }
        Ok(entries)
    }

    fn is_folder(&self, path: &Path) -> FsResult<bool> {
        match std::fs::metadata(path) {
            Ok(meta) => Ok(meta.is_dir()),
            // A dangling symlink exists but is not a folder
            Err(e) if e.kind() == io::ErrorKind::NotFound && self.exists(path) => Ok(false),
            Err(e) => Err(FsError::from_io(e, path)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn canonicalize(&self, path: &Path) -> FsResult<PathBuf> {
        std::fs::canonicalize(path).at(path)
    }

    fn create_empty_file(&self, path: &Path) -> FsResult<()> {
        std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
            .at(path)
    }

    fn create_folder(&self, path: &Path) -> FsResult<()> {
        if self.exists(path) && !self.is_folder(path)? {
            return Err(FsError::NotADirectory(path.to_path_buf()));
        }
        match std::fs::create_dir_all(path) {
            Ok(()) => Ok(()),
            // create_dir_all reports a file sitting on a parent as AlreadyExists
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(FsError::NotADirectory(path.to_path_buf()))
            }
            Err(e) => Err(FsError::from_io(e, path)),
        }
    }

    fn delete(&self, path: &Path) -> FsResult<()> {
        let meta = std::fs::symlink_metadata(path).at(path)?;
        if meta.is_dir() {
            std::fs::remove_dir_all(path).at(path)
        } else {
            std::fs::remove_file(path).at(path)
        }
    }

    fn move_entry(&self, src: &Path, dest_dir: &Path) -> FsResult<PathBuf> {
        let (target, src_is_dir) = self.plan_transfer(src, dest_dir)?;

        match std::fs::rename(src, &target) {
            Ok(()) => Ok(target),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                tracing::debug!(
                    "rename {:?} -> {:?} crosses devices, copying instead",
                    src,
                    target
                );
                Self::copy_planned(src, &target, src_is_dir)?;
                self.delete(src)?;
                Ok(target)
            }
            Err(e) => Err(FsError::from_io(e, src)),
        }
    }

    fn copy_entry(&self, src: &Path, dest_dir: &Path) -> FsResult<PathBuf> {
        let (target, src_is_dir) = self.plan_transfer(src, dest_dir)?;
        Self::copy_planned(src, &target, src_is_dir)?;
        Ok(target)
    }
}

// ============================================================================
// Tests
// ============================================================================
