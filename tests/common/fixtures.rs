// Test directory fixtures

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary folder tree that is removed when dropped
pub struct TestTree {
    _temp_dir: TempDir,
    /// Canonical path of the tree root
    pub root: PathBuf,
}

impl TestTree {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        // Canonical so paths compare equal to what the browser reports
        // (macOS temp dirs live behind a /private symlink)
        let root = fs::canonicalize(temp_dir.path())?;
        Ok(TestTree {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// Absolute path of `rel` inside the tree
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Create a file (and its parent folders) with `content`
    pub fn file(&self, rel: &str, content: &str) -> anyhow::Result<PathBuf> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Create a folder and any missing parents
    pub fn folder(&self, rel: &str) -> anyhow::Result<PathBuf> {
        let path = self.path(rel);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    pub fn read(&self, rel: &str) -> anyhow::Result<String> {
        Ok(fs::read_to_string(self.path(rel))?)
    }

    /// Sorted names of the entries directly inside `rel`
    pub fn names_in(&self, rel: &str) -> anyhow::Result<Vec<String>> {
        names_in(&self.path(rel))
    }
}

pub fn names_in(dir: &Path) -> anyhow::Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| Ok(entry?.file_name().to_string_lossy().into_owned()))
        .collect::<anyhow::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}
