//! Locating and loading the configuration file

use crate::config::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// Directories the browser reads from
///
/// Passed explicitly instead of being looked up globally, so tests can
/// point everything at a temp directory.
#[derive(Debug, Clone)]
pub struct DirectoryContext {
    /// Config directory for user configuration
    /// e.g., ~/.config/fresh-files on Linux
    pub config_dir: PathBuf,
}

impl DirectoryContext {
    /// Create a DirectoryContext from the system directories
    /// This should ONLY be called from main()
    pub fn from_system() -> std::io::Result<Self> {
        #[allow(unused_mut)] // mut needed on macOS only
        let mut config_dir = dirs::config_dir()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine config directory",
                )
            })?
            .join("fresh-files");

        // macOS: Prioritize ~/.config/fresh-files
        #[cfg(target_os = "macos")]
        if let Some(home) = dirs::home_dir() {
            config_dir = home.join(".config").join("fresh-files");
        }

        Ok(Self { config_dir })
    }

    /// Create a DirectoryContext for testing with a temp directory
    pub fn for_testing(temp_dir: &Path) -> Self {
        Self {
            config_dir: temp_dir.join("config"),
        }
    }

    /// Path of the user config file
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}

/// Load the effective configuration.
///
/// An explicit path must load cleanly. Otherwise the user config file is
/// used when present; a broken user file is logged and replaced by the
/// defaults so the browser still starts.
pub fn load_config(
    explicit: Option<&Path>,
    dir_context: &DirectoryContext,
) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        let config = Config::load_from_file(path)?;
        tracing::info!("Loaded config from {:?}", path);
        return Ok(config);
    }

    let path = dir_context.config_path();
    if !path.exists() {
        tracing::debug!("No config file at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    match Config::load_from_file(&path) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!("Ignoring config {:?}: {}", path, e);
            Ok(Config::default())
        }
    }
}
