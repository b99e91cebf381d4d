use crate::model::listing::ListingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub picker: PickerConfig,

    /// UI locale (e.g. "en"). `null` follows the environment.
    #[serde(default)]
    pub locale: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_double_click_time_ms() -> u64 {
    500
}

/// Main listing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BrowserConfig {
    /// Whether entries starting with '.' are listed
    #[serde(default = "default_true")]
    pub show_hidden: bool,

    /// List folders before files instead of mixing them by name
    #[serde(default = "default_false")]
    pub folders_first: bool,

    /// Two clicks on the same row within this many milliseconds open it
    #[serde(default = "default_double_click_time_ms")]
    pub double_click_time_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            show_hidden: true,
            folders_first: false,
            double_click_time_ms: default_double_click_time_ms(),
        }
    }
}

impl BrowserConfig {
    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            show_hidden: self.show_hidden,
            folders_first: self.folders_first,
        }
    }
}

/// Destination picker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PickerConfig {
    /// Whether folders starting with '.' are offered as destinations
    #[serde(default = "default_true")]
    pub show_hidden: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self { show_hidden: true }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON, as written by `--dump-config`
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// JSON Schema of the config file, as written by `--dump-schema`
    pub fn json_schema() -> Result<String, ConfigError> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.browser.double_click_time_ms == 0 {
            return Err(ConfigError::ValidationError(
                "browser.double_click_time_ms must be greater than 0".to_string(),
            ));
        }
        if self.browser.double_click_time_ms > 5000 {
            return Err(ConfigError::ValidationError(
                "browser.double_click_time_ms must be at most 5000".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
