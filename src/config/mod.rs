//! Configuration management.
//!
//! Settings come from three layers: built-in defaults, an optional TOML
//! file, and `GBOOKS_ZOTERO_*` environment variables. The API key is
//! read from `GOOGLE_BOOKS_API_KEY` and is required before any network
//! activity.
//!
//! # Configuration File Format
//!
//! ```toml
//! [harvest]
//! page_size = 20
//! page_delay_ms = 300
//! author_delay_secs = 5
//! output_dir = "raw_gbooks_data"
//!
//! [export]
//! matches_file = "consolidated_matches.csv"
//! non_matches_file = "consolidated_non_matches.csv"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::HarvestError;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google Books API key
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    /// Harvest settings
    #[serde(default)]
    pub harvest: HarvestSettings,

    /// Export settings
    #[serde(default)]
    pub export: ExportSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            harvest: HarvestSettings::default(),
            export: ExportSettings::default(),
        }
    }
}

impl Config {
    /// The API key, or a fatal configuration error when it is absent.
    ///
    /// Checked before any network activity so a misconfigured run fails
    /// closed.
    pub fn require_api_key(&self) -> Result<&str, HarvestError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                HarvestError::Config(
                    "no API key: set the GOOGLE_BOOKS_API_KEY environment variable".to_string(),
                )
            })
    }
}

fn default_api_key() -> Option<String> {
    std::env::var("GOOGLE_BOOKS_API_KEY").ok()
}

/// Harvest pacing and output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestSettings {
    /// Page size for pagination requests
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Delay between page requests for one author (milliseconds)
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Delay between authors (seconds)
    #[serde(default = "default_author_delay_secs")]
    pub author_delay_secs: u64,

    /// Directory the per-author artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_delay_ms: default_page_delay_ms(),
            author_delay_secs: default_author_delay_secs(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_page_size() -> u32 {
    20
}

fn default_page_delay_ms() -> u64 {
    300
}

fn default_author_delay_secs() -> u64 {
    5
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("raw_gbooks_data")
}

/// Export output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// CSV file for records matching the target author
    #[serde(default = "default_matches_file")]
    pub matches_file: PathBuf,

    /// CSV file for included records without the target author
    #[serde(default = "default_non_matches_file")]
    pub non_matches_file: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            matches_file: default_matches_file(),
            non_matches_file: default_non_matches_file(),
        }
    }
}

fn default_matches_file() -> PathBuf {
    PathBuf::from("consolidated_matches.csv")
}

fn default_non_matches_file() -> PathBuf {
    PathBuf::from("consolidated_non_matches.csv")
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("GBOOKS_ZOTERO").separator("__"))
        .build()?;

    settings.try_deserialize()
}

/// Look for a config file in the working directory, then the platform
/// config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("gbooks-zotero.toml");
    if local.exists() {
        return Some(local);
    }

    let in_config_dir = dirs::config_dir()?.join("gbooks-zotero").join("config.toml");
    in_config_dir.exists().then_some(in_config_dir)
}
