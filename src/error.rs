//! Crate-wide error taxonomy.
//!
//! Absent or malformed fields inside a fetched volume are not errors at
//! all: the [`crate::models::Volume`] tree models them as `Option`s and
//! the mapper substitutes empty defaults.

/// Errors produced while harvesting or exporting
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    /// Missing or invalid process configuration (e.g. no API key)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network failure or non-success HTTP status
    #[error("transport error: {0}")]
    Transport(String),

    /// Response or document body could not be decoded
    #[error("parse error: {0}")]
    Parse(String),

    /// Artifact or CSV write failure
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl From<reqwest::Error> for HarvestError {
    fn from(err: reqwest::Error) -> Self {
        HarvestError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for HarvestError {
    fn from(err: serde_json::Error) -> Self {
        HarvestError::Parse(format!("JSON: {}", err))
    }
}

impl From<std::io::Error> for HarvestError {
    fn from(err: std::io::Error) -> Self {
        HarvestError::Persistence(err.to_string())
    }
}

impl From<csv::Error> for HarvestError {
    fn from(err: csv::Error) -> Self {
        HarvestError::Persistence(format!("CSV: {}", err))
    }
}
