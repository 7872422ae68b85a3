//! # gbooks-zotero
//!
//! Harvest Google Books metadata for a list of authors and export the
//! results as Zotero-compatible CSV.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (AuthorQuery, Volume, ConsolidatedResult)
//! - [`source`]: The Google Books volumes-API client
//! - [`harvest`]: Per-author pagination and batch orchestration
//! - [`zotero`]: Classification, field mapping and CSV export
//! - [`config`]: Configuration management
//! - [`utils`]: Text cleanup helpers

pub mod config;
pub mod error;
pub mod harvest;
pub mod models;
pub mod source;
pub mod utils;
pub mod zotero;

// Re-export commonly used types
pub use error::HarvestError;
pub use models::{AuthorQuery, ConsolidatedResult, Volume};
pub use source::GoogleBooksClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
