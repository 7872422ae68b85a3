//! The per-author consolidated harvest artifact.

use serde::{Deserialize, Serialize};

use crate::models::{AuthorQuery, Volume};

/// Everything fetched for one author, across all pages, as persisted to
/// the per-author JSON artifact.
///
/// Built incrementally by the pagination controller and immutable once
/// returned. `request_count` counts every request issued, including the
/// rescue attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedResult {
    /// The author this result was fetched for
    pub author: AuthorQuery,

    /// URL of the very first page request
    pub first_request_url: String,

    /// Every request URL issued, in order, rescue included
    pub request_urls: Vec<String>,

    /// The advertised total from the first page. The catalog's own
    /// estimate; unreliable, recorded for reporting only.
    pub queried_total: u32,

    /// Number of items actually accumulated
    pub fetched_total: usize,

    /// Number of page requests issued, rescue included
    pub request_count: u32,

    /// Page size the pagination ran with
    pub page_size: u32,

    /// All accepted items, in fetch order
    pub items: Vec<Volume>,
}

impl ConsolidatedResult {
    /// True when the harvest yielded at least one item
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}
