//! Google Books volumes-API client.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::HarvestError;
use crate::models::Volume;

/// Base URL for the Google Books API
const GOOGLE_BOOKS_API_BASE: &str = "https://www.googleapis.com/books/v1";

/// One decoded page of search results.
///
/// `advertised_total` is the catalog's own count estimate; it is known
/// to disagree with the payload (see the rescue handling in the
/// pagination controller) and is never trusted for offset arithmetic.
#[derive(Debug, Clone)]
pub struct Page {
    /// Offset this page was requested at
    pub requested_offset: u32,

    /// Page size this page was requested with
    pub requested_limit: u32,

    /// The catalog's `totalItems` estimate for the whole query
    pub advertised_total: u32,

    /// Items returned in this page, in response order
    pub items: Vec<Volume>,
}

/// Client for the volumes search endpoint
///
/// Issues single paginated requests; retry policy belongs to the
/// caller. Requests time out after 30 seconds.
#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleBooksClient {
    /// Create a new client against the public API
    pub fn new(api_key: impl Into<String>) -> Result<Self, HarvestError> {
        Self::with_base_url(api_key, GOOGLE_BOOKS_API_BASE)
    }

    /// Create a client against a custom endpoint (for testing)
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, HarvestError> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| HarvestError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Build the request URL for one page of an exact-phrase author query
    pub fn volumes_url(&self, author_name: &str, offset: u32, limit: u32) -> String {
        format!(
            "{}/volumes?q=inauthor:\"{}\"&maxResults={}&startIndex={}&key={}",
            self.base_url,
            urlencoding::encode(author_name),
            limit,
            offset,
            self.api_key
        )
    }

    /// Fetch one page of results for an author
    pub async fn fetch(
        &self,
        author_name: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Page, HarvestError> {
        let url = self.volumes_url(author_name, offset, limit);
        tracing::debug!(author = author_name, offset, limit, "requesting volumes page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| HarvestError::Transport(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(HarvestError::Transport(format!(
                "catalog returned status {}",
                response.status()
            )));
        }

        let body: VolumesResponse = response
            .json()
            .await
            .map_err(|e| HarvestError::Parse(format!("failed to decode volumes response: {}", e)))?;

        Ok(Page {
            requested_offset: offset,
            requested_limit: limit,
            advertised_total: body.total_items,
            items: body.items,
        })
    }

    /// Fetch an exact item count at an offset.
    ///
    /// Same wire request as [`fetch`](Self::fetch); exists as the rescue
    /// variant, where the requested size is the advertised total rather
    /// than the configured page size.
    pub async fn fetch_exact(
        &self,
        author_name: &str,
        offset: u32,
        count: u32,
    ) -> Result<Page, HarvestError> {
        self.fetch(author_name, offset, count).await
    }
}

// ===== Volumes API response shape =====

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    #[serde(default)]
    total_items: u32,

    #[serde(default)]
    items: Vec<Volume>,
}
