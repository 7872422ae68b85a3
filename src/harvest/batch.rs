//! Batch orchestration over an author list.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::error::HarvestError;
use crate::harvest::Paginator;
use crate::models::{AuthorQuery, ConsolidatedResult};

/// Suffix shared by all per-author artifacts
const ARTIFACT_SUFFIX: &str = "CONSOLIDATED.json";

/// Name of the aggregate summary artifact
const SUMMARY_FILE: &str = "_processing_summary.json";

/// Processing outcome for one author
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorOutcome {
    /// Display name as queried
    pub author_label: String,

    /// VIAF identifier, or the positional placeholder when unknown
    pub viaf: String,

    /// Date of death, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,

    /// Artifact file name this author's result was written to
    pub output_file: String,

    /// Advertised total from the first page
    pub total_queried: u32,

    /// Items actually fetched
    pub total_fetched: usize,

    /// Page requests issued, rescue included
    pub requests_made: u32,

    /// Persistence failure, if the artifact could not be written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Snapshot of the pacing configuration a run executed with
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub page_size: u32,
    pub page_delay_ms: u64,
    pub author_delay_secs: u64,
}

/// Aggregate summary of one batch run, persisted alongside the artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// When the run started (RFC 3339)
    pub run_timestamp: String,

    /// Number of authors in the input list
    pub total_authors_queried: usize,

    /// Per-author outcomes, in processing order
    pub authors_processed: Vec<AuthorOutcome>,

    /// Pacing configuration of the run
    pub config: RunConfig,
}

impl RunSummary {
    /// Authors whose harvest yielded at least one item
    pub fn authors_with_results(&self) -> usize {
        self.authors_processed
            .iter()
            .filter(|a| a.total_fetched > 0)
            .count()
    }

    /// Total items fetched across all authors
    pub fn total_items_fetched(&self) -> usize {
        self.authors_processed.iter().map(|a| a.total_fetched).sum()
    }

    /// Authors whose artifact could not be persisted
    pub fn persistence_failures(&self) -> usize {
        self.authors_processed
            .iter()
            .filter(|a| a.error.is_some())
            .count()
    }
}

/// Sequentially harvests every author in a list and persists one
/// artifact per author plus a run log and an aggregate summary.
#[derive(Debug)]
pub struct BatchRunner {
    paginator: Paginator,
    config: RunConfig,
}

impl BatchRunner {
    /// Create a runner around a configured paginator
    pub fn new(paginator: Paginator, config: RunConfig) -> Self {
        Self { paginator, config }
    }

    /// Process the whole author list, in order.
    ///
    /// One author's persistence failure is recorded on its outcome and
    /// does not stop the batch. Returns the summary that was also
    /// written to `_processing_summary.json`.
    pub async fn run(
        &self,
        authors: &[AuthorQuery],
        out_dir: &Path,
    ) -> Result<RunSummary, HarvestError> {
        std::fs::create_dir_all(out_dir)?;

        let started = Local::now();
        let log_path = out_dir.join(format!("run_log_{}.txt", started.format("%Y%m%d_%H%M%S")));

        let mut summary = RunSummary {
            run_timestamp: started.to_rfc3339(),
            total_authors_queried: authors.len(),
            authors_processed: Vec::with_capacity(authors.len()),
            config: self.config.clone(),
        };

        tracing::info!(authors = authors.len(), out_dir = %out_dir.display(), "starting batch");

        for (idx, author) in authors.iter().enumerate() {
            tracing::info!(
                author = %author.name,
                position = idx + 1,
                total = authors.len(),
                "processing author"
            );

            let result = self.paginator.fetch_all(author).await;
            let file_name = artifact_file_name(author, idx);

            let error = match persist_result(&result, &out_dir.join(&file_name)) {
                Ok(()) => {
                    tracing::info!(file = %file_name, "saved consolidated artifact");
                    None
                }
                Err(err) => {
                    tracing::warn!(file = %file_name, error = %err, "failed to save artifact");
                    Some(err.to_string())
                }
            };

            summary.authors_processed.push(AuthorOutcome {
                author_label: author.name.clone(),
                viaf: viaf_or_placeholder(author, idx),
                death_date: author.death_date.clone(),
                output_file: file_name.clone(),
                total_queried: result.queried_total,
                total_fetched: result.fetched_total,
                requests_made: result.request_count,
                error,
            });

            if let Err(err) = append_log_line(&log_path, &author.name, result.fetched_total, &file_name)
            {
                tracing::warn!(error = %err, "failed to append run log line");
            }

            if idx + 1 < authors.len() {
                tokio::time::sleep(Duration::from_secs(self.config.author_delay_secs)).await;
            }
        }

        if let Err(err) = persist_summary(&summary, &out_dir.join(SUMMARY_FILE)) {
            tracing::warn!(error = %err, "failed to save run summary");
        }

        tracing::info!(
            processed = summary.authors_processed.len(),
            with_results = summary.authors_with_results(),
            items = summary.total_items_fetched(),
            "batch complete"
        );

        Ok(summary)
    }
}

/// Artifact file name for one author: sanitized name, VIAF (or a
/// positional placeholder) and the shared suffix.
pub fn artifact_file_name(author: &AuthorQuery, idx: usize) -> String {
    format!(
        "{}-{}-{}",
        author.file_stem(),
        viaf_or_placeholder(author, idx),
        ARTIFACT_SUFFIX
    )
}

fn viaf_or_placeholder(author: &AuthorQuery, idx: usize) -> String {
    author
        .viaf
        .clone()
        .unwrap_or_else(|| format!("NO_VIAF_{}", idx))
}

fn persist_result(result: &ConsolidatedResult, path: &Path) -> Result<(), HarvestError> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn persist_summary(summary: &RunSummary, path: &Path) -> Result<(), HarvestError> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn append_log_line(
    path: &Path,
    author_name: &str,
    fetched: usize,
    file_name: &str,
) -> Result<(), HarvestError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(
        file,
        "{} | {} | {} items | {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        author_name,
        fetched,
        file_name
    )?;
    Ok(())
}
