//! Export consolidated artifacts into the matches / non-matches CSVs.

use chrono::Local;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::HarvestError;
use crate::models::ConsolidatedResult;
use crate::zotero::{classify, map_volume, write_records, Classification, ZoteroRecord};

/// Aggregate outcome of one export run
#[derive(Debug, Clone, Default)]
pub struct ExportOutcome {
    /// Records whose author list contains the target author
    pub matches: usize,

    /// Included records without the target author
    pub non_matches: usize,

    /// Records that failed the inclusion predicate
    pub excluded: usize,

    /// Artifact files successfully processed
    pub files_processed: usize,

    /// Target authors seen, in processing order
    pub authors: Vec<String>,
}

/// Classify and map every item of one consolidated result.
///
/// Returns the mapped matches, the mapped non-matches and the count of
/// excluded items.
pub fn split_result(
    result: &ConsolidatedResult,
    timestamp: &str,
) -> (Vec<ZoteroRecord>, Vec<ZoteroRecord>, usize) {
    let target_author = target_author(result);

    let mut matches = Vec::new();
    let mut non_matches = Vec::new();
    let mut excluded = 0usize;

    for item in &result.items {
        match classify(item, &target_author) {
            Classification::Excluded => excluded += 1,
            Classification::Matched => matches.push(map_volume(item, timestamp)),
            Classification::NotMatched => non_matches.push(map_volume(item, timestamp)),
        }
    }

    (matches, non_matches, excluded)
}

/// Export every artifact in a directory into two consolidated CSVs.
///
/// Files with an `_` prefix (the run summary) and non-JSON files (the
/// run log) are skipped. An unreadable artifact is logged and skipped;
/// the export continues with the rest.
pub fn export_dir(
    input_dir: &Path,
    matches_path: &Path,
    non_matches_path: &Path,
) -> Result<ExportOutcome, HarvestError> {
    let mut artifact_paths: Vec<_> = std::fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            name.ends_with(".json") && !name.starts_with('_')
        })
        .collect();
    artifact_paths.sort();

    tracing::info!(
        files = artifact_paths.len(),
        dir = %input_dir.display(),
        "exporting artifacts"
    );

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut outcome = ExportOutcome::default();
    let mut all_matches = Vec::new();
    let mut all_non_matches = Vec::new();

    for path in &artifact_paths {
        let result: ConsolidatedResult = match std::fs::read_to_string(path)
            .map_err(HarvestError::from)
            .and_then(|raw| serde_json::from_str(&raw).map_err(HarvestError::from))
        {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(file = %path.display(), error = %err, "skipping unreadable artifact");
                continue;
            }
        };

        let author = target_author(&result);
        let (matches, non_matches, excluded) = split_result(&result, &timestamp);

        tracing::info!(
            file = %path.display(),
            author = %author,
            matches = matches.len(),
            non_matches = non_matches.len(),
            excluded,
            "processed artifact"
        );

        outcome.matches += matches.len();
        outcome.non_matches += non_matches.len();
        outcome.excluded += excluded;
        outcome.files_processed += 1;
        if !author.is_empty() {
            outcome.authors.push(author);
        }

        all_matches.extend(matches);
        all_non_matches.extend(non_matches);
    }

    write_records(matches_path, &all_matches)?;
    write_records(non_matches_path, &all_non_matches)?;

    tracing::info!(
        matches = outcome.matches,
        non_matches = outcome.non_matches,
        excluded = outcome.excluded,
        "export complete"
    );

    Ok(outcome)
}

/// The author name the artifact's items should be matched against.
///
/// Artifacts carry the author they were harvested for; older ones may
/// not, in which case the name is recovered from the exact-phrase
/// author filter of the first request URL.
fn target_author(result: &ConsolidatedResult) -> String {
    if !result.author.name.is_empty() {
        return result.author.name.clone();
    }
    result
        .request_urls
        .first()
        .or(Some(&result.first_request_url))
        .and_then(|url| author_from_url(url))
        .unwrap_or_default()
}

/// Extract the percent-decoded author phrase from a request URL
fn author_from_url(url: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"inauthor:"([^"]+)""#).expect("invalid author regex"));

    let encoded = re.captures(url)?.get(1)?.as_str();
    urlencoding::decode(encoded).ok().map(|s| s.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthorQuery;

    fn result_with_items(author_name: &str, items_json: &str) -> ConsolidatedResult {
        ConsolidatedResult {
            author: AuthorQuery::new(author_name),
            first_request_url: String::new(),
            request_urls: vec![],
            queried_total: 0,
            fetched_total: 0,
            request_count: 1,
            page_size: 20,
            items: serde_json::from_str(items_json).unwrap(),
        }
    }

    #[test]
    fn test_author_from_url() {
        let url = "https://www.googleapis.com/books/v1/volumes?q=inauthor:\"Francisco%20de%20Miranda\"&maxResults=20&startIndex=0&key=K";
        assert_eq!(author_from_url(url).as_deref(), Some("Francisco de Miranda"));
        assert_eq!(author_from_url("https://example.com/?q=test"), None);
    }

    #[test]
    fn test_target_author_falls_back_to_url() {
        let mut result = result_with_items("", "[]");
        result.request_urls =
            vec!["https://x/volumes?q=inauthor:\"Sim%C3%B3n%20Rodr%C3%ADguez\"&key=K".into()];
        assert_eq!(target_author(&result), "Simón Rodríguez");
    }

    #[test]
    fn test_split_result_partitions() {
        let result = result_with_items(
            "Rómulo Gallegos",
            r#"[
                {
                    "volumeInfo": {"title": "Doña Bárbara", "authors": ["Rómulo Gallegos"]},
                    "saleInfo": {"saleability": "FREE"}
                },
                {
                    "volumeInfo": {"title": "Antología", "authors": ["Otra Persona"]},
                    "saleInfo": {"saleability": "FREE"}
                },
                {
                    "volumeInfo": {"title": "De pago", "authors": ["Rómulo Gallegos"]},
                    "saleInfo": {"saleability": "FOR_SALE"}
                }
            ]"#,
        );

        let (matches, non_matches, excluded) = split_result(&result, "2025-01-01 00:00:00");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Doña Bárbara");
        assert_eq!(non_matches.len(), 1);
        assert_eq!(excluded, 1);
    }
}
