//! Author identities and the author-list input document.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::HarvestError;

/// One author to harvest: a display name plus optional authority data.
///
/// Immutable input to the pagination controller; embedded verbatim in
/// each consolidated artifact so downstream tools know which name the
/// query was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorQuery {
    /// Display name, exactly as queried against the catalog
    pub name: String,

    /// VIAF authority-file identifier, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viaf: Option<String>,

    /// Date of death, when known (ISO date string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
}

impl AuthorQuery {
    /// Create a query for a bare display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            viaf: None,
            death_date: None,
        }
    }

    /// Set the VIAF identifier
    pub fn viaf(mut self, viaf: impl Into<String>) -> Self {
        self.viaf = Some(viaf.into());
        self
    }

    /// Set the death date
    pub fn death_date(mut self, date: impl Into<String>) -> Self {
        self.death_date = Some(date.into());
        self
    }

    /// Filesystem-safe form of the display name, used in artifact names.
    ///
    /// Whitespace runs become single underscores; path separators and
    /// other characters that are unsafe in file names are dropped.
    pub fn file_stem(&self) -> String {
        let mut stem = String::with_capacity(self.name.len());
        let mut last_was_space = false;
        for c in self.name.chars() {
            if c.is_whitespace() {
                if !last_was_space && !stem.is_empty() {
                    stem.push('_');
                }
                last_was_space = true;
            } else if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0') {
                last_was_space = false;
            } else {
                stem.push(c);
                last_was_space = false;
            }
        }
        stem.trim_end_matches('_').to_string()
    }
}

// ===== Author list input document (Wikidata SPARQL JSON results) =====

#[derive(Debug, Deserialize)]
struct AuthorDocument {
    results: AuthorResults,
}

#[derive(Debug, Deserialize)]
struct AuthorResults {
    bindings: Vec<AuthorBinding>,
}

#[derive(Debug, Deserialize)]
struct AuthorBinding {
    #[serde(rename = "authorLabel")]
    author_label: Option<BoundValue>,
    viaf: Option<BoundValue>,
    date_of_death: Option<BoundValue>,
}

#[derive(Debug, Deserialize)]
struct BoundValue {
    value: String,
}

/// Parse an author-list document (SPARQL SELECT results in JSON form).
///
/// Bindings without a display name are skipped with a warning; the rest
/// keep their input order.
pub fn parse_author_list(raw: &str) -> Result<Vec<AuthorQuery>, HarvestError> {
    let doc: AuthorDocument = serde_json::from_str(raw)?;

    let mut authors = Vec::with_capacity(doc.results.bindings.len());
    for (idx, binding) in doc.results.bindings.into_iter().enumerate() {
        let Some(label) = binding.author_label else {
            tracing::warn!(index = idx, "skipping author binding without a display name");
            continue;
        };
        authors.push(AuthorQuery {
            name: label.value,
            viaf: binding.viaf.map(|v| v.value),
            death_date: binding.date_of_death.map(|v| v.value),
        });
    }

    Ok(authors)
}

/// Load and parse an author-list document from disk
pub fn load_author_list(path: &Path) -> Result<Vec<AuthorQuery>, HarvestError> {
    let raw = std::fs::read_to_string(path)?;
    parse_author_list(&raw)
}
