//! Inclusion and author-match classification for fetched volumes.
//!
//! Both predicates are pure functions over a [`Volume`]; no state, no
//! network.

use serde::{Deserialize, Serialize};

use crate::models::Volume;

/// Classification of one fetched volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Fails the inclusion predicate; never mapped
    Excluded,

    /// Included, and the target author appears verbatim in the authors list
    Matched,

    /// Included, but the target author does not appear
    NotMatched,
}

/// Inclusion predicate: a volume is kept when it has a downloadable PDF
/// (availability flag set and a link present) or when its licensing
/// status is FREE.
pub fn should_include(volume: &Volume) -> bool {
    volume.has_downloadable_pdf() || volume.saleability() == "FREE"
}

/// Match predicate: the target author's name appears verbatim in the
/// volume's authors list. Co-authored volumes still match as long as the
/// target name is present. An empty target matches everything.
pub fn is_author_match(volume: &Volume, target_author: &str) -> bool {
    if target_author.is_empty() {
        return true;
    }
    volume
        .volume_info
        .authors
        .iter()
        .any(|a| a == target_author)
}

/// Classify one volume against a target author
pub fn classify(volume: &Volume, target_author: &str) -> Classification {
    if !should_include(volume) {
        Classification::Excluded
    } else if is_author_match(volume, target_author) {
        Classification::Matched
    } else {
        Classification::NotMatched
    }
}
