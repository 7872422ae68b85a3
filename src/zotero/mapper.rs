//! Field mapping from a fetched volume onto the Zotero record schema.
//!
//! Stateless transformations only; the caller supplies the run
//! timestamp so mapping the same volume twice yields the same record.

use crate::models::{IndustryIdentifier, Volume};
use crate::utils::{clean_description, title_slug};
use crate::zotero::ZoteroRecord;

/// Archive constant identifying the source service
pub const ARCHIVE_NAME: &str = "Google Books";

/// Jurisdiction tag stamped into the Extra column
pub const JURISDICTION_TAG: &str = "Venezuela";

/// Host template for synthesized download URLs
const DOWNLOAD_URL_BASE: &str = "https://books.google.com/books/download";

/// Map one volume onto a Zotero record.
///
/// `timestamp` (formatted `YYYY-MM-DD HH:MM:SS`) lands in the
/// Date Added / Date Modified columns.
pub fn map_volume(volume: &Volume, timestamp: &str) -> ZoteroRecord {
    let info = &volume.volume_info;

    let title = info.title.clone().unwrap_or_default();
    let full_title = match info.subtitle.as_deref() {
        Some(subtitle) if !subtitle.is_empty() => format!("{}: {}", title, subtitle),
        _ => title,
    };

    let year = extract_year(info.published_date.as_deref().unwrap_or_default());

    ZoteroRecord {
        item_type: "book".to_string(),
        publication_year: year.clone(),
        author: format_authors(&info.authors),
        title: full_title,
        isbn: extract_isbn(&info.industry_identifiers),
        url: resolve_url(volume),
        date: year,
        date_added: timestamp.to_string(),
        date_modified: timestamp.to_string(),
        num_pages: info.page_count.map(|n| n.to_string()).unwrap_or_default(),
        publisher: info.publisher.clone().unwrap_or_default(),
        language: info.language.clone().unwrap_or_default(),
        archive: ARCHIVE_NAME.to_string(),
        extra: JURISDICTION_TAG.to_string(),
        notes: clean_description(info.description.as_deref().unwrap_or_default()),
        file_attachments: info
            .image_links
            .as_ref()
            .and_then(|links| links.best())
            .unwrap_or_default()
            .to_string(),
    }
}

/// Reorder author names to "Surname, Given Names", joined with "; ".
///
/// A name that already contains a comma is assumed pre-formatted and
/// passes through unchanged; otherwise the last whitespace-delimited
/// token is the surname. Single-token names pass through as-is.
pub fn format_authors(authors: &[String]) -> String {
    authors
        .iter()
        .map(|name| reorder_name(name))
        .collect::<Vec<_>>()
        .join("; ")
}

fn reorder_name(name: &str) -> String {
    if name.contains(',') {
        return name.to_string();
    }
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.split_last() {
        Some((surname, given)) if !given.is_empty() => {
            format!("{}, {}", surname, given.join(" "))
        }
        _ => name.to_string(),
    }
}

/// Extract the publication year: the segment before the first hyphen,
/// kept only when it is exactly four ASCII digits.
pub fn extract_year(published_date: &str) -> String {
    let year = published_date.split('-').next().unwrap_or_default();
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        year.to_string()
    } else {
        String::new()
    }
}

/// Pick an ISBN: prefer the 13-digit identifier, fall back to the
/// 10-digit one, empty when neither is present.
pub fn extract_isbn(identifiers: &[IndustryIdentifier]) -> String {
    let mut isbn_13 = None;
    let mut isbn_10 = None;

    for id in identifiers {
        match id.kind.as_str() {
            "ISBN_13" => isbn_13 = Some(id.identifier.clone()),
            "ISBN_10" => isbn_10 = Some(id.identifier.clone()),
            _ => {}
        }
    }

    isbn_13.or(isbn_10).unwrap_or_default()
}

/// Resolve the record URL for an included volume.
///
/// Priority: the advertised PDF download link verbatim; for FREE volumes
/// without one, a synthesized download URL from the title slug and the
/// catalog id (falling back to the buy link, then the info link, when
/// either piece is missing); otherwise the info link.
pub fn resolve_url(volume: &Volume) -> String {
    if let Some(pdf) = volume.pdf() {
        if pdf.is_available {
            if let Some(link) = &pdf.download_link {
                return link.clone();
            }
        }
    }

    let info = &volume.volume_info;
    let info_link = || info.info_link.clone().unwrap_or_default();

    if volume.saleability() == "FREE" {
        let slug = title_slug(info.title.as_deref().unwrap_or_default());
        let id = volume.id.as_deref().unwrap_or_default();

        if !slug.is_empty() && !id.is_empty() {
            return format!("{}/{}.pdf?id={}&output=pdf", DOWNLOAD_URL_BASE, slug, id);
        }

        return volume
            .sale_info
            .as_ref()
            .and_then(|s| s.buy_link.clone())
            .unwrap_or_else(info_link);
    }

    info_link()
}
