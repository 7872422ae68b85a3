//! The Zotero CSV record schema.
//!
//! The header list mirrors Zotero's CSV export column set and must stay
//! byte-for-byte stable: downstream conversion tooling matches on the
//! exact column names.

/// Column headers of the Zotero CSV export, in order
pub const CSV_HEADERS: [&str; 87] = [
    "Key",
    "Item Type",
    "Publication Year",
    "Author",
    "Title",
    "Publication Title",
    "ISBN",
    "ISSN",
    "DOI",
    "Url",
    "Abstract Note",
    "Date",
    "Date Added",
    "Date Modified",
    "Access Date",
    "Pages",
    "Num Pages",
    "Issue",
    "Volume",
    "Number Of Volumes",
    "Journal Abbreviation",
    "Short Title",
    "Series",
    "Series Number",
    "Series Text",
    "Series Title",
    "Publisher",
    "Place",
    "Language",
    "Rights",
    "Type",
    "Archive",
    "Archive Location",
    "Library Catalog",
    "Call Number",
    "Extra",
    "Notes",
    "File Attachments",
    "Link Attachments",
    "Manual Tags",
    "Automatic Tags",
    "Editor",
    "Series Editor",
    "Translator",
    "Contributor",
    "Attorney Agent",
    "Book Author",
    "Cast Member",
    "Commenter",
    "Composer",
    "Cosponsor",
    "Counsel",
    "Interviewer",
    "Producer",
    "Recipient",
    "Reviewed Author",
    "Scriptwriter",
    "Words By",
    "Guest",
    "Number",
    "Edition",
    "Running Time",
    "Scale",
    "Medium",
    "Artwork Size",
    "Filing Date",
    "Application Number",
    "Assignee",
    "Issuing Authority",
    "Country",
    "Meeting Name",
    "Conference Name",
    "Court",
    "References",
    "Reporter",
    "Legal Status",
    "Priority Numbers",
    "Programming Language",
    "Version",
    "System",
    "Code",
    "Code Number",
    "Section",
    "Session",
    "Committee",
    "History",
    "Legislative Body",
];

/// One mapped bibliographic record.
///
/// Only the columns this pipeline actually populates are modeled;
/// [`ZoteroRecord::to_row`] emits the full column set with every
/// unmapped column empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoteroRecord {
    pub item_type: String,
    pub publication_year: String,
    pub author: String,
    pub title: String,
    pub isbn: String,
    pub url: String,
    pub date: String,
    pub date_added: String,
    pub date_modified: String,
    pub num_pages: String,
    pub publisher: String,
    pub language: String,
    pub archive: String,
    pub extra: String,
    pub notes: String,
    pub file_attachments: String,
}

impl ZoteroRecord {
    /// Emit the record as a full CSV row aligned with [`CSV_HEADERS`]
    pub fn to_row(&self) -> Vec<String> {
        CSV_HEADERS
            .iter()
            .map(|&column| match column {
                "Item Type" => self.item_type.clone(),
                "Publication Year" => self.publication_year.clone(),
                "Author" => self.author.clone(),
                "Title" => self.title.clone(),
                "ISBN" => self.isbn.clone(),
                "Url" => self.url.clone(),
                "Date" => self.date.clone(),
                "Date Added" => self.date_added.clone(),
                "Date Modified" => self.date_modified.clone(),
                "Num Pages" => self.num_pages.clone(),
                "Publisher" => self.publisher.clone(),
                "Language" => self.language.clone(),
                "Archive" => self.archive.clone(),
                "Extra" => self.extra.clone(),
                "Notes" => self.notes.clone(),
                "File Attachments" => self.file_attachments.clone(),
                _ => String::new(),
            })
            .collect()
    }
}
