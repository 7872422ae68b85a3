//! Classification, field mapping and CSV export of harvested volumes.

mod classify;
mod export;
mod mapper;
mod record;
mod writer;

pub use classify::{classify, is_author_match, should_include, Classification};
pub use export::{export_dir, split_result, ExportOutcome};
pub use mapper::{
    extract_isbn, extract_year, format_authors, map_volume, resolve_url, ARCHIVE_NAME,
    JURISDICTION_TAG,
};
pub use record::{ZoteroRecord, CSV_HEADERS};
pub use writer::write_records;
