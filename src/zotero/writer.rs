//! CSV output for mapped records.

use std::path::Path;

use crate::error::HarvestError;
use crate::zotero::{ZoteroRecord, CSV_HEADERS};

/// Write records to a CSV file with the fixed header row.
///
/// Every field is quoted; Zotero's importer is the picky consumer here.
pub fn write_records(path: &Path, records: &[ZoteroRecord]) -> Result<(), HarvestError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_path(path)?;

    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_records_quotes_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let record = ZoteroRecord {
            item_type: "book".into(),
            title: "Título, con coma".into(),
            ..Default::default()
        };
        write_records(&path, &[record]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("\"Key\",\"Item Type\",\"Publication Year\""));
        assert!(header.ends_with("\"History\",\"Legislative Body\""));

        let row = lines.next().unwrap();
        assert!(row.contains("\"book\""));
        assert!(row.contains("\"Título, con coma\""));
        // Empty columns are quoted too.
        assert!(row.starts_with("\"\",\"book\""));
    }

    #[test]
    fn test_write_records_header_only_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_records(&path, &[]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 1);
    }
}
