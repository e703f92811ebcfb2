//! Dataset file reader.
//!
//! SATIN files are comma-delimited, headerless, one record per line, with
//! the ISRC in the first column. Rows may have any number of columns.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use satin_core::{DatasetRecord, Error, Result};

/// Parse records from any reader.
///
/// Fields are split on every comma, trimmed, and blank lines skipped.
/// Quotes carry no meaning, so a stray `"` stays inside its field. A row
/// that cannot be decoded aborts the whole read.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<DatasetRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row.map_err(malformed)?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        if row.iter().all(str::is_empty) {
            log::debug!("Skipping blank row at line {}", line);
            continue;
        }

        let mut columns = row.iter();
        let isrc = columns.next().unwrap_or_default();
        let fields = columns.map(str::to_string).collect();
        records.push(DatasetRecord::new(line, isrc, fields));
    }

    Ok(records)
}

/// Open and parse a dataset file.
pub fn load_dataset(path: &Path) -> Result<Vec<DatasetRecord>> {
    if !path.is_file() {
        return Err(Error::NotFound {
            what: "dataset file",
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(file)?;
    log::debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

fn malformed(err: csv::Error) -> Error {
    let line = err.position().map(|p| p.line()).unwrap_or_default();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => Error::Io(source),
        csv::ErrorKind::Utf8 { err, .. } => Error::MalformedRow {
            line,
            message: format!("invalid UTF-8: {err}"),
        },
        other => Error::MalformedRow {
            line,
            message: format!("{other:?}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_records_basic() {
        let data = "USWB11200587,Pop\nXX1,Rock\nFRX123456789,Jazz\n";
        let records = read_records(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].isrc, "USWB11200587");
        assert_eq!(records[0].genre(), Some("Pop"));
        assert_eq!(records[1].isrc, "XX1");
        assert_eq!(records[2].line, 3);
    }

    #[test]
    fn test_read_records_trims_and_skips_blank_lines() {
        let data = "  USWB11200587 , Artist , Hip_Hop \r\n\n   \nFRX123456789\n";
        let records = read_records(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].isrc, "USWB11200587");
        assert_eq!(records[0].fields, vec!["Artist", "Hip_Hop"]);
        assert_eq!(records[1].isrc, "FRX123456789");
        assert!(records[1].fields.is_empty());
    }

    #[test]
    fn test_read_records_unmatched_quote_stays_in_field() {
        let data = "USWB11200587,\"Pop\nXX1,Rock\nFRX123456789,Jazz\n";
        let records = read_records(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].genre(), Some("\"Pop"));
        assert_eq!(records[1].isrc, "XX1");
        assert_eq!(records[2].isrc, "FRX123456789");
    }

    #[test]
    fn test_read_records_does_not_unquote_commas() {
        let records = read_records("\"USWB11200587,Artist\",Pop\n".as_bytes()).unwrap();
        assert_eq!(records[0].isrc, "\"USWB11200587");
        assert_eq!(records[0].fields, vec!["Artist\"", "Pop"]);
    }

    #[test]
    fn test_read_records_keeps_empty_isrc_as_data() {
        let records = read_records(",Pop\n".as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].isrc, "");
        assert_eq!(records[0].genre(), Some("Pop"));
    }

    #[test]
    fn test_read_records_rejects_invalid_utf8() {
        let data: &[u8] = b"USWB11200587,Pop\nFRX12345\xff789,Jazz\n";
        let err = read_records(data).unwrap_err();
        match err {
            Error::MalformedRow { line, .. } => assert_eq!(line, 2),
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_dataset(&temp_dir.path().join("SATIN.csv")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_dataset_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("SATIN.csv");
        std::fs::write(&path, "USWB11200587,Pop\n").unwrap();

        let records = load_dataset(&path).unwrap();
        assert_eq!(records.len(), 1);
    }
}
