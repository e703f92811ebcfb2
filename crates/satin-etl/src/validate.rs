//! The validate operation.
//!
//! Inputs are checked before anything is written: a missing dataset or
//! reference directory aborts the run with the output path untouched.

use std::path::PathBuf;

use satin_core::{Classification, DatasetRecord, FormatRules, Result, Validity};

use crate::dataset::load_dataset;
use crate::reference::ReferenceIndex;
use crate::report::write_invalid;

/// Everything one validation run needs, built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Dataset file with ISRCs in the first column.
    pub dataset_path: PathBuf,
    /// Destination for invalid ISRCs, truncated on each run.
    pub output_path: PathBuf,
    /// Directory expected to hold one `<ISRC>.*` file per valid ISRC.
    pub reference_dir: Option<PathBuf>,
    pub rules: FormatRules,
}

impl ValidationOptions {
    #[must_use]
    pub fn new(dataset_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            output_path: output_path.into(),
            reference_dir: None,
            rules: FormatRules::default(),
        }
    }

    #[must_use]
    pub fn with_reference_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reference_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: FormatRules) -> Self {
        self.rules = rules;
        self
    }
}

/// The full classification list produced by [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub classifications: Vec<Classification>,
    /// Number of lines written to the invalid-ISRC output.
    pub invalid_written: usize,
}

impl ValidationReport {
    pub fn valid(&self) -> impl Iterator<Item = &Classification> {
        self.classifications.iter().filter(|c| c.validity.is_valid())
    }

    pub fn invalid(&self) -> impl Iterator<Item = &Classification> {
        self.classifications.iter().filter(|c| c.is_invalid())
    }

    /// The underlying dataset rows, in file order.
    pub fn records(&self) -> impl Iterator<Item = &DatasetRecord> {
        self.classifications.iter().map(|c| &c.record)
    }
}

/// Classify records on format, then against the reference index if given.
#[must_use]
pub fn classify(
    records: Vec<DatasetRecord>,
    rules: FormatRules,
    reference: Option<&ReferenceIndex>,
) -> Vec<Classification> {
    records
        .into_iter()
        .map(|record| {
            let mut classification = Classification::from_format(record, rules);

            let missing = match (reference, &classification.validity) {
                (Some(index), Validity::Valid(isrc)) if !index.contains(isrc) => Some(isrc.clone()),
                _ => None,
            };
            if let Some(isrc) = missing {
                classification.validity = Validity::MissingFile(isrc);
            }

            let record = &classification.record;
            match &classification.validity {
                Validity::Valid(_) => {}
                Validity::InvalidFormat(violation) => log::debug!(
                    "Line {}: {} ISRC {:?}: {}",
                    record.line,
                    classification.validity.label(),
                    record.isrc,
                    violation
                ),
                Validity::MissingFile(_) => log::debug!(
                    "Line {}: {} ISRC {:?}: no reference file",
                    record.line,
                    classification.validity.label(),
                    record.isrc
                ),
            }

            classification
        })
        .collect()
}

/// Validate a dataset and write its invalid ISRCs to the output path.
///
/// Individual bad records are data, not errors. Fails with `NotFound` for a
/// missing dataset or reference directory, `MalformedRow` for an
/// undecodable row, and `Write` when the output cannot be written.
pub fn validate(options: &ValidationOptions) -> Result<ValidationReport> {
    log::info!("Validating ISRCs in {}", options.dataset_path.display());

    let records = load_dataset(&options.dataset_path)?;
    let reference = options
        .reference_dir
        .as_deref()
        .map(ReferenceIndex::scan)
        .transpose()?;

    let classifications = classify(records, options.rules, reference.as_ref());
    let invalid_written = write_invalid(&options.output_path, &classifications)?;

    log::info!(
        "Validated {} records: {} invalid ISRCs written to {}",
        classifications.len(),
        invalid_written,
        options.output_path.display()
    );

    Ok(ValidationReport {
        classifications,
        invalid_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use satin_core::FormatViolation;
    use std::fs;
    use tempfile::TempDir;

    fn records(rows: &[&str]) -> Vec<DatasetRecord> {
        crate::dataset::read_records(rows.join("\n").as_bytes()).unwrap()
    }

    #[test]
    fn test_classify_without_reference() {
        let out = classify(
            records(&["USWB11200587,Pop", "XX1,Rock"]),
            FormatRules::default(),
            None,
        );
        assert!(out[0].validity.is_valid());
        assert_eq!(
            out[1].validity,
            Validity::InvalidFormat(FormatViolation::Length { actual: 3 })
        );
    }

    #[test]
    fn test_classify_with_reference() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("USWB11200587.mp3"), b"").unwrap();
        let index = ReferenceIndex::scan(temp_dir.path()).unwrap();

        let out = classify(
            records(&["USWB11200587,Pop", "FRX123456789,Jazz", "XX1,Rock"]),
            FormatRules::default(),
            Some(&index),
        );

        assert!(out[0].validity.is_valid());
        assert!(matches!(out[1].validity, Validity::MissingFile(_)));
        assert!(out[1].validity.is_format_valid());
        // Format failures are not re-checked against the directory.
        assert!(matches!(out[2].validity, Validity::InvalidFormat(_)));
    }

    #[test]
    fn test_validate_writes_invalid_list() {
        let temp_dir = TempDir::new().unwrap();
        let dataset = temp_dir.path().join("SATIN.csv");
        let output = temp_dir.path().join("ISRC_invalid.txt");
        fs::write(&dataset, "USWB11200587,Pop\nXX1,Rock\nFRX123456789,Jazz\n").unwrap();

        let report = validate(&ValidationOptions::new(&dataset, &output)).unwrap();

        assert_eq!(report.classifications.len(), 3);
        assert_eq!(report.invalid_written, 1);
        assert_eq!(report.valid().count(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "XX1\n");
    }

    #[test]
    fn test_validate_missing_dataset_leaves_output_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("ISRC_invalid.txt");
        let options = ValidationOptions::new(temp_dir.path().join("missing.csv"), &output);

        let err = validate(&options).unwrap_err();
        assert!(err.is_not_found());
        assert!(!output.exists());
    }

    #[test]
    fn test_validate_missing_reference_dir_leaves_output_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let dataset = temp_dir.path().join("SATIN.csv");
        let output = temp_dir.path().join("ISRC_invalid.txt");
        fs::write(&dataset, "USWB11200587,Pop\n").unwrap();
        fs::write(&output, "previous run\n").unwrap();

        let options = ValidationOptions::new(&dataset, &output)
            .with_reference_dir(temp_dir.path().join("audio"));

        let err = validate(&options).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous run\n");
    }
}
