//! Dataset statistics for plotting collaborators.
//!
//! Aggregation is pure: it reads a classification list and returns counts.
//! Only format-valid records (including those missing from the reference
//! directory) contribute to the country and year maps; invalid-format
//! records appear in the totals alone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Classification, DatasetRecord, Validity};

/// Validity totals over a whole dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub total: usize,
    pub valid: usize,
    pub invalid_format: usize,
    pub missing_file: usize,
}

impl Totals {
    /// Records that ended up in the invalid list, for either reason.
    #[must_use]
    pub const fn invalid(&self) -> usize {
        self.invalid_format + self.missing_file
    }

    /// Fraction of records classified valid, `0.0` for an empty dataset.
    #[must_use]
    pub fn validity_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.valid as f64 / self.total as f64
        }
    }
}

/// Aggregated counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    countries: BTreeMap<String, usize>,
    years: BTreeMap<u8, usize>,
    totals: Totals,
}

impl DatasetStatistics {
    /// Records per country code (uppercased).
    #[must_use]
    pub fn countries(&self) -> &BTreeMap<String, usize> {
        &self.countries
    }

    /// Records per two-digit year segment.
    #[must_use]
    pub fn years(&self) -> &BTreeMap<u8, usize> {
        &self.years
    }

    #[must_use]
    pub const fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Countries sorted by descending count, ties broken alphabetically.
    #[must_use]
    pub fn countries_by_count(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .countries
            .iter()
            .map(|(code, count)| (code.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Aggregate a classification list.
///
/// Duplicated ISRCs are counted every time they appear.
#[must_use]
pub fn compute_statistics(records: &[Classification]) -> DatasetStatistics {
    let mut stats = DatasetStatistics::default();

    for classification in records {
        stats.totals.total += 1;
        let isrc = match &classification.validity {
            Validity::Valid(isrc) => {
                stats.totals.valid += 1;
                isrc
            }
            Validity::MissingFile(isrc) => {
                stats.totals.missing_file += 1;
                isrc
            }
            Validity::InvalidFormat(_) => {
                stats.totals.invalid_format += 1;
                continue;
            }
        };

        *stats
            .countries
            .entry(isrc.country().to_ascii_uppercase())
            .or_default() += 1;

        if let Some(year) = isrc.year_number() {
            *stats.years.entry(year).or_default() += 1;
        }
    }

    stats
}

/// Tally the genre column of every record.
///
/// Underscores in tags become spaces; empty tags are skipped.
#[must_use]
pub fn genre_counts(records: &[DatasetRecord]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for genre in records.iter().filter_map(DatasetRecord::genre) {
        let genre = genre.replace('_', " ");
        let genre = genre.trim();
        if genre.is_empty() {
            continue;
        }
        *counts.entry(genre.to_string()).or_default() += 1;
    }
    counts
}
