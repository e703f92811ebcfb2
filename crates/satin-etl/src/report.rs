//! Report writers: the invalid-ISRC list and the statistics export.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use satin_core::model::expand_year;
use satin_core::{Classification, DatasetStatistics, Error, Result, Totals};

/// Write every invalid ISRC, one per line, in dataset order.
///
/// The whole file is built in memory and written in a single call, so a
/// failure never leaves a partial list behind. Returns the number of lines.
pub fn write_invalid(path: &Path, classifications: &[Classification]) -> Result<usize> {
    let mut contents = String::new();
    let mut count = 0;
    for classification in classifications.iter().filter(|c| c.is_invalid()) {
        contents.push_str(&classification.record.isrc);
        contents.push('\n');
        count += 1;
    }

    std::fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(count)
}

/// Serializable snapshot handed to plotting and word-cloud tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub generated_at: DateTime<Utc>,
    pub dataset: PathBuf,
    /// Year used to expand two-digit ISRC years.
    pub reference_year: i32,
    pub totals: Totals,
    pub validity_rate: f64,
    pub countries: BTreeMap<String, usize>,
    /// Records per four-digit year.
    pub years: BTreeMap<i32, usize>,
    pub genres: BTreeMap<String, usize>,
}

impl StatisticsReport {
    /// Build a report stamped with the current time and year.
    #[must_use]
    pub fn new(
        dataset: impl Into<PathBuf>,
        stats: &DatasetStatistics,
        genres: BTreeMap<String, usize>,
    ) -> Self {
        let now = Utc::now();
        Self::at(dataset, stats, genres, now, now.year())
    }

    /// Build a report with an explicit timestamp and reference year.
    #[must_use]
    pub fn at(
        dataset: impl Into<PathBuf>,
        stats: &DatasetStatistics,
        genres: BTreeMap<String, usize>,
        generated_at: DateTime<Utc>,
        reference_year: i32,
    ) -> Self {
        let mut years: BTreeMap<i32, usize> = BTreeMap::new();
        for (&two_digit, &count) in stats.years() {
            *years.entry(expand_year(two_digit, reference_year)).or_default() += count;
        }

        Self {
            generated_at,
            dataset: dataset.into(),
            reference_year,
            totals: *stats.totals(),
            validity_rate: stats.totals().validity_rate(),
            countries: stats.countries().clone(),
            years,
            genres,
        }
    }
}

/// Write a statistics report as pretty-printed JSON.
pub fn write_statistics_json(path: &Path, report: &StatisticsReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}
