use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use satin_core::{compute_statistics, genre_counts, DatasetRecord};
use satin_etl::{validate, write_statistics_json, Config, StatisticsReport};

use super::stats::print_report;

/// Validate the configured dataset, write invalid ISRCs, and summarise.
pub fn run_validate(config: &Config, stats_json: Option<&Path>, top: usize) -> Result<()> {
    let options = config.validation_options();

    println!("\n🔍 Validating ISRCs\n");
    println!("  Dataset: {}", options.dataset_path.display());
    if let Some(dir) = &options.reference_dir {
        println!("  Reference directory: {}", dir.display());
    }

    let report = validate(&options).context("Validation failed")?;

    let mut by_reason: BTreeMap<&str, usize> = BTreeMap::new();
    for classification in report.invalid() {
        *by_reason.entry(classification.validity.label()).or_default() += 1;
    }

    println!();
    if report.invalid_written == 0 {
        println!("  ✓ All {} ISRCs are valid", report.classifications.len());
    } else {
        println!(
            "  ✗ {} invalid ISRCs written to {}",
            report.invalid_written,
            options.output_path.display()
        );
        for (reason, count) in &by_reason {
            println!("      {reason}: {count}");
        }
    }

    let stats = compute_statistics(&report.classifications);
    let records: Vec<DatasetRecord> = report.records().cloned().collect();
    let summary = StatisticsReport::new(&options.dataset_path, &stats, genre_counts(&records));
    print_report(&stats, &summary, top);

    if let Some(path) = stats_json {
        write_statistics_json(path, &summary).context("Failed to write statistics JSON")?;
        println!("\n✓ Statistics written to {}", path.display());
    }

    Ok(())
}
