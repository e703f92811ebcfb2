use anyhow::{Context, Result};
use std::path::Path;

use satin_core::{compute_statistics, genre_counts, DatasetStatistics};
use satin_etl::validate::classify;
use satin_etl::{load_dataset, write_statistics_json, Config, ReferenceIndex, StatisticsReport};

/// Print dataset statistics; the invalid list is not written.
pub fn run_stats(config: &Config, json: Option<&Path>, top: usize) -> Result<()> {
    let records = load_dataset(&config.input_file).context("Failed to load dataset")?;
    let reference = config
        .dir_input
        .as_deref()
        .map(ReferenceIndex::scan)
        .transpose()
        .context("Failed to index reference directory")?;

    let genres = genre_counts(&records);
    let classifications = classify(records, config.rules(), reference.as_ref());
    let stats = compute_statistics(&classifications);
    let report = StatisticsReport::new(&config.input_file, &stats, genres);

    println!("\n📊 SATIN Statistics\n");
    println!("  Dataset: {}", config.input_file.display());
    print_report(&stats, &report, top);

    if let Some(path) = json {
        write_statistics_json(path, &report).context("Failed to write statistics JSON")?;
        println!("\n✓ Statistics written to {}", path.display());
    }

    Ok(())
}

/// Print totals, the top countries, and the year distribution.
pub fn print_report(stats: &DatasetStatistics, report: &StatisticsReport, top: usize) {
    let totals = &report.totals;

    println!("\n  Records: {}", totals.total);
    println!(
        "  Valid:   {} ({:.1}%)",
        totals.valid,
        report.validity_rate * 100.0
    );
    println!("  Invalid: {}", totals.invalid());

    if totals.total == 0 {
        return;
    }

    let countries = stats.countries_by_count();

    println!("\n  Countries ({} total):", countries.len());
    for (code, count) in countries.iter().take(top) {
        println!("    {code}  {count:>6}");
    }
    if countries.len() > top {
        let rest: usize = countries.iter().skip(top).map(|(_, count)| count).sum();
        println!("    ..  {rest:>6} in {} more", countries.len() - top);
    }

    if !report.years.is_empty() {
        let peak = report.years.values().copied().max().unwrap_or(1).max(1);
        println!("\n  Years:");
        for (year, count) in &report.years {
            let bar = "█".repeat((count * 40).div_ceil(peak));
            println!("    {year}  {count:>6}  {bar}");
        }
    }
}
