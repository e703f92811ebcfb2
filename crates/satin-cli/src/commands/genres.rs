use anyhow::{Context, Result};

use satin_core::genre_counts;
use satin_etl::{load_dataset, Config};

/// Print the most frequent genre tags.
pub fn run_genres(config: &Config, top: usize) -> Result<()> {
    let records = load_dataset(&config.input_file).context("Failed to load dataset")?;
    let counts = genre_counts(&records);

    if counts.is_empty() {
        println!("No genre tags found in {}", config.input_file.display());
        return Ok(());
    }

    let mut ranked: Vec<(&String, &usize)> = counts.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!("\n🎵 Genres in {}\n", config.input_file.display());
    let width = ranked
        .iter()
        .take(top)
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or_default();
    for (name, count) in ranked.iter().take(top) {
        println!("  {name:<width$}  {count:>6}");
    }
    if ranked.len() > top {
        println!("  ... and {} more", ranked.len() - top);
    }

    Ok(())
}
