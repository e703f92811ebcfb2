pub mod config;
pub mod genres;
pub mod stats;
pub mod validate;

pub use genres::run_genres;
pub use stats::run_stats;
pub use validate::run_validate;

use anyhow::Result;
use satin_etl::Config;
use twyg::{LogLevel, OptsBuilder};

/// Set up `twyg` from the configured level; `--verbose` forces debug.
pub fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose {
        LogLevel::Debug
    } else {
        parse_log_level(&config.log_level)?
    };

    let opts = OptsBuilder::new()
        .coloured(config.log_coloured)
        .level(level)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build logger options: {e:?}"))?;

    twyg::setup(opts).map_err(|e| anyhow::anyhow!("Failed to set up logger: {e:?}"))?;

    Ok(())
}

fn parse_log_level(name: &str) -> Result<LogLevel> {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LogLevel::Trace),
        "debug" => Ok(LogLevel::Debug),
        "info" => Ok(LogLevel::Info),
        "warn" | "warning" => Ok(LogLevel::Warn),
        "error" => Ok(LogLevel::Error),
        _ => anyhow::bail!(
            "Unknown log level: {}\n\nValid levels: trace, debug, info, warn, error",
            name
        ),
    }
}
