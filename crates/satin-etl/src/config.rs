use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use satin_core::FormatRules;

use crate::validate::ValidationOptions;

/// Configuration for satin.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SATIN_* prefix)
/// 3. Config file (~/.config/satin/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset file containing all ISRCs.
    ///
    /// Can be set via:
    /// - CLI: -i/--input_file
    /// - ENV: SATIN_INPUT_FILE
    /// - Default: SATIN.csv
    pub input_file: PathBuf,

    /// Output file receiving invalid ISRCs.
    ///
    /// Can be set via:
    /// - CLI: -o/--outfile
    /// - ENV: SATIN_OUTFILE
    /// - Default: ISRC_invalid.txt
    pub outfile: PathBuf,

    /// Directory holding one file per ISRC, used as a secondary check.
    pub dir_input: Option<PathBuf>,

    /// Require the year segment to be two digits.
    pub require_numeric_year: bool,

    /// Require the designation code to be five digits.
    pub require_numeric_designation: bool,

    /// Log level: trace, debug, info, warn or error.
    pub log_level: String,

    /// Colourise log output.
    pub log_coloured: bool,
}

impl Default for Config {
    fn default() -> Self {
        let rules = FormatRules::default();
        Self {
            input_file: PathBuf::from("SATIN.csv"),
            outfile: PathBuf::from("ISRC_invalid.txt"),
            dir_input: None,
            require_numeric_year: rules.require_numeric_year,
            require_numeric_designation: rules.require_numeric_designation,
            log_level: String::from("info"),
            log_coloured: true,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/satin/config.toml
    /// Reads environment variables with SATIN_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        // The file layer is optional; defaults fill whatever it leaves out
        let config_path = config_file_path();
        if config_path.is_file() {
            let path = config_path.to_str().with_context(|| {
                format!("Config path is not valid UTF-8: {}", config_path.display())
            })?;
            builder
                .add_file(path)
                .with_context(|| format!("Failed to load {}", config_path.display()))?;
        }

        // SATIN_INPUT_FILE, SATIN_DIR_INPUT, ... override the file
        builder
            .add_env(env::Options::with_top_level("satin"))
            .context("Failed to read SATIN_* environment variables")?;

        builder.build().context("Failed to build configuration")
    }

    /// The format rules selected by this configuration.
    #[must_use]
    pub fn rules(&self) -> FormatRules {
        FormatRules {
            require_numeric_year: self.require_numeric_year,
            require_numeric_designation: self.require_numeric_designation,
        }
    }

    /// Build the options for one validation run.
    #[must_use]
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            dataset_path: self.input_file.clone(),
            output_path: self.outfile.clone(),
            reference_dir: self.dir_input.clone(),
            rules: self.rules(),
        }
    }
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/satin/config.toml
/// - macOS: ~/Library/Application Support/satin/config.toml
/// - Windows: %APPDATA%\satin\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("satin")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# SATIN Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SATIN_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Dataset file containing all ISRCs (first column) and genre tags (last column)
#
# Can also be set via:
# - CLI: satin validate -i /path/to/SATIN.csv
# - Environment: SATIN_INPUT_FILE=/path/to/SATIN.csv
input_file = "SATIN.csv"

# Output file for invalid ISRCs, rewritten on every run
outfile = "ISRC_invalid.txt"

# Directory containing one file per ISRC (e.g. USWB11200587.mp3)
# When set, format-valid ISRCs without a matching file are reported as invalid
#dir_input = "/path/to/audio"

# Format rules
require_numeric_year = true
require_numeric_designation = false

# Logging
log_level = "info"
log_coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input_file, PathBuf::from("SATIN.csv"));
        assert_eq!(config.outfile, PathBuf::from("ISRC_invalid.txt"));
        assert!(config.dir_input.is_none());
        assert_eq!(config.rules(), FormatRules::default());
    }

    #[test]
    fn test_example_config_parses() {
        let parsed: Config = load_example_config();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_validation_options() {
        let config = Config {
            dir_input: Some(PathBuf::from("/data/audio")),
            require_numeric_year: false,
            ..Config::default()
        };
        let options = config.validation_options();
        assert_eq!(options.dataset_path, PathBuf::from("SATIN.csv"));
        assert_eq!(options.output_path, PathBuf::from("ISRC_invalid.txt"));
        assert_eq!(options.reference_dir, Some(PathBuf::from("/data/audio")));
        assert_eq!(options.rules, FormatRules::lenient());
    }

    #[test]
    fn test_config_path_ends_with_satin() {
        let path = config_file_path();
        assert!(path.ends_with("satin/config.toml"));
    }

    fn load_example_config() -> Config {
        let mut builder = Confygery::new().unwrap();
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, example_config()).unwrap();
        builder.add_file(path.to_str().unwrap()).unwrap();
        builder.build().unwrap()
    }
}
