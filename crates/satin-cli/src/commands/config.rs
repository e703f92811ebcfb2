use anyhow::Result;
use satin_etl::{config, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) {
    println!("Current Configuration");
    println!("=====================\n");

    let config_path = config::config_file_path();
    println!("Config file: {}", config_path.display());
    println!(
        "File exists: {}\n",
        if config_path.exists() { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  input_file: {}", config.input_file.display());
    println!("  outfile: {}", config.outfile.display());
    println!(
        "  dir_input: {}",
        config
            .dir_input
            .as_ref()
            .map_or_else(|| String::from("<not set>"), |dir| dir.display().to_string())
    );
    println!("  require_numeric_year: {}", config.require_numeric_year);
    println!(
        "  require_numeric_designation: {}",
        config.require_numeric_designation
    );
    println!("  log_level: {}", config.log_level);
    println!("  log_coloured: {}", config.log_coloured);

    println!("\nPriority: CLI args > ENV vars (SATIN_*) > Config file > Defaults");
}

/// Show the config file path.
pub fn show_path() {
    println!("{}", config::config_file_path().display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure satin.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
