use anyhow::Result;
use clap::Parser;
use satin_etl::Config;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "satin", version, about = "SATIN's API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Dataset selection and format rules shared by the dataset commands.
#[derive(Debug, clap::Args)]
struct DatasetArgs {
    /// Input file containing all ISRCs (default: SATIN.csv)
    #[arg(short = 'i', long = "input_file", alias = "input-file", value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Input dir containing files with name corresponding to an ISRC
    #[arg(short = 'd', long = "dir_input", alias = "dir-input", value_name = "DIR_INPUT")]
    dir_input: Option<PathBuf>,

    /// Accept ISRCs whose year segment is not two digits
    #[arg(long)]
    lenient_year: bool,

    /// Require the designation code to be five digits
    #[arg(long)]
    strict_designation: bool,
}

impl DatasetArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.input_file {
            config.input_file.clone_from(path);
        }
        if let Some(dir) = &self.dir_input {
            config.dir_input = Some(dir.clone());
        }
        if self.lenient_year {
            config.require_numeric_year = false;
        }
        if self.strict_designation {
            config.require_numeric_designation = true;
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Validate every ISRC in the dataset and write the invalid ones out
    ///
    /// Each record's ISRC (first column) is checked for the 12-character
    /// format: a two-letter country code followed by alphanumerics, with a
    /// two-digit year segment. When a directory is given with -d, every
    /// well-formed ISRC must also have a file named `<ISRC>.<ext>` in it.
    ///
    /// Invalid ISRCs are written one per line to the output file, which is
    /// rewritten on every run. A summary of country and year distributions
    /// is printed afterwards.
    Validate {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Output file containing invalid ISRCs if any found (default: ISRC_invalid.txt)
        #[arg(short = 'o', long = "outfile", value_name = "OUTFILE")]
        outfile: Option<PathBuf>,

        /// Also write the statistics as JSON for plotting tools
        #[arg(long, value_name = "PATH")]
        stats_json: Option<PathBuf>,

        /// Number of countries to list in the summary
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Show country, year and validity statistics without writing the invalid list
    Stats {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Number of countries to list
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Write the statistics as JSON for plotting tools
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,
    },
    /// Tally the genre tags (last column) of the dataset
    Genres {
        /// Input file containing all ISRCs (default: SATIN.csv)
        #[arg(short = 'i', long = "input_file", alias = "input-file", value_name = "INPUT_FILE")]
        input_file: Option<PathBuf>,

        /// Number of genres to list
        #[arg(long, default_value_t = 20)]
        top: usize,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults if it doesn't exist
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    commands::init_logging(&config, cli.verbose)?;
    log::debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Commands::Validate {
            dataset,
            outfile,
            stats_json,
            top,
        } => {
            dataset.apply(&mut config);
            if let Some(outfile) = outfile {
                config.outfile = outfile;
            }
            commands::run_validate(&config, stats_json.as_deref(), top)?;
        }
        Commands::Stats { dataset, top, json } => {
            dataset.apply(&mut config);
            commands::run_stats(&config, json.as_deref(), top)?;
        }
        Commands::Genres { input_file, top } => {
            if let Some(path) = input_file {
                config.input_file = path;
            }
            commands::run_genres(&config, top)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config),
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
