//! Petty Cash to QuickBooks IIF CLI
//!
//! Reads a petty cash CSV export and writes a QuickBooks IIF import file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- petty_cash.csv > petty_cash.iif
//! cargo run -- --config accounts.toml --output petty_cash.iif petty_cash.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug`, `info` or `warn` to control logging verbosity
//!
//! # Exit Codes
//!
//! - 0: Success (rows may have been skipped)
//! - 1: Error (missing columns, file not readable, bad configuration, etc.)
//! - 2: Rows were skipped and `--strict` was given

use clap::Parser;
use log::info;
use petty_cash_iif::{convert_csv, Config, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

/// Convert petty cash records into a QuickBooks IIF import file
#[derive(Parser, Debug)]
#[command(name = "petty-cash-iif", version)]
#[command(about = "Convert petty cash records into a QuickBooks IIF import file", long_about = None)]
struct CliArgs {
    /// Input CSV file path
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write the IIF file here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// TOML file with account names and input options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Input field delimiter (overrides the config file)
    #[arg(short, long, value_name = "CHAR")]
    delimiter: Option<String>,

    /// Read ambiguous dates such as 05/01/2024 as day/month/year
    #[arg(long)]
    day_first: bool,

    /// Exit with status 2 if any row was skipped
    #[arg(long)]
    strict: bool,
}

impl CliArgs {
    /// Loads the config file (if any) and applies command-line overrides.
    fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(delimiter) = &self.delimiter {
            config.input.delimiter = delimiter.clone();
        }
        if self.day_first {
            config.input.day_first = true;
        }
        Ok(config)
    }
}

fn main() {
    env_logger::init();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(skipped) if skipped > 0 && args.strict => {
            eprintln!("Error: {} rows were skipped", skipped);
            process::exit(2);
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Runs one conversion and returns the number of skipped rows.
fn run(args: &CliArgs) -> Result<usize> {
    let config = args.to_config()?;

    let file = File::open(&args.input)?;
    let conversion = convert_csv(BufReader::new(file), &config)?;

    match &args.output {
        Some(path) => conversion.write_iif(BufWriter::new(File::create(path)?))?,
        None => conversion.write_iif(io::stdout().lock())?,
    }

    info!("{}", conversion.summary());
    Ok(conversion.warnings.len())
}
