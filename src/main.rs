//! Phoenix → Koinly Converter CLI
//!
//! Reads a Phoenix wallet CSV export and writes a Koinly-compatible CSV
//! to stdout. Warnings about skipped or partially-parsed rows go to stderr.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- phoenix-export.csv > koinly.csv
//! ```
//!
//! # Flags
//!
//! - `-v`, `--verbose`: per-record debug diagnostics
//! - `-r`, `--rounding-adjustment`: append a cost entry compensating
//!   accumulated rounding residuals
//!
//! `RUST_LOG` overrides the log filter chosen by `--verbose`.

use env_logger::Env;
use phoenix_koinly::{ConvertConfig, ConvertError, Converter, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    let mut config = ConvertConfig::default();
    let mut input_path = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => config.verbose = true,
            "-r" | "--rounding-adjustment" => config.add_rounding_adjustment = true,
            _ => input_path = Some(arg),
        }
    }

    let default_filter = if config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if let Err(e) = run(config, input_path) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(config: ConvertConfig, input_path: Option<String>) -> Result<()> {
    let input_path = input_path.ok_or(ConvertError::MissingArgument)?;
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let converter = Converter::new(config);
    let stdout = io::stdout();
    let handle = stdout.lock();
    let report = converter.convert(reader, handle)?;

    if report.skipped > 0 {
        log::warn!(
            "skipped {} of {} rows",
            report.skipped,
            report.converted + report.skipped
        );
    }

    Ok(())
}
