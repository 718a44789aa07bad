//! ACH File CLI
//!
//! Reads payments from a CSV file and writes a NACHA ACH file to stdout.
//!
//! # Usage
//!
//! ```bash
//! ACH_IMMEDIATE_DESTINATION=03130142 ACH_IMMEDIATE_ORIGIN=031301422 \
//!     cargo run -- payments.csv > payments.ach
//! ```
//!
//! # Environment Variables
//!
//! - `ACH_IMMEDIATE_DESTINATION`, `ACH_IMMEDIATE_ORIGIN`: required
//! - `ACH_*`: optional file header settings, see [`ach_file::config`]
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use ach_file::{build_file, AchError, Result, Settings};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(AchError::MissingArgument);
    }

    let settings = Settings::from_env()?;

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut report = build_file(settings.file_options(), settings.totals_policy, reader)?;
    for skipped in &report.skipped {
        eprintln!("Skipped row {}: {}", skipped.row, skipped.message);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    report.file.write_to(&mut handle)?;

    Ok(())
}
