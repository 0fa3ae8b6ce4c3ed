//! # creeptrace CLI
//!
//! Command-line front end for processing creep-test diameter logs.
//!
//! ## Usage
//!
//! ```bash
//! # Derive strain and strain rate from a raw log
//! creeptrace process run.csv --reference-diameter 9.5
//!
//! # Inspect a log before processing
//! creeptrace info run.csv
//! creeptrace validate run.csv
//!
//! # Generate a synthetic log for trying the tool
//! creeptrace demo demo_creep_run.csv
//! ```

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
