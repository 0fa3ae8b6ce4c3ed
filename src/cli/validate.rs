use anyhow::Result;
use log::info;
use std::path::PathBuf;

use creeptrace::validator::validate_log;

/// Check a raw diameter log for problems before processing
pub fn run(file: PathBuf, delimiter: char, no_header: bool) -> Result<()> {
    let options = super::ingest_options(delimiter, no_header)?;

    info!("creeptrace Log Validator");
    info!("========================");
    info!("File: {}", file.display());

    match validate_log(&file, &options) {
        Ok(report) => {
            println!("{}", report);

            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
