use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use creeptrace::ingest::{self, MeasurementLog};
use creeptrace::pipeline::MIN_VALID_ROWS;

/// Summary of a raw diameter log.
#[derive(Debug, Serialize)]
struct LogSummary {
    file: String,
    rows_read: usize,
    rows_dropped: usize,
    samples: usize,
    time_start_s: Option<f64>,
    time_end_s: Option<f64>,
    duration_s: Option<f64>,
    diameter_min_mm: Option<f64>,
    diameter_max_mm: Option<f64>,
    diameter_mean_mm: Option<f64>,
    ready_for_processing: bool,
}

impl LogSummary {
    fn from_log(file: &Path, log: &MeasurementLog) -> Self {
        let samples = &log.samples;
        let finite: Vec<(f64, f64)> = samples
            .time_s
            .iter()
            .zip(&samples.diameter_mm)
            .filter(|(t, d)| t.is_finite() && d.is_finite())
            .map(|(t, d)| (*t, *d))
            .collect();

        let time_start_s = finite.first().map(|(t, _)| *t);
        let time_end_s = finite.last().map(|(t, _)| *t);
        let duration_s = match (time_start_s, time_end_s) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        };

        let diameter_min_mm = finite
            .iter()
            .map(|(_, d)| *d)
            .fold(None, |acc: Option<f64>, d| {
                Some(acc.map_or(d, |m| m.min(d)))
            });
        let diameter_max_mm = finite
            .iter()
            .map(|(_, d)| *d)
            .fold(None, |acc: Option<f64>, d| {
                Some(acc.map_or(d, |m| m.max(d)))
            });
        let diameter_mean_mm = if finite.is_empty() {
            None
        } else {
            Some(finite.iter().map(|(_, d)| d).sum::<f64>() / finite.len() as f64)
        };

        Self {
            file: file.display().to_string(),
            rows_read: log.stats.rows_read,
            rows_dropped: log.stats.rows_dropped,
            samples: finite.len(),
            time_start_s,
            time_end_s,
            duration_s,
            diameter_min_mm,
            diameter_max_mm,
            diameter_mean_mm,
            ready_for_processing: finite.len() >= MIN_VALID_ROWS,
        }
    }
}

/// Display information about a raw diameter log
pub fn run(file: PathBuf, json: bool, delimiter: char, no_header: bool) -> Result<()> {
    if !file.exists() {
        bail!("File does not exist: {}", file.display());
    }

    let options = super::ingest_options(delimiter, no_header)?;
    let log = ingest::read_path(&file, &options).context("Failed to read measurement log")?;
    let summary = LogSummary::from_log(&file, &log);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Measurement Log Information");
    println!("===========================");
    println!("File: {}", summary.file);
    println!();

    println!("Rows:");
    println!("  Read:    {}", summary.rows_read);
    println!("  Dropped: {}", summary.rows_dropped);
    println!("  Usable:  {}", summary.samples);
    println!();

    if let (Some(start), Some(end), Some(duration)) =
        (summary.time_start_s, summary.time_end_s, summary.duration_s)
    {
        println!("Time:");
        println!("  Start:    {} s", start);
        println!("  End:      {} s", end);
        println!("  Duration: {} s", duration);
        println!();
    }

    if let (Some(min), Some(max), Some(mean)) = (
        summary.diameter_min_mm,
        summary.diameter_max_mm,
        summary.diameter_mean_mm,
    ) {
        println!("Diameter:");
        println!("  Min:  {} mm", min);
        println!("  Max:  {} mm", max);
        println!("  Mean: {:.4} mm", mean);
        println!();
    }

    if summary.ready_for_processing {
        println!("Ready for processing.");
    } else {
        println!(
            "Not processable: the pipeline needs at least {} usable rows.",
            MIN_VALID_ROWS
        );
    }

    Ok(())
}
