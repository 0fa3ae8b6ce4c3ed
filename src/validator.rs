//! Pre-flight validation for instrument diameter logs.
//!
//! Checks a raw log for the conditions the pipeline assumes but the
//! instrument does not guarantee: enough usable rows, time values in order,
//! no repeated timestamps, finite and physically plausible diameters.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use creeptrace::ingest::IngestOptions;
//! use creeptrace::validator::validate_log;
//! use std::path::Path;
//!
//! let report = validate_log(Path::new("run.csv"), &IngestOptions::default())?;
//! println!("{}", report);
//! if report.has_failures() {
//!     eprintln!("log is not processable");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::path::Path;

use anyhow::Result;

use crate::ingest::{self, IngestOptions, MeasurementLog};
use crate::pipeline::MIN_VALID_ROWS;

/// Outcome of a single validation check.
#[derive(Debug, Clone)]
pub enum CheckStatus {
    /// The check passed.
    Ok,
    /// The check passed but the log needs attention.
    Warning(String),
    /// The check failed; the pipeline will reject this log.
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }
}

/// A named validation check and its outcome.
#[derive(Debug, Clone)]
pub struct ValidationCheck {
    /// Human-readable name of the check.
    pub name: String,
    /// Outcome of the check.
    pub status: CheckStatus,
}

impl ValidationCheck {
    fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
        }
    }

    fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
        }
    }

    fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
        }
    }
}

/// Complete validation report for one log file.
#[derive(Debug)]
pub struct ValidationReport {
    /// The individual checks in execution order.
    pub checks: Vec<ValidationCheck>,
    /// Path of the validated file.
    pub file_path: String,
}

impl ValidationReport {
    /// Start an empty report for the given file.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            checks: Vec::new(),
            file_path: file_path.into(),
        }
    }

    /// Append a check outcome.
    pub fn add_check(&mut self, check: ValidationCheck) {
        self.checks.push(check);
    }

    /// Whether any check failed.
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    /// Whether any check raised a warning.
    pub fn has_warnings(&self) -> bool {
        self.checks
            .iter()
            .any(|c| matches!(c.status, CheckStatus::Warning(_)))
    }

    /// Number of passed checks.
    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    /// Number of warnings.
    pub fn warning_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Warning(_)))
            .count()
    }

    /// Number of failed checks.
    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Diameter Log Validation Report")?;
        writeln!(f, "==============================")?;
        writeln!(f, "File: {}", self.file_path)?;
        writeln!(f)?;

        for check in &self.checks {
            let symbol = match &check.status {
                CheckStatus::Ok => "✓",
                CheckStatus::Warning(_) => "⚠",
                CheckStatus::Failed(_) => "✗",
            };

            write!(f, "[{}] {}", symbol, check.name)?;

            match &check.status {
                CheckStatus::Ok => writeln!(f)?,
                CheckStatus::Warning(msg) => writeln!(f, " - WARNING: {}", msg)?,
                CheckStatus::Failed(msg) => writeln!(f, " - FAILED: {}", msg)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )?;

        if self.has_failures() {
            writeln!(f)?;
            writeln!(f, "Validation FAILED")?;
        } else if self.has_warnings() {
            writeln!(f)?;
            writeln!(f, "Validation PASSED with warnings")?;
        } else {
            writeln!(f)?;
            writeln!(f, "Validation PASSED")?;
        }

        Ok(())
    }
}

/// Validate a log file on disk.
pub fn validate_log(path: &Path, options: &IngestOptions) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(path.display().to_string());

    if !path.exists() {
        report.add_check(ValidationCheck::failed(
            "Path exists",
            format!("Path does not exist: {}", path.display()),
        ));
        return Ok(report);
    }
    report.add_check(ValidationCheck::ok("Path exists"));

    let log = match ingest::read_path(path, options) {
        Ok(log) => {
            report.add_check(ValidationCheck::ok("Log parses as delimited text"));
            log
        }
        Err(e) => {
            report.add_check(ValidationCheck::failed(
                "Log parses as delimited text",
                e.to_string(),
            ));
            return Ok(report);
        }
    };

    check_samples(&log, &mut report);
    Ok(report)
}

fn check_samples(log: &MeasurementLog, report: &mut ValidationReport) {
    let samples = &log.samples;

    if log.stats.rows_dropped > 0 {
        report.add_check(ValidationCheck::warning(
            "Complete rows",
            format!(
                "{} of {} rows dropped for missing values",
                log.stats.rows_dropped, log.stats.rows_read
            ),
        ));
    } else {
        report.add_check(ValidationCheck::ok("Complete rows"));
    }

    let finite = samples
        .time_s
        .iter()
        .zip(&samples.diameter_mm)
        .filter(|(t, d)| t.is_finite() && d.is_finite())
        .count();
    let non_finite = samples.len() - finite;
    if non_finite > 0 {
        report.add_check(ValidationCheck::warning(
            "Finite values",
            format!("{} rows hold NaN or infinite values and will be dropped", non_finite),
        ));
    } else {
        report.add_check(ValidationCheck::ok("Finite values"));
    }

    if finite < MIN_VALID_ROWS {
        report.add_check(ValidationCheck::failed(
            "Row count",
            format!(
                "only {} usable rows, the smoothing window needs {}",
                finite, MIN_VALID_ROWS
            ),
        ));
    } else {
        report.add_check(ValidationCheck::ok("Row count"));
    }

    let inversions = samples
        .time_s
        .windows(2)
        .filter(|w| w[1] < w[0])
        .count();
    if inversions > 0 {
        report.add_check(ValidationCheck::warning(
            "Time column sorted",
            format!("time decreases {} times; derived rates will be misleading", inversions),
        ));
    } else {
        report.add_check(ValidationCheck::ok("Time column sorted"));
    }

    let repeats = samples
        .time_s
        .windows(2)
        .filter(|w| w[1] == w[0])
        .count();
    if repeats > 0 {
        report.add_check(ValidationCheck::warning(
            "Distinct timestamps",
            format!(
                "{} repeated consecutive time values; the strain-rate gradient divides by the time step",
                repeats
            ),
        ));
    } else {
        report.add_check(ValidationCheck::ok("Distinct timestamps"));
    }

    let non_positive = samples
        .diameter_mm
        .iter()
        .filter(|d| d.is_finite() && **d <= 0.0)
        .count();
    if non_positive > 0 {
        report.add_check(ValidationCheck::warning(
            "Positive diameters",
            format!("{} rows hold non-positive diameters", non_positive),
        ));
    } else {
        report.add_check(ValidationCheck::ok("Positive diameters"));
    }
}
