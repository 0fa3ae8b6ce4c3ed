//! CSV ingestion for instrument diameter logs.
//!
//! The logger appends character-delimited rows with at least two numeric
//! columns (time in seconds, diameter in millimetres). Ingestion parses the
//! two configured columns, drops rows with missing fields, and rejects rows
//! holding textual garbage. Extra columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::pipeline::RawSamples;

/// Errors from reading an instrument log.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O failure while opening or reading the log.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not parseable as delimited text.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column holds a value that is not a number.
    #[error("row {row}: column {column} holds non-numeric value {value:?}")]
    MalformedValue {
        /// 1-based row number in the file, counting the header row.
        row: usize,
        /// 0-based column index.
        column: usize,
        /// The offending field text.
        value: String,
    },
}

/// How to read the log file.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Whether the first row is a header to skip.
    pub has_headers: bool,
    /// 0-based index of the time column.
    pub time_column: usize,
    /// 0-based index of the diameter column.
    pub diameter_column: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            time_column: 0,
            diameter_column: 1,
        }
    }
}

/// Counters from one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Data rows seen in the file (the header row is not counted).
    pub rows_read: usize,
    /// Rows dropped because a required field was missing or empty.
    pub rows_dropped: usize,
}

impl std::fmt::Display for IngestStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Read {} rows ({} dropped for missing values)",
            self.rows_read, self.rows_dropped
        )
    }
}

/// A parsed instrument log: the cleaned samples plus ingestion counters.
#[derive(Debug, Clone, Default)]
pub struct MeasurementLog {
    /// The cleaned (time, diameter) samples.
    pub samples: RawSamples,
    /// Counters from the ingestion pass.
    pub stats: IngestStats,
}

/// Read an instrument log from a file path.
pub fn read_path(path: &Path, options: &IngestOptions) -> Result<MeasurementLog, IngestError> {
    let file = File::open(path)?;
    read_from(file, options)
}

/// Read an instrument log from any reader.
pub fn read_from<R: Read>(
    reader: R,
    options: &IngestOptions,
) -> Result<MeasurementLog, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .from_reader(reader);

    let mut samples = RawSamples::new();
    let mut stats = IngestStats::default();
    let first_data_row = if options.has_headers { 2 } else { 1 };

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        stats.rows_read += 1;
        let row = first_data_row + index;

        let time_field = record.get(options.time_column).map(str::trim).unwrap_or("");
        let diameter_field = record
            .get(options.diameter_column)
            .map(str::trim)
            .unwrap_or("");
        if time_field.is_empty() || diameter_field.is_empty() {
            stats.rows_dropped += 1;
            continue;
        }

        let time = parse_field(time_field, row, options.time_column)?;
        let diameter = parse_field(diameter_field, row, options.diameter_column)?;
        samples.push(time, diameter);
    }

    debug!("{}", stats);
    Ok(MeasurementLog { samples, stats })
}

fn parse_field(value: &str, row: usize, column: usize) -> Result<f64, IngestError> {
    value.parse().map_err(|_| IngestError::MalformedValue {
        row,
        column,
        value: value.to_string(),
    })
}
