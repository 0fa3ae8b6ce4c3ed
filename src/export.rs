//! Tab-separated export of the derived series.
//!
//! Produces the ASCII table consumed by downstream analysis tools: a header
//! naming the active units followed by one row per sample. Fields use Rust's
//! native `f64` formatting (shortest representation that round-trips).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::pipeline::DerivedSeries;

/// Errors from writing the export table.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O failure while creating or writing the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure in the delimited writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write the derived series as a tab-separated table to any writer.
pub fn write_table<W: Write>(writer: W, series: &DerivedSeries) -> Result<(), ExportError> {
    let mut table = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    table.write_record([
        format!("Time ({})", series.units.time.label()),
        format!("Diameter ({})", series.units.diameter.label()),
        "Diametrical Strain (unitless)".to_string(),
        format!("Strain Rate ({})", series.units.strain_rate.label()),
    ])?;

    for i in 0..series.len() {
        table.write_record([
            series.time[i].to_string(),
            series.diameter[i].to_string(),
            series.strain[i].to_string(),
            series.strain_rate[i].to_string(),
        ])?;
    }

    table.flush()?;
    Ok(())
}

/// Write the derived series as a tab-separated table to a file path.
pub fn write_table_to_path(path: &Path, series: &DerivedSeries) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_table(file, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{DiameterUnit, StrainRateUnit, TimeUnit, UnitSelection};

    fn sample_series() -> DerivedSeries {
        DerivedSeries {
            time: vec![0.0, 0.5, 1.0],
            diameter: vec![10.0, 10.1, 10.2],
            strain: vec![0.0, 0.01, 0.02],
            strain_rate: vec![0.02, 0.02, 0.02],
            units: UnitSelection::default(),
        }
    }

    fn render(series: &DerivedSeries) -> String {
        let mut buffer = Vec::new();
        write_table(&mut buffer, series).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_names_the_active_units() {
        let text = render(&sample_series());
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "Time (s)\tDiameter (mm)\tDiametrical Strain (unitless)\tStrain Rate (1/s)"
        );
    }

    #[test]
    fn test_header_follows_unit_selection() {
        let mut series = sample_series();
        series.units = UnitSelection {
            time: TimeUnit::Hours,
            diameter: DiameterUnit::Micrometers,
            strain_rate: StrainRateUnit::MicronsPerHour,
        };
        let text = render(&series);
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "Time (hour)\tDiameter (μm)\tDiametrical Strain (unitless)\tStrain Rate (μm/hour)"
        );
    }

    #[test]
    fn test_one_row_per_sample() {
        let series = sample_series();
        let text = render(&series);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), series.len() + 1);
        assert_eq!(lines[1], "0\t10\t0\t0.02");
        assert_eq!(lines[2], "0.5\t10.1\t0.01\t0.02");
    }

    #[test]
    fn test_values_round_trip_through_the_table() {
        let series = sample_series();
        let text = render(&series);
        for (line, i) in text.lines().skip(1).zip(0..) {
            let fields: Vec<f64> = line
                .split('\t')
                .map(|f| f.parse().unwrap())
                .collect();
            assert_eq!(fields[0], series.time[i]);
            assert_eq!(fields[1], series.diameter[i]);
            assert_eq!(fields[2], series.strain[i]);
            assert_eq!(fields[3], series.strain_rate[i]);
        }
    }
}
