use anyhow::{bail, Context, Result};
use log::info;
use std::path::PathBuf;

use creeptrace::export;
use creeptrace::ingest;
use creeptrace::pipeline::transform;
use creeptrace::units::UnitSelection;

use super::config::Config;
use super::{DiameterUnitArg, StrainRateUnitArg, TimeUnitArg};

/// Process a raw diameter log into a derived strain table
#[allow(clippy::too_many_arguments)]
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    reference_diameter: Option<f64>,
    time_unit: Option<TimeUnitArg>,
    diameter_unit: Option<DiameterUnitArg>,
    strain_rate_unit: Option<StrainRateUnitArg>,
    config: Option<PathBuf>,
    delimiter: char,
    no_header: bool,
) -> Result<()> {
    if !input.exists() {
        bail!("Input file does not exist: {}", input.display());
    }

    let file_config = match &config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let processing = file_config.processing;

    let Some(reference) = reference_diameter.or(processing.reference_diameter_mm) else {
        bail!(
            "No reference diameter given; pass --reference-diameter or set \
             reference_diameter_mm in a config file"
        );
    };

    let units = UnitSelection {
        time: time_unit
            .map(Into::into)
            .or(processing.time_unit)
            .unwrap_or_default(),
        diameter: diameter_unit
            .map(Into::into)
            .or(processing.diameter_unit)
            .unwrap_or_default(),
        strain_rate: strain_rate_unit
            .map(Into::into)
            .or(processing.strain_rate_unit)
            .unwrap_or_default(),
    };

    let output = output.unwrap_or_else(|| input.with_extension("txt"));
    let options = super::ingest_options(delimiter, no_header)?;

    info!("creeptrace - raw log to derived strain table");
    info!("=============================================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());
    info!(
        "Units:  time {} | diameter {} | strain rate {}",
        units.time, units.diameter, units.strain_rate
    );
    info!("Reference diameter: {} mm", reference);

    let log = ingest::read_path(&input, &options).context("Failed to read measurement log")?;
    info!("{}", log.stats);

    let series =
        transform(&log.samples, reference, units).context("Failed to derive strain series")?;

    export::write_table_to_path(&output, &series)
        .context("Failed to write derived table")?;

    info!("Processing complete!");
    info!("  Samples written: {}", series.len());
    if let (Some(first), Some(last)) = (series.strain.first(), series.strain.last()) {
        info!("  Strain: {:.4e} at start, {:.4e} at end", first, last);
    }
    if let Some(rate) = series.strain_rate.last() {
        info!(
            "  Final strain rate: {:.4e} {}",
            rate,
            units.strain_rate.label()
        );
    }

    Ok(())
}
