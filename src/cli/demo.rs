use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Generate a synthetic creep-test log
pub fn run(output: PathBuf, rows: usize, interval: f64, diameter: f64) -> Result<()> {
    info!("creeptrace Demo Log Generator");
    info!("=============================");
    info!("Output:   {}", output.display());
    info!("Samples:  {} at {} s intervals", rows, interval);
    info!("Diameter: {} mm initial", diameter);

    let duration = rows as f64 * interval;
    let mut writer =
        csv::Writer::from_path(&output).context("Failed to create demo log file")?;

    writer.write_record(["time", "diameter"])?;
    for i in 0..rows {
        let t = i as f64 * interval;
        let d = creep_diameter(diameter, t, duration);
        writer.write_record([t.to_string(), d.to_string()])?;
    }
    writer.flush()?;

    info!("Wrote {} samples to {}", rows, output.display());
    info!(
        "Try: creeptrace process {} --reference-diameter {}",
        output.display(),
        diameter
    );

    Ok(())
}

/// Primary plus secondary creep with a little sensor ripple.
fn creep_diameter(initial_mm: f64, t_s: f64, duration_s: f64) -> f64 {
    let primary = 0.006 * (1.0 - (-3.0 * t_s / duration_s).exp());
    let secondary = 0.004 * t_s / duration_s;
    let ripple = 0.0004 * (t_s * 0.05).sin();
    initial_mm * (1.0 + primary + secondary) + ripple
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_diameter_starts_at_the_initial_value() {
        let d = creep_diameter(9.5, 0.0, 6000.0);
        assert!((d - 9.5).abs() < 1e-9);
    }

    #[test]
    fn test_demo_diameter_grows_over_the_run() {
        let start = creep_diameter(9.5, 0.0, 6000.0);
        let end = creep_diameter(9.5, 6000.0, 6000.0);
        assert!(end > start);
    }
}
