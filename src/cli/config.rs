//! TOML configuration file support for repeat runs.
//!
//! Instead of passing the same flags on every invocation, operators can keep
//! the test parameters in a config file:
//!
//! ```toml
//! # creeptrace.toml
//! [processing]
//! reference_diameter_mm = 9.5
//! time_unit = "min"
//! diameter_unit = "um"
//! strain_rate_unit = "1/min"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use creeptrace::units::{DiameterUnit, StrainRateUnit, TimeUnit};

/// Root configuration structure for creeptrace.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Processing-specific settings.
    #[serde(default)]
    pub processing: ProcessingConfig,
}

/// Configuration for the process command.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessingConfig {
    /// Reference (initial) tube diameter in millimetres.
    pub reference_diameter_mm: Option<f64>,

    /// Time axis unit ("s", "min", "hour").
    pub time_unit: Option<TimeUnit>,

    /// Diameter axis unit ("mm", "um").
    pub diameter_unit: Option<DiameterUnit>,

    /// Strain-rate axis unit ("1/s", ..., "um/hour").
    pub strain_rate_unit: Option<StrainRateUnit>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
