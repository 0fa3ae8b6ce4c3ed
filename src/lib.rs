//! # creeptrace - Creep-Test Diameter Log Processing
//!
//! `creeptrace` turns the raw CSV log of a tube/sample diameter logger into
//! the derived quantities a creep-test operator watches: smoothed absolute
//! diameter, diametrical strain, and strain rate, each converted to the
//! operator's unit selection.
//!
//! ## Pipeline
//!
//! Each invocation recomputes everything from scratch; there is no retained
//! state and no incremental update. The stages are:
//!
//! 1. Drop rows with missing fields (ingestion) or non-finite values
//!    (pipeline).
//! 2. Smooth the diameter with a Savitzky–Golay filter (window 5, order 2).
//! 3. Convert time with fixed divisors (s→1, min→60, hour→3600).
//! 4. Convert diameter (mm→×1, μm→×1000); the reference diameter is scaled
//!    with the same multiplier.
//! 5. Diametrical strain = (diameter − reference) / reference, unitless.
//! 6. Strain rate = numerical gradient of the strain against the original
//!    time values in seconds.
//! 7. Rescale the rate with the strain-rate unit table (see
//!    [`units::StrainRateUnit::multiplier`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use creeptrace::export;
//! use creeptrace::ingest::{self, IngestOptions};
//! use creeptrace::pipeline::transform;
//! use creeptrace::plot::PlotSet;
//! use creeptrace::units::UnitSelection;
//!
//! // Parse the instrument log.
//! let log = ingest::read_path(Path::new("run.csv"), &IngestOptions::default())?;
//!
//! // Derive strain and strain rate against a 9.5 mm reference diameter.
//! let series = transform(&log.samples, 9.5, UnitSelection::default())?;
//!
//! // Hand labeled panels to a renderer and write the ASCII export.
//! let plots = PlotSet::from_series(&series);
//! assert_eq!(plots.panels().len(), 4);
//! export::write_table_to_path(Path::new("run.txt"), &series)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Export Format
//!
//! The export collaborator writes a tab-separated table:
//!
//! | Column | Unit | Description |
//! |--------|------|-------------|
//! | Time | selected time unit | Converted sample time |
//! | Diameter | selected diameter unit | Smoothed, converted diameter |
//! | Diametrical Strain | unitless | Relative change from the reference |
//! | Strain Rate | selected rate unit | Time derivative of the strain |
//!
//! ## Architecture
//!
//! - [`ingest`]: CSV parsing and row cleaning for instrument logs
//! - [`pipeline`]: the measurement-transformation pipeline
//! - [`smoothing`]: Savitzky–Golay filter
//! - [`units`]: unit selections and the fixed conversion tables
//! - [`plot`]: labeled series for an external renderer
//! - [`export`]: tab-separated table output
//! - [`validator`]: pre-flight log checks

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod export;
pub mod ingest;
pub mod pipeline;
pub mod plot;
pub mod smoothing;
pub mod units;
pub mod validator;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::export::{write_table, write_table_to_path, ExportError};
    pub use crate::ingest::{
        read_from, read_path, IngestError, IngestOptions, IngestStats, MeasurementLog,
    };
    pub use crate::pipeline::{
        transform, DerivedSeries, PipelineError, RawSamples, MIN_VALID_ROWS, SMOOTHING_ORDER,
        SMOOTHING_WINDOW,
    };
    pub use crate::plot::{PlotSeries, PlotSet};
    pub use crate::smoothing::{SavitzkyGolay, SmoothingError};
    pub use crate::units::{
        DiameterUnit, StrainRateUnit, TimeUnit, UnitParseError, UnitSelection,
    };
    pub use crate::validator::{validate_log, CheckStatus, ValidationCheck, ValidationReport};
}
