//! The measurement-transformation pipeline.
//!
//! Takes raw (time, diameter) samples from the instrument log plus the
//! operator's unit selection and produces four aligned derived series:
//! converted time, converted (smoothed) diameter, diametrical strain, and
//! converted strain rate.
//!
//! The pipeline is a pure function: no state survives between invocations and
//! identical inputs yield bit-identical outputs. Callers invoke it from
//! whichever thread noticed fresh data and hand the result to a renderer or
//! exporter.
//!
//! Two conversion details are deliberate and must not be "corrected":
//!
//! - Strain is computed from the *smoothed* diameter, never the raw one.
//! - The strain-rate gradient is taken against the original time values in
//!   seconds and rescaled with the table in
//!   [`StrainRateUnit::multiplier`](crate::units::StrainRateUnit::multiplier),
//!   which folds the time-axis divisor back in. The resulting numbers match
//!   the instrument's companion plotting tool rather than a dimensionally
//!   "clean" derivation.

use log::debug;

use crate::smoothing::{SavitzkyGolay, SmoothingError};
use crate::units::UnitSelection;

/// Smoothing window applied to the diameter series.
pub const SMOOTHING_WINDOW: usize = 5;

/// Polynomial order of the smoothing filter.
pub const SMOOTHING_ORDER: usize = 2;

/// Minimum number of usable rows; the smoothing window needs this many.
pub const MIN_VALID_ROWS: usize = SMOOTHING_WINDOW;

/// Errors from [`transform`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Fewer usable rows than the smoothing window after dropping
    /// incomplete pairs.
    #[error(
        "only {rows} usable rows after dropping incomplete ones, \
         need at least {MIN_VALID_ROWS}"
    )]
    InsufficientData {
        /// Usable rows remaining.
        rows: usize,
    },

    /// The reference diameter must be a positive number of millimetres.
    #[error("reference diameter must be positive, got {value} mm")]
    InvalidReference {
        /// The rejected value.
        value: f64,
    },

    /// The two input columns disagree in length.
    #[error("time column has {time_len} values but diameter column has {diameter_len}")]
    ColumnLengthMismatch {
        /// Length of the time column.
        time_len: usize,
        /// Length of the diameter column.
        diameter_len: usize,
    },

    /// The smoothing filter rejected the data.
    #[error(transparent)]
    Smoothing(#[from] SmoothingError),
}

/// Raw samples as parsed from the instrument log.
///
/// Time is in seconds, diameter in millimetres (the instrument's base units).
/// Rows are expected in time order; the pipeline does not reorder them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSamples {
    /// Sample times in seconds.
    pub time_s: Vec<f64>,
    /// Sample diameters in millimetres.
    pub diameter_mm: Vec<f64>,
}

impl RawSamples {
    /// Create an empty sample set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sample set from two pre-parsed columns.
    pub fn from_columns(time_s: Vec<f64>, diameter_mm: Vec<f64>) -> Self {
        Self { time_s, diameter_mm }
    }

    /// Append one (time, diameter) pair.
    pub fn push(&mut self, time_s: f64, diameter_mm: f64) {
        self.time_s.push(time_s);
        self.diameter_mm.push(diameter_mm);
    }

    /// Number of sample pairs.
    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    /// Whether the sample set is empty.
    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }
}

/// The four aligned output series of one pipeline invocation.
///
/// All four vectors share the same length and index alignment; index `i`
/// everywhere refers to the same (cleaned) input row. Strain is unitless;
/// the other three series carry the units recorded in [`Self::units`].
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    /// Time converted to the selected unit.
    pub time: Vec<f64>,
    /// Smoothed diameter converted to the selected unit.
    pub diameter: Vec<f64>,
    /// Diametrical strain, unitless.
    pub strain: Vec<f64>,
    /// Strain rate converted to the selected unit.
    pub strain_rate: Vec<f64>,
    /// The unit selection the series were converted with.
    pub units: UnitSelection,
}

impl DerivedSeries {
    /// Number of samples in each of the four series.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the series are empty.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Run the measurement-transformation pipeline.
///
/// Pairs with a non-finite time or diameter are dropped first; the remaining
/// rows are smoothed, converted, and differentiated as described in the
/// module docs. `reference_diameter_mm` is the operator-supplied initial
/// diameter in millimetres.
pub fn transform(
    raw: &RawSamples,
    reference_diameter_mm: f64,
    units: UnitSelection,
) -> Result<DerivedSeries, PipelineError> {
    if raw.time_s.len() != raw.diameter_mm.len() {
        return Err(PipelineError::ColumnLengthMismatch {
            time_len: raw.time_s.len(),
            diameter_len: raw.diameter_mm.len(),
        });
    }
    if reference_diameter_mm <= 0.0 || reference_diameter_mm.is_nan() {
        return Err(PipelineError::InvalidReference {
            value: reference_diameter_mm,
        });
    }

    let (time_s, diameter_mm): (Vec<f64>, Vec<f64>) = raw
        .time_s
        .iter()
        .zip(&raw.diameter_mm)
        .filter(|(t, d)| t.is_finite() && d.is_finite())
        .map(|(t, d)| (*t, *d))
        .unzip();
    if time_s.len() < MIN_VALID_ROWS {
        return Err(PipelineError::InsufficientData { rows: time_s.len() });
    }
    debug!(
        "transform: {} usable rows ({} dropped as non-finite)",
        time_s.len(),
        raw.len() - time_s.len()
    );

    let filter = SavitzkyGolay::new(SMOOTHING_WINDOW, SMOOTHING_ORDER)?;
    let smoothed = filter.smooth(&diameter_mm)?;

    let time_factor = units.time.divisor();
    let time: Vec<f64> = time_s.iter().map(|t| t / time_factor).collect();

    let diameter_scale = units.diameter.factor();
    let diameter: Vec<f64> = smoothed.iter().map(|d| d * diameter_scale).collect();
    let reference = reference_diameter_mm * diameter_scale;

    let strain: Vec<f64> = diameter
        .iter()
        .map(|d| (d - reference) / reference)
        .collect();

    // Base rate in 1/s: gradient against the original, unconverted times.
    let rate_scale = units.strain_rate.multiplier(time_factor);
    let strain_rate: Vec<f64> = gradient(&strain, &time_s)
        .iter()
        .map(|r| r * rate_scale)
        .collect();

    Ok(DerivedSeries {
        time,
        diameter,
        strain,
        strain_rate,
        units,
    })
}

/// Numerical gradient of `values` with respect to `coords`.
///
/// Central differences in the interior, one-sided differences at the two
/// ends. Repeated coordinates produce non-finite entries, matching the
/// instrument tool's behaviour; the log validator warns about them upstream.
fn gradient(values: &[f64], coords: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut out = Vec::with_capacity(n);
    if n < 2 {
        out.resize(n, 0.0);
        return out;
    }
    out.push((values[1] - values[0]) / (coords[1] - coords[0]));
    for i in 1..n - 1 {
        out.push((values[i + 1] - values[i - 1]) / (coords[i + 1] - coords[i - 1]));
    }
    out.push((values[n - 1] - values[n - 2]) / (coords[n - 1] - coords[n - 2]));
    out
}
