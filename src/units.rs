//! Measurement units for the derived series.
//!
//! The instrument logs time in seconds and diameter in millimetres; every
//! other unit is reached through the fixed conversion table below. The time
//! divisor (`time_factor`) is reused by the strain-rate conversion, so the
//! exact table in [`StrainRateUnit::multiplier`] must not be "simplified".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a textual unit label cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} unit {value:?} (expected one of: {expected})")]
pub struct UnitParseError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl UnitParseError {
    fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// Unit for the time axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Seconds, the instrument's base unit.
    #[default]
    #[serde(rename = "s")]
    Seconds,
    /// Minutes.
    #[serde(rename = "min")]
    Minutes,
    /// Hours.
    #[serde(rename = "hour")]
    Hours,
}

impl TimeUnit {
    /// Divisor applied to raw time values in seconds.
    ///
    /// This value doubles as the `time_factor` consumed by
    /// [`StrainRateUnit::multiplier`].
    pub fn divisor(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
        }
    }

    /// Short label used in axis labels and export headers.
    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
            TimeUnit::Hours => "hour",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(TimeUnit::Seconds),
            "min" => Ok(TimeUnit::Minutes),
            "hour" => Ok(TimeUnit::Hours),
            other => Err(UnitParseError::new("time", other, "s, min, hour")),
        }
    }
}

/// Unit for the diameter axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiameterUnit {
    /// Millimetres, the instrument's base unit.
    #[default]
    #[serde(rename = "mm")]
    Millimeters,
    /// Micrometres.
    #[serde(rename = "μm", alias = "um")]
    Micrometers,
}

impl DiameterUnit {
    /// Multiplier applied to diameters in millimetres.
    ///
    /// The same multiplier is applied to the reference diameter before the
    /// strain is computed, which keeps the strain unitless.
    pub fn factor(self) -> f64 {
        match self {
            DiameterUnit::Millimeters => 1.0,
            DiameterUnit::Micrometers => 1000.0,
        }
    }

    /// Short label used in axis labels and export headers.
    pub fn label(self) -> &'static str {
        match self {
            DiameterUnit::Millimeters => "mm",
            DiameterUnit::Micrometers => "μm",
        }
    }
}

impl fmt::Display for DiameterUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DiameterUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mm" => Ok(DiameterUnit::Millimeters),
            "μm" | "um" => Ok(DiameterUnit::Micrometers),
            other => Err(UnitParseError::new("diameter", other, "mm, μm")),
        }
    }
}

/// Unit for the strain-rate axis.
///
/// The `μm/*` variants scale the rate by the diameter multiplier on top of
/// the time scaling, yielding a diameter-unit-scaled rate rather than a pure
/// strain rate. The full multiplier table lives in [`Self::multiplier`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrainRateUnit {
    /// Pure strain rate per second.
    #[default]
    #[serde(rename = "1/s")]
    PerSecond,
    /// Pure strain rate per minute.
    #[serde(rename = "1/min")]
    PerMinute,
    /// Pure strain rate per hour.
    #[serde(rename = "1/hour")]
    PerHour,
    /// Diameter-scaled rate in micrometres per second.
    #[serde(rename = "μm/s", alias = "um/s")]
    MicronsPerSecond,
    /// Diameter-scaled rate in micrometres per minute.
    #[serde(rename = "μm/min", alias = "um/min")]
    MicronsPerMinute,
    /// Diameter-scaled rate in micrometres per hour.
    #[serde(rename = "μm/hour", alias = "um/hour")]
    MicronsPerHour,
}

impl StrainRateUnit {
    /// Multiplier applied to the base 1/s gradient.
    ///
    /// `time_factor` is the divisor of the active [`TimeUnit`]. The gradient
    /// is always taken against the original time values in seconds and then
    /// rescaled with this table, so every entry starts from `time_factor`.
    pub fn multiplier(self, time_factor: f64) -> f64 {
        match self {
            StrainRateUnit::PerSecond => time_factor,
            StrainRateUnit::PerMinute => time_factor * 60.0,
            StrainRateUnit::PerHour => time_factor * 3600.0,
            StrainRateUnit::MicronsPerSecond => time_factor * 1000.0,
            StrainRateUnit::MicronsPerMinute => time_factor * 1000.0 * 60.0,
            StrainRateUnit::MicronsPerHour => time_factor * 1000.0 * 3600.0,
        }
    }

    /// Short label used in axis labels and export headers.
    pub fn label(self) -> &'static str {
        match self {
            StrainRateUnit::PerSecond => "1/s",
            StrainRateUnit::PerMinute => "1/min",
            StrainRateUnit::PerHour => "1/hour",
            StrainRateUnit::MicronsPerSecond => "μm/s",
            StrainRateUnit::MicronsPerMinute => "μm/min",
            StrainRateUnit::MicronsPerHour => "μm/hour",
        }
    }
}

impl fmt::Display for StrainRateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StrainRateUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1/s" => Ok(StrainRateUnit::PerSecond),
            "1/min" => Ok(StrainRateUnit::PerMinute),
            "1/hour" => Ok(StrainRateUnit::PerHour),
            "μm/s" | "um/s" => Ok(StrainRateUnit::MicronsPerSecond),
            "μm/min" | "um/min" => Ok(StrainRateUnit::MicronsPerMinute),
            "μm/hour" | "um/hour" => Ok(StrainRateUnit::MicronsPerHour),
            other => Err(UnitParseError::new(
                "strain-rate",
                other,
                "1/s, 1/min, 1/hour, μm/s, μm/min, μm/hour",
            )),
        }
    }
}

/// The operator's unit selection, supplied fresh on every pipeline call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSelection {
    /// Unit for the time axis.
    pub time: TimeUnit,
    /// Unit for the diameter axis.
    pub diameter: DiameterUnit,
    /// Unit for the strain-rate axis.
    pub strain_rate: StrainRateUnit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_divisors() {
        assert_eq!(TimeUnit::Seconds.divisor(), 1.0);
        assert_eq!(TimeUnit::Minutes.divisor(), 60.0);
        assert_eq!(TimeUnit::Hours.divisor(), 3600.0);
    }

    #[test]
    fn test_diameter_factors() {
        assert_eq!(DiameterUnit::Millimeters.factor(), 1.0);
        assert_eq!(DiameterUnit::Micrometers.factor(), 1000.0);
    }

    #[test]
    fn test_strain_rate_multiplier_table() {
        for &tf in &[1.0, 60.0, 3600.0] {
            assert_eq!(StrainRateUnit::PerSecond.multiplier(tf), tf);
            assert_eq!(StrainRateUnit::PerMinute.multiplier(tf), tf * 60.0);
            assert_eq!(StrainRateUnit::PerHour.multiplier(tf), tf * 3600.0);
            assert_eq!(StrainRateUnit::MicronsPerSecond.multiplier(tf), tf * 1000.0);
            assert_eq!(
                StrainRateUnit::MicronsPerMinute.multiplier(tf),
                tf * 1000.0 * 60.0
            );
            assert_eq!(
                StrainRateUnit::MicronsPerHour.multiplier(tf),
                tf * 1000.0 * 3600.0
            );
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(TimeUnit::Minutes.label(), "min");
        assert_eq!(DiameterUnit::Micrometers.label(), "μm");
        assert_eq!(StrainRateUnit::MicronsPerHour.label(), "μm/hour");
        assert_eq!(StrainRateUnit::PerSecond.to_string(), "1/s");
    }

    #[test]
    fn test_parse_round_trip() {
        for unit in [TimeUnit::Seconds, TimeUnit::Minutes, TimeUnit::Hours] {
            assert_eq!(unit.label().parse::<TimeUnit>().unwrap(), unit);
        }
        for unit in [DiameterUnit::Millimeters, DiameterUnit::Micrometers] {
            assert_eq!(unit.label().parse::<DiameterUnit>().unwrap(), unit);
        }
        for unit in [
            StrainRateUnit::PerSecond,
            StrainRateUnit::PerMinute,
            StrainRateUnit::PerHour,
            StrainRateUnit::MicronsPerSecond,
            StrainRateUnit::MicronsPerMinute,
            StrainRateUnit::MicronsPerHour,
        ] {
            assert_eq!(unit.label().parse::<StrainRateUnit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_parse_ascii_aliases() {
        assert_eq!("um".parse::<DiameterUnit>().unwrap(), DiameterUnit::Micrometers);
        assert_eq!(
            "um/min".parse::<StrainRateUnit>().unwrap(),
            StrainRateUnit::MicronsPerMinute
        );
    }

    #[test]
    fn test_parse_unknown_unit() {
        let err = "days".parse::<TimeUnit>().unwrap_err();
        assert!(err.to_string().contains("days"));
        assert!("cm".parse::<DiameterUnit>().is_err());
        assert!("1/day".parse::<StrainRateUnit>().is_err());
    }

    #[test]
    fn test_selection_toml_round_trip() {
        let selection = UnitSelection {
            time: TimeUnit::Minutes,
            diameter: DiameterUnit::Micrometers,
            strain_rate: StrainRateUnit::MicronsPerHour,
        };
        let text = toml::to_string(&selection).unwrap();
        let back: UnitSelection = toml::from_str(&text).unwrap();
        assert_eq!(back, selection);
    }
}
