//! Labeled series for an external plot renderer.
//!
//! The pipeline's consumers draw four linked panels. This module packages the
//! derived series into self-describing (x, y) pairs with axis labels so the
//! renderer needs no knowledge of units or derivation. Each series owns its
//! data; the renderer is free to move the set onto its UI thread.

use crate::pipeline::DerivedSeries;

/// One labeled (x, y) series for a single plot panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    /// Legend label of the trace.
    pub label: String,
    /// X-axis label, including the unit.
    pub x_label: String,
    /// Y-axis label, including the unit.
    pub y_label: String,
    /// X values.
    pub x: Vec<f64>,
    /// Y values.
    pub y: Vec<f64>,
}

impl PlotSeries {
    /// Number of points in the series.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the series holds no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// The four linked panels drawn from one pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSet {
    /// Absolute diameter over time.
    pub diameter: PlotSeries,
    /// Diametrical strain over time.
    pub strain: PlotSeries,
    /// Strain rate over time.
    pub strain_rate: PlotSeries,
    /// Strain rate against strain (the creep curve).
    pub creep: PlotSeries,
}

impl PlotSet {
    /// Package a derived series into the four standard panels.
    pub fn from_series(series: &DerivedSeries) -> Self {
        let time_label = format!("Time ({})", series.units.time.label());
        let diameter_label = format!("Diameter ({})", series.units.diameter.label());
        let strain_label = "Diametrical Strain (unitless)".to_string();
        let rate_label = format!("Strain Rate ({})", series.units.strain_rate.label());

        Self {
            diameter: PlotSeries {
                label: "Absolute Diameter".to_string(),
                x_label: time_label.clone(),
                y_label: diameter_label,
                x: series.time.clone(),
                y: series.diameter.clone(),
            },
            strain: PlotSeries {
                label: "Diametrical Strain".to_string(),
                x_label: time_label.clone(),
                y_label: strain_label.clone(),
                x: series.time.clone(),
                y: series.strain.clone(),
            },
            strain_rate: PlotSeries {
                label: "Strain Rate".to_string(),
                x_label: time_label,
                y_label: rate_label.clone(),
                x: series.time.clone(),
                y: series.strain_rate.clone(),
            },
            creep: PlotSeries {
                label: "Creep Rate vs Strain".to_string(),
                x_label: strain_label,
                y_label: rate_label,
                x: series.strain.clone(),
                y: series.strain_rate.clone(),
            },
        }
    }

    /// The panels in drawing order.
    pub fn panels(&self) -> [&PlotSeries; 4] {
        [&self.diameter, &self.strain, &self.strain_rate, &self.creep]
    }
}
