//! Property tests for the measurement pipeline.

use proptest::prelude::*;

use creeptrace::pipeline::{transform, RawSamples};
use creeptrace::units::{DiameterUnit, StrainRateUnit, TimeUnit, UnitSelection};

const TOLERANCE: f64 = 1e-9;

/// Strictly increasing times plus plausible diameters, 5 to 60 rows.
fn samples() -> impl Strategy<Value = RawSamples> {
    (5usize..60)
        .prop_flat_map(|n| {
            (
                proptest::collection::vec(0.01f64..100.0, n),
                proptest::collection::vec(1.0f64..50.0, n),
            )
        })
        .prop_map(|(deltas, diameter_mm)| {
            let mut t = 0.0;
            let time_s = deltas
                .iter()
                .map(|d| {
                    t += d;
                    t
                })
                .collect();
            RawSamples::from_columns(time_s, diameter_mm)
        })
}

proptest! {
    #[test]
    fn derived_series_stay_aligned(raw in samples()) {
        let series = transform(&raw, 9.5, UnitSelection::default()).unwrap();
        prop_assert_eq!(series.len(), raw.len());
        prop_assert_eq!(series.time.len(), series.diameter.len());
        prop_assert_eq!(series.diameter.len(), series.strain.len());
        prop_assert_eq!(series.strain.len(), series.strain_rate.len());
    }

    #[test]
    fn transform_is_idempotent(raw in samples()) {
        let first = transform(&raw, 9.5, UnitSelection::default()).unwrap();
        let second = transform(&raw, 9.5, UnitSelection::default()).unwrap();
        for (a, b) in first.strain.iter().zip(&second.strain) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
        for (a, b) in first.strain_rate.iter().zip(&second.strain_rate) {
            prop_assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn micron_diameters_round_trip_to_millimetres(raw in samples()) {
        let mm = transform(&raw, 9.5, UnitSelection::default()).unwrap();
        let um = transform(
            &raw,
            9.5,
            UnitSelection {
                diameter: DiameterUnit::Micrometers,
                ..UnitSelection::default()
            },
        )
        .unwrap();
        for (d_mm, d_um) in mm.diameter.iter().zip(&um.diameter) {
            prop_assert!((d_mm - d_um / 1000.0).abs() < TOLERANCE * d_mm.abs().max(1.0));
        }
    }

    #[test]
    fn converted_time_scales_back_to_seconds(raw in samples()) {
        for unit in [TimeUnit::Seconds, TimeUnit::Minutes, TimeUnit::Hours] {
            let series = transform(
                &raw,
                9.5,
                UnitSelection { time: unit, ..UnitSelection::default() },
            )
            .unwrap();
            for (converted, original) in series.time.iter().zip(&raw.time_s) {
                let back = converted * unit.divisor();
                prop_assert!((back - original).abs() < TOLERANCE * original.abs().max(1.0));
            }
        }
    }

    #[test]
    fn rate_units_scale_by_the_fixed_table(raw in samples()) {
        let base = transform(&raw, 9.5, UnitSelection::default()).unwrap();
        let cases = [
            (StrainRateUnit::PerMinute, 60.0),
            (StrainRateUnit::PerHour, 3600.0),
            (StrainRateUnit::MicronsPerSecond, 1000.0),
            (StrainRateUnit::MicronsPerHour, 1000.0 * 3600.0),
        ];
        for (unit, scale) in cases {
            let scaled = transform(
                &raw,
                9.5,
                UnitSelection { strain_rate: unit, ..UnitSelection::default() },
            )
            .unwrap();
            for (r, rs) in base.strain_rate.iter().zip(&scaled.strain_rate) {
                prop_assert!((r * scale - rs).abs() < TOLERANCE * rs.abs().max(1.0));
            }
        }
    }

    #[test]
    fn strain_is_zero_where_diameter_matches_the_reference(
        reference in 1.0f64..50.0,
        n in 5usize..40,
    ) {
        let raw = RawSamples::from_columns(
            (0..n).map(|i| i as f64).collect(),
            vec![reference; n],
        );
        let series = transform(&raw, reference, UnitSelection::default()).unwrap();
        for strain in &series.strain {
            prop_assert!(strain.abs() < TOLERANCE);
        }
    }
}
