use criterion::{black_box, criterion_group, criterion_main, Criterion};

use creeptrace::pipeline::{transform, RawSamples};
use creeptrace::smoothing::SavitzkyGolay;
use creeptrace::units::UnitSelection;

fn synthetic_log(rows: usize) -> RawSamples {
    let time_s: Vec<f64> = (0..rows).map(|i| i as f64 * 10.0).collect();
    let diameter_mm: Vec<f64> = (0..rows)
        .map(|i| 9.5 + 0.0001 * i as f64 + 0.0005 * (i as f64 * 0.1).sin())
        .collect();
    RawSamples::from_columns(time_s, diameter_mm)
}

fn bench_transform(c: &mut Criterion) {
    let raw = synthetic_log(10_000);
    c.bench_function("transform_10k_rows", |b| {
        b.iter(|| transform(black_box(&raw), 9.5, UnitSelection::default()).unwrap())
    });
}

fn bench_smoothing(c: &mut Criterion) {
    let raw = synthetic_log(10_000);
    let filter = SavitzkyGolay::new(5, 2).unwrap();
    c.bench_function("savitzky_golay_10k_rows", |b| {
        b.iter(|| filter.smooth(black_box(&raw.diameter_mm)).unwrap())
    });
}

criterion_group!(benches, bench_transform, bench_smoothing);
criterion_main!(benches);
