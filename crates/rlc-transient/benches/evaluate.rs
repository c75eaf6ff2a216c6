//! Benchmarks for series evaluation and resistance sweeps.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rlc_transient::measure::DEFAULT_SETTLING_BAND;
use rlc_transient::{
    CircuitParameters, SimulationConfig, critical_resistance, derive_series, resistance_values,
    sweep_resistance,
};

fn bench_derive_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_series");
    let r_crit = critical_resistance(0.5, 0.1);

    for (name, r) in [
        ("underdamped", 2.0),
        ("critical", r_crit),
        ("overdamped", 10.0),
    ] {
        let params = CircuitParameters::new(r, 0.5, 0.1);
        let config = SimulationConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(name), &params, |bencher, p| {
            bencher.iter(|| derive_series(black_box(p), black_box(&config)).unwrap());
        });
    }

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep_resistance");
    let base = CircuitParameters::new(0.0, 0.5, 0.1);
    let config = SimulationConfig::default();

    for points in [10, 100, 1000] {
        let values = resistance_values(0.0, 20.0, points);
        group.bench_with_input(
            BenchmarkId::from_parameter(points),
            &values,
            |bencher, values| {
                bencher.iter(|| {
                    sweep_resistance(
                        black_box(&base),
                        black_box(values),
                        &config,
                        DEFAULT_SETTLING_BAND,
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_derive_series, bench_sweep);
criterion_main!(benches);
