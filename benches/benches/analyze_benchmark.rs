//! Analysis pipeline benchmarks over synthetic daily series.
//!
//! Run with: `cargo bench --package divscan-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use divscan_bench::synthetic_series;
use divscan_divergence::{PivotParams, classify_divergences, find_pivots};
use divscan_macd::{MacdParams, compute_macd};
use divscan_screen::{ScreenParams, analyze};

/// One trading year, four years, and a couple of decades of daily bars.
const SIZES: &[usize] = &[250, 1_000, 5_000];

fn macd_benchmark(c: &mut Criterion) {
    let params = MacdParams::default();
    let mut group = c.benchmark_group("compute_macd");

    for &days in SIZES {
        let series = synthetic_series(days);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &series, |b, series| {
            b.iter(|| compute_macd(series, &params));
        });
    }

    group.finish();
}

fn pivot_benchmark(c: &mut Criterion) {
    let params = PivotParams::default();
    let mut group = c.benchmark_group("find_pivots");

    for &days in SIZES {
        let lows = synthetic_series(days).lows();
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &lows, |b, lows| {
            b.iter(|| find_pivots(lows, &params));
        });
    }

    group.finish();
}

fn classify_benchmark(c: &mut Criterion) {
    let macd_params = MacdParams::default();
    let pivot_params = PivotParams::default();
    let mut group = c.benchmark_group("classify_divergences");

    for &days in SIZES {
        let series = synthetic_series(days);
        let oscillator = compute_macd(&series, &macd_params);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(days),
            &(series, oscillator),
            |b, (series, oscillator)| {
                b.iter(|| classify_divergences(series, oscillator, &pivot_params).unwrap());
            },
        );
    }

    group.finish();
}

fn analyze_benchmark(c: &mut Criterion) {
    let params = ScreenParams::default();
    let mut group = c.benchmark_group("analyze");

    for &days in SIZES {
        let series = synthetic_series(days);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &series, |b, series| {
            b.iter(|| analyze(series, &params).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    macd_benchmark,
    pivot_benchmark,
    classify_benchmark,
    analyze_benchmark
);
criterion_main!(benches);
