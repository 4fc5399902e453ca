//! Criterion benchmarks for the recompute pass.
//!
//! Benchmarks:
//! 1. Single synthetic path
//! 2. Paths for many assets (rayon)
//! 3. Full filter → summarize → paths pass over a demo dataset

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use eventlab_core::sample::{sample_rows, DEFAULT_SEED};
use eventlab_core::{price_paths, summarize, synthetic_path, DashboardView, Dataset, Selection, SummaryRow};

fn make_summary(n: usize) -> Vec<SummaryRow> {
    (0..n)
        .map(|i| SummaryRow {
            asset: format!("A{i:04}"),
            immediate_return: ((i as f64) * 0.37).sin() * 0.01,
            vol_change: 10.0,
            max_drawdown: -0.5,
            time_to_peak: (i % 60) as f64,
            observations: 1,
        })
        .collect()
}

fn bench_single_path(c: &mut Criterion) {
    c.bench_function("synthetic_path", |b| {
        b.iter(|| synthetic_path(black_box(0.01), black_box(15.0)))
    });
}

fn bench_price_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_paths");
    for assets in [8usize, 100, 1000] {
        let summary = make_summary(assets);
        group.bench_with_input(BenchmarkId::new("assets", assets), &summary, |b, s| {
            b.iter(|| price_paths(black_box(s)))
        });
    }
    group.finish();
}

fn bench_recompute(c: &mut Criterion) {
    let dataset = Dataset::new(sample_rows(DEFAULT_SEED), "sample");
    let all = Selection::all(&dataset);
    let mut group = c.benchmark_group("recompute");

    group.bench_function("summarize_all", |b| {
        b.iter(|| summarize(black_box(dataset.rows())))
    });
    group.bench_function("dashboard_view_all", |b| {
        b.iter(|| DashboardView::compute(black_box(&dataset), black_box(&all)))
    });
    group.finish();
}

criterion_group!(benches, bench_single_path, bench_price_paths, bench_recompute);
criterion_main!(benches);
