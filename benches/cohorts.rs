//! This bench measures deriving the standard report cohorts from a large
//! synthetic population.

#![allow(missing_docs)]

use chrono::NaiveDate;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use vaxreg::{
    CohortKind, Config, ReportFormatter, Registry,
    storage::{SyntheticParams, synthetic},
};

fn populated_registry() -> Registry {
    let params = SyntheticParams {
        citizens: 50_000,
        per_kind: 15_000,
        reference_date: NaiveDate::from_ymd_opt(2021, 9, 1).unwrap(),
    };
    synthetic::generate(&params, 42)
        .ingest(true)
        .unwrap()
        .registry
}

fn derive_cohorts(c: &mut Criterion) {
    let registry = populated_registry();

    c.bench_function("derive standard cohorts", |b| {
        b.iter(|| {
            let engine = registry.cohorts();
            CohortKind::standard()
                .into_iter()
                .map(|kind| engine.cohort(kind).len())
                .sum::<usize>()
        });
    });
}

fn render_export(c: &mut Criterion) {
    let registry = populated_registry();
    let config = Config::default();
    let generated = chrono::Utc::now();

    c.bench_function("render export", |b| {
        b.iter_batched(
            || ReportFormatter::new(&registry, &config),
            |formatter| formatter.render_export(&generated).to_string(),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, derive_cohorts, render_export);
criterion_main!(benches);
