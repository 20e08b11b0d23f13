//! Criterion benchmarks for the feed hot paths.
//!
//! Benchmarks:
//! 1. Parsing the 32-currency daily feed
//! 2. Cross-rate lookups against a parsed table
//! 3. Re-basing the full table on another currency

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fxref_core::{parse, ReferenceRates};

const FIXTURE: &[u8] = include_bytes!("../tests/fixtures/eurofxref-2021-05-07.xml");

// ── Helpers ──────────────────────────────────────────────────────────

fn fixture_table() -> ReferenceRates {
    parse(FIXTURE).expect("fixture parses")
}

// ── 1. Parsing ───────────────────────────────────────────────────────

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_daily_feed", |b| {
        b.iter(|| parse(black_box(FIXTURE)).unwrap())
    });
}

// ── 2. Pair rates ────────────────────────────────────────────────────

fn bench_pair_rate(c: &mut Criterion) {
    let table = fixture_table();
    let mut group = c.benchmark_group("pair_rate");
    for (from, to) in [("EUR", "JPY"), ("USD", "EUR"), ("BRL", "NZD"), ("USD", "XXX")] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{from}->{to}")),
            &(from, to),
            |b, &(from, to)| b.iter(|| table.pair_rate(black_box(100.0), from, to)),
        );
    }
    group.finish();
}

// ── 3. Re-basing ─────────────────────────────────────────────────────

fn bench_rebase(c: &mut Criterion) {
    let table = fixture_table();
    let mut group = c.benchmark_group("rebased_rates");
    for base in ["EUR", "USD", "ZAR"] {
        group.bench_with_input(BenchmarkId::from_parameter(base), base, |b, base| {
            b.iter(|| table.rebased_rates(black_box(1.0), base))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_pair_rate, bench_rebase);
criterion_main!(benches);
