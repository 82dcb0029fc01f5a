//! # State View Benchmarks
//!
//! Measures loading and validating state views.
//!
//! Run: `cargo bench --bench tables_bench`

use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fvfg_core::prelude::*;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../fvfg-core/tests/fixtures")
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_views");
    let dir = fixture_dir();

    group.bench_function("load_dir_g4", |b| {
        b.iter(|| store::load_dir(black_box(&dir), 4).unwrap())
    });

    let tables = store::load_dir(&dir, 4).unwrap();
    group.bench_function("new_g4", |b| {
        b.iter(|| {
            StateTables::new(
                4,
                tables.encode_keys().to_vec(),
                tables.encode_states().to_vec(),
                tables.decode_keys().to_vec(),
                tables.decode_states().to_vec(),
            )
            .unwrap()
        })
    });

    group.bench_function("clone", |b| b.iter(|| black_box(tables.clone())));

    group.finish();
}

criterion_group!(benches, bench_load);
criterion_main!(benches);
