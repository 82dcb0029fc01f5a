//! # Transform Benchmarks
//!
//! Measures plain vs batch encode/decode over the checked-in g = 4 state views.
//!
//! Run: `cargo bench --bench transform_bench`

use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fvfg_core::prelude::*;

const GROUP_SIZE: u32 = 4;

fn fixture_tables() -> StateTables {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../fvfg-core/tests/fixtures");
    store::load_dir(dir, GROUP_SIZE).expect("fixture state views")
}

/// Single encode, plain vs precomputed context
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let tables = fixture_tables();

    for order in [8u32, 16, 21, 32] {
        let ctx = BatchContext::for_encode(order, GROUP_SIZE, &tables).unwrap();
        let max = ((1u64 << order) - 1) as u32;
        let (x, y) = (max / 3, max / 7);

        group.bench_with_input(BenchmarkId::new("plain", order), &order, |b, &order| {
            b.iter(|| encode(black_box(x), black_box(y), order, GROUP_SIZE, &tables))
        });

        group.bench_with_input(BenchmarkId::new("batch", order), &ctx, |b, ctx| {
            b.iter(|| encode_batch(black_box(x), black_box(y), ctx, &tables))
        });
    }

    group.finish();
}

/// Single decode, plain vs precomputed context
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let tables = fixture_tables();

    for order in [8u32, 16, 21, 32] {
        let ctx = BatchContext::for_decode(order, GROUP_SIZE, &tables).unwrap();
        let index = if order == MAX_ORDER {
            u64::MAX / 5
        } else {
            ((1u64 << (2 * order)) - 1) / 5
        };

        group.bench_with_input(BenchmarkId::new("plain", order), &order, |b, &order| {
            b.iter(|| decode(black_box(index), order, GROUP_SIZE, &tables))
        });

        group.bench_with_input(BenchmarkId::new("batch", order), &ctx, |b, ctx| {
            b.iter(|| decode_batch(black_box(index), ctx, &tables))
        });
    }

    group.finish();
}

/// Slice throughput
fn bench_slices(c: &mut Criterion) {
    let mut group = c.benchmark_group("slices");
    let tables = fixture_tables();
    let order = 16;
    let enc = BatchContext::for_encode(order, GROUP_SIZE, &tables).unwrap();
    let dec = BatchContext::for_decode(order, GROUP_SIZE, &tables).unwrap();

    for size in [256usize, 4096, 65536] {
        let xs: Vec<u32> = (0..size as u32).map(|i| i % 65536).collect();
        let ys: Vec<u32> = (0..size as u32).map(|i| (i * 31) % 65536).collect();
        let mut indices = vec![0u64; size];
        let (mut out_x, mut out_y) = (vec![0u32; size], vec![0u32; size]);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("encode_slice", size), &size, |b, _| {
            b.iter(|| encode_slice(&enc, &tables, &xs, &ys, &mut indices).unwrap())
        });

        encode_slice(&enc, &tables, &xs, &ys, &mut indices).unwrap();
        group.bench_with_input(BenchmarkId::new("decode_slice", size), &size, |b, _| {
            b.iter(|| decode_slice(&dec, &tables, &indices, &mut out_x, &mut out_y).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_slices);
criterion_main!(benches);
