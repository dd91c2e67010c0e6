#![allow(unused)]
extern crate resforge;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use resforge::prelude::*;
use std::hint::black_box;

/// Builds a pool shaped like the value strings of a mid-sized app: mostly unique strings,
/// some repeated, a handful of styled ones.
fn build_pool(count: usize) -> (StringPool, Vec<StringRef>, Vec<StyleRef>) {
    let mut pool = StringPool::new();
    let mut refs = Vec::with_capacity(count);
    let mut styles = Vec::new();

    for i in 0..count {
        refs.push(pool.make_ref(&format!("string value number {}", i % (count / 2 + 1))));
        if i % 50 == 0 {
            let style = StyleString {
                text: format!("Styled text {i}"),
                spans: vec![StyleSpan::new("b", 0, 5), StyleSpan::new("i", 7, 10)],
            };
            styles.push(pool.make_style_ref(&style));
        }
    }
    pool.sort_by_context();
    (pool, refs, styles)
}

/// Benchmark interning throughput with deduplication
fn bench_intern(c: &mut Criterion) {
    let mut group = c.benchmark_group("stringpool_intern");
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("make_ref_10k", |b| {
        b.iter(|| black_box(build_pool(black_box(10_000))));
    });
    group.finish();
}

/// Benchmark flattening in both encodings and reading the chunk back
fn bench_flatten(c: &mut Criterion) {
    let (pool, _refs, _styles) = build_pool(10_000);
    let bytes = StringPool::flatten(&pool, true).expect("flatten failed");

    println!(
        "Benchmarking pool: {} strings, {} styles, {} bytes as UTF-8",
        pool.len(),
        pool.styles_len(),
        bytes.len()
    );

    let mut group = c.benchmark_group("stringpool_flatten");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("utf8", |b| {
        b.iter(|| black_box(StringPool::flatten(black_box(&pool), true)));
    });
    group.bench_function("utf16", |b| {
        b.iter(|| black_box(StringPool::flatten(black_box(&pool), false)));
    });
    group.bench_function("read_back", |b| {
        b.iter(|| {
            let view = StringPoolView::from(black_box(&bytes)).expect("invalid pool");
            for i in 0..view.len() {
                black_box(view.get(i).expect("invalid string"));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_intern, bench_flatten);
criterion_main!(benches);
