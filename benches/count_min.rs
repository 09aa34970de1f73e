//! Benchmarks for count-min sketch updates and queries
//!
//! Run with: cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use cms_rust::{AtomicCountMinSketch, CountMinSketch, FrequencyCounter};

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_min");
    group.throughput(Throughput::Elements(1));

    for width in [1_000, 10_000, 100_000] {
        group.bench_function(format!("add_w{}", width), |b| {
            let mut cms: CountMinSketch = CountMinSketch::new(width, 10).unwrap();
            let mut i = 0u64;
            b.iter(|| {
                cms.increment(&i.to_le_bytes());
                i = i.wrapping_add(1);
            });
        });
    }

    group.bench_function("estimate", |b| {
        let mut cms: CountMinSketch = CountMinSketch::new(10_000, 10).unwrap();
        for i in 0..100_000u64 {
            cms.increment(&i.to_le_bytes());
        }
        let mut i = 0u64;
        b.iter(|| {
            let estimate = cms.estimate(&i.to_le_bytes());
            i = (i + 1) % 100_000;
            black_box(estimate)
        });
    });

    group.bench_function("atomic_add", |b| {
        let cms: AtomicCountMinSketch = AtomicCountMinSketch::new(10_000, 10).unwrap();
        let mut i = 0u64;
        b.iter(|| {
            cms.increment(&i.to_le_bytes());
            i = i.wrapping_add(1);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_add);
criterion_main!(benches);
