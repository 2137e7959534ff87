use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use lfukit::{Cache, LfuCache};

const TTL: Duration = Duration::from_secs(300);

fn keys(n: u64) -> Vec<String> {
    (0..n).map(|i| format!("key-{i}")).collect()
}

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_get");
    let keys = keys(1024);
    group.throughput(Throughput::Elements(keys.len() as u64));
    group.bench_function("hit", |b| {
        let cache: LfuCache<u64> = LfuCache::new(1024);
        for (i, key) in keys.iter().enumerate() {
            cache.set(key, i as u64, TTL);
        }
        b.iter(|| {
            for key in &keys {
                black_box(cache.get(black_box(key)));
            }
        });
    });
    group.finish();
}

fn bench_set_with_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_set");
    let warm = keys(1024);
    let fresh = keys(2048);
    group.throughput(Throughput::Elements(1024));
    group.bench_function("insert_evict", |b| {
        b.iter_batched(
            || {
                let cache: LfuCache<u64> = LfuCache::new(1024);
                for (i, key) in warm.iter().enumerate() {
                    cache.set(key, i as u64, TTL);
                }
                cache
            },
            |cache| {
                // Every insert past the warm set evicts one victim.
                for key in &fresh[1024..] {
                    cache.set(black_box(key), 0, TTL);
                }
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn bench_mixed_shared(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_mixed");
    let keys = keys(4096);
    group.throughput(Throughput::Elements(keys.len() as u64));
    group.bench_function("set_get_shared", |b| {
        let cache: Arc<LfuCache<u64>> = Arc::new(LfuCache::new(1024));
        b.iter(|| {
            for (i, key) in keys.iter().enumerate() {
                if i % 4 == 0 {
                    cache.set(black_box(key), i as u64, TTL);
                } else {
                    black_box(cache.get(black_box(key)));
                }
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_get_hit,
    bench_set_with_eviction,
    bench_mixed_shared
);
criterion_main!(benches);
