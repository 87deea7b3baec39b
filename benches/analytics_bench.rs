//! Benchmarks for the search analytics store
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use search_analytics::analytics::{popular_searches, recent_searches, EventRecorder};
use search_analytics::storage::*;
use std::sync::Arc;
use tempfile::tempdir;

/// A full log with a skewed query distribution
fn create_full_log() -> EventLog {
    EventLog::from_events(
        (0..DEFAULT_MAX_EVENTS)
            .map(|i| {
                let query = format!("query-{}", (i * i) % 97);
                NewSearchEvent::new(query, i as u64)
                    .filter("page", (i % 5) as u64)
                    .into_event()
            })
            .collect(),
    )
}

fn bench_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("views");
    let log = create_full_log();

    group.throughput(Throughput::Elements(log.len() as u64));

    group.bench_function("popular_1000", |b| {
        b.iter(|| popular_searches(black_box(log.events()), 10))
    });

    group.bench_function("recent_1000", |b| {
        b.iter(|| recent_searches(black_box(&log), 10))
    });

    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("json_file_store");
    let log = create_full_log();

    group.bench_function("save_1000", |b| {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("bench.json"));

        b.iter(|| rt.block_on(store.save(black_box(&log))).unwrap());
    });

    group.bench_function("load_1000", |b| {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("bench.json"));
        rt.block_on(store.save(&log)).unwrap();

        b.iter(|| rt.block_on(store.load()).unwrap());
    });

    group.bench_function("record_at_cap", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let dir = tempdir().unwrap();
                let store = Arc::new(JsonFileStore::new(dir.path().join("bench.json")));
                store.save(&log).await.unwrap();
                let recorder = EventRecorder::new(store);

                let start = std::time::Instant::now();

                for i in 0..iters {
                    recorder
                        .record(NewSearchEvent::new(format!("bench-{}", i), 1))
                        .await
                        .unwrap();
                }

                start.elapsed()
            })
        });
    });

    group.finish();
}

criterion_group!(benches, bench_views, bench_store);
criterion_main!(benches);
