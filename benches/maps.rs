#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use proptest::{
    prelude::{Strategy, any, prop},
    strategy::ValueTree,
    test_runner::TestRunner,
};
use strmap::{ChainedMap, OpenAddressingMap};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;
const CHAINED_BUCKETS: usize = 256;

fn string_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = prop::collection::vec(("[a-z0-9]{1,16}", any::<u32>()), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("String map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);

    group.bench_function("open addressing put", |b| {
        b.iter_batched(
            || OpenAddressingMap::with_capacity(1).unwrap(),
            |mut map| {
                let placed = items
                    .iter()
                    .filter(|(key, value)| map.put(key, *value).is_ok())
                    .count();
                black_box((map, placed))
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("chained put", |b| {
        b.iter_batched(
            || ChainedMap::with_capacity(CHAINED_BUCKETS).unwrap(),
            |mut map| {
                for (key, value) in &items {
                    map.put(key, *value);
                }
                map
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("rust std insert", |b| {
        b.iter_batched(
            HashMap::new,
            |mut map| {
                for (key, value) in &items {
                    map.insert(key.clone(), *value);
                }
                map
            },
            BatchSize::SmallInput,
        );
    });

    let mut open_map = OpenAddressingMap::with_capacity(1).unwrap();
    let mut chained_map = ChainedMap::with_capacity(CHAINED_BUCKETS).unwrap();
    let mut rust_map = HashMap::new();
    for (key, value) in &items {
        if open_map.put(key, *value).is_err() {
            continue;
        }
        chained_map.put(key, *value);
        rust_map.insert(key.clone(), *value);
    }

    group.bench_function("open addressing get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                black_box(open_map.get(key));
            }
        });
    });
    group.bench_function("chained get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                black_box(chained_map.get(key));
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                black_box(rust_map.get(key));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, string_map_benches);

criterion_main!(benches);
