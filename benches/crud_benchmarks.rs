use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;

use carmine_tree::RbTree;

const N: usize = 10_000;

// ─── Helper functions to generate value sequences ───────────────────────────

fn ordered_values(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_values(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_values(n: usize) -> Vec<i64> {
    // Use a simple LCG for a deterministic pseudo-random sequence
    let mut values = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        values.push((x >> 33) as i64);
    }
    values
}

// The std baseline: a BTreeMap used as a counting multiset.
fn baseline_insert(map: &mut BTreeMap<i64, usize>, value: i64) {
    *map.entry(value).or_insert(0) += 1;
}

// ─── Insert benchmarks ──────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion, name: &str, values: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("RbTree", N), |b| {
        b.iter(|| {
            let mut tree = RbTree::new();
            for &v in values {
                tree.insert(v);
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &v in values {
                baseline_insert(&mut map, v);
            }
            map
        });
    });

    group.finish();
}

fn bench_insert_ordered(c: &mut Criterion) {
    bench_insert(c, "insert_ordered", &ordered_values(N));
}

fn bench_insert_reverse(c: &mut Criterion) {
    bench_insert(c, "insert_reverse", &reverse_ordered_values(N));
}

fn bench_insert_random(c: &mut Criterion) {
    bench_insert(c, "insert_random", &random_values(N));
}

// ─── Lookup benchmarks ──────────────────────────────────────────────────────

fn bench_contains_random(c: &mut Criterion) {
    let values = random_values(N);
    let tree: RbTree<i64> = values.iter().copied().collect();
    let map: BTreeMap<i64, usize> = {
        let mut map = BTreeMap::new();
        for &v in &values {
            baseline_insert(&mut map, v);
        }
        map
    };

    let mut group = c.benchmark_group("contains_random");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for v in &values {
                if tree.contains(v) {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for v in &values {
                if map.contains_key(v) {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.finish();
}

// ─── Remove benchmarks ──────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let values = random_values(N);

    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| {
        b.iter_batched(
            || values.iter().copied().collect::<RbTree<i64>>(),
            |mut tree| {
                for v in &values {
                    tree.remove(v);
                }
                tree
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || {
                let mut map = BTreeMap::new();
                for &v in &values {
                    baseline_insert(&mut map, v);
                }
                map
            },
            |mut map| {
                for v in &values {
                    if let Some(count) = map.get_mut(v) {
                        *count -= 1;
                        if *count == 0 {
                            map.remove(v);
                        }
                    }
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ─── Traversal benchmarks ───────────────────────────────────────────────────

fn bench_in_order(c: &mut Criterion) {
    let values = random_values(N);
    let tree: RbTree<i64> = values.iter().copied().collect();

    let mut group = c.benchmark_group("in_order");

    group.bench_function(BenchmarkId::new("RbTree", N), |b| {
        b.iter(|| tree.in_order());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_ordered,
    bench_insert_reverse,
    bench_insert_random,
    bench_contains_random,
    bench_remove_random,
    bench_in_order,
);
criterion_main!(benches);
