//! # probds Filter Benchmarks
//!
//! | Area | Operation | Expected cost |
//! |------|-----------|---------------|
//! | Bloom | add / contains | O(k) hashes |
//! | Bloom | merge | O(m/8) byte operations |
//! | Cuckoo | insert | O(1) amortized, bounded by `max_kicks` |
//! | Cuckoo | lookup / delete | Two bucket probes |
//! | Hashing | 32-bit seeded hash | Linear in key length |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use probds_membership::{BloomFilter, CuckooFilter, Fnv1, HashProvider, Murmur3, SipHash};
use probds_tests::random_keys;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

// ============================================================================
// BLOOM
// ============================================================================

fn bench_bloom_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom");
    group.measurement_time(Duration::from_secs(5));

    for capacity in [1_000usize, 10_000, 100_000] {
        let keys = random_keys(capacity, 32, 1);
        group.throughput(Throughput::Elements(capacity as u64));

        group.bench_with_input(BenchmarkId::new("add", capacity), &keys, |b, keys| {
            b.iter(|| {
                let mut filter = BloomFilter::new(capacity, 0.01).unwrap();
                for key in keys {
                    filter.add(black_box(key)).unwrap();
                }
                filter
            })
        });

        let mut filter = BloomFilter::new(capacity, 0.01).unwrap();
        for key in &keys {
            filter.add(key).unwrap();
        }
        let probes = random_keys(capacity, 32, 2);
        group.bench_with_input(
            BenchmarkId::new("contains_absent", capacity),
            &probes,
            |b, probes| {
                b.iter(|| {
                    probes
                        .iter()
                        .filter(|p| filter.contains(black_box(p)).unwrap())
                        .count()
                })
            },
        );
    }

    group.finish();
}

fn bench_bloom_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-merge");

    for capacity in [10_000usize, 1_000_000] {
        let mut left = BloomFilter::new(capacity, 0.01).unwrap();
        let mut right = BloomFilter::new(capacity, 0.01).unwrap();
        for key in random_keys(1_000, 32, 3) {
            left.add(&key).unwrap();
        }
        for key in random_keys(1_000, 32, 4) {
            right.add(&key).unwrap();
        }

        group.throughput(Throughput::Bytes((left.size_bits() / 8) as u64));
        group.bench_function(BenchmarkId::new("merge", capacity), |b| {
            b.iter(|| black_box(&left).merge(black_box(&right)).unwrap())
        });
        group.bench_function(BenchmarkId::new("intersect", capacity), |b| {
            b.iter(|| black_box(&left).intersect(black_box(&right)).unwrap())
        });
    }

    group.finish();
}

// ============================================================================
// CUCKOO
// ============================================================================

fn bench_cuckoo_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("cuckoo");
    group.measurement_time(Duration::from_secs(5));

    let capacity = 10_000usize;
    for bucket_size in [2usize, 4, 8] {
        // Stay below every bucket size's load-factor bound
        let keys = random_keys(capacity * 8 / 10, 32, 5);
        group.throughput(Throughput::Elements(keys.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("insert_80pct", bucket_size),
            &keys,
            |b, keys| {
                b.iter(|| {
                    let mut filter = CuckooFilter::with_rng(
                        capacity,
                        bucket_size,
                        0.01,
                        StdRng::seed_from_u64(6),
                    )
                    .unwrap();
                    let accepted = keys
                        .iter()
                        .filter(|k| filter.insert(black_box(k)).is_ok())
                        .count();
                    (filter, accepted)
                })
            },
        );

        let mut filter =
            CuckooFilter::with_rng(capacity, bucket_size, 0.01, StdRng::seed_from_u64(7)).unwrap();
        for key in &keys {
            let _ = filter.insert(key);
        }
        group.bench_with_input(BenchmarkId::new("lookup", bucket_size), &keys, |b, keys| {
            b.iter(|| keys.iter().filter(|k| filter.lookup(black_box(k))).count())
        });
    }

    group.finish();
}

fn bench_cuckoo_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("cuckoo-churn");

    let mut filter = CuckooFilter::with_rng(10_000, 4, 0.01, StdRng::seed_from_u64(8)).unwrap();
    let resident = random_keys(5_000, 32, 9);
    for key in &resident {
        let _ = filter.insert(key);
    }
    let transient = random_keys(1_000, 32, 10);

    group.throughput(Throughput::Elements(transient.len() as u64));
    group.bench_function("insert_then_delete", |b| {
        b.iter(|| {
            for key in &transient {
                if filter.insert(black_box(key)).is_ok() {
                    filter.delete(black_box(key));
                }
            }
        })
    });

    group.finish();
}

// ============================================================================
// HASHING
// ============================================================================

fn bench_hash_one<H: HashProvider>(c: &mut Criterion, hasher: H) {
    let mut group = c.benchmark_group(format!("hash-{}", hasher.name()));

    for len in [8usize, 32, 256] {
        let key = random_keys(1, len, 11).remove(0);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &key, |b, key| {
            b.iter(|| hasher.hash(black_box(7), black_box(key)))
        });
    }

    group.finish();
}

fn bench_hash_providers(c: &mut Criterion) {
    bench_hash_one(c, Murmur3);
    bench_hash_one(c, SipHash);
    bench_hash_one(c, Fnv1);
}

criterion_group!(
    benches,
    bench_bloom_operations,
    bench_bloom_merge,
    bench_cuckoo_operations,
    bench_cuckoo_churn,
    bench_hash_providers,
);
criterion_main!(benches);
