//! # Reference Scenarios
//!
//! The behaviour every build of the filters must reproduce:
//!
//! 1. **Bloom hello/world**: add, query, add again
//! 2. **Cuckoo insert/lookup/delete** on a fresh filter
//! 3. **Cuckoo overflow**: inserting twice the capacity stops succeeding near
//!    `capacity * max_load_factor` and never breaches the load-factor bound
//! 4. **Incompatible merge** between Bloom filters of different sizes

#[cfg(test)]
mod tests {
    use probds_membership::{BloomFilter, BucketSize, CuckooFilter, FilterError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::labelled_keys;

    // =============================================================================
    // BLOOM
    // =============================================================================

    #[test]
    fn test_bloom_hello_world() {
        let mut filter = BloomFilter::new(10_000, 0.01).unwrap();

        filter.add(b"hello").unwrap();
        assert!(filter.contains(b"hello").unwrap());
        assert!(!filter.contains(b"world").unwrap());

        filter.add(b"world").unwrap();
        assert!(filter.contains(b"world").unwrap());
        assert!(filter.contains(b"hello").unwrap());
    }

    #[test]
    fn test_bloom_merge_size_mismatch() {
        let a = BloomFilter::with_params(1000, 7).unwrap();
        let b = BloomFilter::with_params(2000, 7).unwrap();

        let err = a.merge(&b).unwrap_err();
        assert!(matches!(err, FilterError::IncompatibleFilter(_)));
        assert!(!err.is_capacity_exhausted());
    }

    #[test]
    fn test_bloom_survives_repeated_merges() {
        let mut base = BloomFilter::new(5_000, 0.01).unwrap();
        let keys = labelled_keys("base", 500);
        for key in &keys {
            base.add(key).unwrap();
        }

        let mut merged = base.clone();
        for round in 0..5 {
            let mut other = BloomFilter::new(5_000, 0.01).unwrap();
            for key in labelled_keys(&format!("round{}", round), 200) {
                other.add(&key).unwrap();
            }
            merged = merged.merge(&other).unwrap();
        }

        for key in &keys {
            assert!(merged.contains(key).unwrap(), "Lost key after merges");
        }
        let estimate = merged.cardinality();
        assert!(
            (1350..=1650).contains(&estimate),
            "Estimate {} should be near 1500",
            estimate
        );
    }

    // =============================================================================
    // CUCKOO
    // =============================================================================

    #[test]
    fn test_cuckoo_insert_lookup_delete() {
        let mut filter = CuckooFilter::new(1000, 4, 0.01).unwrap();

        filter.insert(b"hello").unwrap();
        assert!(filter.lookup(b"hello"));
        assert!(!filter.lookup(b"world"));
        assert!(filter.delete(b"hello"));
        assert!(!filter.lookup(b"hello"));
        assert_eq!(filter.count(), 0);
    }

    #[test]
    fn test_cuckoo_overflow_stops_near_capacity() {
        for (bucket_size, seed) in [(2, 1u64), (4, 2), (8, 3)] {
            let mut filter =
                CuckooFilter::with_rng(1000, bucket_size, 0.01, StdRng::seed_from_u64(seed))
                    .unwrap();
            let max = filter.max_load_factor();
            let mut failures = 0;
            let mut first_failure_at = None;

            for key in labelled_keys("overflow", 2000) {
                match filter.insert(&key) {
                    Ok(()) => {}
                    Err(e) => {
                        assert!(e.is_capacity_exhausted(), "Unexpected error: {}", e);
                        failures += 1;
                        first_failure_at.get_or_insert(filter.count());
                    }
                }
                assert!(filter.load_factor() <= max);
            }

            assert!(failures > 0, "bucket size {}: expected overflow", bucket_size);
            // Allow the walk to give up a little before the load-factor bound
            let first = first_failure_at.unwrap_or(0);
            assert!(
                first as f64 >= 0.9 * 1000.0 * max,
                "bucket size {}: first failure at count {}",
                bucket_size,
                first
            );
        }
    }

    #[test]
    fn test_cuckoo_load_factor_table() {
        let expected = [
            (2, BucketSize::Two, 0.84),
            (4, BucketSize::Four, 0.95),
            (8, BucketSize::Eight, 0.98),
        ];
        for (slots, size, max) in expected {
            let filter = CuckooFilter::new(100, slots, 0.01).unwrap();
            assert_eq!(filter.bucket_size(), size);
            assert_eq!(filter.max_load_factor(), max);
            assert!(filter.num_buckets().is_power_of_two());
        }

        assert!(matches!(
            CuckooFilter::new(100, 16, 0.01),
            Err(FilterError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_cuckoo_delete_then_reinsert_reuses_space() {
        let mut filter = CuckooFilter::with_rng(100, 4, 0.01, StdRng::seed_from_u64(5)).unwrap();
        let keys = labelled_keys("churn", 80);

        for key in &keys {
            filter.insert(key).unwrap();
        }
        let full = filter.count();

        for key in &keys[..40] {
            assert!(filter.delete(key));
        }
        assert_eq!(filter.count(), full - 40);

        for key in &keys[..40] {
            filter.insert(key).unwrap();
        }
        assert_eq!(filter.count(), full);
        for key in &keys {
            assert!(filter.lookup(key));
        }
    }
}
