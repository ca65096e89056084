//! # Cross-Filter Flows
//!
//! Drives both filters through the `MembershipFilter` port with the same
//! workload, and builds them from JSON configuration the way an embedding
//! service would.

use probds_membership::{FilterError, MembershipFilter};

/// Outcome of running a workload through one filter
#[derive(Debug, Default, PartialEq)]
pub struct WorkloadReport {
    /// Items accepted before the first failure
    pub inserted: usize,
    /// Inserted items that tested negative afterwards
    pub false_negatives: usize,
    /// Never-inserted probes that tested positive
    pub false_positives: usize,
}

/// Insert `members`, then query them and `probes`
pub fn run_workload<F: MembershipFilter>(
    filter: &mut F,
    members: &[Vec<u8>],
    probes: &[Vec<u8>],
) -> Result<WorkloadReport, FilterError> {
    let (inserted, err) = filter.insert_all(members.iter().map(Vec::as_slice));
    if let Some(e) = err {
        return Err(e);
    }

    let mut report = WorkloadReport {
        inserted,
        ..WorkloadReport::default()
    };
    for member in members {
        if !filter.contains(member)? {
            report.false_negatives += 1;
        }
    }
    for probe in probes {
        if filter.contains(probe)? {
            report.false_positives += 1;
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use probds_membership::{
        BloomConfig, BloomFilter, CuckooConfig, CuckooFilter, FilterKind, SipHash,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::{labelled_keys, random_keys};

    #[test]
    fn test_same_workload_through_both_filters() {
        let members = random_keys(2_000, 16, 1);
        let probes = random_keys(20_000, 16, 2);

        let mut bloom = BloomFilter::new(2_000, 0.01).unwrap();
        let mut cuckoo = CuckooFilter::with_rng(2_000, 4, 0.01, StdRng::seed_from_u64(3)).unwrap();

        let bloom_report = run_workload(&mut bloom, &members, &probes).unwrap();
        let cuckoo_report = run_workload(&mut cuckoo, &members, &probes).unwrap();

        for (kind, report) in [
            (bloom.kind(), &bloom_report),
            (cuckoo.kind(), &cuckoo_report),
        ] {
            assert_eq!(report.inserted, members.len(), "{} inserted", kind);
            assert_eq!(report.false_negatives, 0, "{} false negatives", kind);
            let fpr = report.false_positives as f64 / probes.len() as f64;
            assert!(fpr < 0.03, "{} FPR {} too high", kind, fpr);
        }
        assert_eq!(bloom.kind(), FilterKind::Bloom);
        assert_eq!(cuckoo.kind(), FilterKind::Cuckoo);
    }

    #[test]
    fn test_empty_item_rejected_by_both() {
        let mut bloom = BloomFilter::new(10, 0.1).unwrap();
        let mut cuckoo = CuckooFilter::new(10, 2, 0.1).unwrap();
        let members = vec![b"a".to_vec(), Vec::new(), b"b".to_vec()];

        for result in [
            run_workload(&mut bloom, &members, &[]),
            run_workload(&mut cuckoo, &members, &[]),
        ] {
            assert!(matches!(result, Err(FilterError::InvalidInput(_))));
        }
        assert!(bloom.contains(b"a").unwrap());
        assert!(cuckoo.lookup(b"a"));
        assert_eq!(cuckoo.count(), 1);
    }

    #[test]
    fn test_cuckoo_overflow_surfaces_through_port() {
        let mut cuckoo = CuckooFilter::with_rng(50, 2, 0.01, StdRng::seed_from_u64(8)).unwrap();
        let members = labelled_keys("member", 500);

        let err = run_workload(&mut cuckoo, &members, &[]).unwrap_err();
        assert!(err.is_capacity_exhausted());
        assert!(cuckoo.load_factor() <= cuckoo.max_load_factor());
    }

    #[test]
    fn test_filters_from_json_config() {
        let bloom_config = BloomConfig::from_json(r#"{"capacity": 500, "error_rate": 0.001}"#)
            .unwrap();
        let cuckoo_config = CuckooConfig::from_json(
            r#"{"capacity": 500, "bucket_size": 8, "target_fpr": 0.001, "max_kicks": 64}"#,
        )
        .unwrap();

        let bloom = BloomFilter::from_config(&bloom_config).unwrap();
        let cuckoo =
            CuckooFilter::from_config_with_rng(&cuckoo_config, StdRng::seed_from_u64(4)).unwrap();

        assert_eq!(bloom.hash_count(), 10);
        assert_eq!(cuckoo.max_kicks(), 64);
        assert_eq!(cuckoo.fingerprint_size(), 8);
        assert_eq!(cuckoo.num_buckets(), 64);
    }

    #[test]
    fn test_invalid_json_config() {
        assert!(matches!(
            CuckooConfig::from_json(r#"{"bucket_size": 5}"#),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(matches!(
            BloomConfig::from_json(r#"{"capacity": "many"}"#),
            Err(FilterError::Config(_))
        ));
    }

    #[test]
    fn test_swapped_hash_provider_changes_layout_not_guarantees() {
        let members = labelled_keys("sip", 300);
        let mut murmur = BloomFilter::new(300, 0.01).unwrap();
        let mut sip = BloomFilter::with_hasher(300, 0.01, SipHash).unwrap();

        let a = run_workload(&mut murmur, &members, &[]).unwrap();
        let b = run_workload(&mut sip, &members, &[]).unwrap();

        assert_eq!(a.false_negatives, 0);
        assert_eq!(b.false_negatives, 0);
        assert_eq!(murmur.size_bits(), sip.size_bits());
    }
}
