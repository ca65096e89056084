//! # Telemetry Wiring
//!
//! Filters reporting through the `MetricsRecorder` hook, both to in-process
//! counters and to the Prometheus registry in `probds-telemetry`.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use probds_membership::{BloomFilter, CuckooConfig, CuckooFilter, Metrics};
    use probds_telemetry::{gather_metrics, recorder_for, PrometheusRecorder, TelemetryConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::labelled_keys;

    #[test]
    fn test_shared_in_process_metrics() {
        let metrics = Arc::new(Metrics::new());

        let mut bloom = BloomFilter::new(1_000, 0.01)
            .unwrap()
            .with_metrics(metrics.clone());
        let mut cuckoo = CuckooFilter::with_rng(1_000, 4, 0.01, StdRng::seed_from_u64(1))
            .unwrap()
            .with_metrics(metrics.clone());

        for key in labelled_keys("shared", 100) {
            bloom.add(&key).unwrap();
            cuckoo.insert(&key).unwrap();
        }
        bloom.contains(b"shared-0").unwrap();
        cuckoo.lookup(b"shared-0");
        cuckoo.delete(b"shared-0");
        cuckoo.delete(b"shared-0-missing");

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.filters_created, 2);
        assert_eq!(snapshot.slots_allocated, (bloom.size_bits() + cuckoo.size()) as u64);
        assert_eq!(snapshot.elements_inserted, 200);
        assert_eq!(snapshot.lookups_performed, 2);
        assert_eq!(snapshot.lookups_positive, 2);
        assert_eq!(snapshot.deletes_performed, 1);
        assert_eq!(snapshot.deletes_missed, 1);
    }

    #[test]
    fn test_prometheus_recorder_exports_filter_series() {
        let recorder = Arc::new(PrometheusRecorder::new().unwrap());

        let mut left = BloomFilter::new(500, 0.01)
            .unwrap()
            .with_metrics(recorder.clone());
        let mut right = BloomFilter::new(500, 0.01).unwrap();
        left.add(b"left").unwrap();
        right.add(b"right").unwrap();
        let merged = left.merge(&right).unwrap();
        assert!(merged.contains(b"right").unwrap());

        let config = CuckooConfig::default();
        let mut cuckoo = CuckooFilter::from_config_with_rng(&config, StdRng::seed_from_u64(2))
            .unwrap()
            .with_metrics(recorder);
        cuckoo.insert(b"item").unwrap();
        cuckoo.lookup(b"item");

        let text = gather_metrics().unwrap();
        for series in [
            "probds_filters_created_total",
            "probds_filter_inserts_total",
            "probds_filter_lookups_total",
            "probds_bloom_set_operations_total",
            "kind=\"bloom\"",
            "kind=\"cuckoo\"",
        ] {
            assert!(text.contains(series), "missing {} in:\n{}", series, text);
        }
    }

    #[test]
    fn test_recorder_for_disabled_metrics() {
        let config = TelemetryConfig {
            metrics_enabled: false,
            ..TelemetryConfig::default()
        };
        let recorder = recorder_for(&config).unwrap();

        let mut filter = BloomFilter::new(100, 0.01).unwrap().with_metrics(recorder);
        filter.add(b"quiet").unwrap();
        assert!(filter.contains(b"quiet").unwrap());
    }
}
