//! Metrics hooks for filter operations
//!
//! Filters report every construction, insert, lookup, delete, relocation walk
//! and set operation to a `MetricsRecorder`. The default recorder is
//! `NoOpMetrics`; `Metrics` keeps in-process counters, and external systems
//! (Prometheus, StatsD) plug in by implementing the trait.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use probds_membership::{BloomFilter, Metrics};
//!
//! let metrics = Arc::new(Metrics::new());
//! let mut filter = BloomFilter::new(1000, 0.01)?.with_metrics(metrics.clone());
//! filter.add(b"hello")?;
//!
//! assert_eq!(metrics.snapshot().elements_inserted, 1);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Which filter family emitted a metric
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Bloom,
    Cuckoo,
}

impl FilterKind {
    /// Label value for metric exporters
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Bloom => "bloom",
            FilterKind::Cuckoo => "cuckoo",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary set operation between two Bloom filters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetOperation {
    Merge,
    Intersect,
}

impl SetOperation {
    /// Label value for metric exporters
    pub fn as_str(&self) -> &'static str {
        match self {
            SetOperation::Merge => "merge",
            SetOperation::Intersect => "intersect",
        }
    }
}

/// Trait for metrics recording implementations
///
/// Implement this trait to integrate with external metrics systems
/// like Prometheus, StatsD, or OpenTelemetry.
pub trait MetricsRecorder: Send + Sync {
    /// Record filter creation
    ///
    /// # Arguments
    /// * `kind` - Filter family
    /// * `slots` - Bits (Bloom) or fingerprint slots (Cuckoo) allocated
    fn record_filter_created(&self, kind: FilterKind, slots: usize);

    /// Record a successful insertion
    fn record_insert(&self, kind: FilterKind, duration: Duration);

    /// Record an insertion turned away because the filter was full
    fn record_insert_rejected(&self, kind: FilterKind);

    /// Record a membership query
    fn record_lookup(&self, kind: FilterKind, duration: Duration, found: bool);

    /// Record a cuckoo deletion attempt
    fn record_delete(&self, found: bool);

    /// Record a cuckoo eviction walk
    ///
    /// # Arguments
    /// * `kicks` - Fingerprints displaced during the walk
    /// * `succeeded` - Whether the walk found a free slot
    fn record_relocation(&self, kicks: usize, succeeded: bool);

    /// Record a Bloom merge or intersect
    fn record_set_operation(&self, op: SetOperation);
}

/// Metrics collector for filter operations
///
/// Thread-safe counters for monitoring filter usage.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total filters created
    pub filters_created: AtomicU64,
    /// Total slots (bits or fingerprint slots) allocated
    pub slots_allocated: AtomicU64,
    /// Total successful insertions across all filters
    pub elements_inserted: AtomicU64,
    /// Insertions rejected because the filter was full
    pub inserts_rejected: AtomicU64,
    /// Total lookups performed
    pub lookups_performed: AtomicU64,
    /// Total positive lookups (matches)
    pub lookups_positive: AtomicU64,
    /// Successful cuckoo deletions
    pub deletes_performed: AtomicU64,
    /// Deletions that found no matching fingerprint
    pub deletes_missed: AtomicU64,
    /// Fingerprints displaced by eviction walks
    pub kicks_performed: AtomicU64,
    /// Eviction walks that exhausted their budget
    pub relocation_failures: AtomicU64,
    /// Total merges
    pub filters_merged: AtomicU64,
    /// Total intersections
    pub filters_intersected: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative insert time in nanoseconds
    pub insert_time_ns: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            slots_allocated: self.slots_allocated.load(Ordering::Relaxed),
            elements_inserted: self.elements_inserted.load(Ordering::Relaxed),
            inserts_rejected: self.inserts_rejected.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            deletes_performed: self.deletes_performed.load(Ordering::Relaxed),
            deletes_missed: self.deletes_missed.load(Ordering::Relaxed),
            kicks_performed: self.kicks_performed.load(Ordering::Relaxed),
            relocation_failures: self.relocation_failures.load(Ordering::Relaxed),
            filters_merged: self.filters_merged.load(Ordering::Relaxed),
            filters_intersected: self.filters_intersected.load(Ordering::Relaxed),
            avg_lookup_ns: self.avg_lookup_time_ns(),
            avg_insert_ns: self.avg_insert_time_ns(),
        }
    }

    /// Calculate average lookup time in nanoseconds
    pub fn avg_lookup_time_ns(&self) -> u64 {
        let total = self.lookup_time_ns.load(Ordering::Relaxed);
        let count = self.lookups_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Calculate average insert time in nanoseconds
    pub fn avg_insert_time_ns(&self) -> u64 {
        let total = self.insert_time_ns.load(Ordering::Relaxed);
        let count = self.elements_inserted.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Ratio of positive lookups to total lookups
    ///
    /// Includes both true positives and false positives.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.filters_created,
            &self.slots_allocated,
            &self.elements_inserted,
            &self.inserts_rejected,
            &self.lookups_performed,
            &self.lookups_positive,
            &self.deletes_performed,
            &self.deletes_missed,
            &self.kicks_performed,
            &self.relocation_failures,
            &self.filters_merged,
            &self.filters_intersected,
            &self.lookup_time_ns,
            &self.insert_time_ns,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub slots_allocated: u64,
    pub elements_inserted: u64,
    pub inserts_rejected: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub deletes_performed: u64,
    pub deletes_missed: u64,
    pub kicks_performed: u64,
    pub relocation_failures: u64,
    pub filters_merged: u64,
    pub filters_intersected: u64,
    pub avg_lookup_ns: u64,
    pub avg_insert_ns: u64,
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, _kind: FilterKind, slots: usize) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.slots_allocated.fetch_add(slots as u64, Ordering::Relaxed);
    }

    fn record_insert(&self, _kind: FilterKind, duration: Duration) {
        self.elements_inserted.fetch_add(1, Ordering::Relaxed);
        self.insert_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    fn record_insert_rejected(&self, _kind: FilterKind) {
        self.inserts_rejected.fetch_add(1, Ordering::Relaxed);
    }

    fn record_lookup(&self, _kind: FilterKind, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_delete(&self, found: bool) {
        if found {
            self.deletes_performed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.deletes_missed.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_relocation(&self, kicks: usize, succeeded: bool) {
        self.kicks_performed
            .fetch_add(kicks as u64, Ordering::Relaxed);
        if !succeeded {
            self.relocation_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_set_operation(&self, op: SetOperation) {
        match op {
            SetOperation::Merge => self.filters_merged.fetch_add(1, Ordering::Relaxed),
            SetOperation::Intersect => self.filters_intersected.fetch_add(1, Ordering::Relaxed),
        };
    }
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: FilterKind, _: usize) {}
    fn record_insert(&self, _: FilterKind, _: Duration) {}
    fn record_insert_rejected(&self, _: FilterKind) {}
    fn record_lookup(&self, _: FilterKind, _: Duration, _: bool) {}
    fn record_delete(&self, _: bool) {}
    fn record_relocation(&self, _: usize, _: bool) {}
    fn record_set_operation(&self, _: SetOperation) {}
}
