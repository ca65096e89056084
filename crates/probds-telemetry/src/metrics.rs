//! Prometheus metrics for membership filters.
//!
//! All metrics follow the naming convention: `probds_<area>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., filter_lookups_total)
//! - **Histogram**: Distribution of values (e.g., filter_insert_duration_seconds)

use std::sync::Arc;
use std::time::Duration;

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};
use probds_membership::{FilterKind, MetricsRecorder, SetOperation};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Filters created, by family
    pub static ref FILTERS_CREATED: CounterVec = CounterVec::new(
        Opts::new("probds_filters_created_total", "Total filters created"),
        &["kind"]  // kind: bloom/cuckoo
    ).expect("metric creation failed");

    /// Bits (Bloom) or fingerprint slots (Cuckoo) allocated
    pub static ref SLOTS_ALLOCATED: CounterVec = CounterVec::new(
        Opts::new("probds_filter_slots_allocated_total", "Total bits or fingerprint slots allocated"),
        &["kind"]
    ).expect("metric creation failed");

    // =========================================================================
    // INSERTS AND LOOKUPS
    // =========================================================================

    /// Insert attempts by outcome
    pub static ref INSERTS: CounterVec = CounterVec::new(
        Opts::new("probds_filter_inserts_total", "Insert attempts"),
        &["kind", "outcome"]  // outcome: accepted/rejected
    ).expect("metric creation failed");

    /// Time spent on successful inserts
    pub static ref INSERT_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "probds_filter_insert_duration_seconds",
            "Time spent inserting an item"
        ).buckets(exponential_buckets(1e-7, 2.0, 16).expect("metric creation failed")),
        &["kind"]
    ).expect("metric creation failed");

    /// Lookups by result
    pub static ref LOOKUPS: CounterVec = CounterVec::new(
        Opts::new("probds_filter_lookups_total", "Membership queries"),
        &["kind", "result"]  // result: hit/miss
    ).expect("metric creation failed");

    /// Time spent on lookups
    pub static ref LOOKUP_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "probds_filter_lookup_duration_seconds",
            "Time spent testing membership"
        ).buckets(exponential_buckets(1e-7, 2.0, 16).expect("metric creation failed")),
        &["kind"]
    ).expect("metric creation failed");

    // =========================================================================
    // CUCKOO
    // =========================================================================

    /// Cuckoo deletions by result
    pub static ref DELETES: CounterVec = CounterVec::new(
        Opts::new("probds_cuckoo_deletes_total", "Cuckoo deletion attempts"),
        &["result"]  // result: removed/missing
    ).expect("metric creation failed");

    /// Eviction walks by outcome
    pub static ref RELOCATIONS: CounterVec = CounterVec::new(
        Opts::new("probds_cuckoo_relocations_total", "Cuckoo eviction walks"),
        &["outcome"]  // outcome: placed/exhausted
    ).expect("metric creation failed");

    /// Fingerprints displaced per eviction walk
    pub static ref RELOCATION_KICKS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "probds_cuckoo_relocation_kicks",
            "Fingerprints displaced per eviction walk"
        ).buckets(exponential_buckets(1.0, 2.0, 10).expect("metric creation failed"))
    ).expect("metric creation failed");

    // =========================================================================
    // BLOOM
    // =========================================================================

    /// Merge and intersect operations
    pub static ref SET_OPERATIONS: CounterVec = CounterVec::new(
        Opts::new("probds_bloom_set_operations_total", "Bloom merge and intersect operations"),
        &["op"]  // op: merge/intersect
    ).expect("metric creation failed");
}

/// Handle to the registry the filter metrics live in
#[derive(Clone)]
pub struct MetricsHandle {
    registry: Arc<Registry>,
}

impl MetricsHandle {
    /// Registry holding every filter metric
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; metrics that are already registered are
/// left as they are.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Lifecycle
        Box::new(FILTERS_CREATED.clone()),
        Box::new(SLOTS_ALLOCATED.clone()),
        // Inserts and lookups
        Box::new(INSERTS.clone()),
        Box::new(INSERT_DURATION.clone()),
        Box::new(LOOKUPS.clone()),
        Box::new(LOOKUP_DURATION.clone()),
        // Cuckoo
        Box::new(DELETES.clone()),
        Box::new(RELOCATIONS.clone()),
        Box::new(RELOCATION_KICKS.clone()),
        // Bloom
        Box::new(SET_OPERATIONS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// `MetricsRecorder` backed by the global Prometheus metrics
///
/// Every recorder writes to the same process-wide series, labelled by filter
/// family.
#[derive(Clone)]
pub struct PrometheusRecorder {
    _handle: MetricsHandle,
}

impl PrometheusRecorder {
    /// Register the metrics (if needed) and create a recorder
    pub fn new() -> Result<Self, TelemetryError> {
        Ok(Self {
            _handle: register_metrics()?,
        })
    }
}

impl MetricsRecorder for PrometheusRecorder {
    fn record_filter_created(&self, kind: FilterKind, slots: usize) {
        FILTERS_CREATED.with_label_values(&[kind.as_str()]).inc();
        SLOTS_ALLOCATED
            .with_label_values(&[kind.as_str()])
            .inc_by(slots as f64);
    }

    fn record_insert(&self, kind: FilterKind, duration: Duration) {
        INSERTS.with_label_values(&[kind.as_str(), "accepted"]).inc();
        INSERT_DURATION
            .with_label_values(&[kind.as_str()])
            .observe(duration.as_secs_f64());
    }

    fn record_insert_rejected(&self, kind: FilterKind) {
        INSERTS.with_label_values(&[kind.as_str(), "rejected"]).inc();
    }

    fn record_lookup(&self, kind: FilterKind, duration: Duration, found: bool) {
        let result = if found { "hit" } else { "miss" };
        LOOKUPS.with_label_values(&[kind.as_str(), result]).inc();
        LOOKUP_DURATION
            .with_label_values(&[kind.as_str()])
            .observe(duration.as_secs_f64());
    }

    fn record_delete(&self, found: bool) {
        let result = if found { "removed" } else { "missing" };
        DELETES.with_label_values(&[result]).inc();
    }

    fn record_relocation(&self, kicks: usize, succeeded: bool) {
        let outcome = if succeeded { "placed" } else { "exhausted" };
        RELOCATIONS.with_label_values(&[outcome]).inc();
        RELOCATION_KICKS.observe(kicks as f64);
    }

    fn record_set_operation(&self, op: SetOperation) {
        SET_OPERATIONS.with_label_values(&[op.as_str()]).inc();
    }
}
