//! Bloom filter
//!
//! A fixed-size bit array probed by `k` seeded hashes. Bits only ever go from
//! 0 to 1; there is no clear or remove. `merge` and `intersect` build new
//! filters and leave both inputs untouched.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use bitvec::prelude::*;
use tracing::debug;

use super::config::BloomConfig;
use super::hash_functions::{bloom_seeds, compute_bit_positions};
use super::parameters::{
    calculate_optimal_parameters, estimate_cardinality, observed_fpr, BloomFilterParams,
};
use super::validation::{validate_item, validate_positive};
use crate::adapters::Murmur3;
use crate::error::FilterError;
use crate::metrics::{FilterKind, MetricsRecorder, NoOpMetrics, SetOperation};
use crate::ports::{HashProvider, MembershipFilter};

/// Bloom filter for probabilistic membership testing
///
/// False positives are possible, false negatives are not: once `add(x)`
/// succeeds, `contains(x)` returns `true` for the lifetime of the filter and
/// of every filter merged from it.
#[derive(Clone)]
pub struct BloomFilter<H: HashProvider = Murmur3> {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Size in bits (m)
    m: usize,
    /// Number of hash probes (k)
    k: usize,
    /// Seed of each probe, `1..=k`
    seeds: Vec<u32>,
    hasher: H,
    metrics: Arc<dyn MetricsRecorder>,
}

impl BloomFilter {
    /// Create a filter sized for `capacity` items at the given error rate
    ///
    /// # Arguments
    /// * `capacity` - Expected number of distinct items (n >= 1)
    /// * `error_rate` - Target false positive rate (0 < p < 1)
    pub fn new(capacity: usize, error_rate: f64) -> Result<Self, FilterError> {
        Self::with_hasher(capacity, error_rate, Murmur3)
    }

    /// Create a filter with an explicit bit count and probe count
    pub fn with_params(m: usize, k: usize) -> Result<Self, FilterError> {
        Self::with_params_and_hasher(m, k, Murmur3)
    }

    /// Create a filter from a validated configuration
    pub fn from_config(config: &BloomConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Self::new(config.capacity, config.error_rate)
    }

    /// Calculate optimal parameters for given constraints
    pub fn optimal_params(
        capacity: usize,
        error_rate: f64,
    ) -> Result<BloomFilterParams, FilterError> {
        calculate_optimal_parameters(capacity, error_rate)
    }
}

impl<H: HashProvider> BloomFilter<H> {
    /// Create a filter sized for `capacity` items, hashing with `hasher`
    pub fn with_hasher(capacity: usize, error_rate: f64, hasher: H) -> Result<Self, FilterError> {
        let params = calculate_optimal_parameters(capacity, error_rate)?;
        debug!(
            capacity,
            error_rate,
            m = params.size_bits,
            k = params.hash_count,
            expected_fpr = params.expected_fpr,
            "Derived Bloom filter parameters"
        );
        Self::with_params_and_hasher(params.size_bits, params.hash_count, hasher)
    }

    /// Create a filter with explicit `m` and `k`, hashing with `hasher`
    ///
    /// # Errors
    /// `InvalidParameter` if `m` or `k` is zero.
    pub fn with_params_and_hasher(m: usize, k: usize, hasher: H) -> Result<Self, FilterError> {
        validate_positive("bit count (m)", m)?;
        validate_positive("hash function count (k)", k)?;

        debug!(m, k, hasher = hasher.name(), "Created Bloom filter");

        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; m],
            m,
            k,
            seeds: bloom_seeds(k),
            hasher,
            metrics: Arc::new(NoOpMetrics),
        })
    }

    /// Report operations on this filter to `metrics`
    ///
    /// The recorder is told about the filter immediately.
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        metrics.record_filter_created(FilterKind::Bloom, self.m);
        self.metrics = metrics;
        self
    }

    /// Insert an element into the filter
    ///
    /// Idempotent: adding the same element twice leaves the same bits set.
    ///
    /// # Errors
    /// `InvalidInput` if `element` is empty.
    pub fn add(&mut self, element: &[u8]) -> Result<(), FilterError> {
        validate_item(element)?;
        let start = Instant::now();

        for pos in compute_bit_positions(&self.hasher, &self.seeds, element, self.m) {
            self.bits.set(pos, true);
        }

        self.metrics.record_insert(FilterKind::Bloom, start.elapsed());
        Ok(())
    }

    /// Test if an element might be in the filter
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element is definitely NOT in the set
    ///
    /// Stops at the first unset bit.
    ///
    /// # Errors
    /// `InvalidInput` if `element` is empty.
    pub fn contains(&self, element: &[u8]) -> Result<bool, FilterError> {
        validate_item(element)?;
        let start = Instant::now();

        let found = compute_bit_positions(&self.hasher, &self.seeds, element, self.m)
            .all(|pos| self.bits[pos]);

        self.metrics
            .record_lookup(FilterKind::Bloom, start.elapsed(), found);
        Ok(found)
    }

    /// Estimated number of distinct elements inserted
    ///
    /// Derived from the number of set bits; most accurate at low to moderate
    /// fill. A saturated filter reports `m / k`.
    pub fn cardinality(&self) -> usize {
        estimate_cardinality(self.m, self.k, self.bits_set())
    }

    /// Observed false positive probability, `(X/m)^k` for `X` set bits
    ///
    /// This tracks the current fill, not the design-time target.
    pub fn false_positive_rate(&self) -> f64 {
        observed_fpr(self.m, self.k, self.bits_set())
    }

    /// Union of two compatible filters (bitwise OR)
    ///
    /// Every element possibly present in either input is possibly present in
    /// the result.
    ///
    /// # Errors
    /// `IncompatibleFilter` if the filters differ in `m`, `k` or seeds.
    pub fn merge(&self, other: &Self) -> Result<Self, FilterError> {
        self.combine(other, SetOperation::Merge)
    }

    /// Approximate intersection of two compatible filters (bitwise AND)
    ///
    /// Elements present in both inputs stay possibly present. Elements present
    /// in only one input may still test positive.
    ///
    /// # Errors
    /// `IncompatibleFilter` if the filters differ in `m`, `k` or seeds.
    pub fn intersect(&self, other: &Self) -> Result<Self, FilterError> {
        self.combine(other, SetOperation::Intersect)
    }

    /// Fail unless `other` has the same size, probe count and seed sequence
    pub fn check_compatibility(&self, other: &Self) -> Result<(), FilterError> {
        if self.m != other.m {
            return Err(FilterError::IncompatibleFilter(format!(
                "bit counts differ: {} vs {}",
                self.m, other.m
            )));
        }
        if self.k != other.k {
            return Err(FilterError::IncompatibleFilter(format!(
                "hash function counts differ: {} vs {}",
                self.k, other.k
            )));
        }
        if self.seeds != other.seeds {
            return Err(FilterError::IncompatibleFilter(
                "hash seeds differ".to_string(),
            ));
        }
        Ok(())
    }

    fn combine(&self, other: &Self, op: SetOperation) -> Result<Self, FilterError> {
        self.check_compatibility(other)?;

        let mut result = self.clone();
        // Operate on the underlying bytes; both vectors have the same length
        // and their unused tail bits are zero.
        let result_raw = result.bits.as_raw_mut_slice();
        let other_raw = other.bits.as_raw_slice();
        for (r, o) in result_raw.iter_mut().zip(other_raw.iter()) {
            match op {
                SetOperation::Merge => *r |= *o,
                SetOperation::Intersect => *r &= *o,
            }
        }

        self.metrics.record_set_operation(op);
        self.metrics.record_filter_created(FilterKind::Bloom, self.m);
        Ok(result)
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Seed used by each hash probe
    pub fn seeds(&self) -> &[u32] {
        &self.seeds
    }

    /// Whether no bit has been set yet
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Fraction of bits set, in `[0, 1]`
    pub fn fill_ratio(&self) -> f64 {
        self.bits_set() as f64 / self.m as f64
    }

    /// The hash provider behind every probe
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

impl<H: HashProvider> fmt::Debug for BloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("m", &self.m)
            .field("k", &self.k)
            .field("bits_set", &self.bits_set())
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl<H: HashProvider> MembershipFilter for BloomFilter<H> {
    fn insert(&mut self, item: &[u8]) -> Result<(), FilterError> {
        self.add(item)
    }

    fn contains(&self, item: &[u8]) -> Result<bool, FilterError> {
        BloomFilter::contains(self, item)
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Bloom
    }
}
