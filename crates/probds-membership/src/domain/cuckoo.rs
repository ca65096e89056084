//! # Cuckoo Filter
//!
//! Space-efficient probabilistic data structure supporting deletion.
//!
//! ## Advantages over Bloom Filters
//!
//! | Feature | Bloom | Cuckoo |
//! |---------|-------|--------|
//! | Deletion | No | Yes |
//! | Space efficiency | Lower | Higher at low FPR |
//! | Capacity | Unbounded (FPR degrades) | Hard limit (inserts fail) |
//!
//! ## Relocation failures
//!
//! When an eviction walk runs out of kicks the insertion reports
//! `RelocationLimitExceeded`. By then the new fingerprint has been swapped
//! into the table and the last displaced fingerprint is dropped, so one
//! previously stored item may stop testing positive. `count` is left
//! unchanged. Callers that cannot tolerate this should size the filter so
//! that it stays below its maximum load factor.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, warn};

use super::config::CuckooConfig;
use super::hash_functions::{alternate_index, fingerprint, primary_index, Fingerprint};
use super::parameters::{calculate_cuckoo_parameters, BucketSize};
use super::validation::{validate_item, validate_positive};
use crate::adapters::Murmur3;
use crate::error::FilterError;
use crate::metrics::{FilterKind, MetricsRecorder, NoOpMetrics};
use crate::ports::{HashProvider, MembershipFilter};

/// Slots in the largest supported bucket
const MAX_BUCKET_SLOTS: usize = 8;

/// A bucket holding up to `capacity` fingerprints.
///
/// Occupied slots are always `entries[..len]`.
#[derive(Clone, Copy, Debug)]
pub struct Bucket {
    entries: [Fingerprint; MAX_BUCKET_SLOTS],
    len: u8,
    capacity: u8,
}

impl Bucket {
    fn new(size: BucketSize) -> Self {
        Self {
            entries: [0; MAX_BUCKET_SLOTS],
            len: 0,
            capacity: size.slots() as u8,
        }
    }

    /// Insert fingerprint if there's an empty slot.
    pub fn insert(&mut self, fp: Fingerprint) -> bool {
        if self.is_full() {
            return false;
        }
        self.entries[self.len as usize] = fp;
        self.len += 1;
        true
    }

    /// Check if fingerprint exists.
    pub fn contains(&self, fp: Fingerprint) -> bool {
        self.fingerprints().contains(&fp)
    }

    /// Remove one copy of `fp`, moving the last entry into its slot.
    pub fn delete(&mut self, fp: Fingerprint) -> bool {
        match self.fingerprints().iter().position(|&e| e == fp) {
            Some(pos) => {
                let last = self.len as usize - 1;
                self.entries[pos] = self.entries[last];
                self.entries[last] = 0;
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Put `fp` into `slot` and return the fingerprint it displaced.
    pub fn swap(&mut self, slot: usize, fp: Fingerprint) -> Fingerprint {
        std::mem::replace(&mut self.entries[slot], fp)
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Occupied slots
    pub fn fingerprints(&self) -> &[Fingerprint] {
        &self.entries[..self.len as usize]
    }
}

/// Cuckoo filter for probabilistic membership testing with deletion.
///
/// Each item maps to a short fingerprint stored in one of two candidate
/// buckets. The second bucket is derived from the first and the fingerprint
/// alone, which lets entries move without the original item.
///
/// The random source drives the eviction walk; pass a seeded generator
/// through [`CuckooFilter::with_rng`] to make relocations reproducible.
#[derive(Clone)]
pub struct CuckooFilter<H: HashProvider = Murmur3, R: RngCore = StdRng> {
    buckets: Vec<Bucket>,
    bucket_size: BucketSize,
    fingerprint_size: u32,
    count: usize,
    max_kicks: usize,
    hasher: H,
    rng: R,
    metrics: Arc<dyn MetricsRecorder>,
}

impl CuckooFilter {
    /// Create a filter seeding its eviction walk from system entropy
    ///
    /// # Arguments
    /// * `capacity` - Expected number of items (>= 1)
    /// * `bucket_size` - Slots per bucket: 2, 4 or 8
    /// * `target_fpr` - Desired false positive rate (0 < p < 1)
    pub fn new(capacity: usize, bucket_size: usize, target_fpr: f64) -> Result<Self, FilterError> {
        Self::with_rng(capacity, bucket_size, target_fpr, StdRng::from_entropy())
    }

    /// Create a filter from a validated configuration
    pub fn from_config(config: &CuckooConfig) -> Result<Self, FilterError> {
        Self::from_config_with_rng(config, StdRng::from_entropy())
    }
}

impl<R: RngCore> CuckooFilter<Murmur3, R> {
    /// Create a filter whose eviction walk draws from `rng`
    pub fn with_rng(
        capacity: usize,
        bucket_size: usize,
        target_fpr: f64,
        rng: R,
    ) -> Result<Self, FilterError> {
        Self::with_hasher_and_rng(capacity, bucket_size, target_fpr, Murmur3, rng)
    }

    /// Create a filter from a configuration, drawing from `rng`
    pub fn from_config_with_rng(config: &CuckooConfig, rng: R) -> Result<Self, FilterError> {
        Self::from_parts(config, Murmur3, rng)
    }
}

impl<H: HashProvider, R: RngCore> CuckooFilter<H, R> {
    /// Create a filter with an explicit hash provider and random source
    pub fn with_hasher_and_rng(
        capacity: usize,
        bucket_size: usize,
        target_fpr: f64,
        hasher: H,
        rng: R,
    ) -> Result<Self, FilterError> {
        let config = CuckooConfig::new(capacity, bucket_size, target_fpr)?;
        Self::from_parts(&config, hasher, rng)
    }

    /// Create a filter from a configuration, hash provider and random source
    ///
    /// # Errors
    /// `InvalidParameter` for a zero capacity or kick budget, a false
    /// positive rate outside (0, 1), or a bucket size other than 2, 4 or 8.
    pub fn from_parts(config: &CuckooConfig, hasher: H, rng: R) -> Result<Self, FilterError> {
        let params =
            calculate_cuckoo_parameters(config.capacity, config.bucket_size, config.target_fpr)?;
        validate_positive("max kicks", config.max_kicks)?;

        debug!(
            capacity = config.capacity,
            buckets = params.num_buckets,
            bucket_size = params.bucket_size.slots(),
            fingerprint_bits = params.fingerprint_bits,
            max_kicks = config.max_kicks,
            hasher = hasher.name(),
            "Created cuckoo filter"
        );

        Ok(Self {
            buckets: vec![Bucket::new(params.bucket_size); params.num_buckets],
            bucket_size: params.bucket_size,
            fingerprint_size: params.fingerprint_bits,
            count: 0,
            max_kicks: config.max_kicks,
            hasher,
            rng,
            metrics: Arc::new(NoOpMetrics),
        })
    }

    /// Report operations on this filter to `metrics`
    ///
    /// The recorder is told about the filter immediately.
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        metrics.record_filter_created(FilterKind::Cuckoo, self.size());
        self.metrics = metrics;
        self
    }

    /// Insert an item.
    ///
    /// # Errors
    /// - `InvalidInput` if `item` is empty
    /// - `FilterFull` if one more entry would reach the maximum load factor
    /// - `RelocationLimitExceeded` if the eviction walk found no free slot
    pub fn insert(&mut self, item: &[u8]) -> Result<(), FilterError> {
        validate_item(item)?;
        let start = Instant::now();

        let max_load_factor = self.max_load_factor();
        let projected = (self.count + 1) as f64 / self.size() as f64;
        if projected >= max_load_factor {
            debug!(
                count = self.count,
                load_factor = self.load_factor(),
                max_load_factor,
                "Cuckoo filter full, rejecting insert"
            );
            self.metrics.record_insert_rejected(FilterKind::Cuckoo);
            return Err(FilterError::FilterFull {
                load_factor: projected,
                max_load_factor,
            });
        }

        let (fp, i1, i2) = self.indices(item);

        if self.buckets[i1].insert(fp) || self.buckets[i2].insert(fp) {
            self.count += 1;
            self.metrics
                .record_insert(FilterKind::Cuckoo, start.elapsed());
            return Ok(());
        }

        // Both full, need to kick
        match self.relocate(fp, i1, i2) {
            Ok(()) => {
                self.metrics
                    .record_insert(FilterKind::Cuckoo, start.elapsed());
                Ok(())
            }
            Err(e) => {
                self.metrics.record_insert_rejected(FilterKind::Cuckoo);
                Err(e)
            }
        }
    }

    /// Eviction walk starting from a randomly chosen candidate bucket.
    fn relocate(&mut self, fp: Fingerprint, i1: usize, i2: usize) -> Result<(), FilterError> {
        let mut index = if self.rng.gen::<bool>() { i2 } else { i1 };
        let mut fp = fp;

        for kick in 1..=self.max_kicks {
            let slot = self.rng.gen_range(0..self.buckets[index].len());
            fp = self.buckets[index].swap(slot, fp);
            index = alternate_index(&self.hasher, index, fp, self.buckets.len());

            if self.buckets[index].insert(fp) {
                self.count += 1;
                self.metrics.record_relocation(kick, true);
                return Ok(());
            }
        }

        warn!(
            kicks = self.max_kicks,
            dropped_fingerprint = fp,
            count = self.count,
            "Relocation limit reached, displaced fingerprint dropped"
        );
        self.metrics.record_relocation(self.max_kicks, false);
        Err(FilterError::RelocationLimitExceeded {
            kicks: self.max_kicks,
        })
    }

    /// Check if item might be in the filter.
    ///
    /// Empty input is never a member.
    pub fn lookup(&self, item: &[u8]) -> bool {
        if item.is_empty() {
            return false;
        }
        let start = Instant::now();

        let (fp, i1, i2) = self.indices(item);
        let found = self.buckets[i1].contains(fp) || self.buckets[i2].contains(fp);

        self.metrics
            .record_lookup(FilterKind::Cuckoo, start.elapsed(), found);
        found
    }

    /// Delete an item from the filter.
    ///
    /// Returns `true` if a matching fingerprint was removed, `false` if none
    /// was found. Another item sharing the fingerprint and a bucket may be the
    /// one actually removed.
    pub fn delete(&mut self, item: &[u8]) -> bool {
        if item.is_empty() {
            return false;
        }

        let (fp, i1, i2) = self.indices(item);
        let found = self.buckets[i1].delete(fp) || self.buckets[i2].delete(fp);
        if found {
            self.count = self.count.saturating_sub(1);
        }

        self.metrics.record_delete(found);
        found
    }

    /// Number of stored fingerprints
    pub fn count(&self) -> usize {
        self.count
    }

    /// Get number of items in filter.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if filter is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get load factor.
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.size() as f64
    }

    /// Total fingerprint slots
    pub fn size(&self) -> usize {
        self.buckets.len() * self.bucket_size.slots()
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket_size(&self) -> BucketSize {
        self.bucket_size
    }

    /// Bits of each fingerprint
    pub fn fingerprint_size(&self) -> u32 {
        self.fingerprint_size
    }

    /// Load factor at which inserts are rejected
    pub fn max_load_factor(&self) -> f64 {
        self.bucket_size.max_load_factor()
    }

    pub fn max_kicks(&self) -> usize {
        self.max_kicks
    }

    /// Calculate fingerprint and two bucket indices.
    fn indices(&self, item: &[u8]) -> (Fingerprint, usize, usize) {
        let num_buckets = self.buckets.len();
        let fp = fingerprint(&self.hasher, item, self.fingerprint_size);
        let i1 = primary_index(&self.hasher, item, num_buckets);
        let i2 = alternate_index(&self.hasher, i1, fp, num_buckets);
        (fp, i1, i2)
    }
}

impl<H: HashProvider, R: RngCore> fmt::Debug for CuckooFilter<H, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CuckooFilter")
            .field("num_buckets", &self.buckets.len())
            .field("bucket_size", &self.bucket_size)
            .field("fingerprint_size", &self.fingerprint_size)
            .field("count", &self.count)
            .field("max_kicks", &self.max_kicks)
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl<H: HashProvider, R: RngCore> MembershipFilter for CuckooFilter<H, R> {
    fn insert(&mut self, item: &[u8]) -> Result<(), FilterError> {
        CuckooFilter::insert(self, item)
    }

    fn contains(&self, item: &[u8]) -> Result<bool, FilterError> {
        validate_item(item)?;
        Ok(self.lookup(item))
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Cuckoo
    }
}
