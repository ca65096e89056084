//! Filter parameter derivation and estimators
//!
//! Bloom formulas:
//! - m = ceil(-n*ln(p) / (ln(2)^2))   -- bits for capacity n at error rate p
//! - k = ceil(-ln(p) / ln(2))         -- hash probes
//! - n' = -(m/k) * ln(1 - X/m)        -- cardinality from X set bits
//! - fpr' = (X/m)^k                   -- observed false positive rate
//!
//! Cuckoo formulas:
//! - f = clamp(ceil(log2(2b/p)), 1, 8)          -- fingerprint bits
//! - buckets = next_pow2(ceil(n / (alpha*b)))   -- alpha = max load factor

use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};

use super::validation::{validate_capacity, validate_positive, validate_rate};
use crate::error::FilterError;

/// Widest fingerprint a cuckoo slot can hold
pub const MAX_FINGERPRINT_BITS: u32 = 8;

/// Bloom filter parameters
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterParams {
    /// Number of bits in the filter (m)
    pub size_bits: usize,
    /// Number of hash probes (k)
    pub hash_count: usize,
    /// False positive rate once `capacity` items are inserted
    pub expected_fpr: f64,
}

/// Calculate Bloom filter parameters for a capacity and target error rate
///
/// Fails with `InvalidParameter` unless `capacity >= 1` and
/// `0 < error_rate < 1`.
pub fn calculate_optimal_parameters(
    capacity: usize,
    error_rate: f64,
) -> Result<BloomFilterParams, FilterError> {
    validate_capacity(capacity)?;
    validate_rate("error rate", error_rate)?;

    let size_bits = optimal_bit_count(capacity, error_rate);
    let hash_count = optimal_hash_count(error_rate);

    Ok(BloomFilterParams {
        size_bits,
        hash_count,
        expected_fpr: theoretical_fpr(size_bits, capacity, hash_count),
    })
}

/// m = ceil(-n * ln(p) / ln(2)^2)
pub fn optimal_bit_count(capacity: usize, error_rate: f64) -> usize {
    (-(capacity as f64) * error_rate.ln() / (LN_2 * LN_2)).ceil() as usize
}

/// k = ceil(-ln(p) / ln(2))
pub fn optimal_hash_count(error_rate: f64) -> usize {
    (-error_rate.ln() / LN_2).ceil() as usize
}

/// Theoretical false positive rate after inserting `n` items
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn theoretical_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powf(k as f64)
}

/// Estimate the number of distinct items from the count of set bits
///
/// - fewer than `k` bits set: nothing can have been inserted
/// - exactly `k`: one item
/// - saturated (`X == m`): the estimator diverges, fall back to `m / k`
/// - otherwise: `round(-(m/k) * ln(1 - X/m))`
pub fn estimate_cardinality(m: usize, k: usize, bits_set: usize) -> usize {
    if bits_set < k {
        return 0;
    }
    if bits_set == k {
        return 1;
    }
    if bits_set == m {
        return m / k;
    }

    let m_f = m as f64;
    let estimate = -(m_f / k as f64) * (1.0 - bits_set as f64 / m_f).ln();
    tracing::trace!(estimate, bits_set, "Raw cardinality estimate");
    estimate.round() as usize
}

/// Observed false positive probability from the current fill: `(X/m)^k`
pub fn observed_fpr(m: usize, k: usize, bits_set: usize) -> f64 {
    if bits_set == 0 || m == 0 {
        return 0.0;
    }
    (bits_set as f64 / m as f64).powf(k as f64)
}

/// Supported cuckoo bucket sizes
///
/// The maximum load factor is only known for these three sizes, so any other
/// size is rejected instead of guessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum BucketSize {
    Two,
    Four,
    Eight,
}

impl BucketSize {
    /// Fingerprint slots per bucket
    pub fn slots(self) -> usize {
        match self {
            BucketSize::Two => 2,
            BucketSize::Four => 4,
            BucketSize::Eight => 8,
        }
    }

    /// Highest load factor reachable before insertions start failing
    pub fn max_load_factor(self) -> f64 {
        match self {
            BucketSize::Two => 0.84,
            BucketSize::Four => 0.95,
            BucketSize::Eight => 0.98,
        }
    }
}

impl TryFrom<usize> for BucketSize {
    type Error = FilterError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(BucketSize::Two),
            4 => Ok(BucketSize::Four),
            8 => Ok(BucketSize::Eight),
            other => Err(FilterError::InvalidParameter(format!(
                "invalid bucket size {}, must be 2, 4, or 8",
                other
            ))),
        }
    }
}

impl From<BucketSize> for usize {
    fn from(size: BucketSize) -> Self {
        size.slots()
    }
}

/// Cuckoo filter parameters
#[derive(Clone, Debug, PartialEq)]
pub struct CuckooFilterParams {
    /// Number of buckets, always a power of two
    pub num_buckets: usize,
    /// Slots per bucket
    pub bucket_size: BucketSize,
    /// Bits of each fingerprint (1..=8)
    pub fingerprint_bits: u32,
}

/// Calculate cuckoo filter parameters for a capacity and target error rate
pub fn calculate_cuckoo_parameters(
    capacity: usize,
    bucket_size: usize,
    target_fpr: f64,
) -> Result<CuckooFilterParams, FilterError> {
    validate_capacity(capacity)?;
    validate_rate("desired false positive rate", target_fpr)?;
    validate_positive("bucket size", bucket_size)?;
    let bucket_size = BucketSize::try_from(bucket_size)?;

    Ok(CuckooFilterParams {
        num_buckets: bucket_count(capacity, bucket_size),
        bucket_size,
        fingerprint_bits: fingerprint_bits(bucket_size, target_fpr),
    })
}

/// f = clamp(ceil(log2(2b / p)), 1, 8)
pub fn fingerprint_bits(bucket_size: BucketSize, target_fpr: f64) -> u32 {
    let bits = (2.0 * bucket_size.slots() as f64 / target_fpr).log2().ceil();
    if bits >= MAX_FINGERPRINT_BITS as f64 {
        MAX_FINGERPRINT_BITS
    } else if bits < 1.0 {
        1
    } else {
        bits as u32
    }
}

/// buckets = next_pow2(ceil(n / (alpha * b)))
pub fn bucket_count(capacity: usize, bucket_size: BucketSize) -> usize {
    let per_bucket = bucket_size.max_load_factor() * bucket_size.slots() as f64;
    let exact = (capacity as f64 / per_bucket).ceil() as usize;
    exact.max(1).next_power_of_two()
}
