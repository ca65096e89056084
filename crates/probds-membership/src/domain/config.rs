//! Filter configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use probds_membership::domain::CuckooConfigBuilder;
//!
//! let config = CuckooConfigBuilder::new()
//!     .capacity(10_000)
//!     .bucket_size(4)
//!     .target_fpr(0.01)
//!     .build()
//!     .expect("Valid config");
//! ```

use serde::{Deserialize, Serialize};

use super::parameters::BucketSize;
use super::validation::{validate_capacity, validate_positive, validate_rate};
use crate::error::FilterError;

/// Eviction attempts before an insertion gives up
pub const DEFAULT_MAX_KICKS: usize = 500;

/// Bloom filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    /// Items the filter is sized for
    pub capacity: usize,
    /// Target false positive rate at capacity (0 < p < 1)
    pub error_rate: f64,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            error_rate: 0.01,
        }
    }
}

impl BloomConfig {
    /// Create a new configuration with validation
    pub fn new(capacity: usize, error_rate: f64) -> Result<Self, FilterError> {
        let config = Self {
            capacity,
            error_rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| FilterError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), FilterError> {
        validate_capacity(self.capacity)?;
        validate_rate("error rate", self.error_rate)
    }

    /// Builder-style method to set capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builder-style method to set the error rate
    pub fn with_error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = error_rate;
        self
    }
}

/// Builder for BloomConfig with validation
#[derive(Default)]
pub struct BloomConfigBuilder {
    capacity: Option<usize>,
    error_rate: Option<f64>,
}

impl BloomConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of items the filter is sized for
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the target false positive rate
    pub fn error_rate(mut self, error_rate: f64) -> Self {
        self.error_rate = Some(error_rate);
        self
    }

    /// Build the BloomConfig, validating all parameters
    pub fn build(self) -> Result<BloomConfig, FilterError> {
        let defaults = BloomConfig::default();
        BloomConfig::new(
            self.capacity.unwrap_or(defaults.capacity),
            self.error_rate.unwrap_or(defaults.error_rate),
        )
    }
}

/// Cuckoo filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuckooConfig {
    /// Items the filter is sized for
    pub capacity: usize,
    /// Fingerprint slots per bucket (2, 4 or 8)
    pub bucket_size: usize,
    /// Desired false positive rate (0 < p < 1)
    pub target_fpr: f64,
    /// Eviction attempts per insertion
    pub max_kicks: usize,
}

impl Default for CuckooConfig {
    fn default() -> Self {
        Self {
            capacity: 1_000,
            bucket_size: 4,
            target_fpr: 0.01,
            max_kicks: DEFAULT_MAX_KICKS,
        }
    }
}

impl CuckooConfig {
    /// Create a new configuration with validation, using the default kick budget
    pub fn new(capacity: usize, bucket_size: usize, target_fpr: f64) -> Result<Self, FilterError> {
        let config = Self {
            capacity,
            bucket_size,
            target_fpr,
            max_kicks: DEFAULT_MAX_KICKS,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| FilterError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), FilterError> {
        validate_capacity(self.capacity)?;
        validate_rate("desired false positive rate", self.target_fpr)?;
        validate_positive("bucket size", self.bucket_size)?;
        BucketSize::try_from(self.bucket_size)?;
        validate_positive("max kicks", self.max_kicks)
    }

    /// Builder-style method to set the kick budget
    pub fn with_max_kicks(mut self, max_kicks: usize) -> Self {
        self.max_kicks = max_kicks;
        self
    }
}

/// Builder for CuckooConfig with validation
#[derive(Default)]
pub struct CuckooConfigBuilder {
    capacity: Option<usize>,
    bucket_size: Option<usize>,
    target_fpr: Option<f64>,
    max_kicks: Option<usize>,
}

impl CuckooConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of items the filter is sized for
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set slots per bucket (2, 4 or 8)
    pub fn bucket_size(mut self, bucket_size: usize) -> Self {
        self.bucket_size = Some(bucket_size);
        self
    }

    /// Set the desired false positive rate
    pub fn target_fpr(mut self, target_fpr: f64) -> Self {
        self.target_fpr = Some(target_fpr);
        self
    }

    /// Set eviction attempts per insertion
    pub fn max_kicks(mut self, max_kicks: usize) -> Self {
        self.max_kicks = Some(max_kicks);
        self
    }

    /// Build the CuckooConfig, validating all parameters
    pub fn build(self) -> Result<CuckooConfig, FilterError> {
        let defaults = CuckooConfig::default();

        let config = CuckooConfig {
            capacity: self.capacity.unwrap_or(defaults.capacity),
            bucket_size: self.bucket_size.unwrap_or(defaults.bucket_size),
            target_fpr: self.target_fpr.unwrap_or(defaults.target_fpr),
            max_kicks: self.max_kicks.unwrap_or(defaults.max_kicks),
        };

        config.validate()?;
        Ok(config)
    }
}
