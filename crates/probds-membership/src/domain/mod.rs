//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Bloom filter
//! - Cuckoo filter (deletion-capable)
//! - Hash-derived positions, fingerprints and bucket indices
//! - Parameter derivation and estimators
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bloom_filter;
pub mod config;
pub mod cuckoo;
pub mod hash_functions;
pub mod parameters;
pub mod validation;

pub use bloom_filter::BloomFilter;
pub use config::{
    BloomConfig, BloomConfigBuilder, CuckooConfig, CuckooConfigBuilder, DEFAULT_MAX_KICKS,
};
pub use cuckoo::{Bucket, CuckooFilter};
pub use hash_functions::Fingerprint;
pub use parameters::{
    calculate_cuckoo_parameters, calculate_optimal_parameters, BloomFilterParams, BucketSize,
    CuckooFilterParams,
};
