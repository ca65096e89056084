//! # probds-membership
//!
//! Approximate set membership with Bloom and Cuckoo filters.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BloomFilter`: bit array with `k` seeded probes, merge and intersect
//!   - `CuckooFilter`: bucketed fingerprints with eviction and deletion
//!   - `BloomConfig` / `CuckooConfig`: Configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipFilter`: Driving port shared by both filters
//!   - `HashProvider`: Driven port for the seeded 32-bit hash
//!
//! - **Adapters Layer** (`adapters/`): `HashProvider` implementations
//!   - `Murmur3` (default), `SipHash`, `Fnv1`
//!
//! ## Guarantees
//!
//! - No false negatives: an item added to a Bloom filter, or inserted into a
//!   cuckoo filter and not deleted, always tests positive
//! - A cuckoo filter's load factor never exceeds 0.84 / 0.95 / 0.98 for
//!   bucket sizes 2 / 4 / 8
//!
//! ## Usage Example
//!
//! ```ignore
//! use probds_membership::{BloomFilter, CuckooFilter};
//!
//! let mut bloom = BloomFilter::new(10_000, 0.01)?;
//! bloom.add(b"hello")?;
//! assert!(bloom.contains(b"hello")?);
//!
//! let mut cuckoo = CuckooFilter::new(1000, 4, 0.01)?;
//! cuckoo.insert(b"hello")?;
//! assert!(cuckoo.lookup(b"hello"));
//! assert!(cuckoo.delete(b"hello"));
//! ```
//!
//! Filters are not synchronized. Share one across threads behind a lock.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;

// Re-exports for convenience
pub use adapters::{Fnv1, Murmur3, SipHash};
pub use domain::{
    BloomConfig, BloomConfigBuilder, BloomFilter, BucketSize, CuckooConfig, CuckooConfigBuilder,
    CuckooFilter,
};
pub use error::FilterError;
pub use metrics::{
    FilterKind, Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics, SetOperation,
};
pub use ports::{HashProvider, MembershipFilter};
