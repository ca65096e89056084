//! # probds Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # End-to-end filter scenarios
//! │   ├── scenarios.rs        # Reference behaviour of both filters
//! │   ├── cross_filter.rs     # Same workload through the MembershipFilter port
//! │   └── telemetry_wiring.rs # Filters reporting to Prometheus
//! │
//! └── benches/           # Criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p probds-tests
//!
//! # By category
//! cargo test -p probds-tests integration::scenarios
//!
//! # Benchmarks
//! cargo bench -p probds-tests
//! ```

pub mod integration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic random keys of `len` bytes for test workloads
pub fn random_keys(count: usize, len: usize, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| (0..len).map(|_| rng.gen()).collect())
        .collect()
}

/// Human-readable keys `"{prefix}-{i}"`
pub fn labelled_keys(prefix: &str, count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("{}-{}", prefix, i).into_bytes())
        .collect()
}
