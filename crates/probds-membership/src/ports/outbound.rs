//! Outbound Ports (Driven Ports)
//!
//! The filters never hash bytes themselves. They depend on a seeded 32-bit
//! hash primitive supplied through this port, so the bit-mixing algorithm can
//! be swapped without touching filter logic.

use std::fmt::Debug;

/// Deterministic mapping from `(seed, bytes)` to a 32-bit value (Driven Port)
///
/// Implementations must be pure: the same seed and bytes always yield the
/// same value, and no call may observe or mutate shared state. Output should
/// be close to uniformly distributed over `u32`.
///
/// `Default` is required so filters can instantiate the provider themselves;
/// `Clone` lets merge/intersect hand the same provider to the result.
pub trait HashProvider: Clone + Default + Debug {
    /// Hash `bytes` under `seed`
    fn hash(&self, seed: u32, bytes: &[u8]) -> u32;

    /// Short name used in logs and diagnostics
    fn name(&self) -> &'static str;
}
