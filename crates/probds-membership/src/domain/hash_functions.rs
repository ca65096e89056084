//! Hash-derived positions for both filters
//!
//! Seed assignment:
//! - Bloom probe `i` (0-indexed) hashes with seed `i + 1`
//! - Cuckoo bucket indices use seed 0, fingerprints use seed 1
//!
//! All functions go through the `HashProvider` port and never look at the
//! algorithm behind it.

use crate::ports::HashProvider;

/// Seed for hashing an item to its primary cuckoo bucket
pub const CUCKOO_INDEX_SEED: u32 = 0;

/// Seed for cuckoo fingerprints and the alternate-bucket offset
pub const CUCKOO_FINGERPRINT_SEED: u32 = 1;

/// Fingerprint stored in each cuckoo slot. Zero is reserved for "empty".
pub type Fingerprint = u8;

/// Seeds for `k` Bloom probes: `1..=k`
pub fn bloom_seeds(k: usize) -> Vec<u32> {
    (0..k).map(|i| (i as u32).wrapping_add(1)).collect()
}

/// Compute the bit position of every probe for `element`
///
/// Position `i` is `hash(seeds[i], element) mod m`.
pub fn compute_bit_positions<'a, H: HashProvider>(
    hasher: &'a H,
    seeds: &'a [u32],
    element: &'a [u8],
    m: usize,
) -> impl Iterator<Item = usize> + 'a {
    seeds
        .iter()
        .map(move |&seed| (u64::from(hasher.hash(seed, element)) % m as u64) as usize)
}

/// Fingerprint of `item`, truncated to `bits` low bits, never zero
pub fn fingerprint<H: HashProvider>(hasher: &H, item: &[u8], bits: u32) -> Fingerprint {
    let mask = ((1u16 << bits) - 1) as Fingerprint;
    let fp = (hasher.hash(CUCKOO_FINGERPRINT_SEED, item) as Fingerprint) & mask;
    if fp == 0 {
        1
    } else {
        fp
    }
}

/// Primary bucket of `item`; `num_buckets` must be a power of two
pub fn primary_index<H: HashProvider>(hasher: &H, item: &[u8], num_buckets: usize) -> usize {
    hasher.hash(CUCKOO_INDEX_SEED, item) as usize & (num_buckets - 1)
}

/// Partial-key cuckoo hashing: the other bucket of a fingerprint
///
/// Only the fingerprint and one of its buckets are needed, and the mapping
/// is an involution: `alternate(alternate(i, fp), fp) == i`.
pub fn alternate_index<H: HashProvider>(
    hasher: &H,
    index: usize,
    fp: Fingerprint,
    num_buckets: usize,
) -> usize {
    let offset = hasher.hash(CUCKOO_FINGERPRINT_SEED, &[fp]) as usize & (num_buckets - 1);
    index ^ offset
}
