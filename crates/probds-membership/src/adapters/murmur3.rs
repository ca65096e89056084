//! MurmurHash3 (x86, 32-bit) adapter
//!
//! Reproduces the reference test vectors bit-for-bit, so filters built with
//! this provider agree with any other implementation of the same algorithm.

use std::io::Cursor;

use crate::ports::HashProvider;

/// MurmurHash3 32-bit hash provider
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Murmur3;

impl HashProvider for Murmur3 {
    fn hash(&self, seed: u32, bytes: &[u8]) -> u32 {
        let mut cursor = Cursor::new(bytes);
        // Reading from an in-memory cursor cannot fail
        ::murmur3::murmur3_32(&mut cursor, seed).unwrap_or(0)
    }

    fn name(&self) -> &'static str {
        "murmur3_32"
    }
}
