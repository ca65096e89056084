//! FNV-1 (64-bit) adapter

use crate::ports::HashProvider;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Plain 64-bit FNV-1: multiply, then xor each byte
pub fn fnv1_64(bytes: &[u8]) -> u64 {
    fnv1_64_with_basis(FNV_OFFSET_BASIS, bytes)
}

fn fnv1_64_with_basis(basis: u64, bytes: &[u8]) -> u64 {
    bytes.iter().fold(basis, |hash, &b| {
        hash.wrapping_mul(FNV_PRIME) ^ u64::from(b)
    })
}

/// Seeded FNV-1 hash provider
///
/// The seed is spread over the offset basis and the 64-bit result is
/// xor-folded to 32 bits. Cheap, but with weaker mixing than `Murmur3`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fnv1;

impl HashProvider for Fnv1 {
    fn hash(&self, seed: u32, bytes: &[u8]) -> u32 {
        let basis = FNV_OFFSET_BASIS ^ u64::from(seed).wrapping_mul(FNV_PRIME);
        let hash = fnv1_64_with_basis(basis, bytes);
        (hash ^ (hash >> 32)) as u32
    }

    fn name(&self) -> &'static str {
        "fnv1_64"
    }
}
