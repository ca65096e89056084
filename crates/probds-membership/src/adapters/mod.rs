//! Adapters Layer (Driven Adapters)
//!
//! Concrete implementations of the `HashProvider` port.
//!
//! ## Adapters
//!
//! - `Murmur3` - MurmurHash3 x86 32-bit, the reference algorithm and default
//! - `SipHash` - SipHash-1-3 keyed by the seed, folded to 32 bits
//! - `Fnv1` - 64-bit FNV-1 with the seed mixed into the offset basis

pub mod fnv1;
pub mod murmur3;
pub mod siphash;

pub use self::fnv1::{fnv1_64, Fnv1};
pub use self::murmur3::Murmur3;
pub use self::siphash::SipHash;
