//! FNV-1a hashing: the crate's default hasher.
//!
//! Fowler–Noll–Vo 1a over 64 bits: xor each byte into the accumulator,
//! then multiply by the FNV prime with wrapping arithmetic (the wraparound
//! is part of the algorithm's distribution, not an overflow bug).
//!
//! This is a fast, deterministic, non-cryptographic hash. There is no seed:
//! an adversary who controls the key set can engineer collisions. That is a
//! documented property of the design, accepted for the intended workloads
//! (fixed-length digest strings, config keys).

use core::hash::{BuildHasherDefault, Hasher};

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Streaming FNV-1a hasher over 64 bits.
#[derive(Debug, Copy, Clone)]
pub struct Fnv1aHasher {
    state: u64,
}

impl Default for Fnv1aHasher {
    fn default() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= u64::from(b);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }
}

/// `BuildHasher` producing [`Fnv1aHasher`]; `Clone + Default`, so it slots
/// into the map's `S` parameter without ceremony.
pub type Fnv1aBuildHasher = BuildHasherDefault<Fnv1aHasher>;
