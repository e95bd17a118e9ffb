// src/model/rng.rs

//! Random source for a single replication.
//!
//! Every replication owns its own generator. Nothing is shared between
//! replications, so a batch can be reordered or split across threads
//! without changing any single replication's draws.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

const STREAM_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// A seedable PCG generator. Engines accept any `rand::Rng`; this is the
/// one the runner hands out.
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: Pcg64Mcg,
}

impl SimRng {
    /// Deterministic stream, for tests and reproducible batches.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Fresh randomness from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    /// Stream for replication `index` of a batch seeded with `master_seed`.
    pub fn for_replication(master_seed: u64, index: u64) -> Self {
        Self::from_seed(master_seed ^ index.wrapping_mul(STREAM_SPREAD))
    }
}

impl RngCore for SimRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SimRng::from_seed(7);
        let mut b = SimRng::from_seed(7);
        for _ in 0..32 {
            assert_eq!(a.gen::<f64>(), b.gen::<f64>());
        }
    }

    #[test]
    fn test_replication_streams_differ() {
        let mut first = SimRng::for_replication(42, 0);
        let mut second = SimRng::for_replication(42, 1);
        let a: Vec<u64> = (0..8).map(|_| first.next_u64()).collect();
        let b: Vec<u64> = (0..8).map(|_| second.next_u64()).collect();
        assert_ne!(a, b);
    }
}
