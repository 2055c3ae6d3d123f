//! Deterministic random source
//!
//! Wraps `ChaCha8Rng` so that a run is a pure function of its configuration
//! and seed. Every stochastic decision in the engine (initial placement,
//! random braking, probabilistic injection) draws from one `SimRng` owned by
//! the simulator, never from a thread-local generator.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used when the configuration does not name one.
pub const DEFAULT_SEED: u64 = 0;

/// Seeded random stream for a single simulation run.
///
/// Implements [`RngCore`], so the whole `rand::Rng` extension trait is
/// available (`gen`, `gen_range`, index sampling).
#[derive(Debug, Clone)]
pub struct SimRng(ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SimRng {
    /// Create a stream seeded from `seed`.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Number of 32-bit words consumed so far.
    ///
    /// Two streams built from the same seed that report the same position
    /// will produce the same draws from here on.
    pub fn word_pos(&self) -> u128 {
        self.0.get_word_pos()
    }
}

impl RngCore for SimRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::from_seed_u64(12345);
        let mut b = SimRng::from_seed_u64(12345);
        let vals_a: Vec<u32> = (0..20).map(|_| a.gen_range(0..1000)).collect();
        let vals_b: Vec<u32> = (0..20).map(|_| b.gen_range(0..1000)).collect();
        assert_eq!(vals_a, vals_b);
        assert_eq!(a.word_pos(), b.word_pos());
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = SimRng::from_seed_u64(1);
        let mut b = SimRng::from_seed_u64(2);
        let vals_a: Vec<f64> = (0..10).map(|_| a.gen::<f64>()).collect();
        let vals_b: Vec<f64> = (0..10).map(|_| b.gen::<f64>()).collect();
        assert_ne!(vals_a, vals_b);
    }

    #[test]
    fn default_uses_default_seed() {
        let mut a = SimRng::default();
        let mut b = SimRng::from_seed_u64(DEFAULT_SEED);
        assert_eq!(a.next_u64(), b.next_u64());
    }
}
