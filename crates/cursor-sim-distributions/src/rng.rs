//! A seedable PRNG wrapper. Every generator call in this workspace takes a
//! `&mut SimRng` as an explicit parameter rather than reaching for a
//! thread-local or global generator, so that identical seeds always produce
//! bit-identical corpora.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic PRNG, seeded once at the top of a generation run and
/// threaded through every call that needs randomness.
pub struct SimRng {
    inner: ChaCha8Rng,
}

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        SimRng {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Fork a derived generator for a sub-task that must itself be
    /// reproducible independent of call order (e.g. per-persona streams).
    /// Mixing in `stream_id` keeps forked streams distinct even when the
    /// parent seed repeats.
    pub fn fork(&mut self, stream_id: u64) -> SimRng {
        use rand::Rng;
        let mixed = self.inner.random::<u64>() ^ stream_id.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        SimRng::from_seed(mixed)
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_produces_same_sequence() {
        let mut a = SimRng::from_seed(42);
        let mut b = SimRng::from_seed(42);
        let sample_a: Vec<u32> = (0..8).map(|_| a.rng().random()).collect();
        let sample_b: Vec<u32> = (0..8).map(|_| b.rng().random()).collect();
        assert_eq!(sample_a, sample_b);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SimRng::from_seed(1);
        let mut b = SimRng::from_seed(2);
        let sample_a: u64 = a.rng().random();
        let sample_b: u64 = b.rng().random();
        assert_ne!(sample_a, sample_b);
    }

    #[test]
    fn fork_is_deterministic_given_same_stream_id() {
        let mut parent_a = SimRng::from_seed(7);
        let mut parent_b = SimRng::from_seed(7);
        let mut child_a = parent_a.fork(3);
        let mut child_b = parent_b.fork(3);
        let va: u32 = child_a.rng().random();
        let vb: u32 = child_b.rng().random();
        assert_eq!(va, vb);
    }
}
