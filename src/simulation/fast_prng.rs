//! Seedable PRNG for the coin process — SplitMix64 with coin-word extraction.
//!
//! SplitMix64 has a single u64 state word, so a seed *is* the full generator
//! state: seeding with `s` and replaying the same chunk sequence reproduces
//! every draw. The generator implements [`rand::RngCore`] and
//! [`rand::SeedableRng`], so the simulator only ever sees the `rand` traits.
//!
//! For coin flipping we never draw one bit per call: one `next_u64()` yields
//! 64 independent fair coins (bit i → coin i), see [`coin_from_word`].

use rand::{Rng, RngCore, SeedableRng};

/// SplitMix64 PRNG — single u64 state, excellent statistical quality.
#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Create from seed.
    #[inline(always)]
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from the thread-local OS-seeded generator (unseeded runs).
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random::<u64>())
    }

    /// Generate next u64.
    #[inline(always)]
    pub fn next_word(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }
}

impl RngCore for SplitMix64 {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        (self.next_word() >> 32) as u32
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.next_word()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for SplitMix64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    /// The u64 seed is used as the state directly (no PCG expansion), so
    /// `seed_from_u64(s)` and `new(s)` are the same generator.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// Coin `i` (0-based) of a 64-coin word: `true` is heads.
///
/// Each bit of a SplitMix64 output is an independent fair coin, so the low
/// `k` bits of one word cover the next `k` active trials.
#[inline(always)]
pub fn coin_from_word(word: u64, i: usize) -> bool {
    (word >> i) & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splitmix64_deterministic() {
        let mut rng1 = SplitMix64::new(42);
        let mut rng2 = SplitMix64::new(42);
        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_seed_from_u64_matches_new() {
        let mut a = SplitMix64::seed_from_u64(2026);
        let mut b = SplitMix64::new(2026);
        let mut c = SplitMix64::from_seed(2026u64.to_le_bytes());
        for _ in 0..16 {
            let x = a.next_u64();
            assert_eq!(x, b.next_u64());
            assert_eq!(x, c.next_u64());
        }
    }

    #[test]
    fn test_fill_bytes_partial_tail() {
        let mut rng = SplitMix64::new(7);
        let mut buf = [0u8; 13];
        rng.fill_bytes(&mut buf);

        let mut reference = SplitMix64::new(7);
        let w0 = reference.next_u64().to_le_bytes();
        let w1 = reference.next_u64().to_le_bytes();
        assert_eq!(&buf[..8], &w0);
        assert_eq!(&buf[8..], &w1[..5]);
    }

    #[test]
    fn test_coin_from_word_bits() {
        let coins: Vec<bool> = (0..5).map(|i| coin_from_word(0b1011, i)).collect();
        assert_eq!(coins, vec![true, true, false, true, false]);
        assert!(coin_from_word(1 << 63, 63));
    }

    #[test]
    fn test_coin_distribution() {
        let mut rng = SplitMix64::new(42);
        let n_words = 20_000;
        let mut heads = 0u64;
        for _ in 0..n_words {
            heads += rng.next_u64().count_ones() as u64;
        }
        // Each bit should be heads with p = 1/2
        let total = (n_words * 64) as f64;
        let ratio = heads as f64 / total;
        assert!(
            ratio > 0.495 && ratio < 0.505,
            "heads fraction {:.4} (expected ~0.5)",
            ratio
        );
    }
}
