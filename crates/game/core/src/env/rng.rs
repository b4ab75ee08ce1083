//! Deterministic RNG oracle.
//!
//! Every random draw in the core (obstacle and item placement,
//! slow-terrain growth, spawn selection, interval sampling) goes
//! through this seam. Implementations are stateless functions of a
//! seed, so a fixed round seed replays to an identical field and
//! entity trace.

/// Stateless source of deterministic random numbers.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive), for percent-chance checks.
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Random value in `[min, max]` inclusive.
    fn range_u32(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + self.next_u32(seed) % (max - min + 1)
    }

    /// Random value in `[min, max]` inclusive, 64-bit (move intervals).
    fn range_u64(&self, seed: u64, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        min + u64::from(self.next_u32(seed)) % (max - min + 1)
    }
}

/// PCG-XSH-RR: 32-bit output permuted out of 64-bit LCG state.
///
/// Small, fast, and statistically solid; one multiply plus a rotate,
/// with no internal state to desynchronize between replays.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the round seed, a draw counter, and a call-site context into
/// a unique per-event seed.
///
/// Use distinct `context` values when one logical event needs several
/// independent draws (e.g. an x and a y coordinate).
pub fn compute_seed(round_seed: u64, nonce: u64, context: u32) -> u64 {
    // SplitMix64/FxHash-style combiners with a final avalanche.
    let mut hash = round_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
