//! Trial batch simulator — all trials of a chunk flip in lockstep.
//!
//! Instead of running each trial to its stopping time before starting the
//! next (vertical), every tick draws one coin for *every* still-active trial
//! (horizontal). The active list is compacted in place after each tick, so
//! a tick costs O(active) and the working set shrinks as trials stop.
//!
//! **Layout**: three preallocated parallel arrays (heads, flips, balance)
//! indexed by trial, plus a list of active trial indices. Nothing is
//! reallocated after construction.
//!
//! **Randomness**: active trials are taken in groups of 64; each group
//! consumes exactly one `next_u64()` and trial j of the group reads bit j.
//! The number of draws per tick is `ceil(active / 64)`, a deterministic
//! function of the generator state, so a seeded run replays exactly.
//!
//! **Cost**: τ has no finite mean (P(τ > t) ~ sqrt(2 / πt)), so the number of
//! ticks is set by the slowest trial and grows roughly as n² for a batch of n.
//! Keep batches in the thousands to tens of thousands.

use rand::RngCore;

use crate::constants::COINS_PER_WORD;
use crate::error::{Error, Result};

use super::fast_prng::coin_from_word;

/// Per-chunk working arrays for the stopping-time process.
struct TrialBatch {
    heads: Vec<u64>,
    flips: Vec<u64>,
    /// heads − tails; a trial stops the first time this becomes positive.
    balance: Vec<i64>,
    active: Vec<usize>,
}

impl TrialBatch {
    fn new(n: usize) -> Self {
        Self {
            heads: vec![0; n],
            flips: vec![0; n],
            balance: vec![0; n],
            active: (0..n).collect(),
        }
    }

    #[inline]
    fn is_done(&self) -> bool {
        self.active.is_empty()
    }

    /// Advance every active trial by one flip, then drop the ones that stopped.
    fn tick<R: RngCore + ?Sized>(&mut self, rng: &mut R) {
        for group in self.active.chunks(COINS_PER_WORD) {
            let word = rng.next_u64();
            for (j, &t) in group.iter().enumerate() {
                let heads = coin_from_word(word, j);
                self.flips[t] += 1;
                if heads {
                    self.heads[t] += 1;
                    self.balance[t] += 1;
                } else {
                    self.balance[t] -= 1;
                }
            }
        }

        let balance = &self.balance;
        self.active.retain(|&t| balance[t] <= 0);
    }

    /// Run until every trial has stopped.
    fn run<R: RngCore + ?Sized>(&mut self, rng: &mut R) {
        while !self.is_done() {
            self.tick(rng);
        }
    }

    /// Run until every trial has stopped or `limit` ticks have elapsed.
    fn run_capped<R: RngCore + ?Sized>(&mut self, limit: u64, rng: &mut R) -> Result<()> {
        let mut ticks = 0u64;
        while !self.is_done() {
            if ticks >= limit {
                return Err(Error::FlipCeiling {
                    limit,
                    active: self.active.len(),
                });
            }
            self.tick(rng);
            ticks += 1;
        }
        Ok(())
    }

    /// heads / flips per trial, in trial order.
    fn ratios(&self) -> Vec<f64> {
        self.heads
            .iter()
            .zip(&self.flips)
            .map(|(&h, &f)| h as f64 / f as f64)
            .collect()
    }
}

/// Stopped batch with per-trial stopping times, for diagnostics.
#[derive(Clone, Debug)]
pub struct BatchOutcome {
    pub ratios: Vec<f64>,
    /// τ per trial: the flip at which heads first exceeded tails.
    pub stopping_times: Vec<u64>,
    /// Heads count per trial at τ (always `(τ + 1) / 2`).
    pub heads: Vec<u64>,
}

/// Simulate `n` independent trials and return heads/τ for each, in (0.5, 1.0].
///
/// Terminates almost surely; there is no iteration cap. Use
/// [`simulate_batch_capped`] when a ceiling is wanted.
pub fn simulate_batch<R: RngCore + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
    let mut batch = TrialBatch::new(n);
    batch.run(rng);
    batch.ratios()
}

/// Like [`simulate_batch`], but fails with [`Error::FlipCeiling`] if some
/// trial has not stopped after `max_flips` flips. `None` means no ceiling.
///
/// Draw order is identical to [`simulate_batch`], so a run that finishes
/// under the ceiling returns exactly the same ratios.
pub fn simulate_batch_capped<R: RngCore + ?Sized>(
    n: usize,
    max_flips: Option<u64>,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let mut batch = TrialBatch::new(n);
    match max_flips {
        Some(limit) => batch.run_capped(limit, rng)?,
        None => batch.run(rng),
    }
    Ok(batch.ratios())
}

/// Simulate `n` trials and keep the stopping times alongside the ratios.
pub fn simulate_batch_with_stopping_times<R: RngCore + ?Sized>(
    n: usize,
    rng: &mut R,
) -> BatchOutcome {
    let mut batch = TrialBatch::new(n);
    batch.run(rng);
    BatchOutcome {
        ratios: batch.ratios(),
        stopping_times: batch.flips,
        heads: batch.heads,
    }
}
