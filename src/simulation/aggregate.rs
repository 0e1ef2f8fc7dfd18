//! Chunked aggregator — runs the batch simulator chunk by chunk and folds
//! each chunk into running sums.
//!
//! Chunks run strictly in order on one thread. The generator is threaded by
//! `&mut` through every chunk, so a seeded run is a pure function of
//! `(n_sims, chunk_size, seed)`. Peak memory is one chunk's working arrays,
//! plus the full ratio vector only when the caller asks for it.

use rand::RngCore;
use tracing::{debug, info};

use crate::constants::PI_SCALE;
use crate::error::{Error, Result};
use crate::estimate::Estimate;
use crate::params::{check_count, SimulationParams};

use super::batch::simulate_batch_capped;
use super::fast_prng::SplitMix64;

/// How `n_sims` trials are split into chunks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkPlan {
    n_sims: u64,
    chunk_size: u64,
    n_chunks: u64,
}

impl ChunkPlan {
    /// Clamp `chunk_size` to `n_sims` and count chunks. Both must be >= 1.
    pub fn new(n_sims: u64, chunk_size: u64) -> Result<Self> {
        check_count("n_sims", n_sims)?;
        check_count("chunk_size", chunk_size)?;
        let chunk_size = chunk_size.min(n_sims);
        Ok(Self {
            n_sims,
            chunk_size,
            n_chunks: n_sims.div_ceil(chunk_size),
        })
    }

    pub fn n_sims(&self) -> u64 {
        self.n_sims
    }

    /// Effective chunk size (never larger than `n_sims`).
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn n_chunks(&self) -> u64 {
        self.n_chunks
    }

    /// `(offset, len)` of each chunk in order; only the last may be short.
    pub fn chunks(&self) -> impl Iterator<Item = (u64, u64)> {
        let Self {
            n_sims, chunk_size, ..
        } = *self;
        (0..self.n_chunks).map(move |k| {
            let offset = k * chunk_size;
            (offset, chunk_size.min(n_sims - offset))
        })
    }
}

/// Running sum and sum of squares of the ratios seen so far.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningStats {
    sum: f64,
    sum_sq: f64,
    count: u64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one chunk's partial sums into the totals.
    pub fn add_chunk(&mut self, ratios: &[f64]) {
        let (sum, sum_sq) = ratios
            .iter()
            .fold((0.0, 0.0), |(s, s2), &r| (s + r, s2 + r * r));
        self.sum += sum;
        self.sum_sq += sum_sq;
        self.count += ratios.len() as u64;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// Population variance, clamped at 0 against cancellation in
    /// `E[x²] − E[x]²`.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.mean();
        (self.sum_sq / self.count as f64 - mean * mean).max(0.0)
    }

    /// Standard error of the mean ratio.
    pub fn std_error(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.variance() / self.count as f64).sqrt()
    }
}

/// Zeroed `n_sims`-length ratio output, or [`Error::RatioStorage`] if it
/// cannot be allocated.
fn ratio_buffer(n_sims: u64) -> Result<Vec<f64>> {
    let len = usize::try_from(n_sims).map_err(|_| Error::RatioStorage { n_sims })?;
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| Error::RatioStorage { n_sims })?;
    out.resize(len, 0.0);
    Ok(out)
}

/// Estimate π with Propp's stopping-time construction.
///
/// Seeds a [`SplitMix64`] from `params.seed()` (or from OS entropy when
/// unseeded) and runs [`simulate_coin_pi_with_rng`]. All arguments are
/// validated before any trial is simulated.
pub fn simulate_coin_pi(params: &SimulationParams) -> Result<Estimate> {
    let mut rng = match params.seed() {
        // Two's-complement bits: -1 and u64::MAX share a state.
        Some(seed) => SplitMix64::new(seed as u64),
        None => SplitMix64::from_entropy(),
    };
    simulate_coin_pi_with_rng(params, &mut rng)
}

/// Run the chunked simulation on a caller-supplied generator.
///
/// `params.seed()` is only recorded in the returned [`Estimate`]; the
/// generator is used as given. Counts are checked by [`ChunkPlan::new`] and
/// the ratio buffer is reserved before the first chunk runs.
pub fn simulate_coin_pi_with_rng<R: RngCore + ?Sized>(
    params: &SimulationParams,
    rng: &mut R,
) -> Result<Estimate> {
    let plan = ChunkPlan::new(params.n_sims(), params.chunk_size())?;
    let n_chunks = plan.n_chunks();
    let n_sims = plan.n_sims();

    debug!(
        n_sims,
        chunk_size = plan.chunk_size(),
        n_chunks,
        seed = ?params.seed(),
        "starting coin-flip simulation"
    );

    let mut stats = RunningStats::new();
    let mut all_ratios = if params.return_ratios() {
        Some(ratio_buffer(n_sims)?)
    } else {
        None
    };

    for (k, (offset, len)) in plan.chunks().enumerate() {
        let ratios = simulate_batch_capped(len as usize, params.max_flips(), rng)?;
        stats.add_chunk(&ratios);

        if let Some(out) = all_ratios.as_mut() {
            let start = offset as usize;
            out[start..start + ratios.len()].copy_from_slice(&ratios);
        }

        if params.progress() {
            let chunk = k as u64 + 1;
            let processed = stats.count();
            info!(chunk, n_chunks, processed, n_sims, "chunk done");
        }
    }

    let mean_ratio = stats.mean();
    let estimate = Estimate::new(
        PI_SCALE * mean_ratio,
        mean_ratio,
        PI_SCALE * stats.std_error(),
        n_sims,
        plan.chunk_size(),
        n_chunks,
        all_ratios,
        params.seed(),
    );

    debug!(
        pi_hat = estimate.pi_hat(),
        std_error = estimate.std_error(),
        "simulation finished"
    );

    Ok(estimate)
}
