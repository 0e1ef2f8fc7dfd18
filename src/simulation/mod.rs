//! Coin-flip simulation and statistics.
//!
//! - [`fast_prng`]: SplitMix64 generator, 64 coins per draw
//! - [`batch`]: Lockstep stopping-time simulation of one batch of trials
//! - [`aggregate`]: Chunking, running statistics and the run entry point

pub mod aggregate;
pub mod batch;
pub mod fast_prng;

// Re-export commonly used items
pub use aggregate::{simulate_coin_pi, simulate_coin_pi_with_rng, ChunkPlan, RunningStats};
pub use batch::{
    simulate_batch, simulate_batch_capped, simulate_batch_with_stopping_times, BatchOutcome,
};
pub use fast_prng::SplitMix64;
