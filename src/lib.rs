//! # propp-pi — π from the stopping time of a fair coin
//!
//! Flip a fair coin until heads first outnumber tails, at flip τ. The ratio
//! heads/τ at that moment has expectation exactly π/4 (Propp's
//! construction), so averaging it over many independent trials and
//! multiplying by 4 estimates π.
//!
//! ## Pipeline
//!
//! | Stage | Rust module | Description |
//! |-------|-------------|-------------|
//! | Generator | [`simulation::fast_prng`] | SplitMix64, seeded once per run; one u64 draw = 64 coins |
//! | Batch | [`simulation::batch`] | All trials of a chunk flip in lockstep; stopped trials leave the active list |
//! | Aggregate | [`simulation::aggregate`] | Chunks of ≤ `chunk_size` trials folded into running sum / sum of squares |
//! | Result | [`estimate`] | Immutable [`Estimate`]: π̂, mean ratio, standard error, counts, seed |
//!
//! ## Statistics
//!
//! With n trials and ratios rᵢ: `mean = Σrᵢ / n`,
//! `var = max(Σrᵢ² / n − mean², 0)`, `π̂ = 4·mean`, `se = 4·sqrt(var / n)`.
//!
//! ## Example
//!
//! ```no_run
//! use propp_pi::{simulate_coin_pi, SimulationParams};
//!
//! let params = SimulationParams::new(1_000, 200).with_seed(2026);
//! let estimate = simulate_coin_pi(&params)?;
//! println!("{estimate}");
//! # Ok::<(), propp_pi::Error>(())
//! ```

pub mod constants;
pub mod env_config;
pub mod error;
pub mod estimate;
pub mod params;
pub mod simulation;

pub use error::{Error, Result};
pub use estimate::{load_estimate, save_estimate, Estimate};
pub use params::SimulationParams;
pub use simulation::{simulate_batch, simulate_coin_pi, simulate_coin_pi_with_rng, SplitMix64};
