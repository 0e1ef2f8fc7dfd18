//! Run defaults and reference values.
//!
//! - [`DEFAULT_N_SIMS`]: trials per run when the caller does not say otherwise
//! - [`DEFAULT_CHUNK_SIZE`]: upper bound on trials simulated at once
//! - [`COINS_PER_WORD`]: fair coins extracted from a single 64-bit draw
//!
//! A chunk of `c` trials holds three `c`-length working arrays (heads, flips,
//! balance) plus the active list, so the default chunk keeps the simulator
//! around 320 KB regardless of the total trial count. Larger chunks also run
//! longer per trial: a chunk lasts as long as its slowest trial, and the
//! slowest of `c` stopping times grows like `c²`.

/// Number of trials in a default run.
pub const DEFAULT_N_SIMS: u64 = 100_000;

/// Maximum number of trials held in memory at once.
pub const DEFAULT_CHUNK_SIZE: u64 = 10_000;

/// Each `next_u64()` call yields this many independent fair coins.
pub const COINS_PER_WORD: usize = 64;

/// E[heads / τ] = π / 4, so the mean ratio is scaled by this factor.
pub const PI_SCALE: f64 = 4.0;

/// Reference value used only when reporting the absolute error of an estimate.
pub const PI_REFERENCE: f64 = std::f64::consts::PI;
