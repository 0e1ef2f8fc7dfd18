//! Run parameters and argument validation.
//!
//! [`SimulationParams`] is the typed input of
//! [`simulate_coin_pi`](crate::simulation::simulate_coin_pi). Values that
//! arrive as text (command line, environment) go through the `parse_*`
//! functions here, which implement the "single integer-like value" and
//! "single boolean" rules and name the offending argument on failure.

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_N_SIMS};
use crate::env_config;
use crate::error::{Error, Result};

/// 2^64 as f64; integral floats below this fit in a u64.
const U64_LIMIT_F64: f64 = 18_446_744_073_709_551_616.0;

/// 2^63 as f64; integral floats in [-2^63, 2^63) fit in an i64.
const I64_LIMIT_F64: f64 = 9_223_372_036_854_775_808.0;

/// Inputs of one estimation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParams {
    n_sims: u64,
    chunk_size: u64,
    seed: Option<i64>,
    progress: bool,
    return_ratios: bool,
    max_flips: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            n_sims: DEFAULT_N_SIMS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            seed: None,
            progress: env_config::progress_default(),
            return_ratios: false,
            max_flips: None,
        }
    }
}

impl SimulationParams {
    /// Unseeded run of `n_sims` trials, `chunk_size` at a time, progress off.
    pub fn new(n_sims: u64, chunk_size: u64) -> Self {
        Self {
            n_sims,
            chunk_size,
            seed: None,
            progress: false,
            return_ratios: false,
            max_flips: None,
        }
    }

    /// Parse every argument from text, failing on the first invalid one
    /// (in the order n_sims, chunk_size, seed, progress, return_ratios).
    pub fn from_text(
        n_sims: &str,
        chunk_size: &str,
        seed: Option<&str>,
        progress: &str,
        return_ratios: &str,
    ) -> Result<Self> {
        let n_sims = parse_count("n_sims", n_sims)?;
        let chunk_size = parse_count("chunk_size", chunk_size)?;
        let seed = seed.map(parse_seed).transpose()?;
        let progress = parse_flag("progress", progress)?;
        let return_ratios = parse_flag("return_ratios", return_ratios)?;
        Ok(Self {
            n_sims,
            chunk_size,
            seed,
            progress,
            return_ratios,
            max_flips: None,
        })
    }

    /// Seed the run. Negative seeds are allowed and recorded as given.
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_ratios(mut self, return_ratios: bool) -> Self {
        self.return_ratios = return_ratios;
        self
    }

    /// Fail any chunk in which a trial is still running after `max_flips` flips.
    pub fn with_max_flips(mut self, max_flips: u64) -> Self {
        self.max_flips = Some(max_flips);
        self
    }

    pub fn n_sims(&self) -> u64 {
        self.n_sims
    }

    /// Chunk size as given (before clamping to `n_sims`).
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn seed(&self) -> Option<i64> {
        self.seed
    }

    pub fn progress(&self) -> bool {
        self.progress
    }

    pub fn return_ratios(&self) -> bool {
        self.return_ratios
    }

    pub fn max_flips(&self) -> Option<u64> {
        self.max_flips
    }

    /// Check counts. Seeds and flags are valid by construction once typed.
    pub fn validate(&self) -> Result<()> {
        check_count("n_sims", self.n_sims)?;
        check_count("chunk_size", self.chunk_size)?;
        Ok(())
    }
}

/// Reject counts below 1.
pub fn check_count(name: &'static str, value: u64) -> Result<u64> {
    if value < 1 {
        return Err(Error::InvalidCount {
            name,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Integer text, or float text with no fractional part ("200", "2e2", "200.0").
fn parse_integer_like(raw: &str) -> Option<u64> {
    let text = raw.trim();
    if let Ok(v) = text.parse::<u64>() {
        return Some(v);
    }
    let v = text.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v >= 0.0 && v < U64_LIMIT_F64 {
        Some(v as u64)
    } else {
        None
    }
}

/// Signed variant of [`parse_integer_like`] for seeds.
fn parse_signed_integer_like(raw: &str) -> Option<i64> {
    let text = raw.trim();
    if let Ok(v) = text.parse::<i64>() {
        return Some(v);
    }
    let v = text.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v >= -I64_LIMIT_F64 && v < I64_LIMIT_F64 {
        Some(v as i64)
    } else {
        None
    }
}

/// Parse a trial count (`n_sims`, `chunk_size`): integer-like and >= 1.
pub fn parse_count(name: &'static str, raw: &str) -> Result<u64> {
    match parse_integer_like(raw) {
        Some(v) => check_count(name, v).map_err(|_| Error::InvalidCount {
            name,
            value: raw.to_string(),
        }),
        None => Err(Error::InvalidCount {
            name,
            value: raw.to_string(),
        }),
    }
}

/// Parse a seed: a single integer-like value in the i64 range.
pub fn parse_seed(raw: &str) -> Result<i64> {
    parse_signed_integer_like(raw).ok_or_else(|| Error::InvalidSeed {
        value: raw.to_string(),
    })
}

/// Parse a boolean flag. `NA` and empty text are not booleans.
pub fn parse_flag(name: &'static str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" => Ok(true),
        "false" | "f" | "0" | "no" => Ok(false),
        _ => Err(Error::InvalidFlag {
            name,
            value: raw.to_string(),
        }),
    }
}
