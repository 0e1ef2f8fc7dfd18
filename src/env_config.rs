//! Shared environment configuration.
//!
//! Consolidates `PROPP_PI_SIMS`, `PROPP_PI_CHUNK_SIZE`, `PROPP_PI_PROGRESS`
//! and `RUST_LOG` reads. Values go through the same validating parsers as
//! command-line arguments, so a bad environment value is reported exactly
//! like a bad flag.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_N_SIMS};
use crate::error::Result;
use crate::params::{parse_count, parse_flag};

pub const SIMS_VAR: &str = "PROPP_PI_SIMS";
pub const CHUNK_SIZE_VAR: &str = "PROPP_PI_CHUNK_SIZE";
pub const PROGRESS_VAR: &str = "PROPP_PI_PROGRESS";

/// Install a `tracing` subscriber on stderr, filtered by `RUST_LOG`
/// (default `info`). Tolerates an already-installed subscriber.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok(); // May fail if already initialized
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Read `PROPP_PI_SIMS` (default [`DEFAULT_N_SIMS`]).
pub fn n_sims() -> Result<u64> {
    match var(SIMS_VAR) {
        Some(raw) => parse_count("n_sims", &raw),
        None => Ok(DEFAULT_N_SIMS),
    }
}

/// Read `PROPP_PI_CHUNK_SIZE` (default [`DEFAULT_CHUNK_SIZE`]).
pub fn chunk_size() -> Result<u64> {
    match var(CHUNK_SIZE_VAR) {
        Some(raw) => parse_count("chunk_size", &raw),
        None => Ok(DEFAULT_CHUNK_SIZE),
    }
}

/// Read `PROPP_PI_PROGRESS`; `None` when unset.
pub fn progress() -> Result<Option<bool>> {
    var(PROGRESS_VAR)
        .map(|raw| parse_flag("progress", &raw))
        .transpose()
}

/// Progress setting when no flag is given: `PROPP_PI_PROGRESS` if set (an
/// invalid value is an error), otherwise whether stderr is a terminal.
pub fn progress_or_terminal() -> Result<bool> {
    Ok(progress()?.unwrap_or_else(|| std::io::stderr().is_terminal()))
}

/// Infallible form of [`progress_or_terminal`] for
/// `SimulationParams::default()`: an invalid value is logged and ignored.
pub fn progress_default() -> bool {
    match progress() {
        Ok(Some(flag)) => flag,
        Ok(None) => std::io::stderr().is_terminal(),
        Err(e) => {
            tracing::warn!("ignoring {}: {}", PROGRESS_VAR, e);
            std::io::stderr().is_terminal()
        }
    }
}
