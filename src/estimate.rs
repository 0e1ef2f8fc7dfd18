//! The estimate record produced by a run, its display block and JSON I/O.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::PI_REFERENCE;
use crate::error::Result;

/// Result of one estimation run. Built once by the aggregator, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pi_hat: f64,
    mean_ratio: f64,
    std_error: f64,
    n_sims: u64,
    /// Effective chunk size, after clamping to `n_sims`.
    chunk_size: u64,
    n_chunks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ratios: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
}

impl Estimate {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        pi_hat: f64,
        mean_ratio: f64,
        std_error: f64,
        n_sims: u64,
        chunk_size: u64,
        n_chunks: u64,
        ratios: Option<Vec<f64>>,
        seed: Option<i64>,
    ) -> Self {
        Self {
            pi_hat,
            mean_ratio,
            std_error,
            n_sims,
            chunk_size,
            n_chunks,
            ratios,
            seed,
        }
    }

    /// Point estimate of π (`4 * mean_ratio`).
    pub fn pi_hat(&self) -> f64 {
        self.pi_hat
    }

    pub fn mean_ratio(&self) -> f64 {
        self.mean_ratio
    }

    /// Standard error of `pi_hat`.
    pub fn std_error(&self) -> f64 {
        self.std_error
    }

    pub fn n_sims(&self) -> u64 {
        self.n_sims
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn n_chunks(&self) -> u64 {
        self.n_chunks
    }

    /// Per-trial ratios, only when the run asked for them.
    pub fn ratios(&self) -> Option<&[f64]> {
        self.ratios.as_deref()
    }

    pub fn seed(&self) -> Option<i64> {
        self.seed
    }

    /// |π̂ − π|
    pub fn abs_error(&self) -> f64 {
        (self.pi_hat - PI_REFERENCE).abs()
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Propp coin-flip estimate of π")?;
        writeln!(f, "  π estimate:  {:.6}", self.pi_hat)?;
        writeln!(f, "  Std error:   {:.6}", self.std_error)?;
        writeln!(f, "  |π̂ − π|:     {:.6}", self.abs_error())?;
        writeln!(f, "  Mean ratio:  {:.6}", self.mean_ratio)?;
        writeln!(f, "  Trials:      {}", self.n_sims)?;
        write!(
            f,
            "  Chunks:      {} × ≤{} trials",
            self.n_chunks, self.chunk_size
        )?;
        if let Some(seed) = self.seed {
            write!(f, "\n  Seed:        {}", seed)?;
        }
        if let Some(ratios) = &self.ratios {
            write!(f, "\n  Ratios:      {} per-trial values stored", ratios.len())?;
        }
        Ok(())
    }
}

/// Write the estimate as pretty JSON, creating parent directories.
pub fn save_estimate(estimate: &Estimate, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(estimate)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read an estimate written by [`save_estimate`].
pub fn load_estimate(path: impl AsRef<Path>) -> Result<Estimate> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ratios: Option<Vec<f64>>, seed: Option<i64>) -> Estimate {
        Estimate::new(3.2, 0.8, 0.05, 4, 2, 2, ratios, seed)
    }

    #[test]
    fn test_display_minimal() {
        let text = sample(None, None).to_string();
        assert!(text.contains("3.200000"));
        assert!(text.contains("Trials:      4"));
        assert!(!text.contains("Seed"));
        assert!(!text.contains("Ratios"));
    }

    #[test]
    fn test_display_with_seed_and_ratios() {
        let text = sample(Some(vec![1.0, 0.75, 1.0, 0.75]), Some(42)).to_string();
        assert!(text.contains("Seed:        42"));
        assert!(text.contains("4 per-trial values stored"));
    }

    #[test]
    fn test_display_non_finite_does_not_panic() {
        let est = Estimate::new(f64::NAN, f64::NAN, f64::INFINITY, 1, 1, 1, Some(vec![]), None);
        let _ = est.to_string();
    }

    #[test]
    fn test_negative_seed_round_trips() {
        let est = sample(None, Some(-5));
        assert!(est.to_string().contains("Seed:        -5"));
        let json = serde_json::to_value(&est).unwrap();
        assert_eq!(json["seed"], -5);
    }

    #[test]
    fn test_json_omits_absent_fields() {
        let json = serde_json::to_value(sample(None, None)).unwrap();
        assert!(json.get("ratios").is_none());
        assert!(json.get("seed").is_none());
        assert_eq!(json["n_chunks"], 2);
        assert_eq!(json["pi_hat"], 3.2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("estimate.json");
        let est = sample(Some(vec![1.0, 0.75, 1.0, 0.6]), Some(7));
        save_estimate(&est, &path).unwrap();
        let loaded = load_estimate(&path).unwrap();
        assert_eq!(loaded, est);
    }
}
