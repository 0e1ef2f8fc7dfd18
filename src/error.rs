//! Error types for propp-pi

use thiserror::Error;

/// propp-pi error type.
///
/// Argument errors are raised before any simulation work starts; none of them
/// are retried.
#[derive(Error, Debug)]
pub enum Error {
    /// `n_sims` or `chunk_size` is not a positive integer-like value.
    #[error("`{name}` must be a single integer >= 1, got {value:?}")]
    InvalidCount { name: &'static str, value: String },

    /// Seed text is present but not a finite non-negative integer.
    #[error("`seed` must be a single finite integer, got {value:?}")]
    InvalidSeed { value: String },

    /// `progress` or `return_ratios` is not a single boolean.
    #[error("`{name}` must be TRUE or FALSE, got {value:?}")]
    InvalidFlag { name: &'static str, value: String },

    /// A diagnostic flip ceiling was requested and some trials never stopped.
    #[error("{active} trial(s) still running after {limit} flips")]
    FlipCeiling { limit: u64, active: usize },

    /// The per-trial ratio output for `n_sims` trials cannot be allocated.
    #[error("cannot store {n_sims} per-trial ratios in memory")]
    RatioStorage { n_sims: u64 },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Name of the offending argument, for argument errors.
    pub fn argument(&self) -> Option<&'static str> {
        match self {
            Error::InvalidCount { name, .. } | Error::InvalidFlag { name, .. } => Some(name),
            Error::InvalidSeed { .. } => Some("seed"),
            _ => None,
        }
    }

    /// The value the caller supplied, for argument errors.
    pub fn supplied(&self) -> Option<&str> {
        match self {
            Error::InvalidCount { value, .. }
            | Error::InvalidSeed { value }
            | Error::InvalidFlag { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_errors_carry_name_and_value() {
        let err = Error::InvalidCount {
            name: "n_sims",
            value: "0".to_string(),
        };
        assert_eq!(err.argument(), Some("n_sims"));
        assert_eq!(err.supplied(), Some("0"));
        assert!(err.to_string().contains("n_sims"));

        let err = Error::InvalidSeed {
            value: "bad".to_string(),
        };
        assert_eq!(err.argument(), Some("seed"));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_runtime_errors_have_no_argument() {
        let err = Error::FlipCeiling {
            limit: 10,
            active: 3,
        };
        assert_eq!(err.argument(), None);
        assert_eq!(err.supplied(), None);
        assert_eq!(err.to_string(), "3 trial(s) still running after 10 flips");
    }
}
