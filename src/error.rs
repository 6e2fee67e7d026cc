//! Error types
//!
//! [`ValidationError`] is the only error the calculators raise. It is
//! returned before any result is produced, so a failed call never leaves a
//! partial trace or a half-mutated ledger behind.
//!
//! [`LedgerFileError`] belongs to the tabular exchange layer and wraps the
//! I/O and CSV failures that can happen around a ledger load or save;
//! [`ConfigError`] covers assembling a scenario from JSON.

use thiserror::Error;

/// Out-of-range or inconsistent input to one of the calculators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("category `{category}`: minimum {min} exceeds maximum {max}")]
    InvertedBounds { category: String, min: f64, max: f64 },

    #[error("category `{category}`: amount {amount} must be a finite, non-negative number")]
    NegativeAmount { category: String, amount: f64 },

    #[error("income entry must have equal minimum and maximum (got {min} and {max})")]
    IncomeMismatch { min: f64, max: f64 },

    #[error("ledger has no income entry")]
    MissingIncome,

    #[error("ledger has more than one income entry")]
    DuplicateIncome,

    #[error("category `{0}` appears more than once")]
    DuplicateCategory(String),

    #[error("number of months must be non-negative (got {0})")]
    NegativeMonths(i64),

    #[error("simulation horizon must be positive and finite (got {0})")]
    InvalidHorizon(f64),

    #[error("integration step must be positive and finite (got {0})")]
    InvalidStep(f64),

    #[error(
        "horizon / step gives {0} RK4 steps, more than the supported {max}",
        max = crate::simulation::MAX_STEPS
    )]
    TooManySteps(f64),

    #[error("display series needs at least 2 samples (got {0})")]
    TooFewDisplaySamples(usize),

    #[error(
        "display series is limited to {max} samples (got {0})",
        max = crate::annuity::MAX_DISPLAY_SAMPLES
    )]
    TooManyDisplaySamples(usize),
}

/// Failure while reading or writing a ledger in the tabular exchange format.
#[derive(Error, Debug)]
pub enum LedgerFileError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed ledger table: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Failure while assembling a scenario from its configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerFileError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ConfigError {
    /// True when the caller supplied bad input rather than the environment failing
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ConfigError::Parse(_)
                | ConfigError::Validation(_)
                | ConfigError::Ledger(LedgerFileError::Validation(_))
                | ConfigError::Ledger(LedgerFileError::Csv(_))
        )
    }
}
