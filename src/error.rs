//! Error types for configuration and projection

use crate::frequency::Frequency;
use thiserror::Error;

/// Everything that can reject a projection before (or while) loading it.
///
/// The engine itself is total for a validated configuration, so every
/// variant here is raised upfront by validation or by the loaders.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A frequency tag that is not one of the seven supported cadences
    #[error("unknown frequency tag '{0}'")]
    UnknownFrequency(String),

    /// A monetary field that is negative or not a finite number
    #[error("invalid {field}: {value} (must be a finite, non-negative amount)")]
    InvalidAmount { field: &'static str, value: f64 },

    /// Interest rate that is NaN or infinite
    #[error("invalid interest rate: {0} (must be finite)")]
    InvalidRate(f64),

    /// Timeframe of zero years
    #[error("timeframe must be at least one year")]
    ZeroTimeframe,

    /// Timeframe whose step count does not fit the step counter
    #[error("timeframe of {0} years is too long to project")]
    TimeframeTooLong(u32),

    /// No occurrence count for a pair the dispatcher can reach
    #[error("unsupported frequency pair: {finer} within {coarser}")]
    UnsupportedPair { finer: Frequency, coarser: Frequency },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result used throughout the crate
pub type Result<T, E = ProjectionError> = std::result::Result<T, E>;
