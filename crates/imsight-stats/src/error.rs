//! Error types for imsight-stats

use thiserror::Error;

/// Invalid arguments to a statistical routine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatsError {
    #[error("Fence multiplier must be finite and non-negative, got {0}")]
    InvalidFenceMultiplier(f64),

    #[error("Skew threshold must be finite and non-negative, got {0}")]
    InvalidSkewThreshold(f64),

    #[error("Histogram needs at least one bin")]
    ZeroBins,

    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;
