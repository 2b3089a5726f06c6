//! Error type for a report run

use thiserror::Error;

use imsight_io::IoError;
use imsight_plot::PlotError;
use imsight_stats::StatsError;

use crate::config::ConfigError;

/// Anything that ends a run early
#[derive(Debug, Error)]
pub enum ReportError {
    /// The dataset could not be loaded; nothing else ran
    #[error("Could not load dataset: {0}")]
    Load(#[from] IoError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Analysis failed: {0}")]
    Stats(#[from] StatsError),

    #[error("Plotting failed: {0}")]
    Plot(#[from] PlotError),

    #[error("Cannot encode report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// True when the failure happened while loading the dataset
    pub fn is_load_failure(&self) -> bool {
        matches!(self, ReportError::Load(_))
    }
}

/// Result type for report runs
pub type ReportResult<T> = Result<T, ReportError>;
