//! Error types for imsight-plot

use std::path::PathBuf;
use thiserror::Error;

use imsight_stats::StatsError;

/// Errors raised while rendering or writing figures
#[derive(Error, Debug)]
pub enum PlotError {
    /// Output directory could not be created
    #[error("Cannot create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Figure file could not be written
    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid dimensions
    #[error("Invalid dimensions: {width}x{height} (must be positive and within limits)")]
    InvalidDimensions { width: u32, height: u32 },

    /// Unknown colormap name
    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),

    /// Statistics needed by a figure could not be computed
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),
}

/// Result type alias for plot operations
pub type PlotResult<T> = Result<T, PlotError>;

/// Validate figure dimensions
pub fn validate_dimensions(width: u32, height: u32) -> PlotResult<()> {
    const MAX_DIMENSION: u32 = 16384;
    const MIN_DIMENSION: u32 = 1;

    if width < MIN_DIMENSION
        || height < MIN_DIMENSION
        || width > MAX_DIMENSION
        || height > MAX_DIMENSION
    {
        return Err(PlotError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_error_display() {
        let err = PlotError::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("0x100"));

        let err = PlotError::from(StatsError::ZeroBins);
        assert!(err.to_string().contains("bin"));
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(validate_dimensions(1600, 1200).is_ok());
        assert!(validate_dimensions(0, 100).is_err());
        assert!(validate_dimensions(20000, 1000).is_err());
    }
}
