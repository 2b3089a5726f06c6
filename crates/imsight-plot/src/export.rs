//! Figure export
//!
//! Figures are written as SVG files into an output directory that is
//! created on demand. Existing files with the same name are overwritten.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{validate_dimensions, PlotError, PlotResult};

/// The diagnostic views the renderer knows how to draw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotView {
    /// Grid of per-column histograms
    Histograms,
    /// Boxplots, one box per column
    Boxplots,
    /// Annotated Pearson correlation matrix
    CorrelationHeatmap,
}

impl PlotView {
    /// Every view, in rendering order
    pub const ALL: [PlotView; 3] = [
        PlotView::Histograms,
        PlotView::Boxplots,
        PlotView::CorrelationHeatmap,
    ];

    /// Base file name without extension
    pub fn stem(&self) -> &'static str {
        match self {
            PlotView::Histograms => "histograms",
            PlotView::Boxplots => "boxplots",
            PlotView::CorrelationHeatmap => "correlation_heatmap",
        }
    }

    /// Default figure title
    pub fn title(&self) -> &'static str {
        match self {
            PlotView::Histograms => "Histogram of Numeric Columns",
            PlotView::Boxplots => "Boxplots (Outlier Check)",
            PlotView::CorrelationHeatmap => "Correlation Heatmap",
        }
    }

    /// File name including extension
    pub fn file_name(&self) -> String {
        format!("{}.svg", self.stem())
    }
}

/// Figure size in pixels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1200,
        }
    }
}

impl ExportConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check the configured dimensions
    pub fn validate(&self) -> PlotResult<()> {
        validate_dimensions(self.width, self.height)
    }
}

/// A figure written to disk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotArtifact {
    pub view: PlotView,
    pub path: PathBuf,
}

impl PlotArtifact {
    /// File name of the artifact
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Create the output directory if it does not exist yet
pub fn ensure_output_dir(dir: &Path) -> PlotResult<()> {
    fs::create_dir_all(dir).map_err(|source| PlotError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write the SVG markup drawn for `view` into `dir`
pub fn write_document(dir: &Path, view: PlotView, svg: &str) -> PlotResult<PlotArtifact> {
    ensure_output_dir(dir)?;
    let path = dir.join(view.file_name());
    fs::write(&path, svg).map_err(|source| PlotError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(PlotArtifact { view, path })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_file_names() {
        assert_eq!(PlotView::Histograms.file_name(), "histograms.svg");
        assert_eq!(PlotView::Boxplots.file_name(), "boxplots.svg");
        assert_eq!(
            PlotView::CorrelationHeatmap.file_name(),
            "correlation_heatmap.svg"
        );
    }

    #[test]
    fn test_export_config_validation() {
        assert!(ExportConfig::default().validate().is_ok());
        assert!(ExportConfig::new(0, 10).validate().is_err());
    }

    #[test]
    fn test_write_document_creates_dir_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("plots");

        let first = write_document(&dir, PlotView::Boxplots, "<svg>first</svg>").unwrap();
        assert_eq!(first.file_name(), "boxplots.svg");
        assert!(first.path.exists());

        let second = write_document(&dir, PlotView::Boxplots, "<svg>second</svg>").unwrap();
        assert_eq!(first.path, second.path);
        let contents = fs::read_to_string(&second.path).unwrap();
        assert_eq!(contents, "<svg>second</svg>");
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("plots");
        ensure_output_dir(&dir).unwrap();
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let err = ensure_output_dir(tmp.path()).unwrap_err();
        assert!(matches!(err, PlotError::CreateDir { .. }));
    }
}
