//! Plot renderer
//!
//! A `PlotRenderer` turns the numeric projection of a table into the SVG
//! markup of one `PlotView`. `render_views` drives a renderer and writes
//! every requested view into the output directory.

use std::path::Path;

use imsight_io::{NumericColumnSet, Table};
use imsight_stats::{CorrelationMatrix, DEFAULT_BINS};
use serde::{Deserialize, Serialize};

use crate::colormap::{get_colormap, viridis, Colormap};
use crate::error::{PlotError, PlotResult};
use crate::export::{write_document, ExportConfig, PlotArtifact, PlotView};
use crate::figures::{boxplot_chart, correlation_heatmap, histogram_grid};

/// Numeric data a renderer draws from
#[derive(Debug, Clone)]
pub struct PlotData {
    /// Named numeric columns, missing values as NaN
    pub columns: Vec<(String, Vec<f64>)>,
    /// Pairwise correlations of `columns`
    pub correlation: CorrelationMatrix,
}

impl PlotData {
    pub fn new(columns: Vec<(String, Vec<f64>)>) -> Self {
        let correlation = CorrelationMatrix::pearson(&columns);
        Self {
            columns,
            correlation,
        }
    }

    /// Project the numeric columns of a table
    pub fn from_table(table: &Table, numeric: &NumericColumnSet) -> Self {
        Self::new(numeric.project(table))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Settings shared by every figure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Figure size
    pub export: ExportConfig,
    /// Bins per histogram
    pub histogram_bins: usize,
    /// Colormap for the correlation heatmap
    pub colormap: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            histogram_bins: DEFAULT_BINS,
            colormap: "coolwarm".to_string(),
        }
    }
}

impl PlotConfig {
    /// Check the settings before anything is drawn
    pub fn validate(&self) -> PlotResult<()> {
        self.export.validate()?;
        self.heatmap_colormap()?;
        Ok(())
    }

    /// Resolve the configured heatmap colormap
    pub fn heatmap_colormap(&self) -> PlotResult<Colormap> {
        get_colormap(&self.colormap)
            .ok_or_else(|| PlotError::UnknownColormap(self.colormap.clone()))
    }
}

/// Draws diagnostic views
pub trait PlotRenderer {
    /// Draw one view of `data` as SVG markup
    fn draw(&self, view: PlotView, data: &PlotData) -> PlotResult<String>;
}

/// Renderer drawing figures with kuva
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    config: PlotConfig,
}

impl SvgRenderer {
    /// Create a renderer, rejecting invalid settings
    pub fn new(config: PlotConfig) -> PlotResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }
}

impl PlotRenderer for SvgRenderer {
    fn draw(&self, view: PlotView, data: &PlotData) -> PlotResult<String> {
        let export = &self.config.export;
        match view {
            PlotView::Histograms => histogram_grid(
                &data.columns,
                self.config.histogram_bins,
                export,
                viridis().sample(0.35),
            ),
            PlotView::Boxplots => boxplot_chart(&data.columns, export),
            PlotView::CorrelationHeatmap => {
                let cmap = self.config.heatmap_colormap()?;
                correlation_heatmap(&data.correlation, &cmap, export)
            }
        }
    }
}

/// Draw and write each view in order
///
/// Nothing is drawn or written when `data` has no columns. The first
/// failure stops the run.
pub fn render_views<R: PlotRenderer + ?Sized>(
    renderer: &R,
    data: &PlotData,
    views: &[PlotView],
    out_dir: &Path,
) -> PlotResult<Vec<PlotArtifact>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut artifacts = Vec::with_capacity(views.len());
    for &view in views {
        let svg = renderer.draw(view, data)?;
        artifacts.push(write_document(out_dir, view, &svg)?);
    }
    Ok(artifacts)
}
