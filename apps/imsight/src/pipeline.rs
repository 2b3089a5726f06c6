//! The analysis run
//!
//! Load, classify, then compute summaries, outlier checks and
//! correlations over the same immutable table. Figures are drawn as a
//! separate last step so the text report can be printed before any
//! renderer runs. A load failure stops the run before any analysis or
//! plotting.

use std::path::{Path, PathBuf};

use imsight_io::{load_table, NumericColumnSet, Table};
use imsight_plot::{render_views, PlotArtifact, PlotData, PlotView, SvgRenderer};
use imsight_stats::{
    detect_outliers, summarize_table, ColumnSummary, CorrelationMatrix, OutlierReport,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::ReportConfig;
use crate::error::{ReportError, ReportResult};

/// Name, type and non-null count of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
}

/// Missing values in one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
}

/// Everything a run computed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Dataset path as given
    pub source: PathBuf,
    /// (rows, columns)
    pub shape: (usize, usize),
    pub columns: Vec<ColumnInfo>,
    pub missing: Vec<MissingCount>,
    pub numeric_columns: NumericColumnSet,
    pub summaries: Vec<ColumnSummary>,
    pub outliers: Vec<OutlierReport>,
    pub correlation: CorrelationMatrix,
    /// Figures written, empty when plotting is off or nothing is numeric
    pub artifacts: Vec<PlotArtifact>,
}

impl AnalysisReport {
    /// Serialize as pretty-printed JSON; undefined statistics become `null`
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON form to `path`
    pub fn write_json(&self, path: &Path) -> ReportResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// The loaded table together with what was computed from it
#[derive(Debug, Clone)]
pub struct Analysis {
    pub table: Table,
    pub report: AnalysisReport,
}

impl Analysis {
    /// Draw the figures and record them in the report
    ///
    /// Writes nothing when plotting is disabled or no column is numeric.
    pub fn plot(&mut self, config: &ReportConfig) -> ReportResult<&[PlotArtifact]> {
        if !config.plots.enabled {
            debug!("Plotting disabled");
            return Ok(&self.report.artifacts);
        }
        if self.report.numeric_columns.is_empty() {
            warn!("No numeric columns to plot; no figures written");
            return Ok(&self.report.artifacts);
        }

        let data = PlotData {
            columns: self.report.numeric_columns.project(&self.table),
            correlation: self.report.correlation.clone(),
        };
        let renderer = SvgRenderer::new(config.plot_config())?;
        let out_dir = &config.plots.output_dir;
        let artifacts = render_views(&renderer, &data, &PlotView::ALL, out_dir)?;
        for artifact in &artifacts {
            info!("Saved {}", artifact.file_name());
        }
        info!("All plots saved in '{}'", out_dir.display());

        self.report.artifacts = artifacts;
        Ok(&self.report.artifacts)
    }
}

/// Load the configured dataset, logging the outcome
pub fn load(config: &ReportConfig) -> ReportResult<Table> {
    let options = config.csv_options()?;
    let path = config.input.path.to_string_lossy();

    match load_table(&path, options) {
        Ok(table) => {
            info!("Loaded dataset. Shape: {:?}", table.shape());
            Ok(table)
        }
        Err(e) => {
            error!("Could not load dataset: {}", e);
            Err(ReportError::Load(e))
        }
    }
}

/// Validate, load and analyze without drawing figures
pub fn prepare(config: &ReportConfig) -> ReportResult<Analysis> {
    config.validate()?;

    let table = load(config)?;
    let report = analyze(&table, config)?;
    Ok(Analysis { table, report })
}

/// Run the complete analysis, figures included
pub fn run(config: &ReportConfig) -> ReportResult<Analysis> {
    let mut analysis = prepare(config)?;
    analysis.plot(config)?;
    Ok(analysis)
}

/// Analyze an already loaded table; no figures are drawn
pub fn analyze(table: &Table, config: &ReportConfig) -> ReportResult<AnalysisReport> {
    let numeric = NumericColumnSet::classify(table);
    debug!(
        "Numeric columns ({}): {}",
        numeric.len(),
        numeric.names().join(", ")
    );
    if numeric.is_empty() {
        warn!("No numeric columns found; statistics and plots are empty");
    }

    let summaries = summarize_table(table, &numeric)?;
    let outliers = detect_outliers(table, &summaries, &config.outlier_config())?;
    let correlation = CorrelationMatrix::from_table(table, &numeric);

    Ok(AnalysisReport {
        source: config.input.path.clone(),
        shape: table.shape(),
        columns: table
            .iter()
            .map(|(desc, col)| ColumnInfo {
                name: desc.name.clone(),
                dtype: desc.dtype.name().to_string(),
                non_null: col.non_null_count(),
            })
            .collect(),
        missing: table
            .missing_counts()
            .into_iter()
            .map(|(column, missing)| MissingCount { column, missing })
            .collect(),
        numeric_columns: numeric,
        summaries,
        outliers,
        correlation,
        artifacts: Vec::new(),
    })
}
