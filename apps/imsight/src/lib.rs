//! imsight: exploratory report for a delimited dataset
//!
//! Loads a table, finds its numeric columns and reports descriptive
//! statistics, IQR outliers, skewness and correlations, with SVG figures
//! written alongside.
//!
//! ```no_run
//! use imsight::{pipeline, report, ReportConfig};
//!
//! let config = ReportConfig::default();
//! let analysis = pipeline::run(&config)?;
//! print!("{}", report::render(&analysis.table, &analysis.report, 5));
//! # Ok::<(), imsight::ReportError>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;

pub use config::{ConfigError, ReportConfig};
pub use error::{ReportError, ReportResult};
pub use pipeline::{Analysis, AnalysisReport};
