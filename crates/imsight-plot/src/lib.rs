//! imsight-plot: diagnostic figures for tabular data
//!
//! Draws the numeric columns of a table with the kuva plotting library
//! and exports each figure as SVG:
//!
//! - **Histograms**: one panel per column on a near-square grid
//! - **Boxplots**: one vertical box per column, IQR-fence outliers as points
//! - **Correlation heatmap**: annotated Pearson matrix on a diverging colormap
//!
//! Documents are written into an output directory that is created on
//! demand; files with the same name are overwritten.

pub mod colormap;
pub mod error;
pub mod export;
pub mod figures;
pub mod renderer;

pub use colormap::*;
pub use error::*;
pub use export::*;
pub use renderer::*;
