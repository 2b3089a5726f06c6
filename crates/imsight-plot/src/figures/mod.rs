//! Figure layouts
//!
//! Each figure turns numeric columns (or statistics derived from them)
//! into kuva plots and returns the rendered SVG markup. Sizes are pixels.

pub mod boxplot;
pub mod heatmap;
pub mod histogram;

pub use boxplot::boxplot_chart;
pub use heatmap::correlation_heatmap;
pub use histogram::histogram_grid;

/// Near-square grid holding `n` panels: (columns, rows)
pub fn grid_shape(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let cols = (n as f64).sqrt().ceil() as usize;
    let rows = n.div_ceil(cols);
    (cols, rows)
}
