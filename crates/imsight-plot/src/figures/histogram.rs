//! Histogram grid: one panel per numeric column

use imsight_stats::Histogram;
use kuva::prelude::{Figure, Histogram as HistogramPlot, Layout, Plot, SvgBackend};

use super::grid_shape;
use crate::colormap::Color;
use crate::error::PlotResult;
use crate::export::{ExportConfig, PlotView};

/// Draw a grid of histograms, `bins` equal-width bins per column
///
/// Bins come from `imsight_stats::Histogram` so the figure agrees with the
/// binning used elsewhere. A column without values keeps its panel, drawn
/// as a single empty bin.
pub fn histogram_grid(
    columns: &[(String, Vec<f64>)],
    bins: usize,
    config: &ExportConfig,
    fill: Color,
) -> PlotResult<String> {
    config.validate()?;

    let (grid_cols, grid_rows) = grid_shape(columns.len());
    let mut panels: Vec<Vec<Plot>> = Vec::with_capacity(columns.len());
    let mut layouts: Vec<Layout> = Vec::with_capacity(columns.len());

    for (name, values) in columns {
        let (plot, title) = match Histogram::from_data(values, bins)? {
            Some(hist) => {
                let counts = hist.counts.iter().map(|&c| c as f64).collect();
                (HistogramPlot::from_bins(hist.edges, counts), name.clone())
            }
            None => (
                HistogramPlot::from_bins(vec![0.0, 1.0], vec![0.0]),
                format!("{} (no data)", name),
            ),
        };
        let panel: Vec<Plot> = vec![plot.with_color(fill.to_hex()).into()];
        layouts.push(
            Layout::auto_from_plots(&panel)
                .with_title(title)
                .with_y_label("Count"),
        );
        panels.push(panel);
    }

    let scene = Figure::new(grid_rows.max(1), grid_cols.max(1))
        .with_plots(panels)
        .with_layouts(layouts)
        .with_title(PlotView::Histograms.title())
        .with_figure_size(config.width as f64, config.height as f64)
        .render();

    Ok(SvgBackend::new().render_scene(&scene))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_grid_panels() {
        let columns = vec![
            ("age".to_string(), vec![15.0, 16.0, 17.0, 18.0, 18.0]),
            ("absences".to_string(), vec![0.0, 2.0, 4.0, 30.0, f64::NAN]),
            ("empty".to_string(), vec![f64::NAN, f64::NAN]),
        ];
        let svg = histogram_grid(
            &columns,
            20,
            &ExportConfig::new(800, 600),
            Color::rgb(0.2, 0.4, 0.6),
        )
        .unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Histogram of Numeric Columns"));
        assert!(svg.contains(">age<"));
        assert!(svg.contains(">absences<"));
        assert!(svg.contains(">empty (no data)<"));
        assert!(svg.contains("#336699"));
    }

    #[test]
    fn test_histogram_grid_large_constant_column() {
        let columns = vec![("big".to_string(), vec![1e17; 3])];
        let svg = histogram_grid(&columns, 4, &ExportConfig::default(), Color::default()).unwrap();

        assert!(svg.contains(">big<"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_histogram_grid_rejects_zero_bins() {
        let columns = vec![("x".to_string(), vec![1.0])];
        let result = histogram_grid(&columns, 0, &ExportConfig::default(), Color::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_histogram_grid_empty() {
        let svg = histogram_grid(&[], 20, &ExportConfig::default(), Color::default()).unwrap();
        assert!(svg.contains("Histogram of Numeric Columns"));
    }
}
