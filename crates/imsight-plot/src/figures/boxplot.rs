//! Boxplots, one vertical box per column on a shared value axis

use imsight_stats::{nonzero_span, IqrFences, SortedSample, DEFAULT_FENCE_MULTIPLIER};
use kuva::prelude::{render_to_svg, BoxPlot, Layout, Plot, ScatterPlot};

use crate::colormap::viridis;
use crate::error::PlotResult;
use crate::export::{ExportConfig, PlotView};

/// Headroom above and below the data, as a share of the value span
const AXIS_MARGIN: f64 = 0.05;

const OUTLIER_COLOR: &str = "#B40426";

/// Draw one box per column with outliers marked as points
///
/// Whiskers follow the Tukey rule: they reach the most extreme values
/// within 1.5 IQR of the quartiles. Every value beyond them is drawn as
/// an outlier point. Missing values are skipped; a column without values
/// keeps its slot on the category axis.
pub fn boxplot_chart(columns: &[(String, Vec<f64>)], config: &ExportConfig) -> PlotResult<String> {
    config.validate()?;

    let mut boxes = BoxPlot::new().with_color(viridis().sample(0.6).to_hex());
    let mut outliers: Vec<(f64, f64)> = Vec::new();
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);

    for (i, (name, values)) in columns.iter().enumerate() {
        let sample = SortedSample::from_data(values);
        if let Some(summary) = sample.five_number_summary() {
            lo = lo.min(summary.min);
            hi = hi.max(summary.max);
            let fences =
                IqrFences::from_quartiles(summary.q1, summary.q3, DEFAULT_FENCE_MULTIPLIER);
            outliers.extend(
                sample
                    .values()
                    .iter()
                    .filter(|&&x| fences.is_outside(x))
                    .map(|&x| ((i + 1) as f64, x)),
            );
        }
        boxes = boxes.with_group(name.as_str(), sample.values().to_vec());
    }

    let mut plots: Vec<Plot> = vec![boxes.into()];
    if !outliers.is_empty() {
        plots.push(
            ScatterPlot::new()
                .with_data(outliers)
                .with_color(OUTLIER_COLOR)
                .with_size(3.0)
                .into(),
        );
    }

    let x_range = (0.5, columns.len() as f64 + 0.5);
    let y_range = value_axis(lo, hi);
    let layout = Layout::new(x_range, y_range)
        .with_x_axis_min(x_range.0)
        .with_x_axis_max(x_range.1)
        .with_y_axis_min(y_range.0)
        .with_y_axis_max(y_range.1)
        .with_x_categories(columns.iter().map(|(name, _)| name.clone()).collect())
        .with_x_tick_rotate(-45.0)
        .with_title(PlotView::Boxplots.title())
        .with_width(config.width as f64)
        .with_height(config.height as f64);

    Ok(render_to_svg(plots, layout))
}

/// Value axis covering `[lo, hi]` with a margin; (0, 1) when there is no data
fn value_axis(lo: f64, hi: f64) -> (f64, f64) {
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    let (lo, hi) = nonzero_span(lo, hi);
    let margin = (hi - lo) * AXIS_MARGIN;
    (lo - margin, hi + margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_axis() {
        assert_eq!(value_axis(f64::INFINITY, f64::NEG_INFINITY), (0.0, 1.0));
        let (lo, hi) = value_axis(0.0, 10.0);
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);

        let (lo, hi) = value_axis(1e17, 1e17);
        assert!(lo < 1e17 && hi > 1e17);
    }

    #[test]
    fn test_outliers_drawn_as_points() {
        let columns = vec![
            ("absences".to_string(), vec![1.0, 2.0, 3.0, 4.0, 100.0]),
            ("age".to_string(), vec![15.0, 16.0, 17.0, f64::NAN]),
        ];
        let svg = boxplot_chart(&columns, &ExportConfig::new(800, 600)).unwrap();

        assert!(svg.contains("Boxplots (Outlier Check)"));
        assert!(svg.contains(">absences<"));
        assert!(svg.contains(">age<"));
        assert_eq!(svg.matches("<circle ").count(), 1);
    }

    #[test]
    fn test_empty_column_keeps_its_slot() {
        let columns = vec![
            ("x".to_string(), vec![1.0, 2.0, 3.0]),
            ("gone".to_string(), vec![f64::NAN]),
        ];
        let svg = boxplot_chart(&columns, &ExportConfig::default()).unwrap();
        assert!(svg.contains(">gone<"));
        assert_eq!(svg.matches("<circle ").count(), 0);
    }

    #[test]
    fn test_large_constant_column_has_finite_geometry() {
        let columns = vec![("x".to_string(), vec![1e17; 3])];
        let svg = boxplot_chart(&columns, &ExportConfig::default()).unwrap();

        assert!(svg.contains(">x<"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_invalid_dimensions() {
        let columns = vec![("x".to_string(), vec![1.0])];
        assert!(boxplot_chart(&columns, &ExportConfig::new(0, 0)).is_err());
    }
}
