//! Annotated correlation heatmap

use std::sync::Arc;

use imsight_stats::CorrelationMatrix;
use kuva::prelude::{render_to_svg, ColorMap, Heatmap, Layout, Plot};

use crate::colormap::{Color, Colormap};
use crate::error::PlotResult;
use crate::export::{ExportConfig, PlotView};

/// Fill used for undefined coefficients
const NAN_COLOR: Color = Color {
    r: 0.92,
    g: 0.92,
    b: 0.92,
};

/// Draw the correlation matrix as a grid of colored, annotated cells
///
/// Coefficients map onto `colormap` over the fixed range [-1, 1], so the
/// same coefficient gets the same color in every report. Undefined
/// coefficients are drawn grey. The first column sits in the top row.
pub fn correlation_heatmap(
    matrix: &CorrelationMatrix,
    colormap: &Colormap,
    config: &ExportConfig,
) -> PlotResult<String> {
    config.validate()?;

    let k = matrix.size();
    let mut plots: Vec<Plot> = Vec::new();
    if k > 0 {
        let rows: Vec<Vec<f64>> = matrix.rows().rev().map(|r| r.to_vec()).collect();
        plots.push(
            Heatmap::new()
                .with_data(rows.clone())
                .with_color_map(fixed_scale(colormap, &rows))
                .with_values()
                .into(),
        );
    }

    let extent = (0.5, k.max(1) as f64 + 0.5);
    let mut layout = Layout::new(extent, extent)
        .with_title(PlotView::CorrelationHeatmap.title())
        .with_width(config.width as f64)
        .with_height(config.height as f64);
    if k > 0 {
        let names = matrix.columns().to_vec();
        layout = layout
            .with_y_categories(names.iter().rev().cloned().collect())
            .with_x_categories(names)
            .with_x_tick_rotate(-45.0);
    }

    Ok(render_to_svg(plots, layout))
}

/// Color cells by their coefficient on [-1, 1]
///
/// The heatmap hands the color map values normalized over the data range;
/// this undoes that normalization before looking the coefficient up.
fn fixed_scale(colormap: &Colormap, rows: &[Vec<f64>]) -> ColorMap {
    let (min, max) = rows
        .iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let colormap = colormap.clone();

    ColorMap::Custom(Arc::new(move |t: f64| {
        let value = min + t * (max - min + f64::EPSILON);
        if value.is_nan() {
            NAN_COLOR.to_hex()
        } else {
            colormap.map_value(value, -1.0, 1.0).to_hex()
        }
    }))
}
