//! Pearson correlation matrix
//!
//! Each pair uses only the rows where both values are finite. A pair is
//! NaN when fewer than two such rows exist or either side is constant
//! over them.

use imsight_io::{NumericColumnSet, Table};
use serde::{Deserialize, Serialize};

/// Square, symmetric correlation matrix stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Compute pairwise Pearson correlations of named columns
    pub fn pearson(columns: &[(String, Vec<f64>)]) -> Self {
        let k = columns.len();
        let mut values = vec![f64::NAN; k * k];

        for i in 0..k {
            for j in i..k {
                let r = pearson_pairwise(&columns[i].1, &columns[j].1);
                values[i * k + j] = r;
                values[j * k + i] = r;
            }
        }

        Self {
            columns: columns.iter().map(|(name, _)| name.clone()).collect(),
            values,
        }
    }

    /// Correlation matrix of a table's numeric columns
    pub fn from_table(table: &Table, numeric: &NumericColumnSet) -> Self {
        Self::pearson(&numeric.project(table))
    }

    /// Column labels, in matrix order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Matrix dimension
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    /// Coefficient at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let k = self.size();
        if row >= k || col >= k {
            return None;
        }
        Some(self.values[row * k + col])
    }

    /// Coefficient between two named columns
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.get(i, j)
    }

    /// Rows of the matrix
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[f64]> {
        self.values.chunks(self.size().max(1))
    }
}

/// Pearson correlation over rows where both values are finite
pub fn pearson_pairwise(x: &[f64], y: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }

    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}
