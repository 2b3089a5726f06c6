//! Summary statistics for numeric columns
//!
//! Provides the per-column descriptive summary:
//! - Count and missing count
//! - Mean and sample standard deviation (n - 1 denominator)
//! - Five-number summary (min, quartiles, max)
//! - Skewness (adjusted Fisher-Pearson G1) and excess kurtosis
//!
//! Undefined statistics are reported as NaN rather than errors.

use imsight_io::{NumericColumnSet, Table};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{StatsError, StatsResult};
use crate::quantile::{FiveNumberSummary, SortedSample};

/// Summary statistics for one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name
    pub column: String,
    /// Number of present values
    pub count: usize,
    /// Number of missing values
    pub missing: usize,
    /// Mean (average)
    pub mean: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// 25th percentile
    pub q1: f64,
    /// Median (50th percentile)
    pub median: f64,
    /// 75th percentile
    pub q3: f64,
    /// Maximum value
    pub max: f64,
    /// Adjusted Fisher-Pearson skewness
    pub skewness: f64,
    /// Excess kurtosis
    pub kurtosis: f64,
}

impl ColumnSummary {
    /// Compute summary statistics from data; NaN and infinite values count as missing
    pub fn from_data(column: impl Into<String>, data: &[f64]) -> Self {
        let sample = SortedSample::from_data(data);
        let missing = data.len() - sample.len();

        let Some(five) = sample.five_number_summary() else {
            return Self::empty(column, missing);
        };

        let moments = Moments::from_sorted(sample.values(), five.min == five.max);

        Self {
            column: column.into(),
            count: sample.len(),
            missing,
            mean: moments.mean,
            std_dev: moments.sample_std_dev(),
            min: five.min,
            q1: five.q1,
            median: five.median,
            q3: five.q3,
            max: five.max,
            skewness: moments.skewness(),
            kurtosis: moments.excess_kurtosis(),
        }
    }

    /// Create empty statistics (all NaN)
    fn empty(column: impl Into<String>, missing: usize) -> Self {
        Self {
            column: column.into(),
            count: 0,
            missing,
            mean: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
            max: f64::NAN,
            skewness: f64::NAN,
            kurtosis: f64::NAN,
        }
    }

    /// Min, quartiles and max as a five-number summary
    pub fn five_number_summary(&self) -> FiveNumberSummary {
        FiveNumberSummary {
            min: self.min,
            q1: self.q1,
            median: self.median,
            q3: self.q3,
            max: self.max,
        }
    }

    /// Get the interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Central moments of a sample
#[derive(Debug, Clone, Copy)]
struct Moments {
    n: usize,
    mean: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl Moments {
    /// `constant` short-circuits to exact zero spread so rounding in the
    /// mean cannot produce a tiny non-zero variance.
    fn from_sorted(values: &[f64], constant: bool) -> Self {
        let n = values.len();
        if constant {
            return Self {
                n,
                mean: values[0],
                m2: 0.0,
                m3: 0.0,
                m4: 0.0,
            };
        }

        let nf = n as f64;
        let mean = values.iter().sum::<f64>() / nf;

        let (mut s2, mut s3, mut s4) = (0.0, 0.0, 0.0);
        for &x in values {
            let d = x - mean;
            let d2 = d * d;
            s2 += d2;
            s3 += d2 * d;
            s4 += d2 * d2;
        }

        Self {
            n,
            mean,
            m2: s2 / nf,
            m3: s3 / nf,
            m4: s4 / nf,
        }
    }

    fn sample_std_dev(&self) -> f64 {
        if self.n < 2 {
            return f64::NAN;
        }
        let nf = self.n as f64;
        (self.m2 * nf / (nf - 1.0)).sqrt()
    }

    fn higher_moments_defined(&self) -> bool {
        self.n >= 3 && self.m2 > 0.0
    }

    /// G1 = sqrt(n(n-1)) / (n-2) * m3 / m2^1.5
    fn skewness(&self) -> f64 {
        if !self.higher_moments_defined() {
            return f64::NAN;
        }
        let nf = self.n as f64;
        let g1 = self.m3 / self.m2.powf(1.5);
        (nf * (nf - 1.0)).sqrt() / (nf - 2.0) * g1
    }

    /// g2 = m4 / m2^2 - 3
    fn excess_kurtosis(&self) -> f64 {
        if !self.higher_moments_defined() {
            return f64::NAN;
        }
        self.m4 / (self.m2 * self.m2) - 3.0
    }
}

/// Summarize every column of the numeric set, in set order
pub fn summarize_table(
    table: &Table,
    numeric: &NumericColumnSet,
) -> StatsResult<Vec<ColumnSummary>> {
    let summarize = |name: &String| -> StatsResult<ColumnSummary> {
        let values = table
            .column(name)
            .and_then(|c| c.to_f64())
            .ok_or_else(|| StatsError::ColumnNotFound(name.clone()))?;
        Ok(ColumnSummary::from_data(name.as_str(), &values))
    };

    #[cfg(feature = "parallel")]
    let summaries = numeric.names().par_iter().map(summarize).collect();

    #[cfg(not(feature = "parallel"))]
    let summaries = numeric.names().iter().map(summarize).collect();

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use imsight_io::DataColumn;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_summary_basic() {
        let stats = ColumnSummary::from_data("x", &[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(stats.count, 5);
        assert_eq!(stats.missing, 0);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.median, 3.0);
        assert!(approx(stats.std_dev, 1.5811, 1e-4));
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.q3, 4.0);
        assert!(approx(stats.skewness, 0.0, 1e-12));
        // Uniform-like spacing: g2 = 6.8 / 4 - 3
        assert!(approx(stats.kurtosis, -1.3, 1e-12));
    }

    #[test]
    fn test_summary_with_nan() {
        let stats = ColumnSummary::from_data("x", &[1.0, 2.0, f64::NAN, 4.0, 5.0]);

        assert_eq!(stats.count, 4);
        assert_eq!(stats.missing, 1);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_skewness_right_tail() {
        let stats = ColumnSummary::from_data("x", &[1.0, 2.0, 3.0, 10.0]);
        // mean 4, deviations -3 -2 -1 6: m2 = 12.5, m3 = 45
        let expected = 12.0f64.sqrt() / 2.0 * 45.0 / 12.5f64.powf(1.5);
        assert!(approx(stats.skewness, expected, 1e-12));
        assert!(stats.skewness > 1.0);
        // m4 = (81 + 16 + 1 + 1296) / 4 = 348.5
        assert!(approx(stats.kurtosis, 348.5 / 156.25 - 3.0, 1e-12));
    }

    #[test]
    fn test_constant_column() {
        let stats = ColumnSummary::from_data("x", &[0.1, 0.1, 0.1]);

        assert_eq!(stats.mean, 0.1);
        assert_eq!(stats.median, 0.1);
        assert_eq!(stats.std_dev, 0.0);
        assert!(stats.skewness.is_nan());
        assert!(stats.kurtosis.is_nan());
    }

    #[test]
    fn test_small_samples() {
        let one = ColumnSummary::from_data("x", &[7.0]);
        assert_eq!(one.mean, 7.0);
        assert!(one.std_dev.is_nan());
        assert!(one.skewness.is_nan());

        let two = ColumnSummary::from_data("x", &[1.0, 3.0]);
        assert!(approx(two.std_dev, 2f64.sqrt(), 1e-12));
        assert!(two.skewness.is_nan());
        assert!(two.kurtosis.is_nan());
    }

    #[test]
    fn test_all_missing() {
        let stats = ColumnSummary::from_data("empty", &[f64::NAN, f64::NAN]);

        assert_eq!(stats.count, 0);
        assert_eq!(stats.missing, 2);
        assert!(stats.mean.is_nan());
        assert!(stats.median.is_nan());
        assert!(stats.std_dev.is_nan());
        assert!(stats.skewness.is_nan());
        assert!(stats.kurtosis.is_nan());
    }

    #[test]
    fn test_summarize_table_order() {
        let table = Table::new(vec![
            ("b".to_string(), DataColumn::Int64(vec![Some(1), Some(2)])),
            ("name".to_string(), DataColumn::String(vec![None, None])),
            ("a".to_string(), DataColumn::Float64(vec![None, None])),
        ])
        .unwrap();
        let numeric = NumericColumnSet::classify(&table);

        let summaries = summarize_table(&table, &numeric).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].column, "b");
        assert_eq!(summaries[0].mean, 1.5);
        assert_eq!(summaries[1].column, "a");
        assert_eq!(summaries[1].count, 0);
    }
}
