//! IQR fencing and skew flagging
//!
//! A value is a potential outlier when it lies strictly outside
//! `[Q1 - k * IQR, Q3 + k * IQR]`. With IQR = 0 the fences collapse onto
//! the quartile value and every differing value is flagged.

use imsight_io::Table;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{StatsError, StatsResult};
use crate::summary::ColumnSummary;

/// Default fence multiplier (Tukey's rule)
pub const DEFAULT_FENCE_MULTIPLIER: f64 = 1.5;

/// Default |skewness| above which a column is flagged
pub const DEFAULT_SKEW_THRESHOLD: f64 = 1.0;

/// Outlier detection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierConfig {
    /// IQR multiplier for the fences
    pub fence_multiplier: f64,
    /// Skew flag threshold on |skewness|
    pub skew_threshold: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            fence_multiplier: DEFAULT_FENCE_MULTIPLIER,
            skew_threshold: DEFAULT_SKEW_THRESHOLD,
        }
    }
}

impl OutlierConfig {
    /// Validate parameter ranges
    pub fn validate(&self) -> StatsResult<()> {
        if !self.fence_multiplier.is_finite() || self.fence_multiplier < 0.0 {
            return Err(StatsError::InvalidFenceMultiplier(self.fence_multiplier));
        }
        if !self.skew_threshold.is_finite() || self.skew_threshold < 0.0 {
            return Err(StatsError::InvalidSkewThreshold(self.skew_threshold));
        }
        Ok(())
    }
}

/// Lower and upper IQR fences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrFences {
    pub lower: f64,
    pub upper: f64,
}

impl IqrFences {
    /// Fences from quartiles and a multiplier
    pub fn from_quartiles(q1: f64, q3: f64, multiplier: f64) -> Self {
        let iqr = q3 - q1;
        Self {
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        }
    }

    /// Strictly outside the fences. NaN fences contain nothing.
    pub fn is_outside(&self, x: f64) -> bool {
        x < self.lower || x > self.upper
    }

    /// Count values strictly outside the fences; NaN values are skipped
    pub fn count_outside(&self, data: &[f64]) -> usize {
        data.iter().filter(|&&x| self.is_outside(x)).count()
    }
}

/// Outlier findings for one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// Column name
    pub column: String,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Values strictly outside the fences
    pub outlier_count: usize,
    /// Skewness the flag was derived from
    pub skewness: f64,
    /// |skewness| above the threshold; false when skewness is undefined
    pub high_skew: bool,
}

impl OutlierReport {
    /// Build a report for `data` using its precomputed summary
    pub fn from_summary(summary: &ColumnSummary, data: &[f64], config: &OutlierConfig) -> Self {
        let fences = IqrFences::from_quartiles(summary.q1, summary.q3, config.fence_multiplier);
        let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();

        Self {
            column: summary.column.clone(),
            q1: summary.q1,
            q3: summary.q3,
            iqr: summary.iqr(),
            lower_fence: fences.lower,
            upper_fence: fences.upper,
            outlier_count: fences.count_outside(&finite),
            skewness: summary.skewness,
            high_skew: summary.skewness.abs() > config.skew_threshold,
        }
    }

    /// Build a report directly from data
    pub fn from_data(column: impl Into<String>, data: &[f64], config: &OutlierConfig) -> Self {
        let summary = ColumnSummary::from_data(column, data);
        Self::from_summary(&summary, data, config)
    }

    pub fn fences(&self) -> IqrFences {
        IqrFences {
            lower: self.lower_fence,
            upper: self.upper_fence,
        }
    }

    pub fn has_outliers(&self) -> bool {
        self.outlier_count > 0
    }
}

/// Detect outliers for each summarized column, in summary order
///
/// Quartiles and the skew flag come from `summaries`; the table is only
/// read to count values outside the fences.
pub fn detect_outliers(
    table: &Table,
    summaries: &[ColumnSummary],
    config: &OutlierConfig,
) -> StatsResult<Vec<OutlierReport>> {
    config.validate()?;

    let detect = |summary: &ColumnSummary| -> StatsResult<OutlierReport> {
        let values = table
            .column(&summary.column)
            .and_then(|c| c.to_f64())
            .ok_or_else(|| StatsError::ColumnNotFound(summary.column.clone()))?;
        Ok(OutlierReport::from_summary(summary, &values, config))
    };

    #[cfg(feature = "parallel")]
    let reports = summaries.par_iter().map(detect).collect();

    #[cfg(not(feature = "parallel"))]
    let reports = summaries.iter().map(detect).collect();

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::summarize_table;
    use imsight_io::{DataColumn, NumericColumnSet};

    #[test]
    fn test_symmetric_no_outliers() {
        let report =
            OutlierReport::from_data("x", &[1.0, 2.0, 3.0, 4.0, 5.0], &OutlierConfig::default());

        assert_eq!(report.q1, 2.0);
        assert_eq!(report.q3, 4.0);
        assert_eq!(report.iqr, 2.0);
        assert_eq!(report.lower_fence, -1.0);
        assert_eq!(report.upper_fence, 7.0);
        assert_eq!(report.outlier_count, 0);
        assert!(!report.high_skew);
    }

    #[test]
    fn test_zero_iqr_collapses_fences() {
        let report = OutlierReport::from_data(
            "x",
            &[1.0, 1.0, 1.0, 1.0, 100.0],
            &OutlierConfig::default(),
        );

        assert_eq!(report.iqr, 0.0);
        assert_eq!(report.fences(), IqrFences { lower: 1.0, upper: 1.0 });
        assert_eq!(report.outlier_count, 1);
        assert!(report.has_outliers());
        assert!(report.high_skew);
    }

    #[test]
    fn test_fence_boundary_is_not_outlier() {
        let fences = IqrFences::from_quartiles(2.0, 4.0, 1.5);
        assert!(!fences.is_outside(-1.0));
        assert!(!fences.is_outside(7.0));
        assert!(fences.is_outside(7.0001));
        assert!(!fences.is_outside(f64::NAN));
    }

    #[test]
    fn test_all_missing_column() {
        let report = OutlierReport::from_data("x", &[f64::NAN; 3], &OutlierConfig::default());

        assert!(report.lower_fence.is_nan());
        assert!(report.upper_fence.is_nan());
        assert_eq!(report.outlier_count, 0);
        assert!(!report.high_skew);
    }

    #[test]
    fn test_custom_thresholds() {
        // Q1 = 2.25, Q3 = 4.75
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 8.0];
        let loose = OutlierReport::from_data("x", &data, &OutlierConfig::default());
        let tight = OutlierReport::from_data(
            "x",
            &data,
            &OutlierConfig {
                fence_multiplier: 0.5,
                skew_threshold: 0.5,
            },
        );

        assert_eq!(loose.outlier_count, 0);
        assert_eq!(tight.outlier_count, 1);
        assert!(!loose.high_skew);
        assert!(tight.high_skew);
    }

    #[test]
    fn test_config_validation() {
        assert!(OutlierConfig::default().validate().is_ok());
        let bad = OutlierConfig {
            fence_multiplier: -1.0,
            ..Default::default()
        };
        assert_eq!(bad.validate(), Err(StatsError::InvalidFenceMultiplier(-1.0)));
        let bad = OutlierConfig {
            skew_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(StatsError::InvalidSkewThreshold(_))));
    }

    #[test]
    fn test_detect_outliers_table() {
        let table = Table::new(vec![
            (
                "absences".to_string(),
                DataColumn::Int64(vec![Some(1), Some(1), Some(1), Some(1), Some(100)]),
            ),
            (
                "school".to_string(),
                DataColumn::String(vec![None, None, None, None, None]),
            ),
        ])
        .unwrap();
        let numeric = NumericColumnSet::classify(&table);
        let summaries = summarize_table(&table, &numeric).unwrap();

        let reports = detect_outliers(&table, &summaries, &OutlierConfig::default()).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].column, "absences");
        assert_eq!(reports[0].outlier_count, 1);
        assert_eq!(reports[0].skewness, summaries[0].skewness);
        assert_eq!((reports[0].q1, reports[0].q3), (summaries[0].q1, summaries[0].q3));
    }

    #[test]
    fn test_detect_outliers_uses_given_summaries() {
        let table = Table::new(vec![(
            "x".to_string(),
            DataColumn::Float64(vec![Some(1.0), Some(2.0), Some(3.0)]),
        )])
        .unwrap();
        let mut summary = ColumnSummary::from_data("x", &[1.0, 2.0, 3.0]);
        summary.skewness = 5.0;

        let reports = detect_outliers(&table, &[summary], &OutlierConfig::default()).unwrap();
        assert!(reports[0].high_skew);
    }

    #[test]
    fn test_detect_outliers_unknown_column() {
        let table = Table::new(Vec::new()).unwrap();
        let summary = ColumnSummary::from_data("ghost", &[1.0]);
        let err = detect_outliers(&table, &[summary], &OutlierConfig::default()).unwrap_err();
        assert_eq!(err, StatsError::ColumnNotFound("ghost".to_string()));
    }
}
