//! Sample quantiles
//!
//! Quantiles use linear interpolation between order statistics: for a
//! sorted sample of n values and probability p, the position is
//! `h = (n - 1) * p` and the quantile is
//! `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.
//! This is the common "type 7" definition, so the median of an even-sized
//! sample is the mean of the two middle values.

use serde::{Deserialize, Serialize};

/// Sorted finite sample supporting quantile queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortedSample {
    values: Vec<f64>,
}

impl SortedSample {
    /// Build from data, dropping NaN and infinite values
    ///
    /// Time complexity: O(n log n) for sorting
    pub fn from_data(data: &[f64]) -> Self {
        let mut values: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        values.sort_by(f64::total_cmp);
        Self { values }
    }

    /// Quantile at probability `p` in [0, 1]
    ///
    /// Returns `None` for an empty sample or `p` outside [0, 1].
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if self.values.is_empty() || !(0.0..=1.0).contains(&p) {
            return None;
        }

        let h = (self.values.len() - 1) as f64 * p;
        let lo = h.floor() as usize;
        let hi = h.ceil() as usize;
        let frac = h - lo as f64;

        let low = self.values[lo];
        let high = self.values[hi];
        // Clamp so rounding never steps past the bracketing order statistics
        Some((low + frac * (high - low)).clamp(low, high))
    }

    /// Get common quantiles (min, 25%, median, 75%, max)
    pub fn five_number_summary(&self) -> Option<FiveNumberSummary> {
        Some(FiveNumberSummary {
            min: *self.values.first()?,
            q1: self.quantile(0.25)?,
            median: self.quantile(0.5)?,
            q3: self.quantile(0.75)?,
            max: *self.values.last()?,
        })
    }

    /// Get the median
    pub fn median(&self) -> Option<f64> {
        self.quantile(0.5)
    }

    /// Get the interquartile range (IQR)
    pub fn iqr(&self) -> Option<f64> {
        Some(self.quantile(0.75)? - self.quantile(0.25)?)
    }

    /// Get the number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the sample is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the sorted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Five number summary statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// All-NaN summary for an empty sample
    pub fn nan() -> Self {
        Self {
            min: f64::NAN,
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
            max: f64::NAN,
        }
    }

    /// Get the interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Get the range
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}
