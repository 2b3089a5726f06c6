//! Equal-width histogram binning
//!
//! Bins span `[min, max]` of the finite values. Every bin is half-open
//! except the last, which also includes `max`. A constant sample is
//! widened with `nonzero_span` first.

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Default number of bins
pub const DEFAULT_BINS: usize = 20;

/// Bin edges and counts for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `bins + 1` ascending edges
    pub edges: Vec<f64>,
    /// Count per bin
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin the finite values of `data` into `bins` equal-width bins
    ///
    /// An all-missing sample yields `None`.
    pub fn from_data(data: &[f64], bins: usize) -> StatsResult<Option<Self>> {
        if bins == 0 {
            return Err(StatsError::ZeroBins);
        }

        let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        if finite.is_empty() {
            return Ok(None);
        }

        let (lo, hi) = nonzero_span(
            finite.iter().copied().fold(f64::INFINITY, f64::min),
            finite.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        );

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for x in finite {
            let idx = (((x - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Ok(Some(Self { edges, counts }))
    }

    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    /// Largest bin count
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Total number of binned values
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// (lower edge, upper edge, count) for each bin
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }
}

/// Widen a single-value range `[v, v]` so it has positive width
///
/// The pad is at least 0.5 and grows with `|v|`, so the bounds still
/// differ once rounded at large magnitudes. Ranges that already have
/// width are returned unchanged.
pub fn nonzero_span(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        return (lo, hi);
    }
    let pad = (lo.abs() * 1e-9).max(0.5);
    (lo - pad, hi + pad)
}
