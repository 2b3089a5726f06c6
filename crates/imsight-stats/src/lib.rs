//! imsight-stats - Descriptive statistics for exploratory analysis
//!
//! This crate provides the column-wise statistics behind an EDA report:
//!
//! - **Quantiles**: linear interpolation between order statistics
//! - **Summary**: count, mean, sample std, five-number summary, skewness, kurtosis
//! - **Outliers**: IQR fences and skew flags
//! - **Correlation**: pairwise-complete Pearson matrix
//! - **Histogram**: equal-width binning for plotting
//!
//! # Conventions
//!
//! Statistics with more than one textbook definition are pinned:
//! sample standard deviation (n - 1), adjusted Fisher-Pearson skewness
//! (G1), and population excess kurtosis (m4 / m2² - 3). Undefined values
//! are NaN, never errors.
//!
//! With the `parallel` feature, table-level passes run per column on rayon.

pub mod correlation;
pub mod error;
pub mod histogram;
pub mod outliers;
pub mod quantile;
pub mod summary;

pub use correlation::*;
pub use error::*;
pub use histogram::*;
pub use outliers::*;
pub use quantile::*;
pub use summary::*;
