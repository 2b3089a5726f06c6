//! Configuration for imsight
//!
//! Loaded from TOML. Every field has a default, so a config file only
//! needs the values it changes. Command-line flags are applied on top.

use std::fs;
use std::path::{Path, PathBuf};

use imsight_io::{parse_delimiter, CsvOptions, DEFAULT_MISSING_TOKENS};
use imsight_plot::{get_colormap, ExportConfig, PlotConfig};
use imsight_stats::{
    OutlierConfig, DEFAULT_BINS, DEFAULT_FENCE_MULTIPLIER, DEFAULT_SKEW_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Where and how to read the dataset
    pub input: InputConfig,
    /// Thresholds for the statistical checks
    pub analysis: AnalysisConfig,
    /// Figure output
    pub plots: PlotsConfig,
}

/// Dataset input settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path of the delimited text file
    pub path: PathBuf,
    /// Field delimiter, a single ASCII character (`\t` for tab)
    pub delimiter: String,
    /// Whether the first record names the columns
    pub has_header: bool,
    /// Cell values read as missing
    pub missing_tokens: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("student-mat.csv"),
            delimiter: ";".to_string(),
            has_header: true,
            missing_tokens: DEFAULT_MISSING_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Statistical check settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// IQR multiplier k for the outlier fences
    pub fence_multiplier: f64,
    /// Absolute skewness above which a column is flagged
    pub skew_threshold: f64,
    /// Rows shown in the preview section
    pub head_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fence_multiplier: DEFAULT_FENCE_MULTIPLIER,
            skew_threshold: DEFAULT_SKEW_THRESHOLD,
            head_rows: 5,
        }
    }
}

/// Figure settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotsConfig {
    /// Render figures at all
    pub enabled: bool,
    /// Directory the figures are written into
    pub output_dir: PathBuf,
    /// Bins per histogram
    pub histogram_bins: usize,
    /// Figure width in pixels
    pub width: u32,
    /// Figure height in pixels
    pub height: u32,
    /// Colormap for the correlation heatmap
    pub colormap: String,
}

impl Default for PlotsConfig {
    fn default() -> Self {
        let export = ExportConfig::default();
        Self {
            enabled: true,
            output_dir: PathBuf::from("plots"),
            histogram_bins: DEFAULT_BINS,
            width: export.width,
            height: export.height,
            colormap: "coolwarm".to_string(),
        }
    }
}

impl ReportConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_delimiter(&self.input.delimiter)
            .map_err(|e| ConfigError::OutOfRange(e.to_string()))?;

        let k = self.analysis.fence_multiplier;
        if !k.is_finite() || k < 0.0 {
            return Err(ConfigError::OutOfRange(format!(
                "fence_multiplier must be a finite value >= 0, got {k}"
            )));
        }

        let t = self.analysis.skew_threshold;
        if !t.is_finite() || t < 0.0 {
            return Err(ConfigError::OutOfRange(format!(
                "skew_threshold must be a finite value >= 0, got {t}"
            )));
        }

        if self.plots.histogram_bins == 0 {
            return Err(ConfigError::OutOfRange(
                "histogram_bins must be positive".to_string(),
            ));
        }

        if self.plots.width == 0 || self.plots.height == 0 {
            return Err(ConfigError::OutOfRange(format!(
                "plot size must be positive, got {}x{}",
                self.plots.width, self.plots.height
            )));
        }

        if get_colormap(&self.plots.colormap).is_none() {
            return Err(ConfigError::UnknownColormap(self.plots.colormap.clone()));
        }

        Ok(())
    }

    /// Loader options for the input section
    pub fn csv_options(&self) -> Result<CsvOptions, ConfigError> {
        let delimiter = parse_delimiter(&self.input.delimiter)
            .map_err(|e| ConfigError::OutOfRange(e.to_string()))?;
        Ok(CsvOptions::default()
            .with_delimiter(delimiter)
            .with_header(self.input.has_header)
            .with_missing_tokens(self.input.missing_tokens.iter().cloned()))
    }

    /// Thresholds for the anomaly detector
    pub fn outlier_config(&self) -> OutlierConfig {
        OutlierConfig {
            fence_multiplier: self.analysis.fence_multiplier,
            skew_threshold: self.analysis.skew_threshold,
        }
    }

    /// Settings for the plot renderer
    pub fn plot_config(&self) -> PlotConfig {
        PlotConfig {
            export: ExportConfig::new(self.plots.width, self.plots.height),
            histogram_bins: self.plots.histogram_bins,
            colormap: self.plots.colormap.clone(),
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("Cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Colormap name is not a built-in
    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),
}
