//! Logging setup
//!
//! Events go to stderr so stdout carries only the report. `RUST_LOG`
//! takes precedence over the verbosity chosen on the command line.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How chatty the run should be
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Warnings and errors only
    Quiet,
    /// Progress at info level
    #[default]
    Normal,
    /// Debug detail
    Verbose,
}

impl Verbosity {
    /// Pick a verbosity from the command-line flags; quiet wins
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Verbosity::Quiet,
            (true, false) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }

    pub fn level(&self) -> Level {
        match self {
            Verbosity::Quiet => Level::WARN,
            Verbosity::Normal => Level::INFO,
            Verbosity::Verbose => Level::DEBUG,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset
    pub fn directive(&self) -> String {
        self.level().as_str().to_lowercase()
    }
}

/// Install the global subscriber
///
/// Calling this again after a subscriber is installed does nothing.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
