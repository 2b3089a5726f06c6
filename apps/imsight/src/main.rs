//! imsight command-line entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use imsight::logging::{self, Verbosity};
use imsight::{pipeline, report, ReportConfig, ReportResult};

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(about = "Exploratory data report for delimited text files")]
struct Args {
    /// Dataset to analyze [default: student-mat.csv]
    input: Option<PathBuf>,

    /// Field delimiter, a single character or `\t` [default: ;]
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Directory for the figures [default: plots]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip rendering figures
    #[arg(long)]
    no_plots: bool,

    /// Also write the full report as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Only warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    /// Config file (or defaults) with command-line values on top
    fn resolve_config(&self) -> ReportResult<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::load(path)?,
            None => ReportConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input.path = input.clone();
        }
        if let Some(delimiter) = &self.delimiter {
            config.input.delimiter = delimiter.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.plots.output_dir = dir.clone();
        }
        if self.no_plots {
            config.plots.enabled = false;
        }
        Ok(config)
    }
}

fn run(args: &Args) -> ReportResult<()> {
    let config = args.resolve_config()?;
    let mut analysis = pipeline::prepare(&config)?;

    // The text report goes out before any figure is drawn
    print!(
        "{}",
        report::render(&analysis.table, &analysis.report, config.analysis.head_rows)
    );
    analysis.plot(&config)?;

    if let Some(path) = &args.json {
        analysis.report.write_json(path)?;
        tracing::info!("Wrote JSON report to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_load_failure() => {
            eprintln!("Dataset could not be loaded.");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
