pub mod config;
pub mod convert;
pub mod data;
pub mod dump;
pub mod error;
pub mod ident;
pub mod load;
pub mod merge;
pub mod normalize;

use config::{ConvertConfig, MergeConfig};
use error::*;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;


/// Initialize the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level`. Logs go to stderr.
pub fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}


pub fn run(opts: &Opts) -> anyhow::Result<()> {
    match &opts.command {
        Command::Convert(c) => {
            convert::csv_to_vcd(&c.input, &c.output, &c.config())
                .with_context(|| format!("Failed to convert '{}'", c.input.display()))?;
        }

        Command::Normalize { input, output } => {
            normalize::normalize_file(input, output)
                .with_context(|| format!("Failed to normalize '{}'", input.display()))?;
        }

        Command::Merge(m) => {
            let config = m.config()?;
            merge::merge_files(&m.first, &m.second, &m.output, &config)
                .with_context(|| format!(
                    "Failed to merge '{}' and '{}'",
                    m.first.display(),
                    m.second.display()
                ))?;
        }
    }

    Ok(())
}


/// Offline tools for digital signal traces captured as CSV.
#[derive(Parser, Debug)]
#[clap(name = "csvtrace", version)]
pub struct Opts {
    /// Log level, unless overridden by RUST_LOG
    #[clap(short, long, default_value = "warn", global = true)]
    pub log_level: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a CSV trace into a VCD file
    Convert(ConvertOpts),

    /// Shift the time column so the trace starts at zero
    Normalize {
        /// Input CSV with the time in the first column
        input: PathBuf,

        /// Output CSV
        output: PathBuf,
    },

    /// Merge two traces onto one timeline
    Merge(MergeOpts),
}

#[derive(Args, Debug)]
pub struct ConvertOpts {
    /// Length of one VCD tick, e.g. 10ps or "1 us"
    #[clap(short, long, default_value = "1 us")]
    pub timescale: String,

    /// Fail on unknown timescale units and on more than 94 signals
    #[clap(long)]
    pub strict: bool,

    /// Only dump values that changed since the previous row
    #[clap(long)]
    pub only_changes: bool,

    /// Module name the signals are declared in
    #[clap(long, default_value = "top")]
    pub scope: String,

    /// Input CSV, time in seconds in the first column
    pub input: PathBuf,

    /// Output VCD
    pub output: PathBuf,
}

impl ConvertOpts {
    pub fn config(&self) -> ConvertConfig {
        ConvertConfig {
            timescale: self.timescale.clone(),
            strict: self.strict,
            only_changes: self.only_changes,
            scope: self.scope.clone(),
            ..ConvertConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct MergeOpts {
    /// Name of the time column in both inputs
    #[clap(long, default_value = "Time [s]")]
    pub time_column: String,

    /// Comma separated signal columns taken from both inputs
    #[clap(long, default_value = "CSYNC,VSYNC")]
    pub columns: String,

    /// First input, columns get the suffix _A
    pub first: PathBuf,

    /// Second input, columns get the suffix _B
    pub second: PathBuf,

    /// Output CSV
    pub output: PathBuf,
}

impl MergeOpts {
    pub fn config(&self) -> Result<MergeConfig> {
        let columns = self.columns.split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();

        MergeConfig::new(self.time_column.clone(), columns)
    }
}
