//! Command-line argument definitions for the surge processor

use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::writer::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Clean NOAA-style storm surge water level files into plot-ready series
#[derive(Debug, Clone, Parser)]
#[command(
    name = "surge",
    version,
    about = "Clean storm surge water level text files into typed time series",
    long_about = "Reads a water level text file (11 header lines followed by \
                  'YYYYMMDDhhmm predicted measured' records), drops structurally \
                  malformed lines, decodes timestamps and values, and optionally \
                  exports the cleaned series to Parquet or CSV."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Clean a water level file and optionally export it
    Process(ProcessArgs),
    /// Report malformed lines without decoding
    Validate(ValidateArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, clap::Args)]
pub struct CommonArgs {
    /// Water level text file
    #[arg(value_name = "INPUT")]
    pub input_path: PathBuf,

    /// TOML configuration file (CLI flags take precedence)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Number of header lines to skip
    #[arg(long = "header-lines", value_name = "N")]
    pub header_lines: Option<usize>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Export the cleaned dataset to this path
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Export format (defaults to the output extension, then parquet)
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// List every malformed line index
    #[arg(long)]
    pub list: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Parquet,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Parquet => OutputFormat::Parquet,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

impl CommonArgs {
    /// Log level derived from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Load configuration layered as defaults, then config file, then flags
    pub fn load_config(&self) -> Result<ProcessorConfig> {
        let mut config = match &self.config_file {
            Some(path) => ProcessorConfig::from_toml_file(path)?,
            None => ProcessorConfig::default(),
        };

        if let Some(header_lines) = self.header_lines {
            config.header_lines = header_lines;
        }

        config.validate()?;
        Ok(config)
    }
}

impl ProcessArgs {
    /// Export format: explicit flag, then output extension, then parquet
    pub fn get_format(&self, output_path: &Path) -> OutputFormat {
        self.format
            .map(OutputFormat::from)
            .or_else(|| OutputFormat::from_path(output_path))
            .unwrap_or(OutputFormat::Parquet)
    }
}
