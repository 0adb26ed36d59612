//! Error handling for water level processing operations.
//!
//! Provides error types with enough context (source path, line index, raw
//! value) to point at the offending record in the input file.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurgeError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No well-formed data lines remain after filtering ({candidate_lines} candidate lines)")]
    DataEmpty { candidate_lines: usize },

    #[error("Parse error at line {line}, column {column}: '{value}' ({reason})")]
    Parse {
        line: usize,
        column: usize,
        value: String,
        reason: String,
    },

    #[error("Ragged row at line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Series '{label}' has {found} values but the x-axis has {expected}")]
    SeriesLengthMismatch {
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid config file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl SurgeError {
    /// Create an I/O error tied to the path being accessed
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Source line index of the record that caused the error, if any
    pub fn line_index(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } | Self::RaggedRow { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SurgeError>;
