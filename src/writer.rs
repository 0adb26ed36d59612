//! Dataset export for the command-line tool.
//!
//! Persistence is optional: the library hands back an in-memory dataset and
//! the binary uses this writer when an output path is given.

use crate::error::{Result, SurgeError};
use crate::models::TimeSeriesDataset;
use polars::prelude::{CsvWriter, ParquetCompression, ParquetWriter, SerWriter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Snappy-compressed Parquet
    Parquet,
    /// Comma separated text with a header row
    Csv,
}

impl OutputFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("parquet") | Some("pq") => Some(Self::Parquet),
            Some("csv") => Some(Self::Csv),
            _ => None,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = SurgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "parquet" => Ok(Self::Parquet),
            "csv" => Ok(Self::Csv),
            other => Err(SurgeError::configuration(format!(
                "Unknown output format '{}' (expected parquet or csv)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DatasetWriter {
    format: OutputFormat,
}

impl DatasetWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write `dataset` to `output_path`, returning the number of rows written
    pub fn write(&self, dataset: &TimeSeriesDataset, output_path: &Path) -> Result<usize> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SurgeError::io(parent, e))?;
        }

        let mut df = dataset.to_dataframe()?;
        let mut file = File::create(output_path).map_err(|e| SurgeError::io(output_path, e))?;

        match self.format {
            OutputFormat::Parquet => {
                ParquetWriter::new(file)
                    .with_compression(ParquetCompression::Snappy)
                    .finish(&mut df)?;
            }
            OutputFormat::Csv => {
                CsvWriter::new(&mut file)
                    .include_header(true)
                    .finish(&mut df)?;
            }
        }

        debug!(
            "Wrote {} rows as {:?} to {}",
            df.height(),
            self.format,
            output_path.display()
        );
        Ok(df.height())
    }
}
