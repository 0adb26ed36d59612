//! Main processing pipeline.
//!
//! Runs reader, header skip, validation, filtering, splitting and decoding
//! over a single water level file and returns the cleaned dataset together
//! with the statistics of the run.

use crate::config::ProcessorConfig;
use crate::decoder::FieldDecoder;
use crate::error::{Result, SurgeError};
use crate::models::{ProcessingResult, ProcessingStats, RawLine, TimeSeriesDataset};
use crate::reader::{read_lines, skip_header};
use crate::splitter::ColumnSplitter;
use crate::validator::{LineValidator, filter_lines};
use std::path::Path;
use tracing::{debug, info, warn};

/// Pipeline for NOAA-style water level files
#[derive(Debug, Clone)]
pub struct SurgeProcessor {
    config: ProcessorConfig,
    validator: LineValidator,
    splitter: ColumnSplitter,
    decoder: FieldDecoder,
}

impl Default for SurgeProcessor {
    fn default() -> Self {
        Self::new(ProcessorConfig::default())
    }
}

impl SurgeProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        let validator =
            LineValidator::new(config.expected_separators).with_separator(config.separator);
        let splitter = ColumnSplitter::new(config.separator);
        let decoder = FieldDecoder::new(config.timestamp_column, config.value_columns.clone());

        Self {
            config,
            validator,
            splitter,
            decoder,
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Read and clean a file
    pub fn process_file(&self, file_path: &Path) -> Result<ProcessingResult> {
        info!("Processing water level file: {}", file_path.display());
        let lines = read_lines(file_path)?;
        self.process_lines(lines)
    }

    /// Clean lines that are already in memory, header included
    pub fn process_lines(&self, lines: Vec<RawLine>) -> Result<ProcessingResult> {
        let (candidates, mut stats) = self.validate_lines(lines);

        let surviving = filter_lines(candidates, &stats.malformed_indices);
        if surviving.is_empty() {
            return Err(SurgeError::DataEmpty {
                candidate_lines: stats.candidate_lines,
            });
        }

        let table = self.splitter.split(&surviving)?;
        let rows = self.decoder.decode(&table)?;
        stats.rows_decoded = rows.len();

        info!(
            "Decoded {} rows ({} malformed lines excluded, {:.1}% kept)",
            stats.rows_decoded,
            stats.malformed_lines,
            stats.success_rate()
        );

        Ok(ProcessingResult {
            dataset: TimeSeriesDataset::new(rows, self.config.value_labels.clone()),
            stats,
        })
    }

    /// Run only the structural checks on a file
    pub fn validate_file(&self, file_path: &Path) -> Result<ProcessingStats> {
        info!("Validating water level file: {}", file_path.display());
        let lines = read_lines(file_path)?;
        let (_, stats) = self.validate_lines(lines);
        Ok(stats)
    }

    fn validate_lines(&self, lines: Vec<RawLine>) -> (Vec<RawLine>, ProcessingStats) {
        let total_lines = lines.len();
        let candidates = skip_header(lines, self.config.header_lines);
        let malformed = self.validator.malformed_indices(&candidates);

        let stats = ProcessingStats {
            total_lines,
            header_lines: total_lines - candidates.len(),
            candidate_lines: candidates.len(),
            malformed_lines: malformed.len(),
            rows_decoded: 0,
            malformed_indices: malformed,
        };

        if stats.malformed_lines > 0 {
            warn!(
                "{} of {} data lines are malformed",
                stats.malformed_lines, stats.candidate_lines
            );
        }
        debug!("Validation stats: {:?}", stats);

        (candidates, stats)
    }
}

#[cfg(test)]
pub mod tests;
