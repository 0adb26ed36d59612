//! Configuration management and validation.
//!
//! Provides the processing parameters for a water level file: how many
//! header lines to skip, what a well-formed record looks like, and which
//! columns hold the timestamp and the measured series.

use crate::constants::{
    DEFAULT_VALUE_LABELS, EXPECTED_SEPARATORS, FIELD_SEPARATOR, HEADER_LINES, TIMESTAMP_COLUMN,
    VALUE_COLUMNS,
};
use crate::error::{Result, SurgeError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Global configuration for water level processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Header lines skipped unconditionally before validation
    pub header_lines: usize,

    /// Separator count a record must have to be considered well-formed
    pub expected_separators: usize,

    /// Character separating fields within a record
    pub separator: char,

    /// Column decoded as YYYYMMDDhhmm timestamp
    pub timestamp_column: usize,

    /// Columns decoded as floating point values
    pub value_columns: Vec<usize>,

    /// Labels for the value columns, same order as `value_columns`
    pub value_labels: Vec<String>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            header_lines: HEADER_LINES,
            expected_separators: EXPECTED_SEPARATORS,
            separator: FIELD_SEPARATOR,
            timestamp_column: TIMESTAMP_COLUMN,
            value_columns: VALUE_COLUMNS.to_vec(),
            value_labels: DEFAULT_VALUE_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ProcessorConfig {
    /// Load configuration from a TOML file; missing keys take their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SurgeError::io(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|e| SurgeError::ConfigFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        config.validate()?;
        Ok(config)
    }

    /// Set the number of header lines to skip
    pub fn with_header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
        self
    }

    /// Set the separator count of a well-formed record
    pub fn with_expected_separators(mut self, expected_separators: usize) -> Self {
        self.expected_separators = expected_separators;
        self
    }

    /// Set the field separator character
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Set the decoded value columns and their labels
    pub fn with_value_columns(mut self, columns: Vec<usize>, labels: Vec<String>) -> Self {
        self.value_columns = columns;
        self.value_labels = labels;
        self
    }

    /// Check the settings are consistent with each other
    pub fn validate(&self) -> Result<()> {
        if self.value_columns.is_empty() {
            return Err(SurgeError::configuration(
                "At least one value column is required",
            ));
        }

        if self.value_columns.len() != self.value_labels.len() {
            return Err(SurgeError::configuration(format!(
                "{} value columns but {} value labels",
                self.value_columns.len(),
                self.value_labels.len()
            )));
        }

        if self.value_columns.contains(&self.timestamp_column) {
            return Err(SurgeError::configuration(format!(
                "Column {} cannot be both the timestamp and a value column",
                self.timestamp_column
            )));
        }

        // A record with k separators has k + 1 fields
        let field_count = self.expected_separators + 1;
        let highest = self
            .value_columns
            .iter()
            .copied()
            .chain(std::iter::once(self.timestamp_column))
            .max()
            .unwrap_or(0);
        if highest >= field_count {
            return Err(SurgeError::configuration(format!(
                "Column {} is out of range for records with {} fields",
                highest, field_count
            )));
        }

        if self.separator == '\t' || self.separator == '\n' || self.separator == '\r' {
            return Err(SurgeError::configuration(
                "Separator is stripped from lines before splitting",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = ProcessorConfig::default();
        assert_eq!(config.header_lines, 11);
        assert_eq!(config.expected_separators, 2);
        assert_eq!(config.value_columns, vec![1, 2]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_label_count_mismatch_rejected() {
        let config = ProcessorConfig::default()
            .with_value_columns(vec![1, 2], vec!["predicted".to_string()]);
        assert!(matches!(
            config.validate(),
            Err(SurgeError::Configuration { .. })
        ));
    }

    #[test]
    fn test_out_of_range_column_rejected() {
        let config = ProcessorConfig::default().with_expected_separators(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timestamp_overlap_rejected() {
        let config = ProcessorConfig::default()
            .with_value_columns(vec![0, 1], vec!["a".to_string(), "b".to_string()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "header_lines = 3").unwrap();

        let config = ProcessorConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.header_lines, 3);
        assert_eq!(config.expected_separators, 2);
        assert_eq!(config.separator, ' ');
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "header_lines = \"eleven\"").unwrap();

        match ProcessorConfig::from_toml_file(file.path()) {
            Err(SurgeError::ConfigFile { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("Expected ConfigFile error, got {:?}", other),
        }
    }
}
