//! Core data structures for water level processing.
//!
//! Defines the records that flow between pipeline stages, from raw text
//! lines through the column table to the decoded, plot-ready dataset.

use crate::chart::ChartData;
use crate::constants::{TIMESTAMP_FIELD_NAME, chart};
use crate::error::{Result, SurgeError};
use chrono::NaiveDateTime;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One input record with terminators and tabs stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 0-based position in the source, header lines included
    pub index: usize,
    pub content: String,
}

impl RawLine {
    pub fn new(index: usize, content: impl Into<String>) -> Self {
        Self {
            index,
            content: content.into(),
        }
    }

    /// Build numbered lines from in-memory text
    pub fn from_lines<I, S>(lines: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| Self::new(index, crate::reader::clean_line(line.as_ref())))
            .collect()
    }
}

/// Outcome of the separator check for a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub line_index: usize,
    pub separators: usize,
    pub well_formed: bool,
}

/// Column-oriented raw fields of the well-formed lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTable {
    columns: Vec<Vec<String>>,
    line_indices: Vec<usize>,
}

impl ColumnTable {
    /// Create an empty table with a fixed column count
    pub(crate) fn with_columns(column_count: usize, capacity: usize) -> Self {
        Self {
            columns: (0..column_count)
                .map(|_| Vec::with_capacity(capacity))
                .collect(),
            line_indices: Vec::with_capacity(capacity),
        }
    }

    /// Append one row; the caller guarantees exactly `column_count` fields
    pub(crate) fn push_row<'a>(&mut self, line_index: usize, fields: impl Iterator<Item = &'a str>) {
        for (column, field) in self.columns.iter_mut().zip(fields) {
            column.push(field.to_string());
        }
        self.line_indices.push(line_index);
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.line_indices.len()
    }

    pub fn column(&self, index: usize) -> Option<&[String]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    pub fn columns(&self) -> &[Vec<String>] {
        &self.columns
    }

    /// Source line index of every row
    pub fn line_indices(&self) -> &[usize] {
        &self.line_indices
    }
}

/// A fully typed record ready for downstream consumption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedRow {
    pub line_index: usize,
    pub timestamp: NaiveDateTime,
    pub values: Vec<f64>,
}

/// The cleaned, decoded and column-aligned result of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesDataset {
    pub rows: Vec<DecodedRow>,
    pub value_labels: Vec<String>,
}

impl TimeSeriesDataset {
    pub fn new(rows: Vec<DecodedRow>, value_labels: Vec<String>) -> Self {
        Self { rows, value_labels }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.rows.iter().map(|row| row.timestamp).collect()
    }

    /// Values of the `index`-th value column, one per row
    pub fn series(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.value_labels.len() {
            return None;
        }
        self.rows
            .iter()
            .map(|row| row.values.get(index).copied())
            .collect()
    }

    /// Values of the series with the given label
    pub fn series_by_label(&self, label: &str) -> Option<Vec<f64>> {
        let index = self.value_labels.iter().position(|l| l == label)?;
        self.series(index)
    }

    pub fn predicted(&self) -> Option<Vec<f64>> {
        self.series(0)
    }

    pub fn measured(&self) -> Option<Vec<f64>> {
        self.series(1)
    }

    /// Default chart hand-off: one series per value column
    pub fn chart_data(&self) -> Result<ChartData> {
        let mut data = ChartData::new(self.timestamps())
            .with_x_label(chart::X_AXIS_LABEL)
            .with_y_label(chart::Y_AXIS_LABEL);

        for (index, label) in self.value_labels.iter().enumerate() {
            let values = self.series(index).ok_or_else(|| SurgeError::SeriesLengthMismatch {
                label: label.clone(),
                expected: self.len(),
                found: 0,
            })?;
            data = data.with_series(display_label(label), values)?;
        }

        Ok(data)
    }

    /// Convert into a polars frame: `timestamp` plus one f64 column per label
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let millis: Vec<i64> = self
            .rows
            .iter()
            .map(|row| row.timestamp.and_utc().timestamp_millis())
            .collect();
        let timestamp = Series::new(TIMESTAMP_FIELD_NAME.into(), millis)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

        let mut columns = vec![timestamp.into_column()];
        for (index, label) in self.value_labels.iter().enumerate() {
            let values = self.series(index).unwrap_or_default();
            columns.push(Column::new(label.as_str().into(), values));
        }

        Ok(DataFrame::new(columns)?)
    }
}

fn display_label(label: &str) -> String {
    match label {
        "predicted" => chart::PREDICTED_LABEL.to_string(),
        "measured" => chart::MEASURED_LABEL.to_string(),
        other => other.to_string(),
    }
}

/// Processing statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStats {
    /// Lines read from the source, header included
    pub total_lines: usize,

    /// Header lines skipped before validation
    pub header_lines: usize,

    /// Lines handed to the validator
    pub candidate_lines: usize,

    /// Lines excluded by the separator check
    pub malformed_lines: usize,

    /// Rows in the decoded dataset
    pub rows_decoded: usize,

    /// Source line indices of the excluded lines
    pub malformed_indices: BTreeSet<usize>,
}

impl ProcessingStats {
    /// Share of candidate lines that survived validation, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.candidate_lines == 0 {
            0.0
        } else {
            let kept = self.candidate_lines - self.malformed_lines;
            (kept as f64 / self.candidate_lines as f64) * 100.0
        }
    }
}

/// Dataset with the statistics of the run that produced it
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub dataset: TimeSeriesDataset,
    pub stats: ProcessingStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 10, 10)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn sample_dataset() -> TimeSeriesDataset {
        TimeSeriesDataset::new(
            vec![
                DecodedRow {
                    line_index: 11,
                    timestamp: at(0, 0),
                    values: vec![1.234, 1.2],
                },
                DecodedRow {
                    line_index: 13,
                    timestamp: at(0, 6),
                    values: vec![1.25, 1.26],
                },
            ],
            vec!["predicted".to_string(), "measured".to_string()],
        )
    }

    #[test]
    fn test_raw_lines_strip_terminators_and_tabs() {
        let lines = RawLine::from_lines(["a b\tc\r", "\td e f\n"]);
        assert_eq!(lines[0], RawLine::new(0, "a bc"));
        assert_eq!(lines[1], RawLine::new(1, "d e f"));
    }

    #[test]
    fn test_series_accessors() {
        let dataset = sample_dataset();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.predicted(), Some(vec![1.234, 1.25]));
        assert_eq!(dataset.measured(), Some(vec![1.2, 1.26]));
        assert_eq!(dataset.series_by_label("measured"), Some(vec![1.2, 1.26]));
        assert_eq!(dataset.series(2), None);
        assert_eq!(dataset.timestamps(), vec![at(0, 0), at(0, 6)]);
    }

    #[test]
    fn test_chart_data_uses_display_labels() {
        let chart = sample_dataset().chart_data().unwrap();
        let labels: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Predicted", "Measured"]);
        assert_eq!(chart.y_label.as_deref(), Some("Water level (m, NAVD88)"));
    }

    #[test]
    fn test_to_dataframe_shape() {
        let df = sample_dataset().to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["timestamp", "predicted", "measured"]);
        assert!(matches!(
            df.column("timestamp").unwrap().dtype(),
            DataType::Datetime(TimeUnit::Milliseconds, None)
        ));
    }

    #[test]
    fn test_success_rate() {
        let stats = ProcessingStats {
            candidate_lines: 4,
            malformed_lines: 1,
            ..Default::default()
        };
        assert_eq!(stats.success_rate(), 75.0);
        assert_eq!(ProcessingStats::default().success_rate(), 0.0);
    }
}
