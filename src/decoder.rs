//! Field decoding for the column table.
//!
//! Converts the raw string columns into typed values: the fixed-width
//! YYYYMMDDhhmm timestamp column and one or more floating point columns.
//! The first failure aborts the whole decode so the output never loses
//! alignment between the timestamp and value series.

use crate::constants::{TIMESTAMP_COLUMN, TIMESTAMP_WIDTH, VALUE_COLUMNS};
use crate::error::{Result, SurgeError};
use crate::models::{ColumnTable, DecodedRow};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecoder {
    timestamp_column: usize,
    value_columns: Vec<usize>,
}

impl Default for FieldDecoder {
    fn default() -> Self {
        Self::new(TIMESTAMP_COLUMN, VALUE_COLUMNS.to_vec())
    }
}

impl FieldDecoder {
    pub fn new(timestamp_column: usize, value_columns: Vec<usize>) -> Self {
        Self {
            timestamp_column,
            value_columns,
        }
    }

    /// Decode every row of `table`
    pub fn decode(&self, table: &ColumnTable) -> Result<Vec<DecodedRow>> {
        let timestamps = self.column(table, self.timestamp_column)?;
        let value_columns = self
            .value_columns
            .iter()
            .map(|&index| self.column(table, index).map(|values| (index, values)))
            .collect::<Result<Vec<_>>>()?;

        let line_indices = table.line_indices();
        let mut rows = Vec::with_capacity(table.row_count());

        for (row, &line) in line_indices.iter().enumerate() {
            let raw = &timestamps[row];
            let timestamp = decode_timestamp(raw).map_err(|reason| SurgeError::Parse {
                line,
                column: self.timestamp_column,
                value: raw.clone(),
                reason,
            })?;

            let mut values = Vec::with_capacity(value_columns.len());
            for (column, raw_values) in &value_columns {
                let raw = &raw_values[row];
                let value = decode_value(raw).map_err(|reason| SurgeError::Parse {
                    line,
                    column: *column,
                    value: raw.clone(),
                    reason,
                })?;
                values.push(value);
            }

            rows.push(DecodedRow {
                line_index: line,
                timestamp,
                values,
            });
        }

        debug!("Decoded {} rows", rows.len());
        Ok(rows)
    }

    fn column<'a>(&self, table: &'a ColumnTable, index: usize) -> Result<&'a [String]> {
        table.column(index).ok_or_else(|| {
            SurgeError::configuration(format!(
                "Column {} requested but the table has {} columns",
                index,
                table.column_count()
            ))
        })
    }
}

/// Decode a 12-digit YYYYMMDDhhmm string; seconds are always zero
pub fn decode_timestamp(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    if raw.len() != TIMESTAMP_WIDTH || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!(
            "expected {} decimal digits (YYYYMMDDhhmm)",
            TIMESTAMP_WIDTH
        ));
    }

    // All bytes are ASCII digits, so byte slicing is safe and parsing cannot fail
    let field = |range: std::ops::Range<usize>| raw[range].parse::<u32>().unwrap_or_default();
    let year = field(0..4) as i32;
    let month = field(4..6);
    let day = field(6..8);
    let hour = field(8..10);
    let minute = field(10..12);

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("invalid calendar date {:04}-{:02}-{:02}", year, month, day))?;
    date.and_hms_opt(hour, minute, 0)
        .ok_or_else(|| format!("invalid time of day {:02}:{:02}", hour, minute))
}

/// Decode a floating point literal
pub fn decode_value(raw: &str) -> std::result::Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|e| format!("not a numeric literal: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawLine;
    use crate::splitter::ColumnSplitter;
    use chrono::{Datelike, Timelike};

    fn table(lines: &[(usize, &str)]) -> ColumnTable {
        let lines: Vec<RawLine> = lines
            .iter()
            .map(|(index, content)| RawLine::new(*index, *content))
            .collect();
        ColumnSplitter::default().split(&lines).unwrap()
    }

    #[test]
    fn test_decode_timestamp_fields() {
        let ts = decode_timestamp("201810100130").unwrap();
        assert_eq!(ts.year(), 2018);
        assert_eq!(ts.month(), 10);
        assert_eq!(ts.day(), 10);
        assert_eq!(ts.hour(), 1);
        assert_eq!(ts.minute(), 30);
        assert_eq!(ts.second(), 0);
    }

    #[test]
    fn test_decode_timestamp_rejects_bad_input() {
        assert!(decode_timestamp("20181399990").is_err()); // 11 digits
        assert!(decode_timestamp("201813100000").is_err()); // month 13
        assert!(decode_timestamp("201810320000").is_err()); // day 32
        assert!(decode_timestamp("201802290000").is_err()); // not a leap year
        assert!(decode_timestamp("201810102400").is_err()); // hour 24
        assert!(decode_timestamp("201810100060").is_err()); // minute 60
        assert!(decode_timestamp("2018-10-1001").is_err());
        assert!(decode_timestamp("２01810100130").is_err());
    }

    #[test]
    fn test_decode_value() {
        assert_eq!(decode_value("1.234").unwrap(), 1.234);
        assert_eq!(decode_value("-0.5").unwrap(), -0.5);
        assert!(decode_value("").is_err());
        assert!(decode_value("1.2.3").is_err());
    }

    #[test]
    fn test_decode_rows_aligned_with_table() {
        let table = table(&[
            (11, "201810100000 1.234 1.200"),
            (13, "201810100006 1.250 1.260"),
        ]);

        let rows = FieldDecoder::default().decode(&table).unwrap();

        assert_eq!(rows.len(), table.row_count());
        assert_eq!(rows[0].line_index, 11);
        assert_eq!(rows[0].values, vec![1.234, 1.2]);
        assert_eq!(rows[1].line_index, 13);
        assert_eq!(rows[1].timestamp.minute(), 6);
        assert_eq!(rows[1].values, vec![1.25, 1.26]);
    }

    #[test]
    fn test_bad_timestamp_aborts_with_line_index() {
        let table = table(&[
            (11, "201810100000 1.0 2.0"),
            (12, "20181399990 1.0 2.0"),
        ]);

        match FieldDecoder::default().decode(&table) {
            Err(SurgeError::Parse {
                line,
                column,
                value,
                ..
            }) => {
                assert_eq!(line, 12);
                assert_eq!(column, 0);
                assert_eq!(value, "20181399990");
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_value_names_column() {
        let table = table(&[(15, "201810100000 1.0 n/a")]);

        let err = FieldDecoder::default().decode(&table).unwrap_err();
        assert!(matches!(err, SurgeError::Parse { column: 2, .. }));
        assert_eq!(err.line_index(), Some(15));
    }

    #[test]
    fn test_missing_value_column_is_configuration_error() {
        let table = table(&[(0, "201810100000 1.0 2.0")]);
        let decoder = FieldDecoder::new(0, vec![1, 5]);
        assert!(matches!(
            decoder.decode(&table),
            Err(SurgeError::Configuration { .. })
        ));
    }
}
