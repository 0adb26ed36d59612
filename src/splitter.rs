//! Column splitting for well-formed lines.
//!
//! The first surviving line defines the column count for the whole file.
//! Every line is split on the single separator character and its fields are
//! appended to the matching column; fields past the last column are dropped.

use crate::constants::FIELD_SEPARATOR;
use crate::error::{Result, SurgeError};
use crate::models::{ColumnTable, RawLine};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSplitter {
    separator: char,
}

impl Default for ColumnSplitter {
    fn default() -> Self {
        Self::new(FIELD_SEPARATOR)
    }
}

impl ColumnSplitter {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// Build a column table from filtered lines
    ///
    /// Fails with [`SurgeError::DataEmpty`] when `lines` is empty and with
    /// [`SurgeError::RaggedRow`] when a line has fewer fields than the first.
    pub fn split(&self, lines: &[RawLine]) -> Result<ColumnTable> {
        let first = lines.first().ok_or(SurgeError::DataEmpty { candidate_lines: 0 })?;
        let column_count = first.content.split(self.separator).count();

        debug!(
            "Splitting {} lines into {} columns (schema from line {})",
            lines.len(),
            column_count,
            first.index
        );

        let mut table = ColumnTable::with_columns(column_count, lines.len());
        for line in lines {
            let found = line.content.split(self.separator).count();
            if found < column_count {
                return Err(SurgeError::RaggedRow {
                    line: line.index,
                    expected: column_count,
                    found,
                });
            }
            if found > column_count {
                debug!(
                    "Line {}: dropping {} extra fields",
                    line.index,
                    found - column_count
                );
            }

            table.push_row(line.index, line.content.split(self.separator));
        }

        Ok(table)
    }
}
