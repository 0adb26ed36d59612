//! Structural validation of data lines.
//!
//! A line is well-formed when it contains exactly the expected number of
//! separator characters. Malformed lines are reported by source index and
//! excluded by [`filter_lines`]; they never raise an error.

use crate::constants::{EXPECTED_SEPARATORS, FIELD_SEPARATOR};
use crate::models::{RawLine, ValidationVerdict};
use std::collections::BTreeSet;
use tracing::debug;

/// Separator-count rule for the fixed column layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineValidator {
    expected_separators: usize,
    separator: char,
}

impl Default for LineValidator {
    fn default() -> Self {
        Self::new(EXPECTED_SEPARATORS)
    }
}

impl LineValidator {
    pub fn new(expected_separators: usize) -> Self {
        Self {
            expected_separators,
            separator: FIELD_SEPARATOR,
        }
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn expected_separators(&self) -> usize {
        self.expected_separators
    }

    /// Classify a single line
    pub fn check(&self, line: &RawLine) -> ValidationVerdict {
        let separators = line.content.chars().filter(|&c| c == self.separator).count();
        ValidationVerdict {
            line_index: line.index,
            separators,
            well_formed: separators == self.expected_separators,
        }
    }

    /// One verdict per input line, in input order
    pub fn validate(&self, lines: &[RawLine]) -> Vec<ValidationVerdict> {
        lines.iter().map(|line| self.check(line)).collect()
    }

    /// Source indices of every line that fails the separator check
    pub fn malformed_indices(&self, lines: &[RawLine]) -> BTreeSet<usize> {
        self.validate(lines)
            .into_iter()
            .filter(|verdict| !verdict.well_formed)
            .inspect(|verdict| {
                debug!(
                    "Line {} malformed: {} separators, expected {}",
                    verdict.line_index, verdict.separators, self.expected_separators
                )
            })
            .map(|verdict| verdict.line_index)
            .collect()
    }
}

/// Remove lines whose index is in `malformed`, preserving order
pub fn filter_lines(lines: Vec<RawLine>, malformed: &BTreeSet<usize>) -> Vec<RawLine> {
    lines
        .into_iter()
        .filter(|line| !malformed.contains(&line.index))
        .collect()
}
