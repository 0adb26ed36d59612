//! Raw line loading for water level text files.
//!
//! Reads the whole file into memory as numbered [`RawLine`]s and removes
//! the fixed-format header that precedes the data records.

use crate::constants::STRIPPED_CHARS;
use crate::error::{Result, SurgeError};
use crate::models::RawLine;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Read every line of `file_path` in order, stripped of terminators and tabs
pub fn read_lines(file_path: &Path) -> Result<Vec<RawLine>> {
    let file = File::open(file_path).map_err(|e| SurgeError::io(file_path, e))?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| SurgeError::io(file_path, e))?;
        lines.push(RawLine::new(index, clean_line(&line)));
    }

    debug!("Read {} lines from {}", lines.len(), file_path.display());
    Ok(lines)
}

/// Remove line terminators and tab characters
pub fn clean_line(line: &str) -> String {
    line.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect()
}

/// Drop the first `header_lines` lines unconditionally
pub fn skip_header(mut lines: Vec<RawLine>, header_lines: usize) -> Vec<RawLine> {
    let skipped = header_lines.min(lines.len());
    lines.drain(..skipped);
    debug!("Skipped {} header lines", skipped);
    lines
}
