//! Pipeline tests for the processor module
//!
//! Exercise the complete read/validate/split/decode path using temporary
//! water level files laid out like the NOAA exports.


use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Eleven header lines in the shape of the NOAA water level export
pub const HEADER: &str = "\
NOAA/NOS/CO-OPS Water Level Data
Station: 8658163 Wrightsville Beach, NC
Datum: NAVD88
Units: meters
Time zone: LST
Interval: 6 minutes
Source: reformatted for teaching
Columns:
  timestamp YYYYMMDDhhmm
  predicted water level
  measured water level
";

/// Write a water level file with the standard header followed by `rows`
pub fn write_surge_file(temp_dir: &TempDir, rows: &[&str]) -> PathBuf {
    let mut content = HEADER.to_string();
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }

    let path = temp_dir.path().join("water_level.txt");
    fs::write(&path, content).unwrap();
    path
}
