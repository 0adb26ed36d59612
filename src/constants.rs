//! Application constants for the surge processor
//!
//! Default layout of the NOAA water level text files and the labels used
//! when handing the cleaned series to a plotting collaborator.

// =============================================================================
// Input File Layout
// =============================================================================

/// Number of fixed-format header lines at the top of every input file
pub const HEADER_LINES: usize = 11;

/// Field separator between timestamp, predicted and measured values
pub const FIELD_SEPARATOR: char = ' ';

/// Separator count of a well-formed 3-column record
pub const EXPECTED_SEPARATORS: usize = 2;

/// Column holding the YYYYMMDDhhmm timestamp
pub const TIMESTAMP_COLUMN: usize = 0;

/// Columns holding the predicted and measured water levels
pub const VALUE_COLUMNS: &[usize] = &[1, 2];

/// Characters removed from every raw line before validation
pub const STRIPPED_CHARS: &[char] = &['\n', '\r', '\t'];

// =============================================================================
// Timestamp Encoding
// =============================================================================

/// Width of the fixed-width timestamp field (YYYYMMDDhhmm)
pub const TIMESTAMP_WIDTH: usize = 12;

/// Display format for decoded timestamps
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

// =============================================================================
// Output Labels
// =============================================================================

/// Default labels for the value columns, in column order
pub const DEFAULT_VALUE_LABELS: &[&str] = &["predicted", "measured"];

/// Name of the timestamp column in exported frames
pub const TIMESTAMP_FIELD_NAME: &str = "timestamp";

pub mod chart {
    pub const PREDICTED_LABEL: &str = "Predicted";
    pub const MEASURED_LABEL: &str = "Measured";
    pub const X_AXIS_LABEL: &str = "Date";
    pub const Y_AXIS_LABEL: &str = "Water level (m, NAVD88)";
}
