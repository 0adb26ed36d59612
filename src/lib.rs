//! Surge Processor Library
//!
//! Cleans NOAA-style storm surge water level text files into typed,
//! column-aligned time series ready for plotting.
//!
//! The pipeline runs in fixed stages over the whole file in memory:
//! - [`reader`] loads numbered lines and drops the fixed header
//! - [`validator`] flags lines with the wrong separator count and filters them out
//! - [`splitter`] builds a column table whose width comes from the first surviving line
//! - [`decoder`] turns the timestamp and value columns into typed rows
//! - [`processor`] wires the stages together and records statistics
//!
//! ```no_run
//! use surge_processor::SurgeProcessor;
//!
//! # fn main() -> surge_processor::Result<()> {
//! let result = SurgeProcessor::default().process_file("water_level.txt".as_ref())?;
//! let chart = result.dataset.chart_data()?;
//! println!("{} points, {} malformed lines", chart.len(), result.stats.malformed_lines);
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod cli;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod models;
pub mod processor;
pub mod reader;
pub mod splitter;
pub mod validator;
pub mod writer;

pub use chart::{ChartData, ChartSeries};
pub use config::ProcessorConfig;
pub use error::{Result, SurgeError};
pub use models::{
    ColumnTable, DecodedRow, ProcessingResult, ProcessingStats, RawLine, TimeSeriesDataset,
    ValidationVerdict,
};
pub use processor::SurgeProcessor;
