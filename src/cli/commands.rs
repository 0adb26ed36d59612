//! Command implementations for the surge CLI
//!
//! Each command sets up logging, layers the configuration and runs the
//! pipeline, then prints a coloured summary to stdout.

use super::args::{Commands, CommonArgs, ProcessArgs, ValidateArgs};
use crate::models::ProcessingStats;
use crate::processor::SurgeProcessor;
use crate::writer::DatasetWriter;
use anyhow::{Context, Result};
use colored::*;
use tracing::debug;

/// Dispatch a parsed subcommand
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Process(args) => run_process(args),
        Commands::Validate(args) => run_validate(args),
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("surge_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Clean a file, print a summary and optionally export it
pub fn run_process(args: ProcessArgs) -> Result<()> {
    setup_logging(&args.common);
    let config = args.common.load_config().context("Invalid configuration")?;
    let input = &args.common.input_path;

    let result = SurgeProcessor::new(config)
        .process_file(input)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    print_stats(&result.stats);

    let dataset = &result.dataset;
    if let (Some(first), Some(last)) = (dataset.rows.first(), dataset.rows.last()) {
        println!(
            "  {} {} to {}",
            "Period:".bright_cyan(),
            first.timestamp.format(crate::constants::TIMESTAMP_DISPLAY_FORMAT),
            last.timestamp.format(crate::constants::TIMESTAMP_DISPLAY_FORMAT)
        );
    }

    if let Some(output_path) = &args.output_path {
        let format = args.get_format(output_path);
        let rows = DatasetWriter::new(format)
            .write(dataset, output_path)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        println!(
            "  {} {} rows to {}",
            "Wrote".bright_green(),
            rows.to_string().bright_white().bold(),
            output_path.display()
        );
    }

    Ok(())
}

/// Report malformed lines without decoding
pub fn run_validate(args: ValidateArgs) -> Result<()> {
    setup_logging(&args.common);
    let config = args.common.load_config().context("Invalid configuration")?;
    let input = &args.common.input_path;

    let stats = SurgeProcessor::new(config)
        .validate_file(input)
        .with_context(|| format!("Failed to validate {}", input.display()))?;

    print_stats(&stats);

    if args.list && !stats.malformed_indices.is_empty() {
        println!("  {}", "Malformed lines (0-based):".bright_yellow());
        for index in &stats.malformed_indices {
            println!("    {}", index);
        }
    }

    Ok(())
}

fn print_stats(stats: &ProcessingStats) {
    println!("{}", "Water level file summary".bright_green().bold());
    println!(
        "  {} {} ({} header)",
        "Lines:".bright_cyan(),
        stats.total_lines.to_string().bright_white().bold(),
        stats.header_lines
    );
    println!(
        "  {} {}",
        "Malformed:".bright_cyan(),
        if stats.malformed_lines > 0 {
            stats.malformed_lines.to_string().bright_yellow()
        } else {
            stats.malformed_lines.to_string().bright_white()
        }
    );
    if stats.rows_decoded > 0 {
        println!(
            "  {} {}",
            "Decoded rows:".bright_cyan(),
            stats.rows_decoded.to_string().bright_white().bold()
        );
    }
    println!("  {} {:.1}%", "Kept:".bright_cyan(), stats.success_rate());
}
