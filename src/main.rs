//! uadb2parquet - User-Agent Database CSV to Parquet Converter
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::time::Instant;
use tracing::error;
use tracing_subscriber::EnvFilter;
use uadb2parquet::config::{CliArgs, ConvertConfig};
use uadb2parquet::parquet::{convert_csv_to_parquet, ProgressCallback};
use uadb2parquet::progress::{print_header, print_summary, ProgressReporter};
use uadb2parquet::schema::SchemaSpec;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging()?;

    // Validate and create config
    let config = ConvertConfig::from_args(&args).context("Invalid configuration")?;

    let schema = SchemaSpec::user_agent_database();

    // Print header
    if config.show_progress {
        print_header(
            &args.csv_file.display().to_string(),
            &args.parquet_file.display().to_string(),
            config.chunk_size,
        );
    }

    // Create progress reporter
    let progress = if config.show_progress {
        Some(ProgressReporter::new())
    } else {
        None
    };

    if let Some(ref p) = progress {
        p.set_status("Reading CSV header...");
    }

    // Wire the reporter into the conversion's progress callback
    let callback: Option<ProgressCallback> = progress.as_ref().map(|p| {
        let reporter = p.clone();
        Box::new(move |chunks, rows| reporter.update(chunks, rows)) as ProgressCallback
    });

    // Run the conversion
    let started = Instant::now();
    let stats = convert_csv_to_parquet(
        &args.csv_file,
        &args.parquet_file,
        &schema,
        config,
        callback,
    )
    .context("Conversion failed")?;
    let duration = started.elapsed();

    // Finish progress
    if let Some(ref p) = progress {
        p.finish_and_clear();
    }

    // Print summary
    print_summary(
        stats.rows_written,
        stats.chunks_written,
        duration,
        &args.parquet_file.display().to_string(),
        stats.bytes_written,
    );

    Ok(())
}

fn setup_logging() -> Result<()> {
    // RUST_LOG overrides the default filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("uadb2parquet=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
