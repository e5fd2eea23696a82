//! Progress reporting for the conversion
//!
//! Provides real-time progress display using indicatif progress bars.

use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter that displays conversion status
///
/// Clones share the underlying bar, so one clone can live inside the
/// conversion's progress callback while the original finishes the display.
#[derive(Clone)]
pub struct ProgressReporter {
    /// Progress bar
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update the progress display
    pub fn update(&self, chunks: u64, rows: u64) {
        let msg = format!(
            "Chunks: {} | Rows: {}",
            format_number(chunks),
            format_number(rows),
        );

        self.bar.set_message(msg);
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| {
            chunk
                .iter()
                .rev()
                .map(|&b| b as char)
                .collect::<String>()
        })
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a summary of the conversion results
pub fn print_summary(
    rows: u64,
    chunks: u64,
    duration: Duration,
    output_path: &str,
    output_size: u64,
) {
    let duration_secs = duration.as_secs_f64();
    let rate = if duration_secs > 0.0 {
        rows as f64 / duration_secs
    } else {
        0.0
    };
    let size_str = format_size(output_size, BINARY);

    println!();
    println!("{}", style("Conversion Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Rows:").bold(), format_number(rows));
    println!("  {} {}", style("Chunks:").bold(), format_number(chunks));
    println!(
        "  {} {:.1}s ({:.0} rows/sec)",
        style("Duration:").bold(),
        duration_secs,
        rate
    );
    println!(
        "  {} {} ({})",
        style("Output:").bold(),
        output_path,
        size_str
    );
    println!();
}

/// Print a header at the start of the conversion
pub fn print_header(csv_path: &str, parquet_path: &str, chunk_size: usize) {
    println!();
    println!(
        "{} {}",
        style("uadb2parquet").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Source:").bold(), csv_path);
    println!("  {} {}", style("Output:").bold(), parquet_path);
    println!(
        "  {} {}",
        style("Chunk size:").bold(),
        format_number(chunk_size as u64)
    );
    println!();
}
