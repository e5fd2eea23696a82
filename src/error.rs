//! Error types for uadb2parquet
//!
//! This module defines the error hierarchy for the conversion pipeline:
//! - CSV source errors (open, header, malformed rows)
//! - Type coercion errors
//! - Parquet sink errors
//! - Configuration and CLI errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors should be actionable - include the column, line, and value
//!   involved wherever the pipeline knows them
//! - Every error is fatal: the converter has no per-row skip or retry path,
//!   so errors propagate straight out to the binary

use crate::parquet::writer::WriterState;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the uadb2parquet application
#[derive(Error, Debug)]
pub enum ConvertError {
    /// CSV source errors
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Type coercion errors
    #[error("Coercion error: {0}")]
    Coercion(#[from] CoercionError),

    /// Parquet sink errors
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// CSV source errors
#[derive(Error, Debug)]
pub enum CsvError {
    /// Failed to open the source file
    #[error("Failed to open CSV file '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read the header row
    #[error("Failed to read CSV header: {0}")]
    Header(#[source] csv::Error),

    /// Declared schema columns absent from the source header
    #[error("CSV header is missing declared columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// Malformed record (ragged row, invalid UTF-8)
    #[error("Failed to read CSV record: {0}")]
    Read(#[from] csv::Error),
}

/// Type coercion errors
#[derive(Error, Debug)]
pub enum CoercionError {
    /// Value in an integer column is not an unsigned 32-bit integer.
    /// This aborts the whole run - there is no per-row quarantine.
    #[error("Invalid unsigned integer in column '{column}' at line {line}: '{value}' ({reason})")]
    InvalidInteger {
        column: String,
        line: u64,
        value: String,
        reason: String,
    },

    /// Arrow error while assembling a record batch
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Parquet sink errors
#[derive(Error, Debug)]
pub enum ParquetError {
    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet writer error
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Failed to create the destination file
    #[error("Failed to create Parquet file '{path}': {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Batch schema differs from the schema established by the first batch
    #[error("Batch schema does not match the first batch (expected columns [{expected}], got [{actual}])")]
    SchemaMismatch { expected: String, actual: String },

    /// Operation not legal in the writer's current state
    #[error("Cannot {operation}: writer is {state}")]
    InvalidState {
        operation: &'static str,
        state: WriterState,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid chunk size
    #[error("Invalid chunk size {size}: must be at least 1")]
    InvalidChunkSize { size: usize },

    /// Output path error
    #[error("Invalid output path '{path}': {reason}")]
    InvalidOutputPath { path: PathBuf, reason: String },
}

/// Result type alias for ConvertError
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Result type alias for CsvError
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Result type alias for CoercionError
pub type CoercionResult<T> = std::result::Result<T, CoercionError>;

/// Result type alias for ParquetError
pub type ParquetResult<T> = std::result::Result<T, ParquetError>;
