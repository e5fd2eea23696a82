//! Stateful Parquet chunk writer
//!
//! Wraps `parquet::arrow::ArrowWriter` behind an explicit lifecycle.
//! Creating a [`ChunkWriter`] touches nothing on disk; the destination file
//! is created when the first batch is appended, and that batch's schema
//! becomes the descriptor every later batch must match. Finalizing flushes
//! and closes the file; no further writes are permitted afterwards.
//!
//! There is no cleanup on the error path: a partially written destination
//! may remain on disk after a mid-run failure.

use crate::error::{ParquetError, ParquetResult};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Lifecycle state of a [`ChunkWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// No destination file yet; the schema descriptor is undetermined
    Uninitialized,
    /// Destination created, schema fixed, append-only
    Open,
    /// Destination closed; no further writes permitted
    Finalized,
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriterState::Uninitialized => "uninitialized",
            WriterState::Open => "open",
            WriterState::Finalized => "finalized",
        };
        write!(f, "{}", name)
    }
}

/// Build Parquet writer properties with Snappy compression and chunk-level
/// column statistics. The row group size is tied to the chunk size so each
/// appended chunk lands in its own row group.
pub fn writer_properties(max_row_group_size: usize) -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .set_statistics_enabled(parquet::file::properties::EnabledStatistics::Chunk)
        .set_max_row_group_size(max_row_group_size)
        .build()
}

/// Append-only writer for a single Parquet file.
///
/// The destination is created (overwritten) lazily on the first append,
/// using that batch's schema as the file descriptor. [`ChunkWriter::finish`]
/// must be called exactly once, after all appends, or the file is left
/// without its footer and is unreadable.
pub struct ChunkWriter {
    dest_path: PathBuf,
    props: WriterProperties,
    state: WriterState,
    writer: Option<ArrowWriter<File>>,
    schema: Option<SchemaRef>,
    rows_appended: u64,
    batches_appended: u64,
}

impl ChunkWriter {
    /// Record the destination path and properties. Nothing is created on
    /// disk until the first append.
    pub fn new<P: AsRef<Path>>(dest_path: P, props: WriterProperties) -> Self {
        Self {
            dest_path: dest_path.as_ref().to_path_buf(),
            props,
            state: WriterState::Uninitialized,
            writer: None,
            schema: None,
            rows_appended: 0,
            batches_appended: 0,
        }
    }

    /// Append a batch to the destination.
    ///
    /// The first append derives the file's schema descriptor from `batch`
    /// and creates the destination. Every later batch must carry the same
    /// schema; a mismatch is fatal, not recoverable.
    pub fn append(&mut self, batch: &RecordBatch) -> ParquetResult<()> {
        match self.state {
            WriterState::Uninitialized => {
                let file = File::create(&self.dest_path).map_err(|e| ParquetError::Create {
                    path: self.dest_path.clone(),
                    source: e,
                })?;

                let schema = batch.schema();
                let writer =
                    ArrowWriter::try_new(file, schema.clone(), Some(self.props.clone()))?;

                info!(
                    "Created Parquet file: {} ({} columns)",
                    self.dest_path.display(),
                    schema.fields().len()
                );

                self.writer = Some(writer);
                self.schema = Some(schema);
                self.state = WriterState::Open;
                self.write_batch(batch)
            }
            WriterState::Open => {
                if let Some(expected) = &self.schema {
                    if batch.schema().as_ref() != expected.as_ref() {
                        return Err(ParquetError::SchemaMismatch {
                            expected: column_names(expected),
                            actual: column_names(&batch.schema()),
                        });
                    }
                }
                self.write_batch(batch)
            }
            WriterState::Finalized => Err(ParquetError::InvalidState {
                operation: "append",
                state: self.state,
            }),
        }
    }

    fn write_batch(&mut self, batch: &RecordBatch) -> ParquetResult<()> {
        let writer = self.writer.as_mut().ok_or(ParquetError::InvalidState {
            operation: "append",
            state: self.state,
        })?;

        writer.write(batch)?;
        self.rows_appended += batch.num_rows() as u64;
        self.batches_appended += 1;

        debug!(
            "Appended batch {} ({} rows, {} total)",
            self.batches_appended,
            batch.num_rows(),
            self.rows_appended
        );

        Ok(())
    }

    /// Flush and close the destination file.
    ///
    /// Legal only in the `Open` state; finalizing twice or finalizing a
    /// writer that never received a batch is an error.
    pub fn finish(&mut self) -> ParquetResult<()> {
        match self.state {
            WriterState::Open => {
                let writer = self.writer.take().ok_or(ParquetError::InvalidState {
                    operation: "finish",
                    state: self.state,
                })?;
                writer.close()?;
                self.state = WriterState::Finalized;

                info!(
                    "Finalized Parquet file: {} ({} rows in {} batches)",
                    self.dest_path.display(),
                    self.rows_appended,
                    self.batches_appended
                );

                Ok(())
            }
            other => Err(ParquetError::InvalidState {
                operation: "finish",
                state: other,
            }),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Total rows appended so far.
    pub fn rows_appended(&self) -> u64 {
        self.rows_appended
    }

    /// Total batches appended so far.
    pub fn batches_appended(&self) -> u64 {
        self.batches_appended
    }
}

/// Comma-joined field names of a schema, for error messages.
fn column_names(schema: &SchemaRef) -> String {
    schema
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
