//! CSV to Parquet conversion
//!
//! The end-to-end driver: streams chunks from the CSV source, coerces each
//! one to a `RecordBatch`, and appends it to the Parquet sink. Processing is
//! strictly sequential, so destination row order always equals source row
//! order and peak memory is bounded by one chunk.

use crate::config::ConvertConfig;
use crate::csv::coerce::coerce_chunk;
use crate::csv::reader::ChunkedReader;
use crate::error::{ConfigError, Result};
use crate::parquet::writer::{writer_properties, ChunkWriter, WriterState};
use crate::schema::SchemaSpec;
use arrow::record_batch::RecordBatch;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Statistics from a conversion run
#[derive(Debug, Clone)]
pub struct ConvertStats {
    /// Data rows written to the destination (header excluded)
    pub rows_written: u64,
    /// Source chunks coerced and appended
    pub chunks_written: u64,
    /// Final size of the destination file in bytes
    pub bytes_written: u64,
}

/// Progress callback type, invoked with `(chunks_done, rows_done)`
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send>;

/// Convert a user-agent database CSV dump to a Snappy-compressed Parquet file.
///
/// Reads `csv_path` in chunks of `config.chunk_size` rows and writes each
/// chunk as one row group of `parquet_path`. The destination is created on
/// the first chunk and overwritten if it already exists. Any error aborts
/// the run; a partially written destination is left behind.
///
/// A source with a valid header but no data rows still produces a readable
/// Parquet file carrying the declared schema and zero rows.
pub fn convert_csv_to_parquet<P1, P2>(
    csv_path: P1,
    parquet_path: P2,
    schema: &SchemaSpec,
    config: ConvertConfig,
    progress_callback: Option<ProgressCallback>,
) -> Result<ConvertStats>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let csv_path = csv_path.as_ref();
    let parquet_path = parquet_path.as_ref();

    if config.chunk_size == 0 {
        return Err(ConfigError::InvalidChunkSize {
            size: config.chunk_size,
        }
        .into());
    }

    info!(
        "Converting {} -> {} (chunk size {})",
        csv_path.display(),
        parquet_path.display(),
        config.chunk_size
    );

    let reader = ChunkedReader::open(csv_path, schema, config.chunk_size)?;
    let projection = reader.projection().clone();

    let props = writer_properties(config.chunk_size);
    let mut writer = ChunkWriter::new(parquet_path, props);

    let mut rows_written: u64 = 0;
    let mut chunks_written: u64 = 0;

    for chunk_result in reader {
        let chunk = chunk_result?;
        debug!("Coercing chunk {} ({} rows)", chunk.index, chunk.len());

        let batch = coerce_chunk(schema, &projection, &chunk)?;
        writer.append(&batch)?;

        rows_written += batch.num_rows() as u64;
        chunks_written += 1;

        if let Some(ref cb) = progress_callback {
            cb(chunks_written, rows_written);
        }
    }

    // Header-only source: write an empty batch so the destination is still
    // a valid Parquet file with the declared schema
    if writer.state() == WriterState::Uninitialized {
        info!("No data rows in source; writing schema-only Parquet file");
        let empty = RecordBatch::new_empty(schema.arrow_schema());
        writer.append(&empty)?;
    }

    writer.finish()?;

    let bytes_written = fs::metadata(parquet_path).map(|m| m.len()).unwrap_or(0);

    if let Some(cb) = progress_callback {
        cb(chunks_written, rows_written);
    }

    info!(
        "Conversion complete: {} rows in {} chunks ({} bytes)",
        rows_written, chunks_written, bytes_written
    );

    Ok(ConvertStats {
        rows_written,
        chunks_written,
        bytes_written,
    })
}
