//! Chunked CSV reader
//!
//! Reads the source file as a finite sequence of bounded row chunks, keeping
//! memory proportional to the chunk size rather than the input size. The
//! sequence is lazy and restartable only from the top: once a chunk has been
//! yielded the reader cannot seek back to it.

use crate::error::{CsvError, CsvResult};
use crate::schema::SchemaSpec;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Mapping from declared schema positions to source CSV field indices.
///
/// Resolved once from the header row. Every declared column must be present
/// in the header; extra source columns are simply never projected.
#[derive(Debug, Clone)]
pub struct Projection {
    indices: Vec<usize>,
}

impl Projection {
    /// Resolve the projection for `schema` against a header row.
    ///
    /// Fails with [`CsvError::MissingColumns`] listing every declared column
    /// the header does not contain (case-sensitive match).
    pub fn resolve(header: &StringRecord, schema: &SchemaSpec) -> CsvResult<Self> {
        let mut indices = Vec::with_capacity(schema.len());
        let mut missing = Vec::new();

        for col in schema.columns() {
            match header.iter().position(|field| field == col.name) {
                Some(index) => indices.push(index),
                None => missing.push(col.name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(CsvError::MissingColumns { missing });
        }

        Ok(Self { indices })
    }

    /// Source field index for the column at `schema_pos`.
    ///
    /// `schema_pos` must be a valid position in the schema this projection
    /// was resolved for.
    pub fn source_index(&self, schema_pos: usize) -> usize {
        self.indices[schema_pos]
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// A bounded batch of raw source records, in document order.
///
/// Ephemeral: produced by one iteration of the reader, consumed by the
/// coercion step, then dropped.
#[derive(Debug)]
pub struct RowChunk {
    /// Zero-based chunk index within the stream
    pub index: usize,

    /// Raw records, at most `chunk_size` of them
    pub records: Vec<StringRecord>,
}

impl RowChunk {
    /// Number of records in this chunk.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the chunk holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Streaming reader yielding successive [`RowChunk`]s of at most
/// `chunk_size` records each.
///
/// Opening the reader validates the header against the declared schema and
/// resolves the [`Projection`]. Iteration then consumes the underlying file
/// front to back exactly once; a malformed record (ragged row, invalid
/// UTF-8) surfaces as a fatal error and ends the stream.
#[derive(Debug)]
pub struct ChunkedReader {
    reader: csv::Reader<File>,
    projection: Projection,
    chunk_size: usize,
    next_index: usize,
    done: bool,
}

impl ChunkedReader {
    /// Open `path` and validate its header against `schema`.
    ///
    /// `chunk_size` must be at least 1; the converter validates this before
    /// constructing a reader.
    pub fn open<P: AsRef<Path>>(
        path: P,
        schema: &SchemaSpec,
        chunk_size: usize,
    ) -> CsvResult<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| CsvError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut reader = ReaderBuilder::new().from_reader(file);
        let header = reader.headers().map_err(CsvError::Header)?.clone();
        let projection = Projection::resolve(&header, schema)?;

        debug!(
            "Opened CSV '{}': {} header fields, {} projected",
            path.display(),
            header.len(),
            projection.len()
        );

        Ok(Self {
            reader,
            projection,
            chunk_size,
            next_index: 0,
            done: false,
        })
    }

    /// The projection resolved from the header row.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }
}

impl Iterator for ChunkedReader {
    type Item = CsvResult<RowChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut records = Vec::with_capacity(self.chunk_size.min(8192));

        while records.len() < self.chunk_size {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => records.push(record),
                Ok(false) => {
                    self.done = true;
                    break;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(CsvError::Read(e)));
                }
            }
        }

        if records.is_empty() {
            return None;
        }

        let chunk = RowChunk {
            index: self.next_index,
            records,
        };
        self.next_index += 1;
        Some(Ok(chunk))
    }
}
