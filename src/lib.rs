//! uadb2parquet - User-Agent Database CSV to Parquet Converter
//!
//! Converts WhatIsMyBrowser.com user-agent database CSV dumps into
//! Snappy-compressed Parquet files. Dumps run to tens of millions of rows,
//! so the conversion streams fixed-size chunks instead of loading the file,
//! keeping memory flat regardless of dump size.
//!
//! # Features
//!
//! - **Fixed schema**: The 39-column user-agent layout is declared up front.
//!   Counter columns become nullable unsigned 32-bit integers, date columns
//!   become microsecond timestamps, everything else is nullable text.
//!
//! - **Chunked streaming**: Rows are read 100,000 at a time; each chunk is
//!   coerced to an Arrow `RecordBatch` and written as one Parquet row group.
//!
//! - **Strict on counters, lenient on dates**: A non-integer value in a
//!   counter column aborts the run with the column, line, and offending
//!   value. An unparseable date simply becomes null.
//!
//! - **Ordered output**: Processing is sequential, so destination row order
//!   always equals source row order.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────┐     ┌───────────────────┐     ┌───────────────────┐
//! │    CSV dump    │     │   ChunkedReader   │     │   coerce_chunk    │
//! │ (39+ columns)  │────▶│  100k-row chunks  │────▶│   CSV → Arrow     │
//! └────────────────┘     └───────────────────┘     └─────────┬─────────┘
//!                                                            │ RecordBatch
//!                                                            ▼
//!                        ┌───────────────────┐     ┌───────────────────┐
//!                        │   Parquet file    │     │    ChunkWriter    │
//!                        │ (Snappy, one row  │◀────│   lazy create,    │
//!                        │  group per chunk) │     │   schema pinned   │
//!                        └───────────────────┘     └───────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Convert a dump
//! uadb2parquet user-agent-database.csv user-agent-database.parquet
//!
//! # Query the result
//! duckdb -c "SELECT software_name, COUNT(*) FROM 'user-agent-database.parquet'
//!            GROUP BY 1 ORDER BY 2 DESC LIMIT 20"
//! ```

pub mod config;
pub mod csv;
pub mod error;
pub mod parquet;
pub mod progress;
pub mod schema;

pub use crate::config::{CliArgs, ConvertConfig};
pub use crate::csv::{ChunkedReader, Projection, RowChunk};
pub use crate::error::{ConvertError, Result};
pub use crate::parquet::{
    convert_csv_to_parquet, ChunkWriter, ConvertStats, ProgressCallback, WriterState,
};
pub use crate::schema::{ColumnKind, ColumnSpec, SchemaSpec};
