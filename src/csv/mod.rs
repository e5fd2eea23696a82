//! CSV source module
//!
//! Streams the source dump in bounded row chunks and coerces each chunk to
//! the declared column schema.
//!
//! # Module Structure
//!
//! - `reader`: chunked streaming reader with header/schema projection
//! - `coerce`: raw chunk → typed Arrow `RecordBatch` coercion

pub mod coerce;
pub mod reader;

pub use coerce::{coerce_chunk, parse_timestamp_micros};
pub use reader::{ChunkedReader, Projection, RowChunk};
