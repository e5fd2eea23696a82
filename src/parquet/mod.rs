//! Parquet sink module
//!
//! Appends coerced chunks to a single Snappy-compressed Parquet file.
//!
//! # Module Structure
//!
//! - `writer`: stateful append-only Parquet writer with an explicit lifecycle
//! - `convert`: CSV → Parquet streaming conversion driver

pub mod convert;
pub mod writer;

pub use convert::{convert_csv_to_parquet, ConvertStats, ProgressCallback};
pub use writer::{writer_properties, ChunkWriter, WriterState};
