//! Chunk coercion
//!
//! Converts one raw [`RowChunk`] into a typed Arrow `RecordBatch` under the
//! declared schema. Integer coercion is strict: a non-numeric, negative, or
//! out-of-range value aborts the whole run. Empty fields become nulls in
//! every column kind, and an unparseable timestamp becomes a null rather
//! than an error, matching the lenient date handling of the upstream dumps.

use crate::csv::reader::{Projection, RowChunk};
use crate::error::{CoercionError, CoercionResult};
use crate::schema::{ColumnKind, SchemaSpec};
use arrow::array::{ArrayRef, StringBuilder, TimestampMicrosecondBuilder, UInt32Builder};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::sync::Arc;

/// Datetime formats tried in order after RFC 3339.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Date-only formats, parsed as midnight UTC.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Coerce every declared column of `chunk` to its schema type.
///
/// The resulting batch always carries `schema.arrow_schema()` and one row
/// per source record. Independent of the streaming loop so it can be tested
/// on its own.
pub fn coerce_chunk(
    schema: &SchemaSpec,
    projection: &Projection,
    chunk: &RowChunk,
) -> CoercionResult<RecordBatch> {
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.len());

    for (pos, col) in schema.columns().iter().enumerate() {
        let source_index = projection.source_index(pos);
        let array = match col.kind {
            ColumnKind::UInt32 => coerce_uint32(&col.name, source_index, &chunk.records)?,
            ColumnKind::Text => coerce_text(source_index, &chunk.records),
            ColumnKind::Timestamp => coerce_timestamp(source_index, &chunk.records),
        };
        columns.push(array);
    }

    RecordBatch::try_new(schema.arrow_schema(), columns).map_err(CoercionError::Arrow)
}

/// Parse a timestamp field into microseconds since the Unix epoch.
///
/// Tolerates RFC 3339 plus the common interchange formats the dumps use
/// (`YYYY-MM-DD HH:MM:SS[.fff]` with space or `T` separator, minute-only
/// times, `MM/DD/YYYY`, and bare dates). Returns `None` when the value does
/// not parse as any of them.
pub fn parse_timestamp_micros(value: &str) -> Option<i64> {
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_micros());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc().timestamp_micros());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_micros());
        }
    }

    None
}

fn coerce_uint32(
    column: &str,
    source_index: usize,
    records: &[StringRecord],
) -> CoercionResult<ArrayRef> {
    let mut builder = UInt32Builder::with_capacity(records.len());

    for record in records {
        let field = record.get(source_index).unwrap_or("");
        let trimmed = field.trim();

        if trimmed.is_empty() {
            builder.append_null();
            continue;
        }

        match trimmed.parse::<u32>() {
            Ok(value) => builder.append_value(value),
            Err(e) => {
                return Err(CoercionError::InvalidInteger {
                    column: column.to_string(),
                    line: record_line(record),
                    value: field.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(Arc::new(builder.finish()))
}

fn coerce_text(source_index: usize, records: &[StringRecord]) -> ArrayRef {
    let mut builder = StringBuilder::with_capacity(records.len(), records.len() * 16);

    for record in records {
        match record.get(source_index) {
            Some(field) if !field.is_empty() => builder.append_value(field),
            _ => builder.append_null(),
        }
    }

    Arc::new(builder.finish())
}

fn coerce_timestamp(source_index: usize, records: &[StringRecord]) -> ArrayRef {
    let mut builder = TimestampMicrosecondBuilder::with_capacity(records.len());

    for record in records {
        let field = record.get(source_index).unwrap_or("").trim();
        match parse_timestamp_micros(field) {
            Some(micros) => builder.append_value(micros),
            None => builder.append_null(),
        }
    }

    Arc::new(builder.finish())
}

/// Source line of a record, 1-based (0 when the record carries no position).
fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
