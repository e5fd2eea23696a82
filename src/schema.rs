//! Declared column schema for the conversion
//!
//! Single source of truth for the column → type mapping. The schema is an
//! explicit, immutable value passed into the converter rather than
//! module-level state, so it can be varied per invocation and unit-tested
//! independently of the streaming loop.

use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use std::sync::Arc;

/// Semantic type of a declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Unsigned 32-bit integer (count/identifier fields)
    UInt32,
    /// Free-form text
    Text,
    /// Naive timestamp, stored as microseconds since the Unix epoch
    Timestamp,
}

impl ColumnKind {
    /// The Arrow rendering of this kind.
    pub fn arrow_type(&self) -> DataType {
        match self {
            ColumnKind::UInt32 => DataType::UInt32,
            ColumnKind::Text => DataType::Utf8,
            ColumnKind::Timestamp => DataType::Timestamp(TimeUnit::Microsecond, None),
        }
    }
}

/// A single declared column: name plus semantic type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Ordered, immutable set of declared columns governing every chunk.
///
/// The Arrow schema is precomputed at construction; every coerced chunk's
/// `RecordBatch` carries exactly this schema. All fields are nullable since
/// any source field may be empty.
#[derive(Debug, Clone)]
pub struct SchemaSpec {
    columns: Vec<ColumnSpec>,
    arrow: SchemaRef,
}

impl SchemaSpec {
    /// Build a schema from an explicit column list.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        let fields: Vec<Field> = columns
            .iter()
            .map(|col| Field::new(&col.name, col.kind.arrow_type(), true))
            .collect();
        let arrow = Arc::new(Schema::new(fields));
        Self { columns, arrow }
    }

    /// The built-in schema for WhatIsMyBrowser.com user-agent database dumps.
    ///
    /// 39 columns in the order the upstream database documents its fields:
    /// two unsigned integer columns (`id`, `times_seen`), 34 text columns,
    /// and the three `*_at` timestamp columns.
    pub fn user_agent_database() -> Self {
        use ColumnKind::{Text, Timestamp, UInt32};

        let columns = [
            ("id", UInt32),
            ("user_agent", Text),
            ("times_seen", UInt32),
            ("simple_software_string", Text),
            ("simple_sub_description_string", Text),
            ("simple_operating_platform_string", Text),
            ("software", Text),
            ("software_name", Text),
            ("software_name_code", Text),
            ("software_version", Text),
            ("software_version_full", Text),
            ("operating_system", Text),
            ("operating_system_name", Text),
            ("operating_system_name_code", Text),
            ("operating_system_version", Text),
            ("operating_system_version_full", Text),
            ("operating_system_flavour", Text),
            ("operating_system_flavour_code", Text),
            ("operating_system_frameworks", Text),
            ("operating_platform", Text),
            ("operating_platform_code", Text),
            ("operating_platform_code_name", Text),
            ("operating_platform_vendor_name", Text),
            ("software_type", Text),
            ("software_sub_type", Text),
            ("software_type_specific", Text),
            ("hardware_type", Text),
            ("hardware_sub_type", Text),
            ("hardware_sub_sub_type", Text),
            ("hardware_type_specific", Text),
            ("layout_engine_name", Text),
            ("layout_engine_version", Text),
            ("extra_info", Text),
            ("extra_info_dict", Text),
            ("capabilities", Text),
            ("detected_addons", Text),
            ("first_seen_at", Timestamp),
            ("last_seen_at", Timestamp),
            ("updated_at", Timestamp),
        ];

        Self::new(
            columns
                .into_iter()
                .map(|(name, kind)| ColumnSpec::new(name, kind))
                .collect(),
        )
    }

    /// The Arrow schema descriptor governing every chunk.
    pub fn arrow_schema(&self) -> SchemaRef {
        Arc::clone(&self.arrow)
    }

    /// The declared columns, in order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Look up the declared kind of a column by name.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|col| col.name == name)
            .map(|col| col.kind)
    }

    /// Number of declared columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if no columns are declared.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_database_has_39_columns() {
        let schema = SchemaSpec::user_agent_database();
        assert_eq!(schema.len(), 39);
        assert_eq!(schema.arrow_schema().fields().len(), 39);
    }

    #[test]
    fn test_user_agent_database_column_kinds() {
        let schema = SchemaSpec::user_agent_database();

        assert_eq!(schema.kind_of("id"), Some(ColumnKind::UInt32));
        assert_eq!(schema.kind_of("times_seen"), Some(ColumnKind::UInt32));
        assert_eq!(schema.kind_of("user_agent"), Some(ColumnKind::Text));
        assert_eq!(schema.kind_of("first_seen_at"), Some(ColumnKind::Timestamp));
        assert_eq!(schema.kind_of("last_seen_at"), Some(ColumnKind::Timestamp));
        assert_eq!(schema.kind_of("updated_at"), Some(ColumnKind::Timestamp));
        assert_eq!(schema.kind_of("no_such_column"), None);

        let uint_count = schema
            .columns()
            .iter()
            .filter(|c| c.kind == ColumnKind::UInt32)
            .count();
        let timestamp_count = schema
            .columns()
            .iter()
            .filter(|c| c.kind == ColumnKind::Timestamp)
            .count();
        let text_count = schema
            .columns()
            .iter()
            .filter(|c| c.kind == ColumnKind::Text)
            .count();

        assert_eq!(uint_count, 2);
        assert_eq!(timestamp_count, 3);
        assert_eq!(text_count, 34);
    }

    #[test]
    fn test_user_agent_database_column_order() {
        let schema = SchemaSpec::user_agent_database();
        let names: Vec<&str> = schema
            .columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        assert_eq!(names[0], "id");
        assert_eq!(names[1], "user_agent");
        assert_eq!(names[2], "times_seen");
        assert_eq!(names[36], "first_seen_at");
        assert_eq!(names[37], "last_seen_at");
        assert_eq!(names[38], "updated_at");
    }

    #[test]
    fn test_arrow_schema_types_and_nullability() {
        let schema = SchemaSpec::user_agent_database();
        let arrow = schema.arrow_schema();

        for field in arrow.fields() {
            assert!(field.is_nullable(), "Field '{}' must be nullable", field.name());
        }

        assert_eq!(
            arrow.field_with_name("id").unwrap().data_type(),
            &DataType::UInt32
        );
        assert_eq!(
            arrow.field_with_name("user_agent").unwrap().data_type(),
            &DataType::Utf8
        );
        assert_eq!(
            arrow.field_with_name("updated_at").unwrap().data_type(),
            &DataType::Timestamp(TimeUnit::Microsecond, None)
        );
    }

    #[test]
    fn test_custom_schema() {
        let schema = SchemaSpec::new(vec![
            ColumnSpec::new("id", ColumnKind::UInt32),
            ColumnSpec::new("name", ColumnKind::Text),
        ]);

        assert_eq!(schema.len(), 2);
        assert!(!schema.is_empty());
        assert_eq!(schema.kind_of("name"), Some(ColumnKind::Text));
        assert_eq!(schema.arrow_schema().fields().len(), 2);
    }
}
