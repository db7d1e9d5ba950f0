//! Field metadata returned next to each resource collection

use serde::Deserialize;
use serde::Serialize;

use crate::table::FilterValue;

/// Scalar type of a field, as reported by the backend model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `Int`
    Int,
    /// `Float`
    Float,
    /// `String`
    String,
    /// `Boolean`
    Boolean,
    /// `DateTime`
    DateTime,
    /// Relations, JSON columns and anything unrecognized.
    Other,
}

impl FieldType {
    /// Maps the backend's type name onto a [`FieldType`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Int" | "BigInt" => FieldType::Int,
            "Float" | "Decimal" => FieldType::Float,
            "String" => FieldType::String,
            "Boolean" => FieldType::Boolean,
            "DateTime" => FieldType::DateTime,
            _ => FieldType::Other,
        }
    }
}

/// Describes one field of a resource.
///
/// The table engine never reads this; it drives rendering and tells the
/// filter form how to interpret what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMeta {
    /// Field name.
    pub name: String,
    /// Field kind (`scalar`, `object`, `enum`).
    pub kind: String,
    /// Backend type name (`Int`, `Float`, `String`, `Boolean`, `DateTime`, ...).
    #[serde(rename = "type")]
    pub type_name: String,
}

impl FieldMeta {
    /// Creates field metadata for a scalar field.
    pub fn scalar(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "scalar".to_string(),
            type_name: type_name.into(),
        }
    }

    /// Returns the parsed field type.
    pub fn field_type(&self) -> FieldType {
        FieldType::from_name(&self.type_name)
    }

    /// Interprets raw filter-form input for this field.
    ///
    /// See [`FilterValue::parse`] for the accepted formats.
    pub fn parse_filter_input(&self, input: &str) -> Option<FilterValue> {
        FilterValue::parse(input, self.field_type())
    }
}
