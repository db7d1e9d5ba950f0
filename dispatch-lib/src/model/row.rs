//! Dynamic resource row

use chrono::DateTime;
use chrono::FixedOffset;
use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::FieldError;

/// Name of the mandatory identifier field.
pub const ID_FIELD: &str = "id";

/// Unique identifier of a row, numeric or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Numeric identifier (the backend's auto-increment keys).
    Int(i64),
    /// String identifier.
    Str(String),
}

impl RowId {
    /// Converts a field value into an identifier.
    ///
    /// Only integers (or integral floats) and strings qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(RowId::Int(*n)),
            Value::Float(n) if n.fract() == 0.0 && n.is_finite() => Some(RowId::Int(*n as i64)),
            Value::String(s) => Some(RowId::Str(s.clone())),
            _ => None,
        }
    }

    /// Returns the identifier as a field value.
    pub fn to_value(&self) -> Value {
        match self {
            RowId::Int(n) => Value::Int(*n),
            RowId::Str(s) => Value::String(s.clone()),
        }
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{}", n),
            RowId::Str(s) => f.write_str(s),
        }
    }
}

impl std::str::FromStr for RowId {
    type Err = std::convert::Infallible;

    /// Parses integers as [`RowId::Int`], anything else as [`RowId::Str`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<i64>()
            .map(RowId::Int)
            .unwrap_or_else(|_| RowId::Str(s.to_string())))
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        RowId::Int(v)
    }
}

impl From<i32> for RowId {
    fn from(v: i32) -> Self {
        RowId::Int(v as i64)
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        RowId::Str(v.to_string())
    }
}

impl From<String> for RowId {
    fn from(v: String) -> Self {
        RowId::Str(v)
    }
}

/// One record of a back office resource (task, vehicle, job, ...).
///
/// Fields keep the order in which they were inserted (or appeared in the
/// JSON document), which is the order columns are rendered in. The `id`
/// field is always present and always first.
///
/// # Example
///
/// ```
/// use dispatch_lib::model::Row;
///
/// let row = Row::new(1)
///     .set("demand", 5)
///     .set("name", "Depot A");
///
/// assert_eq!(row.get_int("demand").unwrap(), Some(5));
/// assert_eq!(row.field_names().collect::<Vec<_>>(), ["id", "demand", "name"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub(crate) id: RowId,
    pub(crate) fields: Vec<(String, Value)>,
}

impl Row {
    /// Creates a row holding only its identifier.
    pub fn new(id: impl Into<RowId>) -> Self {
        let id = id.into();
        Self {
            fields: vec![(ID_FIELD.to_string(), id.to_value())],
            id,
        }
    }

    /// Returns the row identifier.
    pub fn id(&self) -> &RowId {
        &self.id
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the row contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Iterates over `(name, value)` pairs in field order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterates over field names in field order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of fields, including `id`.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always `false`: a row holds at least its identifier.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts or replaces a field value, keeping its position.
    ///
    /// Writing `id` replaces the identifier when the value is a valid
    /// [`RowId`]; other values are ignored for `id`.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();

        if field == ID_FIELD {
            match RowId::from_value(&value) {
                Some(id) => self.id = id,
                None => {
                    log::warn!("ignoring non-identifier value for `id`: {}", value.type_name());
                    return;
                }
            }
        }

        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Removes a field and returns its value. The identifier cannot be removed.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        if field == ID_FIELD {
            return None;
        }
        let index = self.fields.iter().position(|(name, _)| name == field)?;
        Some(self.fields.remove(index).1)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::wrong_type(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::wrong_type(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::wrong_type(field, "int", other.type_name())),
        }
    }

    /// Gets a floating point field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)), // Allow widening
            Some(other) => Err(FieldError::wrong_type(field, "float", other.type_name())),
        }
    }

    /// Gets an ISO-8601 date-time field value.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<FixedOffset>>, FieldError> {
        match self.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_datetime()
                .map(Some)
                .ok_or_else(|| FieldError::wrong_type(field, "datetime", value.type_name())),
        }
    }
}

/// Field values for a row that does not exist yet.
///
/// The backend assigns identifiers on create, so a draft has no `id`.
///
/// # Example
///
/// ```
/// use dispatch_lib::model::RowDraft;
///
/// let task = RowDraft::new()
///     .set("latitude", 55.75)
///     .set("longitude", 37.61)
///     .set("demand", 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowDraft {
    pub(crate) fields: Vec<(String, Value)>,
}

impl RowDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value (builder pattern). `id` is dropped.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts or replaces a field value. `id` is dropped.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        if field == ID_FIELD {
            return;
        }
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Iterates over `(name, value)` pairs in field order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl From<&Row> for RowDraft {
    /// Copies every field except the identifier, as sent with updates.
    fn from(row: &Row) -> Self {
        Self {
            fields: row
                .fields
                .iter()
                .filter(|(name, _)| name != ID_FIELD)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_row_has_identifier_field_first() {
        let row = Row::new(7).set("name", "Van");
        assert_eq!(row.id(), &RowId::Int(7));
        assert_eq!(row.get(ID_FIELD), Some(&Value::Int(7)));
        assert_eq!(row.field_names().next(), Some("id"));
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut row = Row::new(1).set("a", 1).set("b", 2);
        row.insert("a", 10);
        assert_eq!(row.field_names().collect::<Vec<_>>(), ["id", "a", "b"]);
        assert_eq!(row.get_int("a").unwrap(), Some(10));
    }

    #[test]
    fn test_identifier_updates_and_cannot_be_removed() {
        let mut row = Row::new(1);
        row.insert("id", "abc");
        assert_eq!(row.id(), &RowId::Str("abc".to_string()));

        row.insert("id", true);
        assert_eq!(row.id(), &RowId::Str("abc".to_string()));

        assert_eq!(row.remove("id"), None);
        assert!(row.contains("id"));
    }

    #[test]
    fn test_typed_getters() {
        let row = Row::new(1)
            .set("capacity", 12)
            .set("name", "Truck")
            .set("completed", Value::Null)
            .set("createdAt", "2024-01-02T03:04:05.000Z");

        assert_eq!(row.get_float("capacity").unwrap(), Some(12.0));
        assert_eq!(row.get_bool("completed").unwrap(), None);
        assert!(matches!(
            row.get_int("name"),
            Err(FieldError::WrongType { .. })
        ));
        assert!(matches!(row.get_string("missing"), Err(FieldError::Missing { .. })));
        assert!(row.get_datetime("createdAt").unwrap().is_some());
        assert!(row.get_datetime("name").is_err());
    }

    #[test]
    fn test_draft_drops_identifier() {
        let row = Row::new(3).set("name", "Van").set("capacity", 4);
        let draft = RowDraft::from(&row).set("id", 9);
        assert_eq!(
            draft.fields().map(|(name, _)| name).collect::<Vec<_>>(),
            ["name", "capacity"]
        );
    }

    #[test]
    fn test_row_id_parse() {
        assert_eq!(" 42 ".parse::<RowId>().unwrap(), RowId::Int(42));
        assert_eq!("v-1".parse::<RowId>().unwrap(), RowId::Str("v-1".to_string()));
    }
}
