//! Typed column access on rows

/// A typed getter on [`Row`](crate::model::Row) could not produce a value.
///
/// Rows coming from the backend are loosely shaped: a column may be absent
/// from one row and present in the next, or hold a different kind of value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("Row has no column '{field}'")]
    Missing { field: String },

    /// The column holds a value of another kind, e.g. text where a number
    /// was asked for.
    #[error("Column '{field}' holds {actual}, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn wrong_type(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::WrongType {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Column the getter was asked for.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::WrongType { field, .. } => field,
        }
    }
}
