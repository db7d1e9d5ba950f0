//! Per-field filter criteria and the row predicate they define.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::FieldType;
use crate::model::Row;
use crate::model::Value;

/// An active filter value for one field.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use dispatch_lib::table::FilterValue;
///
/// // Substring match on strings, exact match otherwise
/// let name = FilterValue::scalar("Truck");
///
/// // OR-membership
/// let demand = FilterValue::any_of([3, 8]);
///
/// // Calendar day of an ISO date-time field
/// let date = FilterValue::date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Substring match against string fields, strict equality otherwise.
    Scalar(Value),
    /// Matches when the field equals any listed value; an empty list matches everything.
    AnyOf(Vec<Value>),
    /// Matches ISO date-time strings falling on this calendar day.
    Date(NaiveDate),
}

impl FilterValue {
    /// Creates a scalar filter value.
    pub fn scalar(value: impl Into<Value>) -> Self {
        FilterValue::Scalar(value.into())
    }

    /// Creates an OR-membership filter value.
    pub fn any_of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        FilterValue::AnyOf(values.into_iter().map(Into::into).collect())
    }

    /// Creates a calendar-day filter value.
    pub fn date(date: NaiveDate) -> Self {
        FilterValue::Date(date)
    }

    /// A scalar `null` constrains nothing.
    pub fn is_active(&self) -> bool {
        !matches!(self, FilterValue::Scalar(Value::Null))
    }

    /// Tests one field value (`None` when the row lacks the field).
    pub fn matches(&self, field: Option<&Value>) -> bool {
        match self {
            FilterValue::AnyOf(values) => {
                values.is_empty()
                    || field.is_some_and(|field| values.iter().any(|v| v.strict_eq(field)))
            }
            FilterValue::Date(date) => field
                .and_then(Value::as_datetime)
                .is_some_and(|dt| dt.date_naive() == *date),
            FilterValue::Scalar(Value::Null) => true,
            FilterValue::Scalar(Value::String(needle)) => match field {
                Some(Value::String(haystack)) => haystack.contains(needle.as_str()),
                _ => false,
            },
            FilterValue::Scalar(value) => field.is_some_and(|field| field.strict_eq(value)),
        }
    }

    /// Interprets raw filter-form input according to the field type.
    ///
    /// Returns `None` (inactive) for blank or unparseable input.
    ///
    /// | Field type | Accepted input | Result |
    /// |------------|----------------|--------|
    /// | `Boolean` | `Y`/`N`, `true`/`false`, `yes`/`no` | `Scalar(Bool)` |
    /// | `Int` | integers, comma separated for a list | `Scalar(Int)` / `AnyOf` |
    /// | `Float` | numbers, comma separated for a list | `Scalar(Float)` / `AnyOf` |
    /// | `DateTime` | `YYYY-MM-DD` | `Date` |
    /// | `String` | anything | `Scalar(String)` |
    /// | `Other` | numbers or strings, comma separated for a list | `Scalar` / `AnyOf` |
    pub fn parse(input: &str, field_type: FieldType) -> Option<FilterValue> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        match field_type {
            FieldType::String => Some(FilterValue::scalar(input)),
            FieldType::DateTime => NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(FilterValue::Date),
            _ if input.contains(',') => {
                let values = input
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(|part| parse_scalar(part, field_type))
                    .collect::<Option<Vec<_>>>()?;
                Some(FilterValue::AnyOf(values))
            }
            _ => parse_scalar(input, field_type).map(FilterValue::Scalar),
        }
    }
}

fn parse_scalar(input: &str, field_type: FieldType) -> Option<Value> {
    match field_type {
        FieldType::Int => input.parse::<i64>().ok().map(Value::Int),
        FieldType::Float => input.parse::<f64>().ok().map(Value::Float),
        FieldType::Boolean => match input.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" => Some(Value::Bool(true)),
            "n" | "no" | "false" => Some(Value::Bool(false)),
            _ => None,
        },
        FieldType::String | FieldType::DateTime => Some(Value::from(input)),
        FieldType::Other => Some(
            input
                .parse::<i64>()
                .map(Value::Int)
                .or_else(|_| input.parse::<f64>().map(Value::Float))
                .unwrap_or_else(|_| Value::from(input)),
        ),
    }
}

/// Field name → filter value. Entries holding `None` are inactive.
///
/// # Example
///
/// ```
/// use dispatch_lib::table::{FilterCriteria, FilterValue};
///
/// let criteria = FilterCriteria::new()
///     .with("demand", FilterValue::any_of([3, 8]))
///     .with("name", FilterValue::scalar("Depot"));
///
/// assert!(criteria.is_active());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    entries: BTreeMap<String, Option<FilterValue>>,
}

impl FilterCriteria {
    /// Creates empty criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an active entry (builder pattern).
    pub fn with(mut self, field: impl Into<String>, value: FilterValue) -> Self {
        self.set(field, Some(value));
        self
    }

    /// Sets or deactivates an entry.
    pub fn set(&mut self, field: impl Into<String>, value: Option<FilterValue>) {
        self.entries.insert(field.into(), value);
    }

    /// Returns the active value for a field.
    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.entries
            .get(field)
            .and_then(Option::as_ref)
            .filter(|value| value.is_active())
    }

    /// Adds an inactive entry for every field that has none yet.
    pub fn seed<S: Into<String>>(&mut self, fields: impl IntoIterator<Item = S>) {
        for field in fields {
            self.entries.entry(field.into()).or_insert(None);
        }
    }

    /// Deactivates every entry, keeping the field list.
    pub fn reset(&mut self) {
        for value in self.entries.values_mut() {
            *value = None;
        }
    }

    /// Iterates over every known field name.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over the active entries.
    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().filter_map(|(field, value)| {
            value
                .as_ref()
                .filter(|value| value.is_active())
                .map(|value| (field.as_str(), value))
        })
    }

    /// Returns `true` if any entry constrains rows.
    pub fn is_active(&self) -> bool {
        self.active().next().is_some()
    }

    /// Tests a row against every active entry.
    pub fn matches(&self, row: &Row) -> bool {
        self.active().all(|(field, value)| value.matches(row.get(field)))
    }
}

/// Narrows rows to those matching every active criteria entry, keeping order.
pub fn filter<'a, I>(rows: I, criteria: &FilterCriteria) -> Vec<&'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    let active: Vec<(&str, &FilterValue)> = criteria.active().collect();
    rows.into_iter()
        .filter(|row| active.iter().all(|(field, value)| value.matches(row.get(field))))
        .collect()
}
