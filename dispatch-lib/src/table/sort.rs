//! Single-field row ordering.

use std::cmp::Ordering;

use crate::model::Row;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// The active sort column. At most one field is sorted on at a time.
///
/// # Example
///
/// ```
/// use dispatch_lib::table::{Direction, SortState};
///
/// let sort = SortState::asc("demand");
/// assert_eq!(sort.toggled("demand"), SortState::desc("demand"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortState {
    /// Field to sort by.
    pub field: String,
    /// Direction to sort in.
    pub direction: Direction,
}

impl SortState {
    /// Creates a sort state.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Creates an ascending sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Asc)
    }

    /// Creates a descending sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Desc)
    }

    /// Returns the state after a click on the `field` column header.
    ///
    /// The direction flips on every click. Clicking a different column
    /// switches to it and still flips the direction.
    pub fn toggled(&self, field: &str) -> Self {
        Self::new(field, self.direction.reversed())
    }
}

/// Ascending comparison of two field values.
///
/// - two numbers (`Int`/`Float` mixed freely) compare numerically,
///   `NaN` ties with everything
/// - two strings compare lexicographically, which is chronological for
///   ISO-8601 date-times in one format and zone
/// - two booleans order `false` before `true`
/// - anything else ties, including `null`, missing fields and nested JSON
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(a), Some(b)) => match (a.as_number(), b.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        _ => Ordering::Equal,
    }
}

/// Orders rows by one field, returning a new sequence of references.
///
/// The sort is stable: tied rows keep their input order. Rows lacking the
/// field, or holding a value that cannot be compared with its neighbours,
/// tie with everything.
pub fn sort<'a, I>(rows: I, field: &str, direction: Direction) -> Vec<&'a Row>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut sorted: Vec<&'a Row> = rows.into_iter().collect();
    stable_sort_by(&mut sorted, &|a: &&Row, b: &&Row| {
        direction.apply(compare_values(a.get(field), b.get(field)))
    });
    sorted
}

// The comparator above is not a total order once mixed types are involved
// (a missing value ties with both 1 and 3). The std sorts may panic on such
// comparators, so this is a plain bottom-up merge sort instead.
fn stable_sort_by<T, F>(items: &mut [T], compare: &F)
where
    T: Copy,
    F: Fn(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut buffer = items.to_vec();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge(&items[start..mid], &items[mid..end], &mut buffer[start..end], compare);
            start = end;
        }
        items.copy_from_slice(&buffer);
        width *= 2;
    }
}

fn merge<T, F>(left: &[T], right: &[T], out: &mut [T], compare: &F)
where
    T: Copy,
    F: Fn(&T, &T) -> Ordering,
{
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        let take_left = j >= right.len()
            || (i < left.len() && compare(&left[i], &right[j]) != Ordering::Greater);
        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RowId;

    fn ids(rows: &[&Row]) -> Vec<RowId> {
        rows.iter().map(|row| row.id().clone()).collect()
    }

    fn demand_rows() -> Vec<Row> {
        vec![
            Row::new(1).set("demand", 5),
            Row::new(2).set("demand", 3),
            Row::new(3).set("demand", 8),
        ]
    }

    #[test]
    fn test_sort_numbers() {
        let rows = demand_rows();
        assert_eq!(
            ids(&sort(&rows, "demand", Direction::Asc)),
            [RowId::Int(2), RowId::Int(1), RowId::Int(3)]
        );
        assert_eq!(
            ids(&sort(&rows, "demand", Direction::Desc)),
            [RowId::Int(3), RowId::Int(1), RowId::Int(2)]
        );
    }

    #[test]
    fn test_sort_mixed_int_and_float() {
        let rows = vec![
            Row::new(1).set("capacity", 2.5),
            Row::new(2).set("capacity", 2),
            Row::new(3).set("capacity", 10),
        ];
        assert_eq!(
            ids(&sort(&rows, "capacity", Direction::Asc)),
            [RowId::Int(2), RowId::Int(1), RowId::Int(3)]
        );
    }

    #[test]
    fn test_sort_iso_dates_as_strings() {
        let rows = vec![
            Row::new(1).set("date", "2024-05-01T00:00:00.000Z"),
            Row::new(2).set("date", "2023-12-31T23:59:59.000Z"),
            Row::new(3).set("date", "2024-01-15T08:00:00.000Z"),
        ];
        assert_eq!(
            ids(&sort(&rows, "date", Direction::Asc)),
            [RowId::Int(2), RowId::Int(3), RowId::Int(1)]
        );
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let rows = vec![
            Row::new(1).set("demand", 1),
            Row::new(2).set("demand", 0),
            Row::new(3).set("demand", 1),
            Row::new(4).set("demand", 0),
        ];
        assert_eq!(
            ids(&sort(&rows, "demand", Direction::Asc)),
            [RowId::Int(2), RowId::Int(4), RowId::Int(1), RowId::Int(3)]
        );
        assert_eq!(
            ids(&sort(&rows, "demand", Direction::Desc)),
            [RowId::Int(1), RowId::Int(3), RowId::Int(2), RowId::Int(4)]
        );
    }

    #[test]
    fn test_sort_booleans_false_first() {
        let rows = vec![
            Row::new(1).set("completed", true),
            Row::new(2).set("completed", false),
            Row::new(3).set("completed", true),
        ];
        assert_eq!(
            ids(&sort(&rows, "completed", Direction::Asc)),
            [RowId::Int(2), RowId::Int(1), RowId::Int(3)]
        );
    }

    #[test]
    fn test_sort_missing_field_keeps_input_order() {
        let rows = demand_rows();
        assert_eq!(
            ids(&sort(&rows, "nope", Direction::Desc)),
            [RowId::Int(1), RowId::Int(2), RowId::Int(3)]
        );
    }

    #[test]
    fn test_sort_heterogeneous_values_does_not_panic() {
        let rows: Vec<Row> = (0..64)
            .map(|i| {
                let row = Row::new(i);
                match i % 4 {
                    0 => row.set("mixed", i),
                    1 => row.set("mixed", format!("s{}", i)),
                    2 => row.set("mixed", Value::Null),
                    _ => row,
                }
            })
            .collect();
        let sorted = sort(&rows, "mixed", Direction::Asc);
        assert_eq!(sorted.len(), rows.len());
    }

    #[test]
    fn test_compare_values_rules() {
        let a = Value::Int(1);
        let b = Value::from("1");
        assert_eq!(compare_values(Some(&a), Some(&b)), Ordering::Equal);
        assert_eq!(compare_values(None, Some(&a)), Ordering::Equal);
        assert_eq!(
            compare_values(Some(&Value::Null), Some(&Value::Null)),
            Ordering::Equal
        );
        assert_eq!(
            compare_values(Some(&Value::from("a")), Some(&Value::from("b"))),
            Ordering::Less
        );
    }

    #[test]
    fn test_toggled_flips_direction() {
        let sort = SortState::asc("demand");
        assert_eq!(sort.toggled("demand").direction, Direction::Desc);
        let other = sort.toggled("capacity");
        assert_eq!(other.field, "capacity");
        assert_eq!(other.direction, Direction::Desc);
    }
}
