//! Column sorting: header-click state machine and type-aware comparator.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::data::Value;

use super::augment::ProcessedRow;
use super::options::SortDirection;

/// Active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Column the sort applies to
    pub column: Option<String>,
    /// Sort direction; `None` leaves rows in filtered order
    pub direction: SortDirection,
}

/// Per-header indicator shown in the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortIndicator {
    None,
    Ascending,
    Descending,
}

impl SortState {
    /// Sort by `column` in `direction`.
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    /// State after clicking the header of `column`.
    ///
    /// A new column starts ascending; the same column cycles
    /// ascending → descending → unsorted → ascending.
    pub fn toggle(&self, column: &str) -> SortState {
        match &self.column {
            Some(current) if current == column => SortState {
                column: Some(current.clone()),
                direction: self.direction.cycle(),
            },
            _ => SortState::new(column, SortDirection::Asc),
        }
    }

    /// Whether rows should be reordered at all.
    pub fn is_active(&self) -> bool {
        self.column.is_some() && self.direction != SortDirection::None
    }

    /// Indicator for the header of `column`.
    pub fn indicator_for(&self, column: &str) -> SortIndicator {
        if self.column.as_deref() != Some(column) {
            return SortIndicator::None;
        }
        match self.direction {
            SortDirection::None => SortIndicator::None,
            SortDirection::Asc => SortIndicator::Ascending,
            SortDirection::Desc => SortIndicator::Descending,
        }
    }
}

/// Compare two cell values for sorting.
///
/// Nulls go last in both directions; numbers compare numerically; anything
/// else compares case-insensitively by its string form. Only the non-null
/// comparisons are flipped for descending order.
pub fn compare_values(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }
    let ordering = match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a
            .to_display_string()
            .to_lowercase()
            .cmp(&b.to_display_string().to_lowercase()),
    };
    match direction {
        SortDirection::Desc => ordering.reverse(),
        _ => ordering,
    }
}

/// Stable in-place sort of processed rows by the active sort state.
///
/// `compare_values` is not a total order on mixed number/text columns, so
/// this does not go through `slice::sort_by`.
pub fn sort_rows(rows: &mut [ProcessedRow<'_>], state: &SortState) {
    let Some(column) = state.column.as_deref() else {
        return;
    };
    if state.direction == SortDirection::None {
        return;
    }
    merge_sort_by(rows, &mut |a: &ProcessedRow<'_>, b: &ProcessedRow<'_>| {
        compare_values(&a.value(column), &b.value(column), state.direction)
    });
}

/// Top-down merge sort; takes from the right run only on a strict `Less`.
fn merge_sort_by<T, F>(items: &mut [T], compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    merge_sort_by(&mut items[..mid], compare);
    merge_sort_by(&mut items[mid..], compare);

    let mut merged = Vec::with_capacity(len);
    let (mut left, mut right) = (0, mid);
    while left < mid && right < len {
        if compare(&items[right], &items[left]) == Ordering::Less {
            merged.push(items[right]);
            right += 1;
        } else {
            merged.push(items[left]);
            left += 1;
        }
    }
    merged.extend_from_slice(&items[left..mid]);
    merged.extend_from_slice(&items[right..]);
    items.copy_from_slice(&merged);
}
