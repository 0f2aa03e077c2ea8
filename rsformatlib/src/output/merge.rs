//! Vertical cell merging (rowspans) for leading columns.
//!
//! Each of the first `depth` columns is merged on its own: a run of
//! row-adjacent equal values in that column collapses into one cell, no
//! matter what the neighbouring columns hold. Adjacent merged columns can
//! therefore end their spans at different rows.
//!
//! Equality is strict: numbers compare by value (`1` and `1.0` merge), and
//! an explicit null never merges with a missing key.

use std::borrow::Cow;

use crate::data::Value;
use crate::query::ProcessedRow;

/// How a cell is emitted in a merged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSpan {
    /// Emit the cell, covering this many rows
    Emit(usize),
    /// Covered by a cell above; emit nothing
    Suppressed,
}

/// Span layout for the merged columns of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    /// Number of merged leading columns
    pub depth: usize,
    /// `spans[col][row]` for each merged column
    spans: Vec<Vec<CellSpan>>,
}

impl MergePlan {
    /// Compute spans over `rows` for the first `depth` columns.
    ///
    /// `depth` is limited to the number of columns; zero disables merging.
    pub fn compute(rows: &[ProcessedRow<'_>], columns: &[String], depth: usize) -> Self {
        let depth = depth.min(columns.len());
        let spans = columns[..depth]
            .iter()
            .map(|column| {
                let values: Vec<Option<Cow<'_, Value>>> =
                    rows.iter().map(|r| r.lookup(column)).collect();
                column_spans(&values)
            })
            .collect();
        MergePlan { depth, spans }
    }

    /// Span of the cell at (`row`, `col`).
    pub fn span_at(&self, row: usize, col: usize) -> CellSpan {
        self.spans
            .get(col)
            .and_then(|column| column.get(row))
            .copied()
            .unwrap_or(CellSpan::Emit(1))
    }

    /// Lengths of the emitted spans in column `col`, top to bottom.
    pub fn span_lengths(&self, col: usize) -> Vec<usize> {
        self.spans
            .get(col)
            .map(|column| {
                column
                    .iter()
                    .filter_map(|span| match span {
                        CellSpan::Emit(n) => Some(*n),
                        CellSpan::Suppressed => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Whether two adjacent cells hold the same value for merging.
fn same_cell(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Spans for one column: each maximal run of equal values is one cell.
fn column_spans(values: &[Option<Cow<'_, Value>>]) -> Vec<CellSpan> {
    let mut spans = vec![CellSpan::Suppressed; values.len()];
    let mut start = 0;
    while start < values.len() {
        let mut end = start + 1;
        while end < values.len() && same_cell(values[end].as_deref(), values[start].as_deref()) {
            end += 1;
        }
        spans[start] = CellSpan::Emit(end - start);
        start = end;
    }
    spans
}
