//! Table-ready data structures for the primary table view.
//!
//! This module provides `TableView`, a presentation-ready structure that a
//! host can walk cell by cell or serialize, plus a markup rendering of it.
//!
//! The data flow is:
//! 1. Raw Data (Dataset)
//! 2. ProcessedDataset (filtered, numbered, sorted)
//! 3. TableView (escaped cell text, rowspans, sort indicators)
//!
//! TableView holds cell content already escaped (and with line breaks
//! converted when requested), so a host can embed it directly.

use serde::{Deserialize, Serialize};

use crate::escape::{escape_cell, escape_markup};
use crate::query::{ProcessedDataset, SortIndicator, SortState, ViewOptions};

use super::markup::{push_cell, HtmlWriter};
use super::merge::{CellSpan, MergePlan};

/// A header cell with its sort indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCell {
    /// Column name (unescaped)
    pub label: String,
    /// Sort indicator for this column
    pub indicator: SortIndicator,
}

/// A body cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Index of the column the cell starts in
    pub column: usize,
    /// Escaped cell content
    pub content: String,
    /// Rows covered by this cell
    pub rowspan: usize,
    /// Columns covered by this cell
    pub colspan: usize,
}

/// A body row. Rows inside a merged span carry fewer cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// Rendered table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    /// Header cells in column order
    pub headers: Vec<HeaderCell>,
    /// Body rows
    pub rows: Vec<TableRow>,
    /// Sort state the indicators were derived from
    pub sort: SortState,
    /// True when the body is the "no matching rows" placeholder
    pub no_matches: bool,
}

impl TableView {
    /// Build the table for `processed`.
    ///
    /// An empty body is replaced by a single placeholder row spanning every
    /// column.
    pub fn render(
        processed: &ProcessedDataset<'_>,
        options: &ViewOptions,
        sort: &SortState,
        no_match_text: &str,
        break_marker: &str,
    ) -> Self {
        let headers: Vec<HeaderCell> = processed
            .columns
            .iter()
            .map(|name| HeaderCell {
                label: name.to_string(),
                indicator: sort.indicator_for(name),
            })
            .collect();

        if processed.is_empty() {
            let placeholder = TableCell {
                column: 0,
                content: escape_markup(no_match_text),
                rowspan: 1,
                colspan: processed.columns.len().max(1),
            };
            return TableView {
                headers,
                rows: vec![TableRow {
                    cells: vec![placeholder],
                }],
                sort: sort.clone(),
                no_matches: true,
            };
        }

        let columns = processed.columns.as_slice();
        let plan = MergePlan::compute(&processed.rows, columns, options.rowspan_depth);
        let rows = processed
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let cells = columns
                    .iter()
                    .enumerate()
                    .filter_map(|(j, column)| match plan.span_at(i, j) {
                        CellSpan::Suppressed => None,
                        CellSpan::Emit(rowspan) => Some(TableCell {
                            column: j,
                            content: escape_cell(
                                &row.value(column).to_display_string(),
                                options.newline_to_break,
                                break_marker,
                            ),
                            rowspan,
                            colspan: 1,
                        }),
                    })
                    .collect();
                TableRow { cells }
            })
            .collect();

        TableView {
            headers,
            rows,
            sort: sort.clone(),
            no_matches: false,
        }
    }

    /// The table as `<table>` markup.
    pub fn to_markup(&self) -> String {
        let mut html = HtmlWriter::table();
        html.open_head();
        for header in &self.headers {
            let mut label = escape_markup(&header.label);
            let mut attrs = Vec::new();
            match header.indicator {
                SortIndicator::Ascending => {
                    label.push_str(" \u{25B2}");
                    attrs.push(("data-sort", "asc".to_string()));
                }
                SortIndicator::Descending => {
                    label.push_str(" \u{25BC}");
                    attrs.push(("data-sort", "desc".to_string()));
                }
                SortIndicator::None => {}
            }
            push_cell(&mut html, "th", &label, &attrs);
        }
        html.close_head();
        for row in &self.rows {
            html.open_row();
            for cell in &row.cells {
                let mut attrs = Vec::new();
                if cell.rowspan > 1 {
                    attrs.push(("rowspan", cell.rowspan.to_string()));
                }
                if cell.colspan > 1 {
                    attrs.push(("colspan", cell.colspan.to_string()));
                }
                if self.no_matches {
                    attrs.push(("class", "rsformat-empty".to_string()));
                }
                push_cell(&mut html, "td", &cell.content, &attrs);
            }
            html.close_row();
        }
        html.finish()
    }
}
