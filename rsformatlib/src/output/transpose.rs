//! Pivoted view: columns become rows.

use serde::{Deserialize, Serialize};

use crate::escape::{escape_cell, escape_markup};
use crate::query::ProcessedRow;

use super::markup::{push_cell, HtmlWriter};

/// Header and body of a pivoted table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transposed {
    /// First column name followed by each row's value in that column
    pub header: Vec<String>,
    /// One line per remaining column: name, then each row's value
    pub body: Vec<Vec<String>>,
}

/// Pivot `rows` over `columns`. Missing values become empty strings.
pub fn transpose(columns: &[String], rows: &[ProcessedRow<'_>]) -> Transposed {
    if columns.is_empty() || rows.is_empty() {
        return Transposed::default();
    }
    let line = |column: &str| -> Vec<String> {
        std::iter::once(column.to_string())
            .chain(rows.iter().map(|row| row.value(column).to_display_string()))
            .collect()
    };
    Transposed {
        header: line(columns[0].as_str()),
        body: columns[1..].iter().map(|c| line(c.as_str())).collect(),
    }
}

/// Rendered pivot table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransposedView {
    pub header: Vec<String>,
    pub body: Vec<Vec<String>>,
    /// Convert line breaks when emitting markup
    pub newline_to_break: bool,
    pub break_marker: String,
}

impl TransposedView {
    pub fn new(transposed: Transposed, newline_to_break: bool, break_marker: &str) -> Self {
        Self {
            header: transposed.header,
            body: transposed.body,
            newline_to_break,
            break_marker: break_marker.to_string(),
        }
    }

    pub fn to_markup(&self) -> String {
        let mut html = HtmlWriter::table();
        html.open_head();
        for cell in &self.header {
            push_cell(&mut html, "th", &escape_markup(cell), &[]);
        }
        html.close_head();
        for line in &self.body {
            html.open_row();
            for cell in line {
                let content = escape_cell(cell, self.newline_to_break, &self.break_marker);
                push_cell(&mut html, "td", &content, &[]);
            }
            html.close_row();
        }
        html.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Record, Value};

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_transpose_layout() {
        let records = vec![
            Record::new().with("name", "a").with("v", 1).with("w", true),
            Record::new().with("name", "b").with("v", Value::Null),
        ];
        let rows: Vec<ProcessedRow> = records.iter().map(ProcessedRow::plain).collect();
        let t = transpose(&cols(&["name", "v", "w"]), &rows);
        assert_eq!(t.header, vec!["name", "a", "b"]);
        assert_eq!(t.body.len(), 2);
        assert_eq!(t.body[0], vec!["v", "1", ""]);
        assert_eq!(t.body[1], vec!["w", "true", ""]);
    }

    #[test]
    fn test_transpose_empty_inputs() {
        let records = vec![Record::new().with("a", 1)];
        let rows: Vec<ProcessedRow> = records.iter().map(ProcessedRow::plain).collect();
        assert_eq!(transpose(&[], &rows), Transposed::default());
        assert_eq!(transpose(&cols(&["a"]), &[]), Transposed::default());
    }

    #[test]
    fn test_single_column_has_empty_body() {
        let records = vec![Record::new().with("a", 1)];
        let rows: Vec<ProcessedRow> = records.iter().map(ProcessedRow::plain).collect();
        let t = transpose(&cols(&["a"]), &rows);
        assert_eq!(t.header, vec!["a", "1"]);
        assert!(t.body.is_empty());
    }

    #[test]
    fn test_markup_escapes_and_breaks() {
        let t = Transposed {
            header: vec!["k".to_string(), "<v>".to_string()],
            body: vec![vec!["note".to_string(), "a\nb".to_string()]],
        };
        let html = TransposedView::new(t, true, "<br>").to_markup();
        assert!(html.contains("<th>&lt;v&gt;</th>"));
        assert!(html.contains("<td>a<br>b</td>"));
    }
}
