//! Fixed-width text grid.
//!
//! ```text
//! dept | emp
//! -----|----
//! A    | 1
//! ```
//!
//! Every field is left-aligned and padded to the widest value seen in its
//! column (header included). Widths are terminal display widths, so wide
//! characters line up.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::escape::escape_markup;
use crate::query::ProcessedDataset;

/// Rendered grid text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridView {
    /// Plain, unescaped grid text
    pub text: String,
    /// Number of data lines
    pub row_count: usize,
}

/// Pad `s` on the right to `width` display columns.
fn pad_to(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Pad each cell to its column width and join with ` | `.
fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, w)| pad_to(cell, *w))
        .collect::<Vec<_>>()
        .join(" | ")
}

impl GridView {
    pub fn render(processed: &ProcessedDataset<'_>) -> Self {
        let headers: Vec<&str> = processed.columns.iter().collect();
        let rows = processed.display_rows();

        let mut widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(UnicodeWidthStr::width(cell.as_str()));
            }
        }

        let mut text = String::new();
        text.push_str(&format_line(headers.iter().copied(), &widths));
        text.push('\n');
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        text.push_str(&separator.join("-|-"));
        text.push('\n');
        for row in &rows {
            text.push_str(&format_line(row.iter().map(String::as_str), &widths));
            text.push('\n');
        }

        GridView {
            text,
            row_count: rows.len(),
        }
    }

    /// Grid embedded in a `<pre>` block, escaped once.
    pub fn to_markup(&self) -> String {
        format!(
            "<pre class=\"rsformat-rowset\">{}</pre>",
            escape_markup(&self.text)
        )
    }
}
