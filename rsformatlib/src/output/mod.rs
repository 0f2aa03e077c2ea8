//! Output formatting: present processed rows in the selected view.
//!
//! This module handles the third and final stage of the pipeline -
//! turning processed rows into a representation. It provides:
//!
//! - **GridView**: Fixed-width text grid
//! - **TableView**: Table cells with sort indicators and rowspans
//! - **TransposedView**: Pivoted table
//! - **StructuredView**: Pretty-printed JSON
//! - **CSV**: Export payload (`render_csv`, `CsvExport`)
//! - **RenderedOutput**: The tagged result handed back to hosts
//!
//! Renderers are pure presentation - all filtering, numbering and sorting
//! happens in the query stage.

pub mod csv;
pub mod grid;
mod markup;
pub mod merge;
pub mod structured;
pub mod table;
pub mod transpose;

use serde::{Deserialize, Serialize};

use crate::escape::escape_markup;

pub use csv::{quote_field, render_csv, CsvExport, BOM};
pub use grid::GridView;
pub use merge::{CellSpan, MergePlan};
pub use structured::StructuredView;
pub use table::{HeaderCell, TableCell, TableRow, TableView};
pub use transpose::{transpose, Transposed, TransposedView};

/// The artifact produced by a render.
///
/// Empty data and unknown formats are ordinary results, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedOutput {
    /// The source dataset has no rows
    NoData { message: String },
    /// The selected format is not recognized
    UnsupportedFormat { format: String, message: String },
    Grid(GridView),
    Table(TableView),
    Transposed(TransposedView),
    Structured(StructuredView),
}

impl RenderedOutput {
    /// Whether this is the "no data" indicator.
    pub fn is_no_data(&self) -> bool {
        matches!(self, RenderedOutput::NoData { .. })
    }

    /// Markup for embedding in a page. Text views are escaped exactly once
    /// here.
    pub fn to_markup(&self) -> String {
        match self {
            RenderedOutput::NoData { message } => error_block(message),
            RenderedOutput::UnsupportedFormat { format, message } => {
                error_block(&format!("{}: {}", message, format))
            }
            RenderedOutput::Grid(grid) => grid.to_markup(),
            RenderedOutput::Table(table) => table.to_markup(),
            RenderedOutput::Transposed(view) => view.to_markup(),
            RenderedOutput::Structured(view) => view.to_markup(),
        }
    }

    /// Text for a terminal: grid and JSON as-is, tables as markup, and
    /// indicator messages verbatim.
    pub fn to_text(&self) -> String {
        match self {
            RenderedOutput::NoData { message } => message.clone(),
            RenderedOutput::UnsupportedFormat { format, message } => {
                format!("{}: {}", message, format)
            }
            RenderedOutput::Grid(grid) => grid.text.clone(),
            RenderedOutput::Structured(view) => view.text.clone(),
            RenderedOutput::Table(table) => table.to_markup(),
            RenderedOutput::Transposed(view) => view.to_markup(),
        }
    }
}

fn error_block(message: &str) -> String {
    format!(
        "<div class=\"rsformat-error\">{}</div>",
        escape_markup(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_markup() {
        let out = RenderedOutput::NoData {
            message: "No data <here>".to_string(),
        };
        assert!(out.is_no_data());
        assert_eq!(
            out.to_markup(),
            "<div class=\"rsformat-error\">No data &lt;here&gt;</div>"
        );
        assert_eq!(out.to_text(), "No data <here>");
    }

    #[test]
    fn test_unsupported_markup() {
        let out = RenderedOutput::UnsupportedFormat {
            format: "xml".to_string(),
            message: "Unsupported format".to_string(),
        };
        assert!(out.to_markup().contains("Unsupported format: xml"));
    }

    #[test]
    fn test_serialized_kind_tag() {
        let out = RenderedOutput::Structured(StructuredView {
            text: "[]".to_string(),
        });
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["kind"], "structured");
        assert_eq!(json["text"], "[]");
    }
}
