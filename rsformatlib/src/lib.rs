//! # rsformatlib
//!
//! An interactive result-set formatter: turns an in-memory collection of
//! uniform records into several views and lets a caller filter and sort
//! them live.
//!
//! ## Overview
//!
//! A dataset is rendered through a one-way pipeline:
//!
//! 1. **Data**: [`Dataset`] of ordered [`Record`]s and the [`ColumnList`]
//! 2. **Query**: filter → ID numbering → sort, yielding a [`ProcessedDataset`]
//! 3. **Output**: one of the views below, as a [`RenderedOutput`]
//!
//! Views:
//!
//! - **Grid**: Fixed-width text with `|` separators
//! - **Table**: Cells with sort indicators and vertical merging of repeated
//!   leading-column values
//! - **Transposed**: Columns become rows
//! - **Structured**: Pretty-printed JSON
//! - **CSV**: Export payload for spreadsheet tools
//!
//! ## Features
//!
//! - **Explicit state transitions**: every change is an [`Intent`] applied
//!   to a [`ViewState`]
//! - **No copying**: processed rows borrow the dataset's records
//! - **Pure data types**: views are plain structs that hosts can walk,
//!   serialize or turn into markup
//!
//! ## Example
//!
//! ```rust
//! use rsformatlib::{Dataset, Intent, RenderedOutput, ResultEngine};
//!
//! let data = Dataset::from_json_str(
//!     r#"[{"dept":"A","emp":"1"},{"dept":"A","emp":"2"},{"dept":"B","emp":"3"}]"#,
//! )
//! .unwrap();
//! let mut engine = ResultEngine::new(data, None);
//!
//! // Sort by a column and get the refreshed table
//! let output = engine.dispatch(Intent::ToggleSort("emp".to_string())).unwrap();
//! let RenderedOutput::Table(table) = output else { unreachable!() };
//! assert_eq!(table.rows.len(), 3);
//! assert_eq!(table.rows[0].cells[0].rowspan, 2);
//!
//! // Export what is on display
//! let csv = engine.export_csv().unwrap().into_bytes().unwrap();
//! assert!(csv.starts_with("\u{FEFF}".as_bytes()));
//! ```

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod escape;
pub mod output;
pub mod query;

pub use config::EngineConfig;
pub use data::{extract_columns, ColumnList, Dataset, Record, Value};
pub use engine::{ResultEngine, Summary};
pub use error::RsFormatError;
pub use output::{
    CsvExport, GridView, HeaderCell, RenderedOutput, StructuredView, TableCell, TableRow,
    TableView, TransposedView,
};
pub use query::{
    Format, Intent, OptionKey, OptionValue, ProcessedDataset, ProcessedRow, SortDirection,
    SortIndicator, SortState, ViewOptions, ViewState,
};

/// Result type for rsformatlib operations
pub type Result<T> = std::result::Result<T, RsFormatError>;
