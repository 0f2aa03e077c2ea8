//! Query processing: filter, number, and sort records.
//!
//! This module handles the second stage of the pipeline - turning the raw
//! dataset into the rows a view displays. It provides:
//!
//! - **Options**: View configuration and state (`ViewOptions`, `ViewState`, `Intent`)
//! - **Filter**: Case-insensitive substring matching over record values
//! - **Augment**: The synthetic 1-based `ID` column
//! - **Sort**: Header-click state machine and null-aware comparator
//! - **ProcessedDataset**: Processed data ready for rendering
//!
//! ## Example
//!
//! ```rust
//! use rsformatlib::data::{extract_columns, Dataset};
//! use rsformatlib::query::{ProcessedDataset, ViewState};
//!
//! let dataset = Dataset::from_json_str(r#"[{"n":"x"},{"n":"y"}]"#).unwrap();
//! let columns = extract_columns(&dataset, None);
//! let state = ViewState { filter_text: "Y".to_string(), ..ViewState::default() };
//! let processed = ProcessedDataset::for_view(&dataset, &columns, &state);
//! assert_eq!(processed.rows.len(), 1);
//! ```

pub mod augment;
pub mod filter;
pub mod options;
pub mod queryset;
pub mod sort;

pub use augment::{number_rows, ProcessedRow, ID_COLUMN};
pub use filter::filter_records;
pub use options::{
    clamp_rowspan_depth, Format, Intent, OptionKey, OptionValue, SortDirection, ViewOptions,
    ViewState, MAX_ROWSPAN_DEPTH,
};
pub use queryset::{ProcessedDataset, Stages};
pub use sort::{compare_values, sort_rows, SortIndicator, SortState};
