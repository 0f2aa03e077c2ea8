//! Processed dataset: rows ready for rendering.
//!
//! A ProcessedDataset sits between the raw dataset and the renderers.
//! It represents data that has been:
//! - Filtered by the view's filter text
//! - Numbered with a 1-based `ID` (when enabled)
//! - Sorted by the active sort column (table view only)
//!
//! The data pipeline is:
//! 1. Raw Data (Dataset + ColumnList)
//! 2. ProcessedDataset (filtered, numbered, sorted)
//! 3. RenderedOutput (grid text, table cells, pivot, JSON, CSV)
//!
//! It is rebuilt from the view state on every access, never cached, and
//! borrows the dataset's records instead of copying them.

use log::debug;

use crate::data::{ColumnList, Dataset};

use super::augment::{number_rows, ProcessedRow};
use super::filter::filter_records;
use super::options::{Format, ViewState};
use super::sort::sort_rows;

/// Which pipeline stages run for a given output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stages {
    /// Apply the filter text
    pub filter: bool,
    /// Apply the active sort
    pub sort: bool,
}

impl Stages {
    /// Stages for an on-screen format.
    ///
    /// Sorting only takes effect in the table view; the transposed view
    /// always shows the dataset unfiltered and unsorted.
    pub fn for_format(format: &Format) -> Self {
        match format {
            Format::Table => Stages {
                filter: true,
                sort: true,
            },
            Format::Transposed => Stages {
                filter: false,
                sort: false,
            },
            _ => Stages {
                filter: true,
                sort: false,
            },
        }
    }

    /// Stages for the CSV export while `format` is on display.
    ///
    /// The export always reflects the filter, and reflects the sort exactly
    /// when it is visible.
    pub fn for_export(format: &Format) -> Self {
        Stages {
            filter: true,
            sort: *format == Format::Table,
        }
    }
}

/// Columns and rows after the query stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedDataset<'a> {
    /// Columns on display (`ID` first when enabled)
    pub columns: ColumnList,
    /// Rows in display order
    pub rows: Vec<ProcessedRow<'a>>,
    /// Number of records in the source dataset
    pub total_rows: usize,
}

impl<'a> ProcessedDataset<'a> {
    /// Run the pipeline: filter → number → sort.
    pub fn build(
        dataset: &'a Dataset,
        columns: &ColumnList,
        state: &ViewState,
        stages: Stages,
    ) -> Self {
        let filter_text = if stages.filter {
            state.filter_text.as_str()
        } else {
            ""
        };
        let filtered = filter_records(dataset.records(), filter_text);
        let mut rows = number_rows(filtered, state.options.show_id);
        if stages.sort {
            sort_rows(&mut rows, &state.sort);
        }
        debug!(
            "processed {} of {} rows (filter: {:?}, sort: {:?})",
            rows.len(),
            dataset.len(),
            filter_text,
            if stages.sort && state.sort.is_active() {
                state.sort.column.as_deref()
            } else {
                None
            }
        );
        ProcessedDataset {
            columns: state.options.view_columns(columns),
            rows,
            total_rows: dataset.len(),
        }
    }

    /// Pipeline for the on-screen view described by `state`.
    pub fn for_view(dataset: &'a Dataset, columns: &ColumnList, state: &ViewState) -> Self {
        let stages = Stages::for_format(&state.options.effective_format());
        Self::build(dataset, columns, state, stages)
    }

    /// Pipeline for the CSV export.
    pub fn for_export(dataset: &'a Dataset, columns: &ColumnList, state: &ViewState) -> Self {
        let stages = Stages::for_export(&state.options.effective_format());
        Self::build(dataset, columns, state, stages)
    }

    /// Display strings for every row, in column order.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|col| row.value(col).to_display_string())
                    .collect()
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Record, Value};
    use crate::query::options::{SortDirection, ViewOptions};
    use crate::query::sort::SortState;

    fn scenario() -> Dataset {
        Dataset::new(vec![
            Record::new().with("n", "x").with("v", 5),
            Record::new().with("n", "y").with("v", Value::Null),
            Record::new().with("n", "z").with("v", 1),
        ])
    }

    fn names(ds: &ProcessedDataset) -> Vec<String> {
        ds.rows
            .iter()
            .map(|r| r.value("n").to_display_string())
            .collect()
    }

    fn sorted_state(direction: SortDirection, format: Format) -> ViewState {
        ViewState {
            options: ViewOptions::new().format(format),
            sort: SortState::new("v", direction),
            filter_text: String::new(),
        }
    }

    #[test]
    fn test_sort_ascending_nulls_last() {
        let ds = scenario();
        let cols = ColumnList::new(["n", "v"]);
        let state = sorted_state(SortDirection::Asc, Format::Table);
        let processed = ProcessedDataset::for_view(&ds, &cols, &state);
        assert_eq!(names(&processed), vec!["z", "x", "y"]);
    }

    #[test]
    fn test_sort_descending_nulls_last() {
        let ds = scenario();
        let cols = ColumnList::new(["n", "v"]);
        let state = sorted_state(SortDirection::Desc, Format::Table);
        let processed = ProcessedDataset::for_view(&ds, &cols, &state);
        assert_eq!(names(&processed), vec!["x", "z", "y"]);
    }

    #[test]
    fn test_sort_ignored_outside_table() {
        let ds = scenario();
        let cols = ColumnList::new(["n", "v"]);
        for format in [Format::Grid, Format::Structured, Format::Transposed] {
            let state = sorted_state(SortDirection::Asc, format);
            let processed = ProcessedDataset::for_view(&ds, &cols, &state);
            assert_eq!(names(&processed), vec!["x", "y", "z"]);
        }
    }

    #[test]
    fn test_ids_number_filtered_rows() {
        let ds: Dataset = (1..=10)
            .map(|i| Record::new().with("k", if i % 3 == 0 { "hit" } else { "miss" }).with("i", i))
            .collect();
        let cols = ColumnList::new(["k", "i"]);
        let state = ViewState {
            options: ViewOptions::new().show_id(true),
            sort: SortState::default(),
            filter_text: "HIT".to_string(),
        };
        let processed = ProcessedDataset::for_view(&ds, &cols, &state);
        assert_eq!(processed.columns.get(0), Some("ID"));
        let ids: Vec<String> = processed
            .rows
            .iter()
            .map(|r| r.value("ID").to_display_string())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        let originals: Vec<String> = processed
            .rows
            .iter()
            .map(|r| r.value("i").to_display_string())
            .collect();
        assert_eq!(originals, vec!["3", "6", "9"]);
    }

    #[test]
    fn test_filter_keeps_columns() {
        let ds = scenario();
        let cols = ColumnList::new(["n", "v"]);
        let state = ViewState {
            filter_text: "nothing matches".to_string(),
            ..ViewState::default()
        };
        let processed = ProcessedDataset::for_view(&ds, &cols, &state);
        assert!(processed.is_empty());
        assert_eq!(processed.columns, cols);
        assert_eq!(processed.total_rows, 3);
    }

    #[test]
    fn test_transposed_bypasses_filter() {
        let ds = scenario();
        let cols = ColumnList::new(["n", "v"]);
        let state = ViewState {
            options: ViewOptions::new().transpose(true),
            sort: SortState::default(),
            filter_text: "x".to_string(),
        };
        let processed = ProcessedDataset::for_view(&ds, &cols, &state);
        assert_eq!(processed.rows.len(), 3);
    }

    #[test]
    fn test_export_stages() {
        assert_eq!(
            Stages::for_export(&Format::Grid),
            Stages {
                filter: true,
                sort: false
            }
        );
        assert_eq!(
            Stages::for_export(&Format::Transposed),
            Stages {
                filter: true,
                sort: false
            }
        );
        assert!(Stages::for_export(&Format::Table).sort);
    }

    #[test]
    fn test_display_rows_missing_as_empty() {
        let ds = Dataset::new(vec![Record::new().with("a", 1)]);
        let cols = ColumnList::new(["a", "b"]);
        let processed = ProcessedDataset::for_view(&ds, &cols, &ViewState::default());
        assert_eq!(processed.display_rows(), vec![vec!["1".to_string(), String::new()]]);
    }
}
