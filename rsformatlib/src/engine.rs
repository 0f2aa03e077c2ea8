//! The result engine: dataset + view state in, rendered views out.
//!
//! A [`ResultEngine`] owns one dataset snapshot and the [`ViewState`] that
//! drives rendering. Every state change goes through [`ViewState::apply`];
//! processed rows are derived from the state on each render and export, so
//! the state is the only thing that ever needs to be kept consistent.
//!
//! ```rust
//! use rsformatlib::{Dataset, OptionKey, RenderedOutput, ResultEngine};
//!
//! let data = Dataset::from_json_str(r#"[{"n":"x","v":5},{"n":"y","v":null}]"#).unwrap();
//! let mut engine = ResultEngine::new(data, None);
//! engine.set_option(OptionKey::Format, "grid").unwrap();
//! match engine.render().unwrap() {
//!     RenderedOutput::Grid(grid) => assert!(grid.text.starts_with("n | v")),
//!     other => panic!("unexpected output: {:?}", other),
//! }
//! ```

use std::fmt;

use log::{debug, trace};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::data::{extract_columns, ColumnList, Dataset};
use crate::error::RsFormatError;
use crate::output::{
    render_csv, transpose, CsvExport, GridView, RenderedOutput, StructuredView, TableView,
    TransposedView,
};
use crate::query::{
    Format, Intent, OptionKey, OptionValue, ProcessedDataset, SortState, Stages, ViewState,
};
use crate::Result;

/// Row counts for the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Rows in the dataset
    pub total_rows: usize,
    /// Rows on display after filtering
    pub visible_rows: usize,
    /// Whether a filter is narrowing the view
    pub filtered: bool,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.filtered {
            write!(f, "{} of {} rows match", self.visible_rows, self.total_rows)
        } else {
            write!(f, "{} rows returned", self.total_rows)
        }
    }
}

#[derive(Debug)]
struct Loaded {
    dataset: Dataset,
    explicit_columns: Option<Vec<String>>,
    columns: ColumnList,
    state: ViewState,
}

impl Loaded {
    fn new(dataset: Dataset, explicit_columns: Option<Vec<String>>, state: ViewState) -> Self {
        let columns = extract_columns(&dataset, explicit_columns.as_deref());
        Self {
            dataset,
            explicit_columns,
            columns,
            state,
        }
    }
}

/// Holds a dataset and its view state, and renders the selected view.
#[derive(Debug)]
pub struct ResultEngine {
    config: EngineConfig,
    inner: Option<Loaded>,
}

impl ResultEngine {
    /// Create an engine with the default configuration.
    ///
    /// `explicit_columns` fixes the column list; without it the first
    /// record's keys are used.
    pub fn new(dataset: Dataset, explicit_columns: Option<Vec<String>>) -> Self {
        Self::with_config(dataset, explicit_columns, EngineConfig::default())
    }

    /// Create an engine with `config`. The view starts from
    /// `config.initial_view`.
    pub fn with_config(
        dataset: Dataset,
        explicit_columns: Option<Vec<String>>,
        config: EngineConfig,
    ) -> Self {
        let state = ViewState::new(config.normalized_view());
        debug!(
            "loaded dataset with {} rows (format: {})",
            dataset.len(),
            state.options.format
        );
        Self {
            inner: Some(Loaded::new(dataset, explicit_columns, state)),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn loaded(&self) -> Result<&Loaded> {
        self.inner.as_ref().ok_or(RsFormatError::Disposed)
    }

    fn loaded_mut(&mut self) -> Result<&mut Loaded> {
        self.inner.as_mut().ok_or(RsFormatError::Disposed)
    }

    /// Swap in a new dataset.
    ///
    /// Filter and sort reset to their defaults; display options (format,
    /// ID visibility, merge depth, line breaks) carry over.
    pub fn replace_dataset(
        &mut self,
        dataset: Dataset,
        explicit_columns: Option<Vec<String>>,
    ) -> Result<()> {
        let loaded = self.loaded_mut()?;
        debug!(
            "replacing dataset: {} rows -> {} rows",
            loaded.dataset.len(),
            dataset.len()
        );
        let state = loaded.state.reset_query();
        *loaded = Loaded::new(dataset, explicit_columns, state);
        Ok(())
    }

    /// Apply an intent to the view state.
    pub fn apply(&mut self, intent: Intent) -> Result<()> {
        let loaded = self.loaded_mut()?;
        loaded.state = loaded.state.apply(intent, &loaded.columns)?;
        Ok(())
    }

    /// Apply an intent and render the resulting view.
    pub fn dispatch(&mut self, intent: Intent) -> Result<RenderedOutput> {
        self.apply(intent)?;
        self.render()
    }

    pub fn set_option(&mut self, key: OptionKey, value: impl Into<OptionValue>) -> Result<()> {
        self.apply(Intent::SetOption(key, value.into()))
    }

    /// Set an option by its textual key (`"showId"`, `"rowspan"`, ...).
    pub fn set_option_str(&mut self, key: &str, value: impl Into<OptionValue>) -> Result<()> {
        let key: OptionKey = key.parse()?;
        self.set_option(key, value)
    }

    pub fn set_filter_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.apply(Intent::SetFilterText(text.into()))
    }

    /// Click on the header of `column`; returns the new sort state.
    pub fn toggle_sort(&mut self, column: &str) -> Result<SortState> {
        self.apply(Intent::ToggleSort(column.to_string()))?;
        Ok(self.loaded()?.state.sort.clone())
    }

    pub fn state(&self) -> Result<&ViewState> {
        Ok(&self.loaded()?.state)
    }

    /// Dataset columns, without the synthetic `ID`.
    pub fn columns(&self) -> Result<&ColumnList> {
        Ok(&self.loaded()?.columns)
    }

    pub fn dataset(&self) -> Result<&Dataset> {
        Ok(&self.loaded()?.dataset)
    }

    /// Explicit column list given at load time, if any.
    pub fn explicit_columns(&self) -> Result<Option<&[String]>> {
        Ok(self.loaded()?.explicit_columns.as_deref())
    }

    /// Rows for the current view, freshly derived from the state.
    pub fn processed(&self) -> Result<ProcessedDataset<'_>> {
        let loaded = self.loaded()?;
        Ok(ProcessedDataset::for_view(
            &loaded.dataset,
            &loaded.columns,
            &loaded.state,
        ))
    }

    /// Render the selected view.
    pub fn render(&self) -> Result<RenderedOutput> {
        let loaded = self.loaded()?;
        if loaded.dataset.is_empty() {
            trace!("dataset is empty, returning no-data indicator");
            return Ok(RenderedOutput::NoData {
                message: self.config.no_data_text.clone(),
            });
        }

        let options = &loaded.state.options;
        let format = options.effective_format();
        trace!("rendering {} view", format);
        let processed = ProcessedDataset::for_view(&loaded.dataset, &loaded.columns, &loaded.state);
        let output = match format {
            Format::Grid => RenderedOutput::Grid(GridView::render(&processed)),
            Format::Table => RenderedOutput::Table(TableView::render(
                &processed,
                options,
                &loaded.state.sort,
                &self.config.no_match_text,
                &self.config.break_marker,
            )),
            Format::Transposed => {
                let pivot = transpose(processed.columns.as_slice(), &processed.rows);
                RenderedOutput::Transposed(TransposedView::new(
                    pivot,
                    options.newline_to_break,
                    &self.config.break_marker,
                ))
            }
            Format::Structured => RenderedOutput::Structured(StructuredView::render(&processed)?),
            Format::Unsupported(name) => RenderedOutput::UnsupportedFormat {
                format: name,
                message: self.config.unsupported_format_text.clone(),
            },
        };
        Ok(output)
    }

    /// Export the current rows as CSV.
    pub fn export_csv(&self) -> Result<CsvExport> {
        let loaded = self.loaded()?;
        if loaded.dataset.is_empty() {
            return Ok(CsvExport::NoData);
        }
        let processed =
            ProcessedDataset::for_export(&loaded.dataset, &loaded.columns, &loaded.state);
        debug!("exporting {} rows as CSV", processed.rows.len());
        Ok(CsvExport::Csv(render_csv(&processed).into_bytes()))
    }

    /// Row counts for the current view.
    pub fn summary(&self) -> Result<Summary> {
        let loaded = self.loaded()?;
        let stages = Stages::for_format(&loaded.state.options.effective_format());
        let processed = self.processed()?;
        Ok(Summary {
            total_rows: processed.total_rows,
            visible_rows: processed.rows.len(),
            filtered: stages.filter && !loaded.state.filter_text.is_empty(),
        })
    }

    /// Release the dataset. Every later call fails with `Disposed`.
    pub fn dispose(&mut self) {
        if self.inner.take().is_some() {
            debug!("result engine disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Record, Value};
    use crate::query::{SortDirection, ViewOptions};

    fn nv_dataset() -> Dataset {
        Dataset::new(vec![
            Record::new().with("n", "x").with("v", 5),
            Record::new().with("n", "y").with("v", Value::Null),
            Record::new().with("n", "z").with("v", 1),
        ])
    }

    fn names(engine: &ResultEngine) -> Vec<String> {
        engine
            .processed()
            .unwrap()
            .rows
            .iter()
            .map(|r| r.value("n").to_display_string())
            .collect()
    }

    fn csv_text(engine: &ResultEngine) -> String {
        let bytes = engine.export_csv().unwrap().into_bytes().unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_sort_scenario_nulls_last() {
        let mut engine = ResultEngine::new(nv_dataset(), None);
        engine.toggle_sort("v").unwrap();
        assert_eq!(names(&engine), vec!["z", "x", "y"]);
        let state = engine.toggle_sort("v").unwrap();
        assert_eq!(state.direction, SortDirection::Desc);
        assert_eq!(names(&engine), vec!["x", "z", "y"]);
    }

    #[test]
    fn test_sort_cycle_restores_input_order() {
        let mut engine = ResultEngine::new(nv_dataset(), None);
        let before = names(&engine);
        engine.toggle_sort("n").unwrap();
        engine.toggle_sort("n").unwrap();
        assert_eq!(names(&engine), vec!["z", "y", "x"]);
        let state = engine.toggle_sort("n").unwrap();
        assert_eq!(state.direction, SortDirection::None);
        assert_eq!(names(&engine), before);
    }

    #[test]
    fn test_sort_mixed_column_renders() {
        let records: Vec<Record> = (0..300)
            .map(|i| {
                let k: Value = match i % 4 {
                    0 => format!("{}a", (i * 37) % 101).into(),
                    1 => Value::Null,
                    _ => ((i * 53) % 97).into(),
                };
                Record::new().with("n", i).with("k", k)
            })
            .collect();
        let mut engine = ResultEngine::new(Dataset::new(records), None);

        let state = engine.toggle_sort("k").unwrap();
        assert_eq!(state.direction, SortDirection::Asc);
        let RenderedOutput::Table(table) = engine.render().unwrap() else {
            panic!("expected table");
        };
        assert_eq!(table.rows.len(), 300);

        let state = engine.toggle_sort("k").unwrap();
        assert_eq!(state.direction, SortDirection::Desc);
        assert!(engine.render().is_ok());
        assert!(engine.export_csv().is_ok());
    }

    #[test]
    fn test_sort_ignored_outside_table() {
        let mut engine = ResultEngine::new(nv_dataset(), None);
        engine.toggle_sort("v").unwrap();
        engine.set_option(OptionKey::Format, "grid").unwrap();
        assert_eq!(names(&engine), vec!["x", "y", "z"]);
        engine.set_option(OptionKey::Format, "table").unwrap();
        assert_eq!(names(&engine), vec!["z", "x", "y"]);
    }

    #[test]
    fn test_toggle_unknown_column_rejected() {
        let mut engine = ResultEngine::new(nv_dataset(), None);
        assert!(matches!(
            engine.toggle_sort("missing"),
            Err(RsFormatError::UnknownColumn(_))
        ));
        assert!(engine.toggle_sort("ID").is_err());
        engine.set_option(OptionKey::ShowId, true).unwrap();
        assert!(engine.toggle_sort("ID").is_ok());
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut engine = ResultEngine::new(nv_dataset(), None);
        engine.toggle_sort("v").unwrap();
        engine.set_filter_text("x").unwrap();
        assert_eq!(engine.render().unwrap(), engine.render().unwrap());
        assert_eq!(engine.export_csv().unwrap(), engine.export_csv().unwrap());
    }

    #[test]
    fn test_csv_matches_columns_and_input_order() {
        let engine = ResultEngine::new(nv_dataset(), None);
        let csv = csv_text(&engine);
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').split("\r\n").collect();
        assert_eq!(lines[0], "\"n\",\"v\"");
        assert_eq!(lines[1], "\"x\",\"5\"");
        assert_eq!(lines[2], "\"y\",\"\"");
        assert_eq!(lines[3], "\"z\",\"1\"");
        assert_eq!(lines[4], "");
    }

    #[test]
    fn test_csv_follows_filter_id_and_table_sort() {
        let mut engine = ResultEngine::new(nv_dataset(), None);
        engine.set_option(OptionKey::ShowId, true).unwrap();
        engine.toggle_sort("v").unwrap();
        let csv = csv_text(&engine);
        assert!(csv.contains("\"ID\",\"n\",\"v\"\r\n\"1\",\"z\",\"1\"\r\n"));

        engine.set_option(OptionKey::Format, "structured").unwrap();
        engine.set_filter_text("Y").unwrap();
        assert_eq!(csv_text(&engine), "\u{FEFF}\"ID\",\"n\",\"v\"\r\n\"1\",\"y\",\"\"\r\n");
    }

    #[test]
    fn test_ids_number_filtered_rows() {
        let records = (0..10)
            .map(|i| {
                let tag = if i >= 7 { "hit" } else { "miss" };
                Record::new().with("pos", i).with("tag", tag)
            })
            .collect();
        let mut engine = ResultEngine::new(Dataset::new(records), None);
        engine.set_option(OptionKey::ShowId, true).unwrap();
        engine.set_filter_text("HIT").unwrap();

        let processed = engine.processed().unwrap();
        let column = |name: &str| -> Vec<String> {
            processed
                .rows
                .iter()
                .map(|r| r.value(name).to_display_string())
                .collect()
        };
        assert_eq!(column("ID"), vec!["1", "2", "3"]);
        assert_eq!(column("pos"), vec!["7", "8", "9"]);
    }

    #[test]
    fn test_empty_dataset_is_no_data_for_every_format() {
        let mut engine = ResultEngine::new(Dataset::default(), Some(vec!["a".to_string()]));
        for format in ["table", "grid", "transposed", "structured", "bogus"] {
            engine.set_option(OptionKey::Format, format).unwrap();
            assert!(engine.render().unwrap().is_no_data(), "format {}", format);
        }
        engine.set_option(OptionKey::Transpose, true).unwrap();
        assert!(engine.render().unwrap().is_no_data());
        assert_eq!(engine.export_csv().unwrap(), CsvExport::NoData);
    }

    #[test]
    fn test_unsupported_format_result() {
        let mut engine = ResultEngine::new(nv_dataset(), None);
        let out = engine
            .dispatch(Intent::SetOption(OptionKey::Format, "xml".into()))
            .unwrap();
        assert_eq!(
            out,
            RenderedOutput::UnsupportedFormat {
                format: "xml".to_string(),
                message: "Unsupported format".to_string(),
            }
        );
    }

    #[test]
    fn test_filter_keeps_columns_sort_keeps_count() {
        let mut engine = ResultEngine::new(nv_dataset(), None);
        let columns = engine.processed().unwrap().columns;
        engine.set_filter_text("z").unwrap();
        assert_eq!(engine.processed().unwrap().columns, columns);
        engine.set_filter_text("").unwrap();
        engine.toggle_sort("v").unwrap();
        let processed = engine.processed().unwrap();
        assert_eq!(processed.rows.len(), 3);
        assert_eq!(processed.columns, columns);
    }

    #[test]
    fn test_span_lengths_cover_filtered_rows() {
        let dataset = Dataset::new(vec![
            Record::new().with("dept", "A").with("team", "t1").with("emp", "1"),
            Record::new().with("dept", "A").with("team", "t1").with("emp", "2"),
            Record::new().with("dept", "A").with("team", "t2").with("emp", "3"),
            Record::new().with("dept", "B").with("team", "t2").with("emp", "4"),
            Record::new().with("dept", "B").with("team", "t3").with("emp", "x"),
        ]);
        let mut engine = ResultEngine::new(dataset, None);
        engine.set_option(OptionKey::RowspanDepth, 2).unwrap();
        engine.set_filter_text("t").unwrap();
        let visible = engine.processed().unwrap().rows.len();
        let RenderedOutput::Table(table) = engine.render().unwrap() else {
            panic!("expected table output");
        };
        for column in 0..2 {
            let total: usize = table
                .rows
                .iter()
                .flat_map(|r| &r.cells)
                .filter(|c| c.column == column)
                .map(|c| c.rowspan)
                .sum();
            assert_eq!(total, visible);
        }
    }

    #[test]
    fn test_transposed_ignores_filter_and_sort() {
        let mut engine = ResultEngine::new(nv_dataset(), None);
        engine.toggle_sort("v").unwrap();
        engine.set_filter_text("x").unwrap();
        engine.set_option(OptionKey::Transpose, true).unwrap();
        let RenderedOutput::Transposed(view) = engine.render().unwrap() else {
            panic!("expected transposed output");
        };
        assert_eq!(view.header, vec!["n", "x", "y", "z"]);
        assert_eq!(view.body, vec![vec!["v", "5", "", "1"]]);
    }

    #[test]
    fn test_replace_dataset_resets_query_keeps_options() {
        let config = EngineConfig::new().initial_view(ViewOptions::new().rowspan_depth(1));
        let mut engine = ResultEngine::with_config(nv_dataset(), None, config);
        engine.set_option_str("showId", true).unwrap();
        engine.set_option_str("format", "grid").unwrap();
        engine.set_filter_text("x").unwrap();
        engine.toggle_sort("n").unwrap();

        let replacement = Dataset::new(vec![Record::new().with("k", 1)]);
        engine.replace_dataset(replacement, None).unwrap();
        let state = engine.state().unwrap();
        assert_eq!(state.filter_text, "");
        assert!(!state.sort.is_active());
        assert!(state.options.show_id);
        assert_eq!(state.options.format, Format::Grid);
        assert_eq!(state.options.rowspan_depth, 1);
        assert_eq!(engine.columns().unwrap().as_slice(), &["k".to_string()]);
    }

    #[test]
    fn test_option_errors() {
        let mut engine = ResultEngine::new(nv_dataset(), None);
        assert!(matches!(
            engine.set_option_str("colour", "red"),
            Err(RsFormatError::UnknownOption(_))
        ));
        assert!(matches!(
            engine.set_option(OptionKey::ShowId, 7),
            Err(RsFormatError::InvalidOption { .. })
        ));
        engine.set_option_str("rowspan", "42").unwrap();
        assert_eq!(engine.state().unwrap().options.rowspan_depth, 10);
    }

    #[test]
    fn test_summary() {
        let mut engine = ResultEngine::new(nv_dataset(), None);
        assert_eq!(engine.summary().unwrap().to_string(), "3 rows returned");
        engine.set_filter_text("y").unwrap();
        let summary = engine.summary().unwrap();
        assert_eq!(summary.visible_rows, 1);
        assert_eq!(summary.to_string(), "1 of 3 rows match");
    }

    #[test]
    fn test_dispose() {
        let mut engine = ResultEngine::new(nv_dataset(), None);
        engine.dispose();
        assert!(engine.is_disposed());
        assert!(matches!(engine.render(), Err(RsFormatError::Disposed)));
        assert!(matches!(engine.export_csv(), Err(RsFormatError::Disposed)));
        assert!(matches!(
            engine.set_filter_text("x"),
            Err(RsFormatError::Disposed)
        ));
        assert!(matches!(
            engine.replace_dataset(nv_dataset(), None),
            Err(RsFormatError::Disposed)
        ));
    }
}
