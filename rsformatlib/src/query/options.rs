//! View options and view state.
//!
//! This module contains the configuration types that control which view is
//! rendered and how the result set is filtered and sorted before rendering.
//! Options are validated here, at the boundary, so the rest of the pipeline
//! only ever sees legal values.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::ColumnList;
use crate::error::RsFormatError;
use crate::Result;

use super::augment::ID_COLUMN;
use super::sort::SortState;

/// Largest accepted rowspan depth. Larger values are clamped.
pub const MAX_ROWSPAN_DEPTH: usize = 10;

/// Display format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Format {
    /// Fixed-width text grid
    Grid,
    /// Table with sort indicators and optional vertical merging
    #[default]
    Table,
    /// Pivoted table: columns become rows
    Transposed,
    /// Pretty-printed JSON
    Structured,
    /// A format name that is not recognized; renders as an explicit
    /// "unsupported format" result
    Unsupported(String),
}

impl Format {
    /// Canonical name of the format.
    pub fn name(&self) -> &str {
        match self {
            Format::Grid => "grid",
            Format::Table => "table",
            Format::Transposed => "transposed",
            Format::Structured => "structured",
            Format::Unsupported(name) => name,
        }
    }

    /// Whether this is a recognized format.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Format::Unsupported(_))
    }
}

impl From<&str> for Format {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "grid" | "rowset" => Format::Grid,
            "table" => Format::Table,
            "transposed" | "transpose" => Format::Transposed,
            "structured" | "json" => Format::Structured,
            _ => Format::Unsupported(s.to_string()),
        }
    }
}

impl From<String> for Format {
    fn from(s: String) -> Self {
        Format::from(s.as_str())
    }
}

impl From<Format> for String {
    fn from(format: Format) -> Self {
        format.name().to_string()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// No sorting; rows keep dataset order
    #[default]
    None,
    /// Ascending (A-Z, smallest first)
    Asc,
    /// Descending (Z-A, largest first)
    Desc,
}

impl SortDirection {
    /// Next direction when the active column is clicked again.
    pub fn cycle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::None,
            SortDirection::None => SortDirection::Asc,
        }
    }
}

/// Recognized view options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Format,
    ShowId,
    Transpose,
    RowspanDepth,
    NewlineToBreak,
}

impl OptionKey {
    pub fn name(&self) -> &'static str {
        match self {
            OptionKey::Format => "format",
            OptionKey::ShowId => "show_id",
            OptionKey::Transpose => "transpose",
            OptionKey::RowspanDepth => "rowspan_depth",
            OptionKey::NewlineToBreak => "newline_to_break",
        }
    }
}

impl FromStr for OptionKey {
    type Err = RsFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "format" => Ok(OptionKey::Format),
            "showId" | "show_id" | "show-id" => Ok(OptionKey::ShowId),
            "transpose" => Ok(OptionKey::Transpose),
            "rowspanDepth" | "rowspan_depth" | "rowspan-depth" | "rowspan" => {
                Ok(OptionKey::RowspanDepth)
            }
            "newlineToBreak" | "newline_to_break" | "newline-to-break" | "newlineToBr" => {
                Ok(OptionKey::NewlineToBreak)
            }
            _ => Err(RsFormatError::UnknownOption(s.to_string())),
        }
    }
}

/// Raw option value as received from a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Integer(n)
    }
}

impl From<i32> for OptionValue {
    fn from(n: i32) -> Self {
        OptionValue::Integer(n as i64)
    }
}

impl From<usize> for OptionValue {
    fn from(n: usize) -> Self {
        OptionValue::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<Format> for OptionValue {
    fn from(format: Format) -> Self {
        OptionValue::Text(format.name().to_string())
    }
}

fn invalid(key: OptionKey, message: impl Into<String>) -> RsFormatError {
    RsFormatError::InvalidOption {
        key: key.name().to_string(),
        message: message.into(),
    }
}

fn expect_bool(key: OptionKey, value: OptionValue) -> Result<bool> {
    match value {
        OptionValue::Bool(b) => Ok(b),
        OptionValue::Text(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(invalid(key, format!("expected a boolean, got '{}'", s))),
        },
        OptionValue::Integer(n) => Err(invalid(key, format!("expected a boolean, got {}", n))),
    }
}

fn expect_integer(key: OptionKey, value: OptionValue) -> Result<i64> {
    match value {
        OptionValue::Integer(n) => Ok(n),
        OptionValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(key, format!("expected an integer, got '{}'", s))),
        OptionValue::Bool(b) => Err(invalid(key, format!("expected an integer, got {}", b))),
    }
}

/// Clamp a requested rowspan depth into `0..=MAX_ROWSPAN_DEPTH`.
pub fn clamp_rowspan_depth(requested: i64) -> usize {
    let clamped = requested.clamp(0, MAX_ROWSPAN_DEPTH as i64) as usize;
    if clamped as i64 != requested {
        debug!("rowspan depth {} clamped to {}", requested, clamped);
    }
    clamped
}

/// Display preferences.
///
/// These survive a dataset replacement; filter and sort do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Selected display format
    pub format: Format,
    /// Prepend a 1-based ordinal `ID` column
    pub show_id: bool,
    /// Show the pivoted view regardless of `format`
    pub transpose: bool,
    /// Number of leading columns eligible for vertical merging
    pub rowspan_depth: usize,
    /// Convert line breaks in cell text to break markers
    pub newline_to_break: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            format: Format::Table,
            show_id: false,
            transpose: false,
            rowspan_depth: 3,
            newline_to_break: true,
        }
    }
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set format
    pub fn format(mut self, format: impl Into<Format>) -> Self {
        self.format = format.into();
        self
    }

    /// Builder: set ID column visibility
    pub fn show_id(mut self, show: bool) -> Self {
        self.show_id = show;
        self
    }

    /// Builder: set transpose flag
    pub fn transpose(mut self, transpose: bool) -> Self {
        self.transpose = transpose;
        self
    }

    /// Builder: set rowspan depth (clamped)
    pub fn rowspan_depth(mut self, depth: usize) -> Self {
        self.rowspan_depth = clamp_rowspan_depth(i64::try_from(depth).unwrap_or(i64::MAX));
        self
    }

    /// Builder: set line-break conversion
    pub fn newline_to_break(mut self, enabled: bool) -> Self {
        self.newline_to_break = enabled;
        self
    }

    /// The format actually rendered: the transpose flag wins over `format`.
    pub fn effective_format(&self) -> Format {
        if self.transpose {
            Format::Transposed
        } else {
            self.format.clone()
        }
    }

    /// Validate and apply a single option.
    pub fn set(&mut self, key: OptionKey, value: OptionValue) -> Result<()> {
        match key {
            OptionKey::Format => match value {
                OptionValue::Text(name) => self.format = Format::from(name),
                other => return Err(invalid(key, format!("expected a format name, got {:?}", other))),
            },
            OptionKey::ShowId => self.show_id = expect_bool(key, value)?,
            OptionKey::Transpose => self.transpose = expect_bool(key, value)?,
            OptionKey::RowspanDepth => {
                self.rowspan_depth = clamp_rowspan_depth(expect_integer(key, value)?)
            }
            OptionKey::NewlineToBreak => self.newline_to_break = expect_bool(key, value)?,
        }
        Ok(())
    }

    /// Column list as seen by the views: `ID` leads when enabled.
    pub fn view_columns(&self, columns: &ColumnList) -> ColumnList {
        if self.show_id {
            columns.with_leading(ID_COLUMN)
        } else {
            columns.clone()
        }
    }
}

/// A state change requested by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Change a display option
    SetOption(OptionKey, OptionValue),
    /// Replace the filter text
    SetFilterText(String),
    /// Click on a column header
    ToggleSort(String),
}

/// Complete view state: display options, sort and filter.
///
/// This is the single source of truth for rendering; processed data is
/// derived from it on every access and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    #[serde(flatten)]
    pub options: ViewOptions,
    pub sort: SortState,
    pub filter_text: String,
}

impl ViewState {
    pub fn new(options: ViewOptions) -> Self {
        Self {
            options,
            sort: SortState::default(),
            filter_text: String::new(),
        }
    }

    /// Apply an intent, returning the new state.
    ///
    /// `columns` is the dataset's column list (without `ID`); sort targets
    /// are validated against the columns currently on display.
    pub fn apply(&self, intent: Intent, columns: &ColumnList) -> Result<ViewState> {
        let mut next = self.clone();
        match intent {
            Intent::SetOption(key, value) => next.options.set(key, value)?,
            Intent::SetFilterText(text) => next.filter_text = text,
            Intent::ToggleSort(column) => {
                if !self.options.view_columns(columns).contains(&column) {
                    return Err(RsFormatError::UnknownColumn(column));
                }
                next.sort = self.sort.toggle(&column);
            }
        }
        Ok(next)
    }

    /// Reset filter and sort, keeping display options.
    pub fn reset_query(&self) -> ViewState {
        ViewState::new(self.options.clone())
    }
}
