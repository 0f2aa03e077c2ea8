//! Engine configuration.
//!
//! An `EngineConfig` is handed to the engine at construction and stays
//! fixed for the engine's lifetime. It carries the indicator texts, the
//! break marker, and the display options a freshly loaded view starts with.

use serde::{Deserialize, Serialize};

use crate::escape::BREAK_MARKER;
use crate::query::{clamp_rowspan_depth, ViewOptions};

/// Configuration for a [`ResultEngine`](crate::ResultEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Message returned for every format when the dataset is empty
    pub no_data_text: String,
    /// Placeholder text for a table whose filter matches nothing
    pub no_match_text: String,
    /// Message returned for an unrecognized format
    pub unsupported_format_text: String,
    /// Marker substituted for line breaks in table cells
    pub break_marker: String,
    /// Display options the view starts with
    pub initial_view: ViewOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            no_data_text: "No data to display".to_string(),
            no_match_text: "No matching rows".to_string(),
            unsupported_format_text: "Unsupported format".to_string(),
            break_marker: BREAK_MARKER.to_string(),
            initial_view: ViewOptions::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the empty-dataset message
    pub fn no_data_text(mut self, text: impl Into<String>) -> Self {
        self.no_data_text = text.into();
        self
    }

    /// Builder: set the no-match placeholder
    pub fn no_match_text(mut self, text: impl Into<String>) -> Self {
        self.no_match_text = text.into();
        self
    }

    /// Builder: set the unsupported-format message
    pub fn unsupported_format_text(mut self, text: impl Into<String>) -> Self {
        self.unsupported_format_text = text.into();
        self
    }

    /// Builder: set the break marker
    pub fn break_marker(mut self, marker: impl Into<String>) -> Self {
        self.break_marker = marker.into();
        self
    }

    /// Builder: set the initial display options
    pub fn initial_view(mut self, options: ViewOptions) -> Self {
        self.initial_view = options;
        self
    }

    /// The initial options with the rowspan depth brought into range.
    ///
    /// `ViewOptions` built by struct literal or deserialized skip the
    /// builder's clamp.
    pub(crate) fn normalized_view(&self) -> ViewOptions {
        let mut options = self.initial_view.clone();
        options.rowspan_depth =
            clamp_rowspan_depth(i64::try_from(options.rowspan_depth).unwrap_or(i64::MAX));
        options
    }
}
