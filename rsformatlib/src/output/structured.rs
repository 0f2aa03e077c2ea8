//! Pretty-printed JSON view of the processed records.

use serde::{Deserialize, Serialize};

use crate::escape::escape_markup;
use crate::query::ProcessedDataset;
use crate::Result;

/// Rendered JSON text (2-space indent, field order preserved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredView {
    pub text: String,
}

impl StructuredView {
    pub fn render(processed: &ProcessedDataset<'_>) -> Result<Self> {
        let text = serde_json::to_string_pretty(&processed.rows)?;
        Ok(StructuredView { text })
    }

    /// JSON embedded in a `<pre>` block, escaped once.
    pub fn to_markup(&self) -> String {
        format!(
            "<pre class=\"rsformat-json\">{}</pre>",
            escape_markup(&self.text)
        )
    }
}
