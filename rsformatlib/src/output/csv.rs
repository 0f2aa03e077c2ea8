//! CSV export.
//!
//! Format: UTF-8 with a leading byte-order mark, every field double-quoted
//! with embedded quotes doubled, CRLF after every record (header included).

use crate::query::ProcessedDataset;

/// Byte-order mark prepended so spreadsheet tools detect UTF-8.
pub const BOM: &str = "\u{FEFF}";

/// Result of a CSV export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvExport {
    /// The source dataset is empty
    NoData,
    /// Encoded CSV payload
    Csv(Vec<u8>),
}

impl CsvExport {
    /// The payload, if there is one.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            CsvExport::NoData => None,
            CsvExport::Csv(bytes) => Some(bytes),
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            CsvExport::NoData => None,
            CsvExport::Csv(bytes) => Some(bytes),
        }
    }
}

/// Quote a single field.
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let quoted: Vec<String> = fields.map(quote_field).collect();
    out.push_str(&quoted.join(","));
    out.push_str("\r\n");
}

/// Encode processed rows as CSV text, BOM included.
pub fn render_csv(processed: &ProcessedDataset<'_>) -> String {
    let mut out = String::from(BOM);
    push_record(&mut out, processed.columns.iter());
    for row in processed.display_rows() {
        push_record(&mut out, row.iter().map(String::as_str));
    }
    out
}
