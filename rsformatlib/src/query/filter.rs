//! Substring filtering over record values.

use crate::data::Record;

/// Whether any value of `record` contains `needle_lower`.
///
/// `needle_lower` must already be lowercased. The comparison uses each
/// value's display form, so nulls (empty) never match non-empty text.
pub fn record_matches(record: &Record, needle_lower: &str) -> bool {
    record
        .values()
        .any(|value| value.to_display_string().to_lowercase().contains(needle_lower))
}

/// Keep records whose values contain `filter_text`, case-insensitively.
///
/// Empty filter text keeps everything. Order is preserved.
pub fn filter_records<'a>(records: &'a [Record], filter_text: &str) -> Vec<&'a Record> {
    if filter_text.is_empty() {
        return records.iter().collect();
    }
    let needle = filter_text.to_lowercase();
    records
        .iter()
        .filter(|record| record_matches(record, &needle))
        .collect()
}
