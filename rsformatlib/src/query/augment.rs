//! Row augmentation: the synthetic ordinal `ID` column.
//!
//! Rows are not copied to add the ID. A [`ProcessedRow`] borrows its source
//! record and carries the ordinal alongside it; lookups of `ID` resolve to
//! the ordinal, everything else to the record.

use std::borrow::Cow;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::data::value::NULL;
use crate::data::{Record, Value};

/// Name of the synthetic ordinal column.
pub const ID_COLUMN: &str = "ID";

/// A record as it flows through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessedRow<'a> {
    /// 1-based position among the filtered rows, when IDs are shown
    pub ordinal: Option<usize>,
    /// Source record
    pub record: &'a Record,
}

impl<'a> ProcessedRow<'a> {
    /// Row without an ordinal.
    pub fn plain(record: &'a Record) -> Self {
        Self {
            ordinal: None,
            record,
        }
    }

    /// Value of `column`; missing keys are null.
    pub fn value(&self, column: &str) -> Cow<'a, Value> {
        self.lookup(column).unwrap_or(Cow::Borrowed(&NULL))
    }

    /// Value of `column`, or `None` when the record has no such key.
    pub fn lookup(&self, column: &str) -> Option<Cow<'a, Value>> {
        match self.ordinal {
            Some(n) if column == ID_COLUMN => Some(Cow::Owned(Value::from(n))),
            _ => self.record.get(column).map(Cow::Borrowed),
        }
    }
}

/// Number rows 1..=n in their current order.
///
/// Applied after filtering, so IDs count visible rows rather than dataset
/// positions.
pub fn number_rows(records: Vec<&Record>, show_id: bool) -> Vec<ProcessedRow<'_>> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| ProcessedRow {
            ordinal: show_id.then_some(i + 1),
            record,
        })
        .collect()
}

impl Serialize for ProcessedRow<'_> {
    /// Serializes as an object: `ID` first when present, then the record's
    /// own fields in insertion order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(n) = self.ordinal {
            map.serialize_entry(ID_COLUMN, &n)?;
        }
        for (key, value) in self.record.iter() {
            if self.ordinal.is_some() && key == ID_COLUMN {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
