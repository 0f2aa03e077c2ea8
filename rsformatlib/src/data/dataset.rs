//! Datasets: immutable snapshots of records.

use std::io::Read;

use serde::{Deserialize, Serialize};

use super::record::Record;
use crate::error::RsFormatError;
use crate::Result;

/// An ordered, immutable sequence of records.
///
/// Nothing in the pipeline mutates a dataset; stages borrow its records and
/// derive new views from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset from records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of flat objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Read and parse a JSON array of flat objects.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_json_value(value)
    }

    /// Convert an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_array() {
            return Err(RsFormatError::InvalidDataset(
                "expected a JSON array of objects".to_string(),
            ));
        }
        if let Some(pos) = value
            .as_array()
            .and_then(|rows| rows.iter().position(|row| !row.is_object()))
        {
            return Err(RsFormatError::InvalidDataset(format!(
                "row {} is not an object",
                pos + 1
            )));
        }
        let records: Vec<Record> = serde_json::from_value(value)
            .map_err(|e| RsFormatError::InvalidDataset(e.to_string()))?;
        Ok(Self { records })
    }

    /// Records in order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
