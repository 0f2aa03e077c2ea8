//! Column lists and column inference.

use serde::{Deserialize, Serialize};

use super::dataset::Dataset;

/// Ordered list of unique column names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnList {
    names: Vec<String>,
}

impl ColumnList {
    /// Build a column list; repeated names keep their first position.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self { names: unique }
    }

    /// Copy of this list with `name` moved to the front.
    pub fn with_leading(&self, name: &str) -> Self {
        let mut names = Vec::with_capacity(self.names.len() + 1);
        names.push(name.to_string());
        names.extend(self.names.iter().filter(|n| *n != name).cloned());
        Self { names }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Determine the column set for a dataset.
///
/// Explicit columns are used as given. Otherwise the keys of the first record
/// define the columns: later records with extra keys do not add columns, and
/// keys they lack render as empty.
pub fn extract_columns(dataset: &Dataset, explicit: Option<&[String]>) -> ColumnList {
    match explicit {
        Some(names) => ColumnList::new(names.iter().cloned()),
        None => dataset
            .records()
            .first()
            .map(|first| ColumnList::new(first.keys()))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::Record;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Record::new().with("name", "a").with("age", 1),
            Record::new().with("age", 2).with("extra", true),
        ])
    }

    #[test]
    fn test_infers_from_first_record() {
        let cols = extract_columns(&sample(), None);
        assert_eq!(cols.as_slice(), &["name".to_string(), "age".to_string()]);
        assert!(!cols.contains("extra"));
    }

    #[test]
    fn test_explicit_columns_used_verbatim() {
        let explicit = vec!["age".to_string(), "missing".to_string()];
        let cols = extract_columns(&sample(), Some(&explicit));
        assert_eq!(cols.as_slice(), explicit.as_slice());
    }

    #[test]
    fn test_empty_dataset_has_no_columns() {
        assert!(extract_columns(&Dataset::default(), None).is_empty());
    }

    #[test]
    fn test_duplicates_dropped() {
        let cols = ColumnList::new(["a", "b", "a"]);
        assert_eq!(cols.len(), 2);
    }

    #[test]
    fn test_with_leading() {
        let cols = ColumnList::new(["a", "ID", "b"]).with_leading("ID");
        let names: Vec<&str> = cols.iter().collect();
        assert_eq!(names, vec!["ID", "a", "b"]);
    }
}
