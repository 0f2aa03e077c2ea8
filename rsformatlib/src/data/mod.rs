//! Data model: scalar values, records, datasets and their columns.
//!
//! This module handles the first stage of the pipeline - holding the result
//! set the engine works on. It provides:
//!
//! - **Values**: Scalar cells (`Value`)
//! - **Records**: Ordered name → value rows (`Record`)
//! - **Datasets**: Immutable record snapshots, loadable from JSON (`Dataset`)
//! - **Columns**: Column inference (`extract_columns`, `ColumnList`)
//!
//! ## Example
//!
//! ```rust
//! use rsformatlib::data::{extract_columns, Dataset};
//!
//! let dataset = Dataset::from_json_str(r#"[{"dept":"A","emp":"1"}]"#).unwrap();
//! let columns = extract_columns(&dataset, None);
//! assert_eq!(columns.as_slice(), &["dept".to_string(), "emp".to_string()]);
//! ```

pub mod columns;
pub mod dataset;
pub mod record;
pub mod value;

pub use columns::{extract_columns, ColumnList};
pub use dataset::Dataset;
pub use record::Record;
pub use value::Value;
