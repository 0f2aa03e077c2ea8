//! Error types for rsformatlib

use thiserror::Error;

/// Errors that can occur while loading data or driving a [`ResultEngine`](crate::ResultEngine).
///
/// Empty datasets, filters without matches and unsupported formats are not
/// errors: they are represented in [`RenderedOutput`](crate::RenderedOutput).
#[derive(Error, Debug)]
pub enum RsFormatError {
    /// Option key is not one of the recognized view options
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// Option value has the wrong type or cannot be parsed for its key
    #[error("invalid value for option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    /// Sort requested on a column that is not part of the current view
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// Dataset input is not an array of flat objects
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// JSON decoding failed
    #[error("failed to parse dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The engine was disposed and can no longer be used
    #[error("result engine has been disposed")]
    Disposed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
