//! Error types for the interactive layer
//!
//! Most operations tolerate missing elements by returning `None` or doing
//! nothing. The variants here cover the cases that are programmer errors.

use crate::dom::ElementId;
use thiserror::Error;

/// Errors that can occur while configuring or driving an instance
#[derive(Error, Debug)]
pub enum Error {
    /// The element is not (or no longer) part of the document
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    /// No element carries the given id attribute
    #[error("no element with id {0:?}")]
    UnknownId(String),

    /// A selector string could not be parsed
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Settings JSON could not be parsed
    #[error("settings parse error: {0}")]
    Settings(#[from] serde_json::Error),

    /// Settings parsed but hold unusable values
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// The instance was destroyed and can no longer be used
    #[error("instance has been destroyed")]
    Destroyed,
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        Error::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
