//! Error types for saccoview-query

use thiserror::Error;

/// Invalid input to a list controller
///
/// These are caller mistakes (bad page size, unknown filter key) and
/// leave the controller's state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The requested page size is not one of the configured options
    #[error("Page size {size} is not one of the configured options")]
    InvalidPageSize { size: usize },

    /// The filter key is not part of this controller's vocabulary
    #[error("Unknown filter: {key}")]
    UnknownFilter { key: String },

    /// The value is not allowed for this filter
    #[error("Invalid value for filter {key}: {value}")]
    InvalidFilterValue { key: String, value: String },
}

/// A failed page fetch as reported by the collaborator
///
/// Carried as a value in the controller's snapshot so the previous
/// good rows stay visible alongside it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Fetch failed: {message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
