//! Error types for leshono-core.

use thiserror::Error;

/// Result type alias using CourseError.
pub type Result<T> = std::result::Result<T, CourseError>;

/// Errors that can occur while loading course input.
///
/// Only whole-input failures surface here. Gaps inside a parseable document
/// degrade to empty fields instead.
#[derive(Debug, Error)]
pub enum CourseError {
    #[error("invalid course document: {0}")]
    InvalidDocument(#[source] serde_json::Error),

    #[error("invalid content rules: {0}")]
    InvalidRules(#[source] serde_json::Error),

    #[error("invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("daily goal must be positive")]
    InvalidGoal,
}
