//! Error types for the filter crate.

use thiserror::Error;

/// Errors that can occur while compiling or evaluating a filter.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A literal regexp operand failed to compile.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// Result type for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;
