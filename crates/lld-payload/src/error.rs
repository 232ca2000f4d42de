//! Error types for payload parsing and macro-path loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    /// The top-level JSON value was neither an array nor a `{"data": [...]}`
    /// object.
    #[error("Value should be a JSON array.")]
    NotArray,

    /// A legacy object payload was missing its `data` array.
    #[error("Cannot find the \"data\" array in the received JSON object.")]
    MissingDataArray,

    /// A declared JSON path failed syntactic validation.
    #[error("Cannot process LLD macro \"{macro_}\": {reason}.")]
    CannotProcessMacro { macro_: String, reason: String },
}

pub type Result<T> = std::result::Result<T, PayloadError>;
