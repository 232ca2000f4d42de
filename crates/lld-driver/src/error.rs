//! Error types the rule driver and filter loader can fail with.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LldError {
    /// The rule id was not found in the configuration cache at load time.
    #[error("Invalid discovery rule ID [{itemid}].")]
    InvalidRuleId { itemid: u64 },

    /// A condition's `@name` operand resolved to an empty global regexp set.
    #[error("Global regular expression \"{name}\" does not exist.")]
    UnknownGlobalRegexp { name: String },

    /// Row extraction failed (bad payload shape or macro-path syntax).
    #[error(transparent)]
    Payload(#[from] lld_payload::PayloadError),
}

pub type Result<T> = std::result::Result<T, LldError>;
