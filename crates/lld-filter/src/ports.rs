//! Collaborator boundaries the filter evaluator calls through.
//!
//! The regex engine and the custom expression evaluator are both external
//! collaborators: this crate only needs to know their contracts, not their
//! implementations, which is why they are traits rather than concrete types.

use crate::error::Result;

/// One pattern belonging to a named, server-wide regexp set.
///
/// `negate` mirrors the "result is TRUE" / "result is negated" distinction a
/// global regexp set entry carries; a value passes a set iff it satisfies
/// every entry (non-negated entries must match, negated entries must not).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalRegexp {
    pub pattern: String,
    pub negate: bool,
}

impl GlobalRegexp {
    pub fn new(pattern: impl Into<String>, negate: bool) -> Self {
        Self {
            pattern: pattern.into(),
            negate,
        }
    }
}

/// Resolves whether a value matches a condition's regexp operand.
///
/// Exactly one of `set` (non-empty) or `literal` (`Some`) is meaningful for a
/// given call, matching [`crate::FilterCondition`]'s invariant: a condition
/// loaded from a named set (`@name`) carries a resolved `set` and no literal;
/// a condition loaded from a plain pattern carries a literal and an empty set.
pub trait RegexpPort {
    fn match_value(&self, set: &[GlobalRegexp], literal: Option<&str>, value: &str)
        -> Result<bool>;
}

/// Evaluates a filter's custom boolean/arithmetic expression after the
/// EXPRESSION mode has substituted each condition's match result into it.
pub trait ExprPort {
    /// Returns the numeric result of evaluating `text`, or an error if the
    /// expression is malformed. A non-zero result (double-tolerant) is PASS.
    fn evaluate(&self, text: &str) -> std::result::Result<f64, String>;
}

/// A [`RegexpPort`] backed directly by the `regex` crate.
///
/// Suitable as the default wiring when no richer global-regexp-set engine is
/// available; it treats a set as the conjunction of its entries.
#[derive(Debug, Default)]
pub struct RegexEngine;

impl RegexpPort for RegexEngine {
    fn match_value(
        &self,
        set: &[GlobalRegexp],
        literal: Option<&str>,
        value: &str,
    ) -> Result<bool> {
        if set.is_empty() {
            let pattern = literal.unwrap_or("");
            let re = regex::Regex::new(pattern)?;
            return Ok(re.is_match(value));
        }

        for entry in set {
            let re = regex::Regex::new(&entry.pattern)?;
            let matched = re.is_match(value);
            if matched == entry.negate {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
