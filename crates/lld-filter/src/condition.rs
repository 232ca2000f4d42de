//! A single filter predicate over one row macro.

use crate::op::Op;
use crate::ports::{GlobalRegexp, RegexpPort};

/// One predicate: a macro name, its resolved regexp operand, and the operator
/// to apply. Immutable after loading — `regexp_set` is resolved exactly once,
/// at load time, by whoever constructed this condition (see `lld-driver`'s
/// filter loader).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    pub id: u64,
    pub macro_: String,
    pub regexp: String,
    pub op: Op,
    pub regexp_set: Vec<GlobalRegexp>,
}

impl FilterCondition {
    pub fn new(
        id: u64,
        macro_: impl Into<String>,
        regexp: impl Into<String>,
        op: Op,
        regexp_set: Vec<GlobalRegexp>,
    ) -> Self {
        Self {
            id,
            macro_: macro_.into(),
            regexp: regexp.into(),
            op,
            regexp_set,
        }
    }

    /// Evaluates this condition's match primitive against an already-resolved
    /// macro value. `None` (macro resolution miss) is always FAIL, independent
    /// of operator — a condition can never pass on a value it never saw.
    pub fn matches(&self, resolved: Option<&str>, engine: &dyn RegexpPort) -> bool {
        let Some(value) = resolved else {
            return false;
        };
        let literal = if self.regexp_set.is_empty() {
            Some(self.regexp.as_str())
        } else {
            None
        };
        match engine.match_value(&self.regexp_set, literal, value) {
            Ok(matched) => self.op.eval_match(matched),
            Err(_) => false,
        }
    }
}
