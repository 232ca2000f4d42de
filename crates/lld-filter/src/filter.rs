//! A loaded filter: its conditions, evaluation mode, and (for EXPRESSION mode)
//! custom expression text.

use crate::condition::FilterCondition;
use crate::ports::{ExprPort, RegexpPort};

/// How a filter's conditions combine into one PASS/FAIL verdict.
///
/// Wire values match the original enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalType {
    AndOr = 0,
    And = 1,
    Or = 2,
    Expression = 3,
}

/// Resolves a macro name to its value for one row.
///
/// A separate trait (rather than this crate depending on `lld-payload`) keeps
/// the filter evaluator ignorant of how rows and macro paths are represented;
/// `lld-payload`'s row type implements this directly.
pub trait MacroLookup {
    fn resolve(&self, macro_name: &str) -> Option<String>;
}

/// A collection of conditions plus an evaluation mode and optional expression.
///
/// When `evaltype == AndOr`, `conditions` must already be sorted by `macro_`
/// so that equal-macro runs are contiguous — this is an invariant the loader
/// establishes, not something the evaluator re-derives.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub conditions: Vec<FilterCondition>,
    pub expression: String,
    pub evaltype: EvalType,
}

impl Filter {
    pub fn new(conditions: Vec<FilterCondition>, expression: String, evaltype: EvalType) -> Self {
        Self {
            conditions,
            expression,
            evaltype,
        }
    }

    /// Evaluates this filter against one row, dispatching on `evaltype`.
    pub fn evaluate(
        &self,
        row: &dyn MacroLookup,
        regexp: &dyn RegexpPort,
        expr: &dyn ExprPort,
    ) -> bool {
        let verdict = match self.evaltype {
            EvalType::And => self.evaluate_and(row, regexp),
            EvalType::Or => self.evaluate_or(row, regexp),
            EvalType::AndOr => self.evaluate_and_or(row, regexp),
            EvalType::Expression => self.evaluate_expression(row, regexp, expr),
        };
        tracing::debug!(evaltype = ?self.evaltype, verdict, "row filter verdict");
        verdict
    }

    fn condition_match(&self, c: &FilterCondition, row: &dyn MacroLookup, regexp: &dyn RegexpPort) -> bool {
        let resolved = row.resolve(&c.macro_);
        let matched = c.matches(resolved.as_deref(), regexp);
        tracing::trace!(id = c.id, macro_ = %c.macro_, op = %c.op, matched, "condition match result");
        matched
    }

    fn evaluate_and(&self, row: &dyn MacroLookup, regexp: &dyn RegexpPort) -> bool {
        self.conditions
            .iter()
            .all(|c| self.condition_match(c, row, regexp))
    }

    fn evaluate_or(&self, row: &dyn MacroLookup, regexp: &dyn RegexpPort) -> bool {
        self.conditions
            .iter()
            .any(|c| self.condition_match(c, row, regexp))
    }

    /// Single forward pass over conditions pre-sorted by macro: commits the
    /// previous group's OR-result into the running AND on every macro
    /// transition (including the first), short-circuiting as soon as a
    /// committed group is FAIL.
    fn evaluate_and_or(&self, row: &dyn MacroLookup, regexp: &dyn RegexpPort) -> bool {
        let mut ret = true;
        let mut last_macro: Option<&str> = None;

        for c in &self.conditions {
            let rc = self.condition_match(c, row, regexp);
            match last_macro {
                Some(m) if m == c.macro_ => {
                    if rc {
                        ret = true;
                    }
                }
                _ => {
                    if last_macro.is_some() && !ret {
                        return false;
                    }
                    ret = rc;
                }
            }
            last_macro = Some(&c.macro_);
        }
        ret
    }

    fn evaluate_expression(
        &self,
        row: &dyn MacroLookup,
        regexp: &dyn RegexpPort,
        expr: &dyn ExprPort,
    ) -> bool {
        let mut text = self.expression.clone();
        for c in &self.conditions {
            let matched = self.condition_match(c, row, regexp);
            substitute_token(&mut text, c.id, matched);
        }
        match expr.evaluate(&text) {
            Ok(result) => result.abs() > DOUBLE_COMPARE_EPSILON,
            Err(e) => {
                tracing::debug!(error = %e, "expression evaluator failed, treating as FAIL");
                false
            }
        }
    }
}

/// Tolerance for "result is not zero", matching the original's
/// `zbx_double_compare`-style epsilon rather than an exact floating-point
/// comparison.
const DOUBLE_COMPARE_EPSILON: f64 = 1e-9;

/// Replaces every occurrence of the token `{id}` in `text` with `'1'`/`'0'`,
/// padding the rest of the token's span with spaces so the string's total
/// length — and every other token's column offset — is unchanged.
fn substitute_token(text: &mut String, id: u64, matched: bool) {
    let token = format!("{{{id}}}");
    let digit = if matched { '1' } else { '0' };

    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find(&token) {
        let start = search_from + rel;
        let end = start + token.len();
        let mut replacement = String::with_capacity(token.len());
        replacement.push(digit);
        replacement.extend(std::iter::repeat(' ').take(token.len() - 1));
        text.replace_range(start..end, &replacement);
        search_from = start + token.len();
    }
}
