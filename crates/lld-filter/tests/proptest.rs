//! Property-based tests for the filter evaluator using proptest.

use lld_filter::ports::{GlobalRegexp, RegexEngine, RegexpPort};
use lld_filter::{EvalType, Filter, FilterCondition, MacroLookup, Op};
use proptest::prelude::*;
use std::collections::HashMap;

struct FakeRow(HashMap<&'static str, String>);

impl MacroLookup for FakeRow {
    fn resolve(&self, macro_name: &str) -> Option<String> {
        self.0.get(macro_name).cloned()
    }
}

/// A `RegexpPort` whose verdict is plain string equality between the literal
/// operand and the resolved value — lets property tests dictate exactly
/// which conditions pass without fighting real regex syntax.
struct ExactMatch;

impl RegexpPort for ExactMatch {
    fn match_value(
        &self,
        _set: &[GlobalRegexp],
        literal: Option<&str>,
        value: &str,
    ) -> lld_filter::Result<bool> {
        Ok(literal == Some(value))
    }
}

struct NoExpr;
impl lld_filter::ExprPort for NoExpr {
    fn evaluate(&self, _text: &str) -> std::result::Result<f64, String> {
        Err("unused".into())
    }
}

const MACROS: [&str; 3] = ["{#A}", "{#B}", "{#C}"];

fn desired_condition_strategy() -> impl Strategy<Value = (usize, bool)> {
    (0..MACROS.len(), any::<bool>())
}

proptest! {
    /// §8 property 2: AND_OR equals the group-OR-of-AND law, independent of
    /// the order conditions were generated in within a macro group.
    #[test]
    fn and_or_equals_group_or_of_and(
        wants in prop::collection::vec(desired_condition_strategy(), 0..12),
    ) {
        let row = FakeRow(HashMap::from_iter(
            MACROS.iter().map(|m| (*m, format!("value-of-{m}"))),
        ));

        let mut conditions: Vec<FilterCondition> = wants
            .iter()
            .enumerate()
            .map(|(i, (macro_idx, should_pass))| {
                let macro_name = MACROS[*macro_idx];
                let value = row.0.get(macro_name).unwrap().clone();
                let literal = if *should_pass {
                    value
                } else {
                    format!("{value}-mismatch")
                };
                FilterCondition::new(i as u64, macro_name, literal, Op::Regexp, vec![])
            })
            .collect();
        conditions.sort_by(|a, b| a.macro_.cmp(&b.macro_));

        let filter = Filter::new(conditions, String::new(), EvalType::AndOr);
        let actual = filter.evaluate(&row, &ExactMatch, &NoExpr);

        let mut expected_by_macro: HashMap<usize, bool> = HashMap::new();
        for (macro_idx, should_pass) in &wants {
            let entry = expected_by_macro.entry(*macro_idx).or_insert(false);
            *entry = *entry || *should_pass;
        }
        let expected = expected_by_macro.values().all(|group_pass| *group_pass);

        prop_assert_eq!(actual, expected);
    }

    /// §8 property 3: when the macro resolves, NOT_REGEXP is the exact
    /// negation of REGEXP for any pattern that compiles.
    #[test]
    fn not_regexp_negates_regexp_when_value_resolves(
        value in ".{0,12}",
        needle in ".{0,12}",
    ) {
        let pattern = regex::escape(&needle);
        let pass_cond = FilterCondition::new(1, "{#M}", pattern.clone(), Op::Regexp, vec![]);
        let fail_cond = FilterCondition::new(2, "{#M}", pattern, Op::NotRegexp, vec![]);

        let regexp_result = pass_cond.matches(Some(&value), &RegexEngine);
        let not_regexp_result = fail_cond.matches(Some(&value), &RegexEngine);

        prop_assert_ne!(regexp_result, not_regexp_result);
    }

    /// Same invariant's other half: a macro that never resolves is FAIL
    /// under both operators.
    #[test]
    fn both_operators_fail_on_unresolved_macro(needle in ".{0,12}") {
        let pattern = regex::escape(&needle);
        let pass_cond = FilterCondition::new(1, "{#M}", pattern.clone(), Op::Regexp, vec![]);
        let fail_cond = FilterCondition::new(2, "{#M}", pattern, Op::NotRegexp, vec![]);

        prop_assert!(!pass_cond.matches(None, &RegexEngine));
        prop_assert!(!fail_cond.matches(None, &RegexEngine));
    }
}
