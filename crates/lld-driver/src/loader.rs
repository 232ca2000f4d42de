//! The filter loader (C5): reads raw conditions from the store, resolves
//! `@name` regexp-set references, and runs simple-macro substitution on
//! literal operands.

use crate::error::{LldError, Result};
use crate::model::RuleRecord;
use crate::ports::{ConfigPort, Item, MacroPort};
use lld_filter::{EvalType, Filter, FilterCondition};

/// Loads and fully resolves the filter for `rule`.
///
/// Any partial failure (an unresolvable global regexp reference, or the rule
/// vanishing from the configuration cache between the caller's own lookup
/// and this one) discards the whole condition list.
pub fn load_filter(
    config: &dyn ConfigPort,
    macros: &dyn MacroPort,
    rule: &RuleRecord,
) -> Result<Filter> {
    if config.get_rule(rule.itemid).is_none() {
        return Err(LldError::InvalidRuleId {
            itemid: rule.itemid,
        });
    }

    let item = config.get_item(rule.itemid).unwrap_or(Item {
        itemid: rule.itemid,
        hostid: rule.hostid,
    });

    let mut conditions = Vec::new();
    for raw in config.get_conditions(rule.itemid) {
        if let Some(name) = raw.value.strip_prefix('@') {
            let set = config.resolve_global_regexp(name);
            if set.is_empty() {
                return Err(LldError::UnknownGlobalRegexp {
                    name: name.to_string(),
                });
            }
            conditions.push(FilterCondition::new(raw.id, raw.macro_, "", raw.op, set));
        } else {
            let substituted = macros.substitute_simple(&raw.value, item);
            conditions.push(FilterCondition::new(
                raw.id,
                raw.macro_,
                substituted,
                raw.op,
                vec![],
            ));
        }
    }

    if rule.evaltype == EvalType::AndOr {
        conditions.sort_by(|a, b| a.macro_.cmp(&b.macro_));
    }

    Ok(Filter::new(conditions, rule.expression.clone(), rule.evaltype))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RuleState;
    use crate::ports::RawCondition;
    use lld_filter::{GlobalRegexp, Op};
    use std::sync::Mutex;

    struct FakeConfig {
        rule: RuleRecord,
        conditions: Vec<RawCondition>,
        regexp_sets: Mutex<std::collections::HashMap<String, Vec<GlobalRegexp>>>,
        rule_present: bool,
    }

    impl ConfigPort for FakeConfig {
        fn lock_lld_rule(&self, _itemid: u64) -> bool {
            true
        }
        fn unlock_lld_rule(&self, _itemid: u64) {}
        fn get_rule(&self, _itemid: u64) -> Option<RuleRecord> {
            self.rule_present.then(|| self.rule.clone())
        }
        fn get_item(&self, _itemid: u64) -> Option<Item> {
            None
        }
        fn get_conditions(&self, _itemid: u64) -> Vec<RawCondition> {
            self.conditions.clone()
        }
        fn get_macro_paths(&self, _itemid: u64) -> Vec<(String, String)> {
            vec![]
        }
        fn resolve_global_regexp(&self, name: &str) -> Vec<GlobalRegexp> {
            self.regexp_sets
                .lock()
                .unwrap()
                .get(name)
                .cloned()
                .unwrap_or_default()
        }
        fn apply_item_diffs(&self, _diffs: &[crate::model::RuleDiff]) {}
    }

    struct FakeMacros;
    impl MacroPort for FakeMacros {
        fn substitute_simple(&self, target: &str, _context: Item) -> String {
            target.to_string()
        }
    }

    fn base_rule() -> RuleRecord {
        RuleRecord {
            itemid: 1,
            hostid: 10,
            key: "discovery".into(),
            state: RuleState::Normal,
            evaltype: EvalType::And,
            expression: String::new(),
            last_error: String::new(),
            lifetime_spec: "30d".into(),
        }
    }

    #[test]
    fn s5_unknown_global_regexp_fails_load() {
        let config = FakeConfig {
            rule: base_rule(),
            conditions: vec![RawCondition {
                id: 1,
                macro_: "{#FS}".into(),
                value: "@nonexistent".into(),
                op: Op::Regexp,
            }],
            regexp_sets: Mutex::new(Default::default()),
            rule_present: true,
        };
        let rule = base_rule();
        let err = load_filter(&config, &FakeMacros, &rule).unwrap_err();
        assert!(matches!(err, LldError::UnknownGlobalRegexp { name } if name == "nonexistent"));
    }

    #[test]
    fn known_global_regexp_resolves() {
        let mut sets = std::collections::HashMap::new();
        sets.insert("known".to_string(), vec![GlobalRegexp::new("^x", false)]);
        let config = FakeConfig {
            rule: base_rule(),
            conditions: vec![RawCondition {
                id: 1,
                macro_: "{#FS}".into(),
                value: "@known".into(),
                op: Op::Regexp,
            }],
            regexp_sets: Mutex::new(sets),
            rule_present: true,
        };
        let rule = base_rule();
        let filter = load_filter(&config, &FakeMacros, &rule).unwrap();
        assert_eq!(filter.conditions.len(), 1);
        assert!(!filter.conditions[0].regexp_set.is_empty());
    }

    #[test]
    fn and_or_conditions_are_sorted_by_macro() {
        let mut rule = base_rule();
        rule.evaltype = EvalType::AndOr;
        let config = FakeConfig {
            rule: rule.clone(),
            conditions: vec![
                RawCondition {
                    id: 1,
                    macro_: "{#TYPE}".into(),
                    value: "ext4".into(),
                    op: Op::Regexp,
                },
                RawCondition {
                    id: 2,
                    macro_: "{#FS}".into(),
                    value: "^/$".into(),
                    op: Op::Regexp,
                },
            ],
            regexp_sets: Mutex::new(Default::default()),
            rule_present: true,
        };
        let filter = load_filter(&config, &FakeMacros, &rule).unwrap();
        assert_eq!(filter.conditions[0].macro_, "{#FS}");
        assert_eq!(filter.conditions[1].macro_, "{#TYPE}");
    }

    #[test]
    fn vanished_rule_is_invalid_rule_id() {
        let config = FakeConfig {
            rule: base_rule(),
            conditions: vec![],
            regexp_sets: Mutex::new(Default::default()),
            rule_present: false,
        };
        let rule = base_rule();
        let err = load_filter(&config, &FakeMacros, &rule).unwrap_err();
        assert!(matches!(err, LldError::InvalidRuleId { itemid: 1 }));
    }
}
