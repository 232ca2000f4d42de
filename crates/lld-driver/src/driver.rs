//! The rule driver (C8): the orchestration state machine described in
//! §4.7 of this project's specification.

use crate::loader::load_filter;
use crate::model::{RuleDiff, RuleRecord, RuleState};
use crate::ports::{ConfigPort, DownstreamOutcome, DownstreamPort, EventPort, Item, MacroPort};
use lld_filter::{ExprPort, RegexpPort};
use lld_payload::{extract_rows, MacroPathTable, Row};

/// Tunables a host constructs and passes in; see §10 of this project's
/// specification. 25 years matches the original's fallback for an
/// unparseable lifetime spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    pub default_lifetime_secs: i64,
    pub max_lifetime_secs: i64,
}

const SEC_PER_YEAR: i64 = 365 * 86_400;

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            default_lifetime_secs: 25 * SEC_PER_YEAR,
            max_lifetime_secs: 25 * SEC_PER_YEAR,
        }
    }
}

/// What one call to [`process_rule`] actually did, for callers (and tests)
/// that want to observe the outcome without inspecting collaborator fakes.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// Another invocation already held the rule's lock; this call was a no-op.
    LockContended,
    /// The rule's row was not found; this call was a no-op.
    RuleMissing,
    /// The run completed (successfully or with an error persisted to the
    /// rule), carrying whatever diff — if any — was applied.
    Processed { diff: Option<RuleDiff> },
}

enum DownstreamAbort {
    Abandon,
    Error(String),
}

/// Releases a rule's lock via [`ConfigPort::unlock_lld_rule`] on every exit
/// path, including early returns — the RAII counterpart to `lock_lld_rule`.
struct ConfigLockGuard<'a> {
    config: &'a dyn ConfigPort,
    itemid: u64,
}

impl Drop for ConfigLockGuard<'_> {
    fn drop(&mut self) {
        self.config.unlock_lld_rule(self.itemid);
    }
}

/// Processes one discovery rule's payload end to end: lock, load, filter,
/// downstream update, state transition, error persistence, unlock.
#[allow(clippy::too_many_arguments)]
pub fn process_rule(
    config: &dyn ConfigPort,
    macros: &dyn MacroPort,
    regexp: &dyn RegexpPort,
    expr: &dyn ExprPort,
    events: &dyn EventPort,
    downstream: &dyn DownstreamPort,
    driver_config: &DriverConfig,
    itemid: u64,
    payload: &serde_json::Value,
    value_ts: i64,
    now: i64,
) -> ProcessOutcome {
    if !config.lock_lld_rule(itemid) {
        tracing::warn!(itemid, "discovery rule is already being processed, skipping");
        return ProcessOutcome::LockContended;
    }
    let _guard = ConfigLockGuard { config, itemid };

    let Some(rule) = config.get_rule(itemid) else {
        tracing::warn!(itemid, "discovery rule not found, skipping");
        return ProcessOutcome::RuleMissing;
    };

    let lifetime = resolve_lifetime(config, macros, &rule, driver_config);

    let mut diff = RuleDiff::new(itemid);
    let mut error_text = String::new();
    let mut abandoned = false;

    match load_filter(config, macros, &rule).and_then(|filter| {
        let macro_paths = MacroPathTable::load(config.get_macro_paths(itemid))?;
        Ok((filter, macro_paths))
    }) {
        Err(err) => {
            error_text = err.to_string();
        }
        Ok((filter, macro_paths)) => {
            match extract_rows(payload, &filter, &macro_paths, regexp, expr) {
                Err(err) => {
                    error_text = err.to_string();
                }
                Ok((mut rows, info)) => {
                    match run_downstream(
                        downstream,
                        events,
                        rule.hostid,
                        itemid,
                        &mut rows,
                        lifetime,
                        now,
                        rule.state,
                        value_ts,
                        &mut diff,
                    ) {
                        Ok(()) => error_text.push_str(&info),
                        Err(DownstreamAbort::Abandon) => abandoned = true,
                        Err(DownstreamAbort::Error(e)) => {
                            error_text = e;
                            error_text.push_str(&info);
                        }
                    }
                }
            }
        }
    }

    if abandoned {
        return ProcessOutcome::Processed { diff: None };
    }

    if error_text != rule.last_error {
        diff.error = Some(error_text);
    }

    if !diff.is_empty() {
        config.apply_item_diffs(std::slice::from_ref(&diff));
    }

    let diff = if diff.is_empty() { None } else { Some(diff) };
    ProcessOutcome::Processed { diff }
}

#[allow(clippy::too_many_arguments)]
fn run_downstream(
    downstream: &dyn DownstreamPort,
    events: &dyn EventPort,
    hostid: u64,
    itemid: u64,
    rows: &mut [Row<'_>],
    lifetime: i64,
    now: i64,
    rule_state: RuleState,
    value_ts: i64,
    diff: &mut RuleDiff,
) -> Result<(), DownstreamAbort> {
    match downstream.update_items(hostid, itemid, rows, lifetime, now) {
        DownstreamOutcome::Ok => {}
        DownstreamOutcome::ParentHostRemoved => return Err(DownstreamAbort::Abandon),
        DownstreamOutcome::Error(e) => return Err(DownstreamAbort::Error(e)),
    }

    downstream.sort_item_links(rows);

    match downstream.update_triggers(hostid, rows) {
        DownstreamOutcome::Ok => {}
        DownstreamOutcome::ParentHostRemoved => return Err(DownstreamAbort::Abandon),
        DownstreamOutcome::Error(e) => return Err(DownstreamAbort::Error(e)),
    }

    match downstream.update_graphs(hostid, rows) {
        DownstreamOutcome::Ok => {}
        DownstreamOutcome::ParentHostRemoved => return Err(DownstreamAbort::Abandon),
        DownstreamOutcome::Error(e) => return Err(DownstreamAbort::Error(e)),
    }

    downstream.update_hosts(hostid, rows);

    if rule_state == RuleState::NotSupported {
        events.add(itemid, value_ts);
        events.process();
        events.clear();
        diff.state = Some(RuleState::Normal);
    }

    Ok(())
}

fn resolve_lifetime(
    config: &dyn ConfigPort,
    macros: &dyn MacroPort,
    rule: &RuleRecord,
    driver_config: &DriverConfig,
) -> i64 {
    let item = config.get_item(rule.itemid).unwrap_or(Item {
        itemid: rule.itemid,
        hostid: rule.hostid,
    });
    let substituted = macros.substitute_simple(&rule.lifetime_spec, item);
    let secs = parse_time_suffix(&substituted).unwrap_or_else(|| {
        tracing::warn!(
            itemid = rule.itemid,
            lifetime_spec = %rule.lifetime_spec,
            "cannot parse discovery rule lifetime, using default"
        );
        driver_config.default_lifetime_secs
    });
    secs.min(driver_config.max_lifetime_secs)
}

/// Parses a Zabbix-style time suffix (`"30d"`, `"3600"`, `"2w"`) into seconds.
fn parse_time_suffix(spec: &str) -> Option<i64> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }
    let last = spec.chars().last()?;
    let (digits, multiplier) = if last.is_ascii_digit() {
        (spec, 1)
    } else {
        let multiplier = match last {
            's' => 1,
            'm' => 60,
            'h' => 3_600,
            'd' => 86_400,
            'w' => 604_800,
            _ => return None,
        };
        (&spec[..spec.len() - 1], multiplier)
    };
    let n: i64 = digits.parse().ok()?;
    Some(n * multiplier)
}
