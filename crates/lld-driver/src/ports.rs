//! Collaborator boundaries the rule driver calls through.
//!
//! Every method here corresponds to one of the interfaces named in this
//! project's specification for the external collaborators: the
//! configuration cache, simple-macro substitution, the event subsystem, and
//! the five downstream materialisers. None of their implementations belong
//! to this core; tests exercise the driver against fakes.

use crate::model::{RuleDiff, RuleRecord};
use lld_filter::GlobalRegexp;
use lld_payload::Row;

/// Minimal item context handed to macro substitution; the core never reads
/// its fields itself, only passes it through to [`MacroPort::substitute_simple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub itemid: u64,
    pub hostid: u64,
}

/// One `item_condition` row as read from the store, before regexp-set
/// resolution or macro substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCondition {
    pub id: u64,
    pub macro_: String,
    pub value: String,
    pub op: lld_filter::Op,
}

/// The in-process configuration cache: rule/item/condition lookup, the
/// per-rule lock, global regexp resolution, and diff application.
pub trait ConfigPort {
    fn lock_lld_rule(&self, itemid: u64) -> bool;
    fn unlock_lld_rule(&self, itemid: u64);
    fn get_rule(&self, itemid: u64) -> Option<RuleRecord>;
    fn get_item(&self, itemid: u64) -> Option<Item>;
    fn get_conditions(&self, itemid: u64) -> Vec<RawCondition>;
    fn get_macro_paths(&self, itemid: u64) -> Vec<(String, String)>;
    fn resolve_global_regexp(&self, name: &str) -> Vec<GlobalRegexp>;
    fn apply_item_diffs(&self, diffs: &[RuleDiff]);
}

/// The simple-macro substitution facility (host/interface-independent
/// macros), scoped by an item's context.
pub trait MacroPort {
    fn substitute_simple(&self, target: &str, context: Item) -> String;
}

/// The internal event subsystem: used solely for the NOTSUPPORTED→NORMAL
/// state transition (§4.7 step 7).
pub trait EventPort {
    fn add(&self, itemid: u64, ts: i64);
    fn process(&self);
    fn clear(&self);
}

/// Outcome of a downstream materialiser call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownstreamOutcome {
    Ok,
    ParentHostRemoved,
    Error(String),
}

/// The five external stages that turn surviving rows into monitored objects.
/// Out of scope to implement; this core only calls them in the documented
/// order and reacts to their outcome.
pub trait DownstreamPort {
    fn update_items(
        &self,
        hostid: u64,
        itemid: u64,
        rows: &mut [Row<'_>],
        lifetime: i64,
        now: i64,
    ) -> DownstreamOutcome;

    fn sort_item_links(&self, rows: &mut [Row<'_>]);

    fn update_triggers(&self, hostid: u64, rows: &[Row<'_>]) -> DownstreamOutcome;

    fn update_graphs(&self, hostid: u64, rows: &[Row<'_>]) -> DownstreamOutcome;

    fn update_hosts(&self, hostid: u64, rows: &[Row<'_>]);
}
