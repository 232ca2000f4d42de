//! The LLD rule-processing driver: per-rule locking, load → filter →
//! downstream-update → state-transition → error-persistence orchestration.
//!
//! This crate ties together [`lld_filter`] (the filter engine) and
//! [`lld_payload`] (row extraction and macro-path resolution) into the
//! state machine described in §4.7 of this project's specification. It owns
//! no store, no config cache, no regexp engine, and no downstream
//! materialisers of its own — callers supply all of those through the
//! [`ports`] traits, which keeps the driver testable against fakes and
//! ignorant of how a real embedding host wires up persistence.
//!
//! # Quick Start
//!
//! See `driver.rs`'s test module for a complete worked example wiring fake
//! [`ports::ConfigPort`], [`ports::MacroPort`], [`ports::EventPort`], and
//! [`ports::DownstreamPort`] implementations into [`process_rule`].

mod driver;
mod error;
mod loader;
mod lock;
mod model;
pub mod ports;

pub use driver::{process_rule, DriverConfig, ProcessOutcome};
pub use error::{LldError, Result};
pub use loader::load_filter;
pub use lock::{RuleLockGuard, RuleLockTable};
pub use model::{RuleDiff, RuleRecord, RuleState};
