//! Filter condition parsing and evaluation for LLD discovery rules.
//!
//! A filter is a small boolean predicate over one discovered row, built from
//! a list of macro/regexp conditions combined under one of four evaluation
//! modes:
//!
//! - **AND** — every condition must match.
//! - **OR** — at least one condition must match.
//! - **AND_OR** — conditions are grouped by macro; OR within a group, AND
//!   across groups.
//! - **EXPRESSION** — each condition's match result is substituted into a
//!   custom boolean/arithmetic expression, which an external evaluator then
//!   computes.
//!
//! This crate only evaluates — it has no notion of a payload, a store, or a
//! macro-path table. Callers supply a [`MacroLookup`] (row access) and the
//! [`RegexpPort`]/[`ExprPort`] collaborators.
//!
//! # Quick Start
//!
//! ```rust
//! use lld_filter::{Filter, FilterCondition, Op, EvalType, MacroLookup, ports::RegexEngine};
//! use std::collections::HashMap;
//!
//! struct Row(HashMap<&'static str, &'static str>);
//! impl MacroLookup for Row {
//!     fn resolve(&self, macro_name: &str) -> Option<String> {
//!         self.0.get(macro_name).map(|s| s.to_string())
//!     }
//! }
//!
//! struct NoExpr;
//! impl lld_filter::ports::ExprPort for NoExpr {
//!     fn evaluate(&self, _text: &str) -> Result<f64, String> { Err("unused".into()) }
//! }
//!
//! let filter = Filter::new(
//!     vec![FilterCondition::new(1, "{#FS}", "^/home$", Op::Regexp, vec![])],
//!     String::new(),
//!     EvalType::And,
//! );
//! let row = Row(HashMap::from([("{#FS}", "/home")]));
//! assert!(filter.evaluate(&row, &RegexEngine, &NoExpr));
//! ```

mod condition;
mod error;
mod filter;
mod op;
pub mod ports;

pub use condition::FilterCondition;
pub use error::{FilterError, Result};
pub use filter::{EvalType, Filter, MacroLookup};
pub use op::Op;
pub use ports::{ExprPort, GlobalRegexp, RegexpPort};
