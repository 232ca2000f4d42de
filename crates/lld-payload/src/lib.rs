//! JSON payload row extraction and LLD macro-path resolution.
//!
//! This crate turns one discovery rule's raw JSON payload into the list of
//! rows that survive its filter, resolving each filter condition's macro via
//! either a declared JSON path ([`MacroPathTable`]) or a direct top-level key
//! lookup. It builds on `serde_json`'s parse tree with a narrow, in-scope
//! JSON-path grammar (see [`json_path`]) — the JSON parser itself is an
//! external dependency, not something this crate reimplements.

mod error;
mod iterator;
mod json_path;
mod macro_path;
mod resolver;
mod row;

pub use error::{PayloadError, Result};
pub use iterator::extract_rows;
pub use json_path::JsonPath;
pub use macro_path::{MacroPath, MacroPathTable};
pub use resolver::resolve_macro;
pub use row::{ItemLink, Row};
