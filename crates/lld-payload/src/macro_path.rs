//! The per-rule `{#MACRO} -> JSON path` mapping table.

use crate::error::{PayloadError, Result};
use crate::json_path::JsonPath;

/// One `(lld_macro, path)` entry. `path` has already passed syntax
/// validation by the time it lives in a [`MacroPathTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct MacroPath {
    pub lld_macro: String,
    pub path: String,
    parsed: JsonPath,
}

/// Ordered by `lld_macro`, supporting binary-search lookup. Construct via
/// [`MacroPathTable::load`] from raw `(macro, path)` pairs — entries are not
/// meant to be inserted one at a time, since the whole table is discarded on
/// the first invalid path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacroPathTable {
    entries: Vec<MacroPath>,
}

impl MacroPathTable {
    /// Builds a table from `(lld_macro, path)` pairs already ordered by
    /// `lld_macro` (as the store query guarantees). Fails on the first path
    /// that does not parse, discarding everything accepted so far.
    pub fn load(pairs: Vec<(String, String)>) -> Result<Self> {
        let mut entries = Vec::with_capacity(pairs.len());
        for (lld_macro, path) in pairs {
            let parsed = JsonPath::parse(&path).map_err(|reason| PayloadError::CannotProcessMacro {
                macro_: lld_macro.clone(),
                reason,
            })?;
            entries.push(MacroPath {
                lld_macro,
                path,
                parsed,
            });
        }
        Ok(Self { entries })
    }

    /// Finds the entry for `lld_macro`, if declared.
    pub fn get(&self, lld_macro: &str) -> Option<&MacroPath> {
        self.entries
            .binary_search_by(|e| e.lld_macro.as_str().cmp(lld_macro))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MacroPath> {
        self.entries.iter()
    }
}

impl MacroPath {
    /// Opens this entry's path against `row`, extracting a scalar. `None`
    /// means the path did not resolve on this particular row.
    pub fn extract<'a>(&self, row: &'a serde_json::Value) -> Option<String> {
        self.parsed.extract(row)
    }
}
