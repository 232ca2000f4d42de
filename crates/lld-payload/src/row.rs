//! One surviving discovery row.

use crate::macro_path::MacroPathTable;
use crate::resolver::resolve_macro;
use lld_filter::MacroLookup;

/// An opaque handle downstream materialisers attach to a row once an item is
/// created or matched for it. The core never inspects its contents, only
/// threads the list through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLink {
    pub itemid: u64,
    pub parent_itemid: u64,
}

/// One JSON object element of the discovery payload that passed the filter.
///
/// `jp_row` borrows out of the payload document owned by the row iterator's
/// caller for the duration of one rule-processing invocation — the payload
/// must outlive every `Row` built from it.
pub struct Row<'a> {
    pub jp_row: &'a serde_json::Value,
    pub item_links: Vec<ItemLink>,
    macro_paths: &'a MacroPathTable,
}

impl<'a> Row<'a> {
    pub fn new(jp_row: &'a serde_json::Value, macro_paths: &'a MacroPathTable) -> Self {
        Self {
            jp_row,
            item_links: Vec::new(),
            macro_paths,
        }
    }
}

impl MacroLookup for Row<'_> {
    fn resolve(&self, macro_name: &str) -> Option<String> {
        resolve_macro(self.jp_row, self.macro_paths, macro_name)
    }
}
