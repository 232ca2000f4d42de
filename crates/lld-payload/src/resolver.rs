//! Resolves one LLD macro's value for one row.

use crate::json_path::scalar_to_string;
use crate::macro_path::MacroPathTable;

/// Resolves `macro_name` against `row`.
///
/// A macro declared in `table` is resolved *only* through its JSON path — a
/// path that fails to open is a miss, never a fallback to direct lookup.
/// A macro absent from `table` is resolved by direct top-level key lookup.
pub fn resolve_macro(
    row: &serde_json::Value,
    table: &MacroPathTable,
    macro_name: &str,
) -> Option<String> {
    if let Some(entry) = table.get(macro_name) {
        return entry.extract(row);
    }
    match row {
        serde_json::Value::Object(map) => map.get(macro_name).and_then(scalar_to_string),
        _ => None,
    }
}
