//! Turns a raw JSON payload into the list of rows that survive the filter,
//! plus advisory diagnostics about macros the filter referenced but that no
//! row produced a value for.

use crate::error::{PayloadError, Result};
use crate::macro_path::MacroPathTable;
use crate::row::Row;
use lld_filter::{ExprPort, Filter, RegexpPort};
use std::fmt::Write as _;

/// Extracts and filters rows from `payload`.
///
/// Returns the surviving rows (borrowing out of `payload`, which must outlive
/// them) and the accumulated coverage-diagnostic text, which the caller
/// folds into the rule's persisted error on return.
pub fn extract_rows<'a>(
    payload: &'a serde_json::Value,
    filter: &Filter,
    macro_paths: &MacroPathTable,
    regexp: &dyn RegexpPort,
    expr: &dyn ExprPort,
) -> Result<(Vec<Row<'a>>, String)> {
    let elements = top_level_array(payload)?;

    let mut rows = Vec::new();
    let mut info = String::new();

    for element in elements {
        if !element.is_object() {
            continue;
        }

        append_coverage_diagnostics(element, filter, macro_paths, &mut info);

        let row = Row::new(element, macro_paths);
        if !filter.evaluate(&row, regexp, expr) {
            continue;
        }
        rows.push(row);
    }

    Ok((rows, info))
}

fn top_level_array(payload: &serde_json::Value) -> Result<&Vec<serde_json::Value>> {
    match payload {
        serde_json::Value::Array(arr) => Ok(arr),
        serde_json::Value::Object(map) => match map.get("data") {
            Some(serde_json::Value::Array(arr)) => {
                tracing::warn!("discovery payload uses the deprecated {{\"data\": [...]}} wrapper");
                Ok(arr)
            }
            _ => Err(PayloadError::MissingDataArray),
        },
        _ => Err(PayloadError::NotArray),
    }
}

fn append_coverage_diagnostics(
    row: &serde_json::Value,
    filter: &Filter,
    macro_paths: &MacroPathTable,
    info: &mut String,
) {
    for condition in &filter.conditions {
        if let Some(entry) = macro_paths.get(&condition.macro_) {
            if entry.extract(row).is_none() {
                let _ = writeln!(
                    info,
                    "Cannot accurately apply filter: no value received for macro \"{}\" json path '{}'.",
                    condition.macro_, entry.path
                );
            }
        } else {
            let has_direct = matches!(row, serde_json::Value::Object(map) if map.contains_key(&condition.macro_));
            if !has_direct {
                let _ = writeln!(
                    info,
                    "Cannot accurately apply filter: no value received for macro \"{}\".",
                    condition.macro_
                );
            }
        }
    }
}
