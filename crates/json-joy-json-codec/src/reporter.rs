//! Human-readable error reports.

use serde_json::Value;

use crate::error::{ErrorKind, Errors, Leaf, Origin};

/// One line per leaf error, in branch/operand order.
///
/// ```text
/// Invalid value "c" supplied to $.kind: expected literal "a" (branch 0)
/// Missing key "a" at $.a (branch 0)
/// ```
pub fn report(errors: &Errors) -> Vec<String> {
    errors.leaves().iter().map(format_leaf).collect()
}

fn format_leaf(leaf: &Leaf<'_>) -> String {
    let error = leaf.error;
    let actual = error
        .actual
        .as_ref()
        .map(Value::to_string)
        .unwrap_or_else(|| "undefined".to_string());
    let mut line = match &error.kind {
        ErrorKind::MissingKey { key } => format!("Missing key {:?} at {}", key, error.path),
        ErrorKind::AllBranchesFailed { .. } => format!(
            "Invalid value {} supplied to {}: union has no branches",
            actual, error.path
        ),
        kind => format!("Invalid value {} supplied to {}: {}", actual, error.path, kind),
    };
    if !leaf.origin.is_empty() {
        let trail: Vec<String> = leaf.origin.iter().map(Origin::to_string).collect();
        line.push_str(&format!(" ({})", trail.join(", ")));
    }
    line
}
