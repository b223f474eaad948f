//! Breadcrumb-style page titles assembled from route data.

use std::collections::HashSet;

use serde_json::Value;

use crate::analytics::constants::{TITLE_DATA_KEY, TITLE_SEPARATOR};
use crate::router::RouterState;

/// Collects the title fragments along the root-to-leaf `first_child` chain, root first.
///
/// Levels without a title, or whose title is empty, `false`, `0` or `null`, contribute nothing.
/// A chain that loops back onto a visited route stops at the first repeat.
pub fn title_fragments(state: &RouterState) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Some(state.root());

    while let Some(id) = current {
        if !visited.insert(id) {
            log::warn!("route tree cycles back to route #{}; title truncated", id.index());
            break;
        }
        let Some(node) = state.node(id) else {
            break;
        };
        if let Some(fragment) = node.data.get(TITLE_DATA_KEY).and_then(fragment_text) {
            fragments.push(fragment);
        }
        current = state.first_child(id);
    }

    fragments
}

pub fn compose_title(fragments: &[String], separator: &str) -> String {
    fragments.join(separator)
}

/// Title for the current router state using the default `-` separator.
pub fn page_title(state: &RouterState) -> String {
    compose_title(&title_fragments(state), TITLE_SEPARATOR)
}

fn fragment_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if text.is_empty() => None,
        Value::Bool(false) | Value::Null => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(display_text(other)),
    }
}

// Renders a value the way a browser stringifies it when joining a title: arrays are
// comma-joined with null entries left blank, whole floats lose their fraction.
fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::String(text) => text.clone(),
        Value::Number(number) => match (number.as_i64(), number.as_u64(), number.as_f64()) {
            (Some(int), _, _) => int.to_string(),
            (_, Some(uint), _) => uint.to_string(),
            (_, _, Some(float)) if float == 0.0 => "0".to_string(),
            (_, _, Some(float)) => float.to_string(),
            _ => number.to_string(),
        },
        Value::Array(items) => items.iter().map(display_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
