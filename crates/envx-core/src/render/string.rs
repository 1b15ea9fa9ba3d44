//! Flattened single-line text form of a value

use super::quote::quote;
use crate::value::{Value, ValueKind};

/// Text shown for values the service could not resolve
pub const UNKNOWN_TEXT: &str = "[unknown]";

/// Flatten a value to one line of text
///
/// Scalars print bare, null prints empty. Arrays print each element's text
/// quoted and comma separated; objects print `"key"="value"` pairs sorted by
/// key. Unknown values print as `[unknown]` at any depth.
pub fn to_display_string(value: &Value) -> String {
    if value.is_unknown() {
        return UNKNOWN_TEXT.to_string();
    }
    match value.kind() {
        ValueKind::Null => String::new(),
        ValueKind::Bool(b) => b.to_string(),
        ValueKind::Number(n) => n.to_string(),
        ValueKind::String(s) => s.clone(),
        ValueKind::Array(items) => items
            .iter()
            .map(|item| quote(&to_display_string(item)))
            .collect::<Vec<_>>()
            .join(","),
        ValueKind::Object(map) => {
            let mut pairs: Vec<(&str, &Value)> = map.iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(b.0));
            pairs
                .into_iter()
                .map(|(k, v)| format!("{}={}", quote(k), quote(&to_display_string(v))))
                .collect::<Vec<_>>()
                .join(",")
        }
    }
}
