// src/exec/template.rs

use serde_json::{Map, Value};

/// Resolve `{{key}}` placeholders in a command template against an argument
/// map.
///
/// The template is scanned in a single left-to-right pass: each
/// `{{identifier}}` span is looked up in `args` (case-sensitive, exact key
/// match) and replaced with the value's string form. Placeholders with no
/// matching key are left verbatim, as is a dangling `{{` with no closing
/// braces. Substituted values are appended to the output without being
/// re-scanned, so a value that itself contains `{{...}}` is never expanded
/// again.
pub fn substitute(template: &str, args: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match args.get(key) {
                    Some(value) => out.push_str(&value_to_string(value)),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                // No closing braces anywhere ahead; keep the rest verbatim.
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// The string form of a substitution value: strings verbatim, numbers and
/// booleans via their display form, arrays as comma-joined element forms.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
