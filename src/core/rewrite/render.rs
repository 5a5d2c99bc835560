//! Rendering of descriptor fields as source text.

use serde_json::Value;

use crate::core::matcher::ListStyle;

/// Render `name` and `value` as an object property or a JSX attribute.
///
/// Returns `None` for names that cannot be written as a JSX attribute.
pub fn render_field(style: ListStyle, name: &str, value: &Value) -> Option<String> {
    match style {
        ListStyle::Object => Some(format!("{}: {}", object_key(name), value)),
        ListStyle::JsxAttributes => {
            if !is_jsx_attr_name(name) {
                return None;
            }
            Some(match value {
                Value::String(text) if !text.contains(['"', '&', '{', '}']) => {
                    format!("{}=\"{}\"", name, text)
                }
                other => format!("{}={{{}}}", name, other),
            })
        }
    }
}

fn object_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        Value::String(name.to_string()).to_string()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn is_jsx_attr_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '-')
}

/// The separator to use between fields, following the list's existing layout.
///
/// `between` is the text between two existing fields, or between the list
/// opening and its only field.
pub fn separator(style: ListStyle, between: &str) -> String {
    let newline = between.rfind('\n').map(|at| {
        let indent: String = between[at + 1..]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        format!("\n{}", indent)
    });
    match (style, newline) {
        (ListStyle::Object, Some(line)) => format!(",{}", line),
        (ListStyle::Object, None) => ", ".to_string(),
        (ListStyle::JsxAttributes, Some(line)) => line,
        (ListStyle::JsxAttributes, None) => " ".to_string(),
    }
}
