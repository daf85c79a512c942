//! Order-stable JSON rendering used to compare structured values.
//!
//! Object keys are emitted in lexicographic order at every depth and no
//! whitespace is produced, so two values that differ only in key insertion
//! order render to the same string. Array order is significant.

use serde_json::Value;
use std::fmt::Write;

/// Serialize `value` to its canonical compact JSON form.
pub fn to_canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|left, right| left.0.cmp(right.0));
            out.push('{');
            for (index, (key, item)) in entries.into_iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::String(text) => write_string(text, out),
        scalar => {
            let _ = write!(out, "{}", scalar);
        }
    }
}

fn write_string(text: &str, out: &mut String) {
    // Display on a string Value yields the escaped, quoted JSON literal.
    let _ = write!(out, "{}", Value::from(text));
}
