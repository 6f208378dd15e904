//! Syntax-highlighted JSON for terminal output.

use serde_json::Value;

use super::color::{AnsiColor, Color, color};

const KEY_COLOR: Color = Color::Rgb(0xFF, 0x81, 0xD0);
const STRING_COLOR: Color = Color::Rgb(0x0C, 0xF2, 0x5D);
const NULL_COLOR: Color = Color::Rgb(255, 127, 80);

/// Pretty-print `value` with `indent` spaces per level, coloring keys,
/// strings, booleans, nulls and numbers.
pub fn highlight_json(value: &Value, indent: usize) -> String {
    let mut out = String::new();
    write_value(&mut out, value, indent, 0);
    out
}

fn write_value(out: &mut String, value: &Value, indent: usize, depth: usize) {
    match value {
        Value::Null => out.push_str(&color("null", NULL_COLOR)),
        Value::Bool(b) => out.push_str(&color(&b.to_string(), AnsiColor::Magenta)),
        Value::Number(n) => out.push_str(&color(&n.to_string(), AnsiColor::Yellow)),
        Value::String(s) => out.push_str(&color(&quote(s), STRING_COLOR)),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                newline(out, indent, depth + 1);
                write_value(out, item, indent, depth + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
            }
            newline(out, indent, depth);
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                newline(out, indent, depth + 1);
                out.push_str(&color(&quote(key), KEY_COLOR));
                out.push_str(": ");
                write_value(out, item, indent, depth + 1);
                if i + 1 < map.len() {
                    out.push(',');
                }
            }
            newline(out, indent, depth);
            out.push('}');
        }
    }
}

fn newline(out: &mut String, indent: usize, depth: usize) {
    out.push('\n');
    out.push_str(&" ".repeat(indent * depth));
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}
