//! Colorized JSON pretty-printing for terminal output.
//!
//! Renders JSON values with syntax highlighting:
//! - Field names in cyan
//! - Strings in green
//! - Numbers in yellow
//! - Booleans in magenta
//! - Null in red

use std::fmt::Write;

use colored::Colorize;
use serde_json::Value;

const INDENT: &str = "  ";

/// Print a JSON value with colorized syntax highlighting.
///
/// Renders the value with 2-space indentation and ANSI color codes.
/// When `use_color` is false, outputs plain JSON without colors
/// (suitable for machine consumption or piping).
pub fn print_json(value: &Value, use_color: bool) {
    println!("{}", render_json(value, use_color));
}

/// Render a JSON value the way [`print_json`] prints it.
pub fn render_json(value: &Value, use_color: bool) -> String {
    if !use_color {
        return serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    }
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str(&"null".red().to_string()),
        Value::Bool(b) => out.push_str(&b.to_string().magenta().to_string()),
        Value::Number(n) => out.push_str(&n.to_string().yellow().to_string()),
        Value::String(s) => out.push_str(&quote(s).green().to_string()),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                push_indent(out, depth + 1);
                write_value(out, item, depth + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push(']');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                push_indent(out, depth + 1);
                let _ = write!(out, "{}: ", quote(key).cyan());
                write_value(out, item, depth + 1);
                if i + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push('}');
        }
    }
}

/// JSON-escape a string, including its quotes.
fn quote(s: &str) -> String {
    Value::from(s).to_string()
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
