//! Text formatting helpers shared by the views.

use serde_json::Value;

/// Horizontal rule separating content sections.
pub const SPLIT_LINE: &str = "\n----------------------------------\n";

/// Blank spacer between top-level sections.
pub fn section_break(lines: usize) -> String {
    "\n ".repeat(lines) + "\n"
}

/// Indent every non-blank line of `text` by `n` spaces. Blank lines stay
/// blank so trailing whitespace never accumulates.
pub fn indent_text(text: &str, n: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    let indent = " ".repeat(n);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse-or-raw probe. Used only at render time; JSON probing never drives
/// aggregation state.
pub fn try_parse_json(input: &str) -> Option<Value> {
    serde_json::from_str(input).ok()
}

/// Pretty-print `text` as JSON when it parses, then indent; otherwise
/// indent the raw string unchanged.
pub fn indent_json(text: &str, n: usize) -> String {
    let pretty = match try_parse_json(text) {
        Some(value) => {
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| text.to_string())
        }
        None => text.to_string(),
    };
    indent_text(&pretty, n)
}
