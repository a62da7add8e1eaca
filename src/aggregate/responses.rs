//! Decoding for the OpenAI Responses API streaming variant (`/responses`).
//!
//! Responses streams carry no block indices, so output text accumulates
//! into a single block. Events surface text either under `output` (a
//! string, or an object with a `text`/`delta` field) or under `delta` (a
//! string, or an object with an `output` string).

use serde_json::Value;

use crate::types::BlockKey;

use super::Fragment;

pub(crate) fn decode(event: &Value) -> Vec<Fragment> {
    let key = BlockKey::block(0);
    let mut out = Vec::new();

    match event.get("output") {
        Some(Value::String(text)) => push_text(&mut out, key, text),
        Some(Value::Object(fields)) => {
            if let Some(text) = fields.get("text").and_then(Value::as_str) {
                push_text(&mut out, key, text);
            } else if let Some(text) = fields.get("delta").and_then(Value::as_str) {
                push_text(&mut out, key, text);
            }
        }
        _ => {}
    }

    match event.get("delta") {
        Some(Value::String(text)) => push_text(&mut out, key, text),
        Some(Value::Object(fields)) => {
            if let Some(text) = fields.get("output").and_then(Value::as_str) {
                push_text(&mut out, key, text);
            }
        }
        _ => {}
    }

    out
}

fn push_text(out: &mut Vec<Fragment>, key: BlockKey, text: &str) {
    if !text.is_empty() {
        out.push(Fragment::Text {
            key,
            text: text.to_string(),
        });
    }
}
