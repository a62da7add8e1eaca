//! Decoding for the Anthropic-style block-event variant (`/messages`).

use serde_json::Value;

use crate::types::BlockKey;

use super::Fragment;

/// Decode one stream event, driven by its `type` discriminator.
///
/// `message_start`/`message_stop` mutate no blocks (the metadata extractor
/// reads their envelope fields); unknown types are ignored for forward
/// compatibility.
pub(crate) fn decode(event: &Value) -> Vec<Fragment> {
    let event_type = event.get("type").and_then(Value::as_str).unwrap_or("");
    let index = event.get("index").and_then(Value::as_u64).unwrap_or(0) as u32;
    let key = BlockKey::block(index);

    match event_type {
        "content_block_start" => {
            let Some(block) = event.get("content_block") else {
                return Vec::new();
            };
            match block.get("type").and_then(Value::as_str) {
                Some("text") => {
                    let seed = block.get("text").and_then(Value::as_str).unwrap_or("");
                    vec![Fragment::Text {
                        key,
                        text: seed.to_string(),
                    }]
                }
                Some("tool_use") => vec![Fragment::ToolCall {
                    key,
                    id: block.get("id").and_then(Value::as_str).map(str::to_string),
                    name: block.get("name").and_then(Value::as_str).map(str::to_string),
                    call_type: None,
                    arguments: None,
                }],
                Some("thinking") => {
                    let seed = block.get("thinking").and_then(Value::as_str).unwrap_or("");
                    vec![Fragment::Reasoning {
                        key,
                        text: seed.to_string(),
                    }]
                }
                _ => Vec::new(),
            }
        }
        "content_block_delta" => {
            let Some(delta) = event.get("delta") else {
                return Vec::new();
            };
            // A delta with no prior content_block_start still creates the
            // block (truncated or reordered capture); the fold infers the
            // kind from the fragment.
            match delta.get("type").and_then(Value::as_str) {
                Some("text_delta") => delta
                    .get("text")
                    .and_then(Value::as_str)
                    .map(|text| {
                        vec![Fragment::Text {
                            key,
                            text: text.to_string(),
                        }]
                    })
                    .unwrap_or_default(),
                Some("input_json_delta") => delta
                    .get("partial_json")
                    .and_then(Value::as_str)
                    .map(|json| {
                        vec![Fragment::ToolCall {
                            key,
                            id: None,
                            name: None,
                            call_type: None,
                            arguments: Some(json.to_string()),
                        }]
                    })
                    .unwrap_or_default(),
                Some("thinking_delta") => delta
                    .get("thinking")
                    .and_then(Value::as_str)
                    .map(|text| {
                        vec![Fragment::Reasoning {
                            key,
                            text: text.to_string(),
                        }]
                    })
                    .unwrap_or_default(),
                _ => Vec::new(),
            }
        }
        "message_delta" => {
            let Some(delta) = event.get("delta") else {
                return Vec::new();
            };
            let reason = delta
                .get("stop_reason")
                .and_then(Value::as_str)
                .map(str::to_string);
            let stop_sequence = delta
                .get("stop_sequence")
                .and_then(Value::as_str)
                .map(str::to_string);
            if reason.is_none() && stop_sequence.is_none() {
                Vec::new()
            } else {
                vec![Fragment::Finish {
                    reason,
                    stop_sequence,
                }]
            }
        }
        _ => Vec::new(),
    }
}
