//! Decoding for the OpenAI-style delta variant (`chat/completions` chunks).

use serde_json::Value;

use crate::types::BlockKey;

use super::Fragment;

/// Decode one stream chunk into fragments, one batch per choice.
pub(crate) fn decode(event: &Value) -> Vec<Fragment> {
    let mut out = Vec::new();
    let Some(choices) = event.get("choices").and_then(Value::as_array) else {
        return out;
    };

    for choice in choices {
        let index = choice.get("index").and_then(Value::as_u64).unwrap_or(0) as u32;
        let key = BlockKey::block(index);

        if let Some(delta) = choice.get("delta") {
            if let Some(role) = delta.get("role").and_then(Value::as_str) {
                out.push(Fragment::Role(role.to_string()));
            }

            if let Some(text) = delta.get("content").and_then(Value::as_str) {
                if !text.is_empty() {
                    out.push(Fragment::Text {
                        key,
                        text: text.to_string(),
                    });
                }
            }

            // Some gateways emit `reasoning`, others `reasoning_content`.
            let reasoning = delta
                .get("reasoning")
                .or_else(|| delta.get("reasoning_content"))
                .and_then(Value::as_str);
            if let Some(text) = reasoning {
                if !text.is_empty() {
                    out.push(Fragment::Reasoning {
                        key,
                        text: text.to_string(),
                    });
                }
            }

            if let Some(calls) = delta.get("tool_calls").and_then(Value::as_array) {
                for call in calls {
                    // The sub-index is the only way to correlate fragments
                    // of one call; entries without it are unusable.
                    let Some(sub) = call.get("index").and_then(Value::as_u64) else {
                        continue;
                    };
                    let function = call.get("function");
                    out.push(Fragment::ToolCall {
                        key: BlockKey::tool_call(index, sub as u32),
                        id: call.get("id").and_then(Value::as_str).map(str::to_string),
                        name: function
                            .and_then(|f| f.get("name"))
                            .and_then(Value::as_str)
                            .map(str::to_string),
                        call_type: call.get("type").and_then(Value::as_str).map(str::to_string),
                        arguments: function
                            .and_then(|f| f.get("arguments"))
                            .and_then(Value::as_str)
                            .map(str::to_string),
                    });
                }
            }
        }

        if let Some(reason) = choice.get("finish_reason").and_then(Value::as_str) {
            out.push(Fragment::Finish {
                reason: Some(reason.to_string()),
                stop_sequence: None,
            });
        }
    }

    out
}
