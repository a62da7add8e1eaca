//! Non-streaming response extraction: one JSON document per provider.
//!
//! Direct field lookups, no state. The output is the same [`Snapshot`]
//! value the streaming aggregator produces, so the renderer treats both
//! variants identically.

use serde_json::Value;

use crate::error::Result;
use crate::provider::Provider;
use crate::types::{Block, BlockKey, EnvelopeMetadata, MessageState, Origin, Snapshot, Usage};

/// Extract a [`Snapshot`] from a non-streaming response body.
///
/// A body that is not valid JSON is an error; the renderer surfaces it
/// inline rather than letting it propagate out of the viewer.
pub fn extract_document(body: &[u8], provider: Provider) -> Result<Snapshot> {
    let document: Value = serde_json::from_slice(body)?;
    Ok(match provider {
        Provider::OpenAiDelta => from_openai(&document),
        Provider::OpenAiResponses => from_openai_responses(&document),
        Provider::AnthropicBlock => from_anthropic(&document),
    })
}

fn from_openai(document: &Value) -> Snapshot {
    let field = |name: &str| {
        document
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let metadata = EnvelopeMetadata {
        id: field("id"),
        model: field("model"),
        role: None,
        system_fingerprint: field("system_fingerprint"),
        usage: document
            .get("usage")
            .map(Usage::from_value)
            .unwrap_or_default(),
    };

    let mut state = MessageState::default();
    if let Some(choices) = document.get("choices").and_then(Value::as_array) {
        for (position, choice) in choices.iter().enumerate() {
            let index = choice
                .get("index")
                .and_then(Value::as_u64)
                .unwrap_or(position as u64) as u32;

            if let Some(message) = choice.get("message") {
                if state.role.is_none() {
                    state.role = message
                        .get("role")
                        .and_then(Value::as_str)
                        .filter(|role| !role.is_empty())
                        .map(str::to_string);
                }

                let text = message.get("content").and_then(Value::as_str).unwrap_or("");
                let reasoning = message
                    .get("reasoning")
                    .or_else(|| message.get("reasoning_content"))
                    .and_then(Value::as_str)
                    .unwrap_or("");
                if !text.is_empty() || !reasoning.is_empty() {
                    state.blocks.insert(
                        BlockKey::block(index),
                        Block::Text {
                            text: text.to_string(),
                            reasoning: reasoning.to_string(),
                        },
                    );
                }

                if let Some(calls) = message.get("tool_calls").and_then(Value::as_array) {
                    for (sub, call) in calls.iter().enumerate() {
                        let function = call.get("function");
                        state.blocks.insert(
                            BlockKey::tool_call(index, sub as u32),
                            Block::ToolCall {
                                id: call.get("id").and_then(Value::as_str).map(str::to_string),
                                name: function
                                    .and_then(|f| f.get("name"))
                                    .and_then(Value::as_str)
                                    .map(str::to_string),
                                call_type: call
                                    .get("type")
                                    .and_then(Value::as_str)
                                    .map(str::to_string),
                                // Documents carry the full argument string.
                                arguments_raw: function
                                    .and_then(|f| f.get("arguments"))
                                    .and_then(Value::as_str)
                                    .unwrap_or("{}")
                                    .to_string(),
                            },
                        );
                    }
                }
            }

            if let Some(reason) = choice.get("finish_reason").and_then(Value::as_str) {
                state.finish_reason = Some(reason.to_string());
            }
        }
    }

    Snapshot::new(metadata, state, Origin::Document)
}

fn from_openai_responses(document: &Value) -> Snapshot {
    let field = |name: &str| {
        document
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let metadata = EnvelopeMetadata {
        id: field("id"),
        model: field("model"),
        role: None,
        system_fingerprint: field("system_fingerprint"),
        usage: document
            .get("usage")
            .map(Usage::from_value)
            .unwrap_or_default(),
    };

    let mut state = MessageState::default();

    // `output` is a string, an object, or a list of output items. Items keep
    // their provider-defined shape and become one text block each, serialized
    // as pretty JSON when they are not plain strings.
    match document.get("output") {
        Some(Value::String(text)) if !text.is_empty() => {
            state
                .blocks
                .insert(BlockKey::block(0), text_block(text.clone()));
        }
        Some(Value::Array(items)) => {
            for (position, item) in items.iter().enumerate() {
                let text = match item {
                    Value::String(text) => text.clone(),
                    other => pretty_or_raw(other),
                };
                state
                    .blocks
                    .insert(BlockKey::block(position as u32), text_block(text));
            }
        }
        Some(other) if other.is_object() => {
            state
                .blocks
                .insert(BlockKey::block(0), text_block(pretty_or_raw(other)));
        }
        _ => {}
    }

    Snapshot::new(metadata, state, Origin::Document)
}

fn text_block(text: String) -> Block {
    Block::Text {
        text,
        reasoning: String::new(),
    }
}

fn pretty_or_raw(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn from_anthropic(document: &Value) -> Snapshot {
    let field = |name: &str| {
        document
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let metadata = EnvelopeMetadata {
        id: field("id"),
        model: field("model"),
        role: field("role"),
        system_fingerprint: None,
        usage: document
            .get("usage")
            .map(Usage::from_value)
            .unwrap_or_default(),
    };

    let mut state = MessageState {
        finish_reason: field("stop_reason"),
        stop_sequence: field("stop_sequence"),
        ..MessageState::default()
    };

    if let Some(content) = document.get("content").and_then(Value::as_array) {
        for (position, item) in content.iter().enumerate() {
            let key = BlockKey::block(position as u32);
            match item.get("type").and_then(Value::as_str) {
                Some("text") => {
                    state.blocks.insert(
                        key,
                        Block::Text {
                            text: item
                                .get("text")
                                .and_then(Value::as_str)
                                .unwrap_or("")
                                .to_string(),
                            reasoning: String::new(),
                        },
                    );
                }
                Some("thinking") => {
                    state.blocks.insert(
                        key,
                        Block::Text {
                            text: String::new(),
                            reasoning: item
                                .get("thinking")
                                .and_then(Value::as_str)
                                .unwrap_or("")
                                .to_string(),
                        },
                    );
                }
                Some("tool_use") => {
                    // `input` is a JSON value here, not a string; serialize
                    // it back so the snapshot carries the same raw-arguments
                    // shape as the streaming variant.
                    let arguments_raw = item
                        .get("input")
                        .map(Value::to_string)
                        .unwrap_or_else(|| "{}".to_string());
                    state.blocks.insert(
                        key,
                        Block::ToolCall {
                            id: item.get("id").and_then(Value::as_str).map(str::to_string),
                            name: item.get("name").and_then(Value::as_str).map(str::to_string),
                            call_type: None,
                            arguments_raw,
                        },
                    );
                }
                _ => {}
            }
        }
    }

    Snapshot::new(metadata, state, Origin::Document)
}
