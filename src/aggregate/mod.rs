//! The streaming delta aggregator.
//!
//! Each provider module decodes one raw event into canonical [`Fragment`]s;
//! the fold below applies them and is itself provider-agnostic. Fragments
//! must be applied in wire order by a single writer — text and JSON-argument
//! concatenation depends on it.

mod anthropic;
mod openai;
mod responses;

use serde_json::Value;
use tracing::debug;

use crate::provider::Provider;
use crate::types::{Block, BlockKey, MessageState};

/// One provider-agnostic mutation decoded from a raw stream event.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Fragment {
    Role(String),
    Text {
        key: BlockKey,
        text: String,
    },
    Reasoning {
        key: BlockKey,
        text: String,
    },
    ToolCall {
        key: BlockKey,
        id: Option<String>,
        name: Option<String>,
        call_type: Option<String>,
        arguments: Option<String>,
    },
    Finish {
        reason: Option<String>,
        stop_sequence: Option<String>,
    },
}

/// Fold the ordered event sequence into message state.
///
/// Single forward pass, O(events) time, O(open blocks) extra space. Events
/// with unknown shapes decode to nothing and are skipped, never raised, so
/// new upstream event kinds degrade gracefully.
pub fn aggregate(events: &[Value], provider: Provider) -> MessageState {
    let mut state = MessageState::default();
    for event in events {
        let fragments = match provider {
            Provider::OpenAiDelta => openai::decode(event),
            Provider::OpenAiResponses => responses::decode(event),
            Provider::AnthropicBlock => anthropic::decode(event),
        };
        for fragment in fragments {
            apply(&mut state, fragment);
        }
    }
    debug!(blocks = state.blocks.len(), "aggregated event stream");
    state
}

fn apply(state: &mut MessageState, fragment: Fragment) {
    match fragment {
        Fragment::Role(role) => {
            if state.role.is_none() && !role.is_empty() {
                state.role = Some(role);
            }
        }
        Fragment::Text { key, text } => {
            match state.blocks.entry(key).or_insert_with(Block::empty_text) {
                Block::Text { text: buffer, .. } => buffer.push_str(&text),
                // Kind is fixed at creation; a text fragment aimed at an
                // existing tool block is dropped.
                Block::ToolCall { .. } => {}
            }
        }
        Fragment::Reasoning { key, text } => {
            match state.blocks.entry(key).or_insert_with(Block::empty_text) {
                Block::Text { reasoning, .. } => reasoning.push_str(&text),
                Block::ToolCall { .. } => {}
            }
        }
        Fragment::ToolCall {
            key,
            id,
            name,
            call_type,
            arguments,
        } => {
            match state
                .blocks
                .entry(key)
                .or_insert_with(Block::empty_tool_call)
            {
                Block::ToolCall {
                    id: current_id,
                    name: current_name,
                    call_type: current_type,
                    arguments_raw,
                } => {
                    // id, name and type arrive once and are sticky; absence
                    // in later fragments never clears them.
                    if current_id.is_none() {
                        *current_id = id;
                    }
                    if current_name.is_none() {
                        *current_name = name;
                    }
                    if current_type.is_none() {
                        *current_type = call_type;
                    }
                    if let Some(args) = arguments {
                        arguments_raw.push_str(&args);
                    }
                }
                Block::Text { .. } => {}
            }
        }
        Fragment::Finish {
            reason,
            stop_sequence,
        } => {
            if reason.is_some() {
                state.finish_reason = reason;
            }
            if stop_sequence.is_some() {
                state.stop_sequence = stop_sequence;
            }
        }
    }
}
