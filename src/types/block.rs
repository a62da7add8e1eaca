//! Content block accumulators.

use serde::Serialize;

/// Addresses one block accumulator within a single aggregation run.
///
/// `index` is the Anthropic content-block index or the OpenAI choice index.
/// `call` is the OpenAI tool-call sub-index, which the wire namespaces per
/// choice; it is `None` for the text/reasoning block itself. Lexicographic
/// ordering sorts blocks ascending by index with a choice's text ahead of
/// its tool calls.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockKey {
    pub index: u32,
    pub call: Option<u32>,
}

impl BlockKey {
    /// Key for the text/reasoning block at `index`.
    pub fn block(index: u32) -> Self {
        Self { index, call: None }
    }

    /// Key for tool call `call` under choice `index`.
    pub fn tool_call(index: u32, call: u32) -> Self {
        Self {
            index,
            call: Some(call),
        }
    }
}

/// One content block of a logical message.
///
/// The kind is fixed when the block is first observed and never changes;
/// fragments of the other kind arriving at the same key are dropped. All
/// buffers are append-only and grow in wire order.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Text {
        text: String,
        /// Reasoning deltas for the same index, tracked independently of the
        /// main text so the two never overwrite each other.
        #[serde(skip_serializing_if = "String::is_empty")]
        reasoning: String,
    },
    ToolCall {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        call_type: Option<String>,
        /// Raw concatenation of streamed argument fragments. Never re-parsed
        /// during aggregation; only the renderer attempts to parse it.
        arguments_raw: String,
    },
}

impl Block {
    pub(crate) fn empty_text() -> Self {
        Block::Text {
            text: String::new(),
            reasoning: String::new(),
        }
    }

    pub(crate) fn empty_tool_call() -> Self {
        Block::ToolCall {
            id: None,
            name: None,
            call_type: None,
            arguments_raw: String::new(),
        }
    }
}
