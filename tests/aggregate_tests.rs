//! Tests for the streaming delta aggregator.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use llmlens::aggregate::aggregate;
use llmlens::types::{Block, BlockKey};
use llmlens::Provider;

fn text_block(state: &llmlens::types::MessageState, key: BlockKey) -> &str {
    match &state.blocks[&key] {
        Block::Text { text, .. } => text,
        other => panic!("expected text block, got {other:?}"),
    }
}

#[test]
fn openai_text_deltas_concatenate_in_order() {
    let events = vec![
        json!({"choices": [{"index": 0, "delta": {"role": "assistant"}}]}),
        json!({"choices": [{"index": 0, "delta": {"content": "Hel"}}]}),
        json!({"choices": [{"index": 0, "delta": {"content": "lo"}}]}),
        json!({"choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]}),
    ];
    let state = aggregate(&events, Provider::OpenAiDelta);

    assert_eq!(state.role.as_deref(), Some("assistant"));
    assert_eq!(state.finish_reason.as_deref(), Some("stop"));
    assert_eq!(text_block(&state, BlockKey::block(0)), "Hello");
}

#[test]
fn openai_role_not_cleared_by_later_empty_role() {
    let events = vec![
        json!({"choices": [{"index": 0, "delta": {"role": "assistant"}}]}),
        json!({"choices": [{"index": 0, "delta": {"role": "", "content": "x"}}]}),
    ];
    let state = aggregate(&events, Provider::OpenAiDelta);
    assert_eq!(state.role.as_deref(), Some("assistant"));
}

#[test]
fn openai_reasoning_tracked_separately_from_content() {
    let events = vec![
        json!({"choices": [{"index": 0, "delta": {"reasoning": "think "}}]}),
        json!({"choices": [{"index": 0, "delta": {"content": "answer"}}]}),
        json!({"choices": [{"index": 0, "delta": {"reasoning_content": "more"}}]}),
    ];
    let state = aggregate(&events, Provider::OpenAiDelta);
    assert_eq!(
        state.blocks[&BlockKey::block(0)],
        Block::Text {
            text: "answer".into(),
            reasoning: "think more".into(),
        }
    );
}

#[test]
fn openai_tool_call_fragments_accumulate_per_sub_index() {
    let events = vec![
        json!({"choices": [{"index": 0, "delta": {"tool_calls": [
            {"index": 0, "id": "call_1", "type": "function",
             "function": {"name": "get_weather", "arguments": ""}}
        ]}}]}),
        json!({"choices": [{"index": 0, "delta": {"tool_calls": [
            {"index": 0, "function": {"arguments": "{\"city\":"}}
        ]}}]}),
        json!({"choices": [{"index": 0, "delta": {"tool_calls": [
            {"index": 0, "function": {"arguments": "\"Paris\"}"}},
            {"index": 1, "id": "call_2", "function": {"name": "get_time"}}
        ]}}]}),
        json!({"choices": [{"index": 0, "delta": {}, "finish_reason": "tool_calls"}]}),
    ];
    let state = aggregate(&events, Provider::OpenAiDelta);

    assert_eq!(
        state.blocks[&BlockKey::tool_call(0, 0)],
        Block::ToolCall {
            id: Some("call_1".into()),
            name: Some("get_weather".into()),
            call_type: Some("function".into()),
            arguments_raw: "{\"city\":\"Paris\"}".into(),
        }
    );
    assert_eq!(
        state.blocks[&BlockKey::tool_call(0, 1)],
        Block::ToolCall {
            id: Some("call_2".into()),
            name: Some("get_time".into()),
            call_type: None,
            arguments_raw: String::new(),
        }
    );
    assert_eq!(state.finish_reason.as_deref(), Some("tool_calls"));
}

#[test]
fn openai_tool_name_sticky_across_absence() {
    let events = vec![
        json!({"choices": [{"index": 0, "delta": {"tool_calls": [
            {"index": 0, "function": {"name": "search"}}
        ]}}]}),
        json!({"choices": [{"index": 0, "delta": {"tool_calls": [
            {"index": 0, "function": {"arguments": "{}"}}
        ]}}]}),
    ];
    let state = aggregate(&events, Provider::OpenAiDelta);
    match &state.blocks[&BlockKey::tool_call(0, 0)] {
        Block::ToolCall { name, .. } => assert_eq!(name.as_deref(), Some("search")),
        other => panic!("expected tool call, got {other:?}"),
    }
}

#[test]
fn openai_multiple_choices_keep_independent_blocks() {
    let events = vec![
        json!({"choices": [
            {"index": 0, "delta": {"content": "first"}},
            {"index": 1, "delta": {"content": "second"}}
        ]}),
        json!({"choices": [{"index": 1, "delta": {"content": " choice"}}]}),
    ];
    let state = aggregate(&events, Provider::OpenAiDelta);
    assert_eq!(text_block(&state, BlockKey::block(0)), "first");
    assert_eq!(text_block(&state, BlockKey::block(1)), "second choice");
}

#[test]
fn anthropic_tool_use_round_trips_to_valid_json() {
    let events = vec![
        json!({"type": "message_start", "message": {"id": "msg_1", "role": "assistant"}}),
        json!({"type": "content_block_start", "index": 0,
               "content_block": {"type": "tool_use", "id": "t1", "name": "search"}}),
        json!({"type": "content_block_delta", "index": 0,
               "delta": {"type": "input_json_delta", "partial_json": "{\"q\":"}}),
        json!({"type": "content_block_delta", "index": 0,
               "delta": {"type": "input_json_delta", "partial_json": "\"cats\"}"}}),
        json!({"type": "message_delta", "delta": {"stop_reason": "tool_use"}}),
    ];
    let state = aggregate(&events, Provider::AnthropicBlock);

    let Block::ToolCall {
        id,
        name,
        arguments_raw,
        ..
    } = &state.blocks[&BlockKey::block(0)]
    else {
        panic!("expected tool call block");
    };
    assert_eq!(id.as_deref(), Some("t1"));
    assert_eq!(name.as_deref(), Some("search"));
    assert_eq!(arguments_raw, "{\"q\":\"cats\"}");

    // Accumulated fragments parse to the same value as the full string.
    let parsed: Value = serde_json::from_str(arguments_raw).unwrap();
    assert_eq!(parsed, json!({"q": "cats"}));
    assert_eq!(state.finish_reason.as_deref(), Some("tool_use"));
}

#[test]
fn anthropic_delta_without_start_creates_block_lazily() {
    let events = vec![json!({
        "type": "content_block_delta", "index": 2,
        "delta": {"type": "text_delta", "text": "orphan"}
    })];
    let state = aggregate(&events, Provider::AnthropicBlock);
    assert_eq!(text_block(&state, BlockKey::block(2)), "orphan");
}

#[test]
fn anthropic_thinking_deltas_fill_reasoning_buffer() {
    let events = vec![
        json!({"type": "content_block_start", "index": 0,
               "content_block": {"type": "thinking"}}),
        json!({"type": "content_block_delta", "index": 0,
               "delta": {"type": "thinking_delta", "thinking": "hmm"}}),
        json!({"type": "content_block_start", "index": 1,
               "content_block": {"type": "text", "text": ""}}),
        json!({"type": "content_block_delta", "index": 1,
               "delta": {"type": "text_delta", "text": "done"}}),
    ];
    let state = aggregate(&events, Provider::AnthropicBlock);
    assert_eq!(
        state.blocks[&BlockKey::block(0)],
        Block::Text {
            text: String::new(),
            reasoning: "hmm".into(),
        }
    );
    assert_eq!(text_block(&state, BlockKey::block(1)), "done");
}

#[test]
fn anthropic_stop_sequence_reported_with_reason() {
    let events = vec![json!({
        "type": "message_delta",
        "delta": {"stop_reason": "stop_sequence", "stop_sequence": "\n\nHuman:"}
    })];
    let state = aggregate(&events, Provider::AnthropicBlock);
    assert_eq!(state.finish_reason.as_deref(), Some("stop_sequence"));
    assert_eq!(state.stop_sequence.as_deref(), Some("\n\nHuman:"));
}

#[test]
fn blocks_sorted_ascending_regardless_of_arrival_order() {
    let events = vec![
        json!({"type": "content_block_start", "index": 3,
               "content_block": {"type": "text", "text": "late"}}),
        json!({"type": "content_block_start", "index": 1,
               "content_block": {"type": "text", "text": "early"}}),
    ];
    let state = aggregate(&events, Provider::AnthropicBlock);
    let keys: Vec<_> = state.blocks.keys().copied().collect();
    assert_eq!(keys, vec![BlockKey::block(1), BlockKey::block(3)]);
}

#[test]
fn truncated_stream_keeps_partial_text_and_unknown_finish() {
    let events = vec![
        json!({"type": "content_block_start", "index": 0,
               "content_block": {"type": "text", "text": ""}}),
        json!({"type": "content_block_delta", "index": 0,
               "delta": {"type": "text_delta", "text": "cut off mid-"}}),
    ];
    let state = aggregate(&events, Provider::AnthropicBlock);
    assert_eq!(text_block(&state, BlockKey::block(0)), "cut off mid-");
    assert_eq!(state.finish_reason, None);
}

#[test]
fn unknown_event_types_are_ignored() {
    let events = vec![
        json!({"type": "ping"}),
        json!({"type": "brand_new_event", "index": 0, "payload": {"x": 1}}),
        json!({"choices": [{"index": 0, "delta": {"content": "ok"}}]}),
    ];
    // Anthropic decoding skips all three; OpenAI decoding uses the last.
    let anthropic = aggregate(&events, Provider::AnthropicBlock);
    assert!(anthropic.blocks.is_empty());

    let openai = aggregate(&events, Provider::OpenAiDelta);
    assert_eq!(text_block(&openai, BlockKey::block(0)), "ok");
}

#[test]
fn aggregating_zero_events_yields_default_state() {
    let state = aggregate(&[], Provider::OpenAiDelta);
    assert_eq!(state, llmlens::types::MessageState::default());
}

#[test]
fn replaying_the_same_fragments_is_deterministic() {
    let events = vec![
        json!({"choices": [{"index": 0, "delta": {"content": "a"}}]}),
        json!({"choices": [{"index": 0, "delta": {"content": "b"}}]}),
        json!({"choices": [{"index": 0, "delta": {"content": "c"}}]}),
    ];
    let first = aggregate(&events, Provider::OpenAiDelta);
    let second = aggregate(&events, Provider::OpenAiDelta);
    assert_eq!(first, second);
    assert_eq!(text_block(&first, BlockKey::block(0)), "abc");
}
