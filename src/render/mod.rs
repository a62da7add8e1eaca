//! Plain-text views of a [`Snapshot`].
//!
//! The `prettify_*` entry points are what a traffic-inspection host calls:
//! they never panic, never propagate an error, and always hand back
//! something readable — the inspection session must survive any body.

mod format;

pub use format::{indent_json, indent_text, try_parse_json};

use crate::aggregate::aggregate;
use crate::document::extract_document;
use crate::metadata;
use crate::provider::Provider;
use crate::sse::decode_events;
use crate::types::{Block, Origin, Snapshot, SnapshotBlock};

use format::{section_break, SPLIT_LINE};

/// Shown when a stream decoded to zero events (empty body, sentinel only,
/// or nothing parseable).
pub const EMPTY_STREAM_MESSAGE: &str = "# Empty SSE response or [DONE] only\n";

/// Render a fully captured SSE body.
pub fn prettify_stream(body: &[u8], provider: Provider) -> String {
    let events = decode_events(body);
    if events.is_empty() {
        return EMPTY_STREAM_MESSAGE.to_string();
    }
    let state = aggregate(&events, provider);
    let envelope = metadata::extract(&events, provider);
    let snapshot = Snapshot::new(
        envelope,
        state,
        Origin::Stream {
            events: events.len(),
        },
    );
    render_snapshot(&snapshot, provider)
}

/// Render a non-streaming JSON response body. A body that fails to parse
/// degrades to an inline error message followed by the raw body.
pub fn prettify_document(body: &[u8], provider: Provider) -> String {
    match extract_document(body, provider) {
        Ok(snapshot) => render_snapshot(&snapshot, provider),
        Err(err) => format!(
            "Error during prettifying: {err}\n\n{}",
            String::from_utf8_lossy(body)
        ),
    }
}

/// Render a snapshot: envelope header, one section per block in key order,
/// then stop-reason and fingerprint trailers.
pub fn render_snapshot(snapshot: &Snapshot, provider: Provider) -> String {
    let mut out = String::new();

    match snapshot.origin {
        Origin::Stream { events } => {
            out.push_str(&format!(
                "# {} SSE response ({events} events)\n \n",
                provider_label(provider)
            ));
        }
        Origin::Document => {
            out.push_str(&format!(
                "# {} response body\n \n",
                provider_label(provider)
            ));
        }
    }

    out.push_str(&render_envelope(snapshot));
    out.push_str(&section_break(2));

    if !snapshot.blocks.is_empty() {
        out.push_str("## Content\n");
        for block in &snapshot.blocks {
            out.push_str(&render_block(block));
        }
        out.push_str(&section_break(2));
    }

    if let Some(reason) = &snapshot.finish_reason {
        out.push_str("## Stop reason\n");
        out.push_str(&format!("Reason  : {reason}\n"));
        if let Some(sequence) = &snapshot.stop_sequence {
            out.push_str(&format!("Sequence: {sequence}\n"));
        }
    }

    if let Some(fingerprint) = &snapshot.system_fingerprint {
        out.push_str(&format!("## System fingerprint\n{fingerprint}\n"));
    }

    out
}

fn provider_label(provider: Provider) -> &'static str {
    match provider {
        Provider::OpenAiDelta => "OpenAI",
        Provider::OpenAiResponses => "OpenAI Responses",
        Provider::AnthropicBlock => "Anthropic",
    }
}

/// Label-aligned envelope table; unknown fields print as `N/A` so the layout
/// is stable whatever the stream carried.
fn render_envelope(snapshot: &Snapshot) -> String {
    let rows = [
        ("id", display_field(&snapshot.id)),
        ("model", display_field(&snapshot.model)),
        ("role", display_field(&snapshot.role)),
        ("input_tokens", display_count(snapshot.usage.input_tokens)),
        ("output_tokens", display_count(snapshot.usage.output_tokens)),
        ("total_tokens", display_count(snapshot.usage.total_tokens)),
    ];
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 2;

    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{label:<width$}:   {value}\n"));
    }
    out
}

fn display_field(field: &Option<String>) -> String {
    field.clone().unwrap_or_else(|| "N/A".to_string())
}

fn display_count(count: Option<u64>) -> String {
    count
        .map(|value| value.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn render_block(block: &SnapshotBlock) -> String {
    let mut out = String::new();
    match &block.block {
        Block::Text { text, reasoning } => {
            let text = text.trim();
            let reasoning = reasoning.trim();
            if text.is_empty() && reasoning.is_empty() {
                return out;
            }
            out.push_str(&format!("### Text block {}\n", block.key.index));
            if !reasoning.is_empty() {
                out.push_str("#### Reasoning\n");
                out.push_str(&format!(
                    "{SPLIT_LINE}{}{SPLIT_LINE}",
                    indent_text(reasoning, 4)
                ));
            }
            if !text.is_empty() {
                if !reasoning.is_empty() {
                    out.push_str("#### Content\n");
                }
                out.push_str(&format!("{SPLIT_LINE}{}{SPLIT_LINE}", indent_text(text, 4)));
            }
        }
        Block::ToolCall {
            id,
            name,
            call_type,
            arguments_raw,
        } => {
            out.push_str(&format!(
                "### Tool call {}\n",
                block.key.call.unwrap_or(block.key.index)
            ));
            out.push_str(&format!("  - id   : {}\n", display_field(id)));
            if let Some(call_type) = call_type {
                out.push_str(&format!("  - type : {call_type}\n"));
            }
            out.push_str(&format!("  - name : {}\n", display_field(name)));
            out.push_str(&format!(
                "  - arguments: {SPLIT_LINE}{}{SPLIT_LINE}",
                indent_json(arguments_raw, 4)
            ));
        }
    }
    out
}
