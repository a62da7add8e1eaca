//! Envelope metadata extraction from a decoded event list.

use serde_json::Value;

use crate::provider::Provider;
use crate::types::{EnvelopeMetadata, Usage};

/// Extract envelope fields with two independent scans over the decoded list.
///
/// A forward scan picks up the first event carrying each envelope field; a
/// backward scan finds the last event with non-null `usage`, whose counters
/// overlay whatever the envelope provided. Usage customarily arrives only in
/// the final one or two events, and earlier events may declare `usage: null`
/// as a placeholder, so scanning backward is both cheap and correct.
pub fn extract(events: &[Value], provider: Provider) -> EnvelopeMetadata {
    let mut metadata = match provider {
        // Responses events carry id/model at the top level, same as chunks.
        Provider::OpenAiDelta | Provider::OpenAiResponses => openai_envelope(events),
        Provider::AnthropicBlock => anthropic_envelope(events),
    };

    if let Some(usage) = events.iter().rev().find_map(trailing_usage) {
        metadata.usage.overlay(&usage);
    }

    metadata
}

fn trailing_usage(event: &Value) -> Option<Usage> {
    let usage = event.get("usage")?;
    if usage.is_null() {
        return None;
    }
    Some(Usage::from_value(usage))
}

/// Delta chunks repeat the envelope per event; take each field from the
/// first event that carries it.
fn openai_envelope(events: &[Value]) -> EnvelopeMetadata {
    let mut metadata = EnvelopeMetadata::default();
    for event in events {
        let field = |name: &str| event.get(name).and_then(Value::as_str).map(str::to_string);
        if metadata.id.is_none() {
            metadata.id = field("id");
        }
        if metadata.model.is_none() {
            metadata.model = field("model");
        }
        if metadata.system_fingerprint.is_none() {
            metadata.system_fingerprint = field("system_fingerprint");
        }
    }
    metadata
}

/// The block variant sends the envelope once, inside `message_start`.
fn anthropic_envelope(events: &[Value]) -> EnvelopeMetadata {
    let message = events
        .iter()
        .find_map(|event| {
            (event.get("type").and_then(Value::as_str) == Some("message_start"))
                .then(|| event.get("message"))
                .flatten()
        })
        // Truncated captures may still carry a message object elsewhere.
        .or_else(|| events.iter().find_map(|event| event.get("message")));

    let Some(message) = message else {
        return EnvelopeMetadata::default();
    };

    let field = |name: &str| message.get(name).and_then(Value::as_str).map(str::to_string);
    EnvelopeMetadata {
        id: field("id"),
        model: field("model"),
        role: field("role"),
        system_fingerprint: None,
        usage: message
            .get("usage")
            .map(Usage::from_value)
            .unwrap_or_default(),
    }
}
