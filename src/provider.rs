//! Which provider wire schema a captured body follows.

use strum::{Display, EnumString};

/// The protocol variants.
///
/// Decided once per stream from the request, never sniffed per event — a
/// single stream never mixes providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Provider {
    /// OpenAI-style `chat/completions`: per-choice `delta` objects.
    OpenAiDelta,
    /// OpenAI `/responses`: un-indexed `output`/`delta` text events.
    OpenAiResponses,
    /// Anthropic-style `/messages`: typed content-block events.
    AnthropicBlock,
}

impl Provider {
    /// Infer the schema from the request host and path.
    ///
    /// Mirrors how a proxy host dispatches its views; returns `None` when
    /// neither shape matches so the caller keeps its default handling.
    pub fn from_request(host: &str, path: &str) -> Option<Self> {
        if host.to_ascii_lowercase().contains("anthropic") && path.contains("/messages") {
            return Some(Self::AnthropicBlock);
        }
        if path.contains("/responses") {
            return Some(Self::OpenAiResponses);
        }
        if path.ends_with("/chat/completions") || path.ends_with("/completions") {
            return Some(Self::OpenAiDelta);
        }
        None
    }
}
