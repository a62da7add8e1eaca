//! Envelope metadata and token usage.

use serde::Serialize;
use serde_json::Value;

/// Token counters for one response.
///
/// Counters never observed stay `None` so the renderer can show `N/A`
/// deterministically instead of omitting them.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl Usage {
    /// Read counters from a `usage` object, accepting both providers' field
    /// names (`prompt_tokens`/`completion_tokens` and
    /// `input_tokens`/`output_tokens`).
    pub fn from_value(usage: &Value) -> Self {
        let count = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| usage.get(key).and_then(Value::as_u64))
        };
        Self {
            input_tokens: count(&["input_tokens", "prompt_tokens"]),
            output_tokens: count(&["output_tokens", "completion_tokens"]),
            total_tokens: count(&["total_tokens"]),
        }
    }

    /// Overlay counters from `other`: its non-null fields win.
    pub fn overlay(&mut self, other: &Usage) {
        if other.input_tokens.is_some() {
            self.input_tokens = other.input_tokens;
        }
        if other.output_tokens.is_some() {
            self.output_tokens = other.output_tokens;
        }
        if other.total_tokens.is_some() {
            self.total_tokens = other.total_tokens;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.input_tokens.is_none() && self.output_tokens.is_none() && self.total_tokens.is_none()
    }
}

/// Message-level identifying fields, as opposed to block-level content.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct EnvelopeMetadata {
    pub id: Option<String>,
    pub model: Option<String>,
    pub role: Option<String>,
    pub system_fingerprint: Option<String>,
    pub usage: Usage,
}
