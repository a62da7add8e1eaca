//! The immutable result of inspecting one response body.

use serde::Serialize;

use super::block::{Block, BlockKey};
use super::message::MessageState;
use super::usage::{EnvelopeMetadata, Usage};

/// Where a snapshot came from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// A decoded SSE stream and how many events it carried.
    Stream { events: usize },
    /// A single non-streaming JSON document.
    Document,
}

impl Default for Origin {
    fn default() -> Self {
        Origin::Stream { events: 0 }
    }
}

/// One block of the finalized message.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotBlock {
    pub key: BlockKey,
    #[serde(flatten)]
    pub block: Block,
}

/// The finalized, immutable combination of envelope metadata and aggregated
/// message state, with blocks ordered ascending by key.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Snapshot {
    pub id: Option<String>,
    pub model: Option<String>,
    pub role: Option<String>,
    pub system_fingerprint: Option<String>,
    pub usage: Usage,
    pub finish_reason: Option<String>,
    pub stop_sequence: Option<String>,
    pub blocks: Vec<SnapshotBlock>,
    pub origin: Origin,
}

impl Snapshot {
    /// Combine envelope metadata and message state.
    ///
    /// The aggregated role (streamed per-event) takes precedence; the
    /// envelope role fills in when the stream never carried one.
    pub fn new(metadata: EnvelopeMetadata, state: MessageState, origin: Origin) -> Self {
        Self {
            id: metadata.id,
            model: metadata.model,
            role: state.role.or(metadata.role),
            system_fingerprint: metadata.system_fingerprint,
            usage: metadata.usage,
            finish_reason: state.finish_reason,
            stop_sequence: state.stop_sequence,
            blocks: state
                .blocks
                .into_iter()
                .map(|(key, block)| SnapshotBlock { key, block })
                .collect(),
            origin,
        }
    }

    /// True for the explicit "no content" case: a stream from which nothing
    /// was decoded. Distinguishable from a populated message that happens to
    /// have zero blocks.
    pub fn is_empty(&self) -> bool {
        matches!(self.origin, Origin::Stream { events: 0 })
    }
}
