//! llmlens — readable views of captured LLM chat API traffic.
//!
//! Reconstructs the logical message behind a captured HTTP response body —
//! the streamed Server-Sent-Events variants of the OpenAI delta, OpenAI
//! Responses and Anthropic block protocols, plus their non-streaming JSON
//! documents — and renders it as plain text for a human inspecting network
//! traffic.
//!
//! # Quick Start
//!
//! ```
//! use llmlens::{inspect_stream, Provider};
//!
//! let body = b"data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hi\"}}]}\n\ndata: [DONE]\n\n";
//! let snapshot = inspect_stream(body, Provider::OpenAiDelta);
//! assert_eq!(snapshot.blocks.len(), 1);
//! ```

pub mod aggregate;
pub mod document;
pub mod error;
pub mod metadata;
pub mod prelude;
pub mod provider;
pub mod render;
pub mod sse;
pub mod types;

pub use error::{LensError, Result};
pub use provider::Provider;
pub use types::Snapshot;

use types::Origin;

/// Reconstruct the logical message behind a fully captured SSE body.
///
/// A body with zero decodable events yields a snapshot whose
/// [`Snapshot::is_empty`] is true — the explicit "no content" case, not an
/// error.
pub fn inspect_stream(body: &[u8], provider: Provider) -> Snapshot {
    let events = sse::decode_events(body);
    let state = aggregate::aggregate(&events, provider);
    let metadata = metadata::extract(&events, provider);
    Snapshot::new(metadata, state, Origin::Stream { events: events.len() })
}

/// Reconstruct the logical message behind a non-streaming JSON response.
pub fn inspect_document(body: &[u8], provider: Provider) -> Result<Snapshot> {
    document::extract_document(body, provider)
}
