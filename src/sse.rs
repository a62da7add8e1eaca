//! SSE frame decoding for captured `text/event-stream` bodies.

use serde_json::Value;
use tracing::warn;

/// Leading marker of an SSE data line.
const DATA_PREFIX: &str = "data: ";

/// Terminal sentinel some providers send. Optional on the wire; its absence
/// is not an error.
const DONE_SENTINEL: &str = "[DONE]";

/// Split a fully captured SSE body into its ordered JSON event objects.
///
/// Non-data lines (comments, `event:` fields, blanks) are skipped, the
/// `[DONE]` sentinel is discarded, and a data line that fails to parse as
/// JSON is dropped rather than failing the whole body. Output order is
/// exactly encounter order — every downstream step depends on it.
///
/// An empty result means the stream carried no content; callers must treat
/// that as the explicit "no content" case, not an error.
pub fn decode_events(body: &[u8]) -> Vec<Value> {
    let text = String::from_utf8_lossy(body);
    let mut events = Vec::new();

    for line in text.lines() {
        let Some(data) = line.trim().strip_prefix(DATA_PREFIX) else {
            continue;
        };
        if data == DONE_SENTINEL {
            continue;
        }
        match serde_json::from_str::<Value>(data) {
            Ok(event) => events.push(event),
            Err(err) => warn!(%err, "could not decode SSE data line"),
        }
    }

    events
}
