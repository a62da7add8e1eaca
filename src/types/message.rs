//! Aggregation state for one logical message.

use std::collections::BTreeMap;

use super::block::{Block, BlockKey};

/// Message-level fields plus the key-ordered block accumulators for one
/// aggregation run. Created fresh per response body; nothing survives
/// across bodies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageState {
    /// Sticky: set once to the first non-empty value observed, never cleared
    /// by a later empty or missing value.
    pub role: Option<String>,
    /// Last non-null value observed wins; an explicit null never overwrites
    /// a resolved value.
    pub finish_reason: Option<String>,
    pub stop_sequence: Option<String>,
    pub blocks: BTreeMap<BlockKey, Block>,
}
