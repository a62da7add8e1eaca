//! Convenience re-exports for common use.

pub use crate::error::{LensError, Result};
pub use crate::provider::Provider;
pub use crate::render::{prettify_document, prettify_stream};
pub use crate::types::{
    Block, BlockKey, EnvelopeMetadata, MessageState, Origin, Snapshot, SnapshotBlock, Usage,
};
pub use crate::{inspect_document, inspect_stream};
