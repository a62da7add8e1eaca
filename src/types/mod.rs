//! Core types for llmlens.

pub mod block;
pub mod message;
pub mod snapshot;
pub mod usage;

pub use block::*;
pub use message::*;
pub use snapshot::*;
pub use usage::*;
