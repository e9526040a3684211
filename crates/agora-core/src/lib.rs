//! Agora Core — shared error types and id utilities.
//!
//! This crate provides the foundational types used across the Agora search
//! crates. It has no internal Agora dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: Composite document-id utilities

pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::ids::{TOPIC_ENTITY, doc_id, entity_type, numeric_id};
