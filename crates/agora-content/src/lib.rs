//! Content normalization for Agora search.
//!
//! Forum topics are authored in markdown, frequently with inline HTML mixed
//! in. The index must never store executable markup, so before a topic body
//! is indexed it runs through a single pure pipeline:
//!
//! 1. render-and-strip: markdown structure and HTML tags are collapsed to
//!    their readable text content ([`text::extract_plain_text`])
//! 2. escape: the result is HTML-entity-escaped exactly once
//!    ([`escape::escape_entities`])
//!
//! The pipeline decodes any entities the input already carries before
//! escaping, which makes [`normalize`] idempotent: feeding its output back in
//! returns the same string. Without that, re-indexing a document would stack
//! `&amp;amp;` escapes on every pass.
//!
//! # Example
//!
//! ```
//! use agora_content::normalize;
//!
//! let body = "# Hello\n\nSome **bold** text & a <b>tag</b>.";
//! let plain = normalize(body);
//! assert_eq!(plain, "Hello Some bold text &amp; a tag.");
//! assert_eq!(normalize(&plain), plain);
//! ```

pub mod escape;
pub mod text;

pub use escape::{decode_entities, escape_entities};
pub use text::extract_plain_text;

/// Normalize a raw topic body into indexable, entity-escaped plain text.
///
/// Pure and deterministic: same input, same output, no side effects.
pub fn normalize(raw: &str) -> String {
    escape_entities(&extract_plain_text(raw))
}

// ============================================================================
// Tests
// ============================================================================
