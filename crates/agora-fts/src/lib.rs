//! Full-text topic search for Agora (Tantivy backend).
//!
//! This crate owns the searchable representation of forum topics: the index
//! schema, incremental index maintenance, and paginated query execution.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       agora-fts                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TopicStore (index lifecycle: open / upsert / delete)       │
//! │  TopicSchema (11-field topic schema, en_stem analyzer)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TopicDocument + build_document (entity → document)         │
//! │  UserLookup / TagLookup (denormalization seams)             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  QueryBuilder (title match + time window, conjunctive)      │
//! │  search_page (count + ordered top-docs, hit mapping)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Write path: `build_document` → `agora_content::normalize` →
//! `TopicStore::upsert`. Read path: `QueryBuilder` →
//! `TopicStore::search_page` → hit mapping.
//!
//! Documents are keyed by composite ids (`"topic-4821"`); updates are
//! delete-then-insert under a single writer lock. Content is always
//! entity-escaped plain text by the time it reaches the index.
//!
//! # Example
//!
//! ```rust,ignore
//! use agora_fts::{SearchRequest, TopicStore};
//!
//! let store = TopicStore::open(&index_path)?;
//!
//! store.index_data("topic-4821", 4821, 77, create_time_millis, raw_body, title)?;
//!
//! let page = store.search_page(&SearchRequest::new("borrow checker", 2, 1, 20))?;
//! for doc in &page.docs {
//!     println!("{}: {}", doc.id, doc.title);
//! }
//! ```

pub mod document;
pub mod query;
pub mod schema;
pub mod search;
pub mod store;
pub mod types;

// Re-exports
pub use document::{TagLookup, Topic, TopicDocument, UserLookup, build_document};
pub use query::{QueryBuilder, SearchRequest, TimeWindow};
pub use schema::{SCHEMA_VERSION, TopicSchema};
pub use store::TopicStore;
pub use types::{DEFAULT_LIMIT, Paging, TopicPage};
