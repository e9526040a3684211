//! Error types for Agora search.

use thiserror::Error;

/// Result type alias for Agora operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the search subsystem.
///
/// Every failure is logged with context at the point it occurs and then
/// returned to the caller exactly once; no variant is retried internally.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The index could not be opened or created.
    ///
    /// There is no degraded mode without an index, so embedding applications
    /// normally treat this as fatal at startup.
    #[error("search index unavailable at '{path}': {reason}")]
    StoreUnavailable { path: String, reason: String },

    /// The engine rejected a delete.
    #[error("failed to delete '{doc_id}' from index: {reason}")]
    DeleteFailed { doc_id: String, reason: String },

    /// The engine rejected an insert.
    ///
    /// On the upsert path this can follow a successful delete, leaving the
    /// document absent until the caller reindexes it.
    #[error("failed to index '{doc_id}': {reason}")]
    InsertFailed { doc_id: String, reason: String },

    /// The engine rejected a query.
    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    /// Filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a `StoreUnavailable` error for an index path.
    pub fn store_unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::StoreUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a `DeleteFailed` error for a document id.
    pub fn delete_failed(doc_id: impl Into<String>, reason: impl ToString) -> Self {
        Self::DeleteFailed {
            doc_id: doc_id.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an `InsertFailed` error for a document id.
    pub fn insert_failed(doc_id: impl Into<String>, reason: impl ToString) -> Self {
        Self::InsertFailed {
            doc_id: doc_id.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a `SearchFailed` error.
    pub fn search_failed(reason: impl ToString) -> Self {
        Self::SearchFailed {
            reason: reason.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
