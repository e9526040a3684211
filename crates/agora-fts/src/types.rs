//! Common types for the FTS module.

use serde::{Deserialize, Serialize};

use crate::document::TopicDocument;

/// Default page size when a request leaves `limit` at zero.
pub const DEFAULT_LIMIT: usize = 20;

/// Pagination state for a search result page.
///
/// `page` is 1-based at the interface; the engine offset is computed as
/// `(page - 1) * limit`. `total` is the number of matching documents across
/// all pages, not the number returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

impl Paging {
    /// Create paging state for a request, normalizing out-of-range values:
    /// page 0 becomes 1, limit 0 becomes [`DEFAULT_LIMIT`].
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
            total: 0,
        }
    }

    /// Zero-based offset of the first hit on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicPage {
    /// Matching documents in engine order (already sorted and paginated).
    pub docs: Vec<TopicDocument>,
    /// Pagination state including the total match count.
    pub paging: Paging,
}

impl TopicPage {
    /// Create a well-formed empty page.
    ///
    /// Callers rendering a graceful empty state after a search failure get
    /// initialized paging fields rather than garbage.
    pub fn empty(page: usize, limit: usize) -> Self {
        Self {
            docs: Vec::new(),
            paging: Paging::new(page, limit),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
