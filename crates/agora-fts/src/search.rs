//! Search execution and hit mapping.
//!
//! The read path: build the composite query, run it with a count collector
//! and a `create_time`-ordered, offset top-docs collector, then map each raw
//! hit back into a [`TopicDocument`].
//!
//! # Projection
//!
//! Only `id`, `user_id`, `title`, `content`, and `create_time` are populated
//! on hits, plus the entity type decoded from the composite document id.
//! The remaining fields (`node_id`, `nickname`, `tags`, `recommend`,
//! `status`) are left at their zero values; they are not reconstructable
//! from search results and must be re-fetched by identity if needed.
//!
//! # Ordering
//!
//! Results are sorted by `create_time` descending (newest first); pagination
//! uses the same collector, so consecutive pages never duplicate or skip
//! documents between commits.

use tantivy::collector::{Count, TopDocs};
use tantivy::schema::Value;
use tantivy::{Order, TantivyDocument};

use agora_core::{Error, Result, entity_type};

use crate::document::TopicDocument;
use crate::query::SearchRequest;
use crate::store::TopicStore;
use crate::types::{Paging, TopicPage};

impl TopicStore {
    /// Execute a paginated topic search.
    ///
    /// An engine failure is logged and returned as `SearchFailed`; callers
    /// can render [`TopicPage::empty`] as the graceful zero state.
    pub fn search_page(&self, request: &SearchRequest) -> Result<TopicPage> {
        let mut paging = Paging::new(request.page, request.limit);
        let query = self.queries.build(request);

        log::debug!(
            "search: query='{}', window={:?}, page={}, limit={}",
            request.query,
            request.time_window,
            paging.page,
            paging.limit
        );

        let searcher = self.reader.searcher();
        let collector = TopDocs::with_limit(paging.limit)
            .and_offset(paging.offset())
            .order_by_fast_field::<i64>("create_time", Order::Desc);

        let (total, hits) = searcher
            .search(&query, &(Count, collector))
            .map_err(|err| {
                log::error!("search failed: {err}");
                Error::search_failed(err)
            })?;
        paging.total = total;

        let mut docs = Vec::with_capacity(hits.len());
        for (_create_time, address) in hits {
            let stored: TantivyDocument = searcher.doc(address).map_err(|err| {
                log::error!("failed to load hit {address:?}: {err}");
                Error::search_failed(err)
            })?;
            docs.push(self.map_hit(&stored));
        }

        Ok(TopicPage { docs, paging })
    }

    /// Map one stored hit into the projected document shape.
    ///
    /// Extraction is defensive: an absent or mistyped stored field is
    /// skipped, leaving the output field at its zero value, never failing
    /// the whole mapping.
    fn map_hit(&self, stored: &TantivyDocument) -> TopicDocument {
        let s = &self.schema;

        let doc_id = stored
            .get_first(s.doc_id)
            .and_then(|value| value.as_str())
            .unwrap_or_default();

        TopicDocument {
            entity_type: entity_type(doc_id).to_string(),
            id: stored
                .get_first(s.id)
                .and_then(|value| value.as_i64())
                .unwrap_or_default(),
            user_id: stored
                .get_first(s.user_id)
                .and_then(|value| value.as_i64())
                .unwrap_or_default(),
            title: stored
                .get_first(s.title)
                .and_then(|value| value.as_str())
                .unwrap_or_default()
                .to_string(),
            content: stored
                .get_first(s.content)
                .and_then(|value| value.as_str())
                .unwrap_or_default()
                .to_string(),
            create_time: stored
                .get_first(s.create_time)
                .and_then(|value| value.as_i64())
                .unwrap_or_default(),
            ..TopicDocument::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
