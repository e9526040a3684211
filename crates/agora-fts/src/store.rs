//! Index store lifecycle and write paths.
//!
//! `TopicStore` owns the Tantivy index handle: it opens an existing index at
//! a path or creates one from [`TopicSchema`] if absent, and exposes upsert,
//! delete, and (in `search`) paginated query execution.
//!
//! # Update semantics
//!
//! The engine has no in-place update, so upsert is delete-by-term followed by
//! add-document. Both steps and the commit happen under a single writer lock,
//! so concurrent upserts of the same document id serialize instead of
//! interleaving; callers carry no per-id write-ordering obligation. If the
//! add is rejected after the delete was staged, the staged delete is rolled
//! back and the failure is reported as `InsertFailed`.
//!
//! # Concurrency
//!
//! One store instance is shared process-wide: searches run concurrently on
//! reader searchers, writes serialize on the writer lock. All calls are
//! blocking; a slow engine call blocks the caller for its duration. No
//! retries; every failure surfaces once.

use std::path::Path;

use parking_lot::Mutex;
use tantivy::directory::MmapDirectory;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};

use agora_core::{Error, Result, TOPIC_ENTITY, doc_id};
use agora_content::normalize;

use crate::document::{TagLookup, Topic, TopicDocument, UserLookup, build_document};
use crate::query::QueryBuilder;
use crate::schema::TopicSchema;

/// Index writer buffer size (50MB).
const WRITER_BUFFER_SIZE: usize = 50_000_000;

/// The process-wide topic index handle.
///
/// Constructed once via [`TopicStore::open`] and shared by reference;
/// construction is the only lifecycle step, there is no teardown beyond drop.
pub struct TopicStore {
    index: Index,
    pub(crate) reader: IndexReader,
    writer: Mutex<IndexWriter>,
    pub(crate) schema: TopicSchema,
    pub(crate) queries: QueryBuilder,
}

impl TopicStore {
    /// Open the index at `path`, creating it from the schema if absent.
    ///
    /// Creation through the engine is atomic/exclusive, so a crash between
    /// "not found" and "created" cannot leave a half-created index behind.
    /// Failure here means search is unavailable; embedding applications
    /// normally treat it as fatal at startup.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .map_err(|err| Error::store_unavailable(path.display().to_string(), err))?;
        }

        let schema = TopicSchema::build();
        let dir = MmapDirectory::open(path)
            .map_err(|err| Error::store_unavailable(path.display().to_string(), err))?;
        let index = Index::open_or_create(dir, schema.schema().clone())
            .map_err(|err| Error::store_unavailable(path.display().to_string(), err))?;

        Self::from_index(index, schema)
            .map_err(|err| Error::store_unavailable(path.display().to_string(), err))
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> Result<Self> {
        let schema = TopicSchema::build();
        let index = Index::create_in_ram(schema.schema().clone());
        Self::from_index(index, schema)
            .map_err(|err| Error::store_unavailable("<ram>", err))
    }

    fn from_index(index: Index, schema: TopicSchema) -> tantivy::Result<Self> {
        TopicSchema::register_tokenizers(&index);

        let writer = index.writer(WRITER_BUFFER_SIZE)?;
        // Manual reload: the reader is refreshed right after each commit, so
        // a write is visible to the next search.
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Ok(Self {
            index,
            reader,
            writer: Mutex::new(writer),
            queries: QueryBuilder::new(schema.clone()),
            schema,
        })
    }

    /// Insert or replace the full document stored under `doc_id`.
    pub fn upsert(&self, doc_id: &str, doc: &TopicDocument) -> Result<()> {
        self.replace(doc_id, self.to_tantivy_doc(doc_id, doc))
    }

    /// Build and upsert the document for a topic entity.
    ///
    /// An absent topic is a no-op, mirroring the builder's nullability
    /// propagation.
    pub fn upsert_topic(
        &self,
        topic: Option<&Topic>,
        users: &dyn UserLookup,
        tags: &dyn TagLookup,
    ) -> Result<()> {
        match build_document(topic, users, tags) {
            Some(doc) => self.upsert(&doc_id(TOPIC_ENTITY, doc.id), &doc),
            None => Ok(()),
        }
    }

    /// Incremental upsert writing only the core fields.
    ///
    /// Normalizes `raw_content` and stores `id`, `user_id`, `content`,
    /// `create_time`, and `title`, nothing else. The resulting document has
    /// a narrower field profile than one from the full builder (no nickname,
    /// tags, node id, recommend, or status); that asymmetry is intentional,
    /// it keeps low-cost updates from re-running user/tag lookups.
    pub fn index_data(
        &self,
        doc_id: &str,
        id: i64,
        user_id: i64,
        create_time: i64,
        raw_content: &str,
        title: &str,
    ) -> Result<()> {
        let s = &self.schema;
        let mut doc = TantivyDocument::new();
        doc.add_text(s.doc_id, doc_id);
        doc.add_i64(s.id, id);
        doc.add_i64(s.user_id, user_id);
        doc.add_text(s.content, normalize(raw_content));
        doc.add_i64(s.create_time, create_time);
        doc.add_text(s.title, title);

        self.replace(doc_id, doc)
    }

    /// Remove the document stored under `doc_id`.
    ///
    /// Idempotent: deleting an id that was never indexed succeeds. The
    /// removal is total; there is no tombstone at this layer.
    pub fn delete_data(&self, doc_id: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writer.delete_term(self.doc_id_term(doc_id));
        writer.commit().map_err(|err| {
            log::error!("failed to delete '{doc_id}' from index: {err}");
            Error::delete_failed(doc_id, err)
        })?;
        drop(writer);

        self.reader.reload().map_err(|err| {
            log::error!("failed to reload reader after delete of '{doc_id}': {err}");
            Error::delete_failed(doc_id, err)
        })
    }

    /// Number of searchable documents.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Get a reference to the underlying Tantivy index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Get the schema.
    pub fn schema(&self) -> &TopicSchema {
        &self.schema
    }

    /// Delete-then-insert under one writer lock, then commit and refresh the
    /// reader.
    fn replace(&self, doc_id: &str, doc: TantivyDocument) -> Result<()> {
        let mut writer = self.writer.lock();
        writer.delete_term(self.doc_id_term(doc_id));

        if let Err(err) = writer.add_document(doc) {
            log::error!("failed to index '{doc_id}': {err}");
            // Discard the staged delete so the old version stays visible.
            if let Err(rollback_err) = writer.rollback() {
                log::error!("rollback after failed insert of '{doc_id}': {rollback_err}");
            }
            return Err(Error::insert_failed(doc_id, err));
        }

        writer.commit().map_err(|err| {
            log::error!("failed to commit '{doc_id}': {err}");
            Error::insert_failed(doc_id, err)
        })?;
        drop(writer);

        self.reader.reload().map_err(|err| {
            log::error!("failed to reload reader after indexing '{doc_id}': {err}");
            Error::insert_failed(doc_id, err)
        })
    }

    fn doc_id_term(&self, doc_id: &str) -> Term {
        Term::from_field_text(self.schema.doc_id, doc_id)
    }

    /// Convert a full `TopicDocument` to the engine representation.
    fn to_tantivy_doc(&self, doc_id: &str, doc: &TopicDocument) -> TantivyDocument {
        let s = &self.schema;

        let mut tantivy_doc = TantivyDocument::new();
        tantivy_doc.add_text(s.doc_id, doc_id);
        tantivy_doc.add_i64(s.id, doc.id);
        tantivy_doc.add_i64(s.node_id, doc.node_id);
        tantivy_doc.add_i64(s.user_id, doc.user_id);
        tantivy_doc.add_text(s.nickname, &doc.nickname);
        tantivy_doc.add_text(s.title, &doc.title);
        tantivy_doc.add_text(s.content, &doc.content);
        for tag in &doc.tags {
            tantivy_doc.add_text(s.tags, tag);
        }
        tantivy_doc.add_bool(s.recommend, doc.recommend);
        tantivy_doc.add_i64(s.status, doc.status);
        tantivy_doc.add_i64(s.create_time, doc.create_time);

        tantivy_doc
    }
}

impl std::fmt::Debug for TopicStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicStore")
            .field("index", &"<tantivy::Index>")
            .field("num_docs", &self.num_docs())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
