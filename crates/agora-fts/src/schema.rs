//! Tantivy schema definition for topic search.
//!
//! This module defines the schema used to index forum topics. Fields fall
//! into three groups:
//!
//! ## Identity
//! - `doc_id`: composite document key `"<entityType>-<numericId>"`
//!   (STRING | STORED), the delete/upsert term
//! - `id`, `node_id`, `user_id`: numeric identities (INDEXED | STORED | FAST)
//!
//! ## Full-Text (searchable)
//! - `title`: topic title (TEXT | STORED)
//! - `content`: normalized, entity-escaped body (TEXT | STORED, positions
//!   recorded so highlighters can locate matches)
//! - `nickname`: denormalized author display name (TEXT | STORED)
//! - `tags`: multi-valued tag names (TEXT | STORED); the tag mapping is
//!   provisional, a plain text field until tag-scoped search exists
//!
//! ## Filter/Sort
//! - `recommend`: editorial flag (bool, INDEXED | STORED | FAST)
//! - `status`: lifecycle/moderation state (INDEXED | STORED | FAST)
//! - `create_time`: epoch **milliseconds** (INDEXED | STORED | FAST), the
//!   sort key and the target of time-range filters; write path and query-side
//!   range math share this unit
//!
//! # Tokenizer
//!
//! Full-text fields use a fixed English stemming analyzer (`en_stem`):
//! SimpleTokenizer → LowerCaser → Stemmer(English).

use tantivy::Index;
use tantivy::schema::{
    FAST, Field, INDEXED, Schema, SchemaBuilder, STORED, STRING, TextFieldIndexing, TextOptions,
};
use tantivy::tokenizer::{Language, LowerCaser, SimpleTokenizer, Stemmer, TextAnalyzer};

/// Schema version for index rebuilds.
///
/// Increment when schema fields change; an index created under another
/// version must be rebuilt rather than opened.
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the registered stemming analyzer.
pub const TOKENIZER_NAME: &str = "en_stem";

/// Topic search schema holding typed field references.
///
/// Provides typed access to schema fields, avoiding string lookups during
/// indexing and querying.
#[derive(Clone)]
pub struct TopicSchema {
    schema: Schema,

    // Identity fields
    /// Composite document key, e.g. `"topic-4821"`.
    pub doc_id: Field,
    /// Topic identity.
    pub id: Field,
    /// Containing board/category.
    pub node_id: Field,
    /// Author identity.
    pub user_id: Field,

    // Full-text fields
    /// Denormalized author display name at index time.
    pub nickname: Field,
    /// Topic title.
    pub title: Field,
    /// Normalized plain-text body.
    pub content: Field,
    /// Topic tags by name, multi-valued.
    pub tags: Field,

    // Filter/sort fields
    /// Editorial flag.
    pub recommend: Field,
    /// Lifecycle/moderation state.
    pub status: Field,
    /// Creation time in epoch milliseconds; the sort key.
    pub create_time: Field,
}

impl TopicSchema {
    /// Build the topic search schema.
    pub fn build() -> Self {
        let mut builder = SchemaBuilder::new();

        // Text field options with positions (for phrase queries/highlighting)
        let text_options = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(TOKENIZER_NAME)
                    .set_index_option(tantivy::schema::IndexRecordOption::WithFreqsAndPositions),
            )
            .set_stored();

        // Identity fields
        let doc_id = builder.add_text_field("doc_id", STRING | STORED);
        let id = builder.add_i64_field("id", INDEXED | STORED | FAST);
        let node_id = builder.add_i64_field("node_id", INDEXED | STORED | FAST);
        let user_id = builder.add_i64_field("user_id", INDEXED | STORED | FAST);

        // Full-text fields (searchable with stemming)
        let nickname = builder.add_text_field("nickname", text_options.clone());
        let title = builder.add_text_field("title", text_options.clone());
        let content = builder.add_text_field("content", text_options.clone());
        let tags = builder.add_text_field("tags", text_options);

        // Filter/sort fields
        let recommend = builder.add_bool_field("recommend", INDEXED | STORED | FAST);
        let status = builder.add_i64_field("status", INDEXED | STORED | FAST);
        let create_time = builder.add_i64_field("create_time", INDEXED | STORED | FAST);

        let schema = builder.build();

        Self {
            schema,
            doc_id,
            id,
            node_id,
            user_id,
            nickname,
            title,
            content,
            tags,
            recommend,
            status,
            create_time,
        }
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Build the fixed default analyzer.
    ///
    /// The query side uses the same analyzer to turn free text into terms,
    /// so indexed and queried tokens always agree.
    pub fn analyzer() -> TextAnalyzer {
        TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(Stemmer::new(Language::English))
            .build()
    }

    /// Register the stemming analyzer with a Tantivy index.
    ///
    /// Must be called after creating or opening an index, before any write
    /// or query touches a full-text field.
    pub fn register_tokenizers(index: &Index) {
        index.tokenizers().register(TOKENIZER_NAME, Self::analyzer());
    }

    /// Get all fields.
    pub fn all_fields(&self) -> Vec<Field> {
        vec![
            self.doc_id,
            self.id,
            self.node_id,
            self.user_id,
            self.nickname,
            self.title,
            self.content,
            self.tags,
            self.recommend,
            self.status,
            self.create_time,
        ]
    }
}

impl std::fmt::Debug for TopicSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicSchema")
            .field("field_count", &11)
            .field("schema_version", &SCHEMA_VERSION)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_build() {
        let schema = TopicSchema::build();
        assert_eq!(schema.all_fields().len(), 11);
    }

    #[test]
    fn test_schema_field_names() {
        let schema = TopicSchema::build();
        let tantivy_schema = schema.schema();

        assert!(tantivy_schema.get_field("doc_id").is_ok());
        assert!(tantivy_schema.get_field("id").is_ok());
        assert!(tantivy_schema.get_field("node_id").is_ok());
        assert!(tantivy_schema.get_field("user_id").is_ok());
        assert!(tantivy_schema.get_field("nickname").is_ok());
        assert!(tantivy_schema.get_field("title").is_ok());
        assert!(tantivy_schema.get_field("content").is_ok());
        assert!(tantivy_schema.get_field("tags").is_ok());
        assert!(tantivy_schema.get_field("recommend").is_ok());
        assert!(tantivy_schema.get_field("status").is_ok());
        assert!(tantivy_schema.get_field("create_time").is_ok());
    }

    #[test]
    fn test_field_types() {
        let schema = TopicSchema::build();
        let tantivy_schema = schema.schema();

        // doc_id is a raw STRING term (not tokenized) so delete-by-term
        // matches the exact composite key
        let doc_id_entry = tantivy_schema.get_field_entry(schema.doc_id);
        assert!(doc_id_entry.is_indexed());
        assert!(doc_id_entry.is_stored());

        // create_time is a fast field (sorting and range filtering)
        let create_time_entry = tantivy_schema.get_field_entry(schema.create_time);
        assert!(create_time_entry.is_fast());
        assert!(create_time_entry.is_stored());

        let title_entry = tantivy_schema.get_field_entry(schema.title);
        assert!(title_entry.is_indexed());
        assert!(title_entry.is_stored());
    }

    #[test]
    fn test_tokenizer_registration() {
        let schema = TopicSchema::build();
        let index = Index::create_in_ram(schema.schema().clone());

        TopicSchema::register_tokenizers(&index);

        assert!(index.tokenizers().get(TOKENIZER_NAME).is_some());
    }

    #[test]
    fn test_schema_debug() {
        let schema = TopicSchema::build();
        let debug = format!("{schema:?}");
        assert!(debug.contains("TopicSchema"));
        assert!(debug.contains("field_count"));
    }
}
