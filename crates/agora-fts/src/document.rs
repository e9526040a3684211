//! Topic document representation and assembly.
//!
//! `TopicDocument` is the indexed/searchable shape of a forum topic. It is
//! constructed transiently on the write path (from a `Topic` entity plus
//! user/tag lookups) and reconstructed per hit on the read path, a narrower
//! shape, since search projects only a fixed subset of fields back.
//!
//! User and tag data are reached through the [`UserLookup`] and [`TagLookup`]
//! seams; the index keeps whatever those lookups returned at index time.
//! The snapshots go stale when the source data changes and stay stale until
//! the topic is explicitly reindexed.

use serde::{Deserialize, Serialize};

use agora_content::normalize;

/// A forum topic as read from the persistence layer.
///
/// This is the read-only data source the document builder consumes; the
/// search subsystem never writes topics back.
#[derive(Debug, Clone, Default)]
pub struct Topic {
    pub id: i64,
    pub node_id: i64,
    pub user_id: i64,
    pub title: String,
    /// Raw markdown body, not yet normalized.
    pub content: String,
    pub status: i64,
    pub recommend: bool,
    /// Creation time in epoch milliseconds.
    pub create_time: i64,
}

/// Author lookup seam (backed by a user cache in the embedding application).
pub trait UserLookup {
    /// Display name for a user id, `None` on lookup miss.
    fn nickname(&self, user_id: i64) -> Option<String>;
}

/// Tag-membership lookup seam (backed by the tag repository/cache).
pub trait TagLookup {
    /// Tag names for a topic, in lookup order (no sorting guarantee).
    fn tags_for_topic(&self, topic_id: i64) -> Vec<String>;
}

/// The indexed/searchable representation of a topic.
///
/// On the read path only `id`, `user_id`, `title`, `content`, `create_time`
/// and the decoded `entity_type` are populated; the remaining fields are not
/// part of the search projection and must be re-fetched by identity if
/// needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDocument {
    /// Entity-type discriminator decoded from the composite document id on
    /// the read path (`"topic"` for topics). Empty on the write path.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub entity_type: String,
    pub id: i64,
    pub node_id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub title: String,
    /// HTML-entity-escaped plain text, never raw markup.
    pub content: String,
    pub tags: Vec<String>,
    pub recommend: bool,
    pub status: i64,
    /// Epoch milliseconds.
    pub create_time: i64,
}

impl TopicDocument {
    /// Serialize to JSON for logging/diagnostics.
    ///
    /// Serialization failure is logged and yields an empty string rather
    /// than propagating.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            log::error!("failed to serialize topic document {}: {err}", self.id);
            String::new()
        })
    }
}

/// Assemble a full `TopicDocument` from a topic entity and its lookups.
///
/// Returns `None` when `topic` is `None`: absence propagates, no placeholder
/// document is fabricated. A nickname lookup miss leaves the field empty;
/// tags keep the lookup's order; `content` goes through the normalization
/// pipeline.
pub fn build_document(
    topic: Option<&Topic>,
    users: &dyn UserLookup,
    tags: &dyn TagLookup,
) -> Option<TopicDocument> {
    let topic = topic?;

    Some(TopicDocument {
        entity_type: String::new(),
        id: topic.id,
        node_id: topic.node_id,
        user_id: topic.user_id,
        nickname: users.nickname(topic.user_id).unwrap_or_default(),
        title: topic.title.clone(),
        content: normalize(&topic.content),
        tags: tags.tags_for_topic(topic.id),
        recommend: topic.recommend,
        status: topic.status,
        create_time: topic.create_time,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    pub(crate) struct FixedUsers(pub HashMap<i64, String>);

    impl UserLookup for FixedUsers {
        fn nickname(&self, user_id: i64) -> Option<String> {
            self.0.get(&user_id).cloned()
        }
    }

    pub(crate) struct FixedTags(pub HashMap<i64, Vec<String>>);

    impl TagLookup for FixedTags {
        fn tags_for_topic(&self, topic_id: i64) -> Vec<String> {
            self.0.get(&topic_id).cloned().unwrap_or_default()
        }
    }

    fn sample_topic() -> Topic {
        Topic {
            id: 4821,
            node_id: 3,
            user_id: 77,
            title: "Borrow checker woes".to_string(),
            content: "Some **markdown** content".to_string(),
            status: 0,
            recommend: true,
            create_time: 1_700_000_000_000,
        }
    }

    fn lookups() -> (FixedUsers, FixedTags) {
        let users = FixedUsers(HashMap::from([(77, "ferris".to_string())]));
        let tags = FixedTags(HashMap::from([(
            4821,
            vec!["rust".to_string(), "compiler".to_string()],
        )]));
        (users, tags)
    }

    #[test]
    fn test_build_document_populates_fields() {
        let (users, tags) = lookups();
        let topic = sample_topic();

        let doc = build_document(Some(&topic), &users, &tags).unwrap();
        assert_eq!(doc.id, 4821);
        assert_eq!(doc.node_id, 3);
        assert_eq!(doc.user_id, 77);
        assert_eq!(doc.nickname, "ferris");
        assert_eq!(doc.title, "Borrow checker woes");
        assert_eq!(doc.content, "Some markdown content");
        assert!(doc.recommend);
        assert_eq!(doc.create_time, 1_700_000_000_000);
    }

    #[test]
    fn test_build_document_absent_topic() {
        let (users, tags) = lookups();
        assert!(build_document(None, &users, &tags).is_none());
    }

    #[test]
    fn test_build_document_nickname_miss_is_empty() {
        let users = FixedUsers(HashMap::new());
        let (_, tags) = lookups();
        let topic = sample_topic();

        let doc = build_document(Some(&topic), &users, &tags).unwrap();
        assert_eq!(doc.nickname, "");
    }

    #[test]
    fn test_build_document_tags_keep_lookup_order() {
        let (users, tags) = lookups();
        let topic = sample_topic();

        let doc = build_document(Some(&topic), &users, &tags).unwrap();
        assert_eq!(doc.tags, vec!["rust", "compiler"]);
    }

    #[test]
    fn test_build_document_normalizes_content() {
        let (users, tags) = lookups();
        let mut topic = sample_topic();
        topic.content = "a <b>bold</b> claim & proof".to_string();

        let doc = build_document(Some(&topic), &users, &tags).unwrap();
        assert_eq!(doc.content, "a bold claim &amp; proof");
    }

    #[test]
    fn test_to_json_camel_case() {
        let (users, tags) = lookups();
        let doc = build_document(Some(&sample_topic()), &users, &tags).unwrap();

        let json = doc.to_json();
        assert!(json.contains("\"nodeId\":3"));
        assert!(json.contains("\"userId\":77"));
        assert!(json.contains("\"createTime\":1700000000000"));
        // Write-path documents have no entity type yet
        assert!(!json.contains("\"type\""));
    }
}
