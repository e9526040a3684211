//! Composite document identifiers.
//!
//! Every indexed document is keyed by a string of the form
//! `"<entityType>-<numericId>"` (e.g. `"topic-4821"`). The entity-type prefix
//! lets a single index serve multiple content kinds while keeping them
//! distinguishable at query time; the prefix is structural metadata carried in
//! the id, not a stored field.

/// Entity-type prefix for forum topics.
pub const TOPIC_ENTITY: &str = "topic";

/// Compose a document id from an entity type and a numeric id.
///
/// # Examples
///
/// ```
/// use agora_core::util::ids::{doc_id, TOPIC_ENTITY};
///
/// assert_eq!(doc_id(TOPIC_ENTITY, 4821), "topic-4821");
/// ```
pub fn doc_id(entity_type: &str, id: i64) -> String {
    format!("{entity_type}-{id}")
}

/// Extract the entity-type discriminator from a document id.
///
/// Returns the segment before the first `-`, or the whole string when no
/// separator is present.
///
/// # Examples
///
/// ```
/// use agora_core::util::ids::entity_type;
///
/// assert_eq!(entity_type("topic-4821"), "topic");
/// assert_eq!(entity_type("orphan"), "orphan");
/// ```
pub fn entity_type(doc_id: &str) -> &str {
    match doc_id.split_once('-') {
        Some((entity, _)) => entity,
        None => doc_id,
    }
}

/// Extract the numeric id from a document id.
///
/// Returns `None` when the id has no separator or the tail is not numeric.
///
/// # Examples
///
/// ```
/// use agora_core::util::ids::numeric_id;
///
/// assert_eq!(numeric_id("topic-4821"), Some(4821));
/// assert_eq!(numeric_id("topic-"), None);
/// assert_eq!(numeric_id("orphan"), None);
/// ```
pub fn numeric_id(doc_id: &str) -> Option<i64> {
    doc_id
        .split_once('-')
        .and_then(|(_, tail)| tail.parse().ok())
}
