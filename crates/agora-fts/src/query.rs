//! Search query construction.
//!
//! Translates a [`SearchRequest`] (free text, recency window, pagination)
//! into the engine's composite boolean query. All clauses are conjunctive:
//!
//! - non-empty query text adds a match clause against `title`, tokenized
//!   through the index's fixed analyzer (terms OR-ed among themselves)
//! - a non-`All` time window adds an inclusive `create_time` range clause
//!   of `[now - span, now]`, in epoch milliseconds
//! - with no clauses at all, the query explicitly matches every document
//!   (an empty `BooleanQuery` would match nothing)
//!
//! Sorting and pagination are applied by the collector in `search`, not
//! encoded in the query itself.

use std::ops::Bound;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tantivy::Term;
use tantivy::query::{AllQuery, BooleanQuery, Occur, Query, RangeQuery, TermQuery};
use tantivy::schema::IndexRecordOption;
use tantivy::tokenizer::TextAnalyzer;

use crate::schema::TopicSchema;

const DAY_MILLIS: i64 = 24 * 3600 * 1000;

/// Predefined recency windows for filtering by creation time.
///
/// Wire codes: 0 = all, 1 = last 24h, 2 = last 7d, 3 = last 30d,
/// 4 = last 365d. Unknown codes fall back to [`TimeWindow::All`] (no filter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    #[default]
    All,
    PastDay,
    PastWeek,
    PastMonth,
    PastYear,
}

impl TimeWindow {
    /// Decode a wire/time-range code. Unknown codes mean no filter.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::PastDay,
            2 => Self::PastWeek,
            3 => Self::PastMonth,
            4 => Self::PastYear,
            _ => Self::All,
        }
    }

    /// Window span in milliseconds; `None` for [`TimeWindow::All`].
    pub fn span_millis(self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::PastDay => Some(DAY_MILLIS),
            Self::PastWeek => Some(7 * DAY_MILLIS),
            Self::PastMonth => Some(30 * DAY_MILLIS),
            Self::PastYear => Some(365 * DAY_MILLIS),
        }
    }
}

/// A search request as received from the interface layer.
///
/// `page` is 1-based; `limit` is the page size. Zero values are normalized
/// by `Paging` at execution time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free text matched against topic titles. Empty means no text clause.
    pub query: String,
    /// Recency filter on creation time.
    #[serde(default)]
    pub time_window: TimeWindow,
    /// 1-based page number.
    pub page: usize,
    /// Page size.
    pub limit: usize,
}

impl SearchRequest {
    /// Convenience constructor from the interface-level primitives.
    pub fn new(query: impl Into<String>, time_range_code: i32, page: usize, limit: usize) -> Self {
        Self {
            query: query.into(),
            time_window: TimeWindow::from_code(time_range_code),
            page,
            limit,
        }
    }
}

/// Builds composite boolean queries from search requests.
pub struct QueryBuilder {
    schema: TopicSchema,
    analyzer: TextAnalyzer,
}

impl QueryBuilder {
    /// Create a query builder for a schema.
    pub fn new(schema: TopicSchema) -> Self {
        Self {
            schema,
            analyzer: TopicSchema::analyzer(),
        }
    }

    /// Build the query for a request, reading the clock for the range window.
    pub fn build(&self, request: &SearchRequest) -> Box<dyn Query> {
        self.build_at(request, Utc::now().timestamp_millis())
    }

    /// Build the query with an explicit "now" in epoch milliseconds.
    ///
    /// Split out so range-window math is deterministic under test.
    pub fn build_at(&self, request: &SearchRequest, now_millis: i64) -> Box<dyn Query> {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();

        if let Some(title_match) = self.title_match(&request.query) {
            clauses.push((Occur::Must, title_match));
        }

        if let Some(span) = request.time_window.span_millis() {
            let range = RangeQuery::new(
                Bound::Included(Term::from_field_i64(
                    self.schema.create_time,
                    now_millis - span,
                )),
                Bound::Included(Term::from_field_i64(self.schema.create_time, now_millis)),
            );
            clauses.push((Occur::Must, Box::new(range)));
        }

        if clauses.is_empty() {
            // No text and no window: match every document.
            Box::new(AllQuery)
        } else {
            Box::new(BooleanQuery::new(clauses))
        }
    }

    /// Tokenize query text through the index analyzer into a title match
    /// clause (terms OR-ed). Returns `None` when no terms survive analysis.
    fn title_match(&self, text: &str) -> Option<Box<dyn Query>> {
        if text.is_empty() {
            return None;
        }

        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(text);
        let mut terms = Vec::new();
        while stream.advance() {
            terms.push(Term::from_field_text(
                self.schema.title,
                &stream.token().text,
            ));
        }

        match terms.len() {
            0 => None,
            1 => Some(Box::new(TermQuery::new(
                terms.remove(0),
                IndexRecordOption::WithFreqs,
            ))),
            _ => {
                let should: Vec<(Occur, Box<dyn Query>)> = terms
                    .into_iter()
                    .map(|term| {
                        let q: Box<dyn Query> =
                            Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs));
                        (Occur::Should, q)
                    })
                    .collect();
                Some(Box::new(BooleanQuery::new(should)))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_codes() {
        assert_eq!(TimeWindow::from_code(0), TimeWindow::All);
        assert_eq!(TimeWindow::from_code(1), TimeWindow::PastDay);
        assert_eq!(TimeWindow::from_code(2), TimeWindow::PastWeek);
        assert_eq!(TimeWindow::from_code(3), TimeWindow::PastMonth);
        assert_eq!(TimeWindow::from_code(4), TimeWindow::PastYear);
    }

    #[test]
    fn test_time_window_unknown_code_is_no_filter() {
        assert_eq!(TimeWindow::from_code(5), TimeWindow::All);
        assert_eq!(TimeWindow::from_code(-1), TimeWindow::All);
    }

    #[test]
    fn window_math_is_in_millis() {
        // The stored create_time unit and the window unit must agree:
        // both are epoch milliseconds.
        assert_eq!(TimeWindow::PastDay.span_millis(), Some(86_400_000));
        assert_eq!(TimeWindow::PastWeek.span_millis(), Some(7 * 86_400_000));
        assert_eq!(TimeWindow::PastMonth.span_millis(), Some(30 * 86_400_000));
        assert_eq!(TimeWindow::PastYear.span_millis(), Some(365 * 86_400_000));
        assert_eq!(TimeWindow::All.span_millis(), None);
    }

    #[test]
    fn test_empty_request_builds_match_all() {
        let builder = QueryBuilder::new(TopicSchema::build());
        let request = SearchRequest::new("", 0, 1, 10);
        let query = builder.build_at(&request, 1_700_000_000_000);
        // AllQuery formats as "AllQuery"; a BooleanQuery would not.
        assert!(format!("{query:?}").contains("AllQuery"));
    }

    #[test]
    fn test_text_only_request_builds_boolean() {
        let builder = QueryBuilder::new(TopicSchema::build());
        let request = SearchRequest::new("borrow checker", 0, 1, 10);
        let query = builder.build_at(&request, 1_700_000_000_000);
        let debug = format!("{query:?}");
        assert!(debug.contains("BooleanQuery"));
        assert!(!debug.contains("AllQuery"));
    }

    #[test]
    fn test_punctuation_only_text_is_match_all() {
        // The analyzer produces no tokens, so no clause is added.
        let builder = QueryBuilder::new(TopicSchema::build());
        let request = SearchRequest::new("!!! ---", 0, 1, 10);
        let query = builder.build_at(&request, 1_700_000_000_000);
        assert!(format!("{query:?}").contains("AllQuery"));
    }

    #[test]
    fn test_window_only_request_builds_range() {
        let builder = QueryBuilder::new(TopicSchema::build());
        let request = SearchRequest::new("", 2, 1, 10);
        let query = builder.build_at(&request, 1_700_000_000_000);
        let debug = format!("{query:?}");
        assert!(debug.contains("RangeQuery") || debug.contains("BooleanQuery"));
        assert!(!debug.contains("AllQuery"));
    }

    #[test]
    fn test_request_serde_round_trip() {
        let request = SearchRequest::new("rust", 2, 3, 10);
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"timeWindow\":\"past_week\""));

        let back: SearchRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.query, "rust");
        assert_eq!(back.time_window, TimeWindow::PastWeek);
        assert_eq!(back.page, 3);
    }
}
