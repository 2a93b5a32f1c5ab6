//! Query engine: filters records by substring match and ranks by score.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sift_core::Record;
use tracing::debug;

/// Explanation returned when the query is blank.
pub const EMPTY_QUERY_EXPLANATION: &str =
    "Enter a search term to filter records by name or category.";

/// The single tip returned alongside [`EMPTY_QUERY_EXPLANATION`].
pub const MATCHING_RULE_TIP: &str =
    "Matching is a case-insensitive substring check against each record's name and category.";

const SORT_RULE_TIP: &str =
    "Sort: score from highest to lowest; records with equal scores keep their original order.";

const BACKEND_TIP: &str =
    "Next step: connect a real search backend to query live data instead of the built-in records.";

/// Outcome of a single query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Matching records, best score first.
    pub items: Vec<Record>,
    pub explanation: String,
    pub tips: Vec<String>,
}

/// Trim surrounding whitespace and lowercase.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Searches a borrowed, read-only record collection.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    records: &'a [Record],
}

impl<'a> QueryEngine<'a> {
    #[must_use]
    pub fn new(records: &'a [Record]) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &'a [Record] {
        self.records
    }

    /// Every record, ordered the way [`QueryEngine::search`] orders matches.
    #[must_use]
    pub fn ranked(&self) -> Vec<Record> {
        let mut items = self.records.to_vec();
        items.sort_by(|a, b| by_score_desc(a.score, b.score));
        items
    }

    /// Run a query against the collection.
    ///
    /// A blank query short-circuits to an instructional result with no items.
    /// Otherwise every record whose lowercased name or category contains the
    /// normalized query is kept, then ordered by score descending. The sort
    /// is stable, so equal scores keep collection order.
    #[must_use]
    pub fn search(&self, query: &str) -> QueryResult {
        let needle = normalize_query(query);
        if needle.is_empty() {
            return QueryResult {
                items: Vec::new(),
                explanation: EMPTY_QUERY_EXPLANATION.to_string(),
                tips: vec![MATCHING_RULE_TIP.to_string()],
            };
        }

        let mut items: Vec<Record> = self
            .records
            .iter()
            .filter(|r| matches(r, &needle))
            .cloned()
            .collect();
        items.sort_by(|a, b| by_score_desc(a.score, b.score));

        debug!(query, matched = items.len(), total = self.records.len(), "search evaluated");

        QueryResult {
            explanation: explanation(items.len(), query),
            tips: vec![
                format!("Filter: name or category contains \"{query}\" (case-insensitive)."),
                SORT_RULE_TIP.to_string(),
                BACKEND_TIP.to_string(),
            ],
            items,
        }
    }
}

fn matches(record: &Record, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle) || record.category.to_lowercase().contains(needle)
}

/// Descending by score. NaN scores rank after every number.
fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

fn explanation(count: usize, query: &str) -> String {
    let noun = if count == 1 { "result" } else { "results" };
    format!(
        "Found {count} {noun} for \"{query}\". Records are kept when their name or category \
         contains the query (case-insensitive) and are sorted by score from highest to lowest."
    )
}
