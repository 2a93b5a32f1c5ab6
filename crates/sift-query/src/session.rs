//! Search session that memoizes the last submitted query.

use tracing::trace;

use crate::engine::{QueryEngine, QueryResult};

/// Wraps a [`QueryEngine`] and caches the result of the most recent query.
///
/// The cache key is the query exactly as submitted, so `"a"` and `" a"` are
/// separate entries even though they normalize the same way: the
/// explanation echoes the submitted text.
#[derive(Debug)]
pub struct SearchSession<'a> {
    engine: QueryEngine<'a>,
    last: Option<(String, QueryResult)>,
    evaluations: usize,
}

impl<'a> SearchSession<'a> {
    #[must_use]
    pub fn new(engine: QueryEngine<'a>) -> Self {
        Self {
            engine,
            last: None,
            evaluations: 0,
        }
    }

    /// Submit a query, reusing the previous result if the text is unchanged.
    pub fn submit(&mut self, query: &str) -> &QueryResult {
        if matches!(&self.last, Some((q, _)) if q == query) {
            trace!(query, "reusing memoized result");
        } else {
            self.last = None;
            self.evaluations += 1;
        }
        let engine = self.engine;
        let (_, result) = self
            .last
            .get_or_insert_with(|| (query.to_string(), engine.search(query)));
        result
    }

    /// The most recent result, if any query has been submitted.
    #[must_use]
    pub fn current(&self) -> Option<&QueryResult> {
        self.last.as_ref().map(|(_, r)| r)
    }

    /// The most recent query text, if any.
    #[must_use]
    pub fn current_query(&self) -> Option<&str> {
        self.last.as_ref().map(|(q, _)| q.as_str())
    }

    /// How many submissions actually ran the engine.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    #[must_use]
    pub fn engine(&self) -> QueryEngine<'a> {
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::Record;

    fn records() -> Vec<Record> {
        vec![
            Record::new(1, "North", "Region", 3.0),
            Record::new(2, "South", "Region", 5.0),
        ]
    }

    #[test]
    fn starts_empty() {
        let records = records();
        let session = SearchSession::new(QueryEngine::new(&records));
        assert!(session.current().is_none());
        assert!(session.current_query().is_none());
        assert_eq!(session.evaluations(), 0);
    }

    #[test]
    fn repeated_query_reuses_cached_bundle() {
        let records = records();
        let mut session = SearchSession::new(QueryEngine::new(&records));
        let first = session.submit("region").clone();
        let second = session.submit("region").clone();
        assert_eq!(first, second);
        assert_eq!(session.evaluations(), 1, "second submit must not re-run search");
        assert_eq!(session.current_query(), Some("region"));

        session.submit("north");
        assert_eq!(session.evaluations(), 2);
        session.submit("region");
        assert_eq!(session.evaluations(), 3, "only the last query is memoized");
    }

    #[test]
    fn new_query_replaces_cached_result() {
        let records = records();
        let mut session = SearchSession::new(QueryEngine::new(&records));
        assert_eq!(session.submit("north").items.len(), 1);
        assert_eq!(session.submit("region").items.len(), 2);
        assert_eq!(session.current().map(|r| r.items.len()), Some(2));
    }

    #[test]
    fn whitespace_variants_are_distinct_submissions() {
        let records = records();
        let mut session = SearchSession::new(QueryEngine::new(&records));
        session.submit("south");
        let padded = session.submit(" south").clone();
        assert!(padded.explanation.contains("\" south\""));
    }
}
