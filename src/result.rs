//! Search result containers.

use serde::{Deserialize, Serialize};

/// One ranked hit: a record identifier and its distance from the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Identifier of the matched record (its position in the corpus).
    pub record_id: u32,

    /// Distance between the query and the record.
    pub distance: u32,
}

/// Ranked hits for a single query.
///
/// Entries are ordered by ascending distance, ties broken by ascending
/// record id; the sequence never exceeds the query's top-k and every entry
/// lies within the query's radius.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHits {
    /// The ranked entries, best first.
    pub entries: Vec<ResultEntry>,

    /// Number of candidates within the radius before top-k truncation.
    pub candidates: u64,
}

impl QueryHits {
    /// Hits for a query with no qualifying candidates.
    pub fn empty() -> Self {
        QueryHits {
            entries: Vec::new(),
            candidates: 0,
        }
    }
}

/// Ranked hits for one query batch matched against one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchHits {
    /// Position of the table in the multi-table call (0 for single-table).
    pub table_index: usize,

    /// Per-query hits, in input batch order.
    pub queries: Vec<QueryHits>,
}

/// The output of a match invocation.
///
/// A single-table match produces one batch; a multi-table match produces
/// one batch per (table, query-batch) pair, in input order. Results are
/// produced fresh by each match call, owned by the caller, and never
/// mutated after return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// One entry per (table, query-batch) pair.
    pub batches: Vec<BatchHits>,
}

impl SearchResult {
    /// Wrap the hits of a single-table match.
    pub fn single(queries: Vec<QueryHits>) -> Self {
        SearchResult {
            batches: vec![BatchHits {
                table_index: 0,
                queries,
            }],
        }
    }

    /// Hits for one (table, query) pair, if present.
    pub fn hits(&self, table_index: usize, query_index: usize) -> Option<&QueryHits> {
        self.batches
            .get(table_index)
            .and_then(|batch| batch.queries.get(query_index))
    }

    /// Total number of queries answered across all batches.
    pub fn query_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.queries.len()).sum()
    }
}
