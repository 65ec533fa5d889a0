//! The inverted table data structure.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// An immutable inverted index over a record corpus.
///
/// The table maps each dimension value occurring in the corpus to its
/// posting list: the record identifiers containing that value, in ascending
/// order. Once built the table is never mutated; it is shared read-only
/// (typically behind an `Arc`) by any number of concurrent match calls.
#[derive(Debug, Clone)]
pub struct InvertedTable {
    /// Dimension value -> ascending record ids containing it.
    postings: AHashMap<u32, Vec<u32>>,

    /// Number of records the table was built from.
    record_count: usize,

    /// Declared dimensionality of the source corpus.
    dims: u32,
}

impl InvertedTable {
    /// Assemble a table from already-validated parts.
    ///
    /// Only the builder constructs tables; posting lists must already be in
    /// ascending record-id order.
    pub(crate) fn new(postings: AHashMap<u32, Vec<u32>>, record_count: usize, dims: u32) -> Self {
        InvertedTable {
            postings,
            record_count,
            dims,
        }
    }

    /// Posting list for a dimension value, if any record contains it.
    pub fn posting_list(&self, value: u32) -> Option<&[u32]> {
        self.postings.get(&value).map(|ids| ids.as_slice())
    }

    /// Number of records in the indexed corpus.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Declared dimensionality of the indexed corpus.
    pub fn dims(&self) -> u32 {
        self.dims
    }

    /// Number of distinct dimension values with a posting list.
    pub fn unique_values(&self) -> usize {
        self.postings.len()
    }

    /// Summary statistics for this table.
    pub fn stats(&self) -> TableStats {
        TableStats {
            record_count: self.record_count as u64,
            dims: self.dims,
            unique_values: self.postings.len() as u64,
            total_postings: self.postings.values().map(|ids| ids.len() as u64).sum(),
        }
    }
}

/// Statistics about an inverted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    /// Number of records indexed.
    pub record_count: u64,

    /// Declared dimensionality.
    pub dims: u32,

    /// Number of distinct dimension values indexed.
    pub unique_values: u64,

    /// Total posting entries across all lists.
    pub total_postings: u64,
}
