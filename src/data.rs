//! Raw input structures handed to the engine by external collaborators.
//!
//! The core never performs I/O: corpus loaders and query sources (see the
//! `loader` module for the file-backed ones) produce these plain in-memory
//! structures, and everything past this boundary operates on already-parsed
//! data.

use serde::{Deserialize, Serialize};

/// Raw record corpus used to build an inverted table.
///
/// Each record is an ordered sequence of non-negative integer dimension
/// values. A record's identifier is its position in `records` (zero-based),
/// which is also the identifier reported in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    /// The records to index, in corpus order.
    pub records: Vec<Vec<u32>>,

    /// Declared dimensionality bound: no record may carry more values.
    pub dims: u32,
}

impl TableData {
    /// Create table data from records, declaring the widest record as the
    /// dimensionality bound.
    pub fn new(records: Vec<Vec<u32>>) -> Self {
        let dims = records.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        TableData { records, dims }
    }

    /// Create table data with an explicit dimensionality bound.
    pub fn with_dims(records: Vec<Vec<u32>>, dims: u32) -> Self {
        TableData { records, dims }
    }

    /// Number of records in the corpus.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Scalar parameters shared by every query in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Maximum allowed distance between a query and a candidate record.
    pub radius: u32,

    /// Maximum number of ranked results returned per query.
    pub top_k: usize,

    /// Pruning hint in `[0, 1]`; `0.0` disables candidate pruning.
    pub selectivity: f32,
}

impl QueryParams {
    /// Create query parameters with the given radius and top-k, and
    /// pruning disabled.
    pub fn new(radius: u32, top_k: usize) -> Self {
        QueryParams {
            radius,
            top_k,
            selectivity: 0.0,
        }
    }

    /// Set the selectivity pruning hint.
    pub fn with_selectivity(mut self, selectivity: f32) -> Self {
        self.selectivity = selectivity;
        self
    }
}

/// Raw query batch handed to a policy's query build step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryData {
    /// One entry per query: the ordered dimension values to probe.
    pub records: Vec<Vec<u32>>,

    /// Parameters shared across the batch.
    pub params: QueryParams,
}

impl QueryData {
    /// Create a query batch from query records and shared parameters.
    pub fn new(records: Vec<Vec<u32>>, params: QueryParams) -> Self {
        QueryData { records, params }
    }

    /// Number of queries in the batch.
    pub fn query_count(&self) -> usize {
        self.records.len()
    }
}
