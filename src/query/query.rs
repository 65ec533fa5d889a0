//! The query type.

use serde::{Deserialize, Serialize};

/// One similarity search request.
///
/// A query is constructed by a policy's query build step and is immutable
/// from then on: it is read-only during matching and safely shared across
/// parallel lanes. Matching a query in a batch never observes or mutates
/// any other query's state.
///
/// The distance between a query and a record is the number of the query's
/// probed dimension values the record does not contain; a record qualifies
/// as a candidate when that distance is at most `radius`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Ordered dimension values to probe.
    dims: Vec<u32>,

    /// Maximum allowed distance for a candidate.
    radius: u32,

    /// Maximum number of ranked results returned.
    top_k: usize,

    /// Pruning hint in `[0, 1]`.
    selectivity: f32,

    /// Dimensionality of the table this query was built against.
    table_dims: u32,
}

impl Query {
    /// Assemble a query from already-validated parts. Only the builder
    /// constructs queries.
    pub(crate) fn new(
        dims: Vec<u32>,
        radius: u32,
        top_k: usize,
        selectivity: f32,
        table_dims: u32,
    ) -> Self {
        Query {
            dims,
            radius,
            top_k,
            selectivity,
            table_dims,
        }
    }

    /// The ordered dimension values this query probes.
    pub fn dims(&self) -> &[u32] {
        &self.dims
    }

    /// Maximum allowed distance for a candidate.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Maximum number of ranked results returned.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Pruning hint in `[0, 1]`; `0.0` disables pruning.
    pub fn selectivity(&self) -> f32 {
        self.selectivity
    }

    /// Dimensionality of the table this query was built against, used to
    /// reject matching against a differently-shaped table.
    pub fn table_dims(&self) -> u32 {
        self.table_dims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_accessors() {
        let query = Query::new(vec![1, 3], 1, 2, 0.0, 3);
        assert_eq!(query.dims(), &[1, 3]);
        assert_eq!(query.radius(), 1);
        assert_eq!(query.top_k(), 2);
        assert_eq!(query.selectivity(), 0.0);
        assert_eq!(query.table_dims(), 3);
    }
}
