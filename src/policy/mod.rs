//! Execution policies: pluggable strategies for partitioned matching.
//!
//! This module provides:
//! - The [`ExecutionPolicy`] trait every concrete strategy satisfies
//! - The [`PolicyConfig`] descriptor and [`make_policy`] factory, the only
//!   way to instantiate a concrete policy
//! - The [`SingleRangePolicy`], which bounds each query to a fixed scan
//!   window over the table's dimension space

pub mod config;
pub mod single_range;

pub use config::{PolicyConfig, PolicyKind, make_policy};
pub use single_range::SingleRangePolicy;

use std::sync::Arc;

use crate::data::{QueryData, TableData};
use crate::error::Result;
use crate::query::Query;
use crate::result::SearchResult;
use crate::table::InvertedTable;

/// A strategy governing how table construction and query matching are
/// partitioned for parallel execution.
///
/// A policy is bound to its strategy-specific parameters at construction
/// time and holds no per-call mutable state: once `validate` has succeeded,
/// one instance may serve any number of concurrent build/match cycles. All
/// build and match operations reject use with `PolicyMisconfigured` until
/// `validate` has succeeded at least once after construction or a
/// parameter change.
pub trait ExecutionPolicy: Send + Sync + std::fmt::Debug {
    /// Build an inverted table from raw corpus data.
    fn build_table(&self, table_data: &TableData) -> Result<Arc<InvertedTable>>;

    /// Build immutable queries from raw query data, validated against the
    /// table they will be matched with.
    fn build_queries(
        &self,
        table: &Arc<InvertedTable>,
        query_data: &QueryData,
    ) -> Result<Vec<Query>>;

    /// Match one query batch against one table, producing ranked top-k
    /// hits per query.
    fn match_queries(
        &self,
        table: &Arc<InvertedTable>,
        queries: &[Query],
    ) -> Result<SearchResult>;

    /// Match paired (table, query batch) inputs independently, keyed by
    /// (table index, query index) in the result.
    fn match_batches(
        &self,
        tables: &[Arc<InvertedTable>],
        batches: &[Vec<Query>],
    ) -> Result<SearchResult>;

    /// Check that the policy's fixed parameters are self-consistent.
    ///
    /// Idempotent and deterministic; does not alter the parameters it
    /// checks. A successful call unlocks the build and match operations.
    fn validate(&self) -> Result<()>;
}
