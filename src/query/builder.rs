//! Construction and validation of queries against a table.

use crate::data::QueryData;
use crate::error::{Result, SimdexError};
use crate::query::query::Query;
use crate::table::InvertedTable;

/// Builds immutable [`Query`] objects from raw query data, validated
/// against the table they will be matched with.
#[derive(Debug, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
    /// Create a new query builder.
    pub fn new() -> Self {
        QueryBuilder
    }

    /// Build one query per input record.
    ///
    /// The table is used only to validate dimensional compatibility: a
    /// query carrying more dimension values than the table's declared
    /// dimensionality fails with `DimensionMismatch`. Out-of-range batch
    /// parameters fail with `InvalidParameter`. The radius is unsigned, so
    /// a negative radius is unrepresentable at this boundary.
    pub fn build(&self, table: &InvertedTable, query_data: &QueryData) -> Result<Vec<Query>> {
        let params = query_data.params;

        if params.top_k < 1 {
            return Err(SimdexError::invalid_parameter(
                "top-k must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&params.selectivity) {
            return Err(SimdexError::invalid_parameter(format!(
                "selectivity {} is outside [0, 1]",
                params.selectivity
            )));
        }

        let table_dims = table.dims();
        let mut queries = Vec::with_capacity(query_data.records.len());

        for (query_id, record) in query_data.records.iter().enumerate() {
            if record.len() > table_dims as usize {
                return Err(SimdexError::dimension_mismatch(format!(
                    "query {} probes {} dimension values, but the table indexes only {}",
                    query_id,
                    record.len(),
                    table_dims
                )));
            }

            queries.push(Query::new(
                record.clone(),
                params.radius,
                params.top_k,
                params.selectivity,
                table_dims,
            ));
        }

        Ok(queries)
    }
}
