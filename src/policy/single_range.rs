//! The single-range execution policy.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::data::{QueryData, TableData};
use crate::error::{Result, SimdexError};
use crate::matching::{MatchConfig, MatchEngine, MatchMetrics};
use crate::policy::ExecutionPolicy;
use crate::query::{Query, QueryBuilder};
use crate::result::SearchResult;
use crate::table::{InvertedTable, TableBuilder};

/// Policy assigning every query a fixed scan window over the table's
/// dimension space.
///
/// Each query probes at most `query_range` of its dimension values, which
/// bounds the posting lists touched per query and trades recall for
/// throughput: values past the window are simply never looked up, so
/// radius and selectivity are evaluated against the probed count alone.
///
/// Instances are created through
/// [`make_policy`](crate::policy::make_policy); the constructor is not
/// public.
#[derive(Debug)]
pub struct SingleRangePolicy {
    /// Scan window width, fixed at construction (or via
    /// [`set_query_range`](SingleRangePolicy::set_query_range)).
    query_range: u32,

    /// The matching engine this policy dispatches onto.
    engine: MatchEngine,

    /// Whether the last `validate` call succeeded.
    validated: AtomicBool,
}

impl SingleRangePolicy {
    /// Assemble a policy. Only the factory constructs policies.
    pub(crate) fn new(query_range: u32, match_config: MatchConfig) -> Result<Self> {
        Ok(SingleRangePolicy {
            query_range,
            engine: MatchEngine::new(match_config)?,
            validated: AtomicBool::new(false),
        })
    }

    /// The configured scan window width.
    pub fn query_range(&self) -> u32 {
        self.query_range
    }

    /// Change the scan window width.
    ///
    /// A parameter change invalidates the policy: build and match reject
    /// use again until the next successful `validate`.
    pub fn set_query_range(&mut self, query_range: u32) {
        self.query_range = query_range;
        self.validated.store(false, Ordering::Release);
    }

    /// Metrics snapshot from the underlying match engine.
    pub fn metrics(&self) -> MatchMetrics {
        self.engine.metrics()
    }

    /// Reject use until `validate` has succeeded.
    fn check_validated(&self) -> Result<()> {
        if self.validated.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(SimdexError::policy_misconfigured(
                "policy must pass validate() before use",
            ))
        }
    }
}

impl ExecutionPolicy for SingleRangePolicy {
    fn build_table(&self, table_data: &TableData) -> Result<Arc<InvertedTable>> {
        self.check_validated()?;
        Ok(Arc::new(TableBuilder::new().build(table_data)?))
    }

    fn build_queries(
        &self,
        table: &Arc<InvertedTable>,
        query_data: &QueryData,
    ) -> Result<Vec<Query>> {
        self.check_validated()?;
        QueryBuilder::new().build(table, query_data)
    }

    fn match_queries(
        &self,
        table: &Arc<InvertedTable>,
        queries: &[Query],
    ) -> Result<SearchResult> {
        self.check_validated()?;
        self.engine
            .match_queries(table, queries, Some(self.query_range))
    }

    fn match_batches(
        &self,
        tables: &[Arc<InvertedTable>],
        batches: &[Vec<Query>],
    ) -> Result<SearchResult> {
        self.check_validated()?;
        self.engine
            .match_batches(tables, batches, Some(self.query_range))
    }

    fn validate(&self) -> Result<()> {
        if self.query_range == 0 {
            self.validated.store(false, Ordering::Release);
            return Err(SimdexError::policy_misconfigured(
                "query range must be greater than 0",
            ));
        }
        self.validated.store(true, Ordering::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::QueryParams;

    fn policy(query_range: u32) -> SingleRangePolicy {
        SingleRangePolicy::new(query_range, MatchConfig::with_threads(2)).unwrap()
    }

    fn sample_data() -> TableData {
        TableData::new(vec![vec![1, 2, 3], vec![2, 3], vec![1, 3], vec![4]])
    }

    #[test]
    fn test_unvalidated_policy_rejects_use() {
        let policy = policy(4);
        match policy.build_table(&sample_data()) {
            Err(SimdexError::PolicyMisconfigured(_)) => {}
            other => panic!("Expected PolicyMisconfigured, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_range_fails_validate_and_match() {
        let policy = policy(0);
        assert!(policy.validate().is_err());

        // The failed validate leaves the policy unusable.
        match policy.build_table(&sample_data()) {
            Err(SimdexError::PolicyMisconfigured(_)) => {}
            other => panic!("Expected PolicyMisconfigured, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_is_idempotent() {
        let policy = policy(4);
        policy.validate().unwrap();
        policy.validate().unwrap();
        assert_eq!(policy.query_range(), 4);
    }

    #[test]
    fn test_range_change_forces_revalidation() {
        let mut policy = policy(4);
        policy.validate().unwrap();
        policy.set_query_range(8);

        match policy.build_table(&sample_data()) {
            Err(SimdexError::PolicyMisconfigured(_)) => {}
            other => panic!("Expected PolicyMisconfigured, got {other:?}"),
        }

        policy.validate().unwrap();
        assert!(policy.build_table(&sample_data()).is_ok());
    }

    #[test]
    fn test_full_cycle() {
        let policy = policy(4);
        policy.validate().unwrap();

        let table = policy.build_table(&sample_data()).unwrap();
        let queries = policy
            .build_queries(
                &table,
                &QueryData::new(vec![vec![1, 3]], QueryParams::new(1, 2)),
            )
            .unwrap();
        let result = policy.match_queries(&table, &queries).unwrap();

        let ids: Vec<u32> = result
            .hits(0, 0)
            .unwrap()
            .entries
            .iter()
            .map(|e| e.record_id)
            .collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_narrow_range_limits_probing() {
        let policy = policy(1);
        policy.validate().unwrap();

        let table = policy.build_table(&sample_data()).unwrap();
        let queries = policy
            .build_queries(
                &table,
                &QueryData::new(vec![vec![3, 1]], QueryParams::new(0, 10)),
            )
            .unwrap();
        let result = policy.match_queries(&table, &queries).unwrap();

        // Only value 3 is probed; the single-value window means every
        // record containing 3 is a complete match.
        let ids: Vec<u32> = result
            .hits(0, 0)
            .unwrap()
            .entries
            .iter()
            .map(|e| e.record_id)
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
