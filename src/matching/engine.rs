//! The data-parallel matching engine.

use std::sync::Arc;

use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Result, SimdexError};
use crate::matching::accumulator::HitAccumulator;
use crate::matching::config::MatchConfig;
use crate::matching::metrics::{MatchMetrics, MatchMetricsCollector, Timer};
use crate::matching::selector::TopKSelector;
use crate::query::Query;
use crate::result::{BatchHits, QueryHits, SearchResult};
use crate::table::InvertedTable;

/// Executes query batches against inverted tables in parallel.
///
/// Matching runs in two sequential parallel stages. The accumulation stage
/// probes each query's scan window against the table's posting lists and
/// tallies per-record match counts; every tally for the batch is complete
/// before the selection stage starts, because selection needs the finished
/// counts. The selection stage then extracts each query's top-k entries
/// within the radius through a bounded-heap partial selection.
///
/// Queries are processed on disjoint lanes with no shared mutable state, so
/// results are independent of batch co-membership and of how the batch was
/// sub-partitioned across threads. The table is only ever read; one engine
/// may serve concurrent match calls.
pub struct MatchEngine {
    /// Engine configuration.
    config: MatchConfig,

    /// Thread pool for parallel execution.
    thread_pool: Arc<ThreadPool>,

    /// Metrics collector.
    metrics: Arc<MatchMetricsCollector>,
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("config", &self.config)
            .field("threads", &self.thread_pool.current_num_threads())
            .finish()
    }
}

impl MatchEngine {
    /// Create a new match engine.
    pub fn new(config: MatchConfig) -> Result<Self> {
        let thread_pool_size = config.thread_pool_size.unwrap_or_else(num_cpus::get);

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("simdex-match-{i}"))
            .build()
            .map_err(|e| SimdexError::internal(format!("Failed to create thread pool: {e}")))?;

        Ok(Self {
            config,
            thread_pool: Arc::new(thread_pool),
            metrics: Arc::new(MatchMetricsCollector::new()),
        })
    }

    /// Get a snapshot of the engine's metrics.
    pub fn metrics(&self) -> MatchMetrics {
        self.metrics.snapshot()
    }

    /// Reset the engine's metrics.
    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    /// Match one query batch against one table.
    ///
    /// `scan_limit` bounds how many of each query's dimension values are
    /// probed (the policy's scan window); `None` probes them all. Results
    /// follow input batch order. Fails with `TableMismatch` when a query
    /// was built against a table of different dimensionality.
    pub fn match_queries(
        &self,
        table: &Arc<InvertedTable>,
        queries: &[Query],
        scan_limit: Option<u32>,
    ) -> Result<SearchResult> {
        let hits = self.match_single(table, queries, scan_limit)?;
        Ok(SearchResult::single(hits))
    }

    /// Match paired (table, query batch) inputs.
    ///
    /// Equivalent to one single-table match per pair. Pairs share no
    /// mutable state, so they are dispatched onto the pool unordered; the
    /// output is reassembled in input order and keyed by table index.
    /// Fails with `SizeMismatch` when the input sequences differ in length.
    pub fn match_batches(
        &self,
        tables: &[Arc<InvertedTable>],
        batches: &[Vec<Query>],
        scan_limit: Option<u32>,
    ) -> Result<SearchResult> {
        if tables.len() != batches.len() {
            return Err(SimdexError::size_mismatch(format!(
                "{} tables paired with {} query batches",
                tables.len(),
                batches.len()
            )));
        }

        let task_ids: Vec<String> = (0..tables.len())
            .map(|index| format!("{}_{}", index, uuid::Uuid::new_v4()))
            .collect();
        let (tx, rx) = crossbeam_channel::unbounded();

        self.thread_pool.scope(|scope| {
            for (index, (table, queries)) in tables.iter().zip(batches.iter()).enumerate() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let result = self.match_single(table, queries, scan_limit);
                    let _ = tx.send((index, result));
                });
            }
        });
        drop(tx);

        let mut slots: Vec<Option<Result<Vec<QueryHits>>>> =
            (0..tables.len()).map(|_| None).collect();
        for (index, result) in rx.iter() {
            slots[index] = Some(result);
        }

        let mut result_batches = Vec::with_capacity(tables.len());
        for (index, slot) in slots.into_iter().enumerate() {
            let queries = slot.ok_or_else(|| {
                SimdexError::internal(format!(
                    "match task {} produced no result",
                    task_ids[index]
                ))
            })??;
            result_batches.push(BatchHits {
                table_index: index,
                queries,
            });
        }

        Ok(SearchResult {
            batches: result_batches,
        })
    }

    /// Match one batch against one table, returning per-query hits in
    /// input order.
    fn match_single(
        &self,
        table: &Arc<InvertedTable>,
        queries: &[Query],
        scan_limit: Option<u32>,
    ) -> Result<Vec<QueryHits>> {
        for (index, query) in queries.iter().enumerate() {
            if query.table_dims() != table.dims() {
                return Err(SimdexError::table_mismatch(format!(
                    "query {} was built against dimensionality {}, table has {}",
                    index,
                    query.table_dims(),
                    table.dims()
                )));
            }
        }

        let timer = Timer::start();

        // Stage 1: accumulation. All tallies for the batch must be complete
        // before selection starts.
        let tallies: Vec<HitAccumulator> = self.thread_pool.install(|| {
            queries
                .par_iter()
                .map(|query| Self::accumulate(table, query, scan_limit))
                .collect()
        });

        // Stage 2: selection.
        let hits: Vec<QueryHits> = self.thread_pool.install(|| {
            tallies
                .par_iter()
                .zip(queries.par_iter())
                .map(|(tally, query)| Self::select(query, tally))
                .collect()
        });

        if self.config.collect_metrics {
            let candidates: u64 = hits.iter().map(|h| h.candidates).sum();
            let returned: u64 = hits.iter().map(|h| h.entries.len() as u64).sum();
            self.metrics
                .record_match(timer.stop(), queries.len() as u64, candidates, returned);
        }

        Ok(hits)
    }

    /// The scan window: the leading dimension values the policy allows the
    /// query to probe.
    fn scan_window(dims: &[u32], scan_limit: Option<u32>) -> &[u32] {
        match scan_limit {
            Some(limit) => &dims[..dims.len().min(limit as usize)],
            None => dims,
        }
    }

    /// Stage 1 for one query: tally match counts over probed posting lists.
    fn accumulate(table: &InvertedTable, query: &Query, scan_limit: Option<u32>) -> HitAccumulator {
        let window = Self::scan_window(query.dims(), scan_limit);
        let mut accumulator = HitAccumulator::new(window.len() as u32);

        for &value in window {
            if let Some(record_ids) = table.posting_list(value) {
                accumulator.add_posting_list(record_ids);
            }
        }

        accumulator
    }

    /// Stage 2 for one query: admit candidates and rank the top-k.
    ///
    /// A candidate must match at least `probed - radius` values to lie
    /// within the radius, and at least `ceil(selectivity * probed)` values
    /// to survive the pruning hint; the stricter floor wins. Records
    /// sharing no probed value never enter the tally, so they cannot be
    /// admitted regardless of the radius.
    fn select(query: &Query, tally: &HitAccumulator) -> QueryHits {
        let probed = tally.probed_dims();
        let radius_floor = probed.saturating_sub(query.radius());
        let selectivity_floor = (query.selectivity() * probed as f32).ceil() as u32;
        let min_matches = radius_floor.max(selectivity_floor);

        let mut selector = TopKSelector::new(query.top_k());
        for (record_id, match_count) in tally.iter() {
            if match_count < min_matches {
                continue;
            }
            selector.offer(record_id, tally.distance(match_count));
        }

        selector.into_hits()
    }
}
