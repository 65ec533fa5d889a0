//! Metrics collection for match executions.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics collected across match executions.
#[derive(Debug, Clone)]
pub struct MatchMetrics {
    /// Total number of match calls executed.
    pub total_matches: u64,

    /// Total number of queries answered.
    pub total_queries: u64,

    /// Total candidates examined during selection.
    pub total_candidates: u64,

    /// Total hits returned to callers.
    pub total_hits: u64,

    /// Total execution time across all match calls.
    pub total_execution_time: Duration,

    /// Average execution time per match call.
    pub avg_execution_time: Duration,

    /// Maximum execution time observed.
    pub max_execution_time: Duration,

    /// Minimum execution time observed.
    pub min_execution_time: Duration,

    /// Queries per second over the recent window.
    pub current_queries_per_second: f64,
}

impl Default for MatchMetrics {
    fn default() -> Self {
        Self {
            total_matches: 0,
            total_queries: 0,
            total_candidates: 0,
            total_hits: 0,
            total_execution_time: Duration::ZERO,
            avg_execution_time: Duration::ZERO,
            max_execution_time: Duration::ZERO,
            min_execution_time: Duration::ZERO,
            current_queries_per_second: 0.0,
        }
    }
}

/// Thread-safe collector for match execution metrics.
pub struct MatchMetricsCollector {
    /// Atomic counters for thread-safe collection.
    total_matches: Arc<AtomicU64>,
    total_queries: Arc<AtomicU64>,
    total_candidates: Arc<AtomicU64>,
    total_hits: Arc<AtomicU64>,
    total_execution_nanos: Arc<AtomicU64>,
    max_execution_nanos: Arc<AtomicU64>,
    min_execution_nanos: Arc<AtomicU64>,

    /// Window for calculating current throughput.
    throughput_window: Arc<parking_lot::Mutex<ThroughputWindow>>,
}

/// Window for calculating recent query throughput.
#[derive(Debug)]
struct ThroughputWindow {
    /// Timestamps and query counts for recent match calls.
    recent_matches: VecDeque<(Instant, u64)>,

    /// Maximum window size.
    window_size: Duration,
}

impl ThroughputWindow {
    fn new(window_size: Duration) -> Self {
        Self {
            recent_matches: VecDeque::new(),
            window_size,
        }
    }

    fn add_match(&mut self, query_count: u64) {
        let now = Instant::now();
        self.recent_matches.push_back((now, query_count));

        // Remove old entries outside the window
        while let Some(&(timestamp, _)) = self.recent_matches.front() {
            if now.duration_since(timestamp) > self.window_size {
                self.recent_matches.pop_front();
            } else {
                break;
            }
        }
    }

    fn queries_per_second(&self) -> f64 {
        let Some(&(oldest, _)) = self.recent_matches.front() else {
            return 0.0;
        };
        let window = oldest.elapsed().as_secs_f64();
        if window <= 0.0 {
            return 0.0;
        }
        let total_queries: u64 = self.recent_matches.iter().map(|(_, count)| count).sum();
        total_queries as f64 / window
    }
}

impl MatchMetricsCollector {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            total_matches: Arc::new(AtomicU64::new(0)),
            total_queries: Arc::new(AtomicU64::new(0)),
            total_candidates: Arc::new(AtomicU64::new(0)),
            total_hits: Arc::new(AtomicU64::new(0)),
            total_execution_nanos: Arc::new(AtomicU64::new(0)),
            max_execution_nanos: Arc::new(AtomicU64::new(0)),
            min_execution_nanos: Arc::new(AtomicU64::new(u64::MAX)),
            throughput_window: Arc::new(parking_lot::Mutex::new(ThroughputWindow::new(
                Duration::from_secs(60),
            ))),
        }
    }

    /// Record one match execution.
    pub fn record_match(
        &self,
        execution_time: Duration,
        queries: u64,
        candidates: u64,
        hits: u64,
    ) {
        self.total_matches.fetch_add(1, Ordering::Relaxed);
        self.total_queries.fetch_add(queries, Ordering::Relaxed);
        self.total_candidates.fetch_add(candidates, Ordering::Relaxed);
        self.total_hits.fetch_add(hits, Ordering::Relaxed);

        let nanos = execution_time.as_nanos() as u64;
        self.total_execution_nanos
            .fetch_add(nanos, Ordering::Relaxed);

        // Update max execution time
        loop {
            let current_max = self.max_execution_nanos.load(Ordering::Relaxed);
            if nanos <= current_max {
                break;
            }
            if self
                .max_execution_nanos
                .compare_exchange_weak(current_max, nanos, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                break;
            }
        }

        // Update min execution time
        loop {
            let current_min = self.min_execution_nanos.load(Ordering::Relaxed);
            if nanos >= current_min {
                break;
            }
            if self
                .min_execution_nanos
                .compare_exchange_weak(current_min, nanos, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                break;
            }
        }

        self.throughput_window.lock().add_match(queries);
    }

    /// Get the current metrics snapshot.
    pub fn snapshot(&self) -> MatchMetrics {
        let total_matches = self.total_matches.load(Ordering::Relaxed);
        let total_nanos = self.total_execution_nanos.load(Ordering::Relaxed);

        let avg_nanos = if total_matches > 0 {
            total_nanos / total_matches
        } else {
            0
        };

        let min_nanos = self.min_execution_nanos.load(Ordering::Relaxed);
        let min_duration = if min_nanos == u64::MAX {
            Duration::ZERO
        } else {
            Duration::from_nanos(min_nanos)
        };

        MatchMetrics {
            total_matches,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            total_candidates: self.total_candidates.load(Ordering::Relaxed),
            total_hits: self.total_hits.load(Ordering::Relaxed),
            total_execution_time: Duration::from_nanos(total_nanos),
            avg_execution_time: Duration::from_nanos(avg_nanos),
            max_execution_time: Duration::from_nanos(
                self.max_execution_nanos.load(Ordering::Relaxed),
            ),
            min_execution_time: min_duration,
            current_queries_per_second: self.throughput_window.lock().queries_per_second(),
        }
    }

    /// Reset all metrics.
    pub fn reset(&self) {
        self.total_matches.store(0, Ordering::Relaxed);
        self.total_queries.store(0, Ordering::Relaxed);
        self.total_candidates.store(0, Ordering::Relaxed);
        self.total_hits.store(0, Ordering::Relaxed);
        self.total_execution_nanos.store(0, Ordering::Relaxed);
        self.max_execution_nanos.store(0, Ordering::Relaxed);
        self.min_execution_nanos.store(u64::MAX, Ordering::Relaxed);
    }
}

impl Default for MatchMetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper for timing operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return elapsed time.
    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}
