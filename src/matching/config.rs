//! Configuration for the matching engine.

use serde::{Deserialize, Serialize};

/// Configuration for a [`MatchEngine`](crate::matching::MatchEngine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Thread pool size for parallel execution.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Whether to collect execution metrics.
    pub collect_metrics: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            thread_pool_size: None,
            collect_metrics: true,
        }
    }
}

impl MatchConfig {
    /// Create a config with an explicit thread pool size.
    pub fn with_threads(threads: usize) -> Self {
        Self {
            thread_pool_size: Some(threads),
            ..Default::default()
        }
    }

    /// Set whether to collect metrics.
    pub fn with_metrics(mut self, collect: bool) -> Self {
        self.collect_metrics = collect;
        self
    }
}
