//! The matching engine: data-parallel top-k search over an inverted table.
//!
//! This module provides:
//! - [`MatchEngine`], the two-stage (accumulate, then select) parallel
//!   matcher invoked by execution policies
//! - Per-record hit accumulation over posting lists
//! - Bounded-heap top-k selection under a distance radius
//! - Metrics collection for match executions

pub mod accumulator;
pub mod config;
pub mod engine;
pub mod metrics;
pub mod selector;

pub use accumulator::HitAccumulator;
pub use config::MatchConfig;
pub use engine::MatchEngine;
pub use metrics::{MatchMetrics, MatchMetricsCollector, Timer};
pub use selector::TopKSelector;
