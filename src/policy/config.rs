//! Policy configuration descriptor and factory.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimdexError};
use crate::matching::MatchConfig;
use crate::policy::ExecutionPolicy;
use crate::policy::single_range::SingleRangePolicy;

/// The concrete strategy a [`PolicyConfig`] selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Fixed scan window per query ([`SingleRangePolicy`]).
    SingleRange,
}

/// Validated configuration descriptor a policy is instantiated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Which concrete strategy to instantiate.
    pub kind: PolicyKind,

    /// Scan window width; required by `single_range`.
    pub query_range: Option<u32>,

    /// Engine configuration shared by all strategies.
    #[serde(default)]
    pub match_config: MatchConfig,
}

impl PolicyConfig {
    /// Descriptor for a single-range policy with the given window.
    pub fn single_range(query_range: u32) -> Self {
        PolicyConfig {
            kind: PolicyKind::SingleRange,
            query_range: Some(query_range),
            match_config: MatchConfig::default(),
        }
    }

    /// Set the engine configuration.
    pub fn with_match_config(mut self, match_config: MatchConfig) -> Self {
        self.match_config = match_config;
        self
    }

    /// Parse a descriptor from JSON.
    ///
    /// Unknown fields and unknown policy kinds are configuration errors,
    /// not JSON errors, so they surface as `InvalidConfig`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SimdexError::invalid_config(format!("bad policy descriptor: {e}")))
    }
}

/// Instantiate the execution policy a descriptor selects.
///
/// This is the only construction path for concrete policies; missing
/// required strategy parameters fail with `InvalidConfig`. The returned
/// policy still has to pass `validate()` before use.
pub fn make_policy(config: &PolicyConfig) -> Result<Box<dyn ExecutionPolicy>> {
    match config.kind {
        PolicyKind::SingleRange => {
            let query_range = config.query_range.ok_or_else(|| {
                SimdexError::invalid_config(
                    "single_range policy requires a query_range parameter",
                )
            })?;
            let policy = SingleRangePolicy::new(query_range, config.match_config.clone())?;
            Ok(Box::new(policy))
        }
    }
}
