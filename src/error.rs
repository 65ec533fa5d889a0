//! Error types for the Simdex library.
//!
//! This module provides comprehensive error handling for all Simdex
//! operations. All errors are represented by the [`SimdexError`] enum, which
//! provides detailed information about what went wrong.
//!
//! # Examples
//!
//! ```
//! use simdex::error::{Result, SimdexError};
//!
//! fn example_operation() -> Result<()> {
//!     // Return an error
//!     Err(SimdexError::invalid_parameter("top-k must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Simdex operations.
///
/// This enum represents all possible errors that can occur in the Simdex
/// library. It uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for creating
/// specific error types.
///
/// Every error is detected synchronously at the boundary of the offending
/// call and surfaced to the caller immediately; none are retried internally
/// and there is no partial-result-on-error mode.
#[derive(Error, Debug)]
pub enum SimdexError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed or empty corpus/query data at build time
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A query's shape disagrees with the table it was built against
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A Match call pairs queries with a table of a different shape
    #[error("Table mismatch: {0}")]
    TableMismatch(String),

    /// Out-of-range radius/top-k/selectivity
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Policy used before `validate()` or after a failed `validate()`
    #[error("Policy misconfigured: {0}")]
    PolicyMisconfigured(String),

    /// Paired multi-table/multi-query-batch inputs of unequal length
    #[error("Size mismatch: {0}")]
    SizeMismatch(String),

    /// Factory construction from an incomplete/unknown configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SimdexError.
pub type Result<T> = std::result::Result<T, SimdexError>;

impl SimdexError {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        SimdexError::InvalidInput(msg.into())
    }

    /// Create a new dimension mismatch error.
    pub fn dimension_mismatch<S: Into<String>>(msg: S) -> Self {
        SimdexError::DimensionMismatch(msg.into())
    }

    /// Create a new table mismatch error.
    pub fn table_mismatch<S: Into<String>>(msg: S) -> Self {
        SimdexError::TableMismatch(msg.into())
    }

    /// Create a new invalid parameter error.
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        SimdexError::InvalidParameter(msg.into())
    }

    /// Create a new policy misconfigured error.
    pub fn policy_misconfigured<S: Into<String>>(msg: S) -> Self {
        SimdexError::PolicyMisconfigured(msg.into())
    }

    /// Create a new size mismatch error.
    pub fn size_mismatch<S: Into<String>>(msg: S) -> Self {
        SimdexError::SizeMismatch(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SimdexError::InvalidConfig(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        SimdexError::Internal(msg.into())
    }
}
