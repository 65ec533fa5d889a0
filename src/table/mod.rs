//! Inverted table: the index data structure matching runs against.
//!
//! This module provides:
//! - The immutable [`InvertedTable`] mapping dimension values to posting
//!   lists of record identifiers
//! - The [`TableBuilder`] that constructs tables from raw corpus data

pub mod builder;
pub mod inverted;

pub use builder::TableBuilder;
pub use inverted::{InvertedTable, TableStats};
