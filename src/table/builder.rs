//! Construction of inverted tables from raw corpus data.

use ahash::AHashMap;

use crate::data::TableData;
use crate::error::{Result, SimdexError};
use crate::table::inverted::InvertedTable;

/// Builds an [`InvertedTable`] from raw corpus data.
///
/// For each record, the builder appends the record's identifier (its
/// position in the input) to the posting list of every dimension value the
/// record contains. Records are visited in corpus order, so posting lists
/// come out in ascending record-id order without a sort, which keeps
/// downstream merge-by-id deterministic.
#[derive(Debug, Default)]
pub struct TableBuilder;

impl TableBuilder {
    /// Create a new table builder.
    pub fn new() -> Self {
        TableBuilder
    }

    /// Build an inverted table from the given corpus.
    ///
    /// Fails with `InvalidInput` when the corpus is empty or a record
    /// exceeds the declared dimensionality. The input is not mutated; the
    /// only side effect is allocating the returned table.
    pub fn build(&self, table_data: &TableData) -> Result<InvertedTable> {
        if table_data.records.is_empty() {
            return Err(SimdexError::invalid_input(
                "cannot build a table from an empty corpus",
            ));
        }

        let dims = table_data.dims as usize;
        let mut postings: AHashMap<u32, Vec<u32>> = AHashMap::new();

        for (record_id, record) in table_data.records.iter().enumerate() {
            if record.len() > dims {
                return Err(SimdexError::invalid_input(format!(
                    "record {} has {} values, exceeding declared dimensionality {}",
                    record_id,
                    record.len(),
                    dims
                )));
            }

            for &value in record {
                // A value repeated within one record appends once per
                // occurrence, preserving source multiplicity.
                postings.entry(value).or_default().push(record_id as u32);
            }
        }

        Ok(InvertedTable::new(
            postings,
            table_data.records.len(),
            table_data.dims,
        ))
    }
}
