//! File-backed corpus and query loaders.
//!
//! These are the external collaborators at the engine's input boundary:
//! thin wrappers that parse line-oriented integer files into the in-memory
//! structures the core consumes. No algorithmic content lives here, and the
//! core itself never touches the filesystem.
//!
//! Format: one record per line, dimension values separated by commas or
//! whitespace; blank lines and `#` comments are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data::{QueryData, QueryParams, TableData};
use crate::error::{Result, SimdexError};

/// Read a record corpus from a file.
///
/// `limit` caps how many records are read; `None` reads the whole file.
/// Negative values and empty corpora are rejected here, before they can
/// reach the core.
pub fn read_records<P: AsRef<Path>>(path: P, limit: Option<usize>) -> Result<TableData> {
    let records = read_integer_lines(path.as_ref(), limit)?;
    if records.is_empty() {
        return Err(SimdexError::invalid_input(format!(
            "no records in {}",
            path.as_ref().display()
        )));
    }
    Ok(TableData::new(records))
}

/// Read a query batch from a file, attaching the shared parameters.
///
/// `limit` caps how many queries are read; `None` reads the whole file.
pub fn read_queries<P: AsRef<Path>>(
    path: P,
    limit: Option<usize>,
    params: QueryParams,
) -> Result<QueryData> {
    let records = read_integer_lines(path.as_ref(), limit)?;
    if records.is_empty() {
        return Err(SimdexError::invalid_input(format!(
            "no queries in {}",
            path.as_ref().display()
        )));
    }
    Ok(QueryData::new(records, params))
}

fn read_integer_lines(path: &Path, limit: Option<usize>) -> Result<Vec<Vec<u32>>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        if let Some(limit) = limit {
            if records.len() >= limit {
                break;
            }
        }

        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut record = Vec::new();
        for token in trimmed.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            let value: i64 = token.parse().map_err(|_| {
                SimdexError::invalid_input(format!(
                    "line {}: '{}' is not an integer",
                    line_no + 1,
                    token
                ))
            })?;
            if !(0..=i64::from(u32::MAX)).contains(&value) {
                return Err(SimdexError::invalid_input(format!(
                    "line {}: value {} is out of range",
                    line_no + 1,
                    value
                )));
            }
            record.push(value as u32);
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_records() {
        let file = write_temp("1,2,3\n2 3\n\n# comment\n1,3\n4\n");
        let data = read_records(file.path(), None).unwrap();

        assert_eq!(
            data.records,
            vec![vec![1, 2, 3], vec![2, 3], vec![1, 3], vec![4]]
        );
        assert_eq!(data.dims, 3);
    }

    #[test]
    fn test_read_records_with_limit() {
        let file = write_temp("1\n2\n3\n");
        let data = read_records(file.path(), Some(2)).unwrap();
        assert_eq!(data.record_count(), 2);
    }

    #[test]
    fn test_negative_value_rejected() {
        let file = write_temp("1,-2,3\n");
        match read_records(file.path(), None) {
            Err(SimdexError::InvalidInput(msg)) => assert!(msg.contains("-2")),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_rejected() {
        let file = write_temp("1,two,3\n");
        match read_records(file.path(), None) {
            Err(SimdexError::InvalidInput(msg)) => assert!(msg.contains("two")),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_file_rejected() {
        let file = write_temp("# only a comment\n");
        match read_records(file.path(), None) {
            Err(SimdexError::InvalidInput(_)) => {}
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        match read_records("/nonexistent/simdex-corpus.txt", None) {
            Err(SimdexError::Io(_)) => {}
            other => panic!("Expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_read_queries_attaches_params() {
        let file = write_temp("1,3\n4\n");
        let params = QueryParams::new(1, 2).with_selectivity(0.25);
        let data = read_queries(file.path(), None, params).unwrap();

        assert_eq!(data.query_count(), 2);
        assert_eq!(data.params, params);
    }
}
