//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SimdexArgs};
use crate::error::Result;
use crate::result::SearchResult;
use crate::table::TableStats;

/// Result structure for search runs.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRunResults {
    /// The ranked hits, keyed by (table index, query index).
    pub result: SearchResult,

    /// Number of queries answered.
    pub queries_matched: usize,

    /// Total hits returned across all queries.
    pub total_hits: usize,

    /// Wall-clock duration of the match call.
    pub duration_ms: u64,
}

/// Result structure for corpus statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorpusStatsResults {
    /// Statistics of the table built from the corpus.
    pub stats: TableStats,

    /// Wall-clock duration of the build.
    pub duration_ms: u64,
}

/// Result structure for policy validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResults {
    /// Whether the descriptor produced a valid policy.
    pub valid: bool,

    /// Failure detail when invalid.
    pub message: Option<String>,
}

/// Result structure for data generation.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResults {
    /// Path the data was written to.
    pub path: String,

    /// Number of records written.
    pub records: usize,

    /// Dimension values per record.
    pub dims: usize,
}

/// Output a result in the configured format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &SimdexArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SimdexArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("SearchRunResults") => {
            output_search_results_human(&value)
        }
        _ if std::any::type_name::<T>().contains("CorpusStatsResults") => {
            output_stats_human(&value)
        }
        _ => {
            // Generic output for other types
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
    }
}

fn output_search_results_human(value: &serde_json::Value) -> Result<()> {
    println!("Search Results:");
    println!("═══════════════");

    let batches = value
        .get("result")
        .and_then(|r| r.get("batches"))
        .and_then(|b| b.as_array());

    if let Some(batches) = batches {
        for batch in batches {
            let table_index = batch
                .get("table_index")
                .and_then(|t| t.as_u64())
                .unwrap_or(0);
            if batches.len() > 1 {
                println!();
                println!("Table {table_index}:");
                println!("─────────────");
            }

            if let Some(queries) = batch.get("queries").and_then(|q| q.as_array()) {
                for (query_index, hits) in queries.iter().enumerate() {
                    let candidates = hits
                        .get("candidates")
                        .and_then(|c| c.as_u64())
                        .unwrap_or(0);
                    println!();
                    println!("Query {query_index}: ({candidates} candidates)");

                    if let Some(entries) = hits.get("entries").and_then(|e| e.as_array()) {
                        for entry in entries {
                            println!(
                                "  record {:<8} distance {}",
                                entry
                                    .get("record_id")
                                    .and_then(|r| r.as_u64())
                                    .unwrap_or(0),
                                entry
                                    .get("distance")
                                    .and_then(|d| d.as_u64())
                                    .unwrap_or(0),
                            );
                        }
                    }
                }
            }
        }
    }

    println!();
    println!(
        "{} queries, {} hits in {} ms",
        value
            .get("queries_matched")
            .and_then(|q| q.as_u64())
            .unwrap_or(0),
        value.get("total_hits").and_then(|h| h.as_u64()).unwrap_or(0),
        value.get("duration_ms").and_then(|d| d.as_u64()).unwrap_or(0),
    );

    Ok(())
}

fn output_stats_human(value: &serde_json::Value) -> Result<()> {
    println!("Corpus Statistics:");
    println!("═════════════════");

    if let Some(stats) = value.get("stats").and_then(|s| s.as_object()) {
        for (name, stat) in stats {
            println!("{name}: {stat}");
        }
    }
    println!(
        "built in {} ms",
        value.get("duration_ms").and_then(|d| d.as_u64()).unwrap_or(0)
    );

    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SimdexArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}
