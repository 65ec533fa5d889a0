//! Command implementations for the Simdex CLI.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::time::Instant;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::data::QueryParams;
use crate::error::Result;
use crate::loader::{read_queries, read_records};
use crate::matching::MatchConfig;
use crate::policy::{PolicyConfig, make_policy};
use crate::table::TableBuilder;

/// Execute a CLI command.
pub fn execute_command(args: SimdexArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search_corpus(search_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
        Command::Validate(validate_args) => validate_policy(validate_args.clone(), &args),
        Command::Generate(generate_args) => generate_data(generate_args.clone(), &args),
    }
}

/// Run a query batch against a corpus.
fn search_corpus(args: SearchArgs, cli_args: &SimdexArgs) -> Result<()> {
    if cli_args.verbosity() > 1 {
        println!("Loading corpus from: {}", args.corpus.display());
    }
    let table_data = read_records(&args.corpus, args.max_records)?;

    let params = QueryParams::new(args.radius, args.top_k).with_selectivity(args.selectivity);
    let query_data = read_queries(&args.queries, args.max_queries, params)?;

    let config = match &args.config {
        Some(path) => PolicyConfig::from_json(&fs::read_to_string(path)?)?,
        None => {
            let mut match_config = MatchConfig::default();
            match_config.thread_pool_size = args.threads;
            PolicyConfig::single_range(args.query_range).with_match_config(match_config)
        }
    };

    let policy = make_policy(&config)?;
    policy.validate()?;

    let start = Instant::now();
    let table = policy.build_table(&table_data)?;
    if cli_args.verbosity() > 1 {
        println!(
            "Indexed {} records over {} distinct values",
            table.record_count(),
            table.unique_values()
        );
    }

    let queries = policy.build_queries(&table, &query_data)?;
    let result = policy.match_queries(&table, &queries)?;
    let duration = start.elapsed();

    let total_hits = result
        .batches
        .iter()
        .flat_map(|batch| batch.queries.iter())
        .map(|hits| hits.entries.len())
        .sum();

    output_result(
        "Search completed",
        &SearchRunResults {
            queries_matched: result.query_count(),
            total_hits,
            duration_ms: duration.as_millis() as u64,
            result,
        },
        cli_args,
    )
}

/// Build a table from a corpus and report its statistics.
fn show_stats(args: StatsArgs, cli_args: &SimdexArgs) -> Result<()> {
    let table_data = read_records(&args.corpus, args.max_records)?;

    let start = Instant::now();
    let table = TableBuilder::new().build(&table_data)?;
    let duration = start.elapsed();

    output_result(
        "Corpus indexed",
        &CorpusStatsResults {
            stats: table.stats(),
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Check a policy descriptor without running anything.
fn validate_policy(args: ValidateArgs, cli_args: &SimdexArgs) -> Result<()> {
    let outcome = PolicyConfig::from_json(&fs::read_to_string(&args.config)?)
        .and_then(|config| make_policy(&config))
        .and_then(|policy| policy.validate());

    let results = match outcome {
        Ok(()) => ValidationResults {
            valid: true,
            message: None,
        },
        Err(e) => ValidationResults {
            valid: false,
            message: Some(e.to_string()),
        },
    };

    output_result("Policy validation", &results, cli_args)
}

/// Write a synthetic corpus or query file.
fn generate_data(args: GenerateArgs, cli_args: &SimdexArgs) -> Result<()> {
    use rand::prelude::*;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let file = File::create(&args.output)?;
    let mut writer = BufWriter::new(file);

    for _ in 0..args.records {
        let values: Vec<String> = (0..args.dims)
            .map(|_| rng.random_range(0..args.max_value).to_string())
            .collect();
        writeln!(writer, "{}", values.join(","))?;
    }
    writer.flush()?;

    output_result(
        "Data generated",
        &GenerateResults {
            path: args.output.to_string_lossy().to_string(),
            records: args.records,
            dims: args.dims,
        },
        cli_args,
    )
}
