//! Integration tests for the single-range execution policy.

use simdex::data::{QueryData, QueryParams, TableData};
use simdex::error::{Result, SimdexError};
use simdex::matching::MatchConfig;
use simdex::policy::{ExecutionPolicy, PolicyConfig, make_policy};

fn sample_corpus() -> TableData {
    TableData::new(vec![vec![1, 2, 3], vec![2, 3], vec![1, 3], vec![4]])
}

fn validated_policy(query_range: u32) -> Box<dyn ExecutionPolicy> {
    let config = PolicyConfig::single_range(query_range)
        .with_match_config(MatchConfig::with_threads(2));
    let policy = make_policy(&config).unwrap();
    policy.validate().unwrap();
    policy
}

#[test]
fn test_worked_example_end_to_end() -> Result<()> {
    let policy = validated_policy(8);

    let table = policy.build_table(&sample_corpus())?;
    let queries = policy.build_queries(
        &table,
        &QueryData::new(vec![vec![1, 3]], QueryParams::new(1, 2)),
    )?;
    let result = policy.match_queries(&table, &queries)?;

    let hits = result.hits(0, 0).unwrap();
    let ranked: Vec<(u32, u32)> = hits
        .entries
        .iter()
        .map(|e| (e.record_id, e.distance))
        .collect();

    // Records 0 and 2 match both probed values; record 1, within the
    // radius at distance 1, is displaced by top-2.
    assert_eq!(ranked, vec![(0, 0), (2, 0)]);
    assert_eq!(hits.candidates, 3);

    Ok(())
}

#[test]
fn test_policy_rejects_use_before_validate() {
    let config = PolicyConfig::single_range(8);
    let policy = make_policy(&config).unwrap();

    match policy.build_table(&sample_corpus()) {
        Err(SimdexError::PolicyMisconfigured(_)) => {}
        other => panic!("Expected PolicyMisconfigured, got {other:?}"),
    }
}

#[test]
fn test_zero_scan_range_fails_validate_then_match() {
    let config = PolicyConfig::single_range(0);
    let policy = make_policy(&config).unwrap();

    assert!(policy.validate().is_err());

    // A failed validate leaves every operation locked.
    let other_policy = validated_policy(8);
    let table = other_policy.build_table(&sample_corpus()).unwrap();
    let queries = other_policy
        .build_queries(
            &table,
            &QueryData::new(vec![vec![1]], QueryParams::new(1, 1)),
        )
        .unwrap();

    match policy.match_queries(&table, &queries) {
        Err(SimdexError::PolicyMisconfigured(_)) => {}
        other => panic!("Expected PolicyMisconfigured, got {other:?}"),
    }
}

#[test]
fn test_multi_table_size_mismatch() {
    let policy = validated_policy(8);
    let table_a = policy.build_table(&sample_corpus()).unwrap();
    let table_b = policy
        .build_table(&TableData::new(vec![vec![7, 8], vec![8]]))
        .unwrap();

    let batch = policy
        .build_queries(
            &table_a,
            &QueryData::new(vec![vec![1]], QueryParams::new(1, 1)),
        )
        .unwrap();

    let tables = vec![table_a, table_b];
    let batches = vec![batch.clone(), batch.clone(), batch];

    match policy.match_batches(&tables, &batches) {
        Err(SimdexError::SizeMismatch(_)) => {}
        other => panic!("Expected SizeMismatch, got {other:?}"),
    }
}

#[test]
fn test_multi_table_pairs_matched_independently() -> Result<()> {
    let policy = validated_policy(8);

    let corpus_a = sample_corpus();
    let corpus_b = TableData::with_dims(vec![vec![4], vec![1, 4], vec![9]], 3);

    let table_a = policy.build_table(&corpus_a)?;
    let table_b = policy.build_table(&corpus_b)?;

    let batch_a = policy.build_queries(
        &table_a,
        &QueryData::new(vec![vec![1, 3]], QueryParams::new(1, 5)),
    )?;
    let batch_b = policy.build_queries(
        &table_b,
        &QueryData::new(vec![vec![4]], QueryParams::new(0, 5)),
    )?;

    let combined = policy.match_batches(
        &[table_a.clone(), table_b.clone()],
        &[batch_a.clone(), batch_b.clone()],
    )?;

    // Each pair's result is identical to its single-table run.
    let solo_a = policy.match_queries(&table_a, &batch_a)?;
    let solo_b = policy.match_queries(&table_b, &batch_b)?;

    assert_eq!(combined.hits(0, 0), solo_a.hits(0, 0));
    assert_eq!(combined.hits(1, 0), solo_b.hits(0, 0));
    assert_eq!(combined.batches[0].table_index, 0);
    assert_eq!(combined.batches[1].table_index, 1);

    Ok(())
}

#[test]
fn test_scan_window_bounds_probing() -> Result<()> {
    let policy = validated_policy(1);

    let table = policy.build_table(&sample_corpus())?;
    let queries = policy.build_queries(
        &table,
        &QueryData::new(vec![vec![1, 3]], QueryParams::new(0, 10)),
    )?;
    let result = policy.match_queries(&table, &queries)?;

    // With a window of one, only value 1 is probed: records 0 and 2.
    let ids: Vec<u32> = result
        .hits(0, 0)
        .unwrap()
        .entries
        .iter()
        .map(|e| e.record_id)
        .collect();
    assert_eq!(ids, vec![0, 2]);

    Ok(())
}

#[test]
fn test_factory_rejects_incomplete_descriptor() {
    let json = r#"{"kind": "single_range"}"#;
    let config = PolicyConfig::from_json(json).unwrap();

    match make_policy(&config) {
        Err(SimdexError::InvalidConfig(_)) => {}
        other => panic!("Expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_factory_rejects_unknown_kind() {
    match PolicyConfig::from_json(r#"{"kind": "hypercube", "query_range": 4}"#) {
        Err(SimdexError::InvalidConfig(_)) => {}
        other => panic!("Expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn test_shared_policy_serves_repeated_cycles() -> Result<()> {
    let policy = validated_policy(8);

    for _ in 0..3 {
        let table = policy.build_table(&sample_corpus())?;
        let queries = policy.build_queries(
            &table,
            &QueryData::new(vec![vec![2, 3]], QueryParams::new(1, 4)),
        )?;
        let result = policy.match_queries(&table, &queries)?;
        assert_eq!(result.query_count(), 1);
    }

    Ok(())
}
