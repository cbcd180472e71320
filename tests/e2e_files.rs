//! End-to-end tests reading edge lists from disk.
//!
//! The same rows are written as Parquet and as CSV; both must yield the same
//! report, and file/schema problems must surface as the matching error.

#![cfg(feature = "parquet")]

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use degree_assortativity::{
    Analysis, AnalysisConfig, DuplicatePolicy, Error, NodeKey, SourceFormat,
    export::export_degree_csv,
};

const SRC: &str = "ID_CommunityIdentity_Source";
const DST: &str = "ID_CommunityIdentity_Target";
const W: &str = "weight_total";

/// (source, target, weight) rows shared by every fixture.
fn rows() -> Vec<(i64, i64, f64)> {
    vec![
        (10, 20, 3.0),
        (20, 30, 1.0),
        (30, 10, 2.0),
        (10, 30, 4.0),
        (40, 10, 1.5),
        (20, 10, 0.5),
        (10, 20, 6.0), // duplicate of the first pair
    ]
}

fn write_parquet(dir: &Path, name: &str, rows: &[(i64, i64, f64)]) -> std::path::PathBuf {
    let path = dir.join(name);
    let batch = RecordBatch::try_from_iter(vec![
        (SRC, Arc::new(Int64Array::from(rows.iter().map(|r| r.0).collect::<Vec<_>>())) as ArrayRef),
        (DST, Arc::new(Int64Array::from(rows.iter().map(|r| r.1).collect::<Vec<_>>())) as ArrayRef),
        (W, Arc::new(Float64Array::from(rows.iter().map(|r| r.2).collect::<Vec<_>>())) as ArrayRef),
    ])
    .unwrap();
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    path
}

fn write_csv(dir: &Path, name: &str, rows: &[(i64, i64, f64)]) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{SRC},{DST},{W}").unwrap();
    for (s, t, w) in rows {
        writeln!(file, "{s},{t},{w:?}").unwrap();
    }
    path
}

// ============================================================================
// 1. Parquet and CSV agree
// ============================================================================

#[test]
fn test_parquet_and_csv_reports_match() {
    let dir = TempDir::new().unwrap();
    let pq = write_parquet(dir.path(), "edges.parquet", &rows());
    let csv = write_csv(dir.path(), "edges.csv", &rows());

    let analysis = Analysis::new(AnalysisConfig::default()).unwrap();
    let a = analysis.run(&pq).unwrap();
    let b = analysis.run(&csv).unwrap();

    assert_eq!(a.build, b.build);
    assert_eq!(a.degrees, b.degrees);
    assert_eq!(a.assortativity, b.assortativity);
    assert_eq!(a.build.rows, 7);
    assert_eq!(a.build.edges, 6);
    assert_eq!(a.graph.edge_weight(&NodeKey::Int(10), &NodeKey::Int(20)), Some(6.0));
}

#[test]
fn test_empty_files_give_empty_graph() {
    let dir = TempDir::new().unwrap();
    let pq = write_parquet(dir.path(), "empty.parquet", &[]);
    let csv = write_csv(dir.path(), "empty.csv", &[]);
    let analysis = Analysis::new(AnalysisConfig::default()).unwrap();

    for path in [pq, csv] {
        let report = analysis.run(&path).unwrap();
        assert_eq!(report.build.rows, 0);
        assert_eq!(report.graph.node_count(), 0);
        assert!(report.assortativity.in_degree.is_nan());
        assert!(report.assortativity.out_degree.is_nan());
    }
}

#[test]
fn test_csv_ids_are_not_renumbered() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("padded.csv");
    std::fs::write(&path, format!("{SRC},{DST},{W}\n007,7,1\n7,8,1\n")).unwrap();

    let report = Analysis::new(AnalysisConfig::default()).unwrap().run(&path).unwrap();
    assert_eq!(report.graph.node_count(), 3);
    assert_eq!(report.build.self_loops, 0);
    assert_eq!(report.graph.edge_weight(&NodeKey::from("007"), &NodeKey::Int(7)), Some(1.0));
}

// ============================================================================
// 2. Idempotence: two runs over one file are identical
// ============================================================================

#[test]
fn test_rerun_is_identical() {
    let dir = TempDir::new().unwrap();
    let pq = write_parquet(dir.path(), "edges.parquet", &rows());
    let analysis = Analysis::new(AnalysisConfig::default()).unwrap();

    let first = analysis.run(&pq).unwrap();
    let second = analysis.run(&pq).unwrap();

    assert_eq!(first.degrees, second.degrees);
    assert_eq!(first.assortativity.in_degree.to_bits(), second.assortativity.in_degree.to_bits());
    assert_eq!(first.assortativity.out_degree.to_bits(), second.assortativity.out_degree.to_bits());
}

// ============================================================================
// 3. Error taxonomy
// ============================================================================

#[test]
fn test_missing_file() {
    let analysis = Analysis::new(AnalysisConfig::default()).unwrap();
    let err = analysis.run("/no/such/dir/edges.parquet").unwrap_err();
    assert!(matches!(err, Error::DataAccess { .. }), "got {err:?}");
}

#[test]
fn test_wrong_column_names() {
    let dir = TempDir::new().unwrap();
    let pq = write_parquet(dir.path(), "edges.parquet", &rows());

    let mut config = AnalysisConfig::default();
    config.schema.weight = "weight_votes".into();
    let err = Analysis::new(config).unwrap().run(&pq).unwrap_err();

    match err {
        Error::Schema(msg) => assert!(msg.contains("weight_votes"), "{msg}"),
        other => panic!("expected Schema error, got {other:?}"),
    }
}

#[test]
fn test_unknown_extension_needs_explicit_format() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(dir.path(), "edges.txt", &rows());

    let analysis = Analysis::new(AnalysisConfig::default()).unwrap();
    assert!(matches!(analysis.run(&csv), Err(Error::Config(_))));

    let forced = Analysis::new(AnalysisConfig {
        format: Some(SourceFormat::Csv),
        ..AnalysisConfig::default()
    })
    .unwrap();
    assert_eq!(forced.run(&csv).unwrap().build.rows, 7);
}

#[test]
fn test_reject_policy_on_file() {
    let dir = TempDir::new().unwrap();
    let pq = write_parquet(dir.path(), "edges.parquet", &rows());

    let analysis = Analysis::new(AnalysisConfig {
        duplicates: DuplicatePolicy::Reject,
        ..AnalysisConfig::default()
    })
    .unwrap();
    let err = analysis.run(&pq).unwrap_err();
    assert!(matches!(err, Error::DuplicateEdge { row: 6, .. }), "got {err:?}");
}

// ============================================================================
// 4. Degree table export from a file run
// ============================================================================

#[test]
fn test_export_after_file_run() {
    let dir = TempDir::new().unwrap();
    let pq = write_parquet(dir.path(), "edges.parquet", &rows());
    let report = Analysis::new(AnalysisConfig::default()).unwrap().run(&pq).unwrap();

    let mut buf = Vec::new();
    export_degree_csv(&report.graph, &report.degrees, &mut buf).unwrap();
    let csv = String::from_utf8(buf).unwrap();

    // header + one line per node (10, 20, 30, 40)
    assert_eq!(csv.lines().count(), 5);
    // 10: in = 2.0 + 1.5 + 0.5, out = 6.0 + 4.0
    assert!(csv.lines().any(|l| l == "10,4,10,14"), "{csv}");
}
