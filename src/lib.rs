//! # degree-assortativity — Weighted Degree Assortativity for Interaction Graphs
//!
//! Loads a directed, weighted edge list (Parquet or CSV), builds a graph with
//! one edge per ordered (source, target) pair, computes weighted in-, out- and
//! total degree per node, and derives the in/in and out/out degree
//! assortativity coefficients.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `EdgeSource` is the contract between file formats and analysis
//! 2. **Typed rows**: columns are validated and decoded into `EdgeRecord`s up front
//! 3. **Explicit collisions**: repeated pairs follow a `DuplicatePolicy`, never a silent default
//! 4. **Pure algorithms**: degrees and assortativity are functions of the built graph
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use degree_assortativity::{Analysis, AnalysisConfig};
//!
//! # fn example() -> degree_assortativity::Result<()> {
//! let analysis = Analysis::new(AnalysisConfig::default())?;
//! let report = analysis.run("edges.parquet")?;
//!
//! println!("in/in:   {}", report.assortativity.in_degree);
//! println!("out/out: {}", report.assortativity.out_degree);
//! # Ok(())
//! # }
//! ```
//!
//! ## Edge Sources
//!
//! | Source | Feature | Description |
//! |--------|---------|-------------|
//! | Memory | (always) | Records already in memory |
//! | CSV | (always) | Header-first CSV, types inferred by Arrow |
//! | Parquet | `parquet` (default) | Arrow record-batch reader with column projection |

use std::path::{Path, PathBuf};

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod source;
pub mod graph;
pub mod algo;
pub mod config;
pub mod pipeline;
pub mod report;
pub mod export;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{EdgeRecord, NodeKey, NodeId, Direction, DegreeKind};

// ============================================================================
// Re-exports: Sources
// ============================================================================

pub use source::{
    EdgeSource, EdgeSchema, EdgeTable, TableSummary,
    SourceConfig, SourceFormat, MemorySource, CsvSource,
};
#[cfg(feature = "parquet")]
pub use source::ParquetSource;

// ============================================================================
// Re-exports: Graph + algorithms
// ============================================================================

pub use graph::{DiGraph, Edge, GraphBuilder, DuplicatePolicy, BuildStats};
pub use algo::{
    Degrees, DegreeMap, DegreeSummary, compute_degrees,
    Assortativity, ObservationWeight, degree_assortativity, weighted_pearson,
};

// ============================================================================
// Re-exports: Pipeline
// ============================================================================

pub use config::AnalysisConfig;
pub use pipeline::{Analysis, AnalysisReport};
pub use report::OutputFormat;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot read {}: {message}", path.display())]
    DataAccess { path: PathBuf, message: String },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Null value in column '{column}' at row {row}")]
    NullValue { column: String, row: usize },

    #[error("Duplicate edge {src} -> {dst} at row {row}")]
    DuplicateEdge { src: NodeKey, dst: NodeKey, row: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Graph capacity exceeded: more than {limit} {what}")]
    Capacity { what: &'static str, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// A failure to open, read or decode the input file at `path`.
    pub fn data_access(path: &Path, err: impl std::fmt::Display) -> Self {
        Error::DataAccess {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
