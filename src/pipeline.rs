//! The analysis pipeline: load → build → degrees → assortativity.
//!
//! ```text
//! EdgeSource::load() → EdgeTable → GraphBuilder → DiGraph
//!   → compute_degrees() → Degrees
//!   → Assortativity::compute() → AnalysisReport
//! ```

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::algo::{Assortativity, DegreeSummary, Degrees, ObservationWeight, compute_degrees};
use crate::config::AnalysisConfig;
use crate::graph::{BuildStats, DiGraph, DuplicatePolicy, GraphBuilder};
use crate::model::{DegreeKind, NodeKey};
use crate::source::{EdgeSource, EdgeTable, SourceConfig};
use crate::Result;

/// A configured analysis. Holds no state between runs.
#[derive(Debug, Clone)]
pub struct Analysis {
    config: AnalysisConfig,
}

impl Analysis {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze the edge list stored at `path`.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<AnalysisReport> {
        let source = SourceConfig::from_path(path.as_ref(), self.config.format)?
            .open(self.config.schema.clone());
        self.run_source(source.as_ref())
    }

    /// Analyze whatever `source` yields.
    pub fn run_source(&self, source: &dyn EdgeSource) -> Result<AnalysisReport> {
        let started = Instant::now();
        let description = source.describe();

        let table = source.load()?;
        debug!(source = %description, "loaded edge table\n{}", table.summary(self.config.preview_rows));

        let mut report = self.analyze_table(&table)?;
        report.source = description;
        report.elapsed_ms = started.elapsed().as_millis() as u64;
        Ok(report)
    }

    /// Build the graph from an already loaded table and analyze it.
    pub fn analyze_table(&self, table: &EdgeTable) -> Result<AnalysisReport> {
        let (graph, build) = GraphBuilder::from_table(table, self.config.duplicates)?;
        Ok(self.analyze_graph(graph, build))
    }

    /// Analyze a graph built elsewhere.
    pub fn analyze_graph(&self, graph: DiGraph, build: BuildStats) -> AnalysisReport {
        let degrees = compute_degrees(&graph);
        let assortativity = Assortativity::compute(&graph, &degrees, self.config.weighting);

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            in_degree = assortativity.in_degree,
            out_degree = assortativity.out_degree,
            "degree assortativity computed"
        );

        let degree_summary = DegreeKind::ALL.map(|k| degrees.get(k).summary()).to_vec();
        let top_nodes = if self.config.top > 0 {
            DegreeKind::ALL
                .iter()
                .map(|&kind| TopNodes {
                    kind,
                    nodes: degrees.get(kind).top(&graph, self.config.top),
                })
                .collect()
        } else {
            Vec::new()
        };

        AnalysisReport {
            source: String::from("graph"),
            generated_at: Utc::now(),
            duplicates: self.config.duplicates,
            weighting: self.config.weighting,
            build,
            degree_summary,
            top_nodes,
            assortativity,
            elapsed_ms: 0,
            graph,
            degrees,
        }
    }
}

/// Highest-degree nodes for one degree kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopNodes {
    pub kind: DegreeKind,
    pub nodes: Vec<(NodeKey, f64)>,
}

/// Everything one run produced.
///
/// The graph and per-node degrees are kept for export but left out of the
/// serialized form.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub duplicates: DuplicatePolicy,
    pub weighting: ObservationWeight,
    pub build: BuildStats,
    pub degree_summary: Vec<DegreeSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub top_nodes: Vec<TopNodes>,
    pub assortativity: Assortativity,
    pub elapsed_ms: u64,
    #[serde(skip)]
    pub graph: DiGraph,
    #[serde(skip)]
    pub degrees: Degrees,
}
