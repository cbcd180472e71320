//! Graph construction from edge records.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{EdgeRecord, NodeId, NodeKey};
use crate::source::EdgeTable;
use crate::{Error, Result};
use super::DiGraph;

/// What to do when an ordered (source, target) pair shows up again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Later weight replaces the earlier one.
    #[default]
    Overwrite,
    /// Weights are summed.
    Accumulate,
    /// The first weight is kept, later rows are ignored.
    KeepFirst,
    /// A repeated pair fails the build.
    Reject,
}

impl DuplicatePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            DuplicatePolicy::Overwrite => "overwrite",
            DuplicatePolicy::Accumulate => "accumulate",
            DuplicatePolicy::KeepFirst => "keep-first",
            DuplicatePolicy::Reject => "reject",
        }
    }
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "overwrite" | "last" => Ok(DuplicatePolicy::Overwrite),
            "accumulate" | "sum" => Ok(DuplicatePolicy::Accumulate),
            "keep-first" | "first" => Ok(DuplicatePolicy::KeepFirst),
            "reject" | "error" => Ok(DuplicatePolicy::Reject),
            other => Err(Error::Config(format!("unknown duplicate policy '{other}'"))),
        }
    }
}

/// Counters collected while building a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    pub rows: usize,
    pub nodes: usize,
    pub edges: usize,
    /// Rows whose (source, target) pair was already present.
    pub duplicates: usize,
    pub self_loops: usize,
    pub negative_weights: usize,
}

impl std::fmt::Display for BuildStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BuildStats {{ rows: {}, nodes: {}, edges: {}, duplicates: {}, self_loops: {} }}",
            self.rows, self.nodes, self.edges, self.duplicates, self.self_loops,
        )
    }
}

/// Incremental builder for [`DiGraph`].
#[derive(Debug)]
pub struct GraphBuilder {
    policy: DuplicatePolicy,
    graph: DiGraph,
    stats: BuildStats,
}

impl GraphBuilder {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            graph: DiGraph::new(),
            stats: BuildStats::default(),
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Build a graph from every record of a loaded table, in row order.
    pub fn from_table(table: &EdgeTable, policy: DuplicatePolicy) -> Result<(DiGraph, BuildStats)> {
        let mut builder = Self::new(policy);
        builder.extend(table.records())?;
        Ok(builder.build())
    }

    /// Add a node that may have no edges.
    pub fn add_node(&mut self, key: impl Into<NodeKey>) -> Result<NodeId> {
        let key = key.into();
        let (id, new) = self.graph.intern(&key)?;
        if new {
            self.stats.nodes += 1;
        }
        Ok(id)
    }

    /// Insert or update the edge `record.source -> record.target`.
    pub fn add_record(&mut self, record: &EdgeRecord) -> Result<()> {
        let row = self.stats.rows;
        self.stats.rows += 1;

        if record.weight < 0.0 {
            self.stats.negative_weights += 1;
        }

        let src = self.add_node(record.source.clone())?;
        let dst = self.add_node(record.target.clone())?;

        let policy = self.policy;
        if let Some(edge) = self.graph.edge_mut(src, dst) {
            match policy {
                DuplicatePolicy::Overwrite => edge.weight = record.weight,
                DuplicatePolicy::Accumulate => edge.weight += record.weight,
                DuplicatePolicy::KeepFirst => {}
                DuplicatePolicy::Reject => {
                    return Err(Error::DuplicateEdge {
                        src: record.source.clone(),
                        dst: record.target.clone(),
                        row,
                    });
                }
            }
            self.stats.duplicates += 1;
            return Ok(());
        }

        self.graph.insert_edge(src, dst, record.weight)?;
        self.stats.edges += 1;
        if src == dst {
            self.stats.self_loops += 1;
        }
        Ok(())
    }

    pub fn extend<'a, I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a EdgeRecord>,
    {
        for record in records {
            self.add_record(record)?;
        }
        Ok(())
    }

    pub fn build(self) -> (DiGraph, BuildStats) {
        let stats = self.stats;
        if stats.duplicates > 0 {
            debug!(duplicates = stats.duplicates, policy = %self.policy, "collapsed repeated edges");
        }
        if stats.negative_weights > 0 {
            warn!(count = stats.negative_weights, "edge list contains negative weights");
        }
        debug!(%stats, "graph built");
        (self.graph, stats)
    }
}
