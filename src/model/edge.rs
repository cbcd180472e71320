//! Edge records and degree direction.

use serde::{Deserialize, Serialize};
use super::NodeKey;

/// One row of the input edge list: a directed, weighted interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeKey,
    pub target: NodeKey,
    pub weight: f64,
}

impl EdgeRecord {
    pub fn new(source: impl Into<NodeKey>, target: impl Into<NodeKey>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Adjacency direction relative to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

/// Which weighted degree to read for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeKind {
    In,
    Out,
    Total,
}

impl DegreeKind {
    pub const ALL: [DegreeKind; 3] = [DegreeKind::In, DegreeKind::Out, DegreeKind::Total];

    /// The adjacency direction whose edge weights make up this degree.
    pub fn direction(self) -> Direction {
        match self {
            DegreeKind::In => Direction::Incoming,
            DegreeKind::Out => Direction::Outgoing,
            DegreeKind::Total => Direction::Both,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DegreeKind::In => "in",
            DegreeKind::Out => "out",
            DegreeKind::Total => "total",
        }
    }
}

impl std::fmt::Display for DegreeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DegreeKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "in" => Ok(DegreeKind::In),
            "out" => Ok(DegreeKind::Out),
            "total" | "both" => Ok(DegreeKind::Total),
            other => Err(crate::Error::Config(format!("unknown degree kind '{other}'"))),
        }
    }
}
