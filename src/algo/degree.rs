//! Weighted in-, out- and total degree.

use hashbrown::HashMap;
use serde::Serialize;

use crate::graph::DiGraph;
use crate::model::{DegreeKind, NodeId, NodeKey};

/// One degree value per node, indexed by `NodeId`.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeMap {
    kind: DegreeKind,
    values: Vec<f64>,
}

impl DegreeMap {
    fn from_graph(graph: &DiGraph, kind: DegreeKind) -> Self {
        let values: Vec<f64> = graph
            .nodes()
            .map(|(id, _)| graph.edges_of(id, kind.direction()).map(|e| e.weight).sum::<f64>())
            .collect();
        Self { kind, values }
    }

    pub fn kind(&self) -> DegreeKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Degree of `node`; 0 for ids outside the graph.
    pub fn get(&self, node: NodeId) -> f64 {
        self.values.get(node.index()).copied().unwrap_or(0.0)
    }

    /// Degree of the node with identifier `key`.
    pub fn lookup(&self, graph: &DiGraph, key: &NodeKey) -> Option<f64> {
        graph.node_id(key).map(|id| self.get(id))
    }

    /// Values in `NodeId` order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// `(identifier, degree)` pairs in node order.
    pub fn iter<'g>(&'g self, graph: &'g DiGraph) -> impl Iterator<Item = (&'g NodeKey, f64)> + 'g {
        graph.nodes().map(move |(id, key)| (key, self.get(id)))
    }

    pub fn to_map(&self, graph: &DiGraph) -> HashMap<NodeKey, f64> {
        self.iter(graph).map(|(k, v)| (k.clone(), v)).collect()
    }

    /// The `k` highest-degree nodes; ties go to the node seen first.
    pub fn top(&self, graph: &DiGraph, k: usize) -> Vec<(NodeKey, f64)> {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by(|&a, &b| self.values[b].total_cmp(&self.values[a]).then(a.cmp(&b)));
        order
            .into_iter()
            .take(k)
            .filter_map(|i| {
                graph.node_key(NodeId(i as u32)).map(|key| (key.clone(), self.values[i]))
            })
            .collect()
    }

    pub fn summary(&self) -> DegreeSummary {
        let count = self.values.len();
        let sum = self.sum();
        let min = self.values.iter().copied().reduce(f64::min);
        let max = self.values.iter().copied().reduce(f64::max);
        DegreeSummary {
            kind: self.kind,
            count,
            sum,
            min,
            max,
            mean: (count > 0).then(|| sum / count as f64),
        }
    }
}

/// Aggregate figures for one degree kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeSummary {
    pub kind: DegreeKind,
    pub count: usize,
    pub sum: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

/// In-, out- and total degree for every node of a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Degrees {
    pub in_degree: DegreeMap,
    pub out_degree: DegreeMap,
    pub total: DegreeMap,
}

impl Degrees {
    pub fn get(&self, kind: DegreeKind) -> &DegreeMap {
        match kind {
            DegreeKind::In => &self.in_degree,
            DegreeKind::Out => &self.out_degree,
            DegreeKind::Total => &self.total,
        }
    }
}

/// Compute weighted degrees. A self-loop adds its weight to both the in-
/// and the out-degree of its node.
pub fn compute_degrees(graph: &DiGraph) -> Degrees {
    let in_degree = DegreeMap::from_graph(graph, DegreeKind::In);
    let out_degree = DegreeMap::from_graph(graph, DegreeKind::Out);
    let total = DegreeMap {
        kind: DegreeKind::Total,
        values: in_degree
            .values
            .iter()
            .zip(&out_degree.values)
            .map(|(i, o)| i + o)
            .collect(),
    };
    Degrees { in_degree, out_degree, total }
}
