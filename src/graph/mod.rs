//! # Directed Weighted Graph
//!
//! `DiGraph` holds at most one edge per ordered (source, target) pair.
//! Nodes are interned in first-appearance order and addressed by `NodeId`;
//! edges keep their insertion order so every pass over the graph is
//! deterministic.
//!
//! Build one with [`GraphBuilder`]; the graph itself is read-only.

pub mod builder;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::{Direction, NodeId, NodeKey};
use crate::{Error, Result};

pub use builder::{BuildStats, DuplicatePolicy, GraphBuilder};

/// Position of an edge in `DiGraph::edges()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub u32);

/// A directed edge between two interned nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub src: NodeId,
    pub dst: NodeId,
    pub weight: f64,
}

impl Edge {
    /// The "other" end of the edge from the given node.
    pub fn other_node(&self, from: NodeId) -> Option<NodeId> {
        if from == self.src { Some(self.dst) }
        else if from == self.dst { Some(self.src) }
        else { None }
    }

    pub fn is_self_loop(&self) -> bool {
        self.src == self.dst
    }
}

type AdjList = SmallVec<[EdgeId; 4]>;

/// Directed graph with one weight per ordered node pair.
#[derive(Debug, Clone, Default)]
pub struct DiGraph {
    keys: Vec<NodeKey>,
    index: HashMap<NodeKey, NodeId>,
    edges: Vec<Edge>,
    /// (src, dst) → edge
    pairs: HashMap<(NodeId, NodeId), EdgeId>,
    outgoing: Vec<AdjList>,
    incoming: Vec<AdjList>,
}

impl DiGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.keys.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Nodes in first-appearance order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = (NodeId, &NodeKey)> + '_ {
        self.keys.iter().enumerate().map(|(i, k)| (NodeId(i as u32), k))
    }

    pub fn node_key(&self, id: NodeId) -> Option<&NodeKey> {
        self.keys.get(id.index())
    }

    pub fn node_id(&self, key: &NodeKey) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    pub fn contains_node(&self, key: &NodeKey) -> bool {
        self.index.contains_key(key)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, src: NodeId, dst: NodeId) -> Option<&Edge> {
        self.pairs.get(&(src, dst)).map(|e| &self.edges[e.0 as usize])
    }

    /// Weight of the edge `src -> dst`, looked up by user identifier.
    pub fn edge_weight(&self, src: &NodeKey, dst: &NodeKey) -> Option<f64> {
        let s = self.node_id(src)?;
        let d = self.node_id(dst)?;
        self.edge(s, d).map(|e| e.weight)
    }

    /// Edges touching `node` in the given direction.
    ///
    /// With `Direction::Both` a self-loop is yielded twice, once as an
    /// outgoing and once as an incoming edge.
    pub fn edges_of(&self, node: NodeId, dir: Direction) -> impl Iterator<Item = &Edge> + '_ {
        let empty: &[EdgeId] = &[];
        let out = match dir {
            Direction::Outgoing | Direction::Both => self.outgoing.get(node.index()).map_or(empty, |a| a.as_slice()),
            Direction::Incoming => empty,
        };
        let inc = match dir {
            Direction::Incoming | Direction::Both => self.incoming.get(node.index()).map_or(empty, |a| a.as_slice()),
            Direction::Outgoing => empty,
        };
        out.iter().chain(inc.iter()).map(move |e| &self.edges[e.0 as usize])
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    // ========================================================================
    // Mutation (builder only)
    // ========================================================================

    /// Intern `key`, returning its id and whether it was new.
    pub(crate) fn intern(&mut self, key: &NodeKey) -> Result<(NodeId, bool)> {
        if let Some(&id) = self.index.get(key) {
            return Ok((id, false));
        }
        let id = NodeId(dense_index(self.keys.len(), "nodes")?);
        self.keys.push(key.clone());
        self.index.insert(key.clone(), id);
        self.outgoing.push(AdjList::new());
        self.incoming.push(AdjList::new());
        Ok((id, true))
    }

    pub(crate) fn edge_mut(&mut self, src: NodeId, dst: NodeId) -> Option<&mut Edge> {
        let id = *self.pairs.get(&(src, dst))?;
        self.edges.get_mut(id.0 as usize)
    }

    pub(crate) fn insert_edge(&mut self, src: NodeId, dst: NodeId, weight: f64) -> Result<EdgeId> {
        let id = EdgeId(dense_index(self.edges.len(), "edges")?);
        self.edges.push(Edge { id, src, dst, weight });
        self.pairs.insert((src, dst), id);
        self.outgoing[src.index()].push(id);
        self.incoming[dst.index()].push(id);
        Ok(id)
    }
}

/// Ids are `u32`; the next one is the current length.
fn dense_index(len: usize, what: &'static str) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::Capacity {
        what,
        limit: u64::from(u32::MAX) + 1,
    })
}
