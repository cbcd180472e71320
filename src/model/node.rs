//! Node identifiers.

use serde::{Deserialize, Serialize};

/// Opaque user identifier as it appears in the input table.
///
/// Integer and string identifiers live in separate key spaces: `Int(7)` and
/// `Str("7")` are different nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    Int(i64),
    Str(String),
}

impl NodeKey {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            NodeKey::Int(i) => Some(*i),
            NodeKey::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeKey::Str(s) => Some(s),
            NodeKey::Int(_) => None,
        }
    }
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKey::Int(i) => write!(f, "{i}"),
            NodeKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(i: i64) -> Self { NodeKey::Int(i) }
}

impl From<i32> for NodeKey {
    fn from(i: i32) -> Self { NodeKey::Int(i as i64) }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self { NodeKey::Str(s.to_string()) }
}

impl From<String> for NodeKey {
    fn from(s: String) -> Self { NodeKey::Str(s) }
}

/// Dense node index, assigned in first-appearance order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
