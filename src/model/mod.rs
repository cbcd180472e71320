//! # Interaction Graph Model
//!
//! Plain DTOs shared by the loader, the graph builder and the algorithms.
//!
//! Design rule: NO Arrow types, NO Parquet types here.
//! This module is pure data — no I/O, no state.

pub mod node;
pub mod edge;

pub use node::{NodeKey, NodeId};
pub use edge::{EdgeRecord, Direction, DegreeKind};
