//! Graph algorithms: weighted degrees and degree assortativity.
//!
//! Both are pure functions of a built [`DiGraph`](crate::graph::DiGraph).

pub mod degree;
pub mod assortativity;

pub use degree::{Degrees, DegreeMap, DegreeSummary, compute_degrees};
pub use assortativity::{
    Assortativity, ObservationWeight,
    degree_assortativity, endpoint_observations, weighted_pearson,
};
