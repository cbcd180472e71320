//! Degree assortativity of a directed graph.
//!
//! Every edge `u -> v` is one observation `(deg_x(u), deg_y(v))`. The
//! coefficient is the Pearson correlation of those pairs, optionally
//! weighted by the edge weight. Isolated nodes contribute no observations.
//!
//! Undefined results (no edges, zero total weight, zero variance on either
//! side) come back as `NaN`; they are not errors.

use serde::{Deserialize, Serialize};

use crate::graph::DiGraph;
use crate::model::DegreeKind;
use super::Degrees;

/// How much each edge counts as an observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationWeight {
    /// Each observation is weighted by its edge weight.
    #[default]
    EdgeWeight,
    /// Every edge counts once; degrees themselves stay weighted.
    Uniform,
}

impl std::fmt::Display for ObservationWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ObservationWeight::EdgeWeight => "edge-weight",
            ObservationWeight::Uniform => "uniform",
        })
    }
}

impl std::str::FromStr for ObservationWeight {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "edge-weight" | "edge" | "weight" | "weighted" => Ok(ObservationWeight::EdgeWeight),
            "uniform" | "unweighted" | "count" => Ok(ObservationWeight::Uniform),
            other => Err(crate::Error::Config(format!("unknown observation weighting '{other}'"))),
        }
    }
}

/// In/in and out/out assortativity of one graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assortativity {
    pub in_degree: f64,
    pub out_degree: f64,
}

impl Assortativity {
    pub fn compute(graph: &DiGraph, degrees: &Degrees, weighting: ObservationWeight) -> Self {
        Self {
            in_degree: degree_assortativity(graph, degrees, DegreeKind::In, DegreeKind::In, weighting),
            out_degree: degree_assortativity(graph, degrees, DegreeKind::Out, DegreeKind::Out, weighting),
        }
    }
}

/// `(x, y, weight)` for every edge, in edge order.
pub fn endpoint_observations(
    graph: &DiGraph,
    degrees: &Degrees,
    x: DegreeKind,
    y: DegreeKind,
    weighting: ObservationWeight,
) -> Vec<(f64, f64, f64)> {
    let dx = degrees.get(x);
    let dy = degrees.get(y);
    graph
        .edges()
        .iter()
        .map(|e| {
            let w = match weighting {
                ObservationWeight::EdgeWeight => e.weight,
                ObservationWeight::Uniform => 1.0,
            };
            (dx.get(e.src), dy.get(e.dst), w)
        })
        .collect()
}

/// Correlation between `x`-degree of edge sources and `y`-degree of edge
/// targets.
pub fn degree_assortativity(
    graph: &DiGraph,
    degrees: &Degrees,
    x: DegreeKind,
    y: DegreeKind,
    weighting: ObservationWeight,
) -> f64 {
    let observations = endpoint_observations(graph, degrees, x, y, weighting);
    let r = weighted_pearson(&observations);
    if r.is_nan() {
        tracing::warn!(%x, %y, edges = observations.len(), "assortativity undefined (no variance)");
    }
    r
}

/// Weighted Pearson correlation of `(x, y, weight)` triples.
///
/// Zero-weight observations are dropped before anything else. Returns
/// `NaN` when nothing is left, the total weight is not positive, or either
/// side is constant. With non-negative weights the result is clamped to
/// `[-1, 1]` to absorb rounding; negative weights can leave that range and
/// are returned unclamped, with a warning.
pub fn weighted_pearson(observations: &[(f64, f64, f64)]) -> f64 {
    let obs: Vec<(f64, f64, f64)> = observations.iter().copied().filter(|o| o.2 != 0.0).collect();
    let Some(&(x0, y0, _)) = obs.first() else {
        return f64::NAN;
    };

    let total: f64 = obs.iter().map(|o| o.2).sum();
    if !(total > 0.0) {
        return f64::NAN;
    }

    // Constant sides are checked exactly; the mean of a constant can drift
    // by an ulp and leave a spurious tiny variance behind.
    if obs.iter().all(|o| o.0 == x0) || obs.iter().all(|o| o.1 == y0) {
        return f64::NAN;
    }

    let mean_x = obs.iter().map(|&(x, _, w)| w * x).sum::<f64>() / total;
    let mean_y = obs.iter().map(|&(_, y, w)| w * y).sum::<f64>() / total;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y, w) in &obs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += w * dx * dy;
        var_x += w * dx * dx;
        var_y += w * dy * dy;
    }

    if !(var_x > 0.0 && var_y > 0.0) {
        return f64::NAN;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    if obs.iter().all(|o| o.2 > 0.0) {
        r.clamp(-1.0, 1.0)
    } else {
        if r.abs() > 1.0 {
            tracing::warn!(r, "negative weights pushed the correlation outside [-1, 1]");
        }
        r
    }
}
