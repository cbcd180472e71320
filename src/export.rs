//! Degree table export — one CSV row per node.
//!
//! ```text
//! DiGraph + Degrees → export_degree_csv() → node,in_degree,out_degree,total_degree
//!   → spreadsheet, pandas, or another run of this tool
//! ```

use std::io::Write;

use crate::algo::Degrees;
use crate::graph::DiGraph;
use crate::model::NodeKey;
use crate::Result;

/// Write the per-node degree table as CSV, in node first-appearance order.
pub fn export_degree_csv(
    graph: &DiGraph,
    degrees: &Degrees,
    writer: &mut dyn Write,
) -> Result<()> {
    writeln!(writer, "node,in_degree,out_degree,total_degree")?;
    for (id, key) in graph.nodes() {
        writeln!(
            writer,
            "{},{},{},{}",
            format_key(key),
            degrees.in_degree.get(id),
            degrees.out_degree.get(id),
            degrees.total.get(id),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Format a node identifier as a CSV field, quoting when needed.
fn format_key(key: &NodeKey) -> String {
    match key {
        NodeKey::Int(i) => i.to_string(),
        NodeKey::Str(s) if s.contains([',', '"', '\n', '\r']) => {
            format!("\"{}\"", s.replace('"', "\"\""))
        }
        NodeKey::Str(s) => s.clone(),
    }
}
