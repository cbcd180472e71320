//! Rendering an [`AnalysisReport`] for people (text) or machines (JSON).

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::pipeline::AnalysisReport;
use crate::{Error, Result};

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::Config(format!("unknown output format '{other}'"))),
        }
    }
}

/// Write `report` in the requested format.
pub fn write_report(report: &AnalysisReport, format: OutputFormat, writer: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(report, writer),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writeln!(writer)?;
            Ok(())
        }
    }
}

fn write_text(report: &AnalysisReport, w: &mut dyn Write) -> Result<()> {
    let b = &report.build;
    writeln!(w, "Source: {}", report.source)?;
    writeln!(
        w,
        "Rows: {}  Nodes: {}  Edges: {}  Duplicates: {} ({})  Self-loops: {}",
        b.rows, b.nodes, b.edges, b.duplicates, report.duplicates, b.self_loops,
    )?;
    writeln!(w)?;

    writeln!(w, "{:<8} {:>14} {:>14} {:>14} {:>16}", "degree", "min", "max", "mean", "sum")?;
    for s in &report.degree_summary {
        writeln!(
            w,
            "{:<8} {:>14} {:>14} {:>14} {:>16}",
            s.kind.as_str(),
            format_opt(s.min),
            format_opt(s.max),
            format_opt(s.mean),
            format_float(s.sum),
        )?;
    }

    for top in &report.top_nodes {
        writeln!(w)?;
        writeln!(w, "Top {} by {}-degree:", top.nodes.len(), top.kind)?;
        for (rank, (key, value)) in top.nodes.iter().enumerate() {
            writeln!(w, "  {:>3}. {:<24} {}", rank + 1, key.to_string(), format_float(*value))?;
        }
    }

    writeln!(w)?;
    writeln!(w, "Observation weighting: {}", report.weighting)?;
    writeln!(w, "In-degree assortativity: {}", format_coefficient(report.assortativity.in_degree))?;
    writeln!(w, "Out-degree assortativity: {}", format_coefficient(report.assortativity.out_degree))?;
    Ok(())
}

fn format_float(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.4}")
    }
}

fn format_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), format_float)
}

/// Full precision, or `NaN (undefined)` when there is no variance.
fn format_coefficient(r: f64) -> String {
    if r.is_nan() {
        "NaN (undefined)".to_string()
    } else {
        r.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::model::EdgeRecord;
    use crate::pipeline::Analysis;
    use crate::source::MemorySource;

    fn report(top: usize) -> AnalysisReport {
        let source: MemorySource = vec![
            EdgeRecord::new("A", "B", 2.0),
            EdgeRecord::new("B", "C", 3.0),
            EdgeRecord::new("C", "A", 1.0),
            EdgeRecord::new("A", "C", 0.5),
        ]
        .into_iter()
        .collect();
        let config = AnalysisConfig { top, ..AnalysisConfig::default() };
        Analysis::new(config).unwrap().run_source(&source).unwrap()
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_float(3.0), "3");
        assert_eq!(format_float(2.5), "2.5000");
        assert_eq!(format_opt(None), "-");
        assert_eq!(format_coefficient(f64::NAN), "NaN (undefined)");
        assert_eq!(format_coefficient(-0.25), "-0.25");
    }

    #[test]
    fn test_text_report_lines() {
        let mut buf = Vec::new();
        write_report(&report(2), OutputFormat::Text, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Source: memory (4 rows)"));
        assert!(text.contains("Nodes: 3  Edges: 4"));
        assert!(text.contains("Top 2 by total-degree:"));
        assert!(text.lines().any(|l| l.starts_with("In-degree assortativity: ")));
        assert!(text.lines().any(|l| l.starts_with("Out-degree assortativity: ")));
    }

    #[test]
    fn test_json_report_parses() {
        let mut buf = Vec::new();
        write_report(&report(0), OutputFormat::Json, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["build"]["edges"], 4);
        assert_eq!(value["degree_summary"][2]["kind"], "total");
        assert!(value.get("top_nodes").is_none());
        assert!(value["assortativity"]["in_degree"].is_number());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
