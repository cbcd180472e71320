//! # Edge Sources
//!
//! Everything that turns a file (or an in-memory list) into a typed
//! [`EdgeTable`]. `EdgeSource` is the seam between the loader and the rest
//! of the crate.
//!
//! ## Implementations
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `MemorySource` | `memory` | Records held in memory, for tests/embedding |
//! | `CsvSource` | `csv` | Header-first CSV, schema inferred by Arrow |
//! | `ParquetSource` | `parquet` | Parquet via the Arrow reader (feature `parquet`) |

pub mod columns;
pub mod csv;
pub mod memory;
#[cfg(feature = "parquet")]
pub mod parquet;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::EdgeRecord;
use crate::{Error, Result};

pub use self::csv::CsvSource;
pub use memory::MemorySource;
#[cfg(feature = "parquet")]
pub use self::parquet::ParquetSource;

// ============================================================================
// Schema
// ============================================================================

/// Column names of the three required fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSchema {
    pub source: String,
    pub target: String,
    pub weight: String,
}

impl Default for EdgeSchema {
    fn default() -> Self {
        Self {
            source: "ID_CommunityIdentity_Source".into(),
            target: "ID_CommunityIdentity_Target".into(),
            weight: "weight_total".into(),
        }
    }
}

impl EdgeSchema {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: weight.into(),
        }
    }

    /// `(role, column name)` in source, target, weight order.
    pub fn roles(&self) -> [(&'static str, &str); 3] {
        [
            ("source", self.source.as_str()),
            ("target", self.target.as_str()),
            ("weight", self.weight.as_str()),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        for (role, name) in self.roles() {
            if name.trim().is_empty() {
                return Err(Error::Config(format!("{role} column name is empty")));
            }
        }
        if self.source == self.target {
            return Err(Error::Config(format!(
                "source and target columns are both '{}'", self.source
            )));
        }
        if self.weight == self.source || self.weight == self.target {
            return Err(Error::Config(format!(
                "weight column '{}' doubles as an identifier column", self.weight
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Loaded table
// ============================================================================

/// Typed edge list in file row order.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeTable {
    schema: EdgeSchema,
    records: Vec<EdgeRecord>,
}

impl EdgeTable {
    pub fn new(schema: EdgeSchema, records: Vec<EdgeRecord>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> &EdgeSchema {
        &self.schema
    }

    pub fn records(&self) -> &[EdgeRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EdgeRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Shape and first rows, for a quick look after loading.
    pub fn summary(&self, head: usize) -> TableSummary {
        TableSummary {
            rows: self.records.len(),
            columns: self.schema.roles().iter().map(|(_, c)| c.to_string()).collect(),
            head: self.records.iter().take(head).cloned().collect(),
        }
    }
}

/// Row count, column names and a preview of the loaded table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    pub head: Vec<EdgeRecord>,
}

impl std::fmt::Display for TableSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "shape: ({}, {})", self.rows, self.columns.len())?;
        writeln!(f, "{}", self.columns.join("\t"))?;
        for r in &self.head {
            writeln!(f, "{}\t{}\t{}", r.source, r.target, r.weight)?;
        }
        Ok(())
    }
}

// ============================================================================
// Source trait + configuration
// ============================================================================

/// Anything that can produce an [`EdgeTable`].
pub trait EdgeSource {
    /// Short human-readable description for logs.
    fn describe(&self) -> String;

    /// Column names this source reads.
    fn schema(&self) -> &EdgeSchema;

    /// Read and validate the whole edge list.
    fn load(&self) -> Result<EdgeTable>;
}

/// On-disk format of an edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Parquet,
    Csv,
}

impl SourceFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("parquet") | Some("pq") => Ok(SourceFormat::Parquet),
            Some("csv") => Ok(SourceFormat::Csv),
            _ => Err(Error::Config(format!(
                "cannot infer input format from '{}'; use .parquet or .csv or set the format explicitly",
                path.display()
            ))),
        }
    }
}

impl std::str::FromStr for SourceFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "parquet" | "pq" => Ok(SourceFormat::Parquet),
            "csv" => Ok(SourceFormat::Csv),
            other => Err(Error::Config(format!("unknown input format '{other}'"))),
        }
    }
}

/// Which source to open.
#[derive(Debug, Clone)]
pub enum SourceConfig {
    /// Records already in memory
    Memory(Vec<EdgeRecord>),

    /// Comma-separated file with a header row
    Csv { path: PathBuf, delimiter: u8 },

    /// Apache Parquet file
    #[cfg(feature = "parquet")]
    Parquet { path: PathBuf, batch_size: usize },
}

impl SourceConfig {
    /// Choose a file source for `path`, from `format` or the extension.
    pub fn from_path(path: impl Into<PathBuf>, format: Option<SourceFormat>) -> Result<Self> {
        let path = path.into();
        let format = match format {
            Some(f) => f,
            None => SourceFormat::from_path(&path)?,
        };
        match format {
            SourceFormat::Csv => Ok(SourceConfig::Csv { path, delimiter: b',' }),
            #[cfg(feature = "parquet")]
            SourceFormat::Parquet => Ok(SourceConfig::Parquet { path, batch_size: 64 * 1024 }),
            #[cfg(not(feature = "parquet"))]
            SourceFormat::Parquet => Err(Error::Config(format!(
                "'{}' is a parquet file but this build has no parquet support",
                path.display()
            ))),
        }
    }

    pub fn open(self, schema: EdgeSchema) -> Box<dyn EdgeSource> {
        match self {
            SourceConfig::Memory(records) => Box::new(MemorySource::with_schema(records, schema)),
            SourceConfig::Csv { path, delimiter } => {
                Box::new(CsvSource::new(path, schema).with_delimiter(delimiter))
            }
            #[cfg(feature = "parquet")]
            SourceConfig::Parquet { path, batch_size } => {
                Box::new(ParquetSource::new(path, schema).with_batch_size(batch_size))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schema_names() {
        let schema = EdgeSchema::default();
        assert_eq!(schema.source, "ID_CommunityIdentity_Source");
        assert_eq!(schema.target, "ID_CommunityIdentity_Target");
        assert_eq!(schema.weight, "weight_total");
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_schema_validation() {
        assert!(EdgeSchema::new("a", "a", "w").validate().is_err());
        assert!(EdgeSchema::new("a", "b", "a").validate().is_err());
        assert!(EdgeSchema::new("", "b", "w").validate().is_err());
        assert!(EdgeSchema::new("a", "b", "w").validate().is_ok());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("x/edges.parquet")).unwrap(), SourceFormat::Parquet);
        assert_eq!(SourceFormat::from_path(Path::new("edges.CSV")).unwrap(), SourceFormat::Csv);
        assert!(SourceFormat::from_path(Path::new("edges")).is_err());
        assert!(SourceFormat::from_path(Path::new("edges.json")).is_err());
    }

    #[test]
    fn test_summary_preview() {
        let table = EdgeTable::new(
            EdgeSchema::default(),
            (0..10).map(|i| EdgeRecord::new(i as i64, (i + 1) as i64, 1.0)).collect(),
        );
        let summary = table.summary(5);
        assert_eq!(summary.rows, 10);
        assert_eq!(summary.columns.len(), 3);
        assert_eq!(summary.head.len(), 5);
        assert!(summary.to_string().starts_with("shape: (10, 3)"));
    }
}
