//! Analysis configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "duplicates": "accumulate", "schema": { "weight": "weight_votes" } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algo::ObservationWeight;
use crate::graph::DuplicatePolicy;
use crate::source::{EdgeSchema, SourceFormat};
use crate::{Error, Result};

/// Knobs for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Column names of the edge list.
    pub schema: EdgeSchema,
    /// Input format; `None` picks it from the file extension.
    pub format: Option<SourceFormat>,
    /// What to do with repeated (source, target) pairs.
    pub duplicates: DuplicatePolicy,
    /// How edges count as assortativity observations.
    pub weighting: ObservationWeight,
    /// Nodes listed per degree kind in the report.
    pub top: usize,
    /// Rows shown in the debug preview of the loaded table.
    pub preview_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            schema: EdgeSchema::default(),
            format: None,
            duplicates: DuplicatePolicy::Overwrite,
            weighting: ObservationWeight::EdgeWeight,
            top: 0,
            preview_rows: 5,
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.schema.validate()
    }
}
