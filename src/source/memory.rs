//! In-memory edge source.
//!
//! The reference implementation of `EdgeSource`: records are handed over
//! directly, no decoding happens. Used by tests and by callers that already
//! hold typed rows.

use crate::model::EdgeRecord;
use crate::Result;
use super::{EdgeSchema, EdgeSource, EdgeTable};

/// Edge records kept in a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    schema: EdgeSchema,
    records: Vec<EdgeRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<EdgeRecord>) -> Self {
        Self::with_schema(records, EdgeSchema::default())
    }

    pub fn with_schema(records: Vec<EdgeRecord>, schema: EdgeSchema) -> Self {
        Self { schema, records }
    }

    pub fn push(&mut self, record: EdgeRecord) {
        self.records.push(record);
    }
}

impl FromIterator<EdgeRecord> for MemorySource {
    fn from_iter<I: IntoIterator<Item = EdgeRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl EdgeSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} rows)", self.records.len())
    }

    fn schema(&self) -> &EdgeSchema {
        &self.schema
    }

    fn load(&self) -> Result<EdgeTable> {
        Ok(EdgeTable::new(self.schema.clone(), self.records.clone()))
    }
}
