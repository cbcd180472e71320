//! Parquet edge source.
//!
//! Reads through the Arrow record-batch reader and projects only the three
//! schema columns, so wide tables (and pandas index columns) cost nothing.

use std::fs::File;
use std::path::{Path, PathBuf};

use ::parquet::arrow::ProjectionMask;
use ::parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::debug;

use crate::{Error, Result};
use super::{EdgeSchema, EdgeSource, EdgeTable, columns};

/// Apache Parquet file.
#[derive(Debug, Clone)]
pub struct ParquetSource {
    path: PathBuf,
    schema: EdgeSchema,
    batch_size: usize,
}

impl ParquetSource {
    pub fn new(path: impl Into<PathBuf>, schema: EdgeSchema) -> Self {
        Self {
            path: path.into(),
            schema,
            batch_size: 64 * 1024,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EdgeSource for ParquetSource {
    fn describe(&self) -> String {
        format!("parquet {}", self.path.display())
    }

    fn schema(&self) -> &EdgeSchema {
        &self.schema
    }

    fn load(&self) -> Result<EdgeTable> {
        let file = File::open(&self.path).map_err(|e| Error::data_access(&self.path, e))?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)
            .map_err(|e| Error::data_access(&self.path, e))?;

        let indices = columns::resolve_columns(builder.schema(), &self.schema)?;
        let num_rows = builder.metadata().file_metadata().num_rows().max(0) as usize;
        debug!(
            path = %self.path.display(),
            rows = num_rows,
            row_groups = builder.metadata().num_row_groups(),
            "opened parquet file"
        );

        let mask = ProjectionMask::roots(builder.parquet_schema(), indices);
        let reader = builder
            .with_projection(mask)
            .with_batch_size(self.batch_size)
            .build()
            .map_err(|e| Error::data_access(&self.path, e))?;

        let mut records = Vec::with_capacity(num_rows);
        for batch in reader {
            let batch = batch.map_err(|e| Error::data_access(&self.path, e))?;
            let offset = records.len();
            columns::append_records(&batch, &self.schema, offset, &mut records)?;
        }

        Ok(EdgeTable::new(self.schema.clone(), records))
    }
}
