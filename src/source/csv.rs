//! CSV edge source.
//!
//! The header row names the columns. The weight column's type is inferred
//! by Arrow over the whole file; identifier columns are always read as text
//! so a token's spelling is its identity. A token that is the canonical
//! decimal form of an `i64` (`7`, `-12`, not `007` or `+7`) becomes
//! [`NodeKey::Int`], matching integer columns from Parquet; anything else
//! stays [`NodeKey::Str`].

use std::fs::File;
use std::io::Seek;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use tracing::debug;

use crate::model::NodeKey;
use crate::{Error, Result};
use super::{EdgeSchema, EdgeSource, EdgeTable, columns};

/// Header-first CSV file.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    schema: EdgeSchema,
    delimiter: u8,
    batch_size: usize,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>, schema: EdgeSchema) -> Self {
        Self {
            path: path.into(),
            schema,
            delimiter: b',',
            batch_size: 8192,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EdgeSource for CsvSource {
    fn describe(&self) -> String {
        format!("csv {}", self.path.display())
    }

    fn schema(&self) -> &EdgeSchema {
        &self.schema
    }

    fn load(&self) -> Result<EdgeTable> {
        let mut file = File::open(&self.path).map_err(|e| Error::data_access(&self.path, e))?;

        let format = Format::default()
            .with_header(true)
            .with_delimiter(self.delimiter);
        let (inferred, scanned) = format
            .infer_schema(&mut file, None)
            .map_err(|e| Error::data_access(&self.path, e))?;
        file.rewind().map_err(|e| Error::data_access(&self.path, e))?;
        debug!(path = %self.path.display(), rows = scanned, "inferred csv schema");

        let inferred = pin_column_types(&inferred, &self.schema);
        let indices = columns::resolve_columns(&inferred, &self.schema)?;
        let mut projection = indices.to_vec();
        projection.sort_unstable();

        let reader = ReaderBuilder::new(Arc::new(inferred))
            .with_format(format)
            .with_batch_size(self.batch_size)
            .with_projection(projection)
            .build(file)
            .map_err(|e| Error::data_access(&self.path, e))?;

        let mut records = Vec::with_capacity(scanned);
        for batch in reader {
            let batch = batch.map_err(|e| Error::data_access(&self.path, e))?;
            let offset = records.len();
            columns::append_records(&batch, &self.schema, offset, &mut records)?;
        }
        for record in &mut records {
            canonicalize(&mut record.source);
            canonicalize(&mut record.target);
        }

        Ok(EdgeTable::new(self.schema.clone(), records))
    }
}

/// Read identifiers as text, and give a weight column with no values
/// (header-only file) a numeric type.
fn pin_column_types(inferred: &Schema, schema: &EdgeSchema) -> Schema {
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|field| {
            let name = field.name();
            let field = field.as_ref().clone();
            if *name == schema.source || *name == schema.target {
                field.with_data_type(DataType::Utf8)
            } else if *name == schema.weight && *field.data_type() == DataType::Null {
                field.with_data_type(DataType::Float64)
            } else {
                field
            }
        })
        .collect();
    Schema::new_with_metadata(fields, inferred.metadata().clone())
}

fn canonicalize(key: &mut NodeKey) {
    if let NodeKey::Str(token) = key {
        if let Ok(n) = token.parse::<i64>() {
            if n.to_string() == *token {
                *key = NodeKey::Int(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::model::{EdgeRecord, NodeKey};
    use super::*;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_csv_default_schema() {
        let file = write_csv(
            "ID_CommunityIdentity_Source,ID_CommunityIdentity_Target,weight_total,extra\n\
             1,2,3,x\n\
             2,3,1.5,y\n",
        );
        let table = CsvSource::new(file.path(), EdgeSchema::default()).load().unwrap();
        assert_eq!(
            table.records(),
            &[EdgeRecord::new(1i64, 2i64, 3.0), EdgeRecord::new(2i64, 3i64, 1.5)]
        );
    }

    #[test]
    fn test_load_csv_string_ids_and_delimiter() {
        let file = write_csv("s;t;w\nada;bob;1\nbob;ada;2\n");
        let table = CsvSource::new(file.path(), EdgeSchema::new("s", "t", "w"))
            .with_delimiter(b';')
            .load()
            .unwrap();
        assert_eq!(table.records()[0].source, NodeKey::from("ada"));
        assert_eq!(table.records()[1].weight, 2.0);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let file = write_csv("s,t\n1,2\n");
        let err = CsvSource::new(file.path(), EdgeSchema::new("s", "t", "w")).load().unwrap_err();
        assert!(matches!(err, Error::Schema(_)), "got {err:?}");
    }

    #[test]
    fn test_missing_file_is_data_access_error() {
        let err = CsvSource::new("/definitely/not/here.csv", EdgeSchema::default())
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::DataAccess { .. }), "got {err:?}");
    }

    #[test]
    fn test_header_only_file_is_empty_table() {
        let file = write_csv("ID_CommunityIdentity_Source,ID_CommunityIdentity_Target,weight_total\n");
        let table = CsvSource::new(file.path(), EdgeSchema::default()).load().unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_header_only_file_still_checks_columns() {
        let file = write_csv("s,t\n");
        let err = CsvSource::new(file.path(), EdgeSchema::new("s", "t", "w")).load().unwrap_err();
        assert!(matches!(err, Error::Schema(_)), "got {err:?}");
    }

    #[test]
    fn test_ids_keep_their_spelling() {
        let file = write_csv("s,t,w\n007,7,1\n7,8,1\n+8,-0,2\n");
        let table = CsvSource::new(file.path(), EdgeSchema::new("s", "t", "w")).load().unwrap();
        assert_eq!(
            table.records(),
            &[
                EdgeRecord::new("007", 7i64, 1.0),
                EdgeRecord::new(7i64, 8i64, 1.0),
                EdgeRecord::new("+8", "-0", 2.0),
            ]
        );
    }

    #[test]
    fn test_mixed_id_column() {
        let file = write_csv("s,t,w\n1,ada,1\nbob,-2,1\n");
        let table = CsvSource::new(file.path(), EdgeSchema::new("s", "t", "w")).load().unwrap();
        assert_eq!(table.records()[0], EdgeRecord::new(1i64, "ada", 1.0));
        assert_eq!(table.records()[1], EdgeRecord::new("bob", -2i64, 1.0));
    }

    #[test]
    fn test_batches_keep_row_offsets() {
        let mut contents = String::from("s,t,w\n");
        for i in 0..25 {
            contents.push_str(&format!("{i},{},1\n", i + 1));
        }
        let file = write_csv(&contents);
        let table = CsvSource::new(file.path(), EdgeSchema::new("s", "t", "w"))
            .with_batch_size(7)
            .load()
            .unwrap();
        assert_eq!(table.len(), 25);
        assert_eq!(table.records()[24], EdgeRecord::new(24i64, 25i64, 1.0));
    }
}
