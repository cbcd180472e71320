//! Arrow column decoding: record batches → typed [`EdgeRecord`]s.
//!
//! Both file sources funnel through here so CSV and Parquet accept exactly
//! the same column types.

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::{CastOptions, cast_with_options};
use arrow::datatypes::{DataType, Float64Type, Int64Type, Schema};
use arrow::record_batch::RecordBatch;

use crate::model::{EdgeRecord, NodeKey};
use crate::{Error, Result};
use super::EdgeSchema;

/// How an identifier column is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdKind {
    Integer,
    /// Floats holding whole numbers, as written for nullable integer ids.
    Float,
    Text,
}

fn id_kind(dt: &DataType) -> Option<IdKind> {
    match dt {
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64
        | DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => Some(IdKind::Integer),
        DataType::Float16 | DataType::Float32 | DataType::Float64 => Some(IdKind::Float),
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => Some(IdKind::Text),
        DataType::Dictionary(_, value) => id_kind(value),
        _ => None,
    }
}

fn is_weight_type(dt: &DataType) -> bool {
    match dt {
        DataType::Dictionary(_, value) => is_weight_type(value),
        DataType::Decimal128(..) | DataType::Decimal256(..) => true,
        other => other.is_numeric(),
    }
}

/// Locate the three schema columns and check their types.
///
/// Returns the field indices in source, target, weight order.
pub fn resolve_columns(arrow: &Schema, schema: &EdgeSchema) -> Result<[usize; 3]> {
    let mut indices = [0usize; 3];
    for (slot, (role, name)) in schema.roles().into_iter().enumerate() {
        let idx = arrow.index_of(name).map_err(|_| {
            let found: Vec<&str> = arrow.fields().iter().map(|f| f.name().as_str()).collect();
            Error::Schema(format!(
                "missing {role} column '{name}' (found: {})",
                found.join(", ")
            ))
        })?;
        let dt = arrow.field(idx).data_type();
        let supported = if role == "weight" { is_weight_type(dt) } else { id_kind(dt).is_some() };
        if !supported {
            return Err(Error::Schema(format!(
                "{role} column '{name}' has unsupported type {dt}"
            )));
        }
        indices[slot] = idx;
    }
    Ok(indices)
}

/// Decode one batch and append its rows to `out`.
///
/// `row_offset` is the file row of the batch's first row, used in error
/// messages.
pub fn append_records(
    batch: &RecordBatch,
    schema: &EdgeSchema,
    row_offset: usize,
    out: &mut Vec<EdgeRecord>,
) -> Result<()> {
    let sources = id_values(column(batch, &schema.source)?, &schema.source, row_offset)?;
    let targets = id_values(column(batch, &schema.target)?, &schema.target, row_offset)?;
    let weights = weight_values(column(batch, &schema.weight)?, &schema.weight, row_offset)?;

    out.reserve(batch.num_rows());
    out.extend(
        sources
            .into_iter()
            .zip(targets)
            .zip(weights)
            .map(|((source, target), weight)| EdgeRecord { source, target, weight }),
    );
    Ok(())
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| Error::Schema(format!("column '{name}' missing from record batch")))
}

fn reject_nulls(array: &ArrayRef, column: &str, row_offset: usize) -> Result<()> {
    if array.null_count() == 0 {
        return Ok(());
    }
    let row = (0..array.len()).find(|&i| array.is_null(i)).unwrap_or(0);
    Err(Error::NullValue {
        column: column.to_string(),
        row: row_offset + row,
    })
}

fn strict_cast(array: &ArrayRef, to: &DataType, column: &str) -> Result<ArrayRef> {
    let options = CastOptions { safe: false, ..Default::default() };
    cast_with_options(array, to, &options)
        .map_err(|e| Error::Schema(format!("column '{column}': {e}")))
}

fn id_values(array: &ArrayRef, column: &str, row_offset: usize) -> Result<Vec<NodeKey>> {
    reject_nulls(array, column, row_offset)?;
    let kind = id_kind(array.data_type()).ok_or_else(|| {
        Error::Schema(format!("column '{column}' has unsupported type {}", array.data_type()))
    })?;

    match kind {
        IdKind::Integer => {
            let ints = strict_cast(array, &DataType::Int64, column)?;
            Ok(ints.as_primitive::<Int64Type>().values().iter().map(|&v| NodeKey::Int(v)).collect())
        }
        IdKind::Float => {
            let floats = strict_cast(array, &DataType::Float64, column)?;
            floats
                .as_primitive::<Float64Type>()
                .values()
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    // i64::MAX as f64 rounds up to 2^63, which is out of range.
                    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                        Ok(NodeKey::Int(v as i64))
                    } else {
                        Err(Error::Schema(format!(
                            "column '{column}' row {}: identifier {v} is not a whole number",
                            row_offset + i
                        )))
                    }
                })
                .collect()
        }
        IdKind::Text => {
            let strings = strict_cast(array, &DataType::Utf8, column)?;
            let strings = strings.as_string::<i32>();
            Ok((0..strings.len()).map(|i| NodeKey::Str(strings.value(i).to_string())).collect())
        }
    }
}

fn weight_values(array: &ArrayRef, column: &str, row_offset: usize) -> Result<Vec<f64>> {
    reject_nulls(array, column, row_offset)?;
    if !is_weight_type(array.data_type()) {
        return Err(Error::Schema(format!(
            "column '{column}' has unsupported type {}", array.data_type()
        )));
    }
    let floats = strict_cast(array, &DataType::Float64, column)?;
    Ok(floats.as_primitive::<Float64Type>().values().to_vec())
}
