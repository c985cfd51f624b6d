use arrow::array::{Array, ArrayRef, Float64Array, UInt64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::InputError;

fn column_as(
    name: &str,
    record_batch: &RecordBatch,
    data_type: &DataType,
) -> Result<ArrayRef, InputError> {
    let column = record_batch
        .column_by_name(name)
        .ok_or_else(|| InputError::MissingColumn(name.to_string()))?;
    // Values that do not fit the target type become nulls in the cast.
    let column = cast(column, data_type)?;
    if column.null_count() > 0 {
        return Err(InputError::NullValues(name.to_string()));
    }
    Ok(column)
}

pub(crate) fn read_u64_column(
    name: &str,
    record_batch: &RecordBatch,
) -> Result<Vec<u64>, InputError> {
    let column = column_as(name, record_batch, &DataType::UInt64)?;
    match column.as_any().downcast_ref::<UInt64Array>() {
        Some(values) => Ok(values.values().to_vec()),
        None => Err(InputError::MissingColumn(name.to_string())),
    }
}

pub(crate) fn read_f64_column(
    name: &str,
    record_batch: &RecordBatch,
) -> Result<Vec<f64>, InputError> {
    let column = column_as(name, record_batch, &DataType::Float64)?;
    match column.as_any().downcast_ref::<Float64Array>() {
        Some(values) => Ok(values.values().to_vec()),
        None => Err(InputError::MissingColumn(name.to_string())),
    }
}
