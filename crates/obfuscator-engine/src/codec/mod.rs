//! Per-format load and serialize adapters.
//!
//! Each [`Format`] maps to exactly one [`TabularCodec`]; the mapping lives in
//! [`codec_for`] and is the single place a new format gets wired in.

mod csv;
mod json;
mod parquet;

use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use bytes::Bytes;
use obfuscator_types::Format;

pub use self::csv::CsvCodec;
pub use self::json::JsonCodec;
pub use self::parquet::ParquetCodec;

/// Failure inside a codec. Classified into load or serialize errors by the frame.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Arrow(#[from] ArrowError),

    #[error(transparent)]
    Parquet(#[from] ::parquet::errors::ParquetError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

/// Loader/serializer pair for one format.
pub trait TabularCodec: Send + Sync {
    /// Parse `bytes` into a single record batch.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] when the content cannot be interpreted.
    fn decode(&self, bytes: Bytes) -> Result<RecordBatch, CodecError>;

    /// Render `batch` into a fresh buffer.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] when the batch cannot be written.
    fn encode(&self, batch: &RecordBatch) -> Result<Vec<u8>, CodecError>;
}

#[must_use]
pub fn codec_for(format: Format) -> &'static dyn TabularCodec {
    match format {
        Format::Csv => &CsvCodec,
        Format::Json => &JsonCodec,
        Format::Parquet => &ParquetCodec,
    }
}

/// Replace inferred `Null`-typed columns (every value empty) with nullable text.
pub(crate) fn text_for_null_columns(schema: &Schema) -> SchemaRef {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|field| {
            if field.data_type() == &DataType::Null {
                Field::new(field.name(), DataType::Utf8, true)
            } else {
                field.as_ref().clone()
            }
        })
        .collect();
    Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone()))
}

/// Concatenate decoded batches, producing an empty batch when there are none.
pub(crate) fn concat(schema: &SchemaRef, batches: &[RecordBatch]) -> Result<RecordBatch, CodecError> {
    if batches.is_empty() {
        return Ok(RecordBatch::new_empty(Arc::clone(schema)));
    }
    Ok(arrow::compute::concat_batches(schema, batches)?)
}
