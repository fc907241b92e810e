//! JSON records. Input is a top-level array of objects or newline-delimited
//! objects; output is always a two-space indented array of objects.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::json::reader::infer_json_schema_from_iterator;
use arrow::json::writer::JsonArray;
use arrow::json::{ReaderBuilder, WriterBuilder};
use bytes::Bytes;
use serde_json::Value;

use super::{concat, text_for_null_columns, CodecError, TabularCodec};

const DECODE_BATCH_ROWS: usize = 1024;

pub struct JsonCodec;

impl TabularCodec for JsonCodec {
    fn decode(&self, bytes: Bytes) -> Result<RecordBatch, CodecError> {
        let records = parse_records(&bytes)?;
        let columns = first_seen_columns(&records);
        if columns.is_empty() {
            if records.is_empty() {
                return Ok(RecordBatch::new_empty(Arc::new(Schema::empty())));
            }
            return Err(CodecError::Invalid("records have no fields".to_string()));
        }

        let inferred = infer_json_schema_from_iterator(records.iter().map(Ok::<_, ArrowError>))?;
        let ordered = columns
            .iter()
            .map(|name| {
                let field = inferred.field_with_name(name)?;
                Ok(if needs_unsigned(&records, name) {
                    field.clone().with_data_type(DataType::UInt64)
                } else {
                    field.clone()
                })
            })
            .collect::<Result<Vec<Field>, ArrowError>>()?;
        let schema = text_for_null_columns(&Schema::new(ordered));

        let mut decoder = ReaderBuilder::new(schema.clone())
            .with_coerce_primitive(true)
            .build_decoder()?;
        let mut batches = Vec::new();
        for chunk in records.chunks(DECODE_BATCH_ROWS) {
            decoder.serialize(chunk)?;
            if let Some(batch) = decoder.flush()? {
                batches.push(batch);
            }
        }
        concat(&schema, &batches)
    }

    fn encode(&self, batch: &RecordBatch) -> Result<Vec<u8>, CodecError> {
        let mut compact = Vec::with_capacity(batch.get_array_memory_size());
        {
            let mut writer = WriterBuilder::new()
                .with_explicit_nulls(true)
                .build::<_, JsonArray>(&mut compact);
            writer.write(batch)?;
            writer.finish()?;
        }
        let records: Vec<Value> = if compact.is_empty() {
            Vec::new()
        } else {
            serde_json::from_slice(&compact)?
        };
        Ok(serde_json::to_vec_pretty(&records)?)
    }
}

fn parse_records(bytes: &[u8]) -> Result<Vec<Value>, CodecError> {
    let mut values = serde_json::Deserializer::from_slice(bytes).into_iter::<Value>();
    let records = match values.next().transpose()? {
        None => return Err(CodecError::Invalid("document is empty".to_string())),
        Some(Value::Array(items)) => {
            if values.next().is_some() {
                return Err(CodecError::Invalid(
                    "unexpected content after top-level array".to_string(),
                ));
            }
            items
        }
        Some(first @ Value::Object(_)) => std::iter::once(Ok(first))
            .chain(values)
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(CodecError::Invalid(format!(
                "expected an array of records, found {}",
                kind(&other)
            )))
        }
    };

    if let Some(position) = records.iter().position(|record| !record.is_object()) {
        return Err(CodecError::Invalid(format!(
            "record {position} is {}, expected an object",
            kind(&records[position])
        )));
    }
    Ok(records)
}

/// True when every value of `name` is a non-negative integer and at least one
/// is beyond `i64::MAX`. Inference would otherwise widen the column to a float
/// and round those values.
fn needs_unsigned(records: &[Value], name: &str) -> bool {
    let mut beyond_signed = false;
    for value in records.iter().filter_map(|record| record.get(name)) {
        match value {
            Value::Null => {}
            Value::Number(n) if n.as_u64().is_some() => {
                beyond_signed |= n.as_i64().is_none();
            }
            _ => return false,
        }
    }
    beyond_signed
}

/// Union of keys across records, in first-seen order.
fn first_seen_columns(records: &[Value]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for record in records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
