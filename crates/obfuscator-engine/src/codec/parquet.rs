//! Parquet, read with its embedded schema and written with the frame's types.

use ::parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use ::parquet::arrow::ArrowWriter;
use arrow::array::RecordBatch;
use bytes::Bytes;

use super::{concat, CodecError, TabularCodec};

pub struct ParquetCodec;

impl TabularCodec for ParquetCodec {
    fn decode(&self, bytes: Bytes) -> Result<RecordBatch, CodecError> {
        let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)?;
        let schema = builder.schema().clone();
        let reader = builder.build()?;
        let batches = reader.collect::<Result<Vec<_>, _>>()?;
        concat(&schema, &batches)
    }

    fn encode(&self, batch: &RecordBatch) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::with_capacity(batch.get_array_memory_size());
        let mut writer = ArrowWriter::try_new(&mut buf, batch.schema(), None)?;
        writer.write(batch)?;
        writer.close()?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn sample() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, true),
            Field::new("score", DataType::Float64, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec![Some("alice"), None])),
                Arc::new(Float64Array::from(vec![1.5, 2.5])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn decode_keeps_schema_order_and_types() {
        let bytes = ParquetCodec.encode(&sample()).unwrap();
        let batch = ParquetCodec.decode(Bytes::from(bytes)).unwrap();
        assert_eq!(batch.num_rows(), 2);
        let schema = batch.schema();
        assert_eq!(schema.field(0).name(), "id");
        assert_eq!(schema.field(0).data_type(), &DataType::Int64);
        assert_eq!(schema.field(1).name(), "name");
        assert_eq!(schema.field(2).data_type(), &DataType::Float64);
        assert_eq!(batch.columns(), sample().columns());
    }

    #[test]
    fn encode_is_deterministic() {
        let first = ParquetCodec.encode(&sample()).unwrap();
        let second = ParquetCodec.encode(&sample()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = ParquetCodec
            .decode(Bytes::from_static(b"definitely not parquet"))
            .unwrap_err();
        assert!(matches!(err, CodecError::Parquet(_)), "got: {err:?}");
    }
}
