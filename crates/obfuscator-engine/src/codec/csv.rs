//! CSV with a header row. Column types are inferred from the data.

use std::io::Cursor;

use arrow::array::RecordBatch;
use arrow::csv::reader::Format as CsvFormat;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use bytes::Bytes;

use super::{concat, text_for_null_columns, CodecError, TabularCodec};

pub struct CsvCodec;

impl TabularCodec for CsvCodec {
    fn decode(&self, bytes: Bytes) -> Result<RecordBatch, CodecError> {
        let (inferred, _) = CsvFormat::default()
            .with_header(true)
            .infer_schema(Cursor::new(bytes.as_ref()), None)?;
        if inferred.fields().is_empty() {
            return Err(CodecError::Invalid("missing header row".to_string()));
        }
        let schema = text_for_null_columns(&inferred);

        let reader = ReaderBuilder::new(schema.clone())
            .with_header(true)
            .build(Cursor::new(bytes.as_ref()))?;
        let batches = reader.collect::<Result<Vec<_>, _>>()?;
        let batch = concat(&schema, &batches)?;

        // A lone line of text parses as a header with no records.
        if batch.num_rows() == 0 {
            return Err(CodecError::Invalid(
                "no data rows after header".to_string(),
            ));
        }
        Ok(batch)
    }

    fn encode(&self, batch: &RecordBatch) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::with_capacity(batch.get_array_memory_size());
        {
            let mut writer = WriterBuilder::new().with_header(true).build(&mut buf);
            writer.write(batch)?;
        }
        Ok(buf)
    }
}
