//! In-memory tabular frame owned by one transformation call.

use arrow::array::{ArrayRef, RecordBatch};
use bytes::Bytes;
use obfuscator_types::{Format, MaskReport, ObfuscationError};

use crate::codec::codec_for;
use crate::mask::mask_columns;

/// Column-oriented table loaded from one source object.
///
/// Created by [`TabularFrame::load`], rewritten by [`TabularFrame::mask`]
/// and consumed by [`TabularFrame::serialize`].
#[derive(Debug, Clone)]
pub struct TabularFrame {
    format: Format,
    batch: RecordBatch,
}

impl TabularFrame {
    /// Parse `bytes` as `format`.
    ///
    /// # Errors
    ///
    /// Returns [`ObfuscationError::MalformedSource`] with the parser's
    /// diagnostic when the content is empty or cannot be interpreted.
    pub fn load(format: Format, bytes: Bytes) -> Result<Self, ObfuscationError> {
        if bytes.is_empty() {
            return Err(ObfuscationError::MalformedSource {
                format,
                reason: "object is empty".to_string(),
            });
        }
        let batch = codec_for(format)
            .decode(bytes)
            .map_err(|e| ObfuscationError::MalformedSource {
                format,
                reason: e.to_string(),
            })?;
        Ok(Self { format, batch })
    }

    /// Wrap an existing batch, e.g. one built in memory.
    #[must_use]
    pub fn from_batch(format: Format, batch: RecordBatch) -> Self {
        Self { format, batch }
    }

    #[must_use]
    pub fn format(&self) -> Format {
        self.format
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    #[must_use]
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Replace the contents of every listed column that exists with the mask token.
    pub fn mask(&mut self, column_names: &[String]) -> MaskReport {
        let (masked, report) = mask_columns(&self.batch, column_names);
        self.batch = masked;
        report
    }

    /// Render the frame in the format it was loaded from.
    ///
    /// # Errors
    ///
    /// Returns [`ObfuscationError::SerializationFailure`] if the writer rejects the frame.
    pub fn serialize(self) -> Result<Bytes, ObfuscationError> {
        codec_for(self.format)
            .encode(&self.batch)
            .map(Bytes::from)
            .map_err(|e| ObfuscationError::SerializationFailure {
                format: self.format,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MASK_TOKEN;
    use arrow::array::{Array, StringArray};
    use rstest::rstest;

    #[rstest]
    #[case(Format::Csv)]
    #[case(Format::Json)]
    #[case(Format::Parquet)]
    fn empty_object_is_malformed(#[case] format: Format) {
        let err = TabularFrame::load(format, Bytes::new()).unwrap_err();
        assert_eq!(
            err,
            ObfuscationError::MalformedSource {
                format,
                reason: "object is empty".to_string()
            }
        );
    }

    #[test]
    fn load_mask_serialize_csv() {
        let source = Bytes::from_static(b"student_id,name,email_address\n1,Jane Doe,jane@x.com\n");
        let mut frame = TabularFrame::load(Format::Csv, source).unwrap();
        assert_eq!(frame.column_names(), vec!["student_id", "name", "email_address"]);

        let report = frame.mask(&["name".to_string(), "email_address".to_string()]);
        assert_eq!(report.masked_column_count, 2);
        let names = frame
            .column("name")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(names.value(0), MASK_TOKEN);

        let out = frame.serialize().unwrap();
        assert_eq!(
            std::str::from_utf8(&out).unwrap(),
            "student_id,name,email_address\n1,*****,*****\n"
        );
    }

    #[test]
    fn malformed_csv_reports_format_and_reason() {
        let err = TabularFrame::load(
            Format::Csv,
            Bytes::from_static(b"This is not a valid CSV content, bc it lacks structure!"),
        )
        .unwrap_err();
        match err {
            ObfuscationError::MalformedSource { format, reason } => {
                assert_eq!(format, Format::Csv);
                assert!(!reason.is_empty());
            }
            other => panic!("expected MalformedSource, got {other:?}"),
        }
    }

    #[test]
    fn serialize_does_not_alias_input() {
        let source = Bytes::from_static(b"a,b\n1,2\n");
        let frame = TabularFrame::load(Format::Csv, source.clone()).unwrap();
        let out = frame.serialize().unwrap();
        assert_eq!(out, source);
        assert_ne!(out.as_ptr(), source.as_ptr());
    }

    #[test]
    fn nested_json_values_cannot_be_written_as_csv() {
        let json = Bytes::from_static(br#"[{"id": 1, "tags": ["a", "b"]}]"#);
        let frame = TabularFrame::load(Format::Json, json).unwrap();
        let err = TabularFrame::from_batch(Format::Csv, frame.batch().clone())
            .serialize()
            .unwrap_err();
        assert!(matches!(
            err,
            ObfuscationError::SerializationFailure {
                format: Format::Csv,
                ..
            }
        ));
    }
}
