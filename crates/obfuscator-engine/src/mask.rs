//! Column masking.

use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, FieldRef, Schema};
use obfuscator_types::MaskReport;

/// Literal written into every cell of a masked column.
pub const MASK_TOKEN: &str = "*****";

/// Overwrite each listed column present in `batch` with [`MASK_TOKEN`].
///
/// Masked columns become text, keeping their nullability flag and field
/// metadata. Names absent from the batch are skipped. Row count, row order
/// and every other column are untouched.
#[must_use]
pub fn mask_columns(batch: &RecordBatch, column_names: &[String]) -> (RecordBatch, MaskReport) {
    let schema = batch.schema();
    let mut fields: Vec<FieldRef> = schema.fields().iter().cloned().collect();
    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    let mut report = MaskReport::default();
    let masked: ArrayRef = Arc::new(StringArray::from(vec![MASK_TOKEN; batch.num_rows()]));

    for name in column_names {
        if report.contains(name) {
            continue;
        }
        let positions: Vec<usize> = fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.name() == name)
            .map(|(idx, _)| idx)
            .collect();
        if positions.is_empty() {
            tracing::debug!(column = %name, "Column not present, skipping");
            continue;
        }
        for idx in positions {
            let original = &fields[idx];
            let replacement = Field::new(name, DataType::Utf8, original.is_nullable())
                .with_metadata(original.metadata().clone());
            fields[idx] = Arc::new(replacement);
            columns[idx] = Arc::clone(&masked);
        }
        tracing::info!(column = %name, "Obfuscated column");
        report.record(name);
    }

    if report.is_empty() {
        return (batch.clone(), report);
    }

    let schema = Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone()));
    let masked_batch = RecordBatch::try_new(schema, columns)
        .expect("masked columns have the batch row count");
    (masked_batch, report)
}
