use std::sync::Arc;

use arrow::array::{Array, Int64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use bytes::Bytes;
use obfuscator_engine::{obfuscate_bytes, TabularFrame, MASK_TOKEN};
use obfuscator_types::Format;
use parquet::arrow::ArrowWriter;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Row {
    a: String,
    b: String,
    c: i64,
}

fn rows() -> impl Strategy<Value = Vec<Row>> {
    // The `x` prefix keeps text columns from being inferred as numbers or booleans.
    prop::collection::vec(
        ("x[a-z]{0,7}", "x[a-z]{0,7}", any::<i64>()).prop_map(|(a, b, c)| Row { a, b, c }),
        1..40,
    )
}

fn encode(format: Format, rows: &[Row]) -> Bytes {
    match format {
        Format::Csv => {
            let mut text = String::from("a,b,c\n");
            for row in rows {
                text.push_str(&format!("{},{},{}\n", row.a, row.b, row.c));
            }
            Bytes::from(text)
        }
        Format::Json => {
            let records: Vec<_> = rows
                .iter()
                .map(|row| serde_json::json!({ "a": row.a, "b": row.b, "c": row.c }))
                .collect();
            Bytes::from(serde_json::to_vec(&records).unwrap())
        }
        Format::Parquet => {
            let schema = Arc::new(Schema::new(vec![
                Field::new("a", DataType::Utf8, false),
                Field::new("b", DataType::Utf8, false),
                Field::new("c", DataType::Int64, false),
            ]));
            let batch = RecordBatch::try_new(
                schema.clone(),
                vec![
                    Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.a.as_str()))),
                    Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.b.as_str()))),
                    Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.c))),
                ],
            )
            .unwrap();
            let mut buf = Vec::new();
            let mut writer = ArrowWriter::try_new(&mut buf, schema, None).unwrap();
            writer.write(&batch).unwrap();
            writer.close().unwrap();
            Bytes::from(buf)
        }
    }
}

fn format_strategy() -> impl Strategy<Value = Format> {
    prop_oneof![Just(Format::Csv), Just(Format::Json), Just(Format::Parquet)]
}

proptest! {
    #[test]
    fn masking_a_column_round_trips(format in format_strategy(), rows in rows()) {
        let source = encode(format, &rows);
        let (out, report) = obfuscate_bytes(format, source.clone(), &["a".to_string()]).unwrap();
        prop_assert_eq!(report.masked_column_count, 1);

        let original = TabularFrame::load(format, source).unwrap();
        let masked = TabularFrame::load(format, out).unwrap();

        prop_assert_eq!(masked.num_rows(), rows.len());
        prop_assert_eq!(masked.column_names(), original.column_names());

        let a = masked.column("a").unwrap().as_any().downcast_ref::<StringArray>().unwrap();
        prop_assert!((0..a.len()).all(|i| a.value(i) == MASK_TOKEN));
        prop_assert_eq!(masked.column("b"), original.column("b"));
        prop_assert_eq!(masked.column("c"), original.column("c"));
    }

    #[test]
    fn unknown_columns_leave_content_unchanged(format in format_strategy(), rows in rows()) {
        let source = encode(format, &rows);
        let (out, report) =
            obfuscate_bytes(format, source.clone(), &["zz".to_string(), "yy".to_string()]).unwrap();
        prop_assert_eq!(report.masked_column_count, 0);

        let original = TabularFrame::load(format, source).unwrap();
        let unchanged = TabularFrame::load(format, out).unwrap();
        prop_assert_eq!(unchanged.batch().columns(), original.batch().columns());
    }

    #[test]
    fn obfuscation_is_idempotent(format in format_strategy(), rows in rows()) {
        let source = encode(format, &rows);
        let columns = ["b".to_string(), "c".to_string()];
        let (first, _) = obfuscate_bytes(format, source.clone(), &columns).unwrap();
        let (second, _) = obfuscate_bytes(format, source, &columns).unwrap();
        prop_assert_eq!(first, second);
    }
}
