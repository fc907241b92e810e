//! Resolve → load → mask → serialize.
//!
//! Any stage failing aborts the call; the caller sees either a complete
//! buffer or an error, never a partial result.

use bytes::Bytes;
use object_store::ObjectStore;
use obfuscator_types::{Format, MaskReport, ObfuscationError, SourceLocator};

use crate::frame::TabularFrame;
use crate::source;

/// Mask `column_names` in an already fetched object of the given format.
///
/// Pure and synchronous: no I/O, no shared state. The returned buffer is
/// freshly allocated and never aliases `bytes`.
///
/// # Errors
///
/// Returns [`ObfuscationError::MalformedSource`] or
/// [`ObfuscationError::SerializationFailure`].
pub fn obfuscate_bytes(
    format: Format,
    bytes: Bytes,
    column_names: &[String],
) -> Result<(Bytes, MaskReport), ObfuscationError> {
    let mut frame = TabularFrame::load(format, bytes)?;
    tracing::info!(
        format = %format,
        rows = frame.num_rows(),
        columns = frame.num_columns(),
        "Successfully read source"
    );

    let report = frame.mask(column_names);
    if report.is_empty() {
        tracing::warn!("No PII columns found to obfuscate.");
    }

    let output = frame.serialize()?;
    tracing::info!(
        format = %format,
        bytes = output.len(),
        "Successfully obfuscated {} fields.",
        report.masked_column_count
    );
    Ok((output, report))
}

/// Transform the object at `locator`, read from `store`.
///
/// The format is resolved from the key before any read, so unsupported
/// extensions never touch the store. Exactly one read happens on the happy
/// path and nothing is written.
///
/// # Errors
///
/// Returns the [`ObfuscationError`] of the first failing stage, after
/// logging it with the source bucket, key and stage.
pub async fn transform(
    store: &dyn ObjectStore,
    locator: &SourceLocator,
    column_names: &[String],
) -> Result<(Bytes, MaskReport), ObfuscationError> {
    let result = async {
        let format = locator.format()?;
        let bytes = source::fetch(store, locator).await?;
        obfuscate_bytes(format, bytes, column_names)
    }
    .await;

    if let Err(err) = &result {
        tracing::error!(
            bucket = locator.bucket(),
            key = locator.key(),
            stage = %err.stage(),
            "Obfuscation failed: {err}"
        );
    }
    result
}
