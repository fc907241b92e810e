//! The single read against the source location.

use bytes::Bytes;
use object_store::path::Path;
use object_store::ObjectStore;
use obfuscator_types::{ObfuscationError, SourceLocator};

/// Object path for a bucket key, taken verbatim.
///
/// Characters such as `#`, `[` or `~` are legal in bucket keys and must reach
/// the store unchanged, so the key is parsed rather than percent-encoded.
///
/// # Errors
///
/// Fails when the key has an empty segment, a `.`/`..` segment, or a control
/// character.
pub fn object_path(key: &str) -> object_store::Result<Path> {
    Ok(Path::parse(key)?)
}

/// Fetch the full object at `locator` from `store`.
///
/// `store` is the object store for `locator.bucket()`; the key is resolved
/// relative to it.
///
/// # Errors
///
/// Returns [`ObfuscationError::SourceNotFound`] when the store reports the
/// object missing or the read fails.
pub async fn fetch(store: &dyn ObjectStore, locator: &SourceLocator) -> Result<Bytes, ObfuscationError> {
    let path = object_path(locator.key()).map_err(|err| ObfuscationError::SourceNotFound {
        location: locator.uri(),
        detail: err.to_string(),
    })?;
    let not_found = |err: object_store::Error| {
        let detail = match &err {
            object_store::Error::NotFound { .. } => "object does not exist".to_string(),
            other => other.to_string(),
        };
        ObfuscationError::SourceNotFound {
            location: locator.uri(),
            detail,
        }
    };

    let result = store.get(&path).await.map_err(not_found)?;
    let bytes = result.bytes().await.map_err(not_found)?;
    tracing::debug!(
        bucket = locator.bucket(),
        key = locator.key(),
        bytes = bytes.len(),
        "Fetched source object"
    );
    Ok(bytes)
}
