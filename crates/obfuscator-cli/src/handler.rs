//! Trigger adapter: event in, masked object written, status record out.

use std::sync::Arc;

use obfuscator_engine::{object_path, transform, BucketStores};
use obfuscator_types::{HandlerResponse, MaskConfig, ObfuscationError, SourceLocator, Stage};
use serde_json::Value;

use crate::event::{destination_key, parse_event};

/// Failure of one handler invocation.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Obfuscation(#[from] ObfuscationError),

    #[error("failed to open bucket '{bucket}': {source}")]
    Store {
        bucket: String,
        #[source]
        source: object_store::Error,
    },

    #[error("failed to write {location}: {source}")]
    Destination {
        location: String,
        #[source]
        source: object_store::Error,
    },
}

impl HandlerError {
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Obfuscation(e) => e.stage(),
            Self::Store { .. } => Stage::Load,
            Self::Destination { .. } => Stage::Write,
        }
    }
}

/// Runs one obfuscation per event with a fixed configuration.
///
/// Holds no per-event state, so a single handler can serve concurrent events.
pub struct Handler {
    config: MaskConfig,
    stores: Arc<dyn BucketStores>,
}

impl Handler {
    #[must_use]
    pub fn new(config: MaskConfig, stores: Arc<dyn BucketStores>) -> Self {
        Self { config, stores }
    }

    /// Handle one object-created event.
    ///
    /// On success the result has been written to
    /// `<destination>/obfuscated/<key>`. On failure nothing is written and
    /// the error is returned unchanged after being logged.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] for a malformed event, any engine failure,
    /// or a failed destination write.
    pub async fn handle(&self, event: &Value) -> Result<HandlerResponse, HandlerError> {
        let locator = match parse_event(event) {
            Ok(locator) => locator,
            Err(err) => {
                let err = HandlerError::from(err);
                tracing::error!(stage = %err.stage(), "Obfuscator handler failed: {err}");
                return Err(err);
            }
        };

        let result = self.process(&locator).await;
        if let Err(err) = &result {
            tracing::error!(
                bucket = locator.bucket(),
                key = locator.key(),
                stage = %err.stage(),
                "Obfuscator handler failed: {err}"
            );
        }
        result
    }

    async fn process(&self, locator: &SourceLocator) -> Result<HandlerResponse, HandlerError> {
        tracing::info!(
            bucket = locator.bucket(),
            key = locator.key(),
            "Triggered for file"
        );
        tracing::info!(columns = ?self.config.column_names, "PII columns to obfuscate");

        let source = self.open(locator.bucket())?;
        let (bytes, report) =
            transform(source.as_ref(), locator, &self.config.column_names).await?;

        let bucket = &self.config.destination_bucket;
        let key = destination_key(locator.key());
        let location = format!("s3://{bucket}/{key}");
        let path = object_path(&key).map_err(|source| HandlerError::Destination {
            location: location.clone(),
            source,
        })?;
        let destination = self.open(bucket)?;
        destination
            .put(&path, bytes.into())
            .await
            .map_err(|source| HandlerError::Destination { location, source })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            masked = report.masked_column_count,
            "Saved obfuscated file"
        );
        Ok(HandlerResponse::saved(locator.key()))
    }

    fn open(&self, bucket: &str) -> Result<Arc<dyn object_store::ObjectStore>, HandlerError> {
        let store = self.stores.store(bucket).map_err(|source| HandlerError::Store {
            bucket: bucket.to_string(),
            source,
        })?;
        tracing::info!(bucket, "Created object store");
        Ok(store)
    }
}
