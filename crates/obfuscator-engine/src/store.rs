//! Per-bucket object store resolution.
//!
//! [`BucketStores`] hands out an [`ObjectStore`] rooted at a bucket. The
//! engine reads through it and the trigger adapter writes through it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::ObjectStore;

/// Resolves a bucket name to an object store rooted at that bucket.
///
/// Implementations must be `Send + Sync` for use behind `Arc<dyn BucketStores>`.
pub trait BucketStores: Send + Sync {
    /// Open the store for `bucket`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error when the bucket cannot be opened.
    fn store(&self, bucket: &str) -> object_store::Result<Arc<dyn ObjectStore>>;
}

/// Amazon S3, configured from the standard `AWS_*` environment.
#[derive(Debug, Default, Clone)]
pub struct S3Stores;

impl BucketStores for S3Stores {
    fn store(&self, bucket: &str) -> object_store::Result<Arc<dyn ObjectStore>> {
        let s3 = AmazonS3Builder::from_env().with_bucket_name(bucket).build()?;
        Ok(Arc::new(s3))
    }
}

/// Local directories: bucket `b` is the directory `<root>/b`, which must exist.
#[derive(Debug, Clone)]
pub struct LocalStores {
    root: PathBuf,
}

impl LocalStores {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BucketStores for LocalStores {
    fn store(&self, bucket: &str) -> object_store::Result<Arc<dyn ObjectStore>> {
        let fs = LocalFileSystem::new_with_prefix(self.root.join(bucket))?;
        Ok(Arc::new(fs))
    }
}

/// In-memory buckets created on first use. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryStores {
    buckets: Mutex<HashMap<String, Arc<InMemory>>>,
}

impl InMemoryStores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BucketStores for InMemoryStores {
    fn store(&self, bucket: &str) -> object_store::Result<Arc<dyn ObjectStore>> {
        let mut buckets = self.buckets.lock().map_err(|_| object_store::Error::Generic {
            store: "InMemory",
            source: "bucket registry lock poisoned".into(),
        })?;
        let store = buckets
            .entry(bucket.to_string())
            .or_insert_with(|| Arc::new(InMemory::new()));
        Ok(Arc::clone(store) as Arc<dyn ObjectStore>)
    }
}
