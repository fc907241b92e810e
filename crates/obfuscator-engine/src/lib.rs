//! Transformation engine for the PII obfuscator.
//!
//! One call takes a source locator and a list of column names, reads the
//! object once, loads it as a [`TabularFrame`], overwrites the target columns
//! with [`MASK_TOKEN`] and renders the frame back to its original format.
//! Nothing is cached or shared between calls.

pub mod codec;
pub mod frame;
pub mod mask;
pub mod orchestrator;
pub mod source;
pub mod store;

pub use frame::TabularFrame;
pub use mask::MASK_TOKEN;
pub use orchestrator::{obfuscate_bytes, transform};
pub use source::object_path;
pub use store::{BucketStores, InMemoryStores, LocalStores, S3Stores};
