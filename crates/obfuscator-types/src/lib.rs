//! Shared obfuscator types: source locators, format tags, masking
//! configuration, reports and the error model.
//!
//! This crate performs no I/O so both the engine and the trigger adapter
//! can depend on it.

pub mod config;
pub mod error;
pub mod locator;
pub mod report;

pub use config::{parse_column_list, ConfigError, MaskConfig};
pub use error::{ObfuscationError, Stage};
pub use locator::{Format, SourceLocator};
pub use report::{HandlerResponse, MaskReport};
