//! Masking configuration: destination bucket and target column list.
//!
//! The process environment surface is `DESTINATION_BUCKET` and
//! `PII_FIELDS` (comma-separated). Both are read once into a [`MaskConfig`]
//! value that is passed explicitly from then on.

use serde::{Deserialize, Serialize};

pub const DESTINATION_BUCKET_ENV: &str = "DESTINATION_BUCKET";
pub const PII_FIELDS_ENV: &str = "PII_FIELDS";

/// Configuration errors raised before any event is processed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("setting {0} must not be empty")]
    Empty(&'static str),
}

/// Where results go and which columns get masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskConfig {
    pub destination_bucket: String,
    pub column_names: Vec<String>,
}

impl MaskConfig {
    /// Build a config from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Empty`] when the destination is blank.
    pub fn new(
        destination_bucket: impl Into<String>,
        column_names: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let destination_bucket = destination_bucket.into();
        if destination_bucket.trim().is_empty() {
            return Err(ConfigError::Empty(DESTINATION_BUCKET_ENV));
        }
        Ok(Self {
            destination_bucket,
            column_names,
        })
    }

    /// Read `DESTINATION_BUCKET` and `PII_FIELDS` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `DESTINATION_BUCKET` is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`MaskConfig::from_env`] with a caller-supplied lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination setting is missing or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let destination =
            lookup(DESTINATION_BUCKET_ENV).ok_or(ConfigError::Missing(DESTINATION_BUCKET_ENV))?;
        let columns = lookup(PII_FIELDS_ENV)
            .map(|raw| parse_column_list(&raw))
            .unwrap_or_default();
        Self::new(destination, columns)
    }
}

/// Split a comma-separated column list.
///
/// Entries are trimmed and empty entries dropped, so `""` yields an empty list.
#[must_use]
pub fn parse_column_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
