//! Source object locator and the closed set of supported formats.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ObfuscationError;

// ---------------------------------------------------------------------------
// SourceLocator
// ---------------------------------------------------------------------------

/// Identifies one object in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocator {
    bucket: String,
    key: String,
}

impl SourceLocator {
    /// Create a locator for `key` inside `bucket`.
    #[must_use]
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Lowercased text after the last `.` of the key.
    ///
    /// Keys without a `.` yield an empty extension, which no format accepts.
    #[must_use]
    pub fn extension(&self) -> String {
        self.key
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// Resolve the format tag from the key's extension.
    ///
    /// # Errors
    ///
    /// Returns [`ObfuscationError::UnsupportedFormat`] for any extension
    /// outside `csv`, `json` and `parquet`.
    pub fn format(&self) -> Result<Format, ObfuscationError> {
        Format::from_extension(&self.extension())
    }

    /// `s3://bucket/key` form used in logs and diagnostics.
    #[must_use]
    pub fn uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

/// Tabular format of a source object, selected once from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Csv,
    Json,
    Parquet,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Csv, Format::Json, Format::Parquet];

    /// Map an extension to a format tag. Matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ObfuscationError::UnsupportedFormat`] carrying the extension
    /// as given.
    pub fn from_extension(extension: &str) -> Result<Self, ObfuscationError> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "parquet" => Ok(Self::Parquet),
            _ => Err(ObfuscationError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Parquet => "parquet",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
