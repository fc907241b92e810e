//! Error model for one obfuscation invocation.
//!
//! [`ObfuscationError`] is a closed set of terminal failure kinds. Callers
//! match on the variant; a few message texts are kept stable because
//! existing callers match on them (`Unsupported format: <ext>`,
//! `No files Found on: <uri>`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::locator::Format;

/// Pipeline stage at which a failure surfaced. Used for log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Event,
    Resolve,
    Load,
    Serialize,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Event => "event",
            Self::Resolve => "resolve",
            Self::Load => "load",
            Self::Serialize => "serialize",
            Self::Write => "write",
        };
        f.write_str(s)
    }
}

/// Terminal failure of an obfuscation invocation.
///
/// None of the kinds is retried inside the core; whether to re-run the whole
/// invocation is the host's decision.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObfuscationError {
    /// The trigger event lacks a required field.
    #[error("Malformed event: missing {pointer}")]
    MalformedEvent { pointer: String },

    /// The object's extension is not one of the supported formats.
    #[error("Unsupported format: {extension}")]
    UnsupportedFormat { extension: String },

    /// The source object does not exist or could not be read.
    #[error("No files Found on: {location} ({detail})")]
    SourceNotFound { location: String, detail: String },

    /// The source bytes could not be parsed as the resolved format.
    #[error("Malformed {format} source: {reason}")]
    MalformedSource { format: Format, reason: String },

    /// The masked frame could not be rendered back to its format.
    #[error("Failed to serialize {format} output: {reason}")]
    SerializationFailure { format: Format, reason: String },
}

impl ObfuscationError {
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::MalformedEvent { .. } => Stage::Event,
            Self::UnsupportedFormat { .. } => Stage::Resolve,
            Self::SourceNotFound { .. } | Self::MalformedSource { .. } => Stage::Load,
            Self::SerializationFailure { .. } => Stage::Serialize,
        }
    }

    /// Always `false`: every kind is terminal for the invocation.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_message_is_stable() {
        let err = ObfuscationError::UnsupportedFormat {
            extension: "txt".into(),
        };
        assert_eq!(err.to_string(), "Unsupported format: txt");
        assert_eq!(err.stage(), Stage::Resolve);
    }

    #[test]
    fn source_not_found_mentions_no_files_found() {
        let err = ObfuscationError::SourceNotFound {
            location: "s3://bucket/non_existent_file.csv".into(),
            detail: "object not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("No files Found"), "got: {msg}");
        assert!(msg.contains("s3://bucket/non_existent_file.csv"), "got: {msg}");
        assert_eq!(err.stage(), Stage::Load);
    }

    #[test]
    fn malformed_source_carries_parser_diagnostic() {
        let err = ObfuscationError::MalformedSource {
            format: Format::Csv,
            reason: "incorrect number of fields".into(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed csv source: incorrect number of fields"
        );
    }

    #[test]
    fn no_kind_is_retryable() {
        let errors = [
            ObfuscationError::MalformedEvent {
                pointer: "/detail/bucket/name".into(),
            },
            ObfuscationError::UnsupportedFormat {
                extension: "txt".into(),
            },
            ObfuscationError::SerializationFailure {
                format: Format::Parquet,
                reason: "x".into(),
            },
        ];
        assert!(errors.iter().all(|e| !e.is_retryable()));
        assert_eq!(errors[0].stage(), Stage::Event);
        assert_eq!(errors[2].stage(), Stage::Serialize);
    }
}
