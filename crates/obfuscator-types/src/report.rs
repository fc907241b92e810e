//! Result records returned to callers.

use serde::{Deserialize, Serialize};

/// Columns actually masked during one invocation, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskReport {
    pub masked_column_count: usize,
    pub masked_column_names: Vec<String>,
}

impl MaskReport {
    /// Record `name` as masked. Repeated names are counted once.
    pub fn record(&mut self, name: &str) {
        if self.contains(name) {
            return;
        }
        self.masked_column_names.push(name.to_string());
        self.masked_column_count = self.masked_column_names.len();
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.masked_column_names.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masked_column_count == 0
    }
}

/// Status record handed back to the event-delivery layer on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    pub status: u16,
    pub message: String,
}

impl HandlerResponse {
    pub const OK: u16 = 200;

    #[must_use]
    pub fn saved(key: &str) -> Self {
        Self {
            status: Self::OK,
            message: format!("File {key} successfully obfuscated and saved."),
        }
    }
}
