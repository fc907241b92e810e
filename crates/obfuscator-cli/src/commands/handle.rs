use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use obfuscator_engine::BucketStores;
use obfuscator_types::MaskConfig;
use serde_json::Value;

use crate::handler::Handler;

/// Execute the `handle` command: run the trigger adapter for one event document.
///
/// `event_path` of `-` reads the event from stdin. The status record is
/// printed to stdout as JSON.
pub async fn execute(
    event_path: &Path,
    config: MaskConfig,
    stores: Arc<dyn BucketStores>,
) -> Result<()> {
    let raw = read_event(event_path)?;
    let event: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse event JSON: {}", event_path.display()))?;

    tracing::info!(
        destination = %config.destination_bucket,
        columns = config.column_names.len(),
        "Handler configured"
    );

    let handler = Handler::new(config, stores);
    let response = handler.handle(&event).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn read_event(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read event from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file: {}", path.display()))
}
