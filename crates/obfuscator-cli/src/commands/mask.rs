use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use obfuscator_engine::obfuscate_bytes;
use obfuscator_types::Format;

/// Execute the `mask` command: obfuscate a local file into `output`.
///
/// The format comes from the input's extension, exactly as for stored objects.
pub fn execute(input: &Path, output: &Path, columns: &[String]) -> Result<()> {
    let extension = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let format = Format::from_extension(extension)?;

    let bytes = std::fs::read(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let bytes_read = bytes.len() as u64;
    let (result, report) = obfuscate_bytes(format, Bytes::from(bytes), columns)?;
    std::fs::write(output, &result)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    println!("Obfuscated '{}' ({format}).", input.display());
    println!("  Columns masked:  {}", report.masked_column_count);
    if !report.is_empty() {
        println!("    {}", report.masked_column_names.join(", "));
    }
    println!("  Bytes read:      {}", format_bytes(bytes_read));
    println!("  Bytes written:   {}", format_bytes(result.len() as u64));
    println!("  Output:          {}", output.display());

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}
