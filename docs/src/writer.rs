//! Writes generated markdown and JSON files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

/// Writes a markdown document, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn write_markdown(path: &Path, content: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write markdown: {}", path.display()))?;
    debug!(path = %path.display(), bytes = content.len(), "wrote markdown");
    Ok(())
}

/// Serializes `value` as pretty-printed JSON to the given path.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize JSON for {}", path.display()))?;
    fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write JSON: {}", path.display()))?;
    debug!(path = %path.display(), "wrote json");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}
