pub mod extract;
pub mod info;
pub mod split;

#[cfg(test)]
mod fixtures;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Writes an icon file, creating nothing but the file itself.
pub fn write_icon(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write icon: {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote icon");
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "icons".to_owned())
}
