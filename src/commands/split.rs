use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use pe_icon_util::IcoContainer;

use super::{ensure_dir, file_stem, write_icon};

/// Splits an `.ico` file into `<stem>-{j}.ico`. Returns the process exit code.
pub fn run(file: &Path, out: Option<&Path>) -> Result<i32> {
    let data = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let icon = IcoContainer::parse(data)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let parts = icon
        .split()
        .with_context(|| format!("Failed to split {}", file.display()))?;

    let out_dir = out
        .or_else(|| file.parent())
        .unwrap_or_else(|| Path::new("."));
    ensure_dir(out_dir)?;

    let stem = file_stem(file);
    for (j, part) in parts.iter().enumerate() {
        write_icon(&out_dir.join(format!("{stem}-{j}.ico")), part.as_bytes())?;
    }
    println!(
        "{}",
        format!("Split {} into {} icons.", file.display(), parts.len()).green()
    );
    Ok(0)
}
