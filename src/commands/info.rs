use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use pe_icon_util::{GroupIconDirectory, IcoContainer, ResourceProvider, PE};

/// Prints the images of an `.ico` file or the icon groups of a PE. Returns the process exit code.
pub fn run(file: &Path) -> Result<i32> {
    let data = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    if data.starts_with(b"MZ") {
        pe_info(file, &data)
    } else {
        ico_info(file, data)
    }
}

fn ico_info(file: &Path, data: Vec<u8>) -> Result<i32> {
    let icon = IcoContainer::parse(data)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let entries = icon.entries()?;
    println!("{}: {} images", file.display(), entries.len());
    if entries.is_empty() {
        return Ok(0);
    }

    let parts = icon.split()?;
    for (i, (entry, part)) in entries.iter().zip(&parts).enumerate() {
        let depth = match part.bit_depth() {
            Ok(depth) => format!("{depth} bpp"),
            Err(e) => format!("{}", e.to_string().yellow()),
        };
        println!(
            "  #{i}: {}x{}, {} bytes, {depth}",
            entry.prefix.width(),
            entry.prefix.height(),
            entry.bytes_in_res
        );
    }
    Ok(0)
}

fn pe_info(file: &Path, data: &[u8]) -> Result<i32> {
    let pe = PE::from_slice(data).with_context(|| format!("Failed to parse {}", file.display()))?;
    let names = pe.group_icon_names()?;
    if names.is_empty() {
        println!("{}", "Found no icons in the file.".red());
        return Ok(1);
    }

    println!("{}: {} icon groups", file.display(), names.len());
    for name in names {
        let directory = pe
            .group_icon_bytes(&name)
            .and_then(GroupIconDirectory::parse);
        match directory {
            Ok(directory) => {
                let sizes: Vec<String> = directory
                    .entries
                    .iter()
                    .map(|entry| {
                        format!(
                            "{}x{}@{}",
                            entry.prefix.width(),
                            entry.prefix.height(),
                            entry.prefix.bit_count()
                        )
                    })
                    .collect();
                println!("  {name}: {} images ({})", directory.count(), sizes.join(", "));
            }
            Err(e) => println!("  {name}: {}", e.to_string().yellow()),
        }
    }
    Ok(0)
}
