use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use pe_icon_util::{Error, ExtractOptions, IconExtractor, PE};

use super::{ensure_dir, file_stem, write_icon};

const EXTENSIONS: [&str; 2] = ["exe", "dll"];

fn validate(file: &Path) -> Result<()> {
    if !file.is_file() {
        bail!(
            "File does not exist, please verify that the file path is correct: {}",
            file.display()
        );
    }
    let extension = file
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if !EXTENSIONS.contains(&extension.as_str()) {
        bail!("Must have the file extension exe or dll: {}", file.display());
    }
    Ok(())
}

/// Directory named after the file stem, relative to the current directory.
fn default_out_dir(file: &Path) -> PathBuf {
    PathBuf::from(file_stem(file))
}

fn found_message(groups: usize) -> String {
    match groups {
        1 => "There is 1 icon group in the file.".to_owned(),
        n => format!("There are {n} icon groups in the file."),
    }
}

/// Extracts every icon group of `file` into `icon{i}.ico`. Returns the process exit code.
pub fn run(file: &Path, out: Option<&Path>, split: bool, parallel: bool) -> Result<i32> {
    validate(file)?;
    let data = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let pe = PE::from_slice(&data)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let icons = match IconExtractor::with_options(&pe, ExtractOptions { parallel }).extract_all() {
        Ok(icons) => icons,
        Err(Error::NoIconGroups) => {
            println!("{}", "Found no icons in the file. Aborting extraction.".red());
            return Ok(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to list icons in {}", file.display()))
        }
    };
    println!("{}", found_message(icons.len()).green());

    let out_dir = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_out_dir(file));
    ensure_dir(&out_dir)?;

    let mut written = 0;
    for (i, icon) in icons.iter().enumerate() {
        let ico = match &icon.result {
            Ok(ico) => ico,
            Err(e) => {
                eprintln!("{}", format!("Skipping icon {}: {e}", icon.name).yellow());
                continue;
            }
        };
        write_icon(&out_dir.join(format!("icon{i}.ico")), ico.as_bytes())?;
        written += 1;

        if split {
            match ico.split() {
                Ok(parts) => {
                    for (j, part) in parts.iter().enumerate() {
                        write_icon(&out_dir.join(format!("icon{i}-{j}.ico")), part.as_bytes())?;
                    }
                }
                Err(e) => eprintln!("{}", format!("Could not split icon {}: {e}", icon.name).yellow()),
            }
        }
    }

    println!(
        "{}",
        format!("{written} icons extracted to {}.", out_dir.display()).green()
    );
    Ok(if written == 0 { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{group_icon, pe_with_icons};

    /// Groups #1 and #7 are valid, #5 declares one byte more than icon 2 holds.
    fn sample_pe() -> Vec<u8> {
        pe_with_icons(
            &[(1, vec![0x11; 40]), (2, vec![0x22; 12])],
            &[
                (1, group_icon(&[(16, 40, 1), (32, 12, 2)])),
                (5, group_icon(&[(32, 13, 2)])),
                (7, group_icon(&[(32, 12, 2)])),
            ],
        )
    }

    fn write_input(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate(&dir.path().join("missing.dll")).is_err());
    }

    #[test]
    fn checks_extension() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("notes.txt");
        let dll = dir.path().join("shell32.DLL");
        fs::write(&text, b"").unwrap();
        fs::write(&dll, b"").unwrap();

        assert!(validate(&text).is_err());
        assert!(validate(&dll).is_ok());
    }

    #[test]
    fn writes_one_icon_per_group() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample_pe();
        let file = write_input(dir.path(), "shell.dll", &data);
        let out = dir.path().join("out");

        assert_eq!(run(&file, Some(out.as_path()), false, false).unwrap(), 0);

        let pe = PE::from_slice(&data).unwrap();
        let icons = IconExtractor::new(&pe).extract_all().unwrap();
        assert_eq!(
            fs::read(out.join("icon0.ico")).unwrap(),
            icons[0].result.as_ref().unwrap().as_bytes()
        );
        // The broken group keeps its index; the ones after it are still written.
        assert!(!out.join("icon1.ico").exists());
        assert_eq!(
            fs::read(out.join("icon2.ico")).unwrap(),
            icons[2].result.as_ref().unwrap().as_bytes()
        );
        assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
    }

    #[test]
    fn split_writes_every_image() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample_pe();
        let file = write_input(dir.path(), "shell.exe", &data);
        let out = dir.path().join("out");

        assert_eq!(run(&file, Some(out.as_path()), true, true).unwrap(), 0);

        let pe = PE::from_slice(&data).unwrap();
        let icons = IconExtractor::new(&pe).extract_all().unwrap();
        let parts = icons[0].result.as_ref().unwrap().split().unwrap();
        assert_eq!(parts.len(), 2);
        for (j, part) in parts.iter().enumerate() {
            assert_eq!(
                fs::read(out.join(format!("icon0-{j}.ico"))).unwrap(),
                part.as_bytes()
            );
        }
        assert!(out.join("icon2-0.ico").exists());
        assert!(!out.join("icon0-2.ico").exists());
        assert!(!out.join("icon1-0.ico").exists());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 5);
    }

    #[test]
    fn no_icons_exits_with_one() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_input(dir.path(), "empty.exe", &pe_with_icons(&[], &[]));
        let out = dir.path().join("out");

        assert_eq!(run(&file, Some(out.as_path()), false, false).unwrap(), 1);
        assert!(!out.exists());
    }

    #[test]
    fn only_broken_groups_exits_with_one() {
        let dir = tempfile::tempdir().unwrap();
        let data = pe_with_icons(&[(2, vec![0x22; 12])], &[(5, group_icon(&[(32, 13, 2)]))]);
        let file = write_input(dir.path(), "broken.dll", &data);
        let out = dir.path().join("out");

        assert_eq!(run(&file, Some(out.as_path()), false, false).unwrap(), 1);
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn rejects_file_that_is_not_a_pe() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_input(dir.path(), "fake.exe", b"not a portable executable");
        assert!(run(&file, Some(dir.path()), false, false).is_err());
    }

    #[test]
    fn default_out_dir_is_file_stem() {
        assert_eq!(
            default_out_dir(Path::new("/tmp/bin/shell32.dll")),
            PathBuf::from("shell32")
        );
        assert_eq!(default_out_dir(Path::new("imageres.DLL")), PathBuf::from("imageres"));
    }

    #[test]
    fn found_message_counts_groups() {
        assert_eq!(found_message(1), "There is 1 icon group in the file.");
        assert_eq!(found_message(3), "There are 3 icon groups in the file.");
    }
}
