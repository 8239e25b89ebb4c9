//! Init command implementation.
//!
//! Generates a `gridmap.yaml` manifest listing the directories that hold
//! map scripts.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{discover, scan_directory, Manifest, MANIFEST_FILENAME};
use crate::error::{MapError, Result};
use crate::output::{display_path, plural, Printer};
use crate::types::DEFAULT_TILE_SIZE;

/// Initialize a gridmap project by generating a gridmap.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing gridmap.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(MapError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));

    // With --force the old manifest still steers discovery; scan the whole
    // tree instead so the new one reflects what is on disk.
    let scripts = if manifest_path.exists() {
        scan_directory(&args.path, &Manifest::default()).scripts
    } else {
        discover(&args.path)?.scan.scripts
    };

    let source_dirs = source_dirs(&scripts, &args.path);
    let yaml = manifest_yaml(&source_dirs);

    fs::write(&manifest_path, &yaml).map_err(|e| MapError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if !source_dirs.is_empty() {
        let dirs: Vec<&str> = source_dirs.iter().map(|s| s.as_str()).collect();
        printer.info("Discovered", &dirs.join(", "));
    }

    printer.status(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(scripts.len(), "map script", "map scripts")
        ),
    );

    Ok(())
}

/// Unique script directories relative to the project root.
fn source_dirs(scripts: &[PathBuf], root: &Path) -> BTreeSet<String> {
    scripts
        .iter()
        .filter_map(|file| file.parent())
        .map(|parent| {
            let relative = parent.strip_prefix(root).unwrap_or(parent);
            if relative.as_os_str().is_empty() {
                ".".to_string()
            } else {
                format!("{}/", relative.display())
            }
        })
        .collect()
}

/// Manifest text, written by hand for stable formatting.
fn manifest_yaml(source_dirs: &BTreeSet<String>) -> String {
    let mut yaml = String::new();

    let only_root = source_dirs.is_empty() || (source_dirs.len() == 1 && source_dirs.contains("."));
    if !only_root {
        yaml.push_str("sources:\n");
        for dir in source_dirs {
            yaml.push_str(&format!("  - \"{}\"\n", dir));
        }
    }

    yaml.push_str("output: dist\n");
    yaml.push_str(&format!("tile_size: {}\n", DEFAULT_TILE_SIZE));
    yaml
}
