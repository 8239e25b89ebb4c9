//! File discovery for gridmap projects.
//!
//! Finds map scripts and built documents in a project directory, either by
//! scanning the whole tree or the sources listed in a `gridmap.yaml`
//! manifest.
//!
//! # Example
//!
//! ```ignore
//! use gridmap::discovery::discover;
//!
//! let project = discover("./my-maps")?;
//! let registry = project.registry()?;
//! println!("{} scripts", project.scan.scripts.len());
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::registry::TileRegistry;

pub use manifest::Manifest;
pub use scanner::{detect_source_kind, scan_directory, scan_sources, ScanResult, SourceKind};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "gridmap.yaml";

/// Result of discovering a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if there is no gridmap.yaml).
    pub manifest: Manifest,

    pub has_manifest: bool,

    /// Discovered files.
    pub scan: ScanResult,
}

impl DiscoveryResult {
    /// Tile registry configured for this project.
    pub fn registry(&self) -> Result<TileRegistry> {
        self.manifest.load_registry(&self.root)
    }

    /// Output directory for built documents.
    pub fn output_dir(&self) -> PathBuf {
        self.manifest.output_dir(&self.root)
    }
}

/// Discover map files in a project directory.
///
/// Uses the `gridmap.yaml` manifest in `root` when present; otherwise
/// scans all of `root` with default settings.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let scan = scan_sources(&manifest.effective_sources(), &root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        scan,
    })
}

/// Discover map files from explicit paths (no manifest lookup).
///
/// Directories are scanned recursively; files are taken as given when
/// their extension is recognised.
pub fn discover_paths(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    let manifest = Manifest::default();
    let mut scan = ScanResult::new();

    for path in paths {
        if path.is_dir() {
            scan.merge(scan_directory(path, &manifest));
        } else if let Some(kind) = detect_source_kind(path) {
            let mut single = ScanResult::new();
            single.add(kind, path.clone());
            scan.merge(single);
        }
    }

    let root = paths
        .first()
        .map(|p| if p.is_dir() { p.as_path() } else { p.parent().unwrap_or(p.as_path()) })
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest: false,
        scan,
    })
}
