//! File system scanner for map sources.
//!
//! Recursively scans directories for map scripts (`.map.yaml`) and built
//! map documents (`.map.json`).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;

/// Kinds of files the scanner recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A `.map.yaml` drawing script.
    Script,
    /// A `.map.json` built document.
    Document,
}

/// Files found by a scan, each list sorted by path.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub scripts: Vec<PathBuf>,
    pub documents: Vec<PathBuf>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.scripts.len() + self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn files_of_kind(&self, kind: SourceKind) -> &[PathBuf] {
        match kind {
            SourceKind::Script => &self.scripts,
            SourceKind::Document => &self.documents,
        }
    }

    /// Record one file under its kind.
    pub fn add(&mut self, kind: SourceKind, path: PathBuf) {
        match kind {
            SourceKind::Script => self.scripts.push(path),
            SourceKind::Document => self.documents.push(path),
        }
    }

    /// Merge another scan, keeping lists sorted and free of repeats.
    pub fn merge(&mut self, other: ScanResult) {
        self.scripts.extend(other.scripts);
        self.documents.extend(other.documents);
        self.normalize();
    }

    fn normalize(&mut self) {
        self.scripts.sort();
        self.scripts.dedup();
        self.documents.sort();
        self.documents.dedup();
    }
}

/// Scan a directory tree for map files.
///
/// Exclude patterns are matched against paths relative to `root`.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if manifest.is_excluded(relative) {
            continue;
        }

        if let Some(kind) = detect_source_kind(path) {
            result.add(kind, path.to_path_buf());
        }
    }

    result.normalize();
    result
}

/// Scan several source directories relative to a base path.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        result.merge(scan_directory(&source_path, manifest));
    }

    result
}

/// Detect what a file is from its double extension.
pub fn detect_source_kind(path: &Path) -> Option<SourceKind> {
    let filename = path.file_name()?.to_str()?;

    if filename.ends_with(".map.yaml") || filename.ends_with(".map.yml") {
        Some(SourceKind::Script)
    } else if filename.ends_with(".map.json") {
        Some(SourceKind::Document)
    } else {
        None
    }
}
