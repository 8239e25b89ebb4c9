//! Project manifest (gridmap.yaml) parsing.
//!
//! The manifest sets where map scripts live, where documents are written,
//! the default tile size and an optional custom tile registry.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::registry::TileRegistry;
use crate::types::DEFAULT_TILE_SIZE;

/// Project manifest loaded from gridmap.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Directories to scan for map scripts. Empty means the project root.
    pub sources: Vec<String>,

    /// Output directory for map documents.
    pub output: PathBuf,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,

    /// Tile size for scripts that don't set one.
    pub tile_size: Option<u32>,

    /// Custom tile registry file, relative to the project root.
    pub registry: Option<PathBuf>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sources: vec![],
            output: default_output(),
            excludes: vec![],
            tile_size: None,
            registry: None,
        }
    }
}

impl Manifest {
    /// Load manifest from a gridmap.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MapError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes as unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| MapError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(
                "Known keys: sources, output, excludes, tile_size, registry".to_string(),
            ),
        })
    }

    /// Render the manifest as YAML, as written by `gridmap init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| MapError::Build {
            message: format!("Failed to serialize manifest: {}", e),
            help: None,
        })
    }

    /// Check if a path matches any exclude pattern.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy().replace('\\', "/");
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }

    /// Source directories, defaulting to the project root.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }

    pub fn effective_tile_size(&self) -> u32 {
        self.tile_size.unwrap_or(DEFAULT_TILE_SIZE)
    }

    /// Output directory resolved against the project root.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        if self.output.is_absolute() {
            self.output.clone()
        } else {
            root.join(&self.output)
        }
    }

    /// Load the configured registry, or the builtin one.
    pub fn load_registry(&self, root: &Path) -> Result<TileRegistry> {
        match &self.registry {
            Some(path) if path.is_absolute() => TileRegistry::load(path),
            Some(path) => TileRegistry::load(&root.join(path)),
            None => Ok(TileRegistry::builtin()),
        }
    }
}

/// Simple glob matching: `*.ext`, `dir/*`, `**/dir/*`, or a plain substring.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(rest) = pattern.strip_prefix("**/") {
        if let Some(dir) = rest.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
        }
        return path.ends_with(rest) || path.contains(&format!("/{}", rest));
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !suffix.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(dir) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
    }

    path.contains(pattern)
}
