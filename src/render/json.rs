//! JSON output for map documents.
//!
//! Documents are written as pretty-printed JSON (two-space indent) with
//! camelCase field names. Writing always validates first, so a document
//! whose declared size disagrees with its layers never reaches disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MapError, Result};
use crate::types::MapDocument;

/// File extension of written documents.
pub const DOCUMENT_EXTENSION: &str = "map.json";

/// Output path for a map id inside an output directory.
pub fn document_path(output_dir: &Path, map_id: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", map_id, DOCUMENT_EXTENSION))
}

/// Validate a document and write it to `path`.
///
/// Missing parent directories are created. An existing file is replaced.
pub fn write_document(document: &MapDocument, path: &Path) -> Result<()> {
    document.validate()?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| MapError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
    }

    let mut json = serde_json::to_string_pretty(document).map_err(|e| MapError::Build {
        message: format!("Failed to serialize map '{}': {}", document.map_id, e),
        help: None,
    })?;
    json.push('\n');

    fs::write(path, json).map_err(|e| MapError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write map document: {}", e),
    })?;

    Ok(())
}

/// Read a document back from disk.
///
/// The result is not validated; call [`MapDocument::validate`] as needed.
pub fn read_document(path: &Path) -> Result<MapDocument> {
    let source = fs::read_to_string(path).map_err(|e| MapError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read map document: {}", e),
    })?;

    serde_json::from_str(&source).map_err(|e| MapError::Parse {
        message: format!("{}: invalid map document: {}", path.display(), e),
        help: Some("Map documents are produced by `gridmap build`".to_string()),
    })
}
