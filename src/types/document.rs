//! Map documents: the serializable unit of output.
//!
//! A document bundles the two painted layers with identifying metadata and
//! the tile registry linkage. Before it is written anywhere it must pass
//! `validate`, which is the single authoritative check that the declared
//! width/height agree with the actual rows of both layers.

use serde::{Deserialize, Serialize};

use super::grid::{BaseGrid, OverlayGrid, TileId};
use crate::error::{MapError, Result};

/// Format version of the document shape.
pub const SCHEMA_VERSION: u32 = 2;

/// Tile pixel size used when nothing else is configured.
pub const DEFAULT_TILE_SIZE: u32 = 32;

/// A finished map, ready for validation and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDocument {
    /// Format version of this document shape.
    pub schema_version: u32,

    /// Stable map identifier.
    pub map_id: String,

    /// Human-readable name.
    pub display_name: String,

    /// Pixel size hint for rendering.
    pub tile_size: u32,

    /// Declared width in cells.
    pub width: usize,

    /// Declared height in cells.
    pub height: usize,

    /// Terrain/structure layer (row-major).
    pub base_tiles: Vec<Vec<TileId>>,

    /// Entity layer (row-major), `null` for empty cells.
    pub overlay_tiles: Vec<Vec<Option<TileId>>>,

    /// Tile registry the codes belong to.
    pub registry_id: String,

    /// Version of that registry.
    pub registry_version: String,
}

/// Package two finished grids and metadata into a document.
///
/// Cell values are moved as-is. The declared `width`/`height` are taken
/// verbatim and only checked by [`MapDocument::validate`].
#[allow(clippy::too_many_arguments)]
pub fn assemble(
    id: impl Into<String>,
    display_name: impl Into<String>,
    tile_size: u32,
    width: usize,
    height: usize,
    base: BaseGrid,
    overlay: OverlayGrid,
    registry_id: impl Into<String>,
    registry_version: impl Into<String>,
) -> MapDocument {
    MapDocument {
        schema_version: SCHEMA_VERSION,
        map_id: id.into(),
        display_name: display_name.into(),
        tile_size,
        width,
        height,
        base_tiles: base.into_rows(),
        overlay_tiles: overlay.into_rows(),
        registry_id: registry_id.into(),
        registry_version: registry_version.into(),
    }
}

impl MapDocument {
    /// Check declared dimensions against both layers.
    ///
    /// Every row of both layers is inspected, and all disagreements are
    /// reported together in a single `ShapeMismatch`.
    pub fn validate(&self) -> Result<()> {
        let problems = self.shape_problems();
        if problems.is_empty() {
            return Ok(());
        }
        Err(MapError::ShapeMismatch {
            map_id: self.map_id.clone(),
            width: self.width,
            height: self.height,
            problems,
        })
    }

    /// Describe every row-count and row-length disagreement.
    pub fn shape_problems(&self) -> Vec<String> {
        let mut problems = layer_problems("baseTiles", &self.base_tiles, self.width, self.height);
        problems.extend(layer_problems(
            "overlayTiles",
            &self.overlay_tiles,
            self.width,
            self.height,
        ));
        problems
    }

    /// Declared cell count, saturating for absurd declared sizes.
    pub fn cell_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Number of placed overlay entities.
    pub fn entity_count(&self) -> usize {
        self.overlay_tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_some())
            .count()
    }

    /// Read a base tile. Returns None if out of bounds.
    pub fn base_at(&self, col: usize, row: usize) -> Option<TileId> {
        self.base_tiles.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Read an overlay tile. Returns None if out of bounds or empty.
    pub fn overlay_at(&self, col: usize, row: usize) -> Option<TileId> {
        self.overlay_tiles
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .flatten()
    }
}

fn layer_problems<T>(layer: &str, rows: &[Vec<T>], width: usize, height: usize) -> Vec<String> {
    let mut problems = Vec::new();

    if rows.len() != height {
        problems.push(format!(
            "{} has {} rows, expected {}",
            layer,
            rows.len(),
            height
        ));
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            problems.push(format!(
                "{} row {} has {} cols, expected {}",
                layer,
                i,
                row.len(),
                width
            ));
        }
    }

    problems
}
