//! Footprints: small fixed patterns of base tiles stamped onto a map.
//!
//! A footprint is usually a building template (walls, roof, door), but any
//! rectangular tile pattern works. Rows may be ragged; only the cells a row
//! actually defines are stamped.

use super::grid::TileId;

/// A named pattern of base-tile codes (row-major: rows[row][col]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint {
    /// Footprint name (unique identifier).
    pub name: String,

    rows: Vec<Vec<TileId>>,
}

impl Footprint {
    /// Create a new footprint.
    pub fn new(name: impl Into<String>, rows: Vec<Vec<TileId>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.len()).max().unwrap_or(0)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Check if the footprint defines no cells.
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Number of defined cells.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }

    /// Get the tile at a position. Returns None for undefined cells.
    pub fn get(&self, col: usize, row: usize) -> Option<TileId> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Get a reference to the rows.
    pub fn rows(&self) -> &[Vec<TileId>] {
        &self.rows
    }

    /// Iterate over defined cells as (col, row, tile).
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, TileId)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &tile)| (c, r, tile))
        })
    }
}

/// Collection of builtin footprints.
pub struct BuiltinFootprints;

impl BuiltinFootprints {
    /// Get all builtin footprints.
    pub fn all() -> Vec<Footprint> {
        vec![
            Footprint::new(
                "heal_center",
                vec![
                    vec![3, 3, 3, 3],
                    vec![3, 4, 4, 3],
                    vec![3, 4, 4, 3],
                    vec![6, 4, 4, 6],
                ],
            ),
            Footprint::new(
                "shop",
                vec![
                    vec![3, 3, 3, 3],
                    vec![3, 6, 6, 3],
                    vec![3, 11, 6, 3],
                    vec![6, 4, 4, 6],
                ],
            ),
            Footprint::new(
                "gym",
                vec![
                    vec![3, 3, 3, 3, 3],
                    vec![3, 6, 6, 6, 3],
                    vec![3, 6, 12, 6, 3],
                    vec![3, 6, 4, 6, 3],
                    vec![6, 6, 4, 6, 6],
                ],
            ),
            Footprint::new(
                "house_small",
                vec![vec![3, 3, 3], vec![3, 4, 3], vec![6, 4, 6]],
            ),
            Footprint::new(
                "house_large",
                vec![
                    vec![3, 3, 3, 3],
                    vec![3, 6, 6, 3],
                    vec![3, 4, 6, 3],
                    vec![6, 4, 6, 6],
                ],
            ),
            Footprint::new(
                "lab",
                vec![
                    vec![3, 3, 3, 3, 3],
                    vec![3, 6, 6, 6, 3],
                    vec![3, 4, 41, 4, 3],
                    vec![6, 4, 4, 4, 6],
                ],
            ),
            Footprint::new("cave_entrance", vec![vec![3, 3, 3], vec![15, 15, 15]]),
            Footprint::new(
                "gate",
                vec![vec![6, 6, 6, 6], vec![6, 16, 16, 6], vec![6, 6, 6, 6]],
            ),
            Footprint::new(
                "pond",
                vec![vec![17, 0, 0, 17], vec![0, 0, 0, 0], vec![17, 0, 0, 17]],
            ),
        ]
    }

    /// Get a builtin footprint by name.
    pub fn get(name: &str) -> Option<Footprint> {
        Self::all().into_iter().find(|f| f.name == name)
    }

    /// Get all builtin footprint names.
    pub fn names() -> Vec<String> {
        Self::all().into_iter().map(|f| f.name).collect()
    }
}
