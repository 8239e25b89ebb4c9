//! Fixed-size tile grids and the painting primitives that mutate them.
//!
//! A map is painted onto two grids of identical size:
//! - the base layer (`Grid<TileId>`), where every cell holds a tile code
//! - the overlay layer (`Grid<Option<TileId>>`), where most cells are empty
//!
//! Every primitive takes signed `(col, row)` coordinates and clips silently:
//! writes that land outside the grid are dropped, never reported. Map content
//! routinely draws shapes that run off an edge, so this is part of the
//! contract. Primitives never change a grid's dimensions.

use std::ops::Range;

use super::footprint::Footprint;
use crate::registry::codes;

/// Integer tile-kind code. Its meaning lives in the tile registry.
pub type TileId = u16;

/// Terrain/structure layer. Every cell is painted.
pub type BaseGrid = Grid<TileId>;

/// Sparse entity layer. `None` means no entity.
pub type OverlayGrid = Grid<Option<TileId>>;

/// A rectangular grid of cells (row-major: cells[row][col]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<Vec<T>>,
}

impl<T: Clone> Grid<T> {
    /// Create a `width` x `height` grid with every cell set to `fill`.
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![fill; width]; height],
        }
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Check whether `(col, row)` lies inside the grid.
    pub fn contains(&self, col: i32, row: i32) -> bool {
        self.index(col, row).is_some()
    }

    fn index(&self, col: i32, row: i32) -> Option<(usize, usize)> {
        let c = usize::try_from(col).ok()?;
        let r = usize::try_from(row).ok()?;
        (c < self.width && r < self.height).then_some((c, r))
    }

    /// Read a cell. Returns None if out of bounds.
    pub fn get(&self, col: i32, row: i32) -> Option<&T> {
        let (c, r) = self.index(col, row)?;
        Some(&self.cells[r][c])
    }

    /// Write a single cell.
    ///
    /// Out-of-bounds writes are dropped. Returns whether the write landed.
    pub fn set(&mut self, col: i32, row: i32, value: T) -> bool {
        match self.index(col, row) {
            Some((c, r)) => {
                self.cells[r][c] = value;
                true
            }
            None => false,
        }
    }

    /// Fill the `w` x `h` rectangle whose top-left is `(col, row)`.
    ///
    /// Non-positive `w` or `h` writes nothing. Cells outside the grid are clipped.
    pub fn fill_rect(&mut self, col: i32, row: i32, w: i32, h: i32, value: T) {
        let cols = clip_span(col.into(), w.into(), self.width);
        let rows = clip_span(row.into(), h.into(), self.height);
        for r in rows {
            for cell in &mut self.cells[r][cols.clone()] {
                *cell = value.clone();
            }
        }
    }

    /// Draw a horizontal line on `row` from `col_start` to `col_end` inclusive.
    pub fn hline(&mut self, row: i32, col_start: i32, col_end: i32, value: T) {
        let len = i64::from(col_end) - i64::from(col_start) + 1;
        let Ok(r) = usize::try_from(row) else {
            return;
        };
        if r >= self.height {
            return;
        }
        for c in clip_span(col_start.into(), len, self.width) {
            self.cells[r][c] = value.clone();
        }
    }

    /// Draw a vertical line on `col` from `row_start` to `row_end` inclusive.
    pub fn vline(&mut self, col: i32, row_start: i32, row_end: i32, value: T) {
        let len = i64::from(row_end) - i64::from(row_start) + 1;
        let Ok(c) = usize::try_from(col) else {
            return;
        };
        if c >= self.width {
            return;
        }
        for r in clip_span(row_start.into(), len, self.height) {
            self.cells[r][c] = value.clone();
        }
    }

    /// Horizontal line `thickness` cells tall, growing downward from `row`.
    pub fn hband(&mut self, row: i32, col_start: i32, col_end: i32, thickness: i32, value: T) {
        for dr in 0..thickness.max(0) {
            self.hline(row.saturating_add(dr), col_start, col_end, value.clone());
        }
    }

    /// Vertical line `thickness` cells wide, growing rightward from `col`.
    pub fn vband(&mut self, col: i32, row_start: i32, row_end: i32, thickness: i32, value: T) {
        for dc in 0..thickness.max(0) {
            self.vline(col.saturating_add(dc), row_start, row_end, value.clone());
        }
    }

    /// One-cell frame around the whole grid.
    pub fn border(&mut self, value: T) {
        let right = dim_to_i32(self.width) - 1;
        let bottom = dim_to_i32(self.height) - 1;
        self.hline(0, 0, right, value.clone());
        self.hline(bottom, 0, right, value.clone());
        self.vline(0, 0, bottom, value.clone());
        self.vline(right, 0, bottom, value);
    }

    /// Rectangle outline of `edge` with the interior filled with `interior`.
    pub fn outline_rect(&mut self, col: i32, row: i32, w: i32, h: i32, edge: T, interior: T) {
        let right = col.saturating_add(w).saturating_sub(1);
        let bottom = row.saturating_add(h).saturating_sub(1);
        self.hline(row, col, right, edge.clone());
        self.hline(bottom, col, right, edge.clone());
        self.vline(col, row, bottom, edge.clone());
        self.vline(right, row, bottom, edge);
        self.fill_rect(
            col.saturating_add(1),
            row.saturating_add(1),
            w.saturating_sub(2),
            h.saturating_sub(2),
            interior,
        );
    }

    /// Fill the rectangle with `edge`, then its inner area with `interior`.
    ///
    /// The interior is only painted when both `w` and `h` exceed 2.
    pub fn framed_rect(&mut self, col: i32, row: i32, w: i32, h: i32, edge: T, interior: T) {
        self.fill_rect(col, row, w, h, edge);
        if w > 2 && h > 2 {
            self.fill_rect(col.saturating_add(1), row.saturating_add(1), w - 2, h - 2, interior);
        }
    }

    /// Write `value` at each `(col + dx, row + dy)` offset.
    pub fn scatter(&mut self, col: i32, row: i32, offsets: &[(i32, i32)], value: T) {
        for &(dx, dy) in offsets {
            self.set(col.saturating_add(dx), row.saturating_add(dy), value.clone());
        }
    }

    /// Get a reference to the rows.
    pub fn rows(&self) -> &[Vec<T>] {
        &self.cells
    }

    /// Consume the grid, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<T>> {
        self.cells
    }

    /// Iterate over all cells as (col, row, value).
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, value)| (c, r, value))
        })
    }
}

impl<T: Clone + PartialEq> Grid<T> {
    /// Count cells equal to `value`.
    pub fn count(&self, value: &T) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| *cell == value)
            .count()
    }
}

impl<T: Clone> Grid<Option<T>> {
    /// Create an empty overlay grid.
    pub fn overlay(width: usize, height: usize) -> Self {
        Self::new(width, height, None)
    }
}

impl Grid<TileId> {
    /// Stamp a footprint with its top-left at `(col, row)`.
    ///
    /// Only defined footprint cells are written, each clipped like `set`.
    /// Returns the number of cells that landed.
    pub fn stamp_footprint(&mut self, footprint: &Footprint, col: i32, row: i32) -> usize {
        let mut written = 0;
        for (dc, dr, tile) in footprint.iter_cells() {
            let c = col.saturating_add(dim_to_i32(dc));
            let r = row.saturating_add(dim_to_i32(dr));
            if self.set(c, r, tile) {
                written += 1;
            }
        }
        written
    }
}

/// Place a point entity: the overlay gets `overlay_value` and the base cell
/// underneath gets `base_value`.
///
/// Both writes land or neither does. Returns whether they landed.
pub fn place_point_entity(
    base: &mut BaseGrid,
    overlay: &mut OverlayGrid,
    col: i32,
    row: i32,
    overlay_value: TileId,
    base_value: TileId,
) -> bool {
    if !base.contains(col, row) || !overlay.contains(col, row) {
        return false;
    }
    base.set(col, row, base_value);
    overlay.set(col, row, Some(overlay_value))
}

/// Place a point entity standing on a walkable path tile.
pub fn place_entity(
    base: &mut BaseGrid,
    overlay: &mut OverlayGrid,
    col: i32,
    row: i32,
    overlay_value: TileId,
) -> bool {
    place_point_entity(base, overlay, col, row, overlay_value, codes::PATH)
}

/// Intersect `[start, start + len)` with `[0, limit)`.
fn clip_span(start: i64, len: i64, limit: usize) -> Range<usize> {
    let lo = start.max(0);
    let hi = start.saturating_add(len).min(limit as i64);
    if hi <= lo {
        0..0
    } else {
        lo as usize..hi as usize
    }
}

fn dim_to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
