//! Map painter - replays a map script onto fresh grids.
//!
//! The painter allocates the base and overlay layers at the script's
//! declared size, applies every instruction in order through the grid
//! primitives, and assembles the result into a validated `MapDocument`.
//! Instructions are applied literally: redundant or self-correcting writes
//! in a script are kept, and the last write to a cell wins.

use std::collections::HashMap;

use crate::error::{MapError, Result};
use crate::parser::{Instruction, MapScript, TileRef};
use crate::registry::{codes, TileRegistry};
use crate::types::{
    assemble, place_point_entity, BaseGrid, BuiltinFootprints, Footprint, Grid, MapDocument,
    OverlayGrid, TileId, DEFAULT_TILE_SIZE,
};

/// Paints map scripts into documents.
pub struct MapPainter<'a> {
    registry: &'a TileRegistry,

    /// Available footprints keyed by name.
    footprints: HashMap<String, Footprint>,

    /// Tile size used when a script does not set one.
    default_tile_size: u32,
}

impl<'a> MapPainter<'a> {
    /// Create a painter with the builtin footprints.
    pub fn new(registry: &'a TileRegistry) -> Self {
        let footprints = BuiltinFootprints::all()
            .into_iter()
            .map(|f| (f.name.clone(), f))
            .collect();

        Self {
            registry,
            footprints,
            default_tile_size: DEFAULT_TILE_SIZE,
        }
    }

    /// Set the tile size for scripts that do not declare one.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.default_tile_size = tile_size;
        self
    }

    /// Register a footprint, replacing any with the same name.
    pub fn add_footprint(&mut self, footprint: Footprint) {
        self.footprints.insert(footprint.name.clone(), footprint);
    }

    /// Get the registry used to resolve tile names.
    pub fn registry(&self) -> &TileRegistry {
        self.registry
    }

    /// Paint a script and return the validated document.
    pub fn paint(&self, script: &MapScript) -> Result<MapDocument> {
        let fill = script.fill.resolve(self.registry).map_err(|e| {
            with_context(e, format!("Map '{}': fill", script.id))
        })?;

        let local = self.local_footprints(script)?;

        let mut base: BaseGrid = Grid::new(script.width, script.height, fill);
        let mut overlay: OverlayGrid = Grid::overlay(script.width, script.height);

        for (index, step) in script.draw.iter().enumerate() {
            self.apply(step, &local, &mut base, &mut overlay).map_err(|e| {
                with_context(
                    e,
                    format!("Map '{}': draw[{}] ({})", script.id, index, step.op()),
                )
            })?;
        }

        let document = assemble(
            script.id.clone(),
            script.name.clone(),
            script.tile_size.unwrap_or(self.default_tile_size),
            script.width,
            script.height,
            base,
            overlay,
            self.registry.id(),
            self.registry.version(),
        );
        document.validate()?;

        Ok(document)
    }

    /// Resolve the script's inline footprints.
    fn local_footprints(&self, script: &MapScript) -> Result<HashMap<String, Footprint>> {
        let mut local = HashMap::new();

        for (name, rows) in &script.footprints {
            let resolved = rows
                .iter()
                .map(|row| self.resolve_row(row))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| {
                    with_context(e, format!("Map '{}': footprint '{}'", script.id, name))
                })?;
            local.insert(name.clone(), Footprint::new(name.clone(), resolved));
        }

        Ok(local)
    }

    fn resolve_row(&self, row: &[TileRef]) -> Result<Vec<TileId>> {
        row.iter().map(|t| t.resolve(self.registry)).collect()
    }

    fn footprint<'f>(
        &'f self,
        name: &str,
        local: &'f HashMap<String, Footprint>,
    ) -> Result<&'f Footprint> {
        local
            .get(name)
            .or_else(|| self.footprints.get(name))
            .ok_or_else(|| {
                let mut known: Vec<&str> = self
                    .footprints
                    .keys()
                    .chain(local.keys())
                    .map(|s| s.as_str())
                    .collect();
                known.sort();
                known.dedup();
                MapError::Parse {
                    message: format!("Unknown footprint '{}'", name),
                    help: Some(format!("Known footprints: {}", known.join(", "))),
                }
            })
    }

    fn apply(
        &self,
        step: &Instruction,
        local: &HashMap<String, Footprint>,
        base: &mut BaseGrid,
        overlay: &mut OverlayGrid,
    ) -> Result<()> {
        let tile = |t: &TileRef| t.resolve(self.registry);

        match step {
            Instruction::Set { col, row, tile: t } => {
                base.set(*col, *row, tile(t)?);
            }
            Instruction::FillRect {
                col,
                row,
                w,
                h,
                tile: t,
            } => base.fill_rect(*col, *row, *w, *h, tile(t)?),
            Instruction::Hline {
                row,
                from,
                to,
                tile: t,
            } => base.hline(*row, *from, *to, tile(t)?),
            Instruction::Vline {
                col,
                from,
                to,
                tile: t,
            } => base.vline(*col, *from, *to, tile(t)?),
            Instruction::Hband {
                row,
                from,
                to,
                thickness,
                tile: t,
            } => base.hband(*row, *from, *to, *thickness, tile(t)?),
            Instruction::Vband {
                col,
                from,
                to,
                thickness,
                tile: t,
            } => base.vband(*col, *from, *to, *thickness, tile(t)?),
            Instruction::Stamp {
                footprint,
                col,
                row,
            } => {
                let footprint = self.footprint(footprint, local)?;
                base.stamp_footprint(footprint, *col, *row);
            }
            Instruction::Border { tile: t } => base.border(tile(t)?),
            Instruction::Outline {
                col,
                row,
                w,
                h,
                edge,
                interior,
            } => base.outline_rect(*col, *row, *w, *h, tile(edge)?, tile(interior)?),
            Instruction::Framed {
                col,
                row,
                w,
                h,
                edge,
                interior,
            } => base.framed_rect(*col, *row, *w, *h, tile(edge)?, tile(interior)?),
            Instruction::Entity {
                col,
                row,
                tile: t,
                base: under,
            } => {
                let under = match under {
                    Some(u) => tile(u)?,
                    None => codes::PATH,
                };
                place_point_entity(base, overlay, *col, *row, tile(t)?, under);
            }
            Instruction::Overlay { col, row, tile: t } => {
                overlay.set(*col, *row, Some(tile(t)?));
            }
            Instruction::Scatter {
                col,
                row,
                tile: t,
                at,
            } => overlay.scatter(*col, *row, at, Some(tile(t)?)),
        }

        Ok(())
    }
}

/// Prefix parse errors with where they happened.
fn with_context(err: MapError, context: String) -> MapError {
    match err {
        MapError::Parse { message, help } => MapError::Parse {
            message: format!("{}: {}", context, message),
            help,
        },
        other => other,
    }
}
