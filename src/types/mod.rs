//! Core domain types for gridmap.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Grid` - fixed-size tile layers and the painting primitives
//! - `Footprint` - stampable tile patterns (building templates)
//! - `MapDocument` - the validated, serializable map

mod document;
mod footprint;
mod grid;

pub use document::{assemble, MapDocument, DEFAULT_TILE_SIZE, SCHEMA_VERSION};
pub use footprint::{BuiltinFootprints, Footprint};
pub use grid::{place_entity, place_point_entity, BaseGrid, Grid, OverlayGrid, TileId};
