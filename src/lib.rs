//! gridmap - Tile map generator
//!
//! A library for painting fixed-size two-layer tile maps (terrain plus
//! entity overlay) and exporting them as validated JSON documents. Maps are
//! painted either directly through the `Grid` primitives or by replaying
//! `.map.yaml` scripts.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod registry;
pub mod render;
pub mod types;
pub mod validation;

pub use discovery::{discover, discover_paths, DiscoveryResult, Manifest, ScanResult};
pub use error::{MapError, Result};
pub use parser::{load_map_script, parse_map_script, Instruction, MapScript, TileRef};
pub use registry::{codes, RegistryBuilder, TileCategory, TileKind, TileRegistry};
pub use render::{document_path, read_document, write_document, MapPainter};
pub use types::{
    assemble, place_entity, place_point_entity, BaseGrid, BuiltinFootprints, Footprint, Grid,
    MapDocument, OverlayGrid, TileId, DEFAULT_TILE_SIZE, SCHEMA_VERSION,
};
pub use validation::{validate_document, validate_documents, Diagnostic, Severity, ValidationResult};
