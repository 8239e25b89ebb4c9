//! Map script parser.
//!
//! Parses `.map.yaml` files into `MapScript` instances. A script holds the
//! map metadata and the ordered list of drawing instructions that paint it.
//!
//! ```yaml
//! id: coastal_route
//! name: Coastal Route
//! width: 25
//! height: 56
//! fill: grass
//! draw:
//!   - { op: border, tile: tree }
//!   - { op: fill_rect, col: 1, row: 16, w: 23, h: 4, tile: path }
//!   - { op: stamp, footprint: heal_center, col: 4, row: 10 }
//!   - { op: entity, col: 6, row: 11, tile: sign }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::registry::TileRegistry;
use crate::types::TileId;

/// A tile reference: a raw code or a registry name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TileRef {
    Code(TileId),
    Name(String),
}

impl TileRef {
    /// Resolve to a tile code through the registry.
    ///
    /// Raw codes pass through unchecked; names must exist in the registry.
    pub fn resolve(&self, registry: &TileRegistry) -> Result<TileId> {
        match self {
            TileRef::Code(code) => Ok(*code),
            TileRef::Name(name) => registry.code_of(name),
        }
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileRef::Code(code) => write!(f, "{}", code),
            TileRef::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<TileId> for TileRef {
    fn from(code: TileId) -> Self {
        TileRef::Code(code)
    }
}

impl From<&str> for TileRef {
    fn from(name: &str) -> Self {
        TileRef::Name(name.to_string())
    }
}

/// One drawing step. Steps replay in order; later writes win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// Write one base cell.
    Set { col: i32, row: i32, tile: TileRef },

    /// Fill a `w` x `h` rectangle of base cells.
    FillRect {
        col: i32,
        row: i32,
        w: i32,
        h: i32,
        tile: TileRef,
    },

    /// Horizontal line, `from`..=`to` columns.
    Hline {
        row: i32,
        from: i32,
        to: i32,
        tile: TileRef,
    },

    /// Vertical line, `from`..=`to` rows.
    Vline {
        col: i32,
        from: i32,
        to: i32,
        tile: TileRef,
    },

    /// Thick horizontal line growing downward.
    Hband {
        row: i32,
        from: i32,
        to: i32,
        thickness: i32,
        tile: TileRef,
    },

    /// Thick vertical line growing rightward.
    Vband {
        col: i32,
        from: i32,
        to: i32,
        thickness: i32,
        tile: TileRef,
    },

    /// Stamp a builtin or inline footprint.
    Stamp { footprint: String, col: i32, row: i32 },

    /// One-cell frame around the whole map.
    Border { tile: TileRef },

    /// Rectangle outline with a filled interior.
    Outline {
        col: i32,
        row: i32,
        w: i32,
        h: i32,
        edge: TileRef,
        interior: TileRef,
    },

    /// Rectangle of `edge` whose inner area is `interior`.
    Framed {
        col: i32,
        row: i32,
        w: i32,
        h: i32,
        edge: TileRef,
        interior: TileRef,
    },

    /// Overlay entity plus the base tile under it (default: path).
    Entity {
        col: i32,
        row: i32,
        tile: TileRef,
        #[serde(default)]
        base: Option<TileRef>,
    },

    /// Write one overlay cell, leaving the base untouched.
    Overlay { col: i32, row: i32, tile: TileRef },

    /// Overlay entities at offsets from `(col, row)`.
    Scatter {
        col: i32,
        row: i32,
        tile: TileRef,
        at: Vec<(i32, i32)>,
    },
}

impl Instruction {
    /// Short name of the operation, as written in scripts.
    pub fn op(&self) -> &'static str {
        match self {
            Instruction::Set { .. } => "set",
            Instruction::FillRect { .. } => "fill_rect",
            Instruction::Hline { .. } => "hline",
            Instruction::Vline { .. } => "vline",
            Instruction::Hband { .. } => "hband",
            Instruction::Vband { .. } => "vband",
            Instruction::Stamp { .. } => "stamp",
            Instruction::Border { .. } => "border",
            Instruction::Outline { .. } => "outline",
            Instruction::Framed { .. } => "framed",
            Instruction::Entity { .. } => "entity",
            Instruction::Overlay { .. } => "overlay",
            Instruction::Scatter { .. } => "scatter",
        }
    }
}

/// A parsed map script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapScript {
    /// Stable map identifier, also the output file stem.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Width in cells.
    pub width: usize,

    /// Height in cells.
    pub height: usize,

    /// Initial base tile for every cell.
    #[serde(default = "default_fill")]
    pub fill: TileRef,

    /// Pixel size hint; falls back to the project default.
    #[serde(default)]
    pub tile_size: Option<u32>,

    /// Script-local footprints, shadowing builtins of the same name.
    #[serde(default)]
    pub footprints: BTreeMap<String, Vec<Vec<TileRef>>>,

    /// Drawing steps, in order.
    #[serde(default)]
    pub draw: Vec<Instruction>,
}

fn default_fill() -> TileRef {
    TileRef::Name("grass".to_string())
}

/// Parse a map script from a YAML string.
pub fn parse_map_script(source: &str) -> Result<MapScript> {
    let script: MapScript = serde_yaml::from_str(source).map_err(|e| MapError::Parse {
        message: format!("Invalid map script: {}", e),
        help: Some("Each map script needs `id`, `name`, `width`, `height` and a `draw` list".to_string()),
    })?;

    if script.id.trim().is_empty() {
        return Err(MapError::Parse {
            message: "Map script has an empty `id`".to_string(),
            help: Some("The id names the output file, e.g. `id: coastal_route`".to_string()),
        });
    }

    if !is_file_stem(&script.id) {
        return Err(MapError::Parse {
            message: format!("Map id '{}' is not a plain file name", script.id),
            help: Some(
                "Ids can't contain `/`, `\\` or `..`, or start with `.`".to_string(),
            ),
        });
    }

    Ok(script)
}

/// Whether an id can be used as an output file stem without leaving the
/// output directory.
fn is_file_stem(id: &str) -> bool {
    !id.starts_with('.')
        && !id.contains("..")
        && !id.contains(|c: char| c == '/' || c == '\\' || c == '\0')
}

/// Read and parse a map script file.
pub fn load_map_script(path: &Path) -> Result<MapScript> {
    let source = std::fs::read_to_string(path).map_err(|e| MapError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read map script: {}", e),
    })?;

    parse_map_script(&source).map_err(|e| match e {
        MapError::Parse { message, help } => MapError::Parse {
            message: format!("{}: {}", path.display(), message),
            help,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::codes;

    #[test]
    fn test_parse_minimal_script() {
        let script = parse_map_script("id: meadow\nname: Meadow\nwidth: 4\nheight: 3\n").unwrap();

        assert_eq!(script.id, "meadow");
        assert_eq!(script.name, "Meadow");
        assert_eq!((script.width, script.height), (4, 3));
        assert_eq!(script.fill, TileRef::Name("grass".to_string()));
        assert_eq!(script.tile_size, None);
        assert!(script.draw.is_empty());
    }

    #[test]
    fn test_parse_all_instructions() {
        let source = r#"
id: town
name: Town
width: 20
height: 20
fill: 1
tile_size: 16
footprints:
  dock: [[5, 5], [bridge, bridge]]
draw:
  - { op: set, col: 1, row: 2, tile: flower }
  - { op: fill_rect, col: 0, row: 0, w: 3, h: 2, tile: path }
  - { op: hline, row: 4, from: 0, to: 19, tile: 2 }
  - { op: vline, col: 4, from: 0, to: 19, tile: path }
  - { op: hband, row: 6, from: 0, to: 19, thickness: 2, tile: path }
  - { op: vband, col: 8, from: 0, to: 19, thickness: 3, tile: path }
  - { op: stamp, footprint: gym, col: 10, row: 10 }
  - { op: border, tile: tree }
  - { op: outline, col: 2, row: 2, w: 5, h: 4, edge: fence, interior: path }
  - { op: framed, col: 12, row: 2, w: 4, h: 3, edge: water_edge, interior: water }
  - { op: entity, col: 3, row: 3, tile: sign }
  - { op: entity, col: 5, row: 5, tile: item, base: grass }
  - { op: overlay, col: 6, row: 6, tile: npc }
  - { op: scatter, col: 1, row: 1, tile: hidden_item, at: [[0, 0], [2, 3]] }
"#;
        let script = parse_map_script(source).unwrap();

        let ops: Vec<&str> = script.draw.iter().map(|i| i.op()).collect();
        assert_eq!(
            ops,
            vec![
                "set", "fill_rect", "hline", "vline", "hband", "vband", "stamp", "border",
                "outline", "framed", "entity", "entity", "overlay", "scatter"
            ]
        );
        assert_eq!(script.fill, TileRef::Code(codes::GRASS));
        assert_eq!(script.tile_size, Some(16));
        assert_eq!(
            script.footprints["dock"][1],
            vec![TileRef::from("bridge"), TileRef::from("bridge")]
        );
        assert_eq!(
            script.draw[11],
            Instruction::Entity {
                col: 5,
                row: 5,
                tile: TileRef::from("item"),
                base: Some(TileRef::from("grass")),
            }
        );
        assert_eq!(
            script.draw[13],
            Instruction::Scatter {
                col: 1,
                row: 1,
                tile: TileRef::from("hidden_item"),
                at: vec![(0, 0), (2, 3)],
            }
        );
    }

    #[test]
    fn test_negative_coordinates_allowed() {
        let source = "id: a\nname: A\nwidth: 2\nheight: 2\ndraw:\n  - { op: fill_rect, col: -3, row: -1, w: 9, h: 9, tile: path }\n";
        let script = parse_map_script(source).unwrap();
        assert_eq!(
            script.draw[0],
            Instruction::FillRect {
                col: -3,
                row: -1,
                w: 9,
                h: 9,
                tile: TileRef::from("path"),
            }
        );
    }

    #[test]
    fn test_unknown_op_rejected() {
        let source = "id: a\nname: A\nwidth: 2\nheight: 2\ndraw:\n  - { op: spiral, col: 0, row: 0 }\n";
        assert!(matches!(
            parse_map_script(source),
            Err(MapError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_field_rejected() {
        let source = "id: a\nname: A\nwidth: 2\ndraw: []\n";
        assert!(matches!(
            parse_map_script(source),
            Err(MapError::Parse { .. })
        ));
    }

    #[test]
    fn test_empty_id_rejected() {
        let source = "id: \"  \"\nname: A\nwidth: 2\nheight: 2\n";
        assert!(matches!(
            parse_map_script(source),
            Err(MapError::Parse { .. })
        ));
    }

    #[test]
    fn test_id_must_be_plain_file_name() {
        for id in ["../escaped", "maps/town", "a\\\\b", ".hidden", "town..old"] {
            let source = format!("id: \"{}\"\nname: A\nwidth: 2\nheight: 2\n", id);
            assert!(
                matches!(parse_map_script(&source), Err(MapError::Parse { .. })),
                "accepted {}",
                id
            );
        }

        let script = parse_map_script("id: route_1-north.v2\nname: A\nwidth: 2\nheight: 2\n").unwrap();
        assert_eq!(script.id, "route_1-north.v2");
    }

    #[test]
    fn test_tile_ref_resolve() {
        let registry = TileRegistry::builtin();

        assert_eq!(TileRef::Code(250).resolve(&registry).unwrap(), 250);
        assert_eq!(
            TileRef::from("rare_grass").resolve(&registry).unwrap(),
            codes::RARE_GRASS
        );
        assert!(TileRef::from("lava").resolve(&registry).is_err());
    }

    #[test]
    fn test_load_map_script_missing_file() {
        let result = load_map_script(Path::new("/nonexistent/town.map.yaml"));
        assert!(matches!(result, Err(MapError::Io { .. })));
    }
}
