//! Parser modules for gridmap definition files.
//!
//! Map content lives in `.map.yaml` scripts: map metadata plus an ordered
//! list of drawing instructions. Tile values in a script are either integer
//! codes or names from the tile registry.
//!
//! # Usage
//!
//! ```ignore
//! use gridmap::parser::parse_map_script;
//!
//! let source = std::fs::read_to_string("maps/coastal_route.map.yaml")?;
//! let script = parse_map_script(&source)?;
//! println!("{}: {} steps", script.id, script.draw.len());
//! ```

pub mod script;

pub use script::{load_map_script, parse_map_script, Instruction, MapScript, TileRef};
