//! Tile-kind registry shared by every map.
//!
//! The registry binds integer tile codes to symbolic names, categories and
//! walkability. Map documents carry only the codes plus the registry's id
//! and version; map scripts refer to tiles by name and resolve them here, so
//! no generator redefines codes on its own.
//!
//! # Example
//!
//! ```ignore
//! use gridmap::registry::TileRegistry;
//!
//! let registry = TileRegistry::builtin();
//! let path = registry.code_of("path")?;
//! assert_eq!(registry.get(path).map(|k| k.walkable), Some(true));
//! ```

pub mod codes;
pub mod types;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::error::{MapError, Result};
use crate::types::TileId;

pub use types::{normalize_name, TileCategory, TileKind};

/// Identifier of the builtin registry.
pub const BUILTIN_REGISTRY_ID: &str = "gridmap-default";

/// Version of the builtin registry.
pub const BUILTIN_REGISTRY_VERSION: &str = "1.0.0";

/// Lookup table from tile codes and names to tile kinds.
///
/// The registry is immutable after construction - use `RegistryBuilder`
/// to create a custom one.
#[derive(Debug, Clone)]
pub struct TileRegistry {
    id: String,
    version: String,
    kinds: BTreeMap<TileId, TileKind>,
    names: HashMap<String, TileId>,
}

impl TileRegistry {
    /// The builtin registry.
    pub fn builtin() -> Self {
        let mut builder = RegistryBuilder::new(BUILTIN_REGISTRY_ID, BUILTIN_REGISTRY_VERSION);
        builder.add_kinds(builtin_kinds());
        Self::from_parts(builder)
    }

    /// Load a registry from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MapError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read tile registry: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse a registry from a YAML string.
    ///
    /// ```yaml
    /// id: my-game
    /// version: 0.3.0
    /// tiles:
    ///   - { code: 0, name: water, category: terrain, walkable: false }
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let file: RegistryFile = serde_yaml::from_str(content).map_err(|e| MapError::Parse {
            message: format!("Invalid tile registry: {}", e),
            help: Some("Expected `id`, `version` and a `tiles` list".to_string()),
        })?;

        let mut builder = RegistryBuilder::new(file.id, file.version);
        builder.add_kinds(file.tiles);
        builder.build()
    }

    fn from_parts(builder: RegistryBuilder) -> Self {
        let names = builder
            .kinds
            .iter()
            .map(|k| (normalize_name(&k.name), k.code))
            .collect();
        let kinds = builder.kinds.into_iter().map(|k| (k.code, k)).collect();

        Self {
            id: builder.id,
            version: builder.version,
            kinds,
            names,
        }
    }

    /// Registry identifier written into documents.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Registry version written into documents.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get a tile kind by code.
    pub fn get(&self, code: TileId) -> Option<&TileKind> {
        self.kinds.get(&code)
    }

    /// Get a tile kind by name (case, `-` and space insensitive).
    pub fn lookup(&self, name: &str) -> Option<&TileKind> {
        self.names
            .get(&normalize_name(name))
            .and_then(|code| self.kinds.get(code))
    }

    /// Resolve a tile name to its code.
    pub fn code_of(&self, name: &str) -> Result<TileId> {
        self.lookup(name)
            .map(|k| k.code)
            .ok_or_else(|| MapError::Parse {
                message: format!(
                    "Unknown tile '{}' in registry '{}'",
                    name, self.id
                ),
                help: Some("Run `gridmap tiles` to list known tile names".to_string()),
            })
    }

    /// Check whether a code is registered.
    pub fn contains(&self, code: TileId) -> bool {
        self.kinds.contains_key(&code)
    }

    /// Walkability of a code, or None if unregistered.
    pub fn is_walkable(&self, code: TileId) -> Option<bool> {
        self.get(code).map(|k| k.walkable)
    }

    /// All tile kinds, ordered by code.
    pub fn kinds(&self) -> impl Iterator<Item = &TileKind> {
        self.kinds.values()
    }

    /// Tile kinds in one category, ordered by code.
    pub fn by_category(&self, category: TileCategory) -> impl Iterator<Item = &TileKind> {
        self.kinds.values().filter(move |k| k.category == category)
    }

    /// Get the number of tile kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builder for constructing a TileRegistry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    id: String,
    version: String,
    kinds: Vec<TileKind>,
}

impl RegistryBuilder {
    /// Create a new registry builder.
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            kinds: Vec::new(),
        }
    }

    /// Add a tile kind.
    pub fn add_kind(&mut self, kind: TileKind) -> &mut Self {
        self.kinds.push(kind);
        self
    }

    /// Add multiple tile kinds.
    pub fn add_kinds(&mut self, kinds: impl IntoIterator<Item = TileKind>) -> &mut Self {
        for kind in kinds {
            self.add_kind(kind);
        }
        self
    }

    /// Build the registry, rejecting duplicate codes and names.
    pub fn build(self) -> Result<TileRegistry> {
        let mut seen_codes: HashMap<TileId, &str> = HashMap::new();
        let mut seen_names: HashMap<String, TileId> = HashMap::new();

        for kind in &self.kinds {
            if let Some(existing) = seen_codes.insert(kind.code, kind.name.as_str()) {
                return Err(MapError::Validation {
                    message: format!(
                        "Tile code {} is defined twice ('{}' and '{}')",
                        kind.code, existing, kind.name
                    ),
                    help: Some("Give every tile kind a unique code".to_string()),
                });
            }
            if let Some(existing) = seen_names.insert(normalize_name(&kind.name), kind.code) {
                return Err(MapError::Validation {
                    message: format!(
                        "Tile name '{}' is used by codes {} and {}",
                        kind.name, existing, kind.code
                    ),
                    help: Some("Give every tile kind a unique name".to_string()),
                });
            }
        }

        Ok(TileRegistry::from_parts(self))
    }
}

#[derive(Deserialize)]
struct RegistryFile {
    id: String,
    version: String,
    #[serde(default)]
    tiles: Vec<TileKind>,
}

fn builtin_kinds() -> Vec<TileKind> {
    use codes::*;
    use TileCategory::*;

    vec![
        TileKind::new(WATER, "water", Terrain, false),
        TileKind::new(GRASS, "grass", Terrain, true),
        TileKind::new(PATH, "path", Terrain, true),
        TileKind::new(TREE, "tree", Structure, false),
        TileKind::new(DOOR, "door", Interactive, true),
        TileKind::new(BRIDGE, "bridge", Terrain, true),
        TileKind::new(WALL, "wall", Structure, false),
        TileKind::new(TALL_GRASS, "tall_grass", Encounter, true),
        TileKind::new(ROCK, "rock", Structure, false),
        TileKind::new(SIGN, "sign", Interactive, false),
        TileKind::new(NPC, "npc", Entity, false),
        TileKind::new(SHOP, "shop", Interactive, false),
        TileKind::new(HEAL, "heal", Interactive, false),
        TileKind::new(ITEM, "item", Item, true),
        TileKind::new(KEY_ITEM, "key_item", Item, true),
        TileKind::new(CAVE, "cave", Terrain, true),
        TileKind::new(WARP, "warp", Interactive, true),
        TileKind::new(WATER_EDGE, "water_edge", Terrain, false),
        TileKind::new(FENCE, "fence", Structure, false),
        TileKind::new(FLOWER, "flower", Terrain, true),
        TileKind::new(TRAINER_UP, "trainer_up", Trainer, false),
        TileKind::new(TRAINER_DOWN, "trainer_down", Trainer, false),
        TileKind::new(TRAINER_LEFT, "trainer_left", Trainer, false),
        TileKind::new(TRAINER_RIGHT, "trainer_right", Trainer, false),
        TileKind::new(GYM_LEADER, "gym_leader", Trainer, false),
        TileKind::new(SURF_WATER, "surf_water", Terrain, false),
        TileKind::new(STRENGTH_ROCK, "strength_rock", Interactive, false),
        TileKind::new(CUT_TREE, "cut_tree", Interactive, false),
        TileKind::new(RARE_GRASS, "rare_grass", Encounter, true),
        TileKind::new(LEGENDARY, "legendary", Entity, false),
        TileKind::new(VILLAIN_BOSS, "villain_boss", Trainer, false),
        TileKind::new(VILLAIN_UP, "villain_up", Trainer, false),
        TileKind::new(VILLAIN_DOWN, "villain_down", Trainer, false),
        TileKind::new(VILLAIN_LEFT, "villain_left", Trainer, false),
        TileKind::new(VILLAIN_RIGHT, "villain_right", Trainer, false),
        TileKind::new(MINION_UP, "minion_up", Trainer, false),
        TileKind::new(MINION_DOWN, "minion_down", Trainer, false),
        TileKind::new(MINION_LEFT, "minion_left", Trainer, false),
        TileKind::new(MINION_RIGHT, "minion_right", Trainer, false),
        TileKind::new(HIDDEN_ITEM, "hidden_item", Item, true),
        TileKind::new(PC, "pc", Interactive, false),
        TileKind::new(POKEBALL, "pokeball", Item, true),
        TileKind::new(STATUE, "statue", Structure, false),
    ]
}
