//! Tile kind definitions for the registry.
//!
//! A tile kind gives an integer code a name, a category, and a walkability
//! flag. The painting core never looks at these; they exist for scripts
//! (name lookup) and advisory validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::TileId;

/// The broad role of a tile kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileCategory {
    Terrain,
    Structure,
    Interactive,
    Entity,
    Trainer,
    Item,
    Encounter,
}

impl TileCategory {
    /// All categories, in display order.
    pub const ALL: [TileCategory; 7] = [
        TileCategory::Terrain,
        TileCategory::Structure,
        TileCategory::Interactive,
        TileCategory::Entity,
        TileCategory::Trainer,
        TileCategory::Item,
        TileCategory::Encounter,
    ];

    /// Get the short name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            TileCategory::Terrain => "terrain",
            TileCategory::Structure => "structure",
            TileCategory::Interactive => "interactive",
            TileCategory::Entity => "entity",
            TileCategory::Trainer => "trainer",
            TileCategory::Item => "item",
            TileCategory::Encounter => "encounter",
        }
    }
}

impl fmt::Display for TileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        TileCategory::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| format!("unknown tile category '{}'", s))
    }
}

/// A single entry in a tile registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileKind {
    /// Integer code written into map documents.
    pub code: TileId,

    /// Symbolic name used by map scripts (e.g. `tall_grass`).
    pub name: String,

    /// Broad role of the tile.
    pub category: TileCategory,

    /// Whether a player can stand on this tile.
    pub walkable: bool,
}

impl TileKind {
    /// Create a new tile kind.
    pub fn new(code: TileId, name: impl Into<String>, category: TileCategory, walkable: bool) -> Self {
        Self {
            code,
            name: name.into(),
            category,
            walkable,
        }
    }
}

/// Normalize a tile name for lookup: lowercase, `-` and spaces become `_`.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
