//! Tile codes of the builtin registry.
//!
//! Rust callers painting maps directly use these instead of bare integers.

use crate::types::TileId;

pub const WATER: TileId = 0;
pub const GRASS: TileId = 1;
pub const PATH: TileId = 2;
pub const TREE: TileId = 3;
pub const DOOR: TileId = 4;
pub const BRIDGE: TileId = 5;
pub const WALL: TileId = 6;
pub const TALL_GRASS: TileId = 7;
pub const ROCK: TileId = 8;
pub const SIGN: TileId = 9;
pub const NPC: TileId = 10;
pub const SHOP: TileId = 11;
pub const HEAL: TileId = 12;
pub const ITEM: TileId = 13;
pub const KEY_ITEM: TileId = 14;
pub const CAVE: TileId = 15;
pub const WARP: TileId = 16;
pub const WATER_EDGE: TileId = 17;
pub const FENCE: TileId = 18;
pub const FLOWER: TileId = 19;
pub const TRAINER_UP: TileId = 20;
pub const TRAINER_DOWN: TileId = 21;
pub const TRAINER_LEFT: TileId = 22;
pub const TRAINER_RIGHT: TileId = 23;
pub const GYM_LEADER: TileId = 24;
pub const SURF_WATER: TileId = 25;
pub const STRENGTH_ROCK: TileId = 26;
pub const CUT_TREE: TileId = 27;
pub const RARE_GRASS: TileId = 28;
pub const LEGENDARY: TileId = 29;
pub const VILLAIN_BOSS: TileId = 30;
pub const VILLAIN_UP: TileId = 31;
pub const VILLAIN_DOWN: TileId = 32;
pub const VILLAIN_LEFT: TileId = 33;
pub const VILLAIN_RIGHT: TileId = 34;
pub const MINION_UP: TileId = 35;
pub const MINION_DOWN: TileId = 36;
pub const MINION_LEFT: TileId = 37;
pub const MINION_RIGHT: TileId = 38;
pub const HIDDEN_ITEM: TileId = 40;
pub const PC: TileId = 41;
pub const POKEBALL: TileId = 42;
pub const STATUE: TileId = 49;
