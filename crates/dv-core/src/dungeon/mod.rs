//! Dungeon system
//!
//! Contains level structure, cells, rooms and the level generator seam.

mod cell;
mod generation;
mod level;
mod room;

pub use cell::Tile;
pub use generation::{DungeonGenerator, GridGenerator};
pub use level::{Dungeon, DungeonId};
pub use room::{Chest, Door, Room};
