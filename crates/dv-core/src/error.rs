//! Invariant violations
//!
//! These never abort the simulation. The caller logs them and abandons the
//! operation, leaving the affected actor where it was.

use thiserror::Error;

use crate::actor::ActorId;
use crate::dungeon::DungeonId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("dungeon {0} has no start room")]
    NoStartRoom(DungeonId),

    #[error("no free start cell in dungeon {0}")]
    NoFreeCell(DungeonId),

    #[error("unknown dungeon {0}")]
    UnknownDungeon(DungeonId),

    #[error("actor {0} is not in dungeon {1}")]
    UnknownActor(ActorId, DungeonId),
}
