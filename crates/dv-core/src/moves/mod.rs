//! Legal moves and step resolution
//!
//! A participant commits to one [`GameMove`] out of the list produced by
//! [`MoveRules::legal_moves`]; the activity executor then asks
//! [`MoveRules::next_step`] for one atomic [`Step`] per tick until the move's
//! target is reached.

mod grid;

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::dungeon::Dungeon;

pub use grid::GridMoves;

/// Kind of a move and of each step that resolves it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Move,
    Open,
    Chest,
    Shoot,
    Magic,
    Heal,
    Attack,
}

impl MoveKind {
    /// Kinds that spend the actor's action
    pub fn is_action(self) -> bool {
        matches!(self, MoveKind::Shoot | MoveKind::Magic | MoveKind::Heal | MoveKind::Attack)
    }

    /// Kinds resolved from where the actor stands, without walking
    pub fn is_ranged(self) -> bool {
        matches!(self, MoveKind::Shoot | MoveKind::Magic | MoveKind::Heal)
    }
}

/// A candidate action for the actor standing at (sx, sy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMove {
    pub x: i32,
    pub y: i32,
    pub sx: i32,
    pub sy: i32,
    pub kind: MoveKind,
    /// Steps from (sx, sy); used to walk the path back from the target
    pub depth: u32,
}

/// One atomic piece of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: MoveKind,
    pub x: i32,
    pub y: i32,
}

/// Move enumeration and path resolution
pub trait MoveRules {
    /// Everything the actor may do from where it stands this turn
    fn legal_moves(&self, dungeon: &Dungeon, actor: &Actor) -> Vec<GameMove>;

    /// The next step toward (tx, ty), or `None` once nothing is left to resolve
    fn next_step(
        &self,
        dungeon: &Dungeon,
        actor: &Actor,
        moves: &[GameMove],
        tx: i32,
        ty: i32,
    ) -> Option<Step>;
}
