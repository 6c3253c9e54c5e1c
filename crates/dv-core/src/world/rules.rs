use crate::dungeon::{DungeonGenerator, GridGenerator};
use crate::loot::{LootTable, StandardLoot};
use crate::moves::{GridMoves, MoveRules};

/// Pluggable collaborators consulted by the engine
pub struct Rules {
    pub generator: Box<dyn DungeonGenerator>,
    pub moves: Box<dyn MoveRules>,
    pub loot: Box<dyn LootTable>,
}

impl Rules {
    pub fn new(
        generator: Box<dyn DungeonGenerator>,
        moves: Box<dyn MoveRules>,
        loot: Box<dyn LootTable>,
    ) -> Self {
        Self {
            generator,
            moves,
            loot,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(
            Box::new(GridGenerator::default()),
            Box::new(GridMoves),
            Box::new(StandardLoot),
        )
    }
}
