//! Loot tables

use strum::IntoEnumIterator;

use crate::actor::MonsterKind;
use crate::dungeon::Chest;
use crate::item::ItemKind;
use crate::rng::GameRng;

/// Decides which items monsters drop and chests hold
pub trait LootTable {
    /// Item dropped by a slain monster, if any
    fn roll_monster_loot(&self, kind: MonsterKind, rng: &mut GameRng) -> Option<ItemKind>;

    /// Item produced when a chest is opened
    fn chest_item(&self, chest: &Chest) -> ItemKind;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLoot;

impl StandardLoot {
    /// Item drop chance is 1 in this many kills
    pub const fn drop_odds(kind: MonsterKind) -> u32 {
        match kind {
            MonsterKind::Rat => 10,
            MonsterKind::Goblin => 6,
            MonsterKind::Skeleton => 5,
            MonsterKind::Orc => 4,
            MonsterKind::Troll => 2,
        }
    }
}

impl LootTable for StandardLoot {
    fn roll_monster_loot(&self, kind: MonsterKind, rng: &mut GameRng) -> Option<ItemKind> {
        if !rng.one_in(Self::drop_odds(kind)) {
            return None;
        }
        let kinds: Vec<ItemKind> = ItemKind::iter().collect();
        kinds.get(rng.rn2(kinds.len() as u32) as usize).copied()
    }

    fn chest_item(&self, chest: &Chest) -> ItemKind {
        chest.loot
    }
}
