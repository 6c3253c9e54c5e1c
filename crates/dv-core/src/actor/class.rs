//! Hero class and monster stat tables

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Base stats an actor is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub attack: i32,
    pub defense: i32,
    pub health: i32,
    pub magic: i32,
    pub moves: i32,
    pub actions: i32,
}

/// How an actor deals damage from its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatStyle {
    Melee,
    Ranged,
    Magic,
}

/// Gold awarded on kill, uniformly in `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldRange {
    pub min: u32,
    pub max: u32,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum HeroClass {
    Warrior,
    Archer,
    Mage,
    Cleric,
}

impl HeroClass {
    pub const fn stats(self) -> BaseStats {
        match self {
            HeroClass::Warrior => BaseStats {
                attack: 4,
                defense: 3,
                health: 10,
                magic: 0,
                moves: 4,
                actions: 1,
            },
            HeroClass::Archer => BaseStats {
                attack: 3,
                defense: 2,
                health: 8,
                magic: 0,
                moves: 5,
                actions: 1,
            },
            HeroClass::Mage => BaseStats {
                attack: 2,
                defense: 1,
                health: 6,
                magic: 6,
                moves: 4,
                actions: 1,
            },
            HeroClass::Cleric => BaseStats {
                attack: 2,
                defense: 2,
                health: 8,
                magic: 6,
                moves: 4,
                actions: 1,
            },
        }
    }

    pub const fn combat_style(self) -> CombatStyle {
        match self {
            HeroClass::Warrior | HeroClass::Cleric => CombatStyle::Melee,
            HeroClass::Archer => CombatStyle::Ranged,
            HeroClass::Mage => CombatStyle::Magic,
        }
    }

    pub const fn can_heal(self) -> bool {
        matches!(self, HeroClass::Cleric)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum MonsterKind {
    Rat,
    Goblin,
    Skeleton,
    Orc,
    Troll,
}

impl MonsterKind {
    pub const fn stats(self) -> BaseStats {
        match self {
            MonsterKind::Rat => BaseStats {
                attack: 1,
                defense: 1,
                health: 2,
                magic: 0,
                moves: 3,
                actions: 1,
            },
            MonsterKind::Goblin => BaseStats {
                attack: 2,
                defense: 2,
                health: 3,
                magic: 0,
                moves: 3,
                actions: 1,
            },
            MonsterKind::Skeleton => BaseStats {
                attack: 3,
                defense: 2,
                health: 4,
                magic: 0,
                moves: 2,
                actions: 1,
            },
            MonsterKind::Orc => BaseStats {
                attack: 3,
                defense: 3,
                health: 6,
                magic: 0,
                moves: 3,
                actions: 1,
            },
            MonsterKind::Troll => BaseStats {
                attack: 5,
                defense: 4,
                health: 10,
                magic: 0,
                moves: 2,
                actions: 1,
            },
        }
    }

    pub const fn gold_on_kill(self) -> Option<GoldRange> {
        match self {
            MonsterKind::Rat => None,
            MonsterKind::Goblin => Some(GoldRange { min: 1, max: 6 }),
            MonsterKind::Skeleton => Some(GoldRange { min: 2, max: 8 }),
            MonsterKind::Orc => Some(GoldRange { min: 5, max: 10 }),
            MonsterKind::Troll => Some(GoldRange { min: 10, max: 25 }),
        }
    }

    /// Monsters that may appear on a dungeon level, weakest first
    pub fn for_level(level: u32) -> &'static [MonsterKind] {
        match level {
            0 | 1 => &[MonsterKind::Rat, MonsterKind::Goblin],
            2 => &[MonsterKind::Rat, MonsterKind::Goblin, MonsterKind::Skeleton],
            3 | 4 => &[MonsterKind::Goblin, MonsterKind::Skeleton, MonsterKind::Orc],
            _ => &[MonsterKind::Skeleton, MonsterKind::Orc, MonsterKind::Troll],
        }
    }
}
