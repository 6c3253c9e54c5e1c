//! Actor system
//!
//! Contains stat tables (class) and actor instances (unit).

mod class;
mod unit;

pub use class::{BaseStats, CombatStyle, GoldRange, HeroClass, MonsterKind};
pub use unit::{Actor, ActorId, ActorIds, ActorKind, Facing, Faction};
