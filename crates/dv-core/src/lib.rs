//! dv-core: simulation core for the Delve co-op dungeon crawl
//!
//! Up to four heroes share a dungeon with the AI-controlled "evil" faction.
//! This crate owns the turn/activity engine: turn rotation, the single
//! in-flight activity, combat, death and loot, and the evil planner. Every
//! step function is deterministic given the seed held by [`World`], so all
//! replicas of a game stay in lockstep.
//!
//! Dungeon generation, move enumeration and loot tables sit behind traits
//! ([`DungeonGenerator`], [`MoveRules`], [`LootTable`]) with simple default
//! implementations.

pub mod activity;
pub mod actor;
pub mod combat;
pub mod dungeon;
pub mod event;
pub mod item;
pub mod loot;
pub mod monster;
pub mod moves;
pub mod turn;
pub mod world;

mod consts;
mod error;
mod gameloop;
mod rng;

pub use consts::*;
pub use dungeon::DungeonGenerator;
pub use error::GameError;
pub use gameloop::{Command, CommandResult, Game};
pub use loot::LootTable;
pub use moves::MoveRules;
pub use rng::GameRng;
pub use world::{EngineOptions, PlayerId, Rules, World};
