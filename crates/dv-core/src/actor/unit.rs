//! Actor instances

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{BaseStats, CombatStyle, GoldRange, HeroClass, MonsterKind};
use crate::world::PlayerId;

/// Unique identifier for actors, stable for the whole game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out actor ids in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIds {
    next: u32,
}

impl ActorIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ActorId {
        self.next += 1;
        ActorId(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Hero,
    Evil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// What the actor is; monsters also use it as their loot-table reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Hero(HeroClass),
    Monster(MonsterKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    /// Controlling participant, heroes only
    pub owner: Option<PlayerId>,
    pub kind: ActorKind,
    pub faction: Faction,

    pub x: i32,
    pub y: i32,
    /// Previous cell and the clock time of the last step, for interpolation
    pub last_x: i32,
    pub last_y: i32,
    pub last_move_time: u64,
    pub facing: Facing,

    pub attack: i32,
    pub defense: i32,
    pub attack_mod: i32,
    pub defense_mod: i32,

    pub health: i32,
    pub max_health: i32,
    pub magic: i32,
    pub max_magic: i32,
    pub moves: i32,
    pub max_moves: i32,
    pub actions: i32,
    pub actions_per_turn: i32,

    pub gold_on_kill: Option<GoldRange>,
}

impl Actor {
    fn from_stats(id: ActorId, kind: ActorKind, faction: Faction, stats: BaseStats, x: i32, y: i32) -> Self {
        Self {
            id,
            owner: None,
            kind,
            faction,
            x,
            y,
            last_x: x,
            last_y: y,
            last_move_time: 0,
            facing: Facing::default(),
            attack: stats.attack,
            defense: stats.defense,
            attack_mod: 0,
            defense_mod: 0,
            health: stats.health,
            max_health: stats.health,
            magic: stats.magic,
            max_magic: stats.magic,
            moves: stats.moves,
            max_moves: stats.moves,
            actions: stats.actions,
            actions_per_turn: stats.actions,
            gold_on_kill: None,
        }
    }

    pub fn new_hero(id: ActorId, owner: PlayerId, class: HeroClass, x: i32, y: i32) -> Self {
        let mut actor = Self::from_stats(id, ActorKind::Hero(class), Faction::Hero, class.stats(), x, y);
        actor.owner = Some(owner);
        actor
    }

    pub fn new_monster(id: ActorId, kind: MonsterKind, x: i32, y: i32) -> Self {
        let mut actor = Self::from_stats(id, ActorKind::Monster(kind), Faction::Evil, kind.stats(), x, y);
        actor.gold_on_kill = kind.gold_on_kill();
        actor
    }

    pub fn is_hero(&self) -> bool {
        self.faction == Faction::Hero
    }

    pub fn is_enemy_of(&self, other: &Actor) -> bool {
        self.faction != other.faction
    }

    pub fn combat_style(&self) -> CombatStyle {
        match self.kind {
            ActorKind::Hero(class) => class.combat_style(),
            ActorKind::Monster(_) => CombatStyle::Melee,
        }
    }

    pub fn can_heal(&self) -> bool {
        matches!(self.kind, ActorKind::Hero(class) if class.can_heal())
    }

    pub fn effective_attack(&self) -> i32 {
        (self.attack + self.attack_mod).max(0)
    }

    pub fn effective_defense(&self) -> i32 {
        (self.defense + self.defense_mod).max(0)
    }

    /// Manhattan distance to a cell
    pub fn distance_to(&self, x: i32, y: i32) -> i32 {
        (self.x - x).abs() + (self.y - y).abs()
    }

    pub fn is_adjacent(&self, x: i32, y: i32) -> bool {
        self.distance_to(x, y) == 1
    }

    pub fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    pub fn set_magic(&mut self, magic: i32) {
        self.magic = magic.clamp(0, self.max_magic);
    }

    pub fn set_moves(&mut self, moves: i32) {
        self.moves = moves.clamp(0, self.max_moves);
    }

    /// Apply damage, returns true if the actor is now dead
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.set_health(self.health.saturating_sub(amount));
        self.health <= 0
    }

    /// Give the actor a fresh turn's worth of moves and actions
    pub fn reset_turn(&mut self) {
        self.moves = self.max_moves;
        self.actions = self.actions_per_turn;
    }

    /// Spend everything left this turn without acting
    pub fn exhaust(&mut self) {
        self.moves = 0;
        self.actions = 0;
    }

    /// Relocate one cell, recording where the actor came from
    pub fn step_to(&mut self, x: i32, y: i32, now: u64) {
        let dx = x - self.x;
        self.last_x = self.x;
        self.last_y = self.y;
        self.last_move_time = now;
        self.x = x;
        self.y = y;
        if dx > 0 {
            self.facing = Facing::Right;
        } else if dx < 0 {
            self.facing = Facing::Left;
        }
    }

    /// Place without interpolation, used when entering a dungeon
    pub fn place_at(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.last_x = x;
        self.last_y = y;
    }
}
