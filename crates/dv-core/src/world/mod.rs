//! Shared game state
//!
//! [`World`] holds everything that must stay identical across replicas:
//! the dungeons and their actors, participants, the turn order, the single
//! in-flight activity, the shared inventory and the random stream. It is
//! serializable so a replica's state can be snapshotted and compared.

mod options;
mod rules;
mod save;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::actor::{Actor, ActorId, ActorIds, HeroClass};
use crate::dungeon::{Dungeon, DungeonId};
use crate::error::GameError;
use crate::event::{EventKind, EventLog, GameEvent};
use crate::item::Inventory;
use crate::moves::GameMove;
use crate::rng::GameRng;
use crate::turn::TurnOrder;

pub use options::{EngineOptions, OptionsError};
pub use rules::Rules;
pub use save::{SaveBook, SaveSlot};

/// Network identity of a participant
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A joined participant and the hero they control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub class: HeroClass,
    pub actor: ActorId,
    /// Dungeon the hero was last placed in
    pub dungeon: DungeonId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub rng: GameRng,
    pub ids: ActorIds,
    next_dungeon: u32,
    pub dungeons: Vec<Dungeon>,
    pub players: Vec<Player>,
    pub turn_order: TurnOrder,
    pub activity: Option<Activity>,
    /// Legal moves of [`World::moves_for`], recomputed after every change
    pub legal_moves: Vec<GameMove>,
    pub moves_for: Option<ActorId>,
    /// Events produced by the current logical step
    pub events: EventLog,
    pub inventory: Inventory,
    pub dead_heroes: Vec<Actor>,
    /// Ticks left for the evil faction this turn
    pub evil_turn_budget: u32,
    /// Shared clock in milliseconds
    pub clock: u64,
    pub last_step: u64,
    pub game_over: bool,
    pub saves: SaveBook,
    pub options: EngineOptions,
}

impl World {
    pub fn new(seed: u64, options: EngineOptions) -> Self {
        Self {
            rng: GameRng::new(seed),
            ids: ActorIds::new(),
            next_dungeon: 0,
            dungeons: Vec::new(),
            players: Vec::new(),
            turn_order: TurnOrder::new(),
            activity: None,
            legal_moves: Vec::new(),
            moves_for: None,
            events: EventLog::new(),
            inventory: Inventory::new(),
            dead_heroes: Vec::new(),
            evil_turn_budget: options.evil_turn_max,
            clock: 0,
            last_step: 0,
            game_over: false,
            saves: SaveBook::new(),
            options,
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    // dungeons

    pub fn dungeon(&self, id: DungeonId) -> Option<&Dungeon> {
        self.dungeons.iter().find(|d| d.id == id)
    }

    pub fn dungeon_mut(&mut self, id: DungeonId) -> Option<&mut Dungeon> {
        self.dungeons.iter_mut().find(|d| d.id == id)
    }

    pub fn dungeon_at_level(&self, level: u32) -> Option<&Dungeon> {
        self.dungeons.iter().find(|d| d.level == level)
    }

    /// Generate a level without adding it to the world
    pub fn build_dungeon(&mut self, rules: &Rules, level: u32) -> Dungeon {
        let id = DungeonId(self.next_dungeon);
        self.next_dungeon += 1;
        rules.generator.generate(id, level, &mut self.rng, &mut self.ids)
    }

    /// Generate a level with `heroes` placed in its start room
    ///
    /// If a hero cannot be placed the rng and id counters are put back, so a
    /// failed attempt leaves the world untouched.
    pub fn build_party_dungeon(
        &mut self,
        rules: &Rules,
        level: u32,
        heroes: Vec<Actor>,
    ) -> Result<Dungeon, GameError> {
        let (rng, ids, next_dungeon) = (self.rng.clone(), self.ids.clone(), self.next_dungeon);
        let mut dungeon = self.build_dungeon(rules, level);
        for mut hero in heroes {
            match dungeon.start_cell() {
                Ok((x, y)) => {
                    hero.place_at(x, y);
                    dungeon.actors.push(hero);
                }
                Err(err) => {
                    self.rng = rng;
                    self.ids = ids;
                    self.next_dungeon = next_dungeon;
                    return Err(err);
                }
            }
        }
        Ok(dungeon)
    }

    /// Generate a level and add it to the live set
    pub fn generate_dungeon(&mut self, rules: &Rules, level: u32) -> DungeonId {
        let dungeon = self.build_dungeon(rules, level);
        let id = dungeon.id;
        self.dungeons.push(dungeon);
        id
    }

    /// Dungeon where new heroes join the party
    pub fn party_dungeon(&self) -> Option<DungeonId> {
        self.dungeons
            .iter()
            .find(|d| d.has_hero())
            .or_else(|| self.dungeons.first())
            .map(|d| d.id)
    }

    /// Drop dungeons without heroes once too many are live
    pub fn prune_dungeons(&mut self) {
        if self.dungeons.len() <= self.options.max_live_dungeons {
            return;
        }
        let before = self.dungeons.len();
        self.dungeons.retain(|d| d.has_hero());
        log::debug!("pruned {} empty dungeons", before - self.dungeons.len());

        if let Some(activity) = &self.activity
            && self.dungeon(activity.dungeon).is_none()
        {
            self.activity = None;
        }
    }

    // actors

    /// Locate a live actor in any dungeon
    pub fn find_actor(&self, id: ActorId) -> Option<(DungeonId, &Actor)> {
        self.dungeons
            .iter()
            .find_map(|d| d.actor(id).map(|a| (d.id, a)))
    }

    pub fn actor_mut(&mut self, dungeon: DungeonId, id: ActorId) -> Option<&mut Actor> {
        self.dungeon_mut(dungeon)?.actor_mut(id)
    }

    /// Any hero still alive in any dungeon
    pub fn hero_active(&self) -> bool {
        self.dungeons.iter().any(Dungeon::has_hero)
    }

    // participants

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// The participant's hero, if alive
    pub fn hero_of(&self, id: &PlayerId) -> Option<(DungeonId, &Actor)> {
        let player = self.player(id)?;
        self.find_actor(player.actor)
    }

    // legal moves

    /// Recompute the legal moves of one actor, clearing them if it is gone
    pub fn recalc_moves(&mut self, rules: &Rules, actor: ActorId) {
        let moves = self
            .find_actor(actor)
            .and_then(|(dungeon, a)| self.dungeon(dungeon).map(|d| rules.moves.legal_moves(d, a)));
        match moves {
            Some(moves) => {
                self.legal_moves = moves;
                self.moves_for = Some(actor);
            }
            None => self.clear_moves(),
        }
    }

    pub fn clear_moves(&mut self) {
        self.legal_moves.clear();
        self.moves_for = None;
    }

    pub fn is_legal_target(&self, actor: ActorId, x: i32, y: i32) -> bool {
        self.moves_for == Some(actor) && self.legal_moves.iter().any(|m| m.x == x && m.y == y)
    }

    // saves

    /// Record progress for a participant at `level`
    pub fn record_save(&mut self, player: &PlayerId, level: u32) {
        let Some((name, class)) = self.player(player).map(|p| (p.name.clone(), p.class)) else {
            return;
        };
        let slot = SaveSlot {
            level,
            gold: self.inventory.gold,
            inventory: self.inventory.items.clone(),
            descriptor: format!("Level {} {}, {} gold", level, class, self.inventory.gold),
        };
        self.saves.record(&name, slot, self.options.save_slots);
        log::info!("saved progress for {} at level {}", name, level);
    }

    /// Emit a turn change for the current holder
    pub(crate) fn emit_turn_change(&mut self) {
        let index = self.turn_order.current_index();
        let actor = self
            .turn_order
            .current_player()
            .and_then(|p| self.player(p))
            .map(|p| p.actor);
        self.emit(GameEvent::new(EventKind::TurnChange, actor, 0, 0).with_value(index as i32));
    }
}
