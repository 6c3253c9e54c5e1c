//! Turn rotation
//!
//! Heroes take turns in join order and the evil faction always goes last.
//! Dead or departed heroes are skipped when the turn comes round.

use serde::{Deserialize, Serialize};

use crate::world::{PlayerId, Rules, World};
use crate::MAGIC_REGEN;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnSlot {
    Hero(PlayerId),
    Evil,
}

static EVIL: TurnSlot = TurnSlot::Evil;

/// Ordered turn slots with the index of the current holder
///
/// The evil slot is always present and always last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    slots: Vec<TurnSlot>,
    current: usize,
}

impl Default for TurnOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnOrder {
    pub fn new() -> Self {
        Self {
            slots: vec![TurnSlot::Evil],
            current: 0,
        }
    }

    pub fn slots(&self) -> &[TurnSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &TurnSlot {
        self.slots.get(self.current).unwrap_or(&EVIL)
    }

    pub fn current_player(&self) -> Option<&PlayerId> {
        match self.current() {
            TurnSlot::Hero(id) => Some(id),
            TurnSlot::Evil => None,
        }
    }

    pub fn is_evil_turn(&self) -> bool {
        *self.current() == TurnSlot::Evil
    }

    pub fn is_turn_of(&self, player: &PlayerId) -> bool {
        self.current_player() == Some(player)
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.position(player).is_some()
    }

    pub fn position(&self, player: &PlayerId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| matches!(s, TurnSlot::Hero(id) if id == player))
    }

    /// Add a hero just before the evil slot, keeping the current holder
    pub fn insert(&mut self, player: PlayerId) {
        if self.contains(&player) {
            return;
        }
        let at = self.slots.len() - 1;
        self.slots.insert(at, TurnSlot::Hero(player));
        if self.current >= at {
            self.current += 1;
        }
    }

    /// Remove a hero, keeping the current holder where possible
    pub fn remove(&mut self, player: &PlayerId) -> bool {
        let Some(at) = self.position(player) else {
            return false;
        };
        self.slots.remove(at);
        if at < self.current {
            self.current -= 1;
        }
        if self.current >= self.slots.len() {
            self.current = 0;
        }
        true
    }

    /// Pass the turn to the next slot, wrapping after evil
    pub fn advance(&mut self) -> &TurnSlot {
        self.current = (self.current + 1) % self.slots.len();
        self.current()
    }

    pub fn set_current(&mut self, index: usize) {
        if index < self.slots.len() {
            self.current = index;
        }
    }
}

/// Move the turn to the next living holder and prepare its turn
///
/// A hero holder gets fresh moves and actions, regains magic, and has its
/// legal moves computed. The evil holder gets a fresh tick budget and every
/// monster is refreshed. Does nothing once the game is over.
pub fn advance_turn(world: &mut World, rules: &Rules) {
    if world.game_over {
        return;
    }
    // evil is always present, so this lands on a holder within one lap
    for _ in 0..world.turn_order.len() {
        match world.turn_order.advance().clone() {
            TurnSlot::Evil => {
                begin_evil_turn(world);
                break;
            }
            TurnSlot::Hero(player) => {
                if begin_hero_turn(world, rules, &player) {
                    break;
                }
                log::debug!("skipping turn of {}", player);
            }
        }
    }
    log::debug!("turn passes to slot {}", world.turn_order.current_index());
    world.emit_turn_change();
}

/// Start a hero's turn, false if the hero is dead or gone
pub(crate) fn begin_hero_turn(world: &mut World, rules: &Rules, player: &PlayerId) -> bool {
    let Some((dungeon, actor)) = world
        .hero_of(player)
        .map(|(dungeon, actor)| (dungeon, actor.id))
    else {
        return false;
    };
    let Some(hero) = world.actor_mut(dungeon, actor) else {
        return false;
    };
    if hero.health <= 0 {
        return false;
    }
    hero.reset_turn();
    hero.set_magic(hero.magic + MAGIC_REGEN);
    world.recalc_moves(rules, actor);
    true
}

fn begin_evil_turn(world: &mut World) {
    world.evil_turn_budget = world.options.evil_turn_max;
    for dungeon in &mut world.dungeons {
        for actor in dungeon.actors.iter_mut().filter(|a| !a.is_hero()) {
            actor.reset_turn();
        }
    }
    world.clear_moves();
}

/// Hand the turn straight to a hero, used when the first hero joins
pub(crate) fn give_turn_to(world: &mut World, rules: &Rules, player: &PlayerId) -> bool {
    let Some(index) = world.turn_order.position(player) else {
        return false;
    };
    world.turn_order.set_current(index);
    let started = begin_hero_turn(world, rules, player);
    if started {
        world.emit_turn_change();
    }
    started
}
