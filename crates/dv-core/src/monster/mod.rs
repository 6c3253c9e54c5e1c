//! Monster behaviour
//!
//! The evil faction has no participant behind it. On its turn the planner
//! picks one monster per logical step and gives it something to do, until no
//! monster has anything useful left or the turn's tick budget runs out.

mod ai;

pub use ai::plan_evil_step;

use crate::actor::{Actor, ActorId};
use crate::dungeon::{Dungeon, DungeonId};
use crate::world::World;

/// Manhattan distance from a cell to the closest hero in the dungeon
pub fn distance_to_nearest_hero(dungeon: &Dungeon, x: i32, y: i32) -> Option<i32> {
    dungeon.heroes().map(|h| h.distance_to(x, y)).min()
}

/// A hero standing next to the monster, first in actor order
pub fn adjacent_hero<'a>(dungeon: &'a Dungeon, monster: &Actor) -> Option<&'a Actor> {
    dungeon
        .heroes()
        .find(|h| monster.is_adjacent(h.x, h.y))
}

/// Monster in a discovered room that can still do something useful
///
/// A monster next to a hero needs an action to strike; otherwise it needs
/// movement to close in.
pub fn can_act(dungeon: &Dungeon, monster: &Actor) -> bool {
    if monster.is_hero() || !dungeon.is_discovered(monster.x, monster.y) {
        return false;
    }
    if adjacent_hero(dungeon, monster).is_some() {
        monster.actions > 0
    } else {
        monster.moves > 0
    }
}

/// A monster the planner may pick, with its distance to the nearest hero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub dungeon: DungeonId,
    pub actor: ActorId,
    pub distance: i32,
}

/// Eligible monsters in every dungeon holding a hero, in dungeon then actor order
pub fn candidates(world: &World) -> Vec<Candidate> {
    world
        .dungeons
        .iter()
        .filter(|d| d.has_hero())
        .flat_map(|d| {
            d.actors.iter().filter(|a| can_act(d, a)).filter_map(|a| {
                distance_to_nearest_hero(d, a.x, a.y).map(|distance| Candidate {
                    dungeon: d.id,
                    actor: a.id,
                    distance,
                })
            })
        })
        .collect()
}
