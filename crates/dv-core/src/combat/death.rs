//! Death and kill rewards

use crate::DIED_DELAY;
use crate::actor::{ActorId, ActorKind};
use crate::dungeon::DungeonId;
use crate::event::{EventKind, GameEvent};
use crate::loot::LootTable;
use crate::world::World;

/// Remove a slain actor from its dungeon and hand out rewards
///
/// Heroes are moved to the dead list; losing the last one ends the game.
/// Monsters may drop an item, and failing that pay out their gold.
/// Calling this for an actor that is already gone does nothing.
pub fn kill(world: &mut World, loot: &dyn LootTable, dungeon: DungeonId, target: ActorId, extra_delay: u32) {
    let Some(mut actor) = world.dungeon_mut(dungeon).and_then(|d| d.take_actor(target)) else {
        return;
    };
    actor.set_health(0);
    let (x, y) = (actor.x, actor.y);
    world.emit(
        GameEvent::new(EventKind::Died, Some(target), x, y).with_delay(DIED_DELAY + extra_delay),
    );

    if let ActorKind::Monster(kind) = actor.kind {
        if let Some(item) = loot.roll_monster_loot(kind, &mut world.rng) {
            world.inventory.add(item);
            world.emit(GameEvent::new(EventKind::ItemLoot, Some(target), x, y).with_item(item));
        } else if let Some(range) = actor.gold_on_kill {
            let gold = world.rng.range(range.min, range.max);
            world.inventory.add_gold(gold);
            world.emit(
                GameEvent::new(EventKind::GoldLoot, Some(target), x, y).with_value(gold as i32),
            );
        }
        log::debug!("{} {} slain at ({}, {})", kind, target, x, y);
        return;
    }

    log::info!("hero {} has fallen", target);
    world.dead_heroes.push(actor);
    if !world.hero_active() && !world.game_over {
        world.game_over = true;
        world.activity = None;
        world.clear_moves();
        world.emit(GameEvent::new(EventKind::GameOver, None, x, y));
        log::info!("all heroes are dead, game over");
    }
}
