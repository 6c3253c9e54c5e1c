//! The in-flight activity
//!
//! An activity is one actor working toward one destination cell chosen from
//! its legal moves. Each logical step resolves a single [`Step`] along the
//! way: walking one cell, opening a door or chest, or performing an attack
//! or heal at the destination. At most one activity exists at a time.

use serde::{Deserialize, Serialize};

use crate::{
    HEAL_AMOUNT, HEAL_COST, MAGIC_ATTACK_COST, MAGIC_MULTIPLIER, MELEE_DAMAGE_DELAY,
    RANGED_DAMAGE_DELAY,
};
use crate::actor::ActorId;
use crate::combat;
use crate::dungeon::DungeonId;
use crate::error::GameError;
use crate::event::{EventKind, GameEvent};
use crate::moves::{MoveKind, Step};
use crate::world::{Rules, World};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub dungeon: DungeonId,
    pub actor: ActorId,
    pub start_time: u64,
    /// Destination cell
    pub tx: i32,
    pub ty: i32,
    /// The action was paid when the activity was planned
    pub precommitted: bool,
}

/// Begin an activity, returns false if one is already in flight
pub fn start_activity(
    world: &mut World,
    dungeon: DungeonId,
    actor: ActorId,
    tx: i32,
    ty: i32,
    precommitted: bool,
) -> bool {
    if world.activity.is_some() {
        return false;
    }
    world.activity = Some(Activity {
        dungeon,
        actor,
        start_time: world.clock,
        tx,
        ty,
        precommitted,
    });
    true
}

/// Advance the current activity by one step
///
/// Returns false when there is no activity to advance.
pub fn step_activity(world: &mut World, rules: &Rules) -> bool {
    let Some(activity) = world.activity.clone() else {
        return false;
    };

    let step = world.dungeon(activity.dungeon).and_then(|dungeon| {
        let actor = dungeon.actor(activity.actor)?;
        rules
            .moves
            .next_step(dungeon, actor, &world.legal_moves, activity.tx, activity.ty)
    });

    match step {
        Some(step) => {
            apply_step(world, rules, &activity, step);
            if (step.x, step.y) == (activity.tx, activity.ty) {
                complete(world, rules, &activity);
            }
        }
        None => complete(world, rules, &activity),
    }
    true
}

fn apply_step(world: &mut World, rules: &Rules, activity: &Activity, step: Step) {
    let now = world.clock;
    let (id, x, y) = (activity.actor, step.x, step.y);

    match step.kind {
        MoveKind::Move => {
            if let Some(actor) = world.actor_mut(activity.dungeon, id) {
                actor.step_to(x, y, now);
                actor.set_moves(actor.moves - 1);
                world.emit(GameEvent::new(EventKind::Step, Some(id), x, y));
            }
        }
        MoveKind::Open => {
            if world.dungeon_mut(activity.dungeon).is_some_and(|d| d.open_door(x, y)) {
                world.emit(GameEvent::new(EventKind::Open, Some(id), x, y));
            }
        }
        MoveKind::Chest => {
            let Some(chest) = world.dungeon_mut(activity.dungeon).and_then(|d| d.open_chest(x, y))
            else {
                return;
            };
            let item = rules.loot.chest_item(&chest);
            world.inventory.add(item);
            world.emit(GameEvent::new(EventKind::ChestOpen, Some(id), x, y).with_item(item));
            world.emit(GameEvent::new(EventKind::ItemLoot, Some(id), x, y).with_item(item));
        }
        MoveKind::Shoot => {
            strike(world, rules, activity, step, 1, EventKind::Shoot, RANGED_DAMAGE_DELAY);
        }
        MoveKind::Magic => {
            strike(world, rules, activity, step, MAGIC_MULTIPLIER, EventKind::Magic, RANGED_DAMAGE_DELAY);
        }
        MoveKind::Attack => {
            strike(world, rules, activity, step, 1, EventKind::Attack, MELEE_DAMAGE_DELAY);
        }
        MoveKind::Heal => heal(world, rules, activity, step),
    }
}

/// Pay for an action unless the planner already did
fn spend_action(world: &mut World, activity: &Activity, magic_cost: i32) {
    let precommitted = activity.precommitted;
    if let Some(actor) = world.actor_mut(activity.dungeon, activity.actor) {
        if !precommitted {
            actor.actions = (actor.actions - 1).max(0);
        }
        actor.set_magic(actor.magic - magic_cost);
    }
}

fn strike(
    world: &mut World,
    rules: &Rules,
    activity: &Activity,
    step: Step,
    multiplier: u32,
    kind: EventKind,
    delay: u32,
) {
    let Some(dungeon) = world.dungeon(activity.dungeon) else {
        return;
    };
    let (Some(attacker), Some(defender)) = (
        dungeon.actor(activity.actor).cloned(),
        dungeon.actor_at(step.x, step.y).cloned(),
    ) else {
        finish_engagement(world, rules, activity);
        return;
    };

    let cost = if step.kind == MoveKind::Magic { MAGIC_ATTACK_COST } else { 0 };
    spend_action(world, activity, cost);

    let damage = combat::resolve(&attacker, &defender, multiplier, &mut world.rng);
    let dead = world
        .actor_mut(activity.dungeon, defender.id)
        .is_some_and(|d| d.take_damage(damage));

    let value = damage as i32;
    world.emit(GameEvent::new(kind, Some(attacker.id), step.x, step.y).with_value(value));
    world.emit(
        GameEvent::new(EventKind::Damage, Some(defender.id), step.x, step.y)
            .with_value(value)
            .with_delay(delay),
    );
    log::debug!("{} hits {} for {}", attacker.id, defender.id, damage);

    if dead {
        combat::kill(world, rules.loot.as_ref(), activity.dungeon, defender.id, delay);
    }
    finish_engagement(world, rules, activity);
}

fn heal(world: &mut World, rules: &Rules, activity: &Activity, step: Step) {
    spend_action(world, activity, HEAL_COST);

    let target = world
        .dungeon(activity.dungeon)
        .and_then(|d| d.actor_at(step.x, step.y))
        .map(|a| a.id);
    if let Some(target) = target
        && let Some(ally) = world.actor_mut(activity.dungeon, target)
    {
        let before = ally.health;
        ally.set_health(ally.health + HEAL_AMOUNT);
        let restored = ally.health - before;
        world.emit(
            GameEvent::new(EventKind::Heal, Some(activity.actor), step.x, step.y).with_value(restored),
        );
    }
    finish_engagement(world, rules, activity);
}

/// Engaging forfeits any movement left this turn
fn finish_engagement(world: &mut World, rules: &Rules, activity: &Activity) {
    if world.game_over {
        return;
    }
    if let Some(actor) = world.actor_mut(activity.dungeon, activity.actor) {
        actor.set_moves(0);
    }
    world.recalc_moves(rules, activity.actor);
}

fn complete(world: &mut World, rules: &Rules, activity: &Activity) {
    if let Err(err) = take_stairs(world, rules, activity) {
        log::error!("stairs transition abandoned: {err}");
    }
    world.activity = None;
    if world.game_over {
        world.clear_moves();
    } else {
        world.recalc_moves(rules, activity.actor);
    }
}

/// Move a hero standing on the stairs down to the next level
fn take_stairs(world: &mut World, rules: &Rules, activity: &Activity) -> Result<(), GameError> {
    let Some(dungeon) = world.dungeon(activity.dungeon) else {
        return Ok(());
    };
    let Some(actor) = dungeon.actor(activity.actor) else {
        return Ok(());
    };
    if !actor.is_hero() || dungeon.stairs_at(actor.x, actor.y).is_none() {
        return Ok(());
    }
    let level = dungeon.level + 1;
    let owner = actor.owner.clone();

    let target = match world.dungeon_at_level(level) {
        Some(existing) => existing.id,
        None => world.generate_dungeon(rules, level),
    };
    if let Some(owner) = &owner {
        world.record_save(owner, level);
    }

    let (x, y) = world
        .dungeon(target)
        .ok_or(GameError::UnknownDungeon(target))?
        .start_cell()?;
    let mut hero = world
        .dungeon_mut(activity.dungeon)
        .and_then(|d| d.take_actor(activity.actor))
        .ok_or(GameError::UnknownActor(activity.actor, activity.dungeon))?;
    hero.place_at(x, y);
    world
        .dungeon_mut(target)
        .ok_or(GameError::UnknownDungeon(target))?
        .actors
        .push(hero);

    if let Some(player) = owner.as_ref().and_then(|o| world.player_mut(o)) {
        player.dungeon = target;
    }
    world.emit(GameEvent::new(EventKind::Stairs, Some(activity.actor), x, y).with_value(level as i32));
    log::info!("{} descends to level {}", activity.actor, level);
    Ok(())
}
