use super::{adjacent_hero, candidates, distance_to_nearest_hero};
use crate::activity::start_activity;
use crate::actor::ActorId;
use crate::dungeon::DungeonId;
use crate::moves::MoveKind;
use crate::turn::advance_turn;
use crate::world::{Rules, World};

/// Plan one evil action for this logical step
///
/// The monster closest to a hero acts first. Next to a hero it commits to
/// an attack, paying the action up front; otherwise it walks to the legal
/// cell closest to a hero, but only if that gets it strictly closer. A
/// monster with nothing worth doing is exhausted for the turn. When no
/// monster can act, or the tick budget is spent, the turn passes on.
pub fn plan_evil_step(world: &mut World, rules: &Rules) {
    if !world.hero_active() {
        return;
    }

    world.evil_turn_budget = world.evil_turn_budget.saturating_sub(1);
    if world.evil_turn_budget == 0 {
        log::warn!("evil turn budget spent, forcing hand-off");
        advance_turn(world, rules);
        return;
    }

    // min_by_key keeps the first of equal minima
    let Some(pick) = candidates(world).into_iter().min_by_key(|c| c.distance) else {
        log::debug!("no monster can act, evil turn ends");
        advance_turn(world, rules);
        return;
    };

    world.recalc_moves(rules, pick.actor);
    let Some(dungeon) = world.dungeon(pick.dungeon) else {
        return;
    };
    let Some(monster) = dungeon.actor(pick.actor) else {
        return;
    };

    if let Some(hero) = adjacent_hero(dungeon, monster) {
        let (hx, hy) = (hero.x, hero.y);
        let can_strike = world
            .legal_moves
            .iter()
            .any(|m| m.kind == MoveKind::Attack && (m.x, m.y) == (hx, hy));
        if can_strike && start_activity(world, pick.dungeon, pick.actor, hx, hy, true) {
            if let Some(monster) = world.actor_mut(pick.dungeon, pick.actor) {
                monster.actions -= 1;
            }
            log::debug!("{} attacks the hero at ({}, {})", pick.actor, hx, hy);
        } else {
            exhaust(world, pick.dungeon, pick.actor);
        }
        return;
    }

    let best = world
        .legal_moves
        .iter()
        .filter(|m| m.kind == MoveKind::Move)
        .filter_map(|m| distance_to_nearest_hero(dungeon, m.x, m.y).map(|d| (d, m.x, m.y)))
        .min_by_key(|&(d, _, _)| d);

    match best {
        Some((distance, x, y)) if distance < pick.distance => {
            start_activity(world, pick.dungeon, pick.actor, x, y, false);
            log::debug!("{} closes in to ({}, {})", pick.actor, x, y);
        }
        _ => exhaust(world, pick.dungeon, pick.actor),
    }
}

fn exhaust(world: &mut World, dungeon: DungeonId, actor: ActorId) {
    if let Some(monster) = world.actor_mut(dungeon, actor) {
        monster.exhaust();
    }
    log::debug!("{} has nothing useful to do", actor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Actor, HeroClass, MonsterKind};
    use crate::dungeon::{Dungeon, Room, Tile};
    use crate::world::{EngineOptions, PlayerId};

    fn arena(actors: Vec<Actor>) -> World {
        let mut d = Dungeon::new(DungeonId(0), 1, 11, 7);
        let mut room = Room::new(0, 0, 11, 7);
        room.discovered = true;
        room.start = true;
        for (x, y) in room.interior_cells() {
            d.set_tile(x, y, Tile::Floor);
        }
        d.rooms.push(room);
        d.actors = actors;
        let mut world = World::new(5, EngineOptions::default());
        world.dungeons.push(d);
        world
    }

    fn hero(x: i32, y: i32) -> Actor {
        Actor::new_hero(ActorId(1), PlayerId::new("p"), HeroClass::Warrior, x, y)
    }

    #[test]
    fn test_adjacent_monster_precommits_attack() {
        let rules = Rules::default();
        let mut world = arena(vec![hero(2, 2), Actor::new_monster(ActorId(2), MonsterKind::Goblin, 3, 2)]);

        plan_evil_step(&mut world, &rules);

        let activity = world.activity.clone().unwrap();
        assert_eq!((activity.tx, activity.ty), (2, 2));
        assert!(activity.precommitted);
        assert_eq!(world.find_actor(ActorId(2)).unwrap().1.actions, 0);
    }

    #[test]
    fn test_closest_monster_moves_first() {
        let rules = Rules::default();
        let mut world = arena(vec![
            hero(1, 1),
            Actor::new_monster(ActorId(2), MonsterKind::Rat, 9, 5),
            Actor::new_monster(ActorId(3), MonsterKind::Rat, 5, 3),
        ]);

        plan_evil_step(&mut world, &rules);

        let activity = world.activity.clone().unwrap();
        assert_eq!(activity.actor, ActorId(3));
        assert!(!activity.precommitted);
        let d = world.dungeon(DungeonId(0)).unwrap();
        let after = distance_to_nearest_hero(d, activity.tx, activity.ty).unwrap();
        assert!(after < 6);
    }

    #[test]
    fn test_ties_go_to_first_in_order() {
        let rules = Rules::default();
        let mut world = arena(vec![
            hero(5, 3),
            Actor::new_monster(ActorId(2), MonsterKind::Rat, 1, 3),
            Actor::new_monster(ActorId(3), MonsterKind::Rat, 9, 3),
        ]);
        plan_evil_step(&mut world, &rules);
        assert_eq!(world.activity.map(|a| a.actor), Some(ActorId(2)));
    }

    #[test]
    fn test_no_improvement_exhausts() {
        let rules = Rules::default();
        let rat = Actor::new_monster(ActorId(2), MonsterKind::Rat, 5, 3);
        let mut world = arena(vec![hero(1, 3), rat]);
        // walled in, so no move gets it closer
        for (x, y) in [(4, 3), (6, 3), (5, 2), (5, 4)] {
            world.dungeons[0].set_tile(x, y, Tile::Wall);
        }

        plan_evil_step(&mut world, &rules);

        assert!(world.activity.is_none());
        let rat = world.find_actor(ActorId(2)).unwrap().1;
        assert_eq!((rat.moves, rat.actions), (0, 0));
    }

    #[test]
    fn test_no_candidates_passes_turn() {
        let rules = Rules::default();
        let mut world = arena(vec![hero(1, 1)]);
        world.turn_order.insert(PlayerId::new("p"));
        world.players.push(crate::world::Player {
            id: PlayerId::new("p"),
            name: "p".to_string(),
            class: HeroClass::Warrior,
            actor: ActorId(1),
            dungeon: DungeonId(0),
        });
        assert!(world.turn_order.is_evil_turn());

        plan_evil_step(&mut world, &rules);

        assert!(world.turn_order.is_turn_of(&PlayerId::new("p")));
    }

    #[test]
    fn test_budget_forces_hand_off() {
        let rules = Rules::default();
        let mut world = arena(vec![hero(1, 1), Actor::new_monster(ActorId(2), MonsterKind::Rat, 9, 5)]);
        world.evil_turn_budget = 1;

        plan_evil_step(&mut world, &rules);

        assert!(world.activity.is_none());
        // no hero holds a slot, so the turn wraps straight back to evil
        assert!(world.turn_order.is_evil_turn());
        assert_eq!(world.evil_turn_budget, world.options.evil_turn_max);
    }

    #[test]
    fn test_no_heroes_does_nothing() {
        let rules = Rules::default();
        let mut world = arena(vec![Actor::new_monster(ActorId(2), MonsterKind::Rat, 9, 5)]);
        let budget = world.evil_turn_budget;
        plan_evil_step(&mut world, &rules);
        assert_eq!(world.evil_turn_budget, budget);
        assert!(world.events.is_empty());
    }
}
