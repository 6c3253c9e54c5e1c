//! Tick driver and command surface
//!
//! [`Game`] owns the [`World`] and the [`Rules`] it is played with. Hosts
//! feed it the shared clock through [`Game::update`] and participant input
//! through [`Game::apply`]; commands land between logical steps, never in
//! the middle of one.

use serde::{Deserialize, Serialize};

use crate::activity::{start_activity, step_activity};
use crate::actor::{Actor, HeroClass};
use crate::event::{EventKind, GameEvent};
use crate::item::{Inventory, ItemId};
use crate::monster::plan_evil_step;
use crate::turn::{advance_turn, give_turn_to};
use crate::world::{EngineOptions, Player, PlayerId, Rules, World};
use crate::{GameError, MAX_HEROES, STEP_INTERVAL_DEN, STEP_INTERVAL_NUM};

/// Participant input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Join { name: String, class: HeroClass },
    SelectSave { index: usize },
    SetClock { time: u64 },
    SubmitMove { x: i32, y: i32 },
    EndTurn,
    Leave,
    UseItem { id: ItemId },
}

/// Outcome of applying a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Applied,
    /// Stale, duplicate or out-of-turn; nothing changed
    Ignored,
}

pub struct Game {
    world: World,
    rules: Rules,
}

impl Game {
    /// New game with the default rules and a generated first level
    pub fn new(seed: u64, options: EngineOptions) -> Self {
        Self::with_rules(seed, options, Rules::default())
    }

    pub fn with_rules(seed: u64, options: EngineOptions, rules: Rules) -> Self {
        let mut world = World::new(seed, options);
        world.generate_dungeon(&rules, 1);
        log::info!("new game with seed {}", seed);
        Self { world, rules }
    }

    /// Resume from a snapshot of another replica
    pub fn from_world(world: World, rules: Rules) -> Self {
        Self { world, rules }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn into_world(self) -> World {
        self.world
    }

    /// Events produced by the most recent logical step and any commands since
    pub fn events(&self) -> &[GameEvent] {
        self.world.events.events()
    }

    pub fn is_over(&self) -> bool {
        self.world.game_over
    }

    /// Advance the clock, running a logical step when one is due
    ///
    /// At most one step runs per call. Returns true if it did.
    pub fn update(&mut self, now: u64) -> bool {
        self.world.clock = self.world.clock.max(now);
        let elapsed = self.world.clock.saturating_sub(self.world.last_step);
        if elapsed < STEP_INTERVAL_NUM.div_ceil(STEP_INTERVAL_DEN) {
            return false;
        }
        self.world.last_step = self.world.clock;
        self.step();
        true
    }

    /// One logical step
    pub fn step(&mut self) {
        let world = &mut self.world;
        world.events.clear();
        world.prune_dungeons();
        if world.game_over {
            return;
        }

        if world.activity.is_some() {
            step_activity(world, &self.rules);
        } else if world.turn_order.is_evil_turn() {
            plan_evil_step(world, &self.rules);
        } else if world.legal_moves.is_empty() {
            advance_turn(world, &self.rules);
        }
    }

    /// Apply participant input between logical steps
    pub fn apply(&mut self, player: &PlayerId, command: Command) -> CommandResult {
        let result = match command {
            Command::Join { name, class } => self.participant_joined(player, &name, class),
            Command::SelectSave { index } => self.select_save(player, index),
            Command::SetClock { time } => {
                self.world.clock = self.world.clock.max(time);
                CommandResult::Applied
            }
            Command::SubmitMove { x, y } => self.submit_move(player, x, y),
            Command::EndTurn => self.end_turn(player),
            Command::Leave => self.participant_left(player),
            Command::UseItem { id } => self.use_item(player, id),
        };
        if result == CommandResult::Ignored {
            log::debug!("ignored command from {}", player);
        }
        result
    }

    /// Add a participant's hero to the party
    pub fn participant_joined(&mut self, player: &PlayerId, name: &str, class: HeroClass) -> CommandResult {
        let world = &mut self.world;
        if world.game_over || world.player(player).is_some() || world.players.len() >= MAX_HEROES {
            return CommandResult::Ignored;
        }
        let was_empty = !world.hero_active();

        let dungeon = match world.party_dungeon() {
            Some(id) => id,
            None => world.generate_dungeon(&self.rules, 1),
        };
        let cell = world
            .dungeon(dungeon)
            .ok_or(GameError::UnknownDungeon(dungeon))
            .and_then(|d| d.start_cell());
        let (x, y) = match cell {
            Ok(cell) => cell,
            Err(err) => {
                log::error!("cannot place {}: {err}", name);
                return CommandResult::Ignored;
            }
        };

        let id = world.ids.next_id();
        let hero = Actor::new_hero(id, player.clone(), class, x, y);
        let Some(level) = world.dungeon_mut(dungeon) else {
            return CommandResult::Ignored;
        };
        level.actors.push(hero);
        world.players.push(Player {
            id: player.clone(),
            name: name.to_string(),
            class,
            actor: id,
            dungeon,
        });
        world.turn_order.insert(player.clone());
        log::info!("{} joined as {} ({})", name, class, id);

        if was_empty && world.turn_order.is_evil_turn() && world.activity.is_none() {
            give_turn_to(world, &self.rules, player);
        }
        CommandResult::Applied
    }

    /// Remove a participant, passing the turn on first if they hold it
    pub fn participant_left(&mut self, player: &PlayerId) -> CommandResult {
        let world = &mut self.world;
        let Some(actor) = world.player(player).map(|p| p.actor) else {
            return CommandResult::Ignored;
        };

        if world.activity.as_ref().is_some_and(|a| a.actor == actor) {
            world.activity = None;
        }
        if world.turn_order.is_turn_of(player) {
            advance_turn(world, &self.rules);
        }

        if let Some(dungeon) = world.find_actor(actor).map(|(d, _)| d)
            && let Some(level) = world.dungeon_mut(dungeon)
        {
            level.take_actor(actor);
        }
        if world.moves_for == Some(actor) {
            world.clear_moves();
        }
        world.turn_order.remove(player);
        world.players.retain(|p| &p.id != player);
        log::info!("{} left the game", player);
        CommandResult::Applied
    }

    /// Idle between activities and holding the turn
    fn may_act(&self, player: &PlayerId) -> bool {
        !self.world.game_over && self.world.activity.is_none() && self.world.turn_order.is_turn_of(player)
    }

    fn submit_move(&mut self, player: &PlayerId, x: i32, y: i32) -> CommandResult {
        if !self.may_act(player) {
            return CommandResult::Ignored;
        }
        let Some((dungeon, actor)) = self.world.hero_of(player).map(|(d, a)| (d, a.id)) else {
            return CommandResult::Ignored;
        };
        if !self.world.is_legal_target(actor, x, y) {
            return CommandResult::Ignored;
        }
        start_activity(&mut self.world, dungeon, actor, x, y, false);
        CommandResult::Applied
    }

    fn end_turn(&mut self, player: &PlayerId) -> CommandResult {
        if !self.may_act(player) {
            return CommandResult::Ignored;
        }
        advance_turn(&mut self.world, &self.rules);
        CommandResult::Applied
    }

    fn use_item(&mut self, player: &PlayerId, id: ItemId) -> CommandResult {
        if !self.may_act(player) || self.world.inventory.get(id).is_none() {
            return CommandResult::Ignored;
        }
        let Some((dungeon, actor)) = self.world.hero_of(player).map(|(d, a)| (d, a.id)) else {
            return CommandResult::Ignored;
        };
        let Some(item) = self.world.inventory.remove(id) else {
            return CommandResult::Ignored;
        };
        let Some(hero) = self.world.actor_mut(dungeon, actor) else {
            return CommandResult::Ignored;
        };
        item.kind.apply(hero);
        let (x, y) = (hero.x, hero.y);
        self.world
            .emit(GameEvent::new(EventKind::ItemUsed, Some(actor), x, y).with_item(item.kind));
        self.world.recalc_moves(&self.rules, actor);
        CommandResult::Applied
    }

    /// Restore a save slot and rebuild the dungeon from its level
    fn select_save(&mut self, player: &PlayerId, index: usize) -> CommandResult {
        let world = &mut self.world;
        if world.game_over || world.activity.is_some() {
            return CommandResult::Ignored;
        }
        let Some(slot) = world
            .player(player)
            .and_then(|p| world.saves.get(&p.name, index))
            .cloned()
        else {
            return CommandResult::Ignored;
        };

        let heroes: Vec<Actor> = world
            .players
            .iter()
            .filter_map(|p| world.find_actor(p.actor).map(|(_, a)| a.clone()))
            .collect();
        let fresh = match world.build_party_dungeon(&self.rules, slot.level, heroes) {
            Ok(fresh) => fresh,
            Err(err) => {
                log::error!("save restore abandoned: {err}");
                return CommandResult::Ignored;
            }
        };

        let id = fresh.id;
        world.dungeons = vec![fresh];
        for p in &mut world.players {
            p.dungeon = id;
        }
        world.inventory = Inventory::restore(slot.inventory.clone(), slot.gold);
        match world.turn_order.current_player().cloned() {
            Some(holder) => {
                if let Some(actor) = world.player(&holder).map(|p| p.actor) {
                    world.recalc_moves(&self.rules, actor);
                }
            }
            None => world.clear_moves(),
        }
        log::info!("{} restored save {} ({})", player, index, slot.descriptor);
        CommandResult::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRng;
    use crate::actor::{ActorIds, MonsterKind};
    use crate::dungeon::{DungeonGenerator, Dungeon, DungeonId, Room, Tile};
    use crate::loot::StandardLoot;
    use crate::moves::GridMoves;
    use crate::world::SaveSlot;

    fn game() -> Game {
        Game::new(99, EngineOptions::default())
    }

    fn p(id: &str) -> PlayerId {
        PlayerId::new(id)
    }

    fn join(game: &mut Game, id: &str, class: HeroClass) -> CommandResult {
        game.apply(&p(id), Command::Join { name: id.to_string(), class })
    }

    #[test]
    fn test_new_game_has_first_level() {
        let game = game();
        assert_eq!(game.world().dungeons.len(), 1);
        assert_eq!(game.world().dungeons[0].level, 1);
        assert!(game.world().turn_order.is_evil_turn());
    }

    #[test]
    fn test_first_join_takes_the_turn() {
        let mut game = game();
        assert_eq!(join(&mut game, "a", HeroClass::Warrior), CommandResult::Applied);
        assert!(game.world().turn_order.is_turn_of(&p("a")));
        assert!(!game.world().legal_moves.is_empty());
        assert_eq!(join(&mut game, "b", HeroClass::Mage), CommandResult::Applied);
        assert!(game.world().turn_order.is_turn_of(&p("a")));
    }

    #[test]
    fn test_join_limits() {
        let mut game = game();
        assert_eq!(join(&mut game, "a", HeroClass::Warrior), CommandResult::Applied);
        assert_eq!(join(&mut game, "a", HeroClass::Warrior), CommandResult::Ignored);
        for id in ["b", "c", "d"] {
            assert_eq!(join(&mut game, id, HeroClass::Archer), CommandResult::Applied);
        }
        assert_eq!(join(&mut game, "e", HeroClass::Cleric), CommandResult::Ignored);
    }

    #[test]
    fn test_step_interval() {
        let mut game = game();
        assert!(!game.update(333));
        assert!(game.update(334));
        assert!(!game.update(500));
        assert!(game.update(668));
        // one step per call even after a long gap
        assert!(game.update(10_000));
        assert!(!game.update(10_000));
    }

    #[test]
    fn test_clock_at_the_limit() {
        let mut game = game();
        join(&mut game, "a", HeroClass::Warrior);
        assert_eq!(game.apply(&p("a"), Command::SetClock { time: u64::MAX }), CommandResult::Applied);
        assert!(game.update(u64::MAX));
        assert_eq!(game.world().clock, u64::MAX);
        assert!(!game.update(u64::MAX));
        assert!(!game.update(0));
    }

    #[test]
    fn test_out_of_turn_commands_ignored() {
        let mut game = game();
        join(&mut game, "a", HeroClass::Warrior);
        join(&mut game, "b", HeroClass::Warrior);
        assert_eq!(game.apply(&p("b"), Command::EndTurn), CommandResult::Ignored);
        assert_eq!(game.apply(&p("b"), Command::SubmitMove { x: 1, y: 1 }), CommandResult::Ignored);
        assert_eq!(game.apply(&p("a"), Command::SubmitMove { x: -5, y: -5 }), CommandResult::Ignored);
        assert_eq!(game.apply(&p("a"), Command::EndTurn), CommandResult::Applied);
        assert!(game.world().turn_order.is_turn_of(&p("b")));
    }

    #[test]
    fn test_submit_move_starts_activity() {
        let mut game = game();
        join(&mut game, "a", HeroClass::Warrior);
        let target = game.world().legal_moves[0];
        assert_eq!(
            game.apply(&p("a"), Command::SubmitMove { x: target.x, y: target.y }),
            CommandResult::Applied
        );
        assert!(game.world().activity.is_some());
        // no second activity while one is in flight
        assert_eq!(
            game.apply(&p("a"), Command::SubmitMove { x: target.x, y: target.y }),
            CommandResult::Ignored
        );
    }

    #[test]
    fn test_leave_on_turn_passes_it_on() {
        let mut game = game();
        join(&mut game, "a", HeroClass::Warrior);
        join(&mut game, "b", HeroClass::Archer);
        assert_eq!(game.apply(&p("a"), Command::Leave), CommandResult::Applied);
        assert!(game.world().turn_order.is_turn_of(&p("b")));
        assert_eq!(game.world().players.len(), 1);
        assert_eq!(game.world().turn_order.len(), 2);
        assert_eq!(game.world().dungeons[0].heroes().count(), 1);
        assert_eq!(game.apply(&p("a"), Command::Leave), CommandResult::Ignored);
    }

    #[test]
    fn test_use_item() {
        let mut game = game();
        join(&mut game, "a", HeroClass::Warrior);
        let id = game.world_mut().inventory.add(crate::item::ItemKind::Whetstone);
        assert_eq!(game.apply(&p("a"), Command::UseItem { id }), CommandResult::Applied);
        assert!(game.world().inventory.items.is_empty());
        let hero = game.world().hero_of(&p("a")).unwrap().1;
        assert_eq!(hero.attack_mod, 1);
        assert_eq!(game.world().events.count(EventKind::ItemUsed), 1);
        assert_eq!(game.apply(&p("a"), Command::UseItem { id }), CommandResult::Ignored);
    }

    #[test]
    fn test_select_save_restores_and_regenerates() {
        let mut game = game();
        join(&mut game, "a", HeroClass::Warrior);
        game.world_mut().inventory.add_gold(17);
        game.world_mut().record_save(&p("a"), 3);
        game.world_mut().inventory.add_gold(100);

        assert_eq!(game.apply(&p("a"), Command::SelectSave { index: 0 }), CommandResult::Applied);
        let world = game.world();
        assert_eq!(world.inventory.gold, 17);
        assert_eq!(world.dungeons.len(), 1);
        assert_eq!(world.dungeons[0].level, 3);
        assert!(world.dungeons[0].has_hero());
        assert_eq!(world.players[0].dungeon, world.dungeons[0].id);
        assert_eq!(game.apply(&p("a"), Command::SelectSave { index: 5 }), CommandResult::Ignored);
    }

    #[test]
    fn test_set_clock_is_monotonic() {
        let mut game = game();
        game.apply(&p("x"), Command::SetClock { time: 500 });
        game.apply(&p("x"), Command::SetClock { time: 100 });
        assert_eq!(game.world().clock, 500);
    }

    /// Level 1 is a plain room, deeper levels have nowhere to stand
    struct NoDeeperStart;

    impl DungeonGenerator for NoDeeperStart {
        fn generate(&self, id: DungeonId, level: u32, rng: &mut GameRng, ids: &mut ActorIds) -> Dungeon {
            let mut d = Dungeon::new(id, level, 7, 7);
            let mut room = Room::new(0, 0, 7, 7);
            room.start = level == 1;
            room.discovered = true;
            for (x, y) in room.interior_cells() {
                d.set_tile(x, y, Tile::Floor);
            }
            d.rooms.push(room);
            // draw from the stream so a rollback is observable
            let id = ids.next_id();
            let (x, y) = (1 + rng.rn2(5) as i32, 5);
            d.actors.push(Actor::new_monster(id, MonsterKind::Rat, x, y));
            d
        }
    }

    #[test]
    fn test_failed_restore_changes_nothing() {
        let rules = Rules::new(Box::new(NoDeeperStart), Box::new(GridMoves), Box::new(StandardLoot));
        let mut game = Game::with_rules(4, EngineOptions::default(), rules);
        join(&mut game, "a", HeroClass::Cleric);
        let slot = SaveSlot {
            level: 3,
            gold: 40,
            inventory: Vec::new(),
            descriptor: "Level 3 Cleric, 40 gold".to_string(),
        };
        game.world_mut().saves.record("a", slot, 3);
        let before = game.world().clone();

        assert_eq!(game.apply(&p("a"), Command::SelectSave { index: 0 }), CommandResult::Ignored);
        assert_eq!(game.world(), &before);
    }
}
