#![allow(dead_code)]

use dv_core::actor::{ActorIds, HeroClass};
use dv_core::dungeon::{Dungeon, DungeonGenerator, DungeonId, Room, Tile};
use dv_core::loot::StandardLoot;
use dv_core::moves::{GridMoves, MoveKind};
use dv_core::{Command, EngineOptions, Game, GameRng, PlayerId, Rules};

/// One discovered 7x7 room that is both the start and the stairs room.
/// Interior is (1..=5, 1..=5); heroes enter at (1, 1), stairs at (3, 3).
pub struct OneRoom;

impl DungeonGenerator for OneRoom {
    fn generate(&self, id: DungeonId, level: u32, _rng: &mut GameRng, _ids: &mut ActorIds) -> Dungeon {
        let mut d = Dungeon::new(id, level, 7, 7);
        let mut room = Room::new(0, 0, 7, 7);
        room.start = true;
        room.stairs = true;
        room.discovered = true;
        for (x, y) in room.interior_cells() {
            d.set_tile(x, y, Tile::Floor);
        }
        d.rooms.push(room);
        d
    }
}

pub fn one_room_game(seed: u64) -> Game {
    let rules = Rules::new(Box::new(OneRoom), Box::new(GridMoves), Box::new(StandardLoot));
    Game::with_rules(seed, EngineOptions::default(), rules)
}

pub fn player(id: &str) -> PlayerId {
    PlayerId::new(id)
}

pub fn join(game: &mut Game, id: &str, class: HeroClass) {
    game.apply(
        &player(id),
        Command::Join {
            name: id.to_string(),
            class,
        },
    );
}

/// Milliseconds between logical steps, rounded up
pub const TICK: u64 = 334;

/// Pick a command for whichever hero holds the turn, preferring fights
pub fn autopilot(game: &Game) -> Option<(PlayerId, Command)> {
    let world = game.world();
    if world.activity.is_some() || world.game_over {
        return None;
    }
    let holder = world.turn_order.current_player()?.clone();
    let (_, hero) = world.hero_of(&holder)?;
    if world.moves_for != Some(hero.id) {
        return None;
    }

    let pick = world
        .legal_moves
        .iter()
        .find(|m| m.kind.is_action() && m.kind != MoveKind::Heal)
        .or_else(|| world.legal_moves.iter().find(|m| matches!(m.kind, MoveKind::Open | MoveKind::Chest)))
        .or_else(|| {
            world
                .legal_moves
                .iter()
                .filter(|m| m.kind == MoveKind::Move && hero.moves > 0)
                .max_by_key(|m| (m.depth, m.x, m.y))
        });

    let command = match pick {
        Some(m) => Command::SubmitMove { x: m.x, y: m.y },
        None => Command::EndTurn,
    };
    Some((holder, command))
}

/// Drive the game for `ticks` logical steps, feeding autopilot commands
pub fn run(game: &mut Game, ticks: u64, mut each: impl FnMut(&Game)) {
    let mut now = game.world().clock;
    for _ in 0..ticks {
        if let Some((player, command)) = autopilot(game) {
            // an ignored command leaves no trace, the next tick moves on
            game.apply(&player, command);
        }
        now += TICK;
        game.update(now);
        each(game);
        if game.is_over() {
            break;
        }
    }
}
