//! Scripted stand-in for human participants

use dv_core::dungeon::Dungeon;
use dv_core::moves::{GameMove, MoveKind};
use dv_core::{Command, Game, PlayerId};

/// Choose the next command for whoever holds the turn
///
/// Fights first, then heals, then doors and chests, then walks toward the
/// stairs once their room is discovered, or toward the nearest closed door
/// until then. Ends the turn when nothing is left.
pub fn next_command(game: &Game) -> Option<(PlayerId, Command)> {
    let world = game.world();
    if world.activity.is_some() || world.game_over {
        return None;
    }
    let holder = world.turn_order.current_player()?.clone();
    let (dungeon, hero) = world.hero_of(&holder)?;
    if world.moves_for != Some(hero.id) {
        return None;
    }
    let moves = &world.legal_moves;

    let pick = first_of(moves, &[MoveKind::Attack, MoveKind::Shoot, MoveKind::Magic])
        .or_else(|| first_of(moves, &[MoveKind::Heal]))
        .or_else(|| first_of(moves, &[MoveKind::Chest, MoveKind::Open]))
        .or_else(|| {
            let (gx, gy) = goal(world.dungeon(dungeon)?, hero.x, hero.y)?;
            moves
                .iter()
                .filter(|m| m.kind == MoveKind::Move)
                .min_by_key(|m| ((m.x - gx).abs() + (m.y - gy).abs(), m.y, m.x))
                .filter(|m| (m.x - gx).abs() + (m.y - gy).abs() < (hero.x - gx).abs() + (hero.y - gy).abs())
        });

    let command = match pick {
        Some(m) => Command::SubmitMove { x: m.x, y: m.y },
        None => Command::EndTurn,
    };
    Some((holder, command))
}

fn first_of<'a>(moves: &'a [GameMove], kinds: &[MoveKind]) -> Option<&'a GameMove> {
    kinds
        .iter()
        .find_map(|kind| moves.iter().find(|m| m.kind == *kind))
}

/// Where the party is headed
fn goal(dungeon: &Dungeon, x: i32, y: i32) -> Option<(i32, i32)> {
    if let Some(room) = dungeon.rooms.iter().find(|r| r.stairs && r.discovered) {
        return Some(room.center());
    }
    dungeon
        .doors
        .iter()
        .filter(|d| !d.open && dungeon.is_discovered(d.x, d.y))
        .min_by_key(|d| ((d.x - x).abs() + (d.y - y).abs(), d.y, d.x))
        .map(|d| (d.x, d.y))
}
