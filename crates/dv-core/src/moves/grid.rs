//! Breadth-first move enumeration on the 4-connected tile grid

use std::collections::VecDeque;

use super::{GameMove, MoveKind, MoveRules, Step};
use crate::actor::{Actor, CombatStyle};
use crate::dungeon::Dungeon;
use crate::{HEAL_COST, MAGIC_ATTACK_COST, RANGED_REACH};

/// Neighbour order is fixed so every replica enumerates identically
const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

#[derive(Debug, Clone, Copy, Default)]
pub struct GridMoves;

impl GridMoves {
    fn melee_attacks(actor: &Actor) -> bool {
        match actor.combat_style() {
            CombatStyle::Melee => true,
            CombatStyle::Ranged => false,
            CombatStyle::Magic => actor.magic < MAGIC_ATTACK_COST,
        }
    }

    /// Kind of the ranged move available, if any
    fn ranged_kind(actor: &Actor) -> Option<MoveKind> {
        match actor.combat_style() {
            CombatStyle::Ranged => Some(MoveKind::Shoot),
            CombatStyle::Magic if actor.magic >= MAGIC_ATTACK_COST => Some(MoveKind::Magic),
            _ => None,
        }
    }

    /// Interaction available on a cell next to a reached one
    fn interaction(dungeon: &Dungeon, actor: &Actor, x: i32, y: i32) -> Option<MoveKind> {
        if let Some(other) = dungeon.actor_at(x, y) {
            let attack = other.is_enemy_of(actor) && actor.actions > 0 && Self::melee_attacks(actor);
            return attack.then_some(MoveKind::Attack);
        }
        if !actor.is_hero() {
            return None;
        }
        if dungeon.door_at(x, y).is_some_and(|d| !d.open) {
            return Some(MoveKind::Open);
        }
        if dungeon.chest_at(x, y).is_some_and(|c| !c.open) {
            return Some(MoveKind::Chest);
        }
        None
    }

    /// Cells from depth 1 up to the target, walking back through `Move` entries
    fn path_to(moves: &[GameMove], target: &GameMove) -> Option<Vec<(i32, i32)>> {
        let mut path = vec![(target.x, target.y)];
        let (mut cx, mut cy) = (target.x, target.y);
        let mut depth = target.depth;
        while depth > 1 {
            let prev = moves.iter().find(|m| {
                m.kind == MoveKind::Move
                    && m.depth == depth - 1
                    && (m.x - cx).abs() + (m.y - cy).abs() == 1
            })?;
            cx = prev.x;
            cy = prev.y;
            path.push((cx, cy));
            depth -= 1;
        }
        path.reverse();
        Some(path)
    }
}

impl MoveRules for GridMoves {
    fn legal_moves(&self, dungeon: &Dungeon, actor: &Actor) -> Vec<GameMove> {
        let (sx, sy) = (actor.x, actor.y);
        let entry = |x, y, kind, depth| GameMove {
            x,
            y,
            sx,
            sy,
            kind,
            depth,
        };

        let mut out = Vec::new();
        let mut seen = vec![false; (dungeon.width.max(0) * dungeon.height.max(0)) as usize];
        let mark = |seen: &mut Vec<bool>, x: i32, y: i32| -> bool {
            if !dungeon.in_bounds(x, y) {
                return false;
            }
            let i = (y * dungeon.width + x) as usize;
            !std::mem::replace(&mut seen[i], true)
        };

        mark(&mut seen, sx, sy);
        let mut queue = VecDeque::from([(sx, sy, 0u32)]);
        let reach = actor.moves.max(0) as u32;

        while let Some((x, y, depth)) = queue.pop_front() {
            for (dx, dy) in DIRECTIONS {
                let (nx, ny) = (x + dx, y + dy);
                if !dungeon.in_bounds(nx, ny) {
                    continue;
                }
                if depth < reach && dungeon.is_free(nx, ny) {
                    if mark(&mut seen, nx, ny) {
                        out.push(entry(nx, ny, MoveKind::Move, depth + 1));
                        queue.push_back((nx, ny, depth + 1));
                    }
                } else if let Some(kind) = Self::interaction(dungeon, actor, nx, ny) {
                    if mark(&mut seen, nx, ny) {
                        out.push(entry(nx, ny, kind, depth + 1));
                    }
                }
            }
        }

        if actor.actions > 0 {
            if let Some(kind) = Self::ranged_kind(actor) {
                for target in &dungeon.actors {
                    if target.is_enemy_of(actor)
                        && actor.distance_to(target.x, target.y) <= RANGED_REACH
                        && dungeon.is_discovered(target.x, target.y)
                    {
                        out.push(entry(target.x, target.y, kind, 1));
                    }
                }
            }

            if actor.can_heal() && actor.magic >= HEAL_COST {
                for ally in dungeon.heroes() {
                    if actor.distance_to(ally.x, ally.y) <= 1 && ally.health < ally.max_health {
                        out.push(entry(ally.x, ally.y, MoveKind::Heal, 1));
                    }
                }
            }
        }

        out
    }

    fn next_step(
        &self,
        dungeon: &Dungeon,
        actor: &Actor,
        moves: &[GameMove],
        tx: i32,
        ty: i32,
    ) -> Option<Step> {
        let target = moves.iter().find(|m| m.x == tx && m.y == ty)?;
        if target.kind.is_ranged() {
            return Some(Step {
                kind: target.kind,
                x: tx,
                y: ty,
            });
        }

        let path = Self::path_to(moves, target)?;
        let next = if (actor.x, actor.y) == (target.sx, target.sy) {
            0
        } else {
            path.iter().position(|&c| c == (actor.x, actor.y))? + 1
        };
        let &(x, y) = path.get(next)?;

        let kind = if (x, y) == (tx, ty) {
            target.kind
        } else {
            MoveKind::Move
        };
        if kind == MoveKind::Move && !dungeon.is_free(x, y) {
            return None;
        }
        Some(Step { kind, x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorId, HeroClass, MonsterKind};
    use crate::dungeon::{Chest, Door, DungeonId, Room, Tile};
    use crate::item::ItemKind;
    use crate::world::PlayerId;

    /// One 9x7 discovered room, interior (1..=7, 1..=5), door east at (8, 3)
    fn open_room() -> Dungeon {
        let mut d = Dungeon::new(DungeonId(0), 1, 9, 7);
        let mut room = Room::new(0, 0, 9, 7);
        room.start = true;
        room.discovered = true;
        for (x, y) in room.interior_cells() {
            d.set_tile(x, y, Tile::Floor);
        }
        d.rooms.push(room);
        d.set_tile(8, 3, Tile::Door);
        d.doors.push(Door { x: 8, y: 3, open: false });
        d
    }

    fn hero(class: HeroClass, x: i32, y: i32) -> Actor {
        Actor::new_hero(ActorId(1), PlayerId::new("p"), class, x, y)
    }

    #[test]
    fn test_moves_respect_reach() {
        let d = open_room();
        let mut a = hero(HeroClass::Warrior, 4, 3);
        a.moves = 2;
        let moves = GridMoves.legal_moves(&d, &a);
        assert!(moves.iter().all(|m| m.depth <= 2));
        assert!(moves.iter().all(|m| (m.sx, m.sy) == (4, 3)));
        // diamond of radius 2 minus the centre
        assert_eq!(moves.iter().filter(|m| m.kind == MoveKind::Move).count(), 12);
    }

    #[test]
    fn test_attack_and_open_one_past_reach() {
        let mut d = open_room();
        d.actors.push(Actor::new_monster(ActorId(9), MonsterKind::Rat, 4, 1));
        let mut a = hero(HeroClass::Warrior, 4, 3);
        a.moves = 1;

        let moves = GridMoves.legal_moves(&d, &a);
        let attack = moves.iter().find(|m| (m.x, m.y) == (4, 1)).unwrap();
        assert_eq!((attack.kind, attack.depth), (MoveKind::Attack, 2));
        assert!(moves.iter().all(|m| m.kind != MoveKind::Open), "door is 4 away");

        a.x = 6;
        let moves = GridMoves.legal_moves(&d, &a);
        let open = moves.iter().find(|m| (m.x, m.y) == (8, 3)).unwrap();
        assert_eq!((open.kind, open.depth), (MoveKind::Open, 2));
    }

    #[test]
    fn test_no_attack_without_action() {
        let mut d = open_room();
        d.actors.push(Actor::new_monster(ActorId(9), MonsterKind::Rat, 5, 3));
        let mut a = hero(HeroClass::Warrior, 4, 3);
        a.actions = 0;
        let moves = GridMoves.legal_moves(&d, &a);
        assert!(moves.iter().all(|m| m.kind == MoveKind::Move));
    }

    #[test]
    fn test_archer_shoots_even_adjacent() {
        let mut d = open_room();
        d.actors.push(Actor::new_monster(ActorId(9), MonsterKind::Rat, 5, 3));
        let a = hero(HeroClass::Archer, 4, 3);
        let moves = GridMoves.legal_moves(&d, &a);
        let shots: Vec<_> = moves.iter().filter(|m| (m.x, m.y) == (5, 3)).collect();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].kind, MoveKind::Shoot);
    }

    #[test]
    fn test_mage_falls_back_to_melee() {
        let mut d = open_room();
        d.actors.push(Actor::new_monster(ActorId(9), MonsterKind::Rat, 5, 3));
        let mut a = hero(HeroClass::Mage, 4, 3);
        assert!(GridMoves.legal_moves(&d, &a).iter().any(|m| m.kind == MoveKind::Magic));

        a.magic = 2;
        let moves = GridMoves.legal_moves(&d, &a);
        assert!(moves.iter().all(|m| m.kind != MoveKind::Magic));
        assert!(moves.iter().any(|m| m.kind == MoveKind::Attack));
    }

    #[test]
    fn test_cleric_heals_wounded_self() {
        let d = open_room();
        let mut a = hero(HeroClass::Cleric, 4, 3);
        assert!(GridMoves.legal_moves(&d, &a).iter().all(|m| m.kind != MoveKind::Heal));

        a.health -= 3;
        let mut d = d;
        d.actors.push(a.clone());
        let heal = GridMoves.legal_moves(&d, &a).into_iter().find(|m| m.kind == MoveKind::Heal);
        assert_eq!(heal.map(|m| (m.x, m.y)), Some((4, 3)));
    }

    #[test]
    fn test_chest_is_interaction_for_heroes_only() {
        let mut d = open_room();
        d.chests.push(Chest {
            x: 5,
            y: 3,
            open: false,
            loot: ItemKind::Whetstone,
        });
        let a = hero(HeroClass::Warrior, 4, 3);
        assert!(GridMoves.legal_moves(&d, &a).iter().any(|m| m.kind == MoveKind::Chest));

        let rat = Actor::new_monster(ActorId(9), MonsterKind::Rat, 4, 3);
        assert!(GridMoves.legal_moves(&d, &rat).iter().all(|m| m.kind == MoveKind::Move));
    }

    #[test]
    fn test_next_step_walks_the_path() {
        let d = open_room();
        let mut a = hero(HeroClass::Warrior, 1, 1);
        let moves = GridMoves.legal_moves(&d, &a);

        let mut cells = Vec::new();
        while let Some(step) = GridMoves.next_step(&d, &a, &moves, 3, 3) {
            assert_eq!(step.kind, MoveKind::Move);
            cells.push((step.x, step.y));
            a.step_to(step.x, step.y, 0);
            if (step.x, step.y) == (3, 3) {
                break;
            }
        }
        assert_eq!(cells.len(), 4);
        assert_eq!(cells.last(), Some(&(3, 3)));
        for pair in cells.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert_eq!((a.0 - b.0).abs() + (a.1 - b.1).abs(), 1);
        }
    }

    #[test]
    fn test_next_step_ends_with_attack() {
        let mut d = open_room();
        d.actors.push(Actor::new_monster(ActorId(9), MonsterKind::Rat, 4, 1));
        let mut a = hero(HeroClass::Warrior, 4, 3);
        let moves = GridMoves.legal_moves(&d, &a);

        let first = GridMoves.next_step(&d, &a, &moves, 4, 1).unwrap();
        assert_eq!((first.kind, first.x, first.y), (MoveKind::Move, 4, 2));
        a.step_to(4, 2, 0);

        let second = GridMoves.next_step(&d, &a, &moves, 4, 1).unwrap();
        assert_eq!((second.kind, second.x, second.y), (MoveKind::Attack, 4, 1));
    }

    #[test]
    fn test_next_step_unknown_target() {
        let d = open_room();
        let a = hero(HeroClass::Warrior, 4, 3);
        let moves = GridMoves.legal_moves(&d, &a);
        assert!(GridMoves.next_step(&d, &a, &moves, 0, 0).is_none());
    }
}
