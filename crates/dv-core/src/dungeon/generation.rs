//! Level generation
//!
//! The engine asks for a level by number and gets back a fully stocked
//! dungeon. [`GridGenerator`] lays rooms out on a grid where neighbours share
//! a wall, with one door in every shared wall.

use super::{Chest, Door, Dungeon, DungeonId, Room, Tile};
use crate::actor::{Actor, ActorIds, MonsterKind};
use crate::item::ItemKind;
use crate::rng::GameRng;

/// Produces dungeon levels
pub trait DungeonGenerator {
    /// Build level `level`, allocating monster ids from `ids`
    fn generate(&self, id: DungeonId, level: u32, rng: &mut GameRng, ids: &mut ActorIds) -> Dungeon;
}

/// Chest contents, drawn uniformly
const CHEST_ITEMS: [ItemKind; 4] = [
    ItemKind::HealthPotion,
    ItemKind::MagicPotion,
    ItemKind::Whetstone,
    ItemKind::Buckler,
];

#[derive(Debug, Clone, Copy)]
pub struct GridGenerator {
    pub cols: usize,
    pub rows: usize,
}

impl Default for GridGenerator {
    fn default() -> Self {
        Self { cols: 3, rows: 2 }
    }
}

impl GridGenerator {
    /// Wall coordinates along one axis for the given interior spans
    fn wall_lines(spans: &[i32]) -> Vec<i32> {
        let mut lines = Vec::with_capacity(spans.len() + 1);
        let mut at = 0;
        lines.push(at);
        for span in spans {
            at += span + 1;
            lines.push(at);
        }
        lines
    }

    /// Door offset along a shared wall, never at an interior corner
    fn door_offset(span: i32, rng: &mut GameRng) -> i32 {
        if span >= 3 {
            2 + rng.rn2((span - 2) as u32) as i32
        } else {
            1
        }
    }

    fn monster_count(level: u32, rng: &mut GameRng) -> u32 {
        1 + rng.rn2(level.min(2) + 1)
    }
}

impl DungeonGenerator for GridGenerator {
    fn generate(&self, id: DungeonId, level: u32, rng: &mut GameRng, ids: &mut ActorIds) -> Dungeon {
        let cols = self.cols.max(1);
        let rows = self.rows.max(1);
        let widths: Vec<i32> = (0..cols).map(|_| 4 + rng.rn2(4) as i32).collect();
        let heights: Vec<i32> = (0..rows).map(|_| 3 + rng.rn2(3) as i32).collect();
        let xs = Self::wall_lines(&widths);
        let ys = Self::wall_lines(&heights);

        let width = xs[cols] + 1;
        let height = ys[rows] + 1;
        let mut dungeon = Dungeon::new(id, level, width, height);

        for r in 0..rows {
            for c in 0..cols {
                let room = Room::new(xs[c], ys[r], widths[c] + 2, heights[r] + 2);
                for (x, y) in room.interior_cells() {
                    dungeon.set_tile(x, y, Tile::Floor);
                }
                dungeon.rooms.push(room);
            }
        }

        // Doors in every shared wall, horizontal neighbours first
        for r in 0..rows {
            for c in 0..cols {
                if c + 1 < cols {
                    let x = xs[c + 1];
                    let y = ys[r] + Self::door_offset(heights[r], rng);
                    dungeon.set_tile(x, y, Tile::Door);
                    dungeon.doors.push(Door { x, y, open: false });
                }
                if r + 1 < rows {
                    let x = xs[c] + Self::door_offset(widths[c], rng);
                    let y = ys[r + 1];
                    dungeon.set_tile(x, y, Tile::Door);
                    dungeon.doors.push(Door { x, y, open: false });
                }
            }
        }

        let last = dungeon.rooms.len() - 1;
        dungeon.rooms[0].start = true;
        dungeon.rooms[0].discovered = true;
        dungeon.rooms[last].stairs = true;

        let roster = MonsterKind::for_level(level);
        for idx in 1..dungeon.rooms.len() {
            let room = dungeon.rooms[idx].clone();

            // Chests sit in a bottom corner, clear of doors and the stairs
            if rng.one_in(2) {
                let loot = CHEST_ITEMS[rng.rn2(CHEST_ITEMS.len() as u32) as usize];
                dungeon.chests.push(Chest {
                    x: room.x + room.width - 2,
                    y: room.y + room.height - 2,
                    open: false,
                    loot,
                });
            }

            let cells: Vec<(i32, i32)> = room.interior_cells().collect();
            for _ in 0..Self::monster_count(level, rng) {
                let kind = roster[rng.rn2(roster.len() as u32) as usize];
                let (x, y) = cells[rng.rn2(cells.len() as u32) as usize];
                if dungeon.is_free(x, y) && !room.is_stairs_cell(x, y) {
                    dungeon.actors.push(Actor::new_monster(ids.next_id(), kind, x, y));
                }
            }
        }

        log::debug!(
            "generated level {} as {}: {}x{}, {} monsters, {} chests",
            level,
            id,
            width,
            height,
            dungeon.actors.len(),
            dungeon.chests.len()
        );
        dungeon
    }
}
