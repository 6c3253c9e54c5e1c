//! One dungeon level and its occupancy queries

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Chest, Door, Room, Tile};
use crate::actor::{Actor, ActorId};
use crate::error::GameError;

/// Identifier of a live dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DungeonId(pub u32);

impl fmt::Display for DungeonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    pub id: DungeonId,
    pub level: u32,
    pub width: i32,
    pub height: i32,
    /// Row-major tile grid
    pub tiles: Vec<Tile>,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    pub chests: Vec<Chest>,
    /// Living actors only; the dead are removed, never flagged
    pub actors: Vec<Actor>,
}

impl Dungeon {
    /// An all-wall dungeon of the given size
    pub fn new(id: DungeonId, level: u32, width: i32, height: i32) -> Self {
        let cells = (width.max(0) * height.max(0)) as usize;
        Self {
            id,
            level,
            width,
            height,
            tiles: vec![Tile::Wall; cells],
            rooms: Vec::new(),
            doors: Vec::new(),
            chests: Vec::new(),
            actors: Vec::new(),
        }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| (y * self.width + x) as usize)
    }

    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(Tile::Wall, |i| self.tiles[i])
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    pub fn actor_at(&self, x: i32, y: i32) -> Option<&Actor> {
        self.actors.iter().find(|a| a.x == x && a.y == y)
    }

    /// Remove an actor from the level, returning it
    pub fn take_actor(&mut self, id: ActorId) -> Option<Actor> {
        let idx = self.actors.iter().position(|a| a.id == id)?;
        Some(self.actors.remove(idx))
    }

    pub fn heroes(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|a| a.is_hero())
    }

    pub fn has_hero(&self) -> bool {
        self.heroes().next().is_some()
    }

    /// First room whose bounds hold the cell
    pub fn room_at(&self, x: i32, y: i32) -> Option<&Room> {
        self.rooms.iter().find(|r| r.contains(x, y))
    }

    /// Every room whose bounds hold the cell; a door cell belongs to both sides
    pub fn rooms_at(&self, x: i32, y: i32) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(move |r| r.contains(x, y))
    }

    pub fn chest_at(&self, x: i32, y: i32) -> Option<&Chest> {
        self.chests.iter().find(|c| c.x == x && c.y == y)
    }

    pub fn door_at(&self, x: i32, y: i32) -> Option<&Door> {
        self.doors.iter().find(|d| d.x == x && d.y == y)
    }

    pub fn is_discovered(&self, x: i32, y: i32) -> bool {
        self.rooms_at(x, y).any(|r| r.discovered)
    }

    /// Terrain allows walking here, ignoring actors
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        match self.tile(x, y) {
            Tile::Wall => false,
            Tile::Floor => self.chest_at(x, y).is_none(),
            Tile::Door => self.door_at(x, y).is_some_and(|d| d.open),
        }
    }

    /// Walkable and unoccupied
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        self.is_walkable(x, y) && self.actor_at(x, y).is_none()
    }

    /// Open the door at a cell and discover every room sharing it
    ///
    /// Returns false if there is no door there.
    pub fn open_door(&mut self, x: i32, y: i32) -> bool {
        let Some(door) = self.doors.iter_mut().find(|d| d.x == x && d.y == y) else {
            return false;
        };
        door.open = true;
        for room in self.rooms.iter_mut().filter(|r| r.contains(x, y)) {
            room.discovered = true;
        }
        true
    }

    /// Mark the chest at a cell open, returning its configured item
    ///
    /// An already opened chest yields nothing.
    pub fn open_chest(&mut self, x: i32, y: i32) -> Option<Chest> {
        let chest = self.chests.iter_mut().find(|c| c.x == x && c.y == y && !c.open)?;
        chest.open = true;
        Some(*chest)
    }

    pub fn start_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|r| r.start)
    }

    /// Stairs room whose centre is this cell
    pub fn stairs_at(&self, x: i32, y: i32) -> Option<&Room> {
        self.rooms.iter().find(|r| r.is_stairs_cell(x, y))
    }

    /// The first free interior cell of the start room, in scan order
    pub fn start_cell(&self) -> Result<(i32, i32), GameError> {
        let room = self.start_room().ok_or(GameError::NoStartRoom(self.id))?;
        room.interior_cells()
            .find(|&(x, y)| self.is_free(x, y))
            .ok_or(GameError::NoFreeCell(self.id))
    }

    /// ASCII rendering, for logs and the harness
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let c = if let Some(actor) = self.actor_at(x, y) {
                    if actor.is_hero() { '@' } else { 'm' }
                } else if let Some(chest) = self.chest_at(x, y) {
                    if chest.open { '_' } else { '=' }
                } else if self.stairs_at(x, y).is_some() {
                    '>'
                } else if let Some(door) = self.door_at(x, y) {
                    if door.open { '\'' } else { '+' }
                } else {
                    self.tile(x, y).to_ascii()
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}
