//! Rooms, doors and chests

use serde::{Deserialize, Serialize};

use crate::item::ItemKind;

/// A rectangular room; bounds include the walls, which neighbours may share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Heroes enter the dungeon here
    pub start: bool,
    /// Has stairs down at its centre cell
    pub stairs: bool,
    /// Contents are visible and active
    pub discovered: bool,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            start: false,
            stairs: false,
            discovered: false,
        }
    }

    /// True if the cell lies within the bounds, walls included
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn is_interior(&self, x: i32, y: i32) -> bool {
        x > self.x && x < self.x + self.width - 1 && y > self.y && y < self.y + self.height - 1
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Interior cells in scan order (row by row, left to right)
    pub fn interior_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.y + 1..self.y + self.height - 1)
            .flat_map(move |y| (self.x + 1..self.x + self.width - 1).map(move |x| (x, y)))
    }

    pub fn is_stairs_cell(&self, x: i32, y: i32) -> bool {
        self.stairs && self.center() == (x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub x: i32,
    pub y: i32,
    pub open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chest {
    pub x: i32,
    pub y: i32,
    pub open: bool,
    /// Item the chest was configured with
    pub loot: ItemKind,
}
