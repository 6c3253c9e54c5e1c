//! Participant save slots
//!
//! Progress is recorded whenever a hero takes the stairs. Each participant
//! keeps a handful of slots, newest first; selecting one restores the
//! party's gold and inventory and rebuilds the dungeon from that level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::item::Item;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSlot {
    /// Dungeon level reached
    pub level: u32,
    pub gold: u32,
    pub inventory: Vec<Item>,
    /// Human-readable summary for a slot picker
    pub descriptor: String,
}

/// Save slots keyed by participant name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveBook {
    slots: BTreeMap<String, Vec<SaveSlot>>,
}

impl SaveBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a slot as the newest, dropping the oldest beyond `keep`
    pub fn record(&mut self, name: &str, slot: SaveSlot, keep: usize) {
        let slots = self.slots.entry(name.to_string()).or_default();
        slots.insert(0, slot);
        slots.truncate(keep);
    }

    /// Slots for a participant, newest first
    pub fn slots(&self, name: &str) -> &[SaveSlot] {
        self.slots.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn get(&self, name: &str, index: usize) -> Option<&SaveSlot> {
        self.slots(name).get(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(level: u32) -> SaveSlot {
        SaveSlot {
            level,
            gold: level * 10,
            inventory: Vec::new(),
            descriptor: format!("Level {level}"),
        }
    }

    #[test]
    fn test_newest_first_and_capped() {
        let mut book = SaveBook::new();
        for level in 1..=5 {
            book.record("ada", slot(level), 3);
        }
        let levels: Vec<u32> = book.slots("ada").iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![5, 4, 3]);
    }

    #[test]
    fn test_unknown_participant() {
        let book = SaveBook::new();
        assert!(book.slots("nobody").is_empty());
        assert!(book.get("nobody", 0).is_none());
    }
}
