//! Items and the party's shared inventory

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::actor::Actor;

/// Unique identifier for item instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ItemKind {
    HealthPotion,
    MagicPotion,
    Whetstone,
    Buckler,
}

impl ItemKind {
    /// Apply the item to the actor using it
    pub fn apply(self, actor: &mut Actor) {
        match self {
            ItemKind::HealthPotion => actor.set_health(actor.health + 4),
            ItemKind::MagicPotion => actor.set_magic(actor.magic + 4),
            ItemKind::Whetstone => actor.attack_mod += 1,
            ItemKind::Buckler => actor.defense_mod += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
}

/// Items and gold shared by every hero
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<Item>,
    pub gold: u32,
    next_id: u32,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a saved snapshot, continuing ids past the highest restored one
    pub fn restore(items: Vec<Item>, gold: u32) -> Self {
        let next_id = items.iter().map(|i| i.id.0 + 1).max().unwrap_or(0);
        Self {
            items,
            gold,
            next_id,
        }
    }

    pub fn add(&mut self, kind: ItemKind) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(Item { id, kind });
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let idx = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(idx))
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }
}
