//! Per-tick event broadcast
//!
//! The log holds only what happened during the current logical step. The
//! tick driver clears it before each step, so a renderer reading it after
//! `update` sees exactly one step worth of effects.

use serde::{Deserialize, Serialize};

use crate::actor::ActorId;
use crate::item::ItemKind;

/// What a renderer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Step,
    Open,
    ChestOpen,
    ItemLoot,
    GoldLoot,
    Shoot,
    Magic,
    Heal,
    Attack,
    Damage,
    Died,
    TurnChange,
    Stairs,
    ItemUsed,
    GameOver,
}

/// An immutable fact about the current step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub actor: Option<ActorId>,
    pub x: i32,
    pub y: i32,
    pub value: i32,
    /// Presentation delay in ms
    pub delay: u32,
    pub item: Option<ItemKind>,
}

impl GameEvent {
    pub fn new(kind: EventKind, actor: Option<ActorId>, x: i32, y: i32) -> Self {
        Self {
            kind,
            actor,
            x,
            y,
            value: 0,
            delay: 0,
            item: None,
        }
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    pub fn with_delay(mut self, delay: u32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_item(mut self, item: ItemKind) -> Self {
        self.item = Some(item);
        self
    }
}

/// Append-only event list for one logical step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Number of events of the given kind
    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }
}
