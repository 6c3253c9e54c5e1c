//! Core engine constants

/// Maximum number of heroes in one game
pub const MAX_HEROES: usize = 4;

/// Logical step interval is `STEP_INTERVAL_NUM / STEP_INTERVAL_DEN` ms (1000/3)
pub const STEP_INTERVAL_NUM: u64 = 1000;
pub const STEP_INTERVAL_DEN: u64 = 3;

/// Tick ceiling for one evil turn before forced hand-off
pub const EVIL_TURN_MAX: u32 = 100;

/// Dungeons kept alive before empty ones are pruned
pub const MAX_LIVE_DUNGEONS: usize = 2;

/// Save slots kept per participant
pub const MAX_SAVE_SLOTS: usize = 3;

/// Presentation delays (ms)
pub const DIED_DELAY: u32 = 400;
pub const RANGED_DAMAGE_DELAY: u32 = 300;
pub const MELEE_DAMAGE_DELAY: u32 = 100;

/// Resource costs
pub const MAGIC_ATTACK_COST: i32 = 3;
pub const HEAL_COST: i32 = 2;
pub const HEAL_AMOUNT: i32 = 2;

/// Magic attacks roll double the attack score
pub const MAGIC_MULTIPLIER: u32 = 2;

/// Magic regenerated at the start of a hero turn
pub const MAGIC_REGEN: i32 = 1;

/// Reach of shoot and magic moves (Manhattan)
pub const RANGED_REACH: i32 = 6;
