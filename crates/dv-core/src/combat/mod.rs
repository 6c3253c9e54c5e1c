//! Combat resolution
//!
//! Damage is a dice-pool contest: the attacker rolls one die per point of
//! attack score and counts skulls (1 in 2), the defender rolls one die per
//! point of defense and counts shields (1 in 3 for heroes, 1 in 6 for
//! monsters). Damage is skulls minus shields, never negative.

pub mod death;

use crate::actor::Actor;
use crate::rng::GameRng;

pub use death::kill;

/// Attack score after adjacency and multiplier
///
/// Adjacent targets halve the score, rounding up, and the multiplier is
/// ignored: ranged weapons are crippled at melee range.
pub fn attack_score(attacker: &Actor, defender: &Actor, multiplier: u32) -> u32 {
    let base = attacker.effective_attack().max(0) as u32;
    if attacker.is_adjacent(defender.x, defender.y) {
        base.div_ceil(2)
    } else {
        base.saturating_mul(multiplier)
    }
}

/// Skulls from `score` attack dice
pub fn roll_skulls(score: u32, rng: &mut GameRng) -> u32 {
    rng.successes(score, 2)
}

/// Shields from the defender's effective defense
pub fn roll_shields(defender: &Actor, rng: &mut GameRng) -> u32 {
    let sides = if defender.is_hero() { 3 } else { 6 };
    rng.successes(defender.effective_defense().max(0) as u32, sides)
}

/// Roll one attack, returning the damage dealt
pub fn resolve(attacker: &Actor, defender: &Actor, multiplier: u32, rng: &mut GameRng) -> u32 {
    let skulls = roll_skulls(attack_score(attacker, defender, multiplier), rng);
    let shields = roll_shields(defender, rng);
    skulls.saturating_sub(shields)
}
