//! Replicated random number generation
//!
//! Every replica of a game must draw the same numbers in the same order, so
//! the only source of randomness is this seeded ChaCha stream held by the
//! world. Serialization records the seed and the stream position, which lets
//! a restored snapshot continue exactly where the original left off.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Game random number generator
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

#[derive(Serialize, Deserialize)]
struct RngSnapshot {
    seed: u64,
    word_pos: u128,
}

impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        RngSnapshot {
            seed: self.seed,
            word_pos: self.rng.get_word_pos(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let snapshot = RngSnapshot::deserialize(deserializer)?;
        let mut rng = GameRng::new(snapshot.seed);
        rng.rng.set_word_pos(snapshot.word_pos);
        Ok(rng)
    }
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.rng.get_word_pos() == other.rng.get_word_pos()
    }
}

impl Eq for GameRng {}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    ///
    /// Only the host picks a seed this way; replicas are handed the result.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1, or 0 if n is 0
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Returns true with probability 1/n
    pub fn one_in(&mut self, n: u32) -> bool {
        self.rn2(n) == 0
    }

    /// Uniform integer in `[min, max)`; returns `min` for an empty range
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.rn2(max - min)
    }

    /// Count successes over `trials` independent 1-in-`n` draws
    pub fn successes(&mut self, trials: u32, n: u32) -> u32 {
        (0..trials).filter(|_| self.one_in(n)).count() as u32
    }
}
