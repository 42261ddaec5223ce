//! Dice pair for a single turn.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two dice values, order preserved as rolled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice(pub u8, pub u8);

impl Dice {
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Dice(rng.gen_range(1..=6), rng.gen_range(1..=6))
    }

    /// Doubles grant four moves of the die value.
    pub fn is_double(self) -> bool {
        self.0 == self.1
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}
