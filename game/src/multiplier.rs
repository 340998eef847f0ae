use std::fmt;

use serde::{Deserialize, Serialize};

use crate::match_core::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Multiplier {
    X2,
    X5,
    X10,
    X20,
}

/// Cumulative upper bounds of the spin tiers, checked in order. Draws above
/// the last bound land on `X20`.
const TIERS: [(f64, Multiplier); 3] = [
    (0.32, Multiplier::X2),
    (0.67, Multiplier::X5),
    (0.97, Multiplier::X10),
];

impl Multiplier {
    pub const ALL: [Multiplier; 4] = [
        Multiplier::X2,
        Multiplier::X5,
        Multiplier::X10,
        Multiplier::X20,
    ];

    pub fn factor(self) -> u32 {
        match self {
            Multiplier::X2 => 2,
            Multiplier::X5 => 5,
            Multiplier::X10 => 10,
            Multiplier::X20 => 20,
        }
    }

    /// Maps a uniform draw in `[0, 1)` onto a tier.
    pub fn from_draw(draw: f64) -> Multiplier {
        TIERS
            .iter()
            .find(|(bound, _)| draw <= *bound)
            .map_or(Multiplier::X20, |&(_, tier)| tier)
    }

    pub fn spin(rng: &mut impl RandomSource) -> Multiplier {
        Self::from_draw(rng.next_unit())
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.factor())
    }
}
