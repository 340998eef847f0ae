use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use super::matcher::MIN_RUN;

/// Exact session score.
///
/// Each matched position is worth one third of a point, so the score is kept
/// as a count of thirds and only turned into a float for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score {
    thirds: u32,
}

impl Score {
    pub const ZERO: Score = Score { thirds: 0 };

    pub fn from_matched(positions: usize) -> Self {
        Self {
            thirds: u32::try_from(positions).unwrap_or(u32::MAX),
        }
    }

    pub fn from_points(points: u32) -> Self {
        Self {
            thirds: points.saturating_mul(MIN_RUN as u32),
        }
    }

    pub fn thirds(self) -> u32 {
        self.thirds
    }

    pub fn value(self) -> f64 {
        f64::from(self.thirds) / MIN_RUN as f64
    }

    pub fn is_zero(self) -> bool {
        self.thirds == 0
    }

    pub fn times(self, factor: u32) -> Payout {
        Payout {
            thirds: u64::from(self.thirds) * u64::from(factor),
        }
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        Score {
            thirds: self.thirds.saturating_add(rhs.thirds),
        }
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Score multiplied by the session multiplier, still exact in thirds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Payout {
    thirds: u64,
}

impl Payout {
    pub fn thirds(self) -> u64 {
        self.thirds
    }

    pub fn value(self) -> f64 {
        self.thirds as f64 / MIN_RUN as f64
    }
}

impl fmt::Display for Payout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
