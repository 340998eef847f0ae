use serde::{Deserialize, Serialize};

/// Whole-second countdown for a timed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTimer {
    remaining_secs: u32,
    limit_secs: u32,
}

impl RoundTimer {
    pub fn new(limit_secs: u32) -> Self {
        Self {
            remaining_secs: limit_secs,
            limit_secs,
        }
    }

    pub fn reset(&mut self) {
        self.remaining_secs = self.limit_secs;
    }

    pub fn limit_secs(&self) -> u32 {
        self.limit_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.limit_secs - self.remaining_secs
    }

    pub fn is_up(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Counts one second down. Returns `true` only on the tick that
    /// reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.is_up() {
            return false;
        }
        self.remaining_secs -= 1;
        self.is_up()
    }
}
