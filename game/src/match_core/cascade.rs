use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::generator::random_symbol;
use super::grid::{BOARD_SIZE, Grid};
use super::matcher::{MatchSet, find_matches};
use super::rng::RandomSource;
use super::score::Score;

/// Upper bound on passes for one cascade. Refills are random, so a run that
/// keeps producing matches is possible in principle.
pub const MAX_CASCADE_PASSES: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    Cleared {
        matched: MatchSet,
        gained: Score,
        grid: Grid,
    },
    Settled,
}

/// Summary of a cascade that has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeResult {
    pub grid: Grid,
    pub score: Score,
    pub passes: u32,
    /// Set when the pass limit stopped the cascade with matches still on the board.
    pub capped: bool,
}

/// An in-flight cascade that can be advanced one pass at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cascade {
    grid: Grid,
    score: Score,
    passes: u32,
    settled: bool,
}

impl Cascade {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            score: Score::ZERO,
            passes: 0,
            settled: find_matches(&grid).is_empty(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Clears the current matches, drops survivors and refills the gaps.
    ///
    /// Returns `Settled` once the grid holds no match; later calls keep
    /// returning `Settled` without touching the grid.
    pub fn advance_one_pass(&mut self, rng: &mut impl RandomSource) -> PassOutcome {
        if self.settled {
            return PassOutcome::Settled;
        }
        let matched = find_matches(&self.grid);
        if matched.is_empty() {
            self.settled = true;
            return PassOutcome::Settled;
        }

        let gained = Score::from_matched(matched.len());
        self.score += gained;
        self.grid = drop_and_refill(&clear_matches(&self.grid, &matched), rng);
        self.passes += 1;
        self.settled = find_matches(&self.grid).is_empty();
        debug!(
            "cascade pass {}: cleared {} cells (+{gained}), settled={}",
            self.passes,
            matched.len(),
            self.settled
        );

        PassOutcome::Cleared {
            matched,
            gained,
            grid: self.grid,
        }
    }

    pub fn finish(self) -> CascadeResult {
        CascadeResult {
            grid: self.grid,
            score: self.score,
            passes: self.passes,
            capped: !self.settled,
        }
    }
}

pub fn resolve(grid: Grid, rng: &mut impl RandomSource) -> CascadeResult {
    resolve_with_limit(grid, rng, MAX_CASCADE_PASSES)
}

/// Runs passes until the grid is stable or `max_passes` passes have run.
pub fn resolve_with_limit(grid: Grid, rng: &mut impl RandomSource, max_passes: u32) -> CascadeResult {
    let mut cascade = Cascade::new(grid);
    while !cascade.is_settled() && cascade.passes() < max_passes {
        cascade.advance_one_pass(rng);
    }
    let result = cascade.finish();
    if result.capped {
        warn!(
            "cascade stopped after {} passes with matches remaining",
            result.passes
        );
    }
    result
}

pub fn clear_matches(grid: &Grid, matched: &MatchSet) -> Grid {
    let mut next = *grid;
    for pos in matched.iter() {
        next.set(pos, None);
    }
    next
}

/// Moves every surviving cell of each column down, keeping their vertical
/// order. Empty cells end up at the top; nothing is refilled.
pub fn apply_gravity(grid: &Grid) -> Grid {
    let mut next = *grid;
    for (col, column) in grid.columns().enumerate() {
        let mut packed = [None; BOARD_SIZE];
        let mut write = BOARD_SIZE;
        for cell in column.iter().rev().flatten() {
            write -= 1;
            packed[write] = Some(*cell);
        }
        next.set_column(col, packed);
    }
    next
}

/// Fills every empty cell with a fresh symbol, column by column from the
/// lowest gap upward.
pub fn refill(grid: &Grid, rng: &mut impl RandomSource) -> Grid {
    let mut next = *grid;
    for (col, mut column) in grid.columns().enumerate() {
        for cell in column.iter_mut().rev() {
            if cell.is_none() {
                *cell = Some(random_symbol(rng));
            }
        }
        next.set_column(col, column);
    }
    next
}

pub fn drop_and_refill(grid: &Grid, rng: &mut impl RandomSource) -> Grid {
    refill(&apply_gravity(grid), rng)
}
