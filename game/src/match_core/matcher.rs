use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::grid::{BOARD_SIZE, Grid, Position};

/// Shortest run that counts as a match.
pub const MIN_RUN: usize = 3;

/// Positions covered by at least one horizontal or vertical run.
///
/// Overlapping runs share positions, so `len()` counts distinct cells rather
/// than runs. Scoring is derived from that count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet(BTreeSet<Position>);

impl MatchSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.0.iter().copied()
    }

    fn mark_run(&mut self, start: Position, horizontal: bool) {
        for offset in 0..MIN_RUN {
            let pos = if horizontal {
                Position::new(start.row, start.col + offset)
            } else {
                Position::new(start.row + offset, start.col)
            };
            self.0.insert(pos);
        }
    }
}

impl FromIterator<Position> for MatchSet {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub fn find_matches(grid: &Grid) -> MatchSet {
    let cells = grid.rows();
    let mut matched = MatchSet::default();

    for row in 0..BOARD_SIZE {
        for col in 0..=BOARD_SIZE - MIN_RUN {
            let Some(symbol) = cells[row][col] else {
                continue;
            };
            if (1..MIN_RUN).all(|k| cells[row][col + k] == Some(symbol)) {
                matched.mark_run(Position::new(row, col), true);
            }
        }
    }

    for col in 0..BOARD_SIZE {
        for row in 0..=BOARD_SIZE - MIN_RUN {
            let Some(symbol) = cells[row][col] else {
                continue;
            };
            if (1..MIN_RUN).all(|k| cells[row + k][col] == Some(symbol)) {
                matched.mark_run(Position::new(row, col), false);
            }
        }
    }

    matched
}
