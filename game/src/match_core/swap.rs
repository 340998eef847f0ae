use super::grid::{BOARD_SIZE, Grid, Position};
use super::matcher::find_matches;

/// Orthogonal neighbours only: same row one column apart, or same column one
/// row apart.
pub fn is_adjacent(a: Position, b: Position) -> bool {
    a.manhattan_distance(b) == 1
}

/// Candidate grid with `a` and `b` exchanged, or `None` when the pair is not
/// a legal swap.
pub fn try_swap(grid: &Grid, a: Position, b: Position) -> Option<Grid> {
    if !a.is_in_bounds() || !b.is_in_bounds() || !is_adjacent(a, b) {
        return None;
    }
    grid.swapped(a, b)
}

/// First legal swap (row-major, trying right then down) whose candidate grid
/// contains a match.
pub fn find_matching_swap(grid: &Grid) -> Option<(Position, Position)> {
    Position::all()
        .flat_map(|from| {
            let right = (from.col + 1 < BOARD_SIZE).then(|| Position::new(from.row, from.col + 1));
            let down = (from.row + 1 < BOARD_SIZE).then(|| Position::new(from.row + 1, from.col));
            [right, down].into_iter().flatten().map(move |to| (from, to))
        })
        .find(|&(from, to)| {
            try_swap(grid, from, to).is_some_and(|candidate| !find_matches(&candidate).is_empty())
        })
}
