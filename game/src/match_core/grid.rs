use std::fmt;

use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

pub const BOARD_SIZE: usize = 6;

/// `None` marks a cell that was cleared and not refilled yet.
pub type Cell = Option<Symbol>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    pub fn manhattan_distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Every in-bounds position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Square board, `cells[row][col]` with row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    pub const fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub const fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Builds a grid from one string per row: `A`..`M` for symbols, `.` for
    /// empty. Whitespace inside a row is ignored.
    pub fn parse(rows: &[&str]) -> Option<Grid> {
        if rows.len() != BOARD_SIZE {
            return None;
        }
        let mut grid = Grid::empty();
        for (row, text) in rows.iter().enumerate() {
            let codes: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
            if codes.len() != BOARD_SIZE {
                return None;
            }
            for (col, code) in codes.into_iter().enumerate() {
                grid.cells[row][col] = match code {
                    '.' => None,
                    other => Some(Symbol::from_code(other)?),
                };
            }
        }
        Some(grid)
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    /// Out-of-bounds writes are ignored.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if pos.is_in_bounds() {
            self.cells[pos.row][pos.col] = cell;
        }
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Cells of one column, top to bottom, or `None` past the right edge.
    pub fn column(&self, col: usize) -> Option<[Cell; BOARD_SIZE]> {
        (col < BOARD_SIZE).then(|| self.cells.map(|row| row[col]))
    }

    /// Every column left to right.
    pub fn columns(&self) -> impl Iterator<Item = [Cell; BOARD_SIZE]> + '_ {
        (0..BOARD_SIZE).map(|col| self.cells.map(|row| row[col]))
    }

    /// Overwrites one column. Columns past the right edge are ignored.
    pub fn set_column(&mut self, col: usize, cells: [Cell; BOARD_SIZE]) {
        if col >= BOARD_SIZE {
            return;
        }
        for (row, cell) in cells.into_iter().enumerate() {
            self.cells[row][col] = cell;
        }
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_none()).count()
    }

    /// Returns the grid with the two cells exchanged. Positions are not
    /// validated beyond bounds; see `try_swap` for the adjacency rule.
    pub fn swapped(&self, a: Position, b: Position) -> Option<Grid> {
        let first = self.get(a)?;
        let second = self.get(b)?;
        let mut next = *self;
        next.cells[a.row][a.col] = second;
        next.cells[b.row][b.col] = first;
        Some(next)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.cells.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let code = cell.map_or('.', Symbol::code);
                write!(f, "{code}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let rows = ["ABCDEF", "GHIJKL", "M.ABCD", "......", "AAAAAA", "BCDEFG"];
        let grid = Grid::parse(&rows).expect("valid grid text");
        assert_eq!(grid.to_string(), rows.join("\n"));
        assert_eq!(grid.empty_count(), 7);
        assert!(!grid.is_full());
    }

    #[test]
    fn parse_rejects_wrong_shape_or_unknown_codes() {
        assert!(Grid::parse(&["ABCDEF"; 5]).is_none());
        assert!(Grid::parse(&["ABCDE", "ABCDEF", "ABCDEF", "ABCDEF", "ABCDEF", "ABCDEF"]).is_none());
        assert!(Grid::parse(&["ABCDEZ", "ABCDEF", "ABCDEF", "ABCDEF", "ABCDEF", "ABCDEF"]).is_none());
    }

    #[test]
    fn get_and_set_ignore_out_of_bounds() {
        let mut grid = Grid::empty();
        grid.set(Position::new(BOARD_SIZE, 0), Symbol::new(1));
        assert_eq!(grid, Grid::empty());
        assert_eq!(grid.get(Position::new(0, BOARD_SIZE)), None);
        assert_eq!(grid.get(Position::new(0, 0)), Some(None));
    }

    #[test]
    fn columns_read_top_to_bottom() {
        let grid = Grid::parse(&["A.....", "B.....", "C.....", "D.....", "E.....", "F....."])
            .expect("valid grid text");
        let codes: String = grid
            .column(0)
            .expect("column inside the board")
            .iter()
            .map(|c| c.map_or('.', Symbol::code))
            .collect();
        assert_eq!(codes, "ABCDEF");
    }

    #[test]
    fn column_access_past_the_edge_is_a_no_op() {
        let mut grid = Grid::parse(&["ABCDEF"; BOARD_SIZE]).expect("valid grid text");
        let before = grid;
        assert_eq!(grid.column(BOARD_SIZE), None);
        grid.set_column(BOARD_SIZE, [None; BOARD_SIZE]);
        assert_eq!(grid, before);
        assert_eq!(grid.columns().count(), BOARD_SIZE);
        assert_eq!(grid.columns().last(), grid.column(BOARD_SIZE - 1));
    }

    #[test]
    fn position_all_covers_board_in_row_major_order() {
        let all: Vec<_> = Position::all().collect();
        assert_eq!(all.len(), BOARD_SIZE * BOARD_SIZE);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[1], Position::new(0, 1));
        assert_eq!(all[BOARD_SIZE], Position::new(1, 0));
    }
}
