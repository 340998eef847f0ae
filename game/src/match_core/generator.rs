use super::grid::{BOARD_SIZE, Grid};
use super::rng::RandomSource;
use super::symbol::{ALPHABET_SIZE, Symbol};

pub fn random_symbol(rng: &mut impl RandomSource) -> Symbol {
    Symbol::ALL[rng.pick_index(ALPHABET_SIZE)]
}

/// Fills every cell independently. Matches already present on the fresh
/// board are left alone; they resolve the first time a cascade runs.
pub fn generate_board(rng: &mut impl RandomSource) -> Grid {
    let mut cells = [[None; BOARD_SIZE]; BOARD_SIZE];
    for row in cells.iter_mut() {
        for cell in row.iter_mut() {
            *cell = Some(random_symbol(rng));
        }
    }
    Grid::from_cells(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_core::rng::Rng;

    #[test]
    fn generated_board_is_full() {
        let mut rng = Rng::new(3);
        let grid = generate_board(&mut rng);
        assert!(grid.is_full());
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = generate_board(&mut Rng::new(11));
        let b = generate_board(&mut Rng::new(11));
        let c = generate_board(&mut Rng::new(12));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
