//! Property tests for board generation, matching and cascades.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use tilematch::match_core::{
    BOARD_SIZE, Grid, Position, Rng, Symbol, apply_gravity, find_matches, generate_board,
    is_adjacent, resolve, resolve_with_limit, try_swap,
};
use tilematch::multiplier::Multiplier;

fn cell() -> impl Strategy<Value = Option<Symbol>> {
    prop_oneof![
        1 => Just(None),
        3 => (0..Symbol::ALL.len()).prop_map(Symbol::new),
    ]
}

fn sparse_grid() -> impl Strategy<Value = Grid> {
    prop::array::uniform6(prop::array::uniform6(cell())).prop_map(Grid::from_cells)
}

fn position() -> impl Strategy<Value = Position> {
    (0..BOARD_SIZE + 2, 0..BOARD_SIZE + 2).prop_map(|(row, col)| Position::new(row, col))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_generated_board_is_full(seed in any::<u64>()) {
        prop_assert!(generate_board(&mut Rng::new(seed)).is_full());
        prop_assert!(generate_board(&mut StdRng::seed_from_u64(seed)).is_full());
    }

    #[test]
    fn prop_resolved_board_is_stable(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = generate_board(&mut rng);
        let result = resolve(board, &mut rng);

        prop_assert!(result.grid.is_full());
        prop_assert!(result.capped || find_matches(&result.grid).is_empty());
        prop_assert_eq!(result.passes == 0, find_matches(&board).is_empty());
    }

    #[test]
    fn prop_pass_limit_is_respected(seed in any::<u64>(), limit in 1u32..4) {
        let mut rng = Rng::new(seed);
        let board = generate_board(&mut rng);
        let result = resolve_with_limit(board, &mut rng, limit);
        prop_assert!(result.passes <= limit);
        prop_assert_eq!(result.capped, !find_matches(&result.grid).is_empty());
    }

    #[test]
    fn prop_adjacency_is_symmetric(a in position(), b in position()) {
        prop_assert_eq!(is_adjacent(a, b), is_adjacent(b, a));
        prop_assert!(!is_adjacent(a, a));
    }

    #[test]
    fn prop_swap_requires_adjacent_in_bounds_pair(seed in any::<u64>(), a in position(), b in position()) {
        let board = generate_board(&mut Rng::new(seed));
        let legal = a.is_in_bounds() && b.is_in_bounds() && is_adjacent(a, b);
        prop_assert_eq!(try_swap(&board, a, b).is_some(), legal);
    }

    #[test]
    fn prop_gravity_keeps_cells_and_packs_down(grid in sparse_grid()) {
        let dropped = apply_gravity(&grid);
        prop_assert_eq!(dropped.empty_count(), grid.empty_count());

        for (before, after) in grid.columns().zip(dropped.columns()) {
            let before: Vec<Symbol> = before.iter().flatten().copied().collect();
            let survivors: Vec<Symbol> = after.iter().flatten().copied().collect();
            prop_assert_eq!(&survivors, &before);

            let first_filled = after.iter().position(Option::is_some).unwrap_or(BOARD_SIZE);
            prop_assert!(after[first_filled..].iter().all(Option::is_some));
        }
    }

    #[test]
    fn prop_multiplier_draw_is_total(draw in 0.0f64..1.0) {
        let multiplier = Multiplier::from_draw(draw);
        prop_assert!(Multiplier::ALL.contains(&multiplier));
    }
}
