//! Board-matching core: generation, swaps, match detection and cascades.
//!
//! Everything here is synchronous and framework-agnostic. Grids are small
//! `Copy` values; every operation returns a new grid instead of mutating the
//! caller's copy.

mod cascade;
mod generator;
mod grid;
mod matcher;
mod rng;
mod score;
mod swap;
mod symbol;

pub use cascade::{
    Cascade, CascadeResult, MAX_CASCADE_PASSES, PassOutcome, apply_gravity, clear_matches,
    drop_and_refill, refill, resolve, resolve_with_limit,
};
pub use generator::{generate_board, random_symbol};
pub use grid::{BOARD_SIZE, Cell, Grid, Position};
pub use matcher::{MIN_RUN, MatchSet, find_matches};
pub use rng::{RandomSource, Rng};
pub use score::{Payout, Score};
pub use swap::{find_matching_swap, is_adjacent, try_swap};
pub use symbol::{ALPHABET_SIZE, Symbol};
