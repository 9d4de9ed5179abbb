//! Score computation over a grid.

use crate::grid::Grid;

/// Sum of revealed card values. Hidden cards contribute nothing; an empty
/// grid scores 0.
#[must_use]
pub fn score(grid: &Grid) -> i32 {
    grid.cards()
        .filter(|card| card.revealed)
        .map(|card| card.value)
        .sum()
}

/// Number of face-down cards left in the grid.
#[must_use]
pub fn hidden_count(grid: &Grid) -> usize {
    grid.cards().filter(|card| !card.revealed).count()
}
