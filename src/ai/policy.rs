//! Heuristic decision functions.
//!
//! Each function answers one question from a read-only view of the game and
//! returns a target for the driver to act on. None of them mutate the
//! engine.

use crate::core::GameRng;
use crate::grid::Grid;

/// Take the discard when its top value is this or lower.
pub const DISCARD_TAKE_THRESHOLD: i32 = 4;

/// Probability of actually taking a good discard, to avoid fully
/// deterministic play.
pub const DISCARD_TAKE_PROBABILITY: f64 = 0.8;

/// Keep a drawn card when its value is this or lower.
pub const KEEP_DRAWN_THRESHOLD: i32 = 2;

/// Random picks attempted before falling back to a deterministic scan.
pub const RANDOM_REVEAL_ATTEMPTS: usize = 20;

/// Opening choice: take the discard or draw from the pile?
///
/// Takes a low discard (top <= 4) with 80% probability. When the draw pile
/// is empty the discard is the only option left.
#[must_use]
pub fn wants_discard(rng: &mut GameRng, top_discard: Option<i32>, draw_len: usize) -> bool {
    let Some(top) = top_discard else {
        return false;
    };
    if draw_len == 0 {
        return true;
    }
    top <= DISCARD_TAKE_THRESHOLD && rng.gen_bool(DISCARD_TAKE_PROBABILITY)
}

/// Cell to swap a taken card into.
///
/// Prefers the revealed cell with the largest `(value - taken)` difference;
/// if nothing is revealed yet, falls back to the first unrevealed cell.
/// `None` only for an empty grid, which cannot occur mid-turn.
#[must_use]
pub fn swap_target(grid: &Grid, taken: i32) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut best_difference = i32::MIN;
    let mut fallback: Option<(usize, usize)> = None;

    for (row, col, card) in grid.cells() {
        if card.revealed {
            let difference = card.value - taken;
            if difference > best_difference {
                best_difference = difference;
                best = Some((row, col));
            }
        } else if fallback.is_none() {
            fallback = Some((row, col));
        }
    }

    best.or(fallback)
}

/// Cell worth replacing with a drawn card, if any.
///
/// A drawn card is kept only when it is low (<= 2) and some revealed cell
/// holds a strictly higher value; that cell is the target. Otherwise the
/// driver discards the card and reveals instead.
#[must_use]
pub fn keep_target(grid: &Grid, drawn: i32) -> Option<(usize, usize)> {
    if drawn > KEEP_DRAWN_THRESHOLD {
        return None;
    }

    let highest = grid
        .cells()
        .filter(|(_, _, card)| card.revealed)
        .max_by_key(|(_, _, card)| card.value)?;

    let (row, col, card) = highest;
    (card.value > drawn).then_some((row, col))
}

/// A still-hidden cell to flip after discarding a drawn card.
///
/// Picks uniformly at random with a bounded number of attempts, then falls
/// back to a deterministic scan so the choice always terminates even when
/// very few hidden cells remain. `None` when nothing is hidden.
#[must_use]
pub fn reveal_target(rng: &mut GameRng, grid: &Grid) -> Option<(usize, usize)> {
    if grid.is_empty() {
        return None;
    }

    let (rows, cols) = (grid.rows(), grid.cols());
    for _ in 0..RANDOM_REVEAL_ATTEMPTS {
        let row = rng.gen_range_usize(0..rows);
        let col = rng.gen_range_usize(0..cols);
        if grid.card(row, col).is_some_and(|card| !card.revealed) {
            return Some((row, col));
        }
    }

    grid.cells()
        .find(|(_, _, card)| !card.revealed)
        .map(|(row, col, _)| (row, col))
}
