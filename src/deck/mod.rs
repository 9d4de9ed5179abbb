//! Deck composition and the two shared piles.
//!
//! A Skyjo deck is exactly 150 cards: five -2s, ten -1s, fifteen 0s, and
//! ten of each value 1 through 12. The engine maintains a conservation
//! invariant for the lifetime of a game: the multiset union of draw pile,
//! discard pile, and every card in both grids always equals this fixed
//! distribution.

use serde::{Deserialize, Serialize};

use crate::core::{Card, GameRng};
use crate::error::EngineError;
use crate::grid::Grid;

/// Total cards in a deck.
pub const DECK_SIZE: usize = 150;

/// Initial grid rows per player.
pub const GRID_ROWS: usize = 3;

/// Initial grid columns per player.
pub const GRID_COLS: usize = 4;

/// Card value distribution: (value, count) pairs summing to [`DECK_SIZE`].
pub const DECK_DISTRIBUTION: [(i32, usize); 15] = [
    (-2, 5),
    (-1, 10),
    (0, 15),
    (1, 10),
    (2, 10),
    (3, 10),
    (4, 10),
    (5, 10),
    (6, 10),
    (7, 10),
    (8, 10),
    (9, 10),
    (10, 10),
    (11, 10),
    (12, 10),
];

/// Materialize a fresh deck in canonical (ascending) order.
#[must_use]
pub fn build_deck() -> Vec<i32> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for (value, count) in DECK_DISTRIBUTION {
        deck.extend(std::iter::repeat(value).take(count));
    }
    deck
}

/// The shared draw and discard piles.
///
/// Both are LIFO with the top at the end of the vec. Only the top of the
/// discard pile is ever shown to players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    draw: Vec<i32>,
    discard: Vec<i32>,
}

impl Piles {
    /// Shuffle a fresh deck and seed the discard pile with one face-up card.
    #[must_use]
    pub fn initialize(rng: &mut GameRng) -> Self {
        let mut draw = build_deck();
        rng.shuffle(&mut draw);
        // A full deck always yields the seed card.
        let first_discard = draw.pop().unwrap_or_default();
        Self {
            draw,
            discard: vec![first_discard],
        }
    }

    /// Reconstruct piles from raw vectors (persistence path).
    #[must_use]
    pub fn from_parts(draw: Vec<i32>, discard: Vec<i32>) -> Self {
        Self { draw, discard }
    }

    /// Pop the top card of the draw pile.
    pub fn draw(&mut self) -> Option<i32> {
        self.draw.pop()
    }

    /// Pop the top card of the discard pile.
    pub fn take_discard(&mut self) -> Option<i32> {
        self.discard.pop()
    }

    /// Push a card onto the discard pile.
    pub fn push_discard(&mut self, value: i32) {
        self.discard.push(value);
    }

    /// The face-up top of the discard pile, if any.
    #[must_use]
    pub fn top_discard(&self) -> Option<i32> {
        self.discard.last().copied()
    }

    /// Remaining draw pile size.
    #[must_use]
    pub fn draw_len(&self) -> usize {
        self.draw.len()
    }

    /// Discard pile size.
    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// Raw draw pile contents, bottom first (persistence path).
    #[must_use]
    pub fn draw_cards(&self) -> &[i32] {
        &self.draw
    }

    /// Raw discard pile contents, bottom first (persistence path).
    #[must_use]
    pub fn discard_cards(&self) -> &[i32] {
        &self.discard
    }
}

/// Deal a face-down grid off the top of the draw pile.
///
/// Errors with [`EngineError::InsufficientCards`] if the pile is short.
/// With the fixed 150-card deck and two 12-card deals this cannot happen at
/// game start, but the guard keeps the conservation invariant honest.
pub fn deal_grid(piles: &mut Piles, rows: usize, cols: usize) -> Result<Grid, EngineError> {
    let needed = rows * cols;
    if piles.draw_len() < needed {
        return Err(EngineError::InsufficientCards {
            needed,
            available: piles.draw_len(),
        });
    }

    let mut grid_rows = Vec::with_capacity(rows);
    for _ in 0..rows {
        let mut row = Vec::with_capacity(cols);
        for _ in 0..cols {
            // Guarded above; the pile cannot run dry mid-deal.
            let value = piles.draw().unwrap_or_default();
            row.push(Card::face_down(value));
        }
        grid_rows.push(row);
    }

    Ok(Grid::from_rows(grid_rows))
}
