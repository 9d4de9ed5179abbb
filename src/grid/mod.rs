//! Player grids: an owned, always-rectangular 2D card arrangement.
//!
//! Grids start at 3x4 and shrink as matching lines are cleared. Rows and
//! columns are removed independently and a grid may become empty.
//! Rectangularity is an enforced invariant: the only mutations that change
//! shape are the whole-line removals in [`lines`], which take a full row or
//! a full column at a time.

pub mod lines;
pub mod score;

pub use lines::clear_lines;
pub use score::{hidden_count, score};

use serde::{Deserialize, Serialize};

use crate::core::{Card, GameRng};
use crate::error::EngineError;

/// A player's rectangular card grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Card>>,
}

impl Grid {
    /// Build a grid from dealt rows.
    ///
    /// Panics if the rows are ragged; dealing always produces rectangular
    /// input and persistence validates before constructing.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Card>>) -> Self {
        if let Some(first) = rows.first() {
            let cols = first.len();
            assert!(
                rows.iter().all(|r| r.len() == cols),
                "grid rows must have equal length"
            );
        }
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (0 for an empty grid).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Whether the grid has no cards left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    /// Whether (row, col) is inside the current shape.
    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols()
    }

    /// The card at (row, col), if in bounds.
    #[must_use]
    pub fn card(&self, row: usize, col: usize) -> Option<Card> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Iterate over all cards.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Iterate over (row, col, card) triples.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Card)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, &card)| (r, c, card))
        })
    }

    /// Reveal two distinct random cells at deal time.
    pub fn reveal_initial(&mut self, rng: &mut GameRng) {
        let (rows, cols) = (self.rows(), self.cols());
        if rows * cols < 2 {
            return;
        }

        let mut revealed = 0;
        while revealed < 2 {
            let row = rng.gen_range_usize(0..rows);
            let col = rng.gen_range_usize(0..cols);
            let card = &mut self.rows[row][col];
            if !card.revealed {
                card.revealed = true;
                revealed += 1;
            }
        }
    }

    /// Swap a new value into a cell, forcing it face-up.
    ///
    /// Returns the previous value, destined for the discard pile.
    pub fn replace_card(
        &mut self,
        row: usize,
        col: usize,
        new_value: i32,
    ) -> Result<i32, EngineError> {
        if !self.contains(row, col) {
            return Err(EngineError::OutOfBounds { row, col });
        }
        let card = &mut self.rows[row][col];
        let old_value = card.value;
        card.value = new_value;
        card.revealed = true;
        Ok(old_value)
    }

    /// Flip a cell face-up without changing its value.
    ///
    /// Callers check the revealed flag first; the engine's reveal phase
    /// rejects already-revealed targets before invoking this.
    pub fn reveal_card(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        if !self.contains(row, col) {
            return Err(EngineError::OutOfBounds { row, col });
        }
        self.rows[row][col].revealed = true;
        Ok(())
    }

    /// Flip every card face-up (endgame).
    pub fn reveal_all(&mut self) {
        for row in &mut self.rows {
            for card in row {
                card.revealed = true;
            }
        }
    }

    /// True if the grid is empty or every card is face-up.
    #[must_use]
    pub fn all_revealed(&self) -> bool {
        self.cards().all(|card| card.revealed)
    }

    pub(crate) fn remove_column(&mut self, col: usize) {
        for row in &mut self.rows {
            row.remove(col);
        }
        // Removing the last column leaves zero-length rows; collapse to empty.
        if self.cols() == 0 {
            self.rows.clear();
        }
    }

    pub(crate) fn remove_row(&mut self, row: usize) {
        self.rows.remove(row);
    }

    pub(crate) fn column_cards(&self, col: usize) -> impl Iterator<Item = Card> + '_ {
        self.rows.iter().map(move |row| row[col])
    }

    pub(crate) fn row_cards(&self, row: usize) -> &[Card] {
        &self.rows[row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(values: &[&[i32]]) -> Grid {
        Grid::from_rows(
            values
                .iter()
                .map(|row| row.iter().map(|&v| Card::face_down(v)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_shape() {
        let grid = grid_of(&[&[1, 2, 3, 4], &[5, 6, 7, 8], &[9, 10, 11, 12]]);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert!(!grid.is_empty());
        assert!(grid.contains(2, 3));
        assert!(!grid.contains(3, 0));
        assert!(!grid.contains(0, 4));
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_ragged_rows_rejected() {
        let _ = Grid::from_rows(vec![
            vec![Card::face_down(1), Card::face_down(2)],
            vec![Card::face_down(3)],
        ]);
    }

    #[test]
    fn test_reveal_initial_two_distinct() {
        let mut grid = grid_of(&[&[1, 2, 3, 4], &[5, 6, 7, 8], &[9, 10, 11, 12]]);
        let mut rng = GameRng::new(42);

        grid.reveal_initial(&mut rng);

        let revealed = grid.cards().filter(|c| c.revealed).count();
        assert_eq!(revealed, 2);
    }

    #[test]
    fn test_replace_card_returns_old_value() {
        let mut grid = grid_of(&[&[1, 2], &[3, 4]]);
        let old = grid.replace_card(1, 0, -2).unwrap();

        assert_eq!(old, 3);
        let card = grid.card(1, 0).unwrap();
        assert_eq!(card.value, -2);
        assert!(card.revealed);
    }

    #[test]
    fn test_replace_card_out_of_bounds() {
        let mut grid = grid_of(&[&[1, 2], &[3, 4]]);
        assert!(matches!(
            grid.replace_card(2, 0, 5),
            Err(EngineError::OutOfBounds { row: 2, col: 0 })
        ));
    }

    #[test]
    fn test_reveal_card() {
        let mut grid = grid_of(&[&[1, 2], &[3, 4]]);
        grid.reveal_card(0, 1).unwrap();

        assert!(grid.card(0, 1).unwrap().revealed);
        assert!(!grid.card(0, 0).unwrap().revealed);
        assert!(grid.reveal_card(5, 5).is_err());
    }

    #[test]
    fn test_all_revealed() {
        let mut grid = grid_of(&[&[1, 2]]);
        assert!(!grid.all_revealed());

        grid.reveal_all();
        assert!(grid.all_revealed());

        // An empty grid counts as fully revealed
        let empty = Grid::from_rows(vec![]);
        assert!(empty.all_revealed());
    }

    #[test]
    fn test_remove_column_keeps_rectangularity() {
        let mut grid = grid_of(&[&[1, 2, 3], &[4, 5, 6]]);
        grid.remove_column(1);

        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.card(0, 1).unwrap().value, 3);
        assert_eq!(grid.card(1, 1).unwrap().value, 6);
    }

    #[test]
    fn test_remove_last_column_empties_grid() {
        let mut grid = grid_of(&[&[1], &[2], &[3]]);
        grid.remove_column(0);

        assert!(grid.is_empty());
        assert_eq!(grid.rows(), 0);
    }
}
