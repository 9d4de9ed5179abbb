//! Line clearing: removing fully-revealed, equal-valued rows and columns.
//!
//! Runs after every reveal or replace action, in a fixed order:
//!
//! 1. Column pass, only while the grid still has its original 3 rows.
//! 2. Row pass, using the column count left by the column pass, only when
//!    that count is exactly 4 (the original width).
//!
//! The 3-then-4 gating prevents double-counting a line that would satisfy
//! both shapes after a prior shrink: the board only ever shrinks along its
//! two original axes.

use smallvec::SmallVec;

use crate::deck::{Piles, GRID_COLS, GRID_ROWS};
use crate::grid::Grid;

/// Scan the grid and remove every matching line, pushing the removed card
/// values onto the discard pile.
///
/// A column matches when all 3 of its cards are revealed and share one
/// value; a row matches when all 4 of its cards do. Matched lines are
/// removed in descending index order so earlier removals don't shift the
/// indices of later ones. Returns whether anything was removed, which the
/// turn engine uses to add a settle delay in the presentation layer.
pub fn clear_lines(grid: &mut Grid, piles: &mut Piles) -> bool {
    let mut removed_any = false;

    // Column pass: only while the grid has its full 3 rows.
    if grid.rows() == GRID_ROWS {
        let mut columns_to_remove: SmallVec<[usize; GRID_COLS]> = SmallVec::new();

        for col in 0..grid.cols() {
            if column_matches(grid, col) {
                columns_to_remove.push(col);
            }
        }

        for &col in columns_to_remove.iter().rev() {
            for card in grid.column_cards(col).collect::<SmallVec<[_; GRID_ROWS]>>() {
                piles.push_discard(card.value);
            }
            grid.remove_column(col);
            removed_any = true;
        }
    }

    // Row pass: evaluated against the width left by the column pass.
    if grid.cols() == GRID_COLS {
        let mut rows_to_remove: SmallVec<[usize; GRID_ROWS]> = SmallVec::new();

        for row in 0..grid.rows() {
            if row_matches(grid, row) {
                rows_to_remove.push(row);
            }
        }

        for &row in rows_to_remove.iter().rev() {
            for card in grid.row_cards(row).to_vec() {
                piles.push_discard(card.value);
            }
            grid.remove_row(row);
            removed_any = true;
        }
    }

    removed_any
}

fn column_matches(grid: &Grid, col: usize) -> bool {
    let mut cards = grid.column_cards(col);
    let Some(first) = cards.next() else {
        return false;
    };
    first.revealed && cards.all(|c| c.revealed && c.value == first.value)
}

fn row_matches(grid: &Grid, row: usize) -> bool {
    let cards = grid.row_cards(row);
    let Some(first) = cards.first() else {
        return false;
    };
    first.revealed
        && cards
            .iter()
            .all(|c| c.revealed && c.value == first.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;

    fn empty_piles() -> Piles {
        Piles::from_parts(vec![], vec![])
    }

    /// Grid builder: `(value, revealed)` per cell.
    fn grid_of(cells: &[&[(i32, bool)]]) -> Grid {
        Grid::from_rows(
            cells
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|&(v, r)| Card {
                            value: v,
                            revealed: r,
                        })
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_matching_column_removed() {
        let mut grid = grid_of(&[
            &[(5, true), (1, false), (2, false), (3, false)],
            &[(5, true), (4, false), (6, false), (7, false)],
            &[(5, true), (8, false), (9, false), (10, false)],
        ]);
        let mut piles = empty_piles();

        assert!(clear_lines(&mut grid, &mut piles));
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.rows(), 3);
        // The three 5s land on the discard pile
        assert_eq!(piles.discard_cards(), &[5, 5, 5]);
    }

    #[test]
    fn test_unrevealed_column_not_removed() {
        let mut grid = grid_of(&[
            &[(5, true), (1, false), (2, false), (3, false)],
            &[(5, false), (4, false), (6, false), (7, false)],
            &[(5, true), (8, false), (9, false), (10, false)],
        ]);
        let mut piles = empty_piles();

        assert!(!clear_lines(&mut grid, &mut piles));
        assert_eq!(grid.cols(), 4);
        assert_eq!(piles.discard_len(), 0);
    }

    #[test]
    fn test_unequal_column_not_removed() {
        let mut grid = grid_of(&[
            &[(5, true), (1, false), (2, false), (3, false)],
            &[(6, true), (4, false), (6, false), (7, false)],
            &[(5, true), (8, false), (9, false), (10, false)],
        ]);
        let mut piles = empty_piles();

        assert!(!clear_lines(&mut grid, &mut piles));
        assert_eq!(grid.cols(), 4);
    }

    #[test]
    fn test_multiple_columns_removed_descending() {
        // Columns 0 and 2 both match; descending removal keeps indices valid
        let mut grid = grid_of(&[
            &[(1, true), (9, false), (3, true), (8, false)],
            &[(1, true), (9, false), (3, true), (8, false)],
            &[(1, true), (9, true), (3, true), (8, false)],
        ]);
        let mut piles = empty_piles();

        assert!(clear_lines(&mut grid, &mut piles));
        assert_eq!(grid.cols(), 2);
        // Remaining columns are the old 1 and 3
        assert_eq!(grid.card(0, 0).unwrap().value, 9);
        assert_eq!(grid.card(0, 1).unwrap().value, 8);
        assert_eq!(piles.discard_len(), 6);
    }

    #[test]
    fn test_row_removed_only_at_width_four() {
        // 2 rows x 4 cols: row pass applies, column pass does not
        let mut grid = grid_of(&[
            &[(7, true), (7, true), (7, true), (7, true)],
            &[(1, true), (2, false), (3, false), (4, false)],
        ]);
        let mut piles = empty_piles();

        assert!(clear_lines(&mut grid, &mut piles));
        assert_eq!(grid.rows(), 1);
        assert_eq!(grid.cols(), 4);
        assert_eq!(piles.discard_cards(), &[7, 7, 7, 7]);
    }

    #[test]
    fn test_no_row_pass_after_column_shrink() {
        // Column 0 matches. After its removal the width is 3, so the row
        // pass is skipped even though row 0 would then be all 4s.
        let mut grid = grid_of(&[
            &[(4, true), (4, true), (4, true), (4, true)],
            &[(4, true), (1, false), (2, false), (3, false)],
            &[(4, true), (5, false), (6, false), (7, false)],
        ]);
        let mut piles = empty_piles();

        assert!(clear_lines(&mut grid, &mut piles));
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert_eq!(piles.discard_cards(), &[4, 4, 4]);
    }

    #[test]
    fn test_no_column_pass_after_row_shrink() {
        // 2 rows x 3 cols: neither gate holds, nothing is removed even
        // though column 0 is revealed and equal.
        let mut grid = grid_of(&[
            &[(2, true), (1, true), (3, false)],
            &[(2, true), (5, false), (6, false)],
        ]);
        let mut piles = empty_piles();

        assert!(!clear_lines(&mut grid, &mut piles));
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
    }

    #[test]
    fn test_empty_grid_is_noop() {
        let mut grid = Grid::from_rows(vec![]);
        let mut piles = empty_piles();

        assert!(!clear_lines(&mut grid, &mut piles));
    }
}
