//! A single grid card: a value and a face-up flag.

use serde::{Deserialize, Serialize};

/// One card in a player's grid.
///
/// The value is fixed once dealt, with one exception: a swap overwrites the
/// value and forces the card face-up. `revealed` only ever flips false to
/// true.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card value in `-2..=12`.
    pub value: i32,
    /// Whether the card is face-up.
    pub revealed: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn face_down(value: i32) -> Self {
        Self {
            value,
            revealed: false,
        }
    }

    /// Create a face-up card.
    #[must_use]
    pub const fn face_up(value: i32) -> Self {
        Self {
            value,
            revealed: true,
        }
    }
}
