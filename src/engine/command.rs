//! Command outcomes.
//!
//! Commands either apply or are rejected with a reason. Rejection never
//! mutates state - a stray click in the wrong phase is a no-op, not a
//! failure.

use serde::{Deserialize, Serialize};

/// Why a command was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// A flip/settle animation is in progress; input is locked.
    InputLocked,
    /// The game is over; only `start_new_game` applies.
    GameOver,
    /// The command is not legal in the current phase.
    WrongPhase,
    /// The targeted grid does not belong to the acting player.
    NotYourGrid,
    /// The draw or discard pile is empty.
    EmptyPile,
    /// The targeted cell is already face-up (reveal phase).
    AlreadyRevealed,
    /// The targeted cell is outside the current grid shape.
    OutOfBounds,
}

/// Result of issuing a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandResult {
    /// The command was legal and has taken effect.
    Applied,
    /// The command was a no-op; state is unchanged.
    Rejected(RejectReason),
}

impl CommandResult {
    /// Whether the command took effect.
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, CommandResult::Applied)
    }
}
