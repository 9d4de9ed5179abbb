//! Fatal error taxonomy.
//!
//! Only genuinely unrecoverable or caller-actionable failures live here.
//! Routine command rejections (wrong phase, wrong player, empty pile) are
//! not errors - they are [`RejectReason`](crate::engine::RejectReason)
//! values returned by the command surface.

use thiserror::Error;

/// Fatal engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A deal requested more cards than the draw pile holds.
    ///
    /// Cannot occur at game start (150 cards, two 12-card grids) but is
    /// guarded on every deal.
    #[error("insufficient cards: needed {needed}, {available} available")]
    InsufficientCards { needed: usize, available: usize },

    /// A grid coordinate outside the current grid shape.
    #[error("grid coordinates out of bounds: ({row}, {col})")]
    OutOfBounds { row: usize, col: usize },

    /// The OS random source could not seed the game RNG.
    ///
    /// Surfaced to the caller of game start; there is no fallback.
    #[error("system randomness unavailable: {0}")]
    RandomnessUnavailable(#[from] getrandom::Error),

    /// A persisted game failed decoding or validation.
    ///
    /// Callers recover by discarding the save and starting fresh.
    #[error("corrupt saved game: {0}")]
    CorruptSave(String),
}
