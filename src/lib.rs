//! # skyjo-engine
//!
//! A two-player Skyjo-style card game rule engine.
//!
//! Each player manages a shrinking grid of face-down/face-up cards and
//! competes to minimize the sum of revealed card values. The engine owns
//! deck composition and shuffling, the per-turn state machine, the
//! line-matching removal algorithm, endgame triggering and scoring, and a
//! heuristic policy for an automated opponent.
//!
//! ## Design Principles
//!
//! 1. **Display-agnostic**: The engine has zero dependency on a rendering
//!    surface. It consumes commands and emits [`EngineEvent`] notifications;
//!    a presentation adapter subscribes and is otherwise passive.
//!
//! 2. **Guarded commands**: Every command is validated against the current
//!    phase, acting player, and input lock. A command with an unmet guard
//!    is rejected without mutating state - rejection is an answer, not an
//!    error.
//!
//! 3. **Deterministic**: All randomness flows through a seedable ChaCha8
//!    RNG whose state serializes with the rest of the game, so a restored
//!    save replays identically.
//!
//! ## Modules
//!
//! - `core`: Cards, player identity, deterministic RNG
//! - `deck`: The 150-card distribution, draw and discard piles
//! - `grid`: Player grids, line clearing, scoring
//! - `engine`: The turn state machine and command/notification surface
//! - `ai`: Heuristic opponent issuing commands through the public surface
//! - `persist`: Save/restore gateway with corruption fallback
//! - `error`: Fatal error taxonomy

pub mod ai;
pub mod core;
pub mod deck;
pub mod engine;
pub mod error;
pub mod grid;
pub mod persist;

// Re-export commonly used types
pub use crate::core::{Card, GameRng, GameRngState, PlayerId, PlayerMap, PLAYER_ONE, PLAYER_TWO};

pub use crate::deck::{build_deck, deal_grid, Piles, DECK_SIZE, GRID_COLS, GRID_ROWS};

pub use crate::grid::{hidden_count, score, Grid};

pub use crate::engine::{
    CommandResult, EngineEvent, Phase, RejectReason, SkyjoEngine, TurnState,
};

pub use crate::ai::{AiDriver, AI_SEAT};

pub use crate::persist::SavedGame;

pub use crate::error::EngineError;
