//! Turn state: the phase machine's data.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Sub-step of a single player's turn.
///
/// The legal flow is `ChooseAction -> {DecideDrawnCard | SwapCard} ->
/// RevealCard -> ChooseAction(next player)`, with `Ended` terminal.
/// `SwapCard` (after taking the discard) must place the card; only a drawn
/// card may be discarded, which then forces a reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Choose between drawing from the pile and taking the discard.
    ChooseAction,
    /// Holding a drawn card: swap it into the grid or discard it.
    DecideDrawnCard,
    /// Holding the taken discard: must swap it into the grid.
    SwapCard,
    /// Discarded the drawn card: must flip one face-down card.
    RevealCard,
    /// Terminal: final scores are in.
    Ended,
}

/// The full turn state, created at game start and mutated exclusively by
/// the engine's command handlers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Current phase.
    pub phase: Phase,
    /// Whose turn it is.
    pub current_player: PlayerId,
    /// Card in hand between choosing and placing, if any.
    pub current_card: Option<i32>,
    /// First player to reveal their whole grid, once recorded.
    pub final_turn_player: Option<PlayerId>,
    /// True once the opponent is on their single extra turn.
    pub game_ending: bool,
    /// Who opened the game (higher initial revealed score).
    pub starting_player: PlayerId,
    /// Whether the second seat is driven by the AI.
    pub ai_mode: bool,
}

impl TurnState {
    /// Fresh state for a new game opened by `starting_player`.
    #[must_use]
    pub fn new(starting_player: PlayerId, ai_mode: bool) -> Self {
        Self {
            phase: Phase::ChooseAction,
            current_player: starting_player,
            current_card: None,
            final_turn_player: None,
            game_ending: false,
            starting_player,
            ai_mode,
        }
    }
}
