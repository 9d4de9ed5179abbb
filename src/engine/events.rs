//! Notifications emitted for a presentation layer.
//!
//! The engine never touches a display surface. Every state change is
//! announced as an [`EngineEvent`]; an adapter drains the queue after each
//! command and renders whatever it cares about.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};
use crate::engine::state::Phase;
use crate::grid::Grid;

/// A state-change notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A player's grid changed shape or contents; carries a full snapshot.
    GridChanged { player: PlayerId, grid: Grid },

    /// The visible top of the discard pile changed (`None` = empty pile).
    DiscardTopChanged { top: Option<i32> },

    /// A player's visible score or hidden-card count changed.
    ScoreChanged {
        player: PlayerId,
        score: i32,
        hidden: usize,
    },

    /// The acting player or phase changed.
    TurnChanged { player: PlayerId, phase: Phase },

    /// The game ended. `winner` is `None` on a tie; lower score wins.
    GameEnded {
        scores: PlayerMap<i32>,
        winner: Option<PlayerId>,
    },
}
