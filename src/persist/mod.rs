//! Save/restore gateway.
//!
//! The persisted shape is the full engine state: both piles, both grids,
//! the turn state, and the RNG position (so a restored game continues the
//! exact random stream). Storage itself is the caller's concern; this
//! module only encodes, decodes, and validates.
//!
//! Corrupt or missing data never crashes a caller: [`load_or_new`] falls
//! back to dealing a fresh game.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::{GameRng, GameRngState, PlayerMap, PLAYER_ONE, PLAYER_TWO};
use crate::deck::{build_deck, Piles};
use crate::engine::SkyjoEngine;
use crate::error::EngineError;
use crate::grid::Grid;

/// The persisted state shape. Round-trips exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub draw_pile: Vec<i32>,
    pub discard_pile: Vec<i32>,
    pub player1_grid: Grid,
    pub player2_grid: Grid,
    pub turn: crate::engine::TurnState,
    pub rng: GameRngState,
}

impl SavedGame {
    /// Capture an engine's full state.
    #[must_use]
    pub fn capture(engine: &SkyjoEngine) -> Self {
        Self {
            draw_pile: engine.piles().draw_cards().to_vec(),
            discard_pile: engine.piles().discard_cards().to_vec(),
            player1_grid: engine.grid(PLAYER_ONE).clone(),
            player2_grid: engine.grid(PLAYER_TWO).clone(),
            turn: engine.turn().clone(),
            rng: engine.rng().state(),
        }
    }

    /// Rebuild an engine, validating the save first.
    ///
    /// Validation rejects saves whose cards do not form the canonical
    /// 150-value multiset - a corrupted save must not smuggle cards into or
    /// out of the game.
    pub fn restore(self) -> Result<SkyjoEngine, EngineError> {
        self.validate()?;

        let piles = Piles::from_parts(self.draw_pile, self.discard_pile);
        let grids = {
            let (g1, g2) = (self.player1_grid, self.player2_grid);
            PlayerMap::new(|p| if p == PLAYER_ONE { g1.clone() } else { g2.clone() })
        };
        let rng = GameRng::from_state(&self.rng);

        Ok(SkyjoEngine::from_parts(piles, grids, self.turn, rng))
    }

    fn validate(&self) -> Result<(), EngineError> {
        let mut counts: BTreeMap<i32, i64> = BTreeMap::new();
        for value in build_deck() {
            *counts.entry(value).or_insert(0) += 1;
        }

        // A mid-turn save may hold one card in hand; it counts too.
        let all_values = self
            .draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .copied()
            .chain(self.player1_grid.cards().map(|c| c.value))
            .chain(self.player2_grid.cards().map(|c| c.value))
            .chain(self.turn.current_card);

        for value in all_values {
            let Some(count) = counts.get_mut(&value) else {
                return Err(EngineError::CorruptSave(format!(
                    "unknown card value {value}"
                )));
            };
            *count -= 1;
            if *count < 0 {
                return Err(EngineError::CorruptSave(format!(
                    "too many cards of value {value}"
                )));
            }
        }

        if counts.values().any(|&c| c != 0) {
            return Err(EngineError::CorruptSave("missing cards".to_string()));
        }
        Ok(())
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, EngineError> {
        serde_json::to_string(self).map_err(|e| EngineError::CorruptSave(e.to_string()))
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::CorruptSave(e.to_string()))
    }

    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        bincode::serialize(self).map_err(|e| EngineError::CorruptSave(e.to_string()))
    }

    /// Decode from compact binary.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        bincode::deserialize(bytes).map_err(|e| EngineError::CorruptSave(e.to_string()))
    }
}

/// Restore a game from saved JSON, or deal a fresh one.
///
/// Any decode or validation failure is logged and swallowed; the player
/// gets a new game rather than a crash. Propagates only the fatal
/// randomness error from dealing fresh.
pub fn load_or_new(saved_json: Option<&str>, ai_mode: bool) -> Result<SkyjoEngine, EngineError> {
    if let Some(json) = saved_json {
        match SavedGame::from_json(json).and_then(SavedGame::restore) {
            Ok(engine) => return Ok(engine),
            Err(e) => warn!("discarding saved game: {e}"),
        }
    }
    SkyjoEngine::new(ai_mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Phase;

    #[test]
    fn test_capture_restore_round_trip() {
        let mut engine = SkyjoEngine::with_seed(42, false);

        // Advance a little so the save is mid-game
        assert!(engine.draw_from_pile().is_applied());
        assert!(engine.discard_drawn_card().is_applied());

        let saved = SavedGame::capture(&engine);
        let restored = saved.clone().restore().unwrap();

        assert_eq!(restored.turn(), engine.turn());
        assert_eq!(restored.grid(PLAYER_ONE), engine.grid(PLAYER_ONE));
        assert_eq!(restored.grid(PLAYER_TWO), engine.grid(PLAYER_TWO));
        assert_eq!(restored.top_discard(), engine.top_discard());
        assert_eq!(restored.draw_pile_len(), engine.draw_pile_len());
        assert_eq!(SavedGame::capture(&restored), saved);
    }

    #[test]
    fn test_restore_with_card_in_hand() {
        // Saving between drawing and placing leaves one card in hand; the
        // census must count it or every such save is a false corruption.
        let mut engine = SkyjoEngine::with_seed(42, false);
        assert!(engine.draw_from_pile().is_applied());
        let held = engine.current_card();
        assert!(held.is_some());

        let saved = SavedGame::capture(&engine);
        let restored = saved.restore().unwrap();

        assert_eq!(restored.phase(), Phase::DecideDrawnCard);
        assert_eq!(restored.current_card(), held);
    }

    #[test]
    fn test_json_round_trip() {
        let engine = SkyjoEngine::with_seed(42, true);
        let saved = SavedGame::capture(&engine);

        let json = saved.to_json().unwrap();
        let decoded = SavedGame::from_json(&json).unwrap();
        assert_eq!(saved, decoded);
    }

    #[test]
    fn test_bytes_round_trip() {
        let engine = SkyjoEngine::with_seed(42, false);
        let saved = SavedGame::capture(&engine);

        let bytes = saved.to_bytes().unwrap();
        let decoded = SavedGame::from_bytes(&bytes).unwrap();
        assert_eq!(saved, decoded);
    }

    #[test]
    fn test_validation_rejects_extra_cards() {
        let engine = SkyjoEngine::with_seed(42, false);
        let mut saved = SavedGame::capture(&engine);
        saved.draw_pile.push(12);

        assert!(matches!(
            saved.restore(),
            Err(EngineError::CorruptSave(_))
        ));
    }

    #[test]
    fn test_validation_rejects_unknown_value() {
        let engine = SkyjoEngine::with_seed(42, false);
        let mut saved = SavedGame::capture(&engine);
        saved.discard_pile.push(99);

        assert!(matches!(
            saved.restore(),
            Err(EngineError::CorruptSave(_))
        ));
    }

    #[test]
    fn test_validation_rejects_missing_cards() {
        let engine = SkyjoEngine::with_seed(42, false);
        let mut saved = SavedGame::capture(&engine);
        saved.draw_pile.pop();

        assert!(matches!(
            saved.restore(),
            Err(EngineError::CorruptSave(_))
        ));
    }

    #[test]
    fn test_load_or_new_falls_back_on_garbage() {
        let engine = load_or_new(Some("not json at all"), false).unwrap();
        assert_eq!(engine.phase(), Phase::ChooseAction);
    }

    #[test]
    fn test_load_or_new_uses_valid_save() {
        let mut original = SkyjoEngine::with_seed(42, false);
        assert!(original.draw_from_pile().is_applied());
        let json = SavedGame::capture(&original).to_json().unwrap();

        let engine = load_or_new(Some(json.as_str()), false).unwrap();
        assert_eq!(engine.phase(), Phase::DecideDrawnCard);
        assert_eq!(engine.current_card(), original.current_card());
    }

    #[test]
    fn test_load_or_new_none_deals_fresh() {
        let engine = load_or_new(None, true).unwrap();
        assert_eq!(engine.phase(), Phase::ChooseAction);
        assert!(engine.turn().ai_mode);
    }
}
