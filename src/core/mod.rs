//! Core engine types: cards, player identity, deterministic RNG.

pub mod card;
pub mod player;
pub mod rng;

pub use card::Card;
pub use player::{PlayerId, PlayerMap, PLAYER_ONE, PLAYER_TWO};
pub use rng::{GameRng, GameRngState};
