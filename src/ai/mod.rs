//! The automated opponent.
//!
//! The AI occupies the second seat and plays through the exact same command
//! surface as a human - it has no privileged mutation path, so every move
//! it makes passes the engine's guards.
//!
//! - [`policy`]: pure decision functions over engine observations
//! - [`driver`]: a step queue that paces decisions with think-time delays

pub mod driver;
pub mod policy;

pub use driver::AiDriver;

use crate::core::{PlayerId, PLAYER_TWO};

/// The seat the AI plays when AI mode is enabled.
pub const AI_SEAT: PlayerId = PLAYER_TWO;
