//! Player identification and per-seat data storage.
//!
//! The game is strictly two-player. `PlayerId` names a seat and `PlayerMap`
//! holds exactly one value per seat with O(1) access by seat.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier for the two players.
///
/// Seats are 0-based internally; `Display` uses the 1-based labels players
/// see ("Player 1", "Player 2").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

/// The first seat.
pub const PLAYER_ONE: PlayerId = PlayerId(0);
/// The second seat (the AI seat when AI mode is on).
pub const PLAYER_TWO: PlayerId = PlayerId(1);

impl PlayerId {
    /// Get the raw seat index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both seats, in order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [PLAYER_ONE, PLAYER_TWO].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-seat data storage.
///
/// ## Example
///
/// ```
/// use skyjo_engine::core::player::{PlayerMap, PLAYER_ONE, PLAYER_TWO};
///
/// let mut scores: PlayerMap<i32> = PlayerMap::with_value(0);
/// scores[PLAYER_TWO] = 15;
///
/// assert_eq!(scores[PLAYER_ONE], 0);
/// assert_eq!(scores[PLAYER_TWO], 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    ///
    /// The factory may mutate captured state (e.g. deal off a shared pile);
    /// it is invoked once per seat, in seat order.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PLAYER_ONE), factory(PLAYER_TWO)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.data.iter())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
