//! The turn engine: a guarded state machine over the whole game session.
//!
//! One [`SkyjoEngine`] instance owns the piles, both grids, the turn state,
//! and the RNG. All mutation flows through the command surface; every
//! command validates phase, acting player, and the input lock before
//! touching anything, and state changes are announced as [`EngineEvent`]s.
//!
//! ## Turn flow
//!
//! ```text
//! ChooseAction --draw_from_pile--> DecideDrawnCard --select cell--> (next player)
//!      |                                  |
//!      |                                  +--discard_drawn_card--> RevealCard --select cell--> (next player)
//!      |
//!      +--take_discard--> SwapCard --select cell--> (next player)
//! ```
//!
//! The finishing condition is evaluated on the acting player's own grid,
//! once, after each action that changes reveal/value state. The first
//! finisher grants the opponent exactly one more full turn; the game then
//! ends and every remaining card is revealed.

pub mod command;
pub mod events;
pub mod state;

pub use command::{CommandResult, RejectReason};
pub use events::EngineEvent;
pub use state::{Phase, TurnState};

use log::{debug, info};

use crate::core::{GameRng, PlayerId, PlayerMap, PLAYER_ONE, PLAYER_TWO};
use crate::deck::{deal_grid, Piles, GRID_COLS, GRID_ROWS};
use crate::error::EngineError;
use crate::grid::{clear_lines, hidden_count, score, Grid};

/// The complete game session.
pub struct SkyjoEngine {
    piles: Piles,
    grids: PlayerMap<Grid>,
    turn: TurnState,
    rng: GameRng,
    /// Rejects all commands while a flip/settle animation plays out.
    locked: bool,
    /// Bumped on every new game so stale scheduled work can be detected.
    session: u64,
    events: Vec<EngineEvent>,
}

impl SkyjoEngine {
    /// Start a fresh game seeded from the operating system.
    ///
    /// Fails only if the OS random source is unavailable.
    pub fn new(ai_mode: bool) -> Result<Self, EngineError> {
        let rng = GameRng::from_entropy()?;
        Ok(Self::with_rng(rng, ai_mode))
    }

    /// Start a fresh game with a pinned seed (tests, replays).
    #[must_use]
    pub fn with_seed(seed: u64, ai_mode: bool) -> Self {
        Self::with_rng(GameRng::new(seed), ai_mode)
    }

    fn with_rng(mut rng: GameRng, ai_mode: bool) -> Self {
        let (piles, grids, turn) = Self::deal_new_round(&mut rng, ai_mode);
        let mut engine = Self {
            piles,
            grids,
            turn,
            rng,
            locked: false,
            session: 0,
            events: Vec::new(),
        };
        engine.emit_full_snapshot();
        engine
    }

    /// Rebuild a session from restored parts (persistence path).
    pub(crate) fn from_parts(
        piles: Piles,
        grids: PlayerMap<Grid>,
        turn: TurnState,
        rng: GameRng,
    ) -> Self {
        let mut engine = Self {
            piles,
            grids,
            turn,
            rng,
            locked: false,
            session: 0,
            events: Vec::new(),
        };
        engine.emit_full_snapshot();
        engine
    }

    fn deal_new_round(rng: &mut GameRng, ai_mode: bool) -> (Piles, PlayerMap<Grid>, TurnState) {
        let mut piles = Piles::initialize(rng);

        // Guarded even though a fresh 150-card deck cannot run short here.
        let mut grids = PlayerMap::new(|_| {
            deal_grid(&mut piles, GRID_ROWS, GRID_COLS)
                .unwrap_or_else(|_| Grid::from_rows(vec![]))
        });
        for player in PlayerId::both() {
            grids[player].reveal_initial(rng);
        }

        // The player showing the higher initial score opens; a coin flip
        // breaks ties.
        let p1 = score(&grids[PLAYER_ONE]);
        let p2 = score(&grids[PLAYER_TWO]);
        let starting_player = match p1.cmp(&p2) {
            std::cmp::Ordering::Greater => PLAYER_ONE,
            std::cmp::Ordering::Less => PLAYER_TWO,
            std::cmp::Ordering::Equal => {
                if rng.gen_bool(0.5) {
                    PLAYER_ONE
                } else {
                    PLAYER_TWO
                }
            }
        };

        info!("new round: starting player {starting_player}, ai_mode={ai_mode}");
        (piles, grids, TurnState::new(starting_player, ai_mode))
    }

    // === Command surface ===

    /// Discard the current session and deal a new game.
    ///
    /// Always applies; the session counter invalidates any scheduled work
    /// that targeted the old game.
    pub fn start_new_game(&mut self) -> CommandResult {
        let ai_mode = self.turn.ai_mode;
        let (piles, grids, turn) = Self::deal_new_round(&mut self.rng, ai_mode);
        self.piles = piles;
        self.grids = grids;
        self.turn = turn;
        self.locked = false;
        self.session += 1;
        self.events.clear();
        self.emit_full_snapshot();
        CommandResult::Applied
    }

    /// Toggle the automated opponent for the second seat.
    pub fn set_ai_mode(&mut self, enabled: bool) -> CommandResult {
        self.turn.ai_mode = enabled;
        debug!("ai_mode set to {enabled}");
        CommandResult::Applied
    }

    /// Draw the top card of the draw pile into the hand.
    ///
    /// Legal only in `ChooseAction` with a non-empty draw pile.
    pub fn draw_from_pile(&mut self) -> CommandResult {
        if let Err(reason) = self.check_entry(Phase::ChooseAction) {
            return CommandResult::Rejected(reason);
        }
        let Some(value) = self.piles.draw() else {
            return CommandResult::Rejected(RejectReason::EmptyPile);
        };

        self.turn.current_card = Some(value);
        self.turn.phase = Phase::DecideDrawnCard;
        debug!("{} drew a card", self.turn.current_player);
        self.emit_turn_changed();
        CommandResult::Applied
    }

    /// Take the face-up top of the discard pile into the hand.
    ///
    /// Legal only in `ChooseAction` with a non-empty discard pile. The
    /// taken card must be swapped into the grid; it cannot be re-discarded.
    pub fn take_discard(&mut self) -> CommandResult {
        if let Err(reason) = self.check_entry(Phase::ChooseAction) {
            return CommandResult::Rejected(reason);
        }
        let Some(value) = self.piles.take_discard() else {
            return CommandResult::Rejected(RejectReason::EmptyPile);
        };

        self.turn.current_card = Some(value);
        self.turn.phase = Phase::SwapCard;
        debug!("{} took the discard ({value})", self.turn.current_player);
        self.emit_discard_top();
        self.emit_turn_changed();
        CommandResult::Applied
    }

    /// Discard the drawn card, committing to reveal a face-down card.
    ///
    /// Legal only in `DecideDrawnCard`.
    pub fn discard_drawn_card(&mut self) -> CommandResult {
        if let Err(reason) = self.check_entry(Phase::DecideDrawnCard) {
            return CommandResult::Rejected(reason);
        }
        let Some(value) = self.turn.current_card.take() else {
            return CommandResult::Rejected(RejectReason::WrongPhase);
        };

        self.piles.push_discard(value);
        self.turn.phase = Phase::RevealCard;
        debug!("{} discarded the drawn card ({value})", self.turn.current_player);
        self.emit_discard_top();
        self.emit_turn_changed();
        CommandResult::Applied
    }

    /// Act on a grid cell: swap the held card in, or flip a face-down card.
    ///
    /// `player` names the grid that was targeted; only the acting player's
    /// own grid is legal. In `DecideDrawnCard`/`SwapCard` the held card
    /// replaces the cell and the old value goes to the discard; in
    /// `RevealCard` an unrevealed cell is flipped. Either way the grid is
    /// then scanned for matching lines and the turn advances.
    pub fn select_grid_cell(&mut self, player: PlayerId, row: usize, col: usize) -> CommandResult {
        if self.locked {
            return CommandResult::Rejected(RejectReason::InputLocked);
        }
        if self.turn.phase == Phase::Ended {
            return CommandResult::Rejected(RejectReason::GameOver);
        }
        if player != self.turn.current_player {
            return CommandResult::Rejected(RejectReason::NotYourGrid);
        }
        if !self.grids[player].contains(row, col) {
            return CommandResult::Rejected(RejectReason::OutOfBounds);
        }

        match self.turn.phase {
            Phase::DecideDrawnCard | Phase::SwapCard => {
                let Some(held) = self.turn.current_card.take() else {
                    return CommandResult::Rejected(RejectReason::WrongPhase);
                };
                // In-bounds checked above; replace cannot fail here.
                let old = self.grids[player]
                    .replace_card(row, col, held)
                    .unwrap_or(held);
                self.piles.push_discard(old);
                debug!("{player} swapped {held} into ({row}, {col}), discarding {old}");
                self.emit_discard_top();
                self.settle_after_action(player);
                CommandResult::Applied
            }
            Phase::RevealCard => {
                let already_revealed = self.grids[player]
                    .card(row, col)
                    .is_some_and(|card| card.revealed);
                if already_revealed {
                    return CommandResult::Rejected(RejectReason::AlreadyRevealed);
                }
                let revealed = self.grids[player].reveal_card(row, col);
                debug_assert!(revealed.is_ok(), "cell bounds checked on entry");
                debug!("{player} revealed ({row}, {col})");
                self.settle_after_action(player);
                CommandResult::Applied
            }
            _ => CommandResult::Rejected(RejectReason::WrongPhase),
        }
    }

    /// Lock the command surface while a presentation animation plays.
    pub fn lock_input(&mut self) {
        self.locked = true;
    }

    /// Release the animation lock.
    pub fn unlock_input(&mut self) {
        self.locked = false;
    }

    // === Turn bookkeeping ===

    /// Common tail of both cell actions: clear lines, refresh score, advance.
    fn settle_after_action(&mut self, player: PlayerId) {
        let removed = clear_lines(&mut self.grids[player], &mut self.piles);
        if removed {
            debug!("{player} cleared at least one line");
            self.emit_discard_top();
        }
        self.emit_grid_changed(player);
        self.emit_score_changed(player);
        self.end_of_action();
    }

    /// Endgame detection and turn hand-off.
    fn end_of_action(&mut self) {
        if self.turn.game_ending {
            // The opponent just spent their single extra turn.
            self.end_game();
            return;
        }

        let acting = self.turn.current_player;
        if self.grids[acting].all_revealed() {
            if self.turn.final_turn_player.is_none() {
                self.turn.final_turn_player = Some(acting);
                self.turn.game_ending = true;
                info!("{acting} finished first; opponent gets one more turn");
            } else {
                self.end_game();
                return;
            }
        }

        self.turn.current_player = acting.opponent();
        self.turn.phase = Phase::ChooseAction;
        self.turn.current_card = None;
        self.emit_turn_changed();
    }

    /// Reveal everything, settle scores, and terminate the session.
    fn end_game(&mut self) {
        for player in PlayerId::both() {
            self.grids[player].reveal_all();
            self.emit_grid_changed(player);
            self.emit_score_changed(player);
        }

        let scores = PlayerMap::new(|p| score(&self.grids[p]));
        let winner = match scores[PLAYER_ONE].cmp(&scores[PLAYER_TWO]) {
            std::cmp::Ordering::Less => Some(PLAYER_ONE),
            std::cmp::Ordering::Greater => Some(PLAYER_TWO),
            std::cmp::Ordering::Equal => None,
        };

        self.turn.phase = Phase::Ended;
        self.turn.current_card = None;
        match winner {
            Some(player) => info!(
                "game over: {player} wins {} to {}",
                scores[player],
                scores[player.opponent()]
            ),
            None => info!("game over: tie at {}", scores[PLAYER_ONE]),
        }
        self.events.push(EngineEvent::GameEnded { scores, winner });
    }

    fn check_entry(&self, expected: Phase) -> Result<(), RejectReason> {
        if self.locked {
            return Err(RejectReason::InputLocked);
        }
        if self.turn.phase == Phase::Ended {
            return Err(RejectReason::GameOver);
        }
        if self.turn.phase != expected {
            return Err(RejectReason::WrongPhase);
        }
        Ok(())
    }

    // === Notifications ===

    /// Drain all pending notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit_full_snapshot(&mut self) {
        for player in PlayerId::both() {
            self.emit_grid_changed(player);
            self.emit_score_changed(player);
        }
        self.emit_discard_top();
        self.emit_turn_changed();
    }

    fn emit_grid_changed(&mut self, player: PlayerId) {
        self.events.push(EngineEvent::GridChanged {
            player,
            grid: self.grids[player].clone(),
        });
    }

    fn emit_score_changed(&mut self, player: PlayerId) {
        self.events.push(EngineEvent::ScoreChanged {
            player,
            score: score(&self.grids[player]),
            hidden: hidden_count(&self.grids[player]),
        });
    }

    fn emit_discard_top(&mut self) {
        self.events.push(EngineEvent::DiscardTopChanged {
            top: self.piles.top_discard(),
        });
    }

    fn emit_turn_changed(&mut self) {
        self.events.push(EngineEvent::TurnChanged {
            player: self.turn.current_player,
            phase: self.turn.phase,
        });
    }

    // === Observers ===

    /// The full turn state.
    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn.current_player
    }

    /// The card held between choosing and placing.
    #[must_use]
    pub fn current_card(&self) -> Option<i32> {
        self.turn.current_card
    }

    /// A player's grid.
    #[must_use]
    pub fn grid(&self, player: PlayerId) -> &Grid {
        &self.grids[player]
    }

    /// Face-up top of the discard pile.
    #[must_use]
    pub fn top_discard(&self) -> Option<i32> {
        self.piles.top_discard()
    }

    /// Remaining draw pile size.
    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.piles.draw_len()
    }

    /// A player's current visible score.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> i32 {
        score(&self.grids[player])
    }

    /// Whether commands are currently locked out.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Session counter; bumps on every new game.
    #[must_use]
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Whether the automated opponent should act now.
    #[must_use]
    pub fn is_ai_turn(&self) -> bool {
        self.turn.ai_mode
            && self.turn.phase != Phase::Ended
            && self.turn.current_player == crate::ai::AI_SEAT
    }

    pub(crate) fn piles(&self) -> &Piles {
        &self.piles
    }

    pub(crate) fn rng(&self) -> &GameRng {
        &self.rng
    }
}
