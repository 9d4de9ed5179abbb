//! Paced execution of AI decisions.
//!
//! The driver turns the policy's answers into engine commands, one step at
//! a time, with fixed think-time delays between steps. Delays emulate
//! pacing for a presentation layer and are never load-bearing for
//! correctness.
//!
//! Ordering is strict by construction: at most one step is pending at a
//! time, and the next step is only scheduled by the completion of the
//! previous one. Each scheduled step carries the engine session it was
//! planned for; a new game bumps the session and the stale step is dropped
//! without effect.

use log::debug;
use smallvec::SmallVec;

use crate::ai::{policy, AI_SEAT};
use crate::core::GameRng;
use crate::engine::{Phase, SkyjoEngine};
use crate::error::EngineError;

/// Ticks between noticing it is the AI's turn and the opening choice.
pub const OPENING_DELAY: u64 = 10;

/// Ticks between consecutive steps within one AI turn.
pub const STEP_DELAY: u64 = 8;

/// One decision step in the scripted turn sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AiStep {
    /// Choose between the discard pile and the draw pile.
    Open,
    /// Place the card taken from the discard.
    PlaceTaken,
    /// Keep or discard the drawn card.
    ResolveDrawn,
    /// Flip a hidden card after discarding the drawn one.
    RevealHidden,
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    due: u64,
    session: u64,
    step: AiStep,
}

/// Drives the AI seat against an engine.
///
/// The host loop calls [`AiDriver::tick`] once per time slice; the driver
/// schedules and executes steps as they fall due. All effects go through
/// the public command surface.
pub struct AiDriver {
    rng: GameRng,
    now: u64,
    pending: SmallVec<[Scheduled; 2]>,
}

impl AiDriver {
    /// Create a driver with a pinned seed (tests, replays).
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            now: 0,
            pending: SmallVec::new(),
        }
    }

    /// Create a driver seeded from the operating system.
    pub fn new() -> Result<Self, EngineError> {
        Ok(Self {
            rng: GameRng::from_entropy()?,
            now: 0,
            pending: SmallVec::new(),
        })
    }

    /// Whether the driver has no step in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance one tick: schedule an opening if it is the AI's turn, and
    /// execute the pending step once its delay has elapsed.
    pub fn tick(&mut self, engine: &mut SkyjoEngine) {
        self.now += 1;

        // Drop steps planned for a discarded session.
        let session = engine.session();
        self.pending.retain(|step| step.session == session);

        if self.pending.is_empty() {
            if engine.is_ai_turn() && engine.phase() == Phase::ChooseAction {
                self.schedule(AiStep::Open, OPENING_DELAY, session);
            }
            return;
        }

        if self.pending[0].due > self.now {
            return;
        }
        let scheduled = self.pending.remove(0);
        self.execute(scheduled.step, engine);
    }

    fn schedule(&mut self, step: AiStep, delay: u64, session: u64) {
        debug!("ai: scheduling {step:?} in {delay} ticks");
        self.pending.push(Scheduled {
            due: self.now + delay,
            session,
            step,
        });
    }

    fn execute(&mut self, step: AiStep, engine: &mut SkyjoEngine) {
        // The turn may have been taken over (AI mode toggled off mid-turn).
        if !engine.is_ai_turn() {
            debug!("ai: dropping {step:?}, no longer the AI's turn");
            return;
        }
        let session = engine.session();

        match step {
            AiStep::Open => {
                let take = policy::wants_discard(
                    &mut self.rng,
                    engine.top_discard(),
                    engine.draw_pile_len(),
                );
                if take && engine.take_discard().is_applied() {
                    self.schedule(AiStep::PlaceTaken, STEP_DELAY, session);
                } else if engine.draw_from_pile().is_applied() {
                    self.schedule(AiStep::ResolveDrawn, STEP_DELAY, session);
                }
            }
            AiStep::PlaceTaken => {
                let Some(taken) = engine.current_card() else {
                    return;
                };
                if let Some((row, col)) = policy::swap_target(engine.grid(AI_SEAT), taken) {
                    engine.select_grid_cell(AI_SEAT, row, col);
                }
            }
            AiStep::ResolveDrawn => {
                let Some(drawn) = engine.current_card() else {
                    return;
                };
                if let Some((row, col)) = policy::keep_target(engine.grid(AI_SEAT), drawn) {
                    engine.select_grid_cell(AI_SEAT, row, col);
                } else if engine.discard_drawn_card().is_applied() {
                    self.schedule(AiStep::RevealHidden, STEP_DELAY, session);
                }
            }
            AiStep::RevealHidden => {
                if let Some((row, col)) = policy::reveal_target(&mut self.rng, engine.grid(AI_SEAT))
                {
                    engine.select_grid_cell(AI_SEAT, row, col);
                }
            }
        }
    }
}
