//! Periodic process scheduling
//!
//! The original timer-per-process design is modeled here as one driving
//! clock: every logical process is a "next fire time" in milliseconds, and
//! [`Scheduler::advance`] fires everything that has come due, in timestamp
//! order, rescheduling each from its own fire time. Cancellation is the
//! running flag: it is checked before each fire, and a due fire observed
//! while the game is not running is dropped and its slot cleared.

use super::state::{GameEvent, GameState};
use super::tick::{self, MoveDir};
use crate::consts::*;

/// Fires one `advance` call will replay before re-anchoring the schedule.
/// A background tab can stall the clock for minutes; replaying that backlog
/// at sub-millisecond cadence would freeze the page on return.
const MAX_CATCHUP_FIRES: u32 = 1000;

/// The logical processes, in fire order on a shared timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Process {
    Update,
    Score,
    Ramp,
    MoveUp,
    MoveDown,
}

/// Next-fire bookkeeping for the periodic processes of one session
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    /// Main update fire time; `None` while idle or after game over
    next_update: Option<f64>,
    /// Score accrual fire time
    next_score: Option<f64>,
    /// Difficulty ramp fire time; `None` once the delay floor is reached
    next_ramp: Option<f64>,
    /// Up-move animation step; `None` when no up animation is in flight
    next_move_up: Option<f64>,
    /// Down-move animation step
    next_move_down: Option<f64>,
}

impl Scheduler {
    /// A scheduler with nothing pending
    pub fn idle() -> Self {
        Self::default()
    }

    /// Prime the three session processes, one period out, and clear any
    /// leftover move animation
    pub fn prime(&mut self, now: f64, frame_delay: f64) {
        self.next_update = Some(now + frame_delay);
        self.next_score = Some(now + frame_delay * SCORE_PERIOD_FACTOR);
        self.next_ramp = Some(now + RAMP_PERIOD);
        self.next_move_up = None;
        self.next_move_down = None;
    }

    /// Drop every pending fire
    pub fn halt(&mut self) {
        *self = Self::default();
    }

    /// Whether a move animation step is pending for `dir`
    pub fn move_pending(&self, dir: MoveDir) -> bool {
        match dir {
            MoveDir::Up => self.next_move_up.is_some(),
            MoveDir::Down => self.next_move_down.is_some(),
        }
    }

    /// Begin a move animation: first step one step-delay out
    pub fn schedule_move(&mut self, dir: MoveDir, now: f64) {
        let slot = match dir {
            MoveDir::Up => &mut self.next_move_up,
            MoveDir::Down => &mut self.next_move_down,
        };
        *slot = Some(now + MOVE_STEP_DELAY);
    }

    /// Earliest due process at `now`, ties broken in declaration order
    fn next_due(&self, now: f64) -> Option<(Process, f64)> {
        let candidates = [
            (Process::Update, self.next_update),
            (Process::Score, self.next_score),
            (Process::Ramp, self.next_ramp),
            (Process::MoveUp, self.next_move_up),
            (Process::MoveDown, self.next_move_down),
        ];

        let mut due: Option<(Process, f64)> = None;
        for (proc, slot) in candidates {
            if let Some(t) = slot {
                if t <= now && due.is_none_or(|(_, best)| t < best) {
                    due = Some((proc, t));
                }
            }
        }
        due
    }

    /// Fire everything due at or before `now`.
    ///
    /// Each fire reschedules from its own fire time, so cadence does not
    /// drift with the caller's frame rate. Stops as soon as the game leaves
    /// the running state.
    pub fn advance(&mut self, state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
        if !state.running() {
            self.halt();
            return;
        }

        let mut fired = 0u32;
        while let Some((proc, t)) = self.next_due(now) {
            if fired >= MAX_CATCHUP_FIRES {
                log::warn!("scheduler stalled {:.0}ms behind; re-anchoring", now - t);
                self.re_anchor(state, now);
                break;
            }
            fired += 1;

            match proc {
                Process::Update => {
                    tick::run_update(state, events);
                    self.next_update = Some(t + state.frame_delay);
                }
                Process::Score => {
                    tick::accrue_score(state, events);
                    self.next_score = Some(t + state.frame_delay * SCORE_PERIOD_FACTOR);
                }
                Process::Ramp => {
                    self.next_ramp = tick::ramp_difficulty(state).then_some(t + RAMP_PERIOD);
                }
                Process::MoveUp => {
                    self.next_move_up =
                        tick::step_move(state, MoveDir::Up).then_some(t + MOVE_STEP_DELAY);
                }
                Process::MoveDown => {
                    self.next_move_down =
                        tick::step_move(state, MoveDir::Down).then_some(t + MOVE_STEP_DELAY);
                }
            }

            if !state.running() {
                self.halt();
                return;
            }
        }
    }

    /// Push every pending fire one period past `now`, discarding the backlog
    fn re_anchor(&mut self, state: &GameState, now: f64) {
        if self.next_update.is_some() {
            self.next_update = Some(now + state.frame_delay);
        }
        if self.next_score.is_some() {
            self.next_score = Some(now + state.frame_delay * SCORE_PERIOD_FACTOR);
        }
        if self.next_ramp.is_some() {
            self.next_ramp = Some(now + RAMP_PERIOD);
        }
        if self.next_move_up.is_some() {
            self.next_move_up = Some(now + MOVE_STEP_DELAY);
        }
        if self.next_move_down.is_some() {
            self.next_move_down = Some(now + MOVE_STEP_DELAY);
        }
    }
}
