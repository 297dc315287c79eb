//! Session lifecycle
//!
//! A [`Session`] owns one play-through: the game state, the process
//! scheduler, and the queue of one-shot events the platform layer drains.
//! The state machine is `Idle -> (start) -> Playing -> (collision) ->
//! GameOver -> (restart) -> Playing -> ...`; start and restart are the same
//! operation.

use super::sched::Scheduler;
use super::state::{GameEvent, GameState};
use super::tick::MoveDir;
use crate::consts::*;

/// One play session: state plus scheduling plus pending side effects
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    sched: Scheduler,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create a session in `Idle` with the persisted high score
    pub fn new(seed: u64, high_score: u32) -> Self {
        Self {
            state: GameState::new(seed, high_score),
            sched: Scheduler::idle(),
            events: Vec::new(),
        }
    }

    /// Start (or restart) a run at clock time `now`: reset the state, prime
    /// the periodic processes one period out
    pub fn start(&mut self, now: f64) {
        self.state.reset_for_start();
        self.sched.prime(now, self.state.frame_delay);
        log::info!("session started (seed {})", self.state.seed);
    }

    /// Advance the clock to `now`, firing every due process
    pub fn advance(&mut self, now: f64) {
        self.sched.advance(&mut self.state, now, &mut self.events);
    }

    /// Handle a discrete up/down intent.
    ///
    /// Accepted only while running, when that direction's animation is fully
    /// idle (lock at zero, no step in flight), and when the car has room in
    /// that direction. Acceptance raises the move sound and schedules the
    /// stepping animation; everything else is a silent no-op, which is what
    /// debounces a second intent mid-animation.
    pub fn move_intent(&mut self, dir: MoveDir, now: f64) {
        if !self.state.running() {
            return;
        }

        let accepted = match dir {
            MoveDir::Up => {
                self.state.move_up == 0.0
                    && !self.sched.move_pending(MoveDir::Up)
                    && self.state.car_y < MAX_CAR_Y
            }
            MoveDir::Down => {
                self.state.move_down == 0.0
                    && !self.sched.move_pending(MoveDir::Down)
                    && self.state.car_y > MIN_CAR_Y
            }
        };

        if accepted {
            self.events.push(GameEvent::MoveSound);
            self.sched.schedule_move(dir, now);
        }
    }

    /// Take the pending one-shot events (sounds, persistence requests)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    /// Drive the session clock forward in small increments
    fn run_for(session: &mut Session, from: f64, ms: f64) -> f64 {
        let mut t = from;
        let end = from + ms;
        while t < end {
            t += 1.0;
            session.advance(t);
        }
        t
    }

    /// Park the car between lane windows so nothing can hit it
    fn park_safe(session: &mut Session) {
        session.state.car_y = LANE_Y[0] + STONE_HEIGHT;
    }

    #[test]
    fn test_idle_session_ignores_everything() {
        let mut session = Session::new(1, 0);
        session.advance(1_000.0);
        session.move_intent(MoveDir::Up, 1_000.0);
        assert_eq!(session.state.phase, GamePhase::Idle);
        assert_eq!(session.state.score, 0);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_move_lock_debounce() {
        let mut session = Session::new(2, 0);
        session.start(0.0);
        park_safe(&mut session);
        let y0 = session.state.car_y;

        // Two back-to-back up intents: only the first is accepted
        session.move_intent(MoveDir::Up, 1.0);
        session.move_intent(MoveDir::Up, 1.2);
        assert_eq!(session.take_events(), vec![GameEvent::MoveSound]);

        // Still mid-animation a while later: a third intent is also ignored
        session.advance(5.0);
        assert!(session.state.move_up > 0.0);
        session.move_intent(MoveDir::Up, 5.0);
        assert!(!session.take_events().contains(&GameEvent::MoveSound));

        let t = run_for(&mut session, 5.0, 80.0);
        // Exactly one lane of travel despite three intents
        assert_eq!(session.state.car_y, y0 + LANE_SPACING);
        assert_eq!(session.state.move_up, 0.0);

        // Lock released: the next intent is accepted again
        session.take_events();
        session.move_intent(MoveDir::Up, t);
        assert!(session.take_events().contains(&GameEvent::MoveSound));
    }

    #[test]
    fn test_bounds_block_moves() {
        let mut session = Session::new(3, 0);
        session.start(0.0);

        // Car starts in the bottom lane: down is out of bounds
        assert!(session.state.car_y <= MIN_CAR_Y);
        session.move_intent(MoveDir::Down, 1.0);
        assert!(session.take_events().is_empty());

        // From the top lane, up is out of bounds
        session.state.car_y = LANE_Y[2];
        session.move_intent(MoveDir::Up, 1.0);
        assert!(session.take_events().is_empty());
        session.move_intent(MoveDir::Down, 1.0);
        assert_eq!(session.take_events(), vec![GameEvent::MoveSound]);
    }

    #[test]
    fn test_opposite_directions_are_independent() {
        let mut session = Session::new(4, 0);
        session.start(0.0);
        session.state.car_y = LANE_Y[1];

        session.move_intent(MoveDir::Up, 1.0);
        session.move_intent(MoveDir::Down, 1.1);
        assert_eq!(
            session.take_events(),
            vec![GameEvent::MoveSound, GameEvent::MoveSound]
        );
    }

    #[test]
    fn test_full_cycle_restart_resets_exactly() {
        let mut session = Session::new(5, 0);
        session.start(0.0);
        park_safe(&mut session);

        // Let difficulty and score move off their initial values
        let t = run_for(&mut session, 0.0, 1_200.0);
        assert!(session.state.score > 0);
        assert!(session.state.frame_delay < INITIAL_DELAY);
        assert!(session.state.stone_speed > INITIAL_SPEED);

        // Engineer a collision
        session.state.car_y = LANE_Y[0];
        session.state.stones[0].hard_reset(CAR_X + 1.0);
        let t = run_for(&mut session, t, 20.0);
        assert_eq!(session.state.phase, GamePhase::GameOver);
        assert!(session.take_events().contains(&GameEvent::GameOverSound));
        let high = session.state.high_score;
        assert!(high > 0);

        // Restart resets exactly
        session.start(t);
        assert_eq!(session.state.phase, GamePhase::Playing);
        assert_eq!(session.state.score, 0);
        assert_eq!(session.state.car_y, LANE_Y_START);
        assert_eq!(session.state.stone_speed, INITIAL_SPEED);
        assert_eq!(session.state.frame_delay, INITIAL_DELAY);
        assert_eq!(session.state.move_up, 0.0);
        assert_eq!(session.state.move_down, 0.0);
        assert_eq!(session.state.high_score, high);
        let lefts: Vec<f32> = session.state.stones.iter().map(|s| s.left).collect();
        assert_eq!(lefts, vec![-40.0, -400.0, -400.0, -40.0, -40.0, -400.0]);
    }

    #[test]
    fn test_game_over_freezes_the_world() {
        let mut session = Session::new(6, 0);
        session.start(0.0);
        session.state.car_y = LANE_Y[0];
        session.state.stones[0].hard_reset(CAR_X + 1.0);

        let t = run_for(&mut session, 0.0, 50.0);
        assert_eq!(session.state.phase, GamePhase::GameOver);
        session.take_events();

        let frozen = session.state.clone();
        session.move_intent(MoveDir::Up, t);
        run_for(&mut session, t, 500.0);
        assert_eq!(session.state.score, frozen.score);
        assert_eq!(session.state.car_y, frozen.car_y);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_high_score_survives_sessions() {
        let mut session = Session::new(7, 0);
        session.start(0.0);
        park_safe(&mut session);
        run_for(&mut session, 0.0, 500.0);
        let first_high = session.state.high_score;
        assert!(first_high > 0);

        // New session seeded with the persisted value
        let mut next = Session::new(8, first_high);
        assert_eq!(next.state.high_score, first_high);
        next.start(0.0);
        assert_eq!(next.state.high_score, first_high);
    }
}
