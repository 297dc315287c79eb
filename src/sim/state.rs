//! Game state and core simulation types
//!
//! Everything a single play session mutates lives here, owned by
//! [`Session`](super::Session) - no ambient globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::stone::Stone;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Initial; start screen visible, no processes scheduled
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended; waiting for restart
    GameOver,
}

/// One-shot side effects raised by the simulation for the platform layer
/// (sounds, persistence). Position and score changes are not events - the
/// presentation sink reads them off the state every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A lane-change input was accepted
    MoveSound,
    /// A collision ended the run
    GameOverSound,
    /// The high score improved and should be persisted
    NewHighScore(u32),
}

/// Per-lane starting slots applied on session start. One stone per lane
/// starts near the edge, its partner far off-screen, staggering their first
/// appearance (lane 2 is mirrored against lanes 1 and 3).
pub const STARTING_SLOTS: [[f32; STONES_PER_LANE]; LANES] =
    [[-40.0, -400.0], [-400.0, -40.0], [-40.0, -400.0]];

/// Lane index (0 = bottom) a stone slot belongs to
#[inline]
pub fn lane_of(stone_index: usize) -> usize {
    stone_index / STONES_PER_LANE
}

/// Complete game state for one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Session score
    pub score: u32,
    /// Best score ever seen; never decreases
    pub high_score: u32,
    /// Car's vertical position (percent from the bottom); a lane center, or
    /// between two centers mid-animation
    pub car_y: f32,
    /// Horizontal displacement per main fire
    pub stone_speed: f32,
    /// Delay between main fires (ms); ramps down toward `MIN_DELAY`
    pub frame_delay: f64,
    /// Up-move animation lock; counts to `LANE_SPACING` then resets to 0
    pub move_up: f32,
    /// Down-move animation lock
    pub move_down: f32,
    /// All six stones, lane-major (two per lane, bottom lane first)
    pub stones: [Stone; STONE_COUNT],
    /// Seeded RNG driving respawn sampling
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh session state in `Idle` with the given seed and the
    /// previously persisted high score
    pub fn new(seed: u64, high_score: u32) -> Self {
        // Lanes 1 and 2 are nudged a point down/up so stacked sprites read as
        // distinct; collision always uses the exact lane centers.
        let stones = [
            Stone::new(LANE_Y[0] - 1.0),
            Stone::new(LANE_Y[0] - 1.0),
            Stone::new(LANE_Y[1] + 1.0),
            Stone::new(LANE_Y[1] + 1.0),
            Stone::new(LANE_Y[2]),
            Stone::new(LANE_Y[2]),
        ];

        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0,
            high_score,
            car_y: LANE_Y_START,
            stone_speed: INITIAL_SPEED,
            frame_delay: INITIAL_DELAY,
            move_up: 0.0,
            move_down: 0.0,
            stones,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Whether the periodic processes are live
    #[inline]
    pub fn running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Reset everything a restart resets and enter `Playing`. The high score
    /// and the RNG stream carry over.
    pub fn reset_for_start(&mut self) {
        self.score = 0;
        self.car_y = LANE_Y_START;
        self.stone_speed = INITIAL_SPEED;
        self.frame_delay = INITIAL_DELAY;
        self.move_up = 0.0;
        self.move_down = 0.0;

        for (i, stone) in self.stones.iter_mut().enumerate() {
            stone.hard_reset(STARTING_SLOTS[lane_of(i)][i % STONES_PER_LANE]);
        }

        self.phase = GamePhase::Playing;
    }
}
