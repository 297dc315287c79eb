//! Lane Rush - A three-lane highway dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stones, collisions, scheduling, game state)
//! - `ui`: DOM presentation sink (browser only)
//! - `audio`: Procedural sound effects via Web Audio (browser only)
//! - `platform`: Browser/native platform abstraction
//! - `highscores`: Persisted best score
//! - `settings`: Sound preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
///
/// Positions and sizes are percentages of the playfield; times are
/// milliseconds. These are the tuned balance values - changing them changes
/// how the game feels.
pub mod consts {
    /// Fixed horizontal position of the car's left edge (the car never moves
    /// sideways; 50 keeps it centered)
    pub const CAR_X: f32 = 50.0;
    /// Car width
    pub const CAR_WIDTH: f32 = 8.0;
    /// Stone width
    pub const STONE_WIDTH: f32 = 6.0;
    /// Stone height
    pub const STONE_HEIGHT: f32 = 20.0;

    /// Horizontal shrink of the car's hitbox, applied to the trailing edge
    /// only, so near-misses feel fair
    pub const HITBOX_PAD_X: f32 = 3.0;
    /// Vertical shrink of the car's hitbox
    pub const HITBOX_PAD_Y: f32 = 15.0;

    /// Stone speed at session start (percent per main fire)
    pub const INITIAL_SPEED: f32 = 0.168;
    /// Delay between main-loop fires at session start (ms)
    pub const INITIAL_DELAY: f64 = 2.62;
    /// The difficulty ramp stops once the delay reaches this floor (ms)
    pub const MIN_DELAY: f64 = 0.8;
    /// Period of the difficulty ramp process (ms)
    pub const RAMP_PERIOD: f64 = 500.0;
    /// The score process fires every `frame_delay * SCORE_PERIOD_FACTOR` ms
    pub const SCORE_PERIOD_FACTOR: f64 = 10.0;

    /// Minimum horizontal gap (beyond the car width) between a respawning
    /// stone and every cross-lane stone, so a passable slot always exists
    pub const SPAWN_GAP_X: f32 = 11.0;
    /// Respawn positions are sampled from `[SPAWN_ZONE_MIN, SPAWN_ZONE_MAX)`,
    /// just off the right edge
    pub const SPAWN_ZONE_MIN: f32 = 100.0;
    pub const SPAWN_ZONE_MAX: f32 = 200.0;

    /// Vertical center of the bottom lane (percent from the bottom)
    pub const LANE_Y_START: f32 = 2.0;
    /// Vertical distance between lane centers
    pub const LANE_SPACING: f32 = 37.0;
    /// Lane center positions, bottom to top
    pub const LANE_Y: [f32; 3] = [
        LANE_Y_START,
        LANE_Y_START + LANE_SPACING,
        LANE_Y_START + 2.0 * LANE_SPACING,
    ];
    /// Invisible wall below the bottom lane
    pub const MIN_CAR_Y: f32 = LANE_Y_START + 8.0;
    /// Invisible wall above the top lane
    pub const MAX_CAR_Y: f32 = LANE_Y_START + 2.0 * LANE_SPACING - 8.0;

    /// Distance the car moves per animation step
    pub const MOVE_STEP: f32 = 0.5;
    /// Delay between animation steps (ms)
    pub const MOVE_STEP_DELAY: f64 = 0.75;

    /// Number of lanes
    pub const LANES: usize = 3;
    /// Stones per lane
    pub const STONES_PER_LANE: usize = 2;
    /// Total stone count
    pub const STONE_COUNT: usize = LANES * STONES_PER_LANE;
}
