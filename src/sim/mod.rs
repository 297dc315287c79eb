//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clock time comes in through `advance`, never from the environment
//! - Seeded RNG only
//! - Stable iteration order (lane-major stone slots)
//! - No rendering or platform dependencies

pub mod collision;
pub mod sched;
pub mod session;
pub mod state;
pub mod stone;
pub mod tick;

pub use collision::check_collision;
pub use sched::Scheduler;
pub use session::Session;
pub use state::{GameEvent, GamePhase, GameState, STARTING_SLOTS, lane_of};
pub use stone::{MAX_RESPAWN_ATTEMPTS, Stone};
pub use tick::MoveDir;
