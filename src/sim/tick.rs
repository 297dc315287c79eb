//! Periodic process bodies
//!
//! The scheduler fires four kinds of logical process while the game runs:
//! the main update (advance, respawn, collide), score accrual, the
//! difficulty ramp, and the fine-grained car-move steps. Each body is a
//! plain function over [`GameState`] so the cadence policy stays entirely in
//! [`sched`](super::sched).

use super::collision::check_collision;
use super::state::{GameEvent, GamePhase, GameState, lane_of};
use crate::consts::*;

/// Direction of a lane-change intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Up,
    Down,
}

/// Main update: advance all stones, respawn any past the left edge, then
/// test for a collision. On collision the phase flips to `GameOver` and the
/// terminal sound event is raised.
pub fn run_update(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let speed = state.stone_speed;
    for stone in state.stones.iter_mut() {
        stone.advance(speed);
    }

    // One respawn decision per stone per tick, screened against the four
    // cross-lane stones. Decisions run in lane-major order and read current
    // positions, so a stone respawned earlier in this tick already counts as
    // a blocker.
    for i in 0..STONE_COUNT {
        if !state.stones[i].needs_respawn() {
            continue;
        }
        let mut blockers = [0.0f32; STONE_COUNT - STONES_PER_LANE];
        let mut n = 0;
        for j in 0..STONE_COUNT {
            if lane_of(j) != lane_of(i) {
                blockers[n] = state.stones[j].left;
                n += 1;
            }
        }
        state.stones[i].respawn(&blockers, CAR_WIDTH, SPAWN_GAP_X, &mut state.rng);
    }

    if check_collision(state.car_y, &state.stones) {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOverSound);
        log::info!("game over at score {}", state.score);
    }
}

/// Score accrual: one point per fire. Once the session score reaches the
/// high score, every further point carries it along and asks the platform
/// layer to persist.
pub fn accrue_score(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.score += 1;
    if state.score >= state.high_score {
        state.high_score = state.score;
        events.push(GameEvent::NewHighScore(state.high_score));
    }
}

/// Difficulty ramp: speed and frame delay both compound by 1% per fire.
/// Returns whether the ramp should fire again - it stops once the delay
/// reaches the floor, so the final delay may undershoot `MIN_DELAY` by one
/// step.
pub fn ramp_difficulty(state: &mut GameState) -> bool {
    state.stone_speed += state.stone_speed * 0.01;
    state.frame_delay -= state.frame_delay * 0.01;
    state.frame_delay > MIN_DELAY
}

/// One step of the car-move animation. Moves the car `MOVE_STEP` toward the
/// target lane and advances the direction's lock; once the lock covers a
/// full lane spacing it resets to zero and the animation ends. Returns
/// whether another step should be scheduled.
pub fn step_move(state: &mut GameState, dir: MoveDir) -> bool {
    match dir {
        MoveDir::Up => {
            if state.move_up < LANE_SPACING {
                state.car_y += MOVE_STEP;
                state.move_up += MOVE_STEP;
                true
            } else {
                state.move_up = 0.0;
                false
            }
        }
        MoveDir::Down => {
            if state.move_down < LANE_SPACING {
                state.car_y -= MOVE_STEP;
                state.move_down += MOVE_STEP;
                true
            } else {
                state.move_down = 0.0;
                false
            }
        }
    }
}
