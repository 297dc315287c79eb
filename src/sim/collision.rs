//! Collision detection
//!
//! Pure axis-overlap test between the car and the six stones, run once per
//! main fire. The car's hitbox is shrunk asymmetrically: the left edge is
//! exact, the right edge pulls in by `HITBOX_PAD_X`, so a stone clipping the
//! car's tail reads as a near-miss.

use super::state::lane_of;
use super::stone::Stone;
use crate::consts::*;

/// Whether the car at `car_y` overlaps any stone.
///
/// A lane is in play only if `car_y` falls inside its vertical window
/// `[lane_center, lane_center + STONE_HEIGHT - HITBOX_PAD_Y]` - the exact
/// lane centers, not the nudged stone bottoms. Within a live lane the car
/// collides with a stone when the horizontal intervals overlap.
pub fn check_collision(car_y: f32, stones: &[Stone; STONE_COUNT]) -> bool {
    let car_left = CAR_X;
    let car_right = CAR_X + CAR_WIDTH - HITBOX_PAD_X;

    let overlaps =
        |stone: &Stone| !(car_right < stone.left || car_left > stone.left + stone.width - 1.0);

    for (lane, &lane_y) in LANE_Y.iter().enumerate() {
        if car_y < lane_y || car_y > lane_y + STONE_HEIGHT - HITBOX_PAD_Y {
            continue;
        }
        if stones
            .iter()
            .enumerate()
            .any(|(i, s)| lane_of(i) == lane && overlaps(s))
        {
            return true;
        }
    }

    false
}
