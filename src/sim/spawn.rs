//! Enemy spawner
//!
//! Picks a random open lane and color. "Open" means no enemy in that lane is
//! still near the spawn edge, so traffic never stacks bumper-to-bumper at
//! the right side of the screen.

use rand::Rng;

use super::state::{CarColor, EnemyCar};
use crate::consts::{SCREEN_WIDTH, SPAWN_GAP};

/// Number of random lane candidates tried before giving up for this tick
const SPAWN_ATTEMPTS: u32 = 10;

/// Attempt to spawn a new enemy at the right edge
///
/// Tries up to ten uniformly random lanes, rejecting any lane that already
/// has an enemy within `SPAWN_GAP` of the spawn edge. Returns `None` when
/// every attempt is rejected; that is a normal skip, not an error.
pub fn try_spawn(enemies: &[EnemyCar], rng: &mut impl Rng) -> Option<EnemyCar> {
    for _ in 0..SPAWN_ATTEMPTS {
        let lane = rng.random_range(0..4u8);
        let too_close = enemies
            .iter()
            .any(|car| car.lane == lane && car.x < SCREEN_WIDTH + SPAWN_GAP);
        if !too_close {
            let color = CarColor::PALETTE[rng.random_range(0..CarColor::PALETTE.len())];
            return Some(EnemyCar {
                x: SCREEN_WIDTH,
                lane,
                color,
            });
        }
    }
    None
}
