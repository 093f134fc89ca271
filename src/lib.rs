//! Car Dodger - a four-lane traffic dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, spawner, collision, scoring)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Web Audio cue synthesis (wasm only)
//! - `settings`: Runtime preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 ticks per second)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions in game units (pixels of the reference layout)
    pub const SCREEN_WIDTH: f32 = 1040.0;
    pub const SCREEN_HEIGHT: f32 = 500.0;

    /// Number of traffic lanes
    pub const LANE_COUNT: u8 = 4;
    /// Height of one lane band (the road spans the middle four of five bands)
    pub const LANE_HEIGHT: f32 = SCREEN_HEIGHT / 5.0;

    /// Car dimensions (both player and enemies)
    pub const CAR_WIDTH: f32 = 80.0;
    pub const CAR_HEIGHT: f32 = 45.0;

    /// Player's fixed horizontal position (left edge of its rectangle)
    pub const PLAYER_X: f32 = 120.0;
    /// Lane the player starts in (and returns to on reset)
    pub const PLAYER_START_LANE: u8 = 1;

    /// Base enemy speed in game units per tick, before the difficulty multiplier
    pub const ENEMY_SPEED: f32 = 6.0;

    /// A lane is closed to spawning while an enemy in it is right of
    /// `SCREEN_WIDTH + SPAWN_GAP` minus the trailing window, i.e. any enemy
    /// with `x < SCREEN_WIDTH + SPAWN_GAP` blocks its lane
    pub const SPAWN_GAP: f32 = 150.0;
    /// Enemies are removed once fully off the left edge by this margin
    pub const DESPAWN_MARGIN: f32 = 50.0;

    /// Spawn interval bounds in ticks (see `spawn_rate`)
    pub const SPAWN_RATE_MAX: u32 = 60;
    pub const SPAWN_RATE_MIN: u32 = 20;

    /// Particle lifetime in ticks
    pub const PARTICLE_LIFE: u32 = 60;
    /// Burst sizes for the two crash explosions
    pub const CRASH_BURST_PLAYER: u32 = 20;
    pub const CRASH_BURST_ENEMY: u32 = 15;

    /// Road drift per menu tick (background animation only)
    pub const MENU_ROAD_DRIFT: f32 = 3.0;
}

/// Vertical center of a lane, in game units
///
/// Lanes are indexed 0..=3 top to bottom; the road occupies the middle four
/// of five equal bands.
#[inline]
pub fn lane_center(lane: u8) -> f32 {
    consts::LANE_HEIGHT * (lane as f32 + 1.0) + consts::LANE_HEIGHT / 2.0
}

/// Top edge of the road (upper edge of lane 0's band)
#[inline]
pub fn road_top() -> f32 {
    lane_center(0) - consts::LANE_HEIGHT / 2.0
}

/// Bottom edge of the road (lower edge of lane 3's band)
#[inline]
pub fn road_bottom() -> f32 {
    lane_center(consts::LANE_COUNT - 1) + consts::LANE_HEIGHT / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_centers() {
        assert_eq!(lane_center(0), 150.0);
        assert_eq!(lane_center(1), 250.0);
        assert_eq!(lane_center(2), 350.0);
        assert_eq!(lane_center(3), 450.0);
    }

    #[test]
    fn test_road_edges() {
        assert_eq!(road_top(), 100.0);
        assert_eq!(road_bottom(), 500.0);
    }
}
