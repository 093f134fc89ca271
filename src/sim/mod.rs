//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, enemy_rect, find_collision, player_rect};
pub use particles::{spawn_burst, tick_particles};
pub use spawn::try_spawn;
pub use state::{CarColor, EnemyCar, GameEvent, GamePhase, GameState, Particle, PlayerCar};
pub use tick::{TickInput, game_speed_for, tick};
