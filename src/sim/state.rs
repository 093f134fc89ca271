//! Game state and core simulation types
//!
//! One owned `GameState` holds everything the per-tick update mutates; it is
//! passed explicitly to `tick` and read by the renderer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen with animated background
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-run, last live frame rendered dimmed
    Paused,
    /// Run ended on a collision, pending "play again"
    GameOver,
}

/// Enemy paint colors, picked uniformly at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarColor {
    Red,
    Orange,
    Purple,
    Green,
}

impl CarColor {
    /// The spawn palette
    pub const PALETTE: [CarColor; 4] = [
        CarColor::Red,
        CarColor::Orange,
        CarColor::Purple,
        CarColor::Green,
    ];
}

/// The player's car
///
/// Horizontal position and size are fixed; only the lane changes, and only
/// through the lane-change methods so the 0..=3 invariant holds everywhere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerCar {
    lane: u8,
}

impl Default for PlayerCar {
    fn default() -> Self {
        Self {
            lane: PLAYER_START_LANE,
        }
    }
}

impl PlayerCar {
    /// Current lane index, always in 0..=3
    pub fn lane(&self) -> u8 {
        self.lane
    }

    /// Move one lane up. Returns false (and does nothing) at the top lane.
    pub fn move_up(&mut self) -> bool {
        if self.lane > 0 {
            self.lane -= 1;
            true
        } else {
            false
        }
    }

    /// Move one lane down. Returns false (and does nothing) at the bottom lane.
    pub fn move_down(&mut self) -> bool {
        if self.lane < LANE_COUNT - 1 {
            self.lane += 1;
            true
        } else {
            false
        }
    }
}

/// An oncoming car
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyCar {
    /// Left edge, decreases every playing tick
    pub x: f32,
    /// Lane index in 0..=3
    pub lane: u8,
    pub color: CarColor,
}

impl EnemyCar {
    /// Top edge, derived from the lane
    pub fn y(&self) -> f32 {
        crate::lane_center(self.lane) - CAR_HEIGHT / 2.0
    }
}

/// A short-lived explosion particle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks; removed at zero
    pub life: u32,
    pub max_life: u32,
    pub color: CarColor,
}

impl Particle {
    /// Remaining-lifetime fraction in [0, 1], for alpha/size fade
    pub fn life_fraction(&self) -> f32 {
        self.life as f32 / self.max_life as f32
    }
}

/// Maximum particles kept alive at once
pub const MAX_PARTICLES: usize = 256;

/// Side effects the presentation layer should act on (audio cues)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Successful lane change
    LaneChange,
    /// Player/enemy collision
    Crash,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded generator driving spawn lanes/colors and particle bursts
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    pub player: PlayerCar,
    /// Active enemies in spawn order (iteration order is the collision
    /// tie-break)
    pub enemies: Vec<EnemyCar>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Score for the current run, non-decreasing while playing
    pub score: u64,
    /// Best score seen at any collision this process run
    pub high_score: u64,
    /// Ticks since the last spawn attempt
    pub spawn_timer: u32,
    /// Difficulty multiplier, recomputed from score every playing tick
    pub game_speed: f32,
    /// Cosmetic road scroll; unbounded, wrapped by modulo at render time
    pub road_offset: f32,
    /// Ticks spent in the playing phase this run
    pub time_ticks: u64,
    /// Ticks spent on the menu (title animation)
    pub menu_ticks: u64,
    /// Audio cue intents queued this tick, drained by the presentation layer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state on the menu, with the given run seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            player: PlayerCar::default(),
            enemies: Vec::new(),
            particles: Vec::new(),
            score: 0,
            high_score: 0,
            spawn_timer: 0,
            game_speed: 1.0,
            road_offset: 0.0,
            time_ticks: 0,
            menu_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Clear the current run before (re)entering the playing phase
    ///
    /// High score and RNG stream survive; everything else returns to its
    /// start-of-run value.
    pub fn reset_run(&mut self) {
        self.enemies.clear();
        self.particles.clear();
        self.player = PlayerCar::default();
        self.score = 0;
        self.spawn_timer = 0;
        self.game_speed = 1.0;
        self.road_offset = 0.0;
        self.time_ticks = 0;
    }

    /// Ticks between spawn attempts: 60 at score 0, shrinking to a floor of
    /// 20 as the score grows
    pub fn spawn_rate(&self) -> u32 {
        SPAWN_RATE_MAX
            .saturating_sub((self.score / 100) as u32)
            .max(SPAWN_RATE_MIN)
    }
}
