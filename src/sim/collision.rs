//! Axis-aligned rectangle overlap between the player and lane traffic
//!
//! Every car is the same fixed-size rectangle; the only geometry here is an
//! AABB intersection test and the scan that picks the hit enemy.

use serde::{Deserialize, Serialize};

use super::state::{EnemyCar, PlayerCar};
use crate::consts::{CAR_HEIGHT, CAR_WIDTH, PLAYER_X};
use crate::lane_center;

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// True if the two rectangles overlap (shared edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// The player's collision rectangle: fixed x, vertically centered on its lane
pub fn player_rect(player: &PlayerCar) -> Rect {
    Rect::new(
        PLAYER_X,
        lane_center(player.lane()) - CAR_HEIGHT / 2.0,
        CAR_WIDTH,
        CAR_HEIGHT,
    )
}

/// An enemy's collision rectangle
pub fn enemy_rect(enemy: &EnemyCar) -> Rect {
    Rect::new(enemy.x, enemy.y(), CAR_WIDTH, CAR_HEIGHT)
}

/// Find the enemy the player is overlapping, if any
///
/// Returns the index of the first overlapping enemy in list order. The list
/// is in spawn order, which makes the tie-break among simultaneous overlaps
/// deterministic.
pub fn find_collision(player: &PlayerCar, enemies: &[EnemyCar]) -> Option<usize> {
    let player = player_rect(player);
    enemies
        .iter()
        .position(|enemy| player.intersects(&enemy_rect(enemy)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CarColor;

    fn enemy_at(x: f32, lane: u8) -> EnemyCar {
        EnemyCar {
            x,
            lane,
            color: CarColor::Red,
        }
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 0.0, 10.0, 10.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_player_rect_lane_1() {
        let player = PlayerCar::default();
        let rect = player_rect(&player);
        assert_eq!(rect.x, 120.0);
        // Lane 1 center is y=250; the car is centered on it
        assert_eq!(rect.y, 250.0 - CAR_HEIGHT / 2.0);
        assert_eq!(rect.w, CAR_WIDTH);
        assert_eq!(rect.h, CAR_HEIGHT);
    }

    #[test]
    fn test_same_lane_overlapping_x_collides() {
        let player = PlayerCar::default(); // lane 1
        // Enemy overlapping the player's x range in the same lane
        let enemies = vec![enemy_at(PLAYER_X + CAR_WIDTH / 2.0, 1)];
        assert_eq!(find_collision(&player, &enemies), Some(0));
    }

    #[test]
    fn test_adjacent_lane_does_not_collide() {
        let player = PlayerCar::default(); // lane 1
        // Same x range but one lane over; lanes are 100 apart, cars 45 tall
        let enemies = vec![enemy_at(PLAYER_X, 2)];
        assert_eq!(find_collision(&player, &enemies), None);
    }

    #[test]
    fn test_far_enemy_does_not_collide() {
        let player = PlayerCar::default();
        let enemies = vec![enemy_at(800.0, 1)];
        assert_eq!(find_collision(&player, &enemies), None);
    }

    #[test]
    fn test_first_overlap_wins_tie_break() {
        let player = PlayerCar::default();
        // Two enemies both overlapping the player; the earlier-spawned one
        // (lower index) is the hit entity
        let enemies = vec![
            enemy_at(PLAYER_X + 10.0, 1),
            enemy_at(PLAYER_X - 10.0, 1),
        ];
        assert_eq!(find_collision(&player, &enemies), Some(0));
    }
}
