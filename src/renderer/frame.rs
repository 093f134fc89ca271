//! Scene assembly: one `GameState` in, one vertex list out
//!
//! Mirrors the original screen layout: a grass verge on top, the four-lane
//! road filling the rest, dashed lane dividers scrolling with `road_offset`,
//! and dim overlays for the paused and game-over screens. All text (HUD,
//! menus) lives in the DOM, not in the vertex stream.

use glam::Vec2;

use super::shapes::{push_car, push_circle, push_gradient_rect, push_hline, push_rect};
use super::vertex::{Vertex, car_color_rgba, colors, with_alpha};
use crate::consts::*;
use crate::sim::{GamePhase, GameState};
use crate::{lane_center, road_bottom, road_top};

/// Lane divider dash geometry
const STRIPE_WIDTH: f32 = 50.0;
const STRIPE_HEIGHT: f32 = 8.0;
const STRIPE_GAP: f32 = 30.0;

/// Build the vertex list for the current frame
pub fn build_frame(state: &GameState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(1024);

    match state.phase {
        GamePhase::Menu => {
            // Gradient backdrop with the road ghosted behind the title
            push_gradient_rect(
                &mut out,
                0.0,
                0.0,
                SCREEN_WIDTH,
                SCREEN_HEIGHT,
                colors::DARK_GREY,
                colors::GREY,
            );
            push_road(&mut out, state.road_offset, 0.4);
        }

        GamePhase::Playing | GamePhase::Paused => {
            push_road(&mut out, state.road_offset, 1.0);
            push_player(&mut out, state);
            push_enemies(&mut out, state);
            if state.phase == GamePhase::Paused {
                push_rect(
                    &mut out,
                    0.0,
                    0.0,
                    SCREEN_WIDTH,
                    SCREEN_HEIGHT,
                    with_alpha(colors::BLACK, 0.5),
                );
            }
        }

        GamePhase::GameOver => {
            // The wreck site: road and traffic, no player car, heavy dim
            push_road(&mut out, state.road_offset, 1.0);
            push_enemies(&mut out, state);
            push_rect(
                &mut out,
                0.0,
                0.0,
                SCREEN_WIDTH,
                SCREEN_HEIGHT,
                with_alpha(colors::BLACK, 0.7),
            );
        }
    }

    // Particles draw on top of everything, overlays included
    push_particles(&mut out, state);

    out
}

/// Grass verge, road surface, edge lines, and scrolling lane dividers
fn push_road(out: &mut Vec<Vertex>, road_offset: f32, alpha: f32) {
    let grass = with_alpha(colors::GRASS, alpha);
    let grass_dark = with_alpha(colors::GRASS_DARK, alpha);
    let road = with_alpha(colors::ROAD, alpha);
    let white = with_alpha(colors::WHITE, alpha);
    let stripe = with_alpha(colors::YELLOW, alpha);

    // Grass verge above the road, with drifting texture lines
    push_rect(out, 0.0, 0.0, SCREEN_WIDTH, road_top(), grass);
    let texture_offset = (road_offset * 0.3) % 20.0;
    let mut x = -20.0 + texture_offset;
    while x <= SCREEN_WIDTH {
        if x >= 0.0 {
            push_rect(out, x, 0.0, 1.0, road_top(), grass_dark);
        }
        x += 10.0;
    }

    // Road surface and edge lines
    push_rect(
        out,
        0.0,
        road_top(),
        SCREEN_WIDTH,
        road_bottom() - road_top(),
        road,
    );
    push_hline(out, 0.0, road_top(), SCREEN_WIDTH, 4.0, white);
    push_hline(out, 0.0, road_bottom(), SCREEN_WIDTH, 4.0, white);

    // Dashed dividers between adjacent lanes, scrolling left
    let period = STRIPE_WIDTH + STRIPE_GAP;
    let offset = road_offset % period;
    for lane in 0..LANE_COUNT - 1 {
        let y = (lane_center(lane) + lane_center(lane + 1)) / 2.0;
        let mut x = -STRIPE_WIDTH - offset;
        while x < SCREEN_WIDTH {
            if x + STRIPE_WIDTH > 0.0 {
                push_rect(
                    out,
                    x,
                    y - STRIPE_HEIGHT / 2.0,
                    STRIPE_WIDTH,
                    STRIPE_HEIGHT,
                    stripe,
                );
            }
            x += period;
        }
    }
}

fn push_player(out: &mut Vec<Vertex>, state: &GameState) {
    let y = lane_center(state.player.lane()) - CAR_HEIGHT / 2.0;
    push_car(out, PLAYER_X, y, CAR_WIDTH, CAR_HEIGHT, colors::BLUE);
}

fn push_enemies(out: &mut Vec<Vertex>, state: &GameState) {
    for enemy in &state.enemies {
        push_car(
            out,
            enemy.x,
            enemy.y(),
            CAR_WIDTH,
            CAR_HEIGHT,
            car_color_rgba(enemy.color),
        );
    }
}

/// Particles fade and shrink linearly with remaining lifetime
fn push_particles(out: &mut Vec<Vertex>, state: &GameState) {
    for p in &state.particles {
        let fraction = p.life_fraction();
        let radius = 4.0 * fraction;
        if radius <= 0.0 {
            continue;
        }
        let color = with_alpha(car_color_rgba(p.color), fraction);
        push_circle(out, Vec2::new(p.pos.x, p.pos.y), radius, color, 8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{CarColor, EnemyCar, TickInput, tick};

    #[test]
    fn test_menu_frame_is_non_empty() {
        let state = GameState::new(1);
        assert!(!build_frame(&state).is_empty());
    }

    #[test]
    fn test_playing_frame_grows_with_enemies() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput {
            start: true,
            ..Default::default()
        });

        let base = build_frame(&state).len();
        state.enemies.push(EnemyCar {
            x: 500.0,
            lane: 2,
            color: CarColor::Purple,
        });
        assert!(build_frame(&state).len() > base);
    }

    #[test]
    fn test_vertex_count_is_triangle_aligned() {
        let mut state = GameState::new(3);
        tick(&mut state, &TickInput {
            start: true,
            ..Default::default()
        });
        for _ in 0..120 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(build_frame(&state).len() % 3, 0);
    }
}
