//! Explosion particles
//!
//! Spawned in radial bursts on a crash, aged once per tick, removed when
//! their lifetime runs out. Purely visual; nothing reads them back into
//! gameplay.

use glam::Vec2;
use rand::Rng;

use super::state::{CarColor, MAX_PARTICLES, Particle};
use crate::consts::PARTICLE_LIFE;

/// Spawn `count` particles radiating from a point
///
/// Each particle gets a uniformly random direction and a uniformly random
/// speed in [2, 8] game units per tick. The collection is capped at
/// `MAX_PARTICLES`; extra spawns are dropped.
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    color: CarColor,
    count: u32,
    rng: &mut impl Rng,
) {
    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            break;
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(2.0..8.0f32);
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            color,
        });
    }
}

/// Advance every particle one tick and drop the expired ones
pub fn tick_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life -= 1;
    }
    particles.retain(|p| p.life > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_spawns_with_full_lifetime() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, Vec2::new(100.0, 200.0), CarColor::Red, 15, &mut rng);

        assert_eq!(particles.len(), 15);
        for p in &particles {
            assert_eq!(p.life, 60);
            assert_eq!(p.pos, Vec2::new(100.0, 200.0));
            let speed = p.vel.length();
            assert!(speed > 1.99 && speed < 8.01, "speed {speed} out of range");
        }
    }

    #[test]
    fn test_position_follows_velocity() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        let origin = Vec2::new(50.0, 50.0);
        spawn_burst(&mut particles, origin, CarColor::Green, 1, &mut rng);
        let vel = particles[0].vel;

        for _ in 0..30 {
            tick_particles(&mut particles);
        }
        assert_eq!(particles.len(), 1);
        let expected = origin + vel * 30.0;
        assert!((particles[0].pos - expected).length() < 1e-3);
        assert_eq!(particles[0].life, 30);
    }

    #[test]
    fn test_all_gone_after_lifetime() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, Vec2::ZERO, CarColor::Purple, 20, &mut rng);

        for _ in 0..59 {
            tick_particles(&mut particles);
        }
        assert_eq!(particles.len(), 20);
        tick_particles(&mut particles);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, Vec2::ZERO, CarColor::Red, 1000, &mut rng);
        assert_eq!(particles.len(), MAX_PARTICLES);
    }
}
