//! Particle bursts and explosion rings
//!
//! Every resolved collision (and every shot) sprays a burst of short-lived
//! particles at the event point. Bursts differ only in size and color.

use glam::Vec2;

use super::random::RandomSource;
use super::state::{Explosion, Particle};
use crate::Color;
use crate::tuning::Tuning;

/// What caused a burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    MuzzleFlash,
    BulletHit,
    EnemyDeath,
    PlayerHit,
    Pickup,
}

impl BurstKind {
    /// Particles emitted per burst
    pub fn count(&self) -> usize {
        match self {
            BurstKind::MuzzleFlash => 5,
            BurstKind::BulletHit => 8,
            BurstKind::EnemyDeath => 15,
            BurstKind::PlayerHit => 10,
            BurstKind::Pickup => 8,
        }
    }
}

/// One particle with randomized velocity and size
pub fn spawn_particle(
    at: Vec2,
    color: Color,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Particle {
    let vx = rng.next_centered(tuning.particle_velocity_span);
    let vy = rng.next_centered(tuning.particle_velocity_span);
    let size = rng.next_span(tuning.particle_min_size, tuning.particle_size_span);
    Particle {
        pos: at,
        vel: Vec2::new(vx, vy),
        life: 1.0,
        decay: tuning.particle_decay,
        color,
        size,
    }
}

/// Append a burst of `kind.count()` particles at `at`
pub fn emit_burst(
    particles: &mut Vec<Particle>,
    kind: BurstKind,
    at: Vec2,
    color: Color,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) {
    particles.reserve(kind.count());
    for _ in 0..kind.count() {
        particles.push(spawn_particle(at, color, tuning, rng));
    }
}

/// Shockwave ring for a destroyed enemy
pub fn spawn_explosion(at: Vec2, tuning: &Tuning) -> Explosion {
    Explosion {
        pos: at,
        radius: tuning.explosion_start_radius,
        max_radius: tuning.explosion_max_radius,
        life: 1.0,
    }
}
