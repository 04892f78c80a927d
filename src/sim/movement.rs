//! Per-frame motion: player steering, firing, and the fixed-velocity
//! advance of every other entity. Entities leaving the surface are culled here.

use glam::Vec2;

use super::input::TickInput;
use super::particles::{BurstKind, emit_burst};
use super::random::RandomSource;
use super::state::{Bullet, GameEvent, World};
use crate::colors;
use crate::tuning::Tuning;

/// Particles at or below this life are removed (absorbs float drift in `1.0 - n * decay`)
pub const LIFE_EPSILON: f32 = 1e-4;

/// Run every movement step for one frame
pub fn advance(
    world: &mut World,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    move_player(world, input);
    fire(world, input, tuning, rng, events);
    move_bullets(world);
    move_enemies(world, tuning, events);
    move_power_ups(world);
    update_particles(world, tuning);
    update_explosions(world, tuning);
}

/// Steer the ship and keep it fully on the surface
pub fn move_player(world: &mut World, input: &TickInput) {
    let player = &mut world.player;
    let mut delta = Vec2::ZERO;
    if input.up {
        delta.y -= player.speed;
    }
    if input.down {
        delta.y += player.speed;
    }
    if input.left {
        delta.x -= player.speed;
    }
    if input.right {
        delta.x += player.speed;
    }

    let limit = (world.surface - player.size).max(Vec2::ZERO);
    player.pos = (player.pos + delta).min(limit).max(Vec2::ZERO);
}

/// Spawn a bullet at the ship's nose with a muzzle flash
pub fn shoot(
    world: &mut World,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let pos = Vec2::new(
        world.player.pos.x + world.player.size.x / 2.0,
        world.player.pos.y,
    );
    world.bullets.push(Bullet {
        pos,
        size: Vec2::new(tuning.bullet_width, tuning.bullet_height),
        speed: tuning.bullet_speed,
        damage: tuning.bullet_damage,
        color: colors::BULLET,
    });
    emit_burst(
        &mut world.particles,
        BurstKind::MuzzleFlash,
        pos,
        colors::BULLET,
        tuning,
        rng,
    );
    events.push(GameEvent::Shot);
}

/// Pointer shots fire unthrottled; the fire key is rate-limited by a frame cooldown
pub fn fire(
    world: &mut World,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    for _ in 0..input.pointer_shots {
        shoot(world, tuning, rng, events);
    }

    world.fire_cooldown = world.fire_cooldown.saturating_sub(1);
    if input.fire_held && world.fire_cooldown == 0 {
        shoot(world, tuning, rng, events);
        world.fire_cooldown = tuning.key_fire_cooldown;
    }
}

pub fn move_bullets(world: &mut World) {
    world.bullets.retain_mut(|b| {
        b.pos.y -= b.speed;
        b.pos.y > -b.size.y
    });
}

/// Descend; an enemy that passes the bottom edge costs health
pub fn move_enemies(world: &mut World, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let floor = world.surface.y;
    let mut escaped = Vec::new();
    world.enemies.retain_mut(|e| {
        e.pos.y += e.speed;
        if e.pos.y > floor {
            escaped.push(e.kind);
            false
        } else {
            true
        }
    });

    for kind in escaped {
        world.health -= tuning.escape_penalty;
        events.push(GameEvent::EnemyEscaped { kind });
    }
}

pub fn move_power_ups(world: &mut World) {
    let floor = world.surface.y;
    world.power_ups.retain_mut(|p| {
        p.pos.y += p.speed;
        p.pos.y < floor + p.size.y
    });
}

/// Drift, fade and fall
pub fn update_particles(world: &mut World, tuning: &Tuning) {
    world.particles.retain_mut(|p| {
        p.pos += p.vel;
        p.life -= p.decay;
        p.vel.y += tuning.particle_gravity;
        p.life > LIFE_EPSILON
    });
}

/// Grow rings until they reach full size or fade out
pub fn update_explosions(world: &mut World, tuning: &Tuning) {
    world.explosions.retain_mut(|e| {
        e.radius += tuning.explosion_growth;
        e.life -= tuning.explosion_decay;
        e.life > LIFE_EPSILON && e.radius < e.max_radius
    });
}
