//! Spawner: elapsed-time accumulators that drop new enemies and power-ups
//! in from above the top edge.

use glam::Vec2;

use super::random::RandomSource;
use super::state::{Enemy, EnemyKind, PowerUp, PowerUpKind, World};
use crate::colors;
use crate::tuning::Tuning;

/// Advance both spawn timers by `dt_ms` and spawn whatever is due
pub fn run_spawners(world: &mut World, dt_ms: f64, tuning: &Tuning, rng: &mut impl RandomSource) {
    // Negative deltas (clock skew) never rewind a timer
    let dt_ms = dt_ms.max(0.0);

    world.enemy_spawn_timer += dt_ms;
    if world.enemy_spawn_timer > tuning.enemy_spawn_interval(world.level) {
        world.enemy_spawn_timer = 0.0;
        let enemy = spawn_enemy(world.surface, world.level, tuning, rng);
        log::trace!("Spawned {:?} enemy at x={:.0}", enemy.kind, enemy.pos.x);
        world.enemies.push(enemy);
    }

    world.power_up_spawn_timer += dt_ms;
    if world.power_up_spawn_timer > tuning.power_up_interval_ms {
        world.power_up_spawn_timer = 0.0;
        let power_up = spawn_power_up(world.surface, tuning, rng);
        log::trace!("Spawned {:?} power-up at x={:.0}", power_up.kind, power_up.pos.x);
        world.power_ups.push(power_up);
    }
}

/// A new enemy just above the top edge, scaled to `level`
pub fn spawn_enemy(
    surface: Vec2,
    level: u32,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Enemy {
    let size = Vec2::new(tuning.enemy_width, tuning.enemy_height);
    let x = rng.next_unit() * (surface.x - size.x).max(0.0);
    let speed = rng.next_span(tuning.enemy_base_speed, tuning.enemy_speed_span)
        + level as f32 * tuning.enemy_speed_per_level;
    let color = colors::hsl(rng.next_span(300.0, 60.0), 0.7, 0.5);
    let health = tuning.enemy_health(level);

    let mut enemy = Enemy {
        pos: Vec2::new(x, -size.y),
        size,
        speed,
        health,
        max_health: health,
        color,
        kind: EnemyKind::Basic,
    };
    if !rng.chance(1.0 - tuning.fast_enemy_chance) {
        enemy.kind = EnemyKind::Fast;
        enemy.speed *= tuning.fast_enemy_multiplier;
        enemy.color = colors::FAST_ENEMY;
    }
    enemy
}

/// A new power-up just above the top edge
pub fn spawn_power_up(surface: Vec2, tuning: &Tuning, rng: &mut impl RandomSource) -> PowerUp {
    let size = Vec2::splat(tuning.power_up_size);
    let x = rng.next_unit() * (surface.x - size.x).max(0.0);
    let kind = if rng.chance(0.5) {
        PowerUpKind::Health
    } else {
        PowerUpKind::Score
    };
    PowerUp {
        pos: Vec2::new(x, -size.y),
        size,
        speed: tuning.power_up_speed,
        kind,
        color: kind.color(),
    }
}
