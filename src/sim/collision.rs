//! Collision detection and response
//!
//! Every entity is an axis-aligned rectangle. Two rectangles collide only when
//! they overlap with positive area: shared edges do not count.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particles::{BurstKind, emit_burst, spawn_explosion};
use super::random::RandomSource;
use super::state::{GameEvent, PowerUpKind, World};
use crate::colors;
use crate::tuning::Tuning;

/// Axis-aligned bounding box, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    #[inline]
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min().x < other.max().x
            && self.max().x > other.min().x
            && self.min().y < other.max().y
            && self.max().y > other.min().y
    }
}

/// Free-function form of [`Aabb::overlaps`]
#[inline]
pub fn collides(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Resolve bullet/enemy, player/enemy and player/power-up contacts.
///
/// Removals are marked while iterating and applied at the end of each pair,
/// so every live entity is visited exactly once.
pub fn resolve_collisions(
    world: &mut World,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    resolve_bullets(world, tuning, rng, events);
    resolve_player_enemies(world, tuning, rng, events);
    resolve_power_ups(world, tuning, rng, events);
}

fn resolve_bullets(
    world: &mut World,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    if world.bullets.is_empty() || world.enemies.is_empty() {
        return;
    }

    let mut spent = vec![false; world.bullets.len()];
    for (bi, bullet) in world.bullets.iter().enumerate() {
        let bounds = bullet.bounds();
        // One bullet damages every live enemy it overlaps this frame
        let hits = world
            .enemies
            .iter_mut()
            .filter(|e| !e.is_dead() && e.bounds().overlaps(&bounds));
        for enemy in hits {
            spent[bi] = true;
            enemy.health -= bullet.damage;
            let center = enemy.center();
            emit_burst(
                &mut world.particles,
                BurstKind::BulletHit,
                center,
                enemy.color,
                tuning,
                rng,
            );

            if !enemy.is_dead() {
                continue;
            }
            events.push(GameEvent::EnemyDestroyed {
                kind: enemy.kind,
                pos: center,
            });
            emit_burst(
                &mut world.particles,
                BurstKind::EnemyDeath,
                center,
                colors::EXPLOSION,
                tuning,
                rng,
            );
            world.explosions.push(spawn_explosion(center, tuning));

            world.score += tuning.kill_score;
            // Exact multiples only; a step past 1000 without landing on it is skipped
            if tuning.level_up_every > 0 && world.score % tuning.level_up_every == 0 {
                world.level += 1;
                log::debug!("Level up: {} at score {}", world.level, world.score);
                events.push(GameEvent::LevelUp { level: world.level });
            }
        }
    }

    let mut spent = spent.into_iter();
    world.bullets.retain(|_| !spent.next().unwrap_or(false));
    world.enemies.retain(|e| !e.is_dead());
}

fn resolve_player_enemies(
    world: &mut World,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let player = world.player.bounds();
    let before = world.enemies.len();
    world.enemies.retain(|e| !e.bounds().overlaps(&player));
    let hits = before - world.enemies.len();

    for _ in 0..hits {
        world.health -= tuning.contact_damage;
        events.push(GameEvent::PlayerHit);
        emit_burst(
            &mut world.particles,
            BurstKind::PlayerHit,
            world.player.center(),
            colors::PLAYER_HIT,
            tuning,
            rng,
        );
    }
}

fn resolve_power_ups(
    world: &mut World,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let player = world.player.bounds();
    let mut collected = Vec::new();
    world.power_ups.retain(|p| {
        if p.bounds().overlaps(&player) {
            collected.push((p.kind, p.center(), p.color));
            false
        } else {
            true
        }
    });

    for (kind, center, color) in collected {
        match kind {
            PowerUpKind::Health => {
                world.health = (world.health + tuning.heal_amount).min(world.max_health);
            }
            PowerUpKind::Score => world.score += tuning.score_bonus,
        }
        events.push(GameEvent::PowerUpCollected { kind });
        emit_burst(&mut world.particles, BurstKind::Pickup, center, color, tuning, rng);
    }
}
