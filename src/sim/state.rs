//! Game state and core simulation types
//!
//! Entities are plain value records; they have no identity beyond their slot
//! in the owning collection. `World` is the single mutable snapshot of a session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::Color;
use crate::colors;
use crate::tuning::Tuning;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting for the first start signal
    #[default]
    NotStarted,
    /// Frames update and render
    Running,
    /// Frozen; the last world is still drawn
    Paused,
    /// Health ran out; waiting for restart
    GameOver,
}

/// Things that happened during an update pass, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A bullet left the ship
    Shot,
    /// An enemy's health reached zero
    EnemyDestroyed { kind: EnemyKind, pos: Vec2 },
    /// An enemy slipped past the bottom edge
    EnemyEscaped { kind: EnemyKind },
    /// An enemy rammed the player
    PlayerHit,
    /// The player collected a power-up
    PowerUpCollected { kind: PowerUpKind },
    /// Level increased
    LevelUp { level: u32 },
    /// Score, health or level changed this frame (emitted at most once per frame)
    StatsChanged { score: u64, health: i32, level: u32 },
    /// Health ran out (emitted exactly once per session)
    GameOver { score: u64, level: u32 },
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame on each axis
    pub speed: f32,
    pub color: Color,
}

impl Player {
    /// Ship with its left edge at the horizontal midpoint, `spawn_offset` above the bottom edge
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.surface_width / 2.0,
                tuning.surface_height - tuning.player_spawn_offset,
            ),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
            color: colors::PLAYER,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// A player projectile (travels up only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub damage: i32,
    pub color: Color,
}

impl Bullet {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
}

/// A descending enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub color: Color,
    pub kind: EnemyKind,
}

impl Enemy {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Remaining health in `[0, 1]` (health bar fill)
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Restores health (capped at max)
    Health,
    /// Flat score bonus
    Score,
}

impl PowerUpKind {
    pub fn color(&self) -> Color {
        match self {
            PowerUpKind::Health => colors::POWER_UP_HEALTH,
            PowerUpKind::Score => colors::POWER_UP_SCORE,
        }
    }
}

/// A falling power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub kind: PowerUpKind,
    pub color: Color,
}

impl PowerUp {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases every frame
    pub life: f32,
    pub decay: f32,
    pub color: Color,
    pub size: f32,
}

/// Expanding shockwave ring left by a destroyed enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    /// 0-1, decreases every frame
    pub life: f32,
}

/// Complete world state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Never decreases
    pub score: u64,
    /// Starts at 1, never decreases
    pub level: u32,
    /// Signed so penalties can overshoot; the terminal check clamps to 0
    pub health: i32,
    pub max_health: i32,
    /// Drawing surface size in pixels
    pub surface: Vec2,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub explosions: Vec<Explosion>,
    /// Elapsed milliseconds since the last enemy spawn
    pub enemy_spawn_timer: f64,
    /// Elapsed milliseconds since the last power-up spawn
    pub power_up_spawn_timer: f64,
    /// Frames until the held fire key may shoot again
    pub fire_cooldown: u32,
    /// Update passes since reset
    pub frame: u64,
}

impl World {
    /// Fresh world: empty collections, full health, level 1
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            level: 1,
            health: tuning.max_health,
            max_health: tuning.max_health,
            surface: Vec2::new(tuning.surface_width, tuning.surface_height),
            player: Player::spawn(tuning),
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            explosions: Vec::new(),
            enemy_spawn_timer: 0.0,
            power_up_spawn_timer: 0.0,
            fire_cooldown: 0,
            frame: 0,
        }
    }

    /// Reset in place (keeps allocations)
    pub fn reset(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.level = 1;
        self.health = tuning.max_health;
        self.max_health = tuning.max_health;
        self.surface = Vec2::new(tuning.surface_width, tuning.surface_height);
        self.player = Player::spawn(tuning);
        self.bullets.clear();
        self.enemies.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.explosions.clear();
        self.enemy_spawn_timer = 0.0;
        self.power_up_spawn_timer = 0.0;
        self.fire_cooldown = 0;
        self.frame = 0;
    }

    /// Health as shown to the player, in `[0, max_health]`
    pub fn display_health(&self) -> i32 {
        self.health.clamp(0, self.max_health)
    }

    /// Snapshot used to detect HUD changes
    pub fn stats(&self) -> (u64, i32, u32) {
        (self.score, self.health, self.level)
    }

    /// Total live entities (excluding the player)
    pub fn entity_count(&self) -> usize {
        self.bullets.len()
            + self.enemies.len()
            + self.power_ups.len()
            + self.particles.len()
            + self.explosions.len()
    }
}
