//! Data-driven game balance
//!
//! Every gameplay constant lives here so a session can be re-tuned from JSON
//! without touching the simulation. Defaults reproduce the classic balance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors loading or validating configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Input was not valid JSON for the target type
    Parse(serde_json::Error),
    /// A field parsed but holds an unusable value
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Invalid { field, reason } => {
                write!(f, "invalid config field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Game balance parameters
///
/// Speeds are pixels per frame; intervals are milliseconds of elapsed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Surface ===
    pub surface_width: f32,
    pub surface_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    /// Distance from the bottom edge to the player's top at reset
    pub player_spawn_offset: f32,
    pub max_health: i32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    /// Frames between shots while the fire key is held
    pub key_fire_cooldown: u32,

    // === Enemies ===
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_base_health: i32,
    pub enemy_health_per_level: i32,
    pub enemy_base_speed: f32,
    pub enemy_speed_span: f32,
    pub enemy_speed_per_level: f32,
    pub fast_enemy_chance: f32,
    pub fast_enemy_multiplier: f32,
    /// Health lost when an enemy slips past the bottom edge
    pub escape_penalty: i32,
    /// Health lost when an enemy rams the player
    pub contact_damage: i32,
    pub enemy_spawn_base_ms: f64,
    pub enemy_spawn_per_level_ms: f64,
    pub enemy_spawn_min_ms: f64,

    // === Power-ups ===
    pub power_up_size: f32,
    pub power_up_speed: f32,
    pub power_up_interval_ms: f64,
    pub heal_amount: i32,
    pub score_bonus: u64,

    // === Scoring ===
    pub kill_score: u64,
    pub level_up_every: u64,

    // === Particles ===
    pub particle_decay: f32,
    pub particle_gravity: f32,
    /// Full width of the random velocity range, centered on zero
    pub particle_velocity_span: f32,
    pub particle_min_size: f32,
    pub particle_size_span: f32,

    // === Explosion rings ===
    pub explosion_start_radius: f32,
    pub explosion_max_radius: f32,
    pub explosion_growth: f32,
    pub explosion_decay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            surface_width: crate::consts::SURFACE_WIDTH,
            surface_height: crate::consts::SURFACE_HEIGHT,

            player_width: 40.0,
            player_height: 40.0,
            player_speed: 5.0,
            player_spawn_offset: 80.0,
            max_health: 100,

            bullet_width: 4.0,
            bullet_height: 10.0,
            bullet_speed: 8.0,
            bullet_damage: 10,
            key_fire_cooldown: 10,

            enemy_width: 30.0,
            enemy_height: 30.0,
            enemy_base_health: 20,
            enemy_health_per_level: 5,
            enemy_base_speed: 1.0,
            enemy_speed_span: 2.0,
            enemy_speed_per_level: 0.2,
            fast_enemy_chance: 0.2,
            fast_enemy_multiplier: 1.5,
            escape_penalty: 10,
            contact_damage: 20,
            enemy_spawn_base_ms: 500.0,
            enemy_spawn_per_level_ms: 50.0,
            enemy_spawn_min_ms: 200.0,

            power_up_size: 20.0,
            power_up_speed: 2.0,
            power_up_interval_ms: 5000.0,
            heal_amount: 20,
            score_bonus: 200,

            kill_score: 100,
            level_up_every: 1000,

            particle_decay: 0.02,
            particle_gravity: 0.1,
            particle_velocity_span: 6.0,
            particle_min_size: 1.0,
            particle_size_span: 3.0,

            explosion_start_radius: 5.0,
            explosion_max_radius: 50.0,
            explosion_growth: 2.0,
            explosion_decay: 0.05,
        }
    }
}

impl Tuning {
    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Same balance on a different surface
    pub fn with_surface(mut self, width: f32, height: f32) -> Self {
        self.surface_width = width;
        self.surface_height = height;
        self
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be positive",
                })
            }
        }

        positive("surface_width", self.surface_width)?;
        positive("surface_height", self.surface_height)?;
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("bullet_width", self.bullet_width)?;
        positive("bullet_height", self.bullet_height)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("enemy_width", self.enemy_width)?;
        positive("enemy_height", self.enemy_height)?;
        positive("power_up_size", self.power_up_size)?;
        positive("particle_decay", self.particle_decay)?;

        if self.player_width > self.surface_width || self.player_height > self.surface_height {
            return Err(ConfigError::Invalid {
                field: "player_width",
                reason: "player must fit on the surface",
            });
        }
        if self.max_health <= 0 {
            return Err(ConfigError::Invalid {
                field: "max_health",
                reason: "must be positive",
            });
        }
        if self.enemy_base_health <= 0 {
            return Err(ConfigError::Invalid {
                field: "enemy_base_health",
                reason: "must be positive",
            });
        }
        if self.enemy_spawn_min_ms <= 0.0 || self.power_up_interval_ms <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "enemy_spawn_min_ms",
                reason: "spawn intervals must be positive",
            });
        }
        if self.enemy_spawn_min_ms > self.enemy_spawn_base_ms {
            return Err(ConfigError::Invalid {
                field: "enemy_spawn_min_ms",
                reason: "minimum interval exceeds base interval",
            });
        }
        if self.level_up_every == 0 {
            return Err(ConfigError::Invalid {
                field: "level_up_every",
                reason: "must be non-zero",
            });
        }
        if !(0.0..=1.0).contains(&self.fast_enemy_chance) {
            return Err(ConfigError::Invalid {
                field: "fast_enemy_chance",
                reason: "must be a probability",
            });
        }
        Ok(())
    }

    /// Enemy spawn interval for a level: `max(base - level*step, min)`
    pub fn enemy_spawn_interval(&self, level: u32) -> f64 {
        (self.enemy_spawn_base_ms - level as f64 * self.enemy_spawn_per_level_ms)
            .max(self.enemy_spawn_min_ms)
    }

    /// Starting (and maximum) health of an enemy spawned at `level`
    pub fn enemy_health(&self, level: u32) -> i32 {
        self.enemy_base_health + level as i32 * self.enemy_health_per_level
    }
}
