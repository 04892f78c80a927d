//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod movement;
pub mod particles;
pub mod random;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, collides, resolve_collisions};
pub use input::{InputState, TickInput};
pub use particles::BurstKind;
pub use random::{RandomSource, SequenceRandom, seeded};
pub use state::{
    Bullet, Enemy, EnemyKind, Explosion, GameEvent, GamePhase, Particle, Player, PowerUp,
    PowerUpKind, World,
};
pub use tick::{TickOutcome, tick};
