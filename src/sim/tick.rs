//! One update pass
//!
//! Order is fixed: movement, spawners, collisions, terminal check. Entity
//! speeds are per-frame constants; only the spawn timers consume `dt_ms`.

use super::collision::resolve_collisions;
use super::input::TickInput;
use super::movement::advance;
use super::random::RandomSource;
use super::spawn::run_spawners;
use super::state::{GameEvent, World};
use crate::tuning::Tuning;

/// Result of an update pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep playing
    Continue,
    /// Health ran out during this pass
    GameOver,
}

/// Advance the world by one frame, appending whatever happened to `events`
pub fn tick(
    world: &mut World,
    input: &TickInput,
    dt_ms: f64,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) -> TickOutcome {
    let before = world.stats();
    world.frame += 1;

    advance(world, input, tuning, rng, events);
    run_spawners(world, dt_ms, tuning, rng);
    resolve_collisions(world, tuning, rng, events);

    let outcome = if world.health <= 0 {
        world.health = 0;
        TickOutcome::GameOver
    } else {
        TickOutcome::Continue
    };

    if world.stats() != before {
        let (score, health, level) = world.stats();
        events.push(GameEvent::StatsChanged {
            score,
            health,
            level,
        });
    }
    if outcome == TickOutcome::GameOver {
        events.push(GameEvent::GameOver {
            score: world.score,
            level: world.level,
        });
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::sim::random::{SequenceRandom, seeded};
    use crate::sim::state::{Enemy, EnemyKind, PowerUp, PowerUpKind};
    use glam::Vec2;
    use proptest::prelude::*;

    fn setup() -> (World, Tuning, SequenceRandom, Vec<GameEvent>) {
        let tuning = Tuning::default();
        (
            World::new(&tuning),
            tuning,
            SequenceRandom::constant(0.5),
            Vec::new(),
        )
    }

    fn enemy(pos: Vec2, speed: f32, health: i32) -> Enemy {
        Enemy {
            pos,
            size: Vec2::splat(30.0),
            speed,
            health,
            max_health: health,
            color: colors::FAST_ENEMY,
            kind: EnemyKind::Basic,
        }
    }

    #[test]
    fn test_idle_frame_emits_nothing() {
        let (mut world, tuning, mut rng, mut events) = setup();
        let outcome = tick(&mut world, &TickInput::default(), 16.0, &tuning, &mut rng, &mut events);
        assert_eq!(outcome, TickOutcome::Continue);
        assert!(events.is_empty());
        assert_eq!(world.frame, 1);
        assert_eq!(world.enemy_spawn_timer, 16.0);
    }

    #[test]
    fn test_escape_reports_stats_once() {
        let (mut world, tuning, mut rng, mut events) = setup();
        world.enemies.push(enemy(Vec2::new(10.0, 599.0), 2.0, 20));
        world.enemies.push(enemy(Vec2::new(100.0, 600.0), 2.0, 20));

        tick(&mut world, &TickInput::default(), 0.0, &tuning, &mut rng, &mut events);
        assert_eq!(world.health, 80);
        let stats: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::StatsChanged { .. }))
            .collect();
        assert_eq!(
            stats,
            vec![&GameEvent::StatsChanged {
                score: 0,
                health: 80,
                level: 1
            }]
        );
    }

    #[test]
    fn test_bullet_travel_then_kill() {
        let (mut world, tuning, mut rng, mut events) = setup();
        // Enemy parked directly above the nose, bullets need a few frames to reach it
        world.enemies.push(enemy(Vec2::new(405.0, 440.0), 0.0, 20));
        let shoot = TickInput {
            pointer_shots: 1,
            ..Default::default()
        };
        tick(&mut world, &shoot, 0.0, &tuning, &mut rng, &mut events);
        tick(&mut world, &shoot, 0.0, &tuning, &mut rng, &mut events);
        for _ in 0..20 {
            tick(&mut world, &TickInput::default(), 0.0, &tuning, &mut rng, &mut events);
        }
        assert!(world.enemies.is_empty());
        assert_eq!(world.score, 100);
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn test_health_clamped_and_game_over_reported() {
        let (mut world, tuning, mut rng, mut events) = setup();
        world.health = 15;
        world.enemies.push(enemy(Vec2::new(410.0, 500.0), 0.0, 20));

        let outcome = tick(&mut world, &TickInput::default(), 0.0, &tuning, &mut rng, &mut events);
        assert_eq!(outcome, TickOutcome::GameOver);
        assert_eq!(world.health, 0);
        assert_eq!(events.last(), Some(&GameEvent::GameOver { score: 0, level: 1 }));
        assert!(events.contains(&GameEvent::StatsChanged {
            score: 0,
            health: 0,
            level: 1
        }));
    }

    #[test]
    fn test_heal_at_ninety() {
        let (mut world, tuning, mut rng, mut events) = setup();
        world.health = 90;
        let kind = PowerUpKind::Health;
        world.power_ups.push(PowerUp {
            pos: Vec2::new(410.0, 515.0),
            size: Vec2::splat(20.0),
            speed: 2.0,
            kind,
            color: kind.color(),
        });
        tick(&mut world, &TickInput::default(), 0.0, &tuning, &mut rng, &mut events);
        assert_eq!(world.health, 100);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let run = || {
            let mut world = World::new(&tuning);
            let mut rng = seeded(7);
            let mut events = Vec::new();
            let input = TickInput {
                left: true,
                fire_held: true,
                ..Default::default()
            };
            for _ in 0..600 {
                tick(&mut world, &input, 16.0, &tuning, &mut rng, &mut events);
            }
            (world.stats(), world.entity_count(), events.len())
        };
        assert_eq!(run(), run());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_invariants_hold_over_random_play(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(
                (any::<(bool, bool, bool, bool)>(), any::<bool>(), 0u32..2, 0.0f64..50.0),
                1..300,
            ),
        ) {
            let tuning = Tuning::default();
            let mut world = World::new(&tuning);
            let mut rng = seeded(seed);
            let mut events = Vec::new();
            let mut last = world.stats();

            for ((up, down, left, right), fire_held, pointer_shots, dt) in inputs {
                let input = TickInput {
                    up, down, left, right, fire_held, pointer_shots,
                    ..Default::default()
                };
                let outcome = tick(&mut world, &input, dt, &tuning, &mut rng, &mut events);
                let (score, health, level) = world.stats();
                prop_assert!(score >= last.0);
                prop_assert!(level >= last.2);
                prop_assert!((0..=world.max_health).contains(&health));
                last = (score, health, level);
                if outcome == TickOutcome::GameOver {
                    break;
                }
            }
        }
    }
}
