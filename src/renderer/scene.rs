//! Renderer: draws a `World` onto a `Canvas`
//!
//! Reads the world and never mutates it. Back to front: background gradient,
//! star field, player, bullets, enemies, power-ups, particles, explosion rings.

use glam::Vec2;

use super::canvas::Canvas;
use crate::colors;
use crate::consts::{STAR_STEP_X, STAR_STEP_Y};
use crate::settings::Settings;
use crate::sim::state::{Enemy, Player, World};

pub const BULLET_GLOW: f32 = 10.0;
pub const POWER_UP_GLOW: f32 = 15.0;
pub const HEALTH_BAR_OFFSET: f32 = 8.0;
pub const HEALTH_BAR_HEIGHT: f32 = 4.0;
pub const EXPLOSION_LINE_WIDTH: f32 = 3.0;

/// Draw one frame. `time_ms` only animates the star twinkle.
pub fn draw_world(world: &World, settings: &Settings, canvas: &mut impl Canvas, time_ms: f64) {
    let surface = canvas.size();

    canvas.set_alpha(1.0);
    canvas.set_glow(0.0, colors::STAR);
    canvas.fill_radial_gradient(
        surface / 2.0,
        surface.x,
        colors::BACKGROUND_INNER,
        colors::BACKGROUND_OUTER,
    );

    draw_stars(settings, canvas, surface, time_ms);
    draw_player(&world.player, canvas);

    for bullet in &world.bullets {
        canvas.fill_rect(bullet.pos, bullet.size, bullet.color);
        if settings.glow {
            canvas.set_glow(BULLET_GLOW, bullet.color);
            canvas.fill_rect(bullet.pos, bullet.size, bullet.color);
            canvas.set_glow(0.0, bullet.color);
        }
    }

    for enemy in &world.enemies {
        draw_enemy(enemy, canvas);
    }

    for power_up in &world.power_ups {
        canvas.fill_rect(power_up.pos, power_up.size, power_up.color);
        if settings.glow {
            canvas.set_glow(POWER_UP_GLOW, power_up.color);
            canvas.fill_rect(power_up.pos, power_up.size, power_up.color);
            canvas.set_glow(0.0, power_up.color);
        }
    }

    // Newest particles win when over the cap
    let cap = settings.max_particles();
    let skip = world.particles.len().saturating_sub(cap);
    for particle in world.particles.iter().skip(skip) {
        canvas.set_alpha(particle.life);
        canvas.fill_rect(particle.pos, Vec2::splat(particle.size), particle.color);
    }
    canvas.set_alpha(1.0);

    if settings.explosion_rings {
        for explosion in &world.explosions {
            canvas.set_alpha(explosion.life);
            canvas.stroke_circle(
                explosion.pos,
                explosion.radius,
                EXPLOSION_LINE_WIDTH,
                colors::EXPLOSION,
            );
        }
        canvas.set_alpha(1.0);
    }
}

/// Fixed star positions from the index; size oscillates with wall-clock time
fn draw_stars(settings: &Settings, canvas: &mut impl Canvas, surface: Vec2, time_ms: f64) {
    let width = surface.x.max(1.0) as usize;
    let height = surface.y.max(1.0) as usize;
    let twinkle = settings.effective_twinkle();

    for i in 0..settings.star_count() {
        let x = (i * STAR_STEP_X) % width;
        let y = (i * STAR_STEP_Y) % height;
        let size = if twinkle {
            ((time_ms * 0.001 + i as f64).sin() * 0.5 + 1.0) as f32
        } else {
            1.0
        };
        canvas.fill_rect(
            Vec2::new(x as f32, y as f32),
            Vec2::splat(size),
            colors::STAR,
        );
    }
}

/// Hull, cockpit above the nose, engine flame below the tail
fn draw_player(player: &Player, canvas: &mut impl Canvas) {
    canvas.fill_rect(player.pos, player.size, player.color);
    canvas.fill_rect(
        player.pos + Vec2::new(15.0, -5.0),
        Vec2::new(10.0, 15.0),
        colors::PLAYER_COCKPIT,
    );
    canvas.fill_rect(
        player.pos + Vec2::new(10.0, player.size.y),
        Vec2::new(20.0, 8.0),
        colors::PLAYER_ENGINE,
    );
}

fn draw_enemy(enemy: &Enemy, canvas: &mut impl Canvas) {
    canvas.fill_rect(enemy.pos, enemy.size, enemy.color);

    let bar = Vec2::new(enemy.pos.x, enemy.pos.y - HEALTH_BAR_OFFSET);
    canvas.fill_rect(
        bar,
        Vec2::new(enemy.size.x, HEALTH_BAR_HEIGHT),
        colors::HEALTH_BAR_BACK,
    );
    canvas.fill_rect(
        bar,
        Vec2::new(enemy.size.x * enemy.health_fraction(), HEALTH_BAR_HEIGHT),
        colors::HEALTH_BAR_FILL,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_list::{DrawCommand, DrawList};
    use crate::settings::QualityPreset;
    use crate::sim::particles::spawn_explosion;
    use crate::sim::state::{Bullet, EnemyKind, Particle};
    use crate::tuning::Tuning;

    fn world() -> World {
        World::new(&Tuning::default())
    }

    fn bare_settings() -> Settings {
        Settings {
            starfield: false,
            ..Settings::default()
        }
    }

    fn particle(life: f32) -> Particle {
        Particle {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::ZERO,
            life,
            decay: 0.02,
            color: colors::EXPLOSION,
            size: 2.0,
        }
    }

    #[test]
    fn test_empty_world_layers() {
        let mut list = DrawList::new(800.0, 600.0);
        draw_world(&world(), &bare_settings(), &mut list, 0.0);
        // Background plus hull, cockpit and engine
        assert_eq!(list.len(), 4);
        assert!(matches!(
            list.commands()[0],
            DrawCommand::RadialGradient { radius, .. } if radius == 800.0
        ));
    }

    #[test]
    fn test_star_positions_are_deterministic() {
        let mut list = DrawList::new(800.0, 600.0);
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        draw_world(&world(), &settings, &mut list, 12_345.0);
        let stars: Vec<Vec2> = list.rects().take(100).map(|(pos, ..)| pos).collect();
        assert_eq!(stars.len(), 100);
        assert_eq!(stars[0], Vec2::ZERO);
        assert_eq!(stars[99], Vec2::new(693.0, 489.0));
        assert!(list.rects().take(100).all(|(_, size, ..)| size == Vec2::ONE));
    }

    #[test]
    fn test_star_twinkle_range() {
        let mut list = DrawList::new(800.0, 600.0);
        draw_world(&world(), &Settings::default(), &mut list, 777.0);
        assert!(
            list.rects()
                .take(100)
                .all(|(_, size, ..)| (0.5..=1.5).contains(&size.x))
        );
    }

    #[test]
    fn test_enemy_health_bar_is_proportional() {
        let mut w = world();
        w.enemies.push(Enemy {
            pos: Vec2::new(100.0, 100.0),
            size: Vec2::splat(30.0),
            speed: 1.0,
            health: 15,
            max_health: 30,
            color: colors::FAST_ENEMY,
            kind: EnemyKind::Fast,
        });
        let mut list = DrawList::new(800.0, 600.0);
        draw_world(&w, &bare_settings(), &mut list, 0.0);

        let fill = list
            .rects()
            .find(|(_, _, color, _)| *color == colors::HEALTH_BAR_FILL)
            .unwrap();
        assert_eq!(fill.0, Vec2::new(100.0, 92.0));
        assert_eq!(fill.1, Vec2::new(15.0, 4.0));
    }

    #[test]
    fn test_bullet_glow_follows_settings() {
        let mut w = world();
        w.bullets.push(Bullet {
            pos: Vec2::new(10.0, 10.0),
            size: Vec2::new(4.0, 10.0),
            speed: 8.0,
            damage: 10,
            color: colors::BULLET,
        });

        let mut list = DrawList::new(800.0, 600.0);
        draw_world(&w, &bare_settings(), &mut list, 0.0);
        let glowing = list.rects().filter(|(.., g)| g.is_some()).count();
        assert_eq!(glowing, 1);

        let mut low = Settings::from_preset(QualityPreset::Low);
        low.starfield = false;
        list.clear();
        draw_world(&w, &low, &mut list, 0.0);
        assert!(list.rects().all(|(.., g)| g.is_none()));
    }

    #[test]
    fn test_particle_alpha_is_life() {
        let mut w = world();
        w.particles.push(particle(0.4));
        w.particles.push(particle(0.0));
        let mut list = DrawList::new(800.0, 600.0);
        draw_world(&w, &bare_settings(), &mut list, 0.0);

        let alphas: Vec<f32> = list
            .rects()
            .filter(|(_, _, c, _)| c[..3] == colors::EXPLOSION[..3])
            .map(|(_, _, c, _)| c[3])
            .collect();
        // Engine flame shares the explosion hue at full alpha
        assert_eq!(alphas, vec![1.0, 0.4, 0.0]);
    }

    #[test]
    fn test_particle_cap_keeps_newest() {
        let mut w = world();
        for i in 0..150 {
            w.particles.push(particle(i as f32 / 150.0));
        }
        let mut settings = Settings::from_preset(QualityPreset::Low);
        settings.starfield = false;
        let mut list = DrawList::new(800.0, 600.0);
        draw_world(&w, &settings, &mut list, 0.0);
        // Background, three player rects, 100 particles
        assert_eq!(list.len(), 4 + 100);
    }

    #[test]
    fn test_explosion_rings() {
        let mut w = world();
        w.explosions.push(spawn_explosion(Vec2::new(60.0, 60.0), &Tuning::default()));
        let mut list = DrawList::new(800.0, 600.0);
        draw_world(&w, &bare_settings(), &mut list, 0.0);
        assert!(matches!(
            list.commands().last(),
            Some(DrawCommand::Ring { radius, .. }) if *radius == 5.0
        ));

        let mut settings = bare_settings();
        settings.explosion_rings = false;
        list.clear();
        draw_world(&w, &settings, &mut list, 0.0);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut w = world();
        w.particles.push(particle(0.5));
        w.explosions.push(spawn_explosion(Vec2::ONE, &Tuning::default()));
        let before = serde_json::to_string(&w).unwrap();
        let mut list = DrawList::new(800.0, 600.0);
        draw_world(&w, &Settings::default(), &mut list, 1.0);
        assert_eq!(serde_json::to_string(&w).unwrap(), before);
    }
}
