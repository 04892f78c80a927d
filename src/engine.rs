//! Engine: owns one session and its phase machine
//!
//! `NotStarted -> Running <-> Paused`, `Running -> GameOver -> Running`.
//! The host forwards raw input as it arrives and calls [`Engine::frame`] once
//! per display refresh until it returns [`FrameStatus::Halt`].

use rand_pcg::Pcg32;

use crate::renderer::{Canvas, draw_world};
use crate::settings::Settings;
use crate::sim::input::{InputState, TickInput};
use crate::sim::random::{RandomSource, seeded};
use crate::sim::state::{GameEvent, GamePhase, World};
use crate::sim::tick::{TickOutcome, tick};
use crate::tuning::Tuning;

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Halt,
}

/// A game session plus everything needed to drive it
pub struct Engine<R: RandomSource = Pcg32> {
    phase: GamePhase,
    world: World,
    input: InputState,
    rng: R,
    tuning: Tuning,
    settings: Settings,
    /// Pending events, drained by the host
    events: Vec<GameEvent>,
    /// Timestamp of the previous running frame; `None` right after start or resume
    last_time: Option<f64>,
    /// Highest final score this session
    best_score: u64,
    games_played: u32,
}

impl Engine<Pcg32> {
    /// Engine with a seeded session RNG
    pub fn new(tuning: Tuning, settings: Settings, seed: u64) -> Self {
        Self::with_rng(tuning, settings, seeded(seed))
    }
}

impl<R: RandomSource> Engine<R> {
    pub fn with_rng(tuning: Tuning, settings: Settings, rng: R) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            world: World::new(&tuning),
            input: InputState::new(),
            rng,
            tuning,
            settings,
            events: Vec::new(),
            last_time: None,
            best_score: 0,
            games_played: 0,
        }
    }

    /// Reset the world and enter `Running`. Also used for restart.
    pub fn start_game(&mut self) {
        self.world.reset(&self.tuning);
        self.input.clear();
        self.events.clear();
        self.last_time = None;
        self.phase = GamePhase::Running;
        self.games_played += 1;
        log::info!("Game {} started", self.games_played);

        let (score, health, level) = self.world.stats();
        self.events.push(GameEvent::StatsChanged {
            score,
            health,
            level,
        });
    }

    pub fn restart(&mut self) {
        self.start_game();
    }

    /// Toggle `Running <-> Paused`; ignored in other phases
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                // Paused time never reaches the spawn timers
                self.last_time = None;
                log::info!("Resumed");
            }
            GamePhase::NotStarted | GamePhase::GameOver => {}
        }
    }

    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.pointer_move(x, y);
    }

    /// Presses only shoot while a game is running
    pub fn pointer_down(&mut self) {
        if self.phase == GamePhase::Running {
            self.input.pointer_down();
        }
    }

    pub fn pointer_up(&mut self) {
        self.input.pointer_up();
    }

    /// Run one frame: update (when running) then render.
    ///
    /// `time_ms` is the host's monotonic frame timestamp.
    pub fn frame(&mut self, time_ms: f64, canvas: &mut impl Canvas) -> FrameStatus {
        if self.input.take_pause_request() {
            self.toggle_pause();
        }

        match self.phase {
            GamePhase::NotStarted | GamePhase::GameOver => FrameStatus::Halt,
            GamePhase::Paused => {
                draw_world(&self.world, &self.settings, canvas, time_ms);
                FrameStatus::Continue
            }
            GamePhase::Running => {
                let dt_ms = self.last_time.map_or(0.0, |last| time_ms - last);
                self.last_time = Some(time_ms);
                let input = self.input.sample();
                let outcome = self.update(&input, dt_ms);
                draw_world(&self.world, &self.settings, canvas, time_ms);
                match outcome {
                    TickOutcome::Continue => FrameStatus::Continue,
                    TickOutcome::GameOver => FrameStatus::Halt,
                }
            }
        }
    }

    /// One update pass without rendering (headless runs and tests)
    pub fn update(&mut self, input: &TickInput, dt_ms: f64) -> TickOutcome {
        if self.phase != GamePhase::Running {
            return TickOutcome::Continue;
        }

        let first_event = self.events.len();
        let outcome = tick(
            &mut self.world,
            input,
            dt_ms,
            &self.tuning,
            &mut self.rng,
            &mut self.events,
        );
        self.log_events(first_event);
        self.check_invariants();

        if outcome == TickOutcome::GameOver {
            self.phase = GamePhase::GameOver;
            self.best_score = self.best_score.max(self.world.score);
            log::info!(
                "Game over: score {} level {} (best {})",
                self.world.score,
                self.world.level,
                self.best_score
            );
        }
        outcome
    }

    fn log_events(&self, from: usize) {
        for event in &self.events[from..] {
            match event {
                GameEvent::LevelUp { level } => log::info!("Level {level}"),
                GameEvent::EnemyDestroyed { kind, .. } => log::debug!("{kind:?} enemy destroyed"),
                GameEvent::EnemyEscaped { kind } => log::debug!("{kind:?} enemy escaped"),
                GameEvent::PlayerHit => log::debug!("Player hit"),
                GameEvent::PowerUpCollected { kind } => log::debug!("Collected {kind:?} power-up"),
                GameEvent::Shot | GameEvent::StatsChanged { .. } | GameEvent::GameOver { .. } => {}
            }
        }
    }

    fn check_invariants(&self) {
        let world = &self.world;
        debug_assert!(
            (0..=world.max_health).contains(&world.health),
            "health {} out of range",
            world.health
        );
        debug_assert!(world.level >= 1, "level must start at 1");
        debug_assert!(
            world.enemies.iter().all(|e| e.health <= e.max_health),
            "enemy health above its maximum"
        );
        debug_assert!(
            world.particles.iter().all(|p| p.life <= 1.0),
            "particle life above 1"
        );
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::sim::random::SequenceRandom;
    use crate::sim::state::{Enemy, EnemyKind};
    use glam::Vec2;

    fn engine() -> Engine<SequenceRandom> {
        Engine::with_rng(
            Tuning::default(),
            Settings::default(),
            SequenceRandom::constant(0.5),
        )
    }

    fn doomed_enemy(engine: &Engine<SequenceRandom>) -> Enemy {
        let player = engine.world().player.pos;
        Enemy {
            pos: player,
            size: Vec2::splat(30.0),
            speed: 0.0,
            health: 20,
            max_health: 20,
            color: crate::colors::FAST_ENEMY,
            kind: EnemyKind::Basic,
        }
    }

    #[test]
    fn test_not_started_halts() {
        let mut engine = engine();
        let mut canvas = DrawList::new(800.0, 600.0);
        assert_eq!(engine.frame(0.0, &mut canvas), FrameStatus::Halt);
        assert!(canvas.is_empty());
        assert_eq!(engine.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_start_reports_initial_stats() {
        let mut engine = engine();
        engine.start_game();
        assert!(engine.is_running());
        assert_eq!(
            engine.drain_events(),
            vec![GameEvent::StatsChanged {
                score: 0,
                health: 100,
                level: 1
            }]
        );
    }

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut engine = engine();
        let mut canvas = DrawList::new(800.0, 600.0);
        engine.start_game();
        assert_eq!(engine.frame(10_000.0, &mut canvas), FrameStatus::Continue);
        assert_eq!(engine.world().enemy_spawn_timer, 0.0);
        assert!(!canvas.is_empty());

        engine.frame(10_016.0, &mut canvas);
        assert_eq!(engine.world().enemy_spawn_timer, 16.0);
    }

    #[test]
    fn test_query_settings_reach_the_frame() {
        let mut low = Settings::default();
        low.apply_query("?quality=low");
        let mut engines = [
            engine(),
            Engine::with_rng(Tuning::default(), low, SequenceRandom::constant(0.5)),
        ];
        let drawn: Vec<usize> = engines
            .iter_mut()
            .map(|engine| {
                let mut canvas = DrawList::new(800.0, 600.0);
                engine.start_game();
                engine.frame(0.0, &mut canvas);
                canvas.len()
            })
            .collect();
        let stars = crate::consts::STAR_COUNT;
        assert_eq!(drawn[0] - drawn[1], stars - stars / 2);
        assert_eq!(engines[1].settings().quality, crate::QualityPreset::Low);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut engine = engine();
        let mut canvas = DrawList::new(800.0, 600.0);
        engine.start_game();
        engine.frame(0.0, &mut canvas);
        engine.frame(16.0, &mut canvas);

        engine.key_down("Escape");
        canvas.clear();
        assert_eq!(engine.frame(32.0, &mut canvas), FrameStatus::Continue);
        assert_eq!(engine.phase(), GamePhase::Paused);
        assert!(!canvas.is_empty());
        let frozen = engine.world().frame;
        engine.frame(5_000.0, &mut canvas);
        assert_eq!(engine.world().frame, frozen);

        engine.key_up("Escape");
        engine.key_down("Escape");
        engine.frame(10_000.0, &mut canvas);
        assert!(engine.is_running());
        // The paused interval is not counted
        assert_eq!(engine.world().enemy_spawn_timer, 16.0);
    }

    #[test]
    fn test_game_over_exactly_once() {
        let mut engine = engine();
        let mut canvas = DrawList::new(800.0, 600.0);
        engine.start_game();
        engine.drain_events();
        engine.world.health = 20;
        let enemy = doomed_enemy(&engine);
        engine.world.enemies.push(enemy);

        assert_eq!(engine.frame(0.0, &mut canvas), FrameStatus::Halt);
        assert_eq!(engine.phase(), GamePhase::GameOver);

        let frame = engine.world().frame;
        assert_eq!(engine.frame(16.0, &mut canvas), FrameStatus::Halt);
        assert_eq!(engine.update(&TickInput::default(), 16.0), TickOutcome::Continue);
        assert_eq!(engine.world().frame, frame);

        let game_overs: Vec<_> = engine
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(game_overs, vec![GameEvent::GameOver { score: 0, level: 1 }]);
    }

    #[test]
    fn test_restart_resets_and_keeps_best() {
        let mut engine = engine();
        let mut canvas = DrawList::new(800.0, 600.0);
        engine.start_game();
        engine.world.score = 700;
        engine.world.health = 10;
        let enemy = doomed_enemy(&engine);
        engine.world.enemies.push(enemy);
        engine.frame(0.0, &mut canvas);
        assert_eq!(engine.best_score(), 700);

        engine.restart();
        assert!(engine.is_running());
        assert_eq!(engine.world().stats(), (0, 100, 1));
        assert_eq!(engine.world().entity_count(), 0);
        assert_eq!(engine.best_score(), 700);
        assert_eq!(engine.games_played(), 2);
    }

    #[test]
    fn test_pointer_ignored_before_start() {
        let mut engine = engine();
        engine.pointer_down();
        engine.pointer_up();
        engine.start_game();
        let mut canvas = DrawList::new(800.0, 600.0);
        engine.frame(0.0, &mut canvas);
        assert!(engine.world().bullets.is_empty());
    }

    #[test]
    fn test_click_fires_on_next_frame() {
        let mut engine = engine();
        let mut canvas = DrawList::new(800.0, 600.0);
        engine.start_game();
        engine.pointer_down();
        engine.pointer_up();
        engine.frame(0.0, &mut canvas);
        assert_eq!(engine.world().bullets.len(), 1);
    }
}
