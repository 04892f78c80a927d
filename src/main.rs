//! Cosmic Defender entry point
//!
//! On the web: wires the page (canvas, buttons, HUD) to the engine and drives
//! it from requestAnimationFrame. Natively: runs a seeded headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use cosmic_defender::renderer::{DrawList, RenderState};
    use cosmic_defender::sim::GameEvent;
    use cosmic_defender::{Engine, FrameStatus, GamePhase, Settings, Tuning};

    /// Page-side state shared by every callback
    struct Game {
        engine: Engine,
        frame: DrawList,
        render_state: Option<RenderState>,
        /// A requestAnimationFrame callback is pending
        loop_active: bool,
    }

    impl Game {
        fn new(width: f32, height: f32, settings: Settings, seed: u64) -> Self {
            let tuning = Tuning::default().with_surface(width, height);
            Self {
                engine: Engine::new(tuning, settings, seed),
                frame: DrawList::new(width, height),
                render_state: None,
                loop_active: false,
            }
        }

        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            match render_state.present(&self.frame) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("Surface lost, reconfiguring");
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory");
                }
                Err(e) => log::warn!("Surface error: {e:?}"),
            }
        }

        /// Push drained events to the DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            for event in self.engine.drain_events() {
                match event {
                    GameEvent::StatsChanged {
                        score,
                        health,
                        level,
                    } => {
                        set_text(&document, "score", &format!("Score: {score}"));
                        set_text(&document, "health", &format!("Health: {health}"));
                        set_text(&document, "level", &format!("Level: {level}"));
                    }
                    GameEvent::GameOver { score, level } => {
                        show_game_over(&document, score, level, self.engine.best_score());
                    }
                    _ => {}
                }
            }
            set_visible(
                &document,
                "pauseScreen",
                self.engine.phase() == GamePhase::Paused,
            );
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        match document.get_element_by_id(id) {
            Some(el) => el.set_text_content(Some(text)),
            None => log::warn!("Missing HUD element #{id}"),
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let style = if visible {
                "display: flex"
            } else {
                "display: none"
            };
            let _ = el.set_attribute("style", style);
        }
    }

    fn show_game_over(document: &Document, score: u64, level: u32, best: u64) {
        set_text(document, "gameTitle", "💀 GAME OVER");
        set_text(document, "startButton", "PLAY AGAIN");
        set_text(
            document,
            "finalScore",
            &format!("Final Score: {score} | Level Reached: {level} | Best: {best}"),
        );
        set_visible(document, "startScreen", true);
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Cosmic Defender starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let width = canvas.width();
        let height = canvas.height();

        let mut settings = Settings::default();
        match window.location().search() {
            Ok(query) => settings.apply_query(&query),
            Err(e) => log::warn!("Could not read page query: {e:?}"),
        }
        log::info!("Graphics quality: {}", settings.quality.as_str());

        let seed = js_sys::Date::now() as u64;
        let (w, h) = (width as f32, height as f32);
        let game = Rc::new(RefCell::new(Game::new(w, h, settings, seed)));
        log::info!("Game initialized with seed: {seed}");

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&document, &canvas, game.clone())?;
        setup_start_button(&document, game)?;

        log::info!("Cosmic Defender ready");
        Ok(())
    }

    fn setup_input_handlers(
        document: &Document,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let scrolls_page = matches!(event.key().as_str(), " " | "ArrowUp" | "ArrowDown");
                if g.engine.is_running() && scrolls_page {
                    event.prevent_default();
                }
                g.engine.key_down(&event.key());
            });
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().engine.key_up(&event.key());
            });
            document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move, relative to the canvas
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                let y = event.client_y() as f64 - rect.top();
                game.borrow_mut().engine.pointer_move(x as f32, y as f32);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().engine.pointer_down();
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().engine.pointer_up();
            });
            canvas.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let btn = document.get_element_by_id("startButton").ok_or("no start button")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let schedule = {
                let mut g = game.borrow_mut();
                g.engine.start_game();
                g.update_hud();
                !std::mem::replace(&mut g.loop_active, true)
            };
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_visible(&document, "startScreen", false);
            }
            if schedule {
                request_animation_frame(game.clone());
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let status = {
            let mut g = game.borrow_mut();
            let Game { engine, frame, .. } = &mut *g;
            frame.clear();
            let status = engine.frame(time, frame);
            if !frame.is_empty() {
                g.render();
            }
            g.update_hud();
            if status == FrameStatus::Halt {
                g.loop_active = false;
            }
            status
        };

        if status == FrameStatus::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {e:?}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cosmic Defender (native) starting...");
    log::info!("Native mode runs a headless session - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let max_frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);

    let tuning = match std::env::var("COSMIC_TUNING") {
        Ok(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Bad tuning file {path}: {e}");
                std::process::exit(1);
            }
        },
        Err(_) => cosmic_defender::Tuning::default(),
    };

    let mut settings = match std::env::var("COSMIC_SETTINGS") {
        Ok(path) => match load_settings(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Bad settings file {path}: {e}");
                std::process::exit(1);
            }
        },
        Err(_) => cosmic_defender::Settings::default(),
    };
    if let Ok(name) = std::env::var("COSMIC_QUALITY") {
        match cosmic_defender::QualityPreset::parse(&name) {
            Some(preset) => settings.apply_preset(preset),
            None => log::warn!("Unknown quality preset {name:?}, keeping defaults"),
        }
    }
    log::info!("Graphics quality: {}", settings.quality.as_str());

    let summary = headless::run(tuning, settings, seed, max_frames);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not encode summary: {e}"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<cosmic_defender::Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(cosmic_defender::Tuning::from_json(&json)?)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> Result<cosmic_defender::Settings, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(cosmic_defender::Settings::from_json(&json)?)
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use cosmic_defender::consts::FRAME_MS;
    use cosmic_defender::renderer::DrawList;
    use cosmic_defender::sim::{GameEvent, World};
    use cosmic_defender::{Engine, FrameStatus, Settings, Tuning};
    use serde::Serialize;

    #[derive(Debug, Serialize)]
    pub struct Summary {
        pub seed: u64,
        pub frames: u64,
        pub score: u64,
        pub level: u32,
        pub health: i32,
        pub kills: u32,
        pub shots: u32,
        pub game_over: bool,
        /// Commands in the last recorded frame
        pub draw_commands: usize,
    }

    /// Steer under the lowest enemy and keep the trigger held
    fn autopilot(engine: &mut Engine, world: &World) {
        let ship = world.player.center().x;
        let target = world
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.center().x);

        for key in ["a", "d"] {
            engine.key_up(key);
        }
        if let Some(x) = target {
            if x < ship - 4.0 {
                engine.key_down("a");
            } else if x > ship + 4.0 {
                engine.key_down("d");
            }
        }
    }

    pub fn run(tuning: Tuning, settings: Settings, seed: u64, max_frames: u64) -> Summary {
        let mut frame = DrawList::new(tuning.surface_width, tuning.surface_height);
        let mut engine = Engine::new(tuning, settings, seed);
        engine.start_game();
        engine.key_down(" ");

        let mut summary = Summary {
            seed,
            frames: 0,
            score: 0,
            level: 1,
            health: 0,
            kills: 0,
            shots: 0,
            game_over: false,
            draw_commands: 0,
        };

        for i in 0..max_frames {
            let world = engine.world().clone();
            autopilot(&mut engine, &world);

            frame.clear();
            let status = engine.frame(i as f64 * FRAME_MS, &mut frame);
            summary.frames += 1;

            for event in engine.drain_events() {
                match event {
                    GameEvent::EnemyDestroyed { .. } => summary.kills += 1,
                    GameEvent::Shot => summary.shots += 1,
                    GameEvent::LevelUp { level } => log::info!("Reached level {level}"),
                    GameEvent::GameOver { .. } => summary.game_over = true,
                    _ => {}
                }
            }
            if status == FrameStatus::Halt {
                break;
            }
        }

        let (score, health, level) = engine.world().stats();
        summary.score = score;
        summary.health = health;
        summary.level = level;
        summary.draw_commands = frame.len();
        log::info!(
            "Headless run finished after {} frames: score {} level {} health {}",
            summary.frames,
            summary.score,
            summary.level,
            summary.health
        );
        summary
    }
}
