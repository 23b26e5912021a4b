//! Fall Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use fall_dodge::platform::{
        InputEvent, PerformanceClock, direction_for_key, direction_for_pointer,
    };
    use fall_dodge::renderer::{CanvasSurface, SpriteSheet};
    use fall_dodge::{AssetError, Game, GameConfig};

    type WebGame = Game<CanvasSurface, PerformanceClock>;

    /// Browser-side wrapper around the game
    struct App {
        game: WebGame,
        canvas_width: f32,
        /// Mouse button held (mousemove only steers while pressed)
        pointer_down: bool,
    }

    impl App {
        /// Steer from a pointer x in canvas CSS pixels
        fn steer_to(&mut self, x: f32) {
            let direction = direction_for_pointer(x, self.canvas_width);
            self.game.handle_input(InputEvent::DirectionStart(direction));
        }

        fn release(&mut self) {
            self.pointer_down = false;
            self.game.handle_input(InputEvent::DirectionEnd);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = self.game.hud();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score_text()));
            }
            if let Some(el) = document.get_element_by_id("timer") {
                el.set_text_content(Some(&hud.timer_text()));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Fall Dodge starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {}", e);
        }
    }

    async fn start() -> Result<(), AssetError> {
        let window = web_sys::window().ok_or_else(|| AssetError::Js("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| AssetError::Js("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| AssetError::Js("no #gameCanvas element".into()))?
            .dyn_into()
            .map_err(|_| AssetError::Js("#gameCanvas is not a canvas".into()))?;

        // Fill the viewport; size is read once and never updated
        let width = window.inner_width()?.as_f64().unwrap_or(800.0);
        let height = window.inner_height()?.as_f64().unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let mut config = GameConfig::load();
        if config.seed.is_none() {
            config.seed = Some(js_sys::Date::now() as u64);
        }

        // Don't start the round until every sprite is ready
        let sprites = SpriteSheet::load("").await?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let surface = CanvasSurface::new(&canvas, sprites)?;
        let game = Game::new(config, surface, PerformanceClock::new())
            .map_err(|e| AssetError::Js(e.to_string()))?;
        log::info!("Game initialized with seed: {}", game.seed());

        let app = Rc::new(RefCell::new(App {
            game,
            canvas_width: width as f32,
            pointer_down: false,
        }));

        setup_input_handlers(&canvas, app.clone());

        // Start game loop
        request_animation_frame(app);

        log::info!("Fall Dodge running!");
        Ok(())
    }

    fn touch_x(event: &TouchEvent) -> Option<f32> {
        event.touches().get(0).map(|t| t.client_x() as f32)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Touch start / move: side of the screen picks the direction
        for name in ["touchstart", "touchmove"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(x) = touch_x(&event) {
                    app.borrow_mut().steer_to(x);
                }
            });
            let _ = document.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                app.borrow_mut().release();
            });
            let _ = document
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.pointer_down = true;
                a.steer_to(event.client_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move (only while pressed)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                if a.pointer_down {
                    a.steer_to(event.client_x() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up anywhere
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().release();
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let key = event.key();
                if let Some(direction) = direction_for_key(&key) {
                    a.game.handle_input(InputEvent::DirectionStart(direction));
                } else if key == "i" || key == "I" {
                    a.game.toggle_autopilot();
                } else if key == "Escape" {
                    a.game.stop();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = direction_for_key(&event.key()) {
                    app.borrow_mut()
                        .game
                        .handle_input(InputEvent::DirectionRelease(direction));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let keep_going = {
            let mut a = app.borrow_mut();
            let outcome = a.game.frame();
            a.update_hud();
            outcome.wants_next_frame()
        };

        if keep_going {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fall Dodge (native) starting...");
    log::info!("Native mode runs a headless autopilot round - use `trunk serve` to play");

    let config = match std::env::args().nth(1) {
        Some(path) => load_config_file(&path),
        None => fall_dodge::GameConfig::load(),
    };

    play_headless(config);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config_file(path: &str) -> fall_dodge::GameConfig {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| fall_dodge::GameConfig::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(config) => {
            log::info!("Loaded config from {}", path);
            config
        }
        Err(e) => {
            log::warn!("Ignoring config {}: {}", path, e);
            fall_dodge::GameConfig::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn play_headless(config: fall_dodge::GameConfig) {
    use fall_dodge::consts::FRAME_MS;
    use fall_dodge::platform::ManualClock;
    use fall_dodge::renderer::RecordingSurface;
    use fall_dodge::{FrameOutcome, Game};
    use std::rc::Rc;

    let clock = Rc::new(ManualClock::new(0.0));
    let mut config = config;
    if config.seed.is_none() {
        config.seed = Some(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
        );
    }

    let mut game = match Game::new(config, RecordingSurface::new(1000.0, 800.0), Rc::clone(&clock)) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            return;
        }
    };
    game.toggle_autopilot();

    loop {
        let outcome = game.frame();
        if game.state().frame_count % 60 == 0 {
            let hud = game.hud();
            log::debug!("{} | {}", hud.score_text(), hud.timer_text());
        }
        if outcome != FrameOutcome::Continue {
            break;
        }
        clock.advance(FRAME_MS);
    }

    let state = game.state();
    println!(
        "Round over after {} frames: score {}, reason {:?}, seed {}",
        state.frame_count,
        state.score,
        state.end_reason,
        game.seed()
    );
    match serde_json::to_string_pretty(state) {
        Ok(json) => log::info!("Final state:\n{}", json),
        Err(e) => log::warn!("Could not serialize final state: {}", e),
    }
}
