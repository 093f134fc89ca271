//! Car Dodger entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use car_dodger::audio::AudioManager;
    use car_dodger::consts::*;
    use car_dodger::renderer::{RenderState, build_frame};
    use car_dodger::settings::Settings;
    use car_dodger::sim::{GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        settings: Settings,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            Self {
                state: GameState::new(seed),
                render_state: None,
                settings,
                audio,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks at the fixed rate
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input = TickInput::default();
            }

            if !self.settings.effective_particles() {
                self.state.particles.clear();
            }

            // Hand queued cue intents to the audio layer
            for event in self.state.events.drain(..) {
                self.audio.play(event);
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_frame(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD and menu elements in the DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            set_text(&document, "#hud-score .hud-value", &self.state.score.to_string());
            set_text(
                &document,
                "#hud-speed .hud-value",
                &format!("{:.1}x", self.state.game_speed),
            );
            set_text(&document, "#hud-fps .hud-value", &self.fps.to_string());

            // Best score shows only once one exists
            if self.state.high_score > 0 {
                set_text(
                    &document,
                    "#hud-best .hud-value",
                    &self.state.high_score.to_string(),
                );
            }
            set_hidden(&document, "hud-best", self.state.high_score == 0);
            set_hidden(&document, "hud-fps", !self.settings.show_fps);

            let in_game = matches!(
                self.state.phase,
                GamePhase::Playing | GamePhase::Paused
            );
            set_hidden(&document, "main-menu", self.state.phase != GamePhase::Menu);
            set_hidden(&document, "pause-menu", self.state.phase != GamePhase::Paused);
            set_hidden(&document, "hud", !in_game);
            set_hidden(
                &document,
                "touch-controls",
                !(in_game && self.settings.mobile_controls),
            );

            let game_over = self.state.phase == GamePhase::GameOver;
            set_hidden(&document, "game-over", !game_over);
            if game_over {
                set_text(&document, "#final-score", &self.state.score.to_string());
                set_text(&document, "#final-best", &self.state.high_score.to_string());
                // "NEW HIGH SCORE!" vs. showing the standing best
                let is_new_best =
                    self.state.score == self.state.high_score && self.state.score > 0;
                set_hidden(&document, "new-best", !is_new_best);
                set_hidden(&document, "prev-best", is_new_best);
            }
        }
    }

    /// Set the text content of the first element matching a selector
    fn set_text(document: &Document, selector: &str, value: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(value));
        }
    }

    /// Toggle the `hidden` class on an element by id
    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    /// Wire a DOM button to an input flag
    ///
    /// Every menu, pause, game-over, and touch-control button goes through
    /// this one path; the only variation is which flag the press raises.
    fn wire_button(
        document: &Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        set: fn(&mut TickInput),
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Button #{id} not found");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut g = game.borrow_mut();
            set(&mut g.input);
            // Button presses are user gestures; a good moment to unlock audio
            g.audio.resume();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Car Dodger starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_keyboard(game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Car Dodger running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "ArrowUp" => g.input.move_up = true,
                "ArrowDown" => g.input.move_down = true,
                "p" | "P" | "Escape" => g.input.pause = true,
                // Enter starts from the menu and restarts from game over;
                // the sim ignores whichever does not apply
                " " | "Enter" => {
                    g.input.start = true;
                    g.input.play_again = true;
                    g.audio.resume();
                }
                "r" | "R" => g.input.reset = true,
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Menu / overlay buttons
        wire_button(document, "start-btn", game.clone(), |i| i.start = true);
        wire_button(document, "resume-btn", game.clone(), |i| i.pause = true);
        wire_button(document, "reset-btn", game.clone(), |i| i.reset = true);
        wire_button(document, "play-again-btn", game.clone(), |i| {
            i.play_again = true
        });

        // Touch control regions
        wire_button(document, "up-btn", game.clone(), |i| i.move_up = true);
        wire_button(document, "down-btn", game.clone(), |i| i.move_down = true);
        wire_button(document, "pause-btn", game, |i| i.pause = true);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Unmute on focus
        {
            let window2 = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window2.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
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
    log::info!("Car Dodger (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    demo_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless scripted run: start a game, dodge for a while, report the score
#[cfg(not(target_arch = "wasm32"))]
fn demo_run() {
    use car_dodger::sim::{GamePhase, GameState, TickInput, tick};

    let mut state = GameState::new(0xCAFE);
    tick(&mut state, &TickInput {
        start: true,
        ..Default::default()
    });

    let mut ticks = 0u32;
    while state.phase == GamePhase::Playing && ticks < 60 * 120 {
        let mut input = TickInput::default();
        // Zig-zag between the middle lanes every couple of seconds
        if ticks % 240 == 120 {
            input.move_up = true;
        } else if ticks % 240 == 0 && ticks > 0 {
            input.move_down = true;
        }
        tick(&mut state, &input);
        ticks += 1;
    }

    println!(
        "Demo run over after {} ticks: score {}, best {}, {:.1}x speed",
        ticks, state.score, state.high_score, state.game_speed
    );
}
