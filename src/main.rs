//! Frigate Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use frigate_hop::highscores::{self, HighScores};
    use frigate_hop::renderer::{DrawList, RenderState, TextSlot};
    use frigate_hop::sim::{Direction, Game, GameEvent, SurfaceSize};
    use frigate_hop::Settings;

    /// Browser-side state around the simulation
    struct Host {
        game: Game,
        render_state: Option<RenderState>,
        frame: DrawList,
        high_scores: HighScores,
        canvas: HtmlCanvasElement,
        /// Pending requestAnimationFrame id
        raf_id: Option<i32>,
        /// Pending setTimeout id for the next deferred task
        timer_id: Option<i32>,
        /// Canvas pixels per CSS pixel
        dpr: f64,
    }

    type Shared = Rc<RefCell<Host>>;

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(id: &str, visible: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    impl Host {
        /// Canvas size in device pixels
        fn measure(&mut self) -> SurfaceSize {
            if let Some(window) = web_sys::window() {
                self.dpr = window.device_pixel_ratio();
            }
            let width = (self.canvas.client_width() as f64 * self.dpr) as u32;
            let height = (self.canvas.client_height() as f64 * self.dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            SurfaceSize::new(width as f32, height as f32)
        }

        fn start(&mut self) {
            let size = self.measure();
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(size.width as u32, size.height as u32);
            }
            self.game.resize(size);
            self.game.start(js_sys::Date::now());

            set_visible("start-screen", false);
            set_visible("game-over", false);
            set_visible("hud", true);
            self.apply_events();
        }

        fn stop(&mut self) {
            self.game.stop();
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(id) = self.raf_id.take() {
                let _ = window.cancel_animation_frame(id);
            }
            if let Some(id) = self.timer_id.take() {
                window.clear_timeout_with_handle(id);
            }
        }

        fn render(&mut self, now: f64) {
            self.frame.clear();
            self.game.frame(now, &mut self.frame);
            if !self.frame.vertices().is_empty() {
                if let Some(ref mut render_state) = self.render_state {
                    match render_state.render(&self.frame) {
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
                self.update_overlay();
            }
            self.apply_events();
        }

        /// Position the HUD and banner text recorded this frame
        fn update_overlay(&self) {
            let slots = [
                (TextSlot::Level, "hud-level"),
                (TextSlot::Rows, "hud-rows"),
                (TextSlot::Banner, "level-banner"),
            ];
            let Some(document) = document() else {
                return;
            };
            for (slot, id) in slots {
                let Some(el) = document
                    .get_element_by_id(id)
                    .and_then(|e| e.dyn_into::<HtmlElement>().ok())
                else {
                    continue;
                };
                let style = el.style();
                match self.frame.text(slot) {
                    Some(item) => {
                        el.set_text_content(Some(&item.text));
                        let css = |px: f32| format!("{}px", px as f64 / self.dpr);
                        let _ = style.set_property("display", "block");
                        let _ = style.set_property("left", &css(item.pos.x));
                        let _ = style.set_property("top", &css(item.pos.y));
                        let _ = style.set_property("font-size", &css(item.px));
                        let _ = style.set_property("opacity", &item.alpha.to_string());
                    }
                    None => {
                        let _ = style.set_property("display", "none");
                    }
                }
            }
        }

        /// Reflect simulation events in the DOM
        fn apply_events(&mut self) {
            for event in self.game.drain_events() {
                match event {
                    GameEvent::ScoreChanged(score) => set_text("score-value", &score.to_string()),
                    GameEvent::LevelCleared(level) => log::debug!("Level {} cleared", level),
                    GameEvent::LevelStarted(level) => log::debug!("Level {} on screen", level),
                    GameEvent::GameOver { score, level } => {
                        let now = js_sys::Date::now();
                        if let Some(rank) = self.high_scores.add_score(score, level, now) {
                            log::info!("New high score #{}", rank);
                            self.high_scores.save();
                        }
                        set_text("final-score", &score.to_string());
                        set_text("final-level", &level.to_string());
                        self.show_high_scores();
                        set_visible("game-over", true);
                        self.stop();
                    }
                }
            }
        }

        fn show_high_scores(&self) {
            let Some(document) = document() else {
                return;
            };
            let Some(list) = document.get_element_by_id("high-scores") else {
                return;
            };
            list.set_inner_html("");
            if self.high_scores.is_empty() {
                list.set_text_content(Some("No scores yet. Be the first!"));
                return;
            }
            for (i, entry) in self.high_scores.entries.iter().enumerate() {
                if let Ok(row) = document.create_element("li") {
                    row.set_text_content(Some(&format!(
                        "#{} {} pts (level {}) {}",
                        i + 1,
                        entry.score,
                        entry.level,
                        highscores::format_date(entry.timestamp)
                    )));
                    let _ = list.append_child(&row);
                }
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Frigate Hop starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        set_visible("loading", false);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let host = Rc::new(RefCell::new(Host {
            game: Game::with_settings(seed, SurfaceSize::BASE, Settings::load()),
            render_state: None,
            frame: DrawList::new(),
            high_scores: HighScores::load(),
            canvas: canvas.clone(),
            raf_id: None,
            timer_id: None,
            dpr: window.device_pixel_ratio(),
        }));
        let size = host.borrow_mut().measure();
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, size.width as u32, size.height as u32)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {}", e)))?;
        host.borrow_mut().render_state = Some(render_state);

        host.borrow().show_high_scores();
        set_visible("start-screen", true);

        setup_keyboard(host.clone());
        setup_touch_controls(host.clone());
        setup_buttons(host.clone());
        setup_page_lifecycle(host);

        log::info!("Frigate Hop ready");
        Ok(())
    }

    /// Feed one move to the game and keep the host in sync
    fn apply_move(host: &Shared, direction: Direction) {
        {
            let mut h = host.borrow_mut();
            h.game.handle_input(direction, js_sys::Date::now());
            h.apply_events();
        }
        schedule_timer(host.clone());
    }

    fn setup_keyboard(host: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let handled = {
                let mut h = host.borrow_mut();
                if !h.game.is_running() {
                    return;
                }
                let handled = h.game.handle_key(&event.key(), js_sys::Date::now());
                h.apply_events();
                handled
            };
            if handled {
                // Arrow keys would scroll the page
                event.prevent_default();
                schedule_timer(host.clone());
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch_controls(host: Shared) {
        let Some(document) = document() else {
            return;
        };
        let buttons = [
            ("touch-up", Direction::Up),
            ("touch-down", Direction::Down),
            ("touch-left", Direction::Left),
            ("touch-right", Direction::Right),
        ];
        for (id, direction) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };

            {
                let host = host.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    apply_move(&host, direction);
                });
                let _ = btn
                    .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            {
                let host = host.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    apply_move(&host, direction);
                });
                let _ = btn
                    .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_buttons(host: Shared) {
        let Some(document) = document() else {
            return;
        };
        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                {
                    let mut h = host.borrow_mut();
                    h.stop();
                    h.start();
                }
                request_animation_frame(host.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_page_lifecycle(host: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            host.borrow_mut().stop();
            log::info!("Page hidden, loop stopped");
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(host: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let next = host.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(next);
        });
        if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            host.borrow_mut().raf_id = Some(id);
        }
        closure.forget();
    }

    fn game_loop(host: Shared) {
        let running = {
            let mut h = host.borrow_mut();
            h.raf_id = None;
            h.render(js_sys::Date::now());
            h.game.is_running()
        };

        if running {
            schedule_timer(host.clone());
            request_animation_frame(host);
        }
    }

    /// Arm a one-shot timeout for the next deferred task so it lands on time
    /// even between two paints
    fn schedule_timer(host: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let due = {
            let h = host.borrow();
            if h.timer_id.is_some() {
                return;
            }
            match h.game.next_timer_due() {
                Some(due) => due,
                None => return,
            }
        };
        let delay = (due - js_sys::Date::now()).max(0.0).ceil() as i32;

        let next = host.clone();
        let closure = Closure::once(move || {
            {
                let mut h = next.borrow_mut();
                h.timer_id = None;
                h.game.poll_timers(js_sys::Date::now());
                h.apply_events();
            }
            schedule_timer(next);
        });
        if let Ok(id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay,
        ) {
            host.borrow_mut().timer_id = Some(id);
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Frigate Hop (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let max_frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 120);

    autopilot::run(seed, max_frames);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run with a simple look-ahead pilot, drawn into a `DrawList`
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use frigate_hop::consts::MOVE_STEP;
    use frigate_hop::renderer::DrawList;
    use frigate_hop::sim::{Direction, Game, GameEvent, Obstacle, SurfaceSize, collision};
    use frigate_hop::HighScores;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frames between pilot decisions
    const DECISION_FRAMES: u64 = 8;

    /// Preferred move that stays clear of every hazard now and one decision
    /// later. `None` means holding position is best.
    fn choose_move(game: &Game) -> Option<Direction> {
        let scaler = game.scaler();
        let width = scaler.surface().width;
        let step = scaler.x(MOVE_STEP);
        let ahead: Vec<Obstacle> = game
            .obstacles()
            .iter()
            .map(|o| {
                let mut o = o.clone();
                for _ in 0..DECISION_FRAMES {
                    o.advance(width);
                }
                o
            })
            .collect();

        let safe = |direction: Option<Direction>| {
            let mut vessel = game.vessel().clone();
            if let Some(direction) = direction {
                vessel.apply_move(direction, step, scaler.playfield());
            }
            collision::first_hit(&vessel, game.obstacles(), scaler).is_none()
                && collision::first_hit(&vessel, &ahead, scaler).is_none()
        };

        [
            Some(Direction::Up),
            None,
            Some(Direction::Left),
            Some(Direction::Right),
            Some(Direction::Down),
        ]
        .into_iter()
        .find(|d| safe(*d))
        .flatten()
    }

    pub fn run(seed: u64, max_frames: u64) {
        let mut game = Game::new(seed, SurfaceSize::BASE);
        let mut frame = DrawList::new();
        let mut high_scores = HighScores::new();
        let mut now = 0.0;
        let mut vertices = 0usize;

        game.start(now);
        for n in 0..max_frames {
            now += FRAME_MS;
            if n % DECISION_FRAMES == 0 {
                if let Some(direction) = choose_move(&game) {
                    game.handle_input(direction, now);
                }
            }

            frame.clear();
            game.frame(now, &mut frame);
            vertices += frame.vertices().len();

            for event in game.drain_events() {
                match event {
                    GameEvent::LevelStarted(level) => log::info!("Autopilot reached level {}", level),
                    GameEvent::GameOver { score, level } => {
                        if let Some(rank) = high_scores.add_score(score, level, now) {
                            log::info!("Run ranked #{}", rank);
                        }
                    }
                    _ => {}
                }
            }

            if !game.is_running() {
                break;
            }
        }
        game.stop();

        log::info!(
            "Autopilot finished: score {}, level {}, {:.1}s simulated, {} vertices drawn",
            game.score(),
            game.level(),
            now / 1000.0,
            vertices
        );
        println!("seed {} -> score {} on level {}", seed, game.score(), game.level());
    }
}
