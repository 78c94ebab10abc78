//! Cube Intercept entry point
//!
//! Hosts the simulation: polls input, ticks, presents, repeats. Native
//! builds play in the terminal; the web build draws with WebGPU.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use anyhow::{Context, Result, anyhow};
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use cube_intercept::Settings;
    use cube_intercept::consts::*;
    use cube_intercept::renderer::RenderState;
    use cube_intercept::sim::{
        Clock, Control, FixedStep, InputEvent, Key, ManualClock, Outcome, SimulationState,
        apply_all, draw_list, tick,
    };

    /// Game instance holding all state
    struct Game {
        state: SimulationState,
        render_state: Option<RenderState>,
        clock: ManualClock,
        steps: FixedStep,
        /// Events delivered by DOM listeners, drained once per frame
        events: VecDeque<InputEvent>,
        finished: bool,
    }

    impl Game {
        fn new(settings: Settings, now_ms: f64) -> Self {
            let clock = ManualClock::new(now_ms as u64);
            let steps = FixedStep::new(settings.tick_ms, MAX_SUBSTEPS, now_ms);
            Self {
                state: SimulationState::new(settings, clock.now_ms()),
                render_state: None,
                clock,
                steps,
                events: VecDeque::new(),
                finished: false,
            }
        }

        /// Drain input, then run fixed ticks for the elapsed time
        fn update(&mut self, time: f64) -> Option<Outcome> {
            self.clock.set(time as u64);

            let pending: Vec<InputEvent> = self.events.drain(..).collect();
            if apply_all(&mut self.state, pending) == Control::Quit {
                self.finished = true;
                return None;
            }

            for _ in 0..self.steps.advance(time) {
                if let Some(outcome) = tick(&mut self.state, &self.clock) {
                    return Some(outcome);
                }
            }
            None
        }

        /// Render the current frame
        fn render(&mut self) {
            let commands = draw_list(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&commands) {
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
    }

    /// Browser key names to game events
    fn map_key(key: &str) -> Option<InputEvent> {
        match key {
            "ArrowLeft" => Some(InputEvent::KeyDown(Key::Left)),
            "ArrowRight" => Some(InputEvent::KeyDown(Key::Right)),
            " " => Some(InputEvent::KeyDown(Key::Fire)),
            "Escape" => Some(InputEvent::Quit),
            _ => None,
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub async fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| anyhow!("Failed to init logger: {e}"))?;

        log::info!("Cube Intercept starting...");

        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;
        document.set_title(WINDOW_TITLE);

        let settings = Settings::default();
        let playfield = (settings.screen_width, settings.screen_height);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .context("no canvas")?
            .dyn_into()
            .map_err(|_| anyhow!("#canvas is not a canvas element"))?;

        // Canvas backing store at device resolution
        let dpr = window.device_pixel_ratio();
        let width = (f64::from(playfield.0) * dpr) as u32;
        let height = (f64::from(playfield.1) * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| anyhow!("Failed to create surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("Failed to get adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, playfield).await?;

        let game = Rc::new(RefCell::new(Game::new(settings, now_ms())));
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Cube Intercept running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = map_key(event.key().as_str()) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                    game.borrow_mut().events.push_back(input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Page going away counts as closing the window
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().events.push_back(InputEvent::Quit);
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        let outcome = {
            let mut g = game.borrow_mut();
            let outcome = g.update(time);
            g.render();
            outcome
        };

        if let Some(outcome) = outcome {
            log::info!("Session over: {:?}", outcome);
            if let Some(window) = web_sys::window() {
                let text = format!("{}\n\n{}", outcome.title(), outcome.message());
                let _ = window.alert_with_message(&text);
            }
            return;
        }

        if game.borrow().finished {
            log::info!("Quit");
            return;
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:#}", e);
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&format!("Startup failed: {e:#}"));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::io::{BufWriter, stdout};
    use std::thread;
    use std::time::Duration;

    use anyhow::{Context, Result};

    use cube_intercept::Settings;
    use cube_intercept::sim::{
        Clock, Control, MonotonicClock, Outcome, SimulationState, apply_all, draw_list, tick,
    };
    use cube_intercept::terminal::{self, EventSource, TerminalGuard};

    /// Play one session; `None` means the player quit
    pub fn run() -> Result<Option<Outcome>> {
        let settings = Settings::default();
        let playfield = (settings.screen_width, settings.screen_height);
        let delay = Duration::from_millis(settings.tick_ms);

        let _guard = TerminalGuard::enter()?;
        let mut out = BufWriter::new(stdout());
        let events = EventSource::spawn();

        let clock = MonotonicClock::new();
        let mut state = SimulationState::new(settings, clock.now_ms());
        log::info!("Session started on a {}x{} playfield", playfield.0, playfield.1);

        loop {
            if apply_all(&mut state, events.poll()) == Control::Quit {
                return Ok(None);
            }

            let outcome = tick(&mut state, &clock);

            terminal::render(&mut out, &draw_list(&state), playfield)
                .context("Failed to draw frame")?;

            if let Some(outcome) = outcome {
                log::info!("Session over: {:?}", outcome);
                terminal::show_outcome(&mut out, outcome)
                    .context("Failed to show result")?;
                events.wait_key();
                return Ok(Some(outcome));
            }

            thread::sleep(delay);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Cube Intercept (native) starting...");

    match native_game::run() {
        Ok(Some(outcome)) => {
            log::info!("{}: {}", outcome.title(), outcome.message());
            std::process::ExitCode::SUCCESS
        }
        Ok(None) => {
            log::info!("Quit");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("cube-intercept: {e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}
