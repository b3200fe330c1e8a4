//! Friends Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use friends_snake::audio::{AudioManager, SoundEffect};
    use friends_snake::consts::*;
    use friends_snake::platform::input::{BUTTON_IDS, InputAction, map_button, map_key};
    use friends_snake::platform::offline::register_service_worker;
    use friends_snake::platform::storage::LocalStore;
    use friends_snake::platform::InstallFlow;
    use friends_snake::renderer::{RenderState, scene};
    use friends_snake::{ControlChange, Game, Settings, Tuning};

    /// Everything the DOM callbacks share
    struct App {
        game: Game<LocalStore>,
        render_state: Option<RenderState>,
        audio: AudioManager,
        install: InstallFlow<web_sys::Event>,
        document: Document,
    }

    impl App {
        /// Route an action to the game and mirror the result in audio and labels
        fn apply(&mut self, action: InputAction) {
            if let Some(change) = self.game.handle(action) {
                self.on_control_change(change);
            }
        }

        fn on_control_change(&mut self, change: ControlChange) {
            match change {
                ControlChange::Paused(paused) => {
                    set_text(&self.document, "pauseBtn", if paused { "Resume" } else { "Pause" });
                }
                ControlChange::Muted(muted) => {
                    self.audio.set_muted(muted);
                    set_text(&self.document, "muteBtn", if muted { "Unmute" } else { "Mute" });
                }
            }
        }

        fn frame(&mut self, time: f64) {
            for event in self.game.frame(time) {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }
            self.render();
            self.update_hud();
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = scene::build(&self.game.state);
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            set_text(&self.document, "score", &self.game.state.score.to_string());
            set_text(&self.document, "best", &self.game.state.best.to_string());
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id)
            && el.text_content().as_deref() != Some(text)
        {
            el.set_text_content(Some(text));
        }
    }

    fn set_install_visible(document: &Document, visible: bool) {
        if let Some(btn) = document.get_element_by_id("installBtn") {
            let _ = if visible {
                btn.remove_attribute("hidden")
            } else {
                btn.set_attribute("hidden", "")
            };
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Friends Snake starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no canvas")?
            .dyn_into()?;

        let search = window.location().search().unwrap_or_default();
        let settings = Settings::from_query_with(&search, |raw| {
            js_sys::decode_uri_component(&raw.replace('+', " "))
                .ok()
                .map(String::from)
        });
        let tuning = Tuning::resolve(canvas.get_attribute("data-tuning").as_deref(), &GRID);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let mut game = Game::new(seed, GRID, tuning, LocalStore::open());
        game.set_muted(settings.start_muted);

        // Backing store follows the device pixel ratio; scene stays in logical pixels
        let dpr = window.device_pixel_ratio();
        let width = (CANVAS_WIDTH as f64 * dpr) as u32;
        let height = (CANVAS_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let render_state = match init_gpu(&canvas, width, height).await {
            Ok(state) => Some(state),
            Err(e) => {
                log::error!("Rendering disabled: {}", e);
                None
            }
        };

        let app = Rc::new(RefCell::new(App {
            game,
            render_state,
            audio: AudioManager::new(settings.clone()),
            install: InstallFlow::new(),
            document: document.clone(),
        }));
        if settings.start_muted {
            app.borrow_mut().on_control_change(ControlChange::Muted(true));
        }

        setup_keyboard(app.clone())?;
        setup_buttons(app.clone());
        setup_install(app.clone())?;
        setup_auto_pause(app.clone())?;
        register_service_worker();

        request_animation_frame(app);

        log::info!("Friends Snake running!");
        Ok(())
    }

    async fn init_gpu(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, friends_snake::renderer::RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32),
        )
        .await
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(action) = map_key(&event.key()) else {
                return;
            };
            // Arrow keys would otherwise scroll the page
            event.prevent_default();
            let mut a = app.borrow_mut();
            // First key press counts as the gesture that unlocks audio
            a.audio.init();
            a.apply(action);
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let document = app.borrow().document.clone();
        for id in BUTTON_IDS {
            let (Some(btn), Some(action)) = (document.get_element_by_id(id), map_button(id)) else {
                log::debug!("No control #{}", id);
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.init();
                a.apply(action);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_install(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Browser offers installation: keep the event, reveal the button
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.install.defer(event);
                set_install_visible(&a.document, true);
                log::info!("Install available");
            });
            window.add_event_listener_with_callback(
                "beforeinstallprompt",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        let document = app.borrow().document.clone();
        if let Some(btn) = document.get_element_by_id("installBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                let Some(event) = a.install.take() else {
                    return;
                };
                set_install_visible(&a.document, false);
                let prompt = js_sys::Reflect::get(&event, &"prompt".into())
                    .ok()
                    .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
                match prompt.map(|f| f.call0(&event)) {
                    Some(Ok(_)) => log::info!("Install prompt shown"),
                    Some(Err(e)) => log::warn!("Install prompt failed: {:?}", e),
                    None => log::warn!("Install event has no prompt()"),
                }
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let document = app.borrow().document.clone();

        // Visibility change (tab switch, minimize)
        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut a = app.borrow_mut();
                    if let Some(change) = a.game.pause() {
                        a.on_control_change(change);
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Friends Snake (native) starting...");
    log::info!("The playable build is the web version - run with `trunk serve`");

    println!("\nRunning headless simulation...");
    headless_run(42, 2_000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the game at 60 fps with a greedy food-seeking player
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64, frames: u32) {
    use friends_snake::consts::GRID;
    use friends_snake::platform::{InputAction, MemoryStore};
    use friends_snake::sim::{Direction, GameEvent};
    use friends_snake::{Game, Tuning};

    let mut game = Game::new(seed, GRID, Tuning::default(), MemoryStore::new());
    let (mut meals, mut crashes) = (0u32, 0u32);

    for frame in 0..frames {
        let head = game.state.head();
        let food = game.state.food;
        let want = if food.x != head.x {
            if food.x > head.x { Direction::Right } else { Direction::Left }
        } else if food.y > head.y {
            Direction::Down
        } else {
            Direction::Up
        };
        game.handle(InputAction::Steer(want));

        for event in game.frame(frame as f64 * 1000.0 / 60.0) {
            match event {
                GameEvent::Ate { .. } => meals += 1,
                GameEvent::Crashed(_) => crashes += 1,
                _ => {}
            }
        }
    }

    println!(
        "✓ {} frames, {} steps: {} meals, {} crashes, score {}, best {}",
        frames, game.state.steps, meals, crashes, game.state.score, game.state.best
    );
}
