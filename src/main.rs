//! Arc Chime entry point
//!
//! Wires the engine to the browser: canvas sizing, the animation-frame
//! chain, the growth poll interval, and input/visibility events.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use arc_chime::audio::AudioManager;
    use arc_chime::consts::GROWTH_POLL_MS;
    use arc_chime::render::CanvasSurface;
    use arc_chime::{Engine, Settings};

    /// App instance holding all state
    struct App {
        engine: Engine,
        surface: CanvasSurface,
        audio: AudioManager,
        /// Growth poll interval handle, cleared on shutdown
        poll_handle: Option<i32>,
    }

    impl App {
        /// Run one frame against the wall clock
        fn frame(&mut self) {
            let now_ms = js_sys::Date::now();
            self.engine.frame(&mut self.surface, &self.audio, now_ms);
        }

        /// Resize the canvas backing store to its displayed size
        fn fit_canvas(&self, canvas: &HtmlCanvasElement, dpr: f64) {
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            self.surface.set_size(width, height);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Arc Chime starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

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

        let settings = Settings::load();
        let now_ms = js_sys::Date::now();
        let seed = now_ms as u64;
        let engine = Engine::new(settings, width as f64, height as f64, now_ms, seed)
            .expect("invalid settings");

        let surface = CanvasSurface::new(canvas.clone()).expect("no 2d context");
        let audio = AudioManager::new();

        let app = Rc::new(RefCell::new(App {
            engine,
            surface,
            audio,
            poll_handle: None,
        }));

        log::info!("Engine initialized with seed: {}", seed);

        setup_input_handlers(&canvas, app.clone());
        setup_visibility_handler(app.clone());
        setup_resize_handler(&canvas, app.clone());
        setup_growth_poll(app.clone());

        request_animation_frame(app);

        log::info!("Arc Chime running! Click to toggle sound, press R to restart.");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Click toggles sound (and satisfies the user-gesture requirement
        // for starting the audio context)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                let enabled = a.engine.toggle_sound();
                a.audio.set_muted(!enabled);
                if enabled {
                    a.audio.resume();
                }
                log::info!("Sound {}", if enabled { "enabled" } else { "disabled" });
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                match event.key().as_str() {
                    "r" | "R" => {
                        app.borrow_mut().engine.reset();
                        log::info!("Restarting");
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Disable sound whenever the tab is hidden
    fn setup_visibility_handler(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut a = app.borrow_mut();
                a.engine.set_sound_enabled(false);
                a.audio.set_muted(true);
                log::info!("Sound disabled (tab hidden)");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Keep the canvas backing store matched to its displayed size; the
    /// engine re-derives layout from the surface on every frame
    fn setup_resize_handler(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            app.borrow().fit_canvas(&canvas, dpr);
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// The admission check runs on its own fixed-interval timer, outside the
    /// frame loop; it only queues work that frames drain later
    fn setup_growth_poll(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let app_for_tick = app.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut a = app_for_tick.borrow_mut();
            if !a.engine.is_running() {
                // stop the timer once the engine is cancelled
                if let Some(handle) = a.poll_handle.take() {
                    if let Some(window) = web_sys::window() {
                        window.clear_interval_with_handle(handle);
                    }
                }
                return;
            }
            a.engine.poll_growth(js_sys::Date::now());
        });
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                GROWTH_POLL_MS,
            )
            .ok();
        app.borrow_mut().poll_handle = handle;
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if !a.engine.is_running() {
                // cancelled: stop scheduling further frames
                return;
            }
            a.frame();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Arc Chime (native) starting...");
    log::info!("The visualization targets the browser - run with `trunk serve` for the web build");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
