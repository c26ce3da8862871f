use constellation_core::config::{EdgeStrategy, FieldConfig};
use constellation_core::engine::Engine;
use constellation_core::error::SurfaceError;
use constellation_core::field::Field;
use constellation_core::palette::Theme;
use constellation_core::particle::ParticleInstance;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, MouseEvent, Window};

mod host;
mod surface;

use host::RafHost;
use surface::{page_background, Surface};

/// Everything that exists only while a canvas was found.
struct Live {
    window: Window,
    engine: Engine<i32>,
    host: RafHost,
    surface: Surface,
    listeners: Option<Listeners>,
}

/// Window listeners, kept so `stop()` can detach them.
struct Listeners {
    resize: Closure<dyn FnMut(web_sys::Event)>,
    mouse_move: Closure<dyn FnMut(MouseEvent)>,
    mouse_out: Closure<dyn FnMut(web_sys::Event)>,
}

/// Interactive particle background bound to a `<canvas>` element.
///
/// If the canvas is missing the handle still constructs, logs an error and
/// every method becomes a no-op.
#[wasm_bindgen]
pub struct ParticleBackground {
    live: Option<Rc<RefCell<Live>>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> ParticleBackground {
        console_error_panic_hook::set_once();

        match create_live(canvas_id) {
            Ok(live) => ParticleBackground { live: Some(live) },
            Err(err) => {
                console::error_1(&format!("ParticleBackground: {err}").into());
                ParticleBackground { live: None }
            }
        }
    }

    /// Size the canvas, seed the population, attach listeners and start the loop.
    ///
    /// Calling it again restarts the loop rather than starting a second one.
    #[wasm_bindgen]
    pub fn init(&mut self) {
        let Some(live) = &self.live else { return };

        {
            let mut guard = live.borrow_mut();
            let Live {
                window,
                engine,
                surface,
                ..
            } = &mut *guard;
            let size = surface.fit_to_window(window);
            let field = engine.field_mut();
            field.set_background(page_background(window));
            let count = field.resize(size.x, size.y);
            console::log_1(
                &format!(
                    "ParticleBackground initialized: {}x{}, {} particles",
                    size.x, size.y, count
                )
                .into(),
            );
        }

        if let Err(err) = attach_listeners(live) {
            console::error_1(&format!("ParticleBackground: {err}").into());
        }

        let mut guard = live.borrow_mut();
        let Live { engine, host, .. } = &mut *guard;
        if let Err(err) = engine.start(host) {
            console::error_1(&format!("ParticleBackground: {err}").into());
        }
    }

    /// Switch palettes; takes effect on the next frame.
    #[wasm_bindgen]
    pub fn update_theme(&mut self, theme: &str) {
        let Some(live) = &self.live else { return };
        let theme = match Theme::parse(theme) {
            Ok(theme) => theme,
            Err(err) => {
                console::warn_1(&format!("ParticleBackground: {err}").into());
                return;
            }
        };
        let mut guard = live.borrow_mut();
        let Live { window, engine, .. } = &mut *guard;
        let field = engine.field_mut();
        field.set_theme(theme);
        field.set_background(page_background(window));
    }

    /// Cancel the loop and detach listeners. Safe to call repeatedly.
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        let Some(live) = &self.live else { return };
        let Ok(mut guard) = live.try_borrow_mut() else { return };
        let Live {
            window,
            engine,
            host,
            listeners,
            ..
        } = &mut *guard;
        engine.stop(host);
        if let Some(listeners) = listeners.take() {
            detach_listeners(window, &listeners);
        }
    }

    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.with_engine(|e| e.scheduler().is_running())
            .unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.with_engine(|e| e.field().particle_count()).unwrap_or(0)
    }

    #[wasm_bindgen]
    pub fn steady_count(&self) -> usize {
        self.with_engine(|e| e.field().steady_count()).unwrap_or(0)
    }

    #[wasm_bindgen]
    pub fn trail_count(&self) -> usize {
        self.with_engine(|e| e.field().trail_count()).unwrap_or(0)
    }

    #[wasm_bindgen]
    pub fn frame_count(&self) -> f64 {
        self.with_engine(|e| e.scheduler().frame_count() as f64)
            .unwrap_or(0.0)
    }

    #[wasm_bindgen]
    pub fn set_field_config(
        &mut self,
        pointer_radius: f32,
        connect_distance: f32,
        density_divisor: f32,
        max_speed: f32,
        use_grid: bool,
    ) {
        let Some(live) = &self.live else { return };
        let mut guard = live.borrow_mut();
        let field = guard.engine.field_mut();
        let config = FieldConfig {
            pointer_radius,
            connect_distance,
            density_divisor,
            max_speed,
            edge_strategy: if use_grid {
                EdgeStrategy::Grid
            } else {
                EdgeStrategy::Pairwise
            },
            ..field.config().clone()
        };
        if let Err(err) = field.set_config(config) {
            console::warn_1(&format!("ParticleBackground: ignoring config: {err}").into());
        }
    }

    /// Refresh the instance buffer and return its address in wasm memory.
    /// Valid until the next frame.
    #[wasm_bindgen]
    pub fn snapshot_ptr(&mut self) -> *const f32 {
        let Some(live) = &self.live else {
            return std::ptr::null();
        };
        let mut guard = live.borrow_mut();
        guard.engine.field_mut().snapshot().as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn snapshot_byte_length(&self) -> usize {
        self.with_engine(|e| e.field().particle_count() * std::mem::size_of::<ParticleInstance>())
            .unwrap_or(0)
    }
}

// `free()` from JS drops the last strong reference; the browser must not keep
// a queued frame or listeners pointing at the closures owned by `Live`.
impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.stop();
    }
}

impl ParticleBackground {
    fn with_engine<T>(&self, f: impl FnOnce(&Engine<i32>) -> T) -> Option<T> {
        let live = self.live.as_ref()?;
        let guard = live.try_borrow().ok()?;
        Some(f(&guard.engine))
    }
}

fn create_live(canvas_id: &str) -> Result<Rc<RefCell<Live>>, SurfaceError> {
    let window = web_sys::window().ok_or(SurfaceError::MissingWindow)?;
    let surface = Surface::find(&window, canvas_id)?;
    // Not reproducible in the browser, so any entropy will do.
    let seed = random_seed();
    let field = Field::new(FieldConfig::default(), seed)
        .map_err(|err| SurfaceError::Registration(err.to_string()))?;

    let live = Rc::new(RefCell::new(Live {
        host: RafHost::new(window.clone()),
        window,
        engine: Engine::new(field),
        surface,
        listeners: None,
    }));

    let weak = Rc::downgrade(&live);
    let frame = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| run_frame(&weak));
    live.borrow_mut().host.set_callback(frame);

    Ok(live)
}

fn run_frame(weak: &Weak<RefCell<Live>>) {
    let Some(live) = weak.upgrade() else { return };
    let Ok(mut guard) = live.try_borrow_mut() else { return };
    let Live {
        engine,
        host,
        surface,
        ..
    } = &mut *guard;
    // A cancelled request leaves no ticket behind
    let Some(ticket) = host.take_ticket() else { return };
    if let Err(err) = engine.on_frame(ticket, host, surface) {
        console::error_1(&format!("ParticleBackground: frame loop stopped: {err}").into());
    }
}

fn random_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => js_sys::Date::now().to_bits(),
    }
}

fn attach_listeners(live: &Rc<RefCell<Live>>) -> Result<(), SurfaceError> {
    if live.borrow().listeners.is_some() {
        return Ok(());
    }

    let weak = Rc::downgrade(live);
    let resize = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        let Some(live) = weak.upgrade() else { return };
        let Ok(mut guard) = live.try_borrow_mut() else { return };
        let Live {
            window,
            engine,
            surface,
            ..
        } = &mut *guard;
        let size = surface.fit_to_window(window);
        let count = engine.field_mut().resize(size.x, size.y);
        console::log_1(
            &format!("ParticleBackground resized: {}x{}, {} particles", size.x, size.y, count)
                .into(),
        );
    });

    let weak = Rc::downgrade(live);
    let mouse_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let Some(live) = weak.upgrade() else { return };
        let Ok(mut guard) = live.try_borrow_mut() else { return };
        guard
            .engine
            .field_mut()
            .pointer_moved(event.client_x() as f32, event.client_y() as f32);
    });

    let weak = Rc::downgrade(live);
    let mouse_out = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        let Some(live) = weak.upgrade() else { return };
        let Ok(mut guard) = live.try_borrow_mut() else { return };
        guard.engine.field_mut().pointer_left();
    });

    let listeners = Listeners {
        resize,
        mouse_move,
        mouse_out,
    };
    let mut guard = live.borrow_mut();
    let result = register_listeners(&guard.window, &listeners);
    // Stored even on failure so stop() detaches whatever did get attached
    guard.listeners = Some(listeners);
    result
}

fn register_listeners(window: &Window, listeners: &Listeners) -> Result<(), SurfaceError> {
    let add = |name: &str, f: &js_sys::Function| {
        window
            .add_event_listener_with_callback(name, f)
            .map_err(|_| SurfaceError::Registration(format!("{name} listener")))
    };
    add("resize", listeners.resize.as_ref().unchecked_ref())?;
    add("mousemove", listeners.mouse_move.as_ref().unchecked_ref())?;
    add("mouseout", listeners.mouse_out.as_ref().unchecked_ref())?;
    Ok(())
}

fn detach_listeners(window: &Window, listeners: &Listeners) {
    let _ = window
        .remove_event_listener_with_callback("resize", listeners.resize.as_ref().unchecked_ref());
    let _ = window.remove_event_listener_with_callback(
        "mousemove",
        listeners.mouse_move.as_ref().unchecked_ref(),
    );
    let _ = window.remove_event_listener_with_callback(
        "mouseout",
        listeners.mouse_out.as_ref().unchecked_ref(),
    );
}
