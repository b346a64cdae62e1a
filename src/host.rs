//! Bridge between the page and the imperative [`Engine`].
//!
//! ARCHITECTURE
//! ============
//! `mount` looks up the canvas, builds the engine behind an
//! `Rc<RefCell<_>>`, and hands clones of it to every DOM callback: pointer
//! listeners on the canvas, click listeners on the toolbar buttons, a
//! `beforeunload` listener that saves the scene, and an animation-frame
//! callback that repaints and reschedules itself. All of them run on the one
//! browser thread and never overlap.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent, Window};

use crate::config::{ButtonIds, SketchConfig};
use crate::engine::Engine;
use crate::input::{Command, UnknownCommand};
use crate::persist::{BlobStore, MemoryStore};

const LOG_LEVEL: log::Level = log::Level::Debug;

/// Error returned when the sketch can't be mounted.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id {0:?}")]
    CanvasNotFound(String),
    #[error("element {0:?} is not a canvas")]
    NotACanvas(String),
    #[error("2d rendering context unavailable")]
    ContextUnavailable,
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<HostError> for JsValue {
    fn from(err: HostError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

fn js_err(value: JsValue) -> HostError {
    HostError::Js(format!("{value:?}"))
}

type SharedEngine = Rc<RefCell<Engine>>;

/// Handle returned to JavaScript after mounting.
#[wasm_bindgen]
pub struct SketchHandle {
    engine: SharedEngine,
}

#[wasm_bindgen]
impl SketchHandle {
    /// Run a toolbar command by name (`rotate-left`, `add-star`, ...).
    ///
    /// # Errors
    ///
    /// Throws if the name isn't a known command.
    pub fn command(&self, name: &str) -> Result<(), JsValue> {
        let command: Command = name
            .parse()
            .map_err(|e: UnknownCommand| JsValue::from(js_sys::Error::new(&e.to_string())))?;
        with_engine(&self.engine, |engine| engine.apply_command(command));
        Ok(())
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, client_x: f64, client_y: f64) {
        with_engine(&self.engine, |engine| engine.on_pointer_down(client_x, client_y));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self) {
        with_engine(&self.engine, Engine::on_pointer_up);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, client_x: f64, client_y: f64) {
        with_engine(&self.engine, |engine| engine.on_pointer_move(client_x, client_y));
    }

    /// Save the scene now instead of waiting for page unload.
    ///
    /// # Errors
    ///
    /// Throws if the scene can't be written to storage.
    pub fn save(&self) -> Result<(), JsValue> {
        let mut engine = self
            .engine
            .try_borrow_mut()
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
        engine
            .save()
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))
    }

    /// Number of shapes in the scene.
    #[wasm_bindgen(js_name = shapeCount)]
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.engine.try_borrow().map_or(0, |engine| engine.shape_count())
    }

    /// Id of the selected shape, if any.
    #[wasm_bindgen(js_name = selectedId)]
    #[must_use]
    pub fn selected_id(&self) -> Option<String> {
        match self.engine.try_borrow() {
            Ok(engine) => engine.selection().map(|id| id.to_string()),
            Err(_) => None,
        }
    }
}

/// Mount the sketch on the canvas with id `canvas_id` using default settings.
///
/// # Errors
///
/// Throws if the canvas or its 2D context can't be obtained.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> Result<SketchHandle, JsValue> {
    Ok(mount_with(canvas_id, &SketchConfig::default())?)
}

/// Mount the sketch with a JSON [`SketchConfig`].
///
/// # Errors
///
/// Throws if the config doesn't parse or the canvas can't be obtained.
#[wasm_bindgen(js_name = mountWithConfig)]
pub fn mount_with_config(canvas_id: &str, config_json: &str) -> Result<SketchHandle, JsValue> {
    let config = SketchConfig::from_json(config_json).map_err(HostError::from)?;
    Ok(mount_with(canvas_id, &config)?)
}

fn mount_with(canvas_id: &str, config: &SketchConfig) -> Result<SketchHandle, HostError> {
    init_logging();

    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let document = window.document().ok_or(HostError::NoDocument)?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| HostError::CanvasNotFound(canvas_id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| HostError::NotACanvas(canvas_id.to_owned()))?;
    let ctx = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or(HostError::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| HostError::ContextUnavailable)?;

    let engine: SharedEngine = Rc::new(RefCell::new(Engine::new(canvas.clone(), ctx, open_store(&window), config)));
    log::info!("sketch mounted on #{canvas_id} ({}x{})", config.width, config.height);

    install_pointer_listeners(&canvas, &engine)?;
    bind_buttons(&document, &config.buttons, &engine)?;
    install_unload_save(&window, &engine)?;
    start_frame_loop(&window, &engine)?;

    Ok(SketchHandle { engine })
}

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(LOG_LEVEL) {
            log::debug!("console logger not installed: {e}");
        }
    });
}

fn open_store(window: &Window) -> Box<dyn BlobStore> {
    match window.local_storage() {
        Ok(Some(storage)) => Box::new(storage),
        Ok(None) => {
            log::warn!("localStorage unavailable; scene will not survive reloads");
            Box::new(MemoryStore::new())
        }
        Err(e) => {
            log::warn!("localStorage blocked ({e:?}); scene will not survive reloads");
            Box::new(MemoryStore::new())
        }
    }
}

/// Run `f` against the engine unless it is already borrowed by another callback.
fn with_engine<F: FnOnce(&mut Engine)>(engine: &SharedEngine, f: F) {
    match engine.try_borrow_mut() {
        Ok(mut engine) => f(&mut *engine),
        Err(e) => log::warn!("engine busy, event dropped: {e}"),
    }
}

// =============================================================
// Listeners
// =============================================================

fn install_pointer_listeners(canvas: &HtmlCanvasElement, engine: &SharedEngine) -> Result<(), HostError> {
    let down = {
        let engine = Rc::clone(engine);
        Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            with_engine(&engine, |engine| {
                engine.on_pointer_down(f64::from(ev.client_x()), f64::from(ev.client_y()));
            });
        })
    };
    let up = {
        let engine = Rc::clone(engine);
        Closure::<dyn FnMut(MouseEvent)>::new(move |_ev: MouseEvent| {
            with_engine(&engine, Engine::on_pointer_up);
        })
    };
    let moved = {
        let engine = Rc::clone(engine);
        Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            with_engine(&engine, |engine| {
                engine.on_pointer_move(f64::from(ev.client_x()), f64::from(ev.client_y()));
            });
        })
    };

    for (event, listener) in [("mousedown", down), ("mouseup", up), ("mousemove", moved)] {
        canvas
            .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            .map_err(js_err)?;
        // Listeners live for the lifetime of the page.
        listener.forget();
    }
    Ok(())
}

fn bind_buttons(document: &Document, buttons: &ButtonIds, engine: &SharedEngine) -> Result<(), HostError> {
    for (id, command) in buttons.bindings() {
        let Some(button) = document.get_element_by_id(id) else {
            log::warn!("no button #{id}; {command} is only reachable via SketchHandle::command");
            continue;
        };
        let engine = Rc::clone(engine);
        let listener = Closure::<dyn FnMut()>::new(move || {
            with_engine(&engine, |engine| engine.apply_command(command));
        });
        button
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .map_err(js_err)?;
        listener.forget();
    }
    Ok(())
}

fn install_unload_save(window: &Window, engine: &SharedEngine) -> Result<(), HostError> {
    let engine = Rc::clone(engine);
    let listener = Closure::<dyn FnMut()>::new(move || {
        with_engine(&engine, |engine| {
            if let Err(e) = engine.save() {
                log::warn!("failed to save scene on unload: {e}");
            }
        });
    });
    window
        .add_event_listener_with_callback("beforeunload", listener.as_ref().unchecked_ref())
        .map_err(js_err)?;
    listener.forget();
    Ok(())
}

// =============================================================
// Frame loop
// =============================================================

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Repaint on every animation frame, forever.
///
/// The callback holds a clone of its own slot so it can reschedule itself.
fn start_frame_loop(window: &Window, engine: &SharedEngine) -> Result<(), HostError> {
    let slot: FrameCallback = Rc::new(RefCell::new(None));
    let slot_for_cb = Rc::clone(&slot);
    let window_for_cb = window.clone();
    let engine = Rc::clone(engine);

    *slot.borrow_mut() = Some(Closure::new(move |_ts: f64| {
        with_engine(&engine, |engine| {
            let failed = engine.render();
            if failed > 0 {
                log::debug!("frame painted with {failed} shapes missing");
            }
        });
        if let Some(cb) = slot_for_cb.borrow().as_ref() {
            if let Err(e) = window_for_cb.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("failed to schedule next frame: {e:?}");
            }
        }
    }));

    let first = slot.borrow();
    let Some(cb) = first.as_ref() else {
        return Ok(());
    };
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(js_err)?;
    Ok(())
}
