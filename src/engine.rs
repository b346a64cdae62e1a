use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::SketchConfig;
use crate::consts::{ROTATE_STEP_DEG, SCALE_STEP};
use crate::doc::{Geometry, Shape, ShapeId, ShapeKind, ShapeRegistry};
use crate::hit;
use crate::input::{Command, InputState};
use crate::persist::{self, BlobStore, PersistError};
use crate::render;
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Core engine state: the registry and the interaction controller.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub registry: ShapeRegistry,
    pub input: InputState,
    /// Canvas bitmap width in pixels.
    pub width: f64,
    /// Canvas bitmap height in pixels.
    pub height: f64,
}

impl EngineCore {
    /// An empty scene on a canvas of the given bitmap size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { registry: ShapeRegistry::new(), input: InputState::default(), width, height }
    }

    // --- Data inputs ---

    /// Replace the scene with `shapes`, listed front to back.
    ///
    /// Every controller reference is dropped since none of them can refer to
    /// the new shapes.
    pub fn load_scene(&mut self, shapes: Vec<Shape>) {
        self.registry.replace_all(shapes);
        self.input.clear();
    }

    // --- Pointer events ---

    /// Press at `pt`: select, grab and raise the topmost shape there, or
    /// clear the selection when the press lands on empty canvas.
    pub fn on_pointer_down(&mut self, pt: Point) {
        self.input.pointer_down = true;
        match hit::shape_at(&self.registry, pt) {
            Some(id) => {
                self.registry.bring_to_front(&id);
                self.input.selected = Some(id);
                self.input.pressed = Some(id);
            }
            None => {
                self.input.selected = None;
                self.input.pressed = None;
            }
        }
    }

    /// Release: drop the grabbed shape. The selection stays.
    pub fn on_pointer_up(&mut self) {
        self.input.pointer_down = false;
        self.input.pressed = None;
    }

    /// Track hover at `pt`, and while a shape is grabbed snap its center to `pt`.
    pub fn on_pointer_move(&mut self, pt: Point) {
        self.input.hovered = hit::shape_at(&self.registry, pt);

        if !self.input.pointer_down {
            return;
        }
        let Some(id) = self.input.pressed else {
            return;
        };
        if let Some(shape) = self.registry.get_mut(&id) {
            shape.set_center(pt.x, pt.y);
        }
    }

    // --- Commands ---

    /// Run a toolbar command.
    pub fn apply_command(&mut self, command: Command) {
        log::debug!("command {command}");
        match command {
            Command::RotateLeft => self.rotate_left(),
            Command::RotateRight => self.rotate_right(),
            Command::ScaleUp => self.scale_up(),
            Command::ScaleDown => self.scale_down(),
            Command::Add(kind) => {
                self.add_shape(kind);
            }
        }
    }

    pub fn rotate_left(&mut self) {
        if let Some(shape) = self.selected_mut() {
            shape.rotate(-ROTATE_STEP_DEG);
        }
    }

    pub fn rotate_right(&mut self) {
        if let Some(shape) = self.selected_mut() {
            shape.rotate(ROTATE_STEP_DEG);
        }
    }

    pub fn scale_up(&mut self) {
        if let Some(shape) = self.selected_mut() {
            shape.scale_by(SCALE_STEP);
        }
    }

    pub fn scale_down(&mut self) {
        if let Some(shape) = self.selected_mut() {
            shape.scale_by(-SCALE_STEP);
        }
    }

    /// Insert a default-sized shape of `kind` at the canvas center, on top of everything.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ShapeId {
        let shape = Shape::new(self.canvas_center(), Geometry::default_for(kind));
        let id = shape.id;
        self.registry.insert_front(shape);
        id
    }

    // --- Frame ---

    /// Copy the controller's hover and selection onto each shape's highlight flags.
    pub fn sync_highlights(&mut self) {
        let InputState { hovered, selected, .. } = self.input;
        for shape in self.registry.iter_mut().rev() {
            shape.hovered = hovered == Some(shape.id);
            shape.selected = selected == Some(shape.id);
        }
    }

    // --- Queries ---

    /// The currently selected shape id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.input.selected
    }

    /// The shape under the pointer at the last move, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<ShapeId> {
        self.input.hovered
    }

    /// The shape being dragged, if any.
    #[must_use]
    pub fn pressed(&self) -> Option<ShapeId> {
        self.input.pressed
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.registry.get(id)
    }

    #[must_use]
    pub fn canvas_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    fn selected_mut(&mut self) -> Option<&mut Shape> {
        let id = self.input.selected?;
        self.registry.get_mut(&id)
    }
}

/// The full sketch engine. Wraps `EngineCore` and owns the browser canvas,
/// its 2D context and the store the scene is saved to.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    store: Box<dyn BlobStore>,
    storage_key: String,
    pub core: EngineCore,
}

impl Engine {
    /// Size the canvas per `config` and load the saved scene from `store`.
    #[must_use]
    pub fn new(
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        store: Box<dyn BlobStore>,
        config: &SketchConfig,
    ) -> Self {
        canvas.set_width(config.width);
        canvas.set_height(config.height);

        let mut core = EngineCore::new(f64::from(config.width), f64::from(config.height));
        core.load_scene(persist::load_scene(store.as_ref(), &config.storage_key));

        Self { canvas, ctx, store, storage_key: config.storage_key.clone(), core }
    }

    // --- Input events (client coordinates) ---

    pub fn on_pointer_down(&mut self, client_x: f64, client_y: f64) {
        let pt = self.viewport().client_to_canvas(client_x, client_y);
        self.core.on_pointer_down(pt);
    }

    pub fn on_pointer_up(&mut self) {
        self.core.on_pointer_up();
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
        let pt = self.viewport().client_to_canvas(client_x, client_y);
        self.core.on_pointer_move(pt);
    }

    pub fn apply_command(&mut self, command: Command) {
        self.core.apply_command(command);
    }

    // --- Render ---

    /// Refresh highlight flags and repaint the whole canvas. Returns how many
    /// shapes failed to paint this frame.
    pub fn render(&mut self) -> usize {
        self.core.sync_highlights();
        render::draw(&self.ctx, &self.core.registry, self.core.width, self.core.height)
    }

    // --- Persistence ---

    /// Write the whole scene to the store, replacing the previous save.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the store rejects the write.
    pub fn save(&mut self) -> Result<(), PersistError> {
        persist::save_scene(self.store.as_mut(), &self.storage_key, &self.core.registry)
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.core.selection()
    }

    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.core.registry.len()
    }

    fn viewport(&self) -> Viewport {
        let rect = self.canvas.get_bounding_client_rect();
        Viewport {
            bitmap_width: f64::from(self.canvas.width()),
            bitmap_height: f64::from(self.canvas.height()),
            rect_left: rect.left(),
            rect_top: rect.top(),
            rect_width: rect.width(),
            rect_height: rect.height(),
        }
    }
}
