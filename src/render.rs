//! Rendering: draws the scene to a 2D context.
//!
//! This is the only module that draws with a
//! [`web_sys::CanvasRenderingContext2d`]. It reads the registry (with
//! highlight flags already synced for the frame) and produces pixels; it does
//! not mutate any application state.
//!
//! Each shape is painted on its own. A shape whose `Canvas2D` calls fail is
//! logged and left out of the frame, and the shapes in front of it still paint.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Debug;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{HOVER_ALPHA, SELECTED_LINE_WIDTH, SELECTED_STROKE};
use crate::doc::{Shape, ShapeRegistry};
use crate::path::{PathSink, trace_path};

/// Clear the canvas and paint every shape, back of the registry first so the
/// front shape ends up on top. Returns how many shapes failed to paint.
#[must_use]
pub fn draw(ctx: &CanvasRenderingContext2d, registry: &ShapeRegistry, width: f64, height: f64) -> usize {
    ctx.clear_rect(0.0, 0.0, width, height);
    paint_each(registry, |shape| draw_shape(ctx, shape))
}

/// Run `paint` on every shape back to front, logging each failure and
/// carrying on with the next shape.
fn paint_each<E, F>(registry: &ShapeRegistry, mut paint: F) -> usize
where
    E: Debug,
    F: FnMut(&Shape) -> Result<(), E>,
{
    let mut failed = 0;
    for shape in registry.iter_back_to_front() {
        if let Err(e) = paint(shape) {
            log::warn!("failed to paint shape {}: {e:?}", shape.id);
            failed += 1;
        }
    }
    failed
}

fn draw_shape(ctx: &CanvasRenderingContext2d, shape: &Shape) -> Result<(), JsValue> {
    ctx.save();
    let painted = paint(ctx, shape);
    ctx.restore();
    painted
}

fn paint(ctx: &CanvasRenderingContext2d, shape: &Shape) -> Result<(), JsValue> {
    if let Some(fill) = &shape.fill {
        ctx.set_fill_style_str(fill);
    }
    if shape.hovered {
        ctx.set_global_alpha(HOVER_ALPHA);
    }

    trace_path(shape, &mut Canvas2d(ctx))?;

    if shape.selected {
        ctx.set_line_width(SELECTED_LINE_WIDTH);
        ctx.set_stroke_style_str(SELECTED_STROKE);
        ctx.stroke();
    }
    ctx.fill();
    Ok(())
}

/// [`PathSink`] over a live Canvas2D context.
struct Canvas2d<'a>(&'a CanvasRenderingContext2d);

impl PathSink for Canvas2d<'_> {
    type Error = JsValue;

    fn save(&mut self) {
        self.0.save();
    }

    fn restore(&mut self) {
        self.0.restore();
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.0.translate(x, y)
    }

    fn rotate(&mut self, radians: f64) -> Result<(), JsValue> {
        self.0.rotate(radians)
    }

    fn begin_path(&mut self) {
        self.0.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.0.line_to(x, y);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.0.rect(x, y, width, height);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue> {
        self.0.arc(x, y, radius, start, end)
    }

    fn close_path(&mut self) {
        self.0.close_path();
    }
}
