//! Path construction: turns a shape's transform and geometry into a closed outline.
//!
//! [`trace_path`] is the single place that knows how each variant's outline is
//! built. It writes into any [`PathSink`], which is how both the Canvas2D
//! renderer and the hit tester consume it: the painted silhouette and the
//! hit-test region come from the same calls in the same order.
//!
//! [`FlatPath`] is the browser-free sink. It records the outline in device
//! coordinates (transforms applied as each point arrives, like Canvas2D does)
//! and answers point-in-path queries with the nonzero winding rule.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use std::convert::Infallible;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::{Affine, Arc, BezPath, Shape as _, Vec2};

use crate::consts::ARC_TOLERANCE;
use crate::doc::{Geometry, Shape};
use crate::viewport::Point;

/// The subset of an immediate-mode 2D surface needed to build shape paths.
///
/// Method semantics follow `CanvasRenderingContext2d`: transforms are
/// post-multiplied onto the current matrix, `save`/`restore` push and pop it,
/// and path points are transformed at the moment they are added.
pub trait PathSink {
    type Error;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;
    fn rotate(&mut self, radians: f64) -> Result<(), Self::Error>;
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), Self::Error>;
    fn close_path(&mut self);
}

/// Build the outline of `shape` into `sink` as the current path.
///
/// The surface state is saved before and restored after, so the sink's
/// transform is unchanged on return even though the path stays rotated.
///
/// # Errors
///
/// Propagates any error the sink reports for a transform or arc call.
pub fn trace_path<S: PathSink>(shape: &Shape, sink: &mut S) -> Result<(), S::Error> {
    sink.save();
    let traced = trace_in_frame(shape, sink);
    sink.restore();
    traced
}

fn trace_in_frame<S: PathSink>(shape: &Shape, sink: &mut S) -> Result<(), S::Error> {
    let Point { x: cx, y: cy } = shape.center;

    // Zero rotation skips the transform pair entirely.
    if shape.rotation_deg != 0.0 {
        sink.translate(cx, cy)?;
        sink.rotate(shape.rotation_deg.to_radians())?;
        sink.translate(-cx, -cy)?;
    }

    match shape.geometry {
        Geometry::Rect { width, height } => {
            let w = width * shape.scale;
            let h = height * shape.scale;
            let x = (cx - w / 2.0).floor();
            let y = (cy - h / 2.0).floor();
            sink.begin_path();
            sink.rect(x, y, w, h);
            sink.close_path();
        }
        Geometry::Circle { radius } => {
            sink.begin_path();
            sink.arc(cx, cy, radius * shape.scale, 0.0, TAU)?;
            sink.close_path();
        }
        Geometry::Triangle { side } => {
            let s = side * shape.scale;
            let h = s * (3.0_f64.sqrt() / 2.0);
            sink.translate(cx, cy)?;
            sink.begin_path();
            sink.move_to(0.0, -h / 2.0);
            sink.line_to(-s / 2.0, h / 2.0);
            sink.line_to(s / 2.0, h / 2.0);
            sink.line_to(0.0, -h / 2.0);
            sink.close_path();
        }
        Geometry::Star { spikes, outer_radius, inner_radius } => {
            let outer = outer_radius * shape.scale;
            let inner = inner_radius * shape.scale;
            let step = PI / f64::from(spikes);
            let mut angle = -FRAC_PI_2;
            sink.begin_path();
            sink.move_to(cx, cy - outer);
            for _ in 0..spikes {
                sink.line_to(cx + angle.cos() * outer, cy + angle.sin() * outer);
                angle += step;
                sink.line_to(cx + angle.cos() * inner, cy + angle.sin() * inner);
                angle += step;
            }
            sink.line_to(cx, cy - outer);
            sink.close_path();
        }
    }
    Ok(())
}

// =============================================================
// FlatPath
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cursor {
    /// No current point.
    Empty,
    /// Inside an open subpath.
    Open,
    /// Just closed; the next segment restarts from the subpath start.
    Closed,
}

/// Recorded path in device coordinates with a nonzero point-in-path query.
#[derive(Debug, Clone)]
pub struct FlatPath {
    path: BezPath,
    transform: Affine,
    stack: Vec<Affine>,
    cursor: Cursor,
    start: kurbo::Point,
}

impl Default for FlatPath {
    fn default() -> Self {
        Self {
            path: BezPath::new(),
            transform: Affine::IDENTITY,
            stack: Vec::new(),
            cursor: Cursor::Empty,
            start: kurbo::Point::ORIGIN,
        }
    }
}

impl FlatPath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outline of `shape`.
    #[must_use]
    pub fn of(shape: &Shape) -> Self {
        let mut flat = Self::new();
        let Ok(()) = trace_path(shape, &mut flat);
        flat
    }

    /// Whether `pt` falls inside the current path under the nonzero rule.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.path.contains(kurbo::Point::new(pt.x, pt.y))
    }

    /// The recorded outline.
    #[must_use]
    pub fn bez_path(&self) -> &BezPath {
        &self.path
    }

    fn map(&self, x: f64, y: f64) -> kurbo::Point {
        self.transform * kurbo::Point::new(x, y)
    }

    fn push_line(&mut self, p: kurbo::Point) {
        match self.cursor {
            Cursor::Empty => {
                self.path.move_to(p);
                self.start = p;
            }
            Cursor::Closed => {
                self.path.move_to(self.start);
                self.path.line_to(p);
            }
            Cursor::Open => self.path.line_to(p),
        }
        self.cursor = Cursor::Open;
    }
}

impl PathSink for FlatPath {
    type Error = Infallible;

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.transform = self.transform * Affine::translate(Vec2::new(x, y));
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> Result<(), Infallible> {
        self.transform = self.transform * Affine::rotate(radians);
        Ok(())
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.cursor = Cursor::Empty;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.map(x, y);
        self.path.move_to(p);
        self.start = p;
        self.cursor = Cursor::Open;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.map(x, y);
        self.push_line(p);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close_path();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), Infallible> {
        let first = self.map(x + radius * start.cos(), y + radius * start.sin());
        self.push_line(first);
        if radius <= 0.0 {
            return Ok(());
        }
        let arc = Arc {
            center: kurbo::Point::new(x, y),
            radii: Vec2::new(radius, radius),
            start_angle: start,
            sweep_angle: end - start,
            x_rotation: 0.0,
        };
        for el in arc.append_iter(ARC_TOLERANCE) {
            self.path.push(self.transform * el);
        }
        Ok(())
    }

    fn close_path(&mut self) {
        if self.cursor == Cursor::Open {
            self.path.close_path();
            self.cursor = Cursor::Closed;
        }
    }
}
