//! Document model: shapes, their geometry, and the ordered registry that owns them.
//!
//! A [`Shape`] carries the transform shared by every variant (center, scale,
//! rotation), an optional fill, the per-frame highlight flags, and a
//! [`Geometry`] payload with the variant-specific dimensions. The
//! [`ShapeRegistry`] owns all live shapes in paint/hit-test priority order:
//! index 0 is the front, painted last and hit-tested first.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use uuid::Uuid;

use crate::consts::{
    DEFAULT_CIRCLE_RADIUS, DEFAULT_RECT_HEIGHT, DEFAULT_RECT_WIDTH, DEFAULT_STAR_INNER_RADIUS,
    DEFAULT_STAR_OUTER_RADIUS, DEFAULT_STAR_SPIKES, DEFAULT_TRIANGLE_SIDE,
};
use crate::viewport::Point;

/// Stable identifier for a shape. Survives reordering within the registry.
pub type ShapeId = Uuid;

/// The kind of a shape, without its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    Circle,
    Triangle,
    Star,
}

impl ShapeKind {
    /// Tag used for this kind in persisted records.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Rect => "Rect",
            Self::Circle => "Circle",
            Self::Triangle => "Triangle",
            Self::Star => "Star",
        }
    }
}

/// Variant-specific dimensions, all in unscaled canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Axis-aligned rectangle centered on the shape center.
    Rect { width: f64, height: f64 },
    /// Circle centered on the shape center.
    Circle { radius: f64 },
    /// Equilateral triangle, apex up, centered on the shape center.
    Triangle { side: f64 },
    /// Star with `spikes` points alternating between the two radii.
    Star { spikes: u32, outer_radius: f64, inner_radius: f64 },
}

impl Geometry {
    /// Default dimensions for a newly added shape of `kind`.
    #[must_use]
    pub fn default_for(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rect => Self::Rect { width: DEFAULT_RECT_WIDTH, height: DEFAULT_RECT_HEIGHT },
            ShapeKind::Circle => Self::Circle { radius: DEFAULT_CIRCLE_RADIUS },
            ShapeKind::Triangle => Self::Triangle { side: DEFAULT_TRIANGLE_SIDE },
            ShapeKind::Star => Self::Star {
                spikes: DEFAULT_STAR_SPIKES,
                outer_radius: DEFAULT_STAR_OUTER_RADIUS,
                inner_radius: DEFAULT_STAR_INNER_RADIUS,
            },
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rect { .. } => ShapeKind::Rect,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Triangle { .. } => ShapeKind::Triangle,
            Self::Star { .. } => ShapeKind::Star,
        }
    }
}

/// A drawable, interactive shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Identity used by the input controller to refer to this shape.
    pub id: ShapeId,
    /// Rotation pivot and scaling anchor, in canvas pixels.
    pub center: Point,
    /// Multiplier for every size-defining dimension. Always positive.
    pub scale: f64,
    /// Clockwise rotation in degrees. Accumulates without normalization.
    pub rotation_deg: f64,
    /// CSS fill color. `None` keeps the surface's current fill style.
    pub fill: Option<String>,
    /// Set each frame when the pointer is over this shape.
    pub hovered: bool,
    /// Set each frame when this shape is the selection.
    pub selected: bool,
    pub geometry: Geometry,
}

impl Shape {
    /// Create a shape at `center` with scale 1, no rotation and no fill.
    #[must_use]
    pub fn new(center: Point, geometry: Geometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            scale: 1.0,
            rotation_deg: 0.0,
            fill: None,
            hovered: false,
            selected: false,
            geometry,
        }
    }

    #[must_use]
    pub fn rect(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(cx, cy), Geometry::Rect { width, height })
    }

    #[must_use]
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Self::new(Point::new(cx, cy), Geometry::Circle { radius })
    }

    #[must_use]
    pub fn triangle(cx: f64, cy: f64, side: f64) -> Self {
        Self::new(Point::new(cx, cy), Geometry::Triangle { side })
    }

    #[must_use]
    pub fn star(cx: f64, cy: f64, spikes: u32, outer_radius: f64, inner_radius: f64) -> Self {
        Self::new(Point::new(cx, cy), Geometry::Star { spikes, outer_radius, inner_radius })
    }

    /// Builder-style setter for scale, rotation and fill, used when restoring saved shapes.
    #[must_use]
    pub fn with_transform(mut self, scale: f64, rotation_deg: f64, fill: Option<String>) -> Self {
        self.scale = scale;
        self.rotation_deg = rotation_deg;
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Move the shape so its center sits at `(x, y)`.
    pub fn set_center(&mut self, x: f64, y: f64) {
        self.center = Point::new(x, y);
    }

    /// Add `delta` to the scale unless the result would not be positive.
    pub fn scale_by(&mut self, delta: f64) {
        if self.scale + delta > 0.0 {
            self.scale += delta;
        }
    }

    /// Add `degrees` to the rotation.
    pub fn rotate(&mut self, degrees: f64) {
        self.rotation_deg += degrees;
    }
}

/// Ordered, owning collection of all live shapes.
///
/// Front (index 0) is topmost: painted last, hit-tested first.
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    shapes: Vec<Shape>,
}

impl ShapeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Build a registry from shapes listed front to back.
    #[must_use]
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// Insert a shape at the front so it paints on top of everything else.
    pub fn insert_front(&mut self, shape: Shape) {
        self.shapes.insert(0, shape);
    }

    /// Move the shape with `id` to the front. Returns false if it isn't present.
    pub fn bring_to_front(&mut self, id: &ShapeId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let shape = self.shapes.remove(index);
        self.shapes.insert(0, shape);
        true
    }

    /// Index of the shape with `id`, counting from the front.
    #[must_use]
    pub fn position(&self, id: &ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| &s.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| &s.id == id)
    }

    pub fn get_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| &s.id == id)
    }

    /// Iterate front to back (hit-test order).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Iterate back to front (paint order).
    pub fn iter_back_to_front(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().rev()
    }

    /// Mutable iteration, front to back.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut Shape> {
        self.shapes.iter_mut()
    }

    /// Replace every shape with `shapes`, listed front to back.
    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// All shapes as a slice, front to back.
    #[must_use]
    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
