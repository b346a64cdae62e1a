#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{Shape, ShapeId, ShapeRegistry};
use crate::path::FlatPath;
use crate::viewport::Point;

/// Whether `pt` lies inside the shape's outline at its current transform.
///
/// The path is rebuilt on every call; nothing is cached between frames.
#[must_use]
pub fn contains_point(shape: &Shape, pt: Point) -> bool {
    FlatPath::of(shape).contains(pt)
}

/// The topmost shape under `pt`, scanning the registry front to back.
#[must_use]
pub fn shape_at(registry: &ShapeRegistry, pt: Point) -> Option<ShapeId> {
    registry
        .iter()
        .find(|shape| contains_point(shape, pt))
        .map(|shape| shape.id)
}
