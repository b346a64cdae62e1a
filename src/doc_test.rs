#![allow(clippy::float_cmp)]

use super::*;

fn ids(registry: &ShapeRegistry) -> Vec<ShapeId> {
    registry.iter().map(|s| s.id).collect()
}

// =============================================================
// Shape construction
// =============================================================

#[test]
fn new_shape_has_identity_transform() {
    let s = Shape::rect(10.0, 20.0, 50.0, 40.0);
    assert_eq!(s.center(), Point::new(10.0, 20.0));
    assert_eq!(s.scale, 1.0);
    assert_eq!(s.rotation_deg, 0.0);
    assert!(s.fill.is_none());
    assert!(!s.hovered);
    assert!(!s.selected);
    assert_eq!(s.kind(), ShapeKind::Rect);
}

#[test]
fn new_shapes_get_distinct_ids() {
    let a = Shape::circle(0.0, 0.0, 10.0);
    let b = Shape::circle(0.0, 0.0, 10.0);
    assert_ne!(a.id, b.id);
}

#[test]
fn constructors_set_geometry() {
    assert_eq!(Shape::circle(0.0, 0.0, 7.0).geometry, Geometry::Circle { radius: 7.0 });
    assert_eq!(Shape::triangle(0.0, 0.0, 9.0).geometry, Geometry::Triangle { side: 9.0 });
    assert_eq!(
        Shape::star(0.0, 0.0, 6, 30.0, 12.0).geometry,
        Geometry::Star { spikes: 6, outer_radius: 30.0, inner_radius: 12.0 }
    );
}

#[test]
fn with_transform_overrides_defaults() {
    let s = Shape::triangle(0.0, 0.0, 50.0).with_transform(1.5, 45.0, Some("#00f".into()));
    assert_eq!(s.scale, 1.5);
    assert_eq!(s.rotation_deg, 45.0);
    assert_eq!(s.fill.as_deref(), Some("#00f"));
}

#[test]
fn default_geometry_matches_add_commands() {
    assert_eq!(Geometry::default_for(ShapeKind::Rect), Geometry::Rect { width: 50.0, height: 50.0 });
    assert_eq!(Geometry::default_for(ShapeKind::Circle), Geometry::Circle { radius: 25.0 });
    assert_eq!(Geometry::default_for(ShapeKind::Triangle), Geometry::Triangle { side: 50.0 });
    assert_eq!(
        Geometry::default_for(ShapeKind::Star),
        Geometry::Star { spikes: 5, outer_radius: 30.0, inner_radius: 15.0 }
    );
}

#[test]
fn kind_tags() {
    assert_eq!(ShapeKind::Rect.tag(), "Rect");
    assert_eq!(ShapeKind::Circle.tag(), "Circle");
    assert_eq!(ShapeKind::Triangle.tag(), "Triangle");
    assert_eq!(ShapeKind::Star.tag(), "Star");
}

// =============================================================
// Transform mutations
// =============================================================

#[test]
fn set_center_moves_shape() {
    let mut s = Shape::circle(0.0, 0.0, 10.0);
    s.set_center(300.0, 400.0);
    assert_eq!(s.center(), Point::new(300.0, 400.0));
}

#[test]
fn scale_by_adds_delta() {
    let mut s = Shape::circle(0.0, 0.0, 10.0);
    s.scale_by(0.5);
    assert_eq!(s.scale, 1.5);
    s.scale_by(-1.0);
    assert_eq!(s.scale, 0.5);
}

#[test]
fn scale_by_is_floor_guarded() {
    let mut s = Shape::circle(0.0, 0.0, 10.0);
    s.scale = 0.25;
    let mut previous = s.scale;
    for _ in 0..10 {
        s.scale_by(-0.1);
        assert!(s.scale > 0.0);
        assert!(s.scale <= previous);
        previous = s.scale;
    }
    // 0.25 -> 0.15 -> 0.05, then every further decrement is refused.
    assert!((s.scale - 0.05).abs() < 1e-9);
}

#[test]
fn scale_by_refuses_exact_zero() {
    let mut s = Shape::circle(0.0, 0.0, 10.0);
    s.scale_by(-1.0);
    assert_eq!(s.scale, 1.0);
}

#[test]
fn rotation_is_additive_and_unbounded() {
    let mut s = Shape::rect(0.0, 0.0, 10.0, 10.0);
    for _ in 0..30 {
        s.rotate(15.0);
    }
    assert_eq!(s.rotation_deg, 450.0);
    s.rotate(-450.0);
    assert_eq!(s.rotation_deg, 0.0);
}

#[test]
fn rotation_four_steps_then_back_is_identity() {
    let mut s = Shape::rect(0.0, 0.0, 10.0, 10.0);
    for _ in 0..4 {
        s.rotate(15.0);
    }
    s.rotate(-60.0);
    assert_eq!(s.rotation_deg, 0.0);
}

// =============================================================
// ShapeRegistry
// =============================================================

#[test]
fn registry_starts_empty() {
    let reg = ShapeRegistry::new();
    assert!(reg.is_empty());
    assert_eq!(reg.len(), 0);
}

#[test]
fn insert_front_puts_newest_first() {
    let mut reg = ShapeRegistry::new();
    let a = Shape::circle(0.0, 0.0, 1.0);
    let b = Shape::circle(0.0, 0.0, 1.0);
    let (a_id, b_id) = (a.id, b.id);
    reg.insert_front(a);
    reg.insert_front(b);
    assert_eq!(ids(&reg), vec![b_id, a_id]);
}

#[test]
fn bring_to_front_reorders() {
    let shapes = vec![Shape::circle(0.0, 0.0, 1.0), Shape::circle(0.0, 0.0, 2.0), Shape::circle(0.0, 0.0, 3.0)];
    let order: Vec<ShapeId> = shapes.iter().map(|s| s.id).collect();
    let mut reg = ShapeRegistry::from_shapes(shapes);

    assert!(reg.bring_to_front(&order[2]));
    assert_eq!(ids(&reg), vec![order[2], order[0], order[1]]);
    assert_eq!(reg.len(), 3);
}

#[test]
fn bring_to_front_of_front_is_noop() {
    let shapes = vec![Shape::circle(0.0, 0.0, 1.0), Shape::circle(0.0, 0.0, 2.0)];
    let order: Vec<ShapeId> = shapes.iter().map(|s| s.id).collect();
    let mut reg = ShapeRegistry::from_shapes(shapes);
    assert!(reg.bring_to_front(&order[0]));
    assert_eq!(ids(&reg), order);
}

#[test]
fn bring_to_front_unknown_id_returns_false() {
    let mut reg = ShapeRegistry::from_shapes(vec![Shape::circle(0.0, 0.0, 1.0)]);
    assert!(!reg.bring_to_front(&Uuid::new_v4()));
    assert_eq!(reg.len(), 1);
}

#[test]
fn get_and_get_mut_by_id() {
    let s = Shape::rect(1.0, 2.0, 3.0, 4.0);
    let id = s.id;
    let mut reg = ShapeRegistry::from_shapes(vec![s]);
    assert_eq!(reg.get(&id).map(Shape::center), Some(Point::new(1.0, 2.0)));
    if let Some(shape) = reg.get_mut(&id) {
        shape.set_center(9.0, 9.0);
    }
    assert_eq!(reg.get(&id).map(Shape::center), Some(Point::new(9.0, 9.0)));
    assert!(reg.get(&Uuid::new_v4()).is_none());
}

#[test]
fn iter_back_to_front_reverses_hit_order() {
    let shapes = vec![Shape::circle(0.0, 0.0, 1.0), Shape::circle(0.0, 0.0, 2.0), Shape::circle(0.0, 0.0, 3.0)];
    let reg = ShapeRegistry::from_shapes(shapes);
    let front: Vec<ShapeId> = reg.iter().map(|s| s.id).collect();
    let mut back: Vec<ShapeId> = reg.iter_back_to_front().map(|s| s.id).collect();
    back.reverse();
    assert_eq!(front, back);
}

#[test]
fn replace_all_swaps_contents() {
    let mut reg = ShapeRegistry::from_shapes(vec![Shape::circle(0.0, 0.0, 1.0)]);
    reg.replace_all(vec![Shape::rect(0.0, 0.0, 1.0, 1.0), Shape::star(0.0, 0.0, 5, 2.0, 1.0)]);
    assert_eq!(reg.len(), 2);
    assert_eq!(reg.as_slice()[0].kind(), ShapeKind::Rect);
    assert_eq!(reg.as_slice()[1].kind(), ShapeKind::Star);
}
