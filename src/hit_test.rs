use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// contains_point
// =============================================================

#[test]
fn every_variant_contains_its_center() {
    let shapes = [
        Shape::rect(25.0, 25.0, 50.0, 50.0),
        Shape::star(100.0, 100.0, 5, 30.0, 15.0),
        Shape::triangle(150.0, 150.0, 50.0),
        Shape::circle(200.0, 200.0, 25.0),
    ];
    for shape in &shapes {
        assert!(contains_point(shape, shape.center()), "{:?} should contain its center", shape.kind());
    }
}

#[test]
fn every_variant_excludes_far_points() {
    let shapes = [
        Shape::rect(25.0, 25.0, 50.0, 50.0),
        Shape::star(100.0, 100.0, 5, 30.0, 15.0),
        Shape::triangle(150.0, 150.0, 50.0),
        Shape::circle(200.0, 200.0, 25.0),
    ];
    for shape in &shapes {
        let c = shape.center();
        assert!(!contains_point(shape, pt(c.x + 80.0, c.y)));
        assert!(!contains_point(shape, pt(c.x, c.y - 80.0)));
    }
}

#[test]
fn containment_follows_the_moved_center() {
    let mut shape = Shape::circle(50.0, 50.0, 10.0);
    shape.set_center(500.0, 500.0);
    assert!(!contains_point(&shape, pt(50.0, 50.0)));
    assert!(contains_point(&shape, pt(500.0, 500.0)));
}

#[test]
fn containment_follows_scale() {
    let mut shape = Shape::rect(100.0, 100.0, 20.0, 20.0);
    assert!(!contains_point(&shape, pt(100.0, 118.0)));
    shape.scale_by(1.0);
    assert!(contains_point(&shape, pt(100.0, 118.0)));
}

#[test]
fn containment_follows_rotation() {
    let mut shape = Shape::rect(100.0, 100.0, 80.0, 10.0);
    assert!(contains_point(&shape, pt(135.0, 100.0)));
    assert!(!contains_point(&shape, pt(100.0, 135.0)));
    shape.rotate(90.0);
    assert!(!contains_point(&shape, pt(135.0, 100.0)));
    assert!(contains_point(&shape, pt(100.0, 135.0)));
}

// =============================================================
// shape_at
// =============================================================

#[test]
fn shape_at_empty_registry_is_none() {
    assert!(shape_at(&ShapeRegistry::new(), pt(0.0, 0.0)).is_none());
}

#[test]
fn shape_at_misses_return_none() {
    let reg = ShapeRegistry::from_shapes(vec![Shape::circle(100.0, 100.0, 10.0)]);
    assert!(shape_at(&reg, pt(300.0, 300.0)).is_none());
}

#[test]
fn shape_at_prefers_front_of_registry() {
    let front = Shape::circle(100.0, 100.0, 30.0);
    let back = Shape::rect(100.0, 100.0, 60.0, 60.0);
    let front_id = front.id;
    let back_id = back.id;
    let reg = ShapeRegistry::from_shapes(vec![front, back]);
    assert_eq!(shape_at(&reg, pt(100.0, 100.0)), Some(front_id));
    // Rect corner lies outside the circle, so only the back shape is hit.
    assert_eq!(shape_at(&reg, pt(74.0, 74.0)), Some(back_id));
}
