#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::*;
use crate::recording::RecordingSurface;

// =============================================================
// Helpers
// =============================================================

const EPS: f64 = 1e-9;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn square(x: f64, y: f64, size: f64) -> Figure {
    Figure::new(
        vec![pt(x, y), pt(x + size, y), pt(x + size, y + size), pt(x, y + size)],
        0.0,
        DEFAULT_FILL,
    )
}

fn assert_close(a: Point, b: Point) {
    assert!((a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS, "{a:?} != {b:?}");
}

// =============================================================
// Point / Bounds
// =============================================================

#[test]
fn point_distance_is_euclidean() {
    assert_eq!(pt(0.0, 0.0).distance_to(pt(3.0, 4.0)), 5.0);
}

#[test]
fn bounds_of_triangle() {
    let b = Bounds::of(&[pt(10.0, 40.0), pt(30.0, 20.0), pt(50.0, 60.0)]);
    assert_eq!(b, Bounds { min_x: 10.0, max_x: 50.0, min_y: 20.0, max_y: 60.0 });
    assert_eq!(b.center(), pt(30.0, 40.0));
}

#[test]
fn bounds_of_empty_is_zero_box() {
    let b = Bounds::of(&[]);
    assert_eq!(b, Bounds::default());
    assert_eq!(b.center(), pt(0.0, 0.0));
}

#[test]
fn bounds_corners_start_top_left_clockwise() {
    let b = Bounds { min_x: 1.0, max_x: 3.0, min_y: 2.0, max_y: 4.0 };
    assert_eq!(b.corners(), [pt(1.0, 2.0), pt(3.0, 2.0), pt(3.0, 4.0), pt(1.0, 4.0)]);
}

// =============================================================
// Rotation
// =============================================================

#[test]
fn zero_rotation_leaves_points_unchanged() {
    let f = square(0.0, 0.0, 10.0);
    assert_eq!(f.rotated_points(f.vertices()), f.vertices().to_vec());
}

#[test]
fn quarter_turn_rotates_about_bbox_center() {
    let mut f = square(0.0, 0.0, 10.0);
    f.set_rotation(FRAC_PI_2);
    // (0,0) relative to center (5,5) is (-5,-5); a quarter turn maps it to (5,-5).
    let rotated = f.rotated_points(&[pt(0.0, 0.0)]);
    assert_close(rotated[0], pt(10.0, 0.0));
}

#[test]
fn rotated_points_accepts_auxiliary_points() {
    let mut f = square(0.0, 0.0, 10.0);
    f.set_rotation(PI);
    let rotated = f.rotated_points(&[pt(5.0, 0.0), pt(5.0, 5.0)]);
    assert_close(rotated[0], pt(5.0, 10.0));
    assert_close(rotated[1], pt(5.0, 5.0));
}

#[test]
fn stored_vertices_never_rotate() {
    let mut f = square(0.0, 0.0, 10.0);
    let original = f.vertices().to_vec();
    f.set_rotation(1.234);
    assert_eq!(f.vertices(), original.as_slice());
}

#[test]
fn rotation_anchor_follows_rotation() {
    let mut f = square(100.0, 100.0, 100.0);
    assert_eq!(f.rotation_anchor(), pt(100.0, 100.0));
    f.set_rotation(FRAC_PI_2);
    assert_close(f.rotation_anchor(), pt(200.0, 100.0));
}

// =============================================================
// Outline
// =============================================================

#[test]
fn outline_is_closed_polygon_of_rotated_vertices() {
    let f = square(0.0, 0.0, 10.0);
    assert_eq!(f.outline(), Path::Polygon(f.vertices().to_vec()));
}

#[test]
fn empty_figure_outline_is_empty() {
    let f = Figure::new(Vec::new(), 0.0, DEFAULT_FILL);
    assert!(f.outline().is_empty());
}

// =============================================================
// Translate
// =============================================================

#[test]
fn translate_shifts_every_vertex() {
    let mut f = square(0.0, 0.0, 10.0);
    f.translate(5.0, -2.0);
    assert_eq!(f.vertices()[0], pt(5.0, -2.0));
    assert_eq!(f.vertices()[2], pt(15.0, 8.0));
}

#[test]
fn translate_keeps_rotation() {
    let mut f = square(0.0, 0.0, 10.0);
    f.set_rotation(0.7);
    f.translate(30.0, 40.0);
    assert_eq!(f.rotation(), 0.7);
}

#[test]
fn translate_round_trip_is_bit_identical() {
    let mut f = Figure::new(vec![pt(0.1, 0.2), pt(10.3, 0.7), pt(5.5, 9.9)], 0.3, DEFAULT_FILL);
    let original = f.vertices().to_vec();
    f.translate(12.0, -7.0);
    f.translate(-12.0, 7.0);
    assert_eq!(f.vertices(), original.as_slice());
}

#[test]
fn translate_moves_the_pivot_with_the_shape() {
    let mut f = square(0.0, 0.0, 10.0);
    f.set_rotation(FRAC_PI_4);
    let before = f.rotation_anchor();
    f.translate(20.0, 30.0);
    assert_close(f.rotation_anchor(), pt(before.x + 20.0, before.y + 30.0));
}

// =============================================================
// Hit tests
// =============================================================

#[test]
fn centroid_is_inside_at_any_rotation() {
    let surface = RecordingSurface::new();
    let mut f = Figure::new(vec![pt(0.0, 0.0), pt(80.0, 10.0), pt(60.0, 70.0), pt(5.0, 50.0)], 0.0, DEFAULT_FILL);
    let center = f.bounds().center();
    for step in 0..16 {
        f.set_rotation(f64::from(step) * PI / 8.0);
        assert!(f.is_pointer_over(&surface, center), "rotation step {step}");
    }
}

#[test]
fn pointer_outside_is_not_over() {
    let surface = RecordingSurface::new();
    let f = square(0.0, 0.0, 10.0);
    assert!(!f.is_pointer_over(&surface, pt(20.0, 5.0)));
}

#[test]
fn rotation_round_trip_restores_hit_results() {
    let surface = RecordingSurface::new();
    let mut f = Figure::new(vec![pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 20.0), pt(0.0, 20.0)], 0.0, DEFAULT_FILL);
    let samples = [pt(90.0, 10.0), pt(50.0, 40.0), pt(10.0, 5.0)];
    let before: Vec<bool> = samples.iter().map(|p| f.is_pointer_over(&surface, *p)).collect();

    f.set_rotation(f.rotation() + 0.9);
    let during: Vec<bool> = samples.iter().map(|p| f.is_pointer_over(&surface, *p)).collect();
    assert_ne!(before, during);

    f.set_rotation(f.rotation() - 0.9);
    let after: Vec<bool> = samples.iter().map(|p| f.is_pointer_over(&surface, *p)).collect();
    assert_eq!(before, after);
}

#[test]
fn rotated_bar_is_hit_along_its_new_axis() {
    let surface = RecordingSurface::new();
    let mut f = Figure::new(vec![pt(0.0, 45.0), pt(100.0, 45.0), pt(100.0, 55.0), pt(0.0, 55.0)], 0.0, DEFAULT_FILL);
    assert!(!f.is_pointer_over(&surface, pt(50.0, 10.0)));
    f.set_rotation(FRAC_PI_2);
    assert!(f.is_pointer_over(&surface, pt(50.0, 10.0)));
}

#[test]
fn handle_hit_radius_is_eight() {
    let surface = RecordingSurface::new();
    let f = square(100.0, 100.0, 50.0);
    assert!(f.is_pointer_near_rotation_handle(&surface, pt(100.0, 100.0)));
    assert!(f.is_pointer_near_rotation_handle(&surface, pt(108.0, 100.0)));
    assert!(!f.is_pointer_near_rotation_handle(&surface, pt(108.5, 100.0)));
}

#[test]
fn handle_hit_follows_rotation() {
    let surface = RecordingSurface::new();
    let mut f = square(100.0, 100.0, 100.0);
    f.set_rotation(PI);
    assert!(!f.is_pointer_near_rotation_handle(&surface, pt(100.0, 100.0)));
    assert!(f.is_pointer_near_rotation_handle(&surface, pt(200.0, 200.0)));
}

// =============================================================
// Angle for rotation
// =============================================================

#[test]
fn angle_is_zero_when_pointer_on_anchor_ray() {
    let f = square(0.0, 0.0, 10.0);
    assert!(f.angle_for_rotation(pt(-10.0, -10.0)).abs() < EPS);
}

#[test]
fn angle_is_absolute_not_incremental() {
    let mut f = square(0.0, 0.0, 10.0);
    let target = pt(20.0, -5.0);
    f.rotate_toward(target);
    let first = f.rotation();
    f.rotate_toward(target);
    assert_eq!(f.rotation(), first);
}

#[test]
fn rotate_toward_puts_anchor_on_pointer_at_anchor_radius() {
    let mut f = square(100.0, 100.0, 100.0);
    let center = f.bounds().center();
    let radius = center.distance_to(pt(100.0, 100.0));
    let pointer = pt(center.x + radius, center.y);
    f.rotate_toward(pointer);
    assert_close(f.rotation_anchor(), pointer);
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn render_fills_half_alpha_then_strokes_full_alpha() {
    let mut surface = RecordingSurface::new();
    let f = Figure::new(vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(0.0, 10.0)], 0.0, "1, 2, 3");
    f.render(&mut surface).unwrap();

    let fills: Vec<_> = surface.fills().collect();
    let strokes: Vec<_> = surface.strokes().collect();
    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0].1, "rgba(1, 2, 3, 0.5)");
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].1, "rgba(1, 2, 3, 1)");
    assert_eq!(strokes[0].2, 2.0);
}

#[test]
fn selection_frame_strokes_box_and_fills_handle() {
    let mut surface = RecordingSurface::new();
    let f = square(10.0, 20.0, 30.0);
    f.draw_selection_frame(&mut surface).unwrap();

    let strokes: Vec<_> = surface.strokes().collect();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].1, "black");
    assert_eq!(strokes[0].2, 1.0);

    let fills: Vec<_> = surface.fills().collect();
    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0].0, &Path::Circle { center: pt(10.0, 20.0), radius: 6.0 });
    assert_eq!(fills[0].1, "#00ff00");
}

#[test]
fn empty_figure_renders_nothing() {
    let mut surface = RecordingSurface::new();
    let f = Figure::new(Vec::new(), 0.0, DEFAULT_FILL);
    f.render(&mut surface).unwrap();
    assert!(surface.ops().is_empty());
}

// =============================================================
// Serde
// =============================================================

#[test]
fn serializes_with_camel_case_fill_color() {
    let f = Figure::new(vec![pt(1.0, 2.0)], 0.5, "9, 9, 9");
    let json = serde_json::to_value(&f).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "vertices": [{ "x": 1.0, "y": 2.0 }], "rotation": 0.5, "fillColor": "9, 9, 9" })
    );
}

#[test]
fn missing_rotation_and_color_take_defaults() {
    let f: Figure = serde_json::from_str(r#"{ "vertices": [{ "x": 1, "y": 2 }] }"#).unwrap();
    assert_eq!(f.rotation(), 0.0);
    assert_eq!(f.fill_color(), DEFAULT_FILL);
}
