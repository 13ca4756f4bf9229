#![allow(clippy::float_cmp)]

use super::*;

fn viewport(css_width: f64, css_height: f64) -> Viewport {
    Viewport { left: 20.0, top: 10.0, css_width, css_height, canvas_width: 800.0, canvas_height: 600.0 }
}

// =============================================================
// client_to_canvas
// =============================================================

#[test]
fn unscaled_canvas_only_offsets() {
    let p = viewport(800.0, 600.0).client_to_canvas(Point::new(120.0, 60.0));
    assert_eq!(p, Point::new(100.0, 50.0));
}

#[test]
fn half_size_display_doubles_coordinates() {
    let p = viewport(400.0, 300.0).client_to_canvas(Point::new(120.0, 60.0));
    assert_eq!(p, Point::new(200.0, 100.0));
}

#[test]
fn axes_scale_independently() {
    let p = viewport(400.0, 600.0).client_to_canvas(Point::new(30.0, 30.0));
    assert_eq!(p, Point::new(20.0, 20.0));
}

#[test]
fn collapsed_element_maps_one_to_one() {
    let p = viewport(0.0, 0.0).client_to_canvas(Point::new(25.0, 15.0));
    assert_eq!(p, Point::new(5.0, 5.0));
}

#[test]
fn points_left_of_the_element_go_negative() {
    let p = viewport(800.0, 600.0).client_to_canvas(Point::new(0.0, 0.0));
    assert_eq!(p, Point::new(-20.0, -10.0));
}

// =============================================================
// fit_scale
// =============================================================

#[test]
fn design_size_window_scales_to_fill_ratio() {
    assert!((fit_scale(DESIGN_WIDTH, DESIGN_HEIGHT) - POPUP_FILL_RATIO).abs() < 1e-12);
}

#[test]
fn narrow_window_is_width_bound() {
    let scale = fit_scale(600.0, 2000.0);
    assert!((scale - 600.0 * 0.95 / 1200.0).abs() < 1e-12);
}

#[test]
fn short_window_is_height_bound() {
    let scale = fit_scale(4000.0, 425.0);
    assert!((scale - 425.0 * 0.95 / 850.0).abs() < 1e-12);
}
