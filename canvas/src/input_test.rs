#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// PointerEvent
// =============================================================

#[test]
fn constructors_set_kind_and_point() {
    let down = PointerEvent::down(1.0, 2.0, 3.0);
    assert_eq!(down.kind, PointerKind::Down);
    assert_eq!(down.point, pt(1.0, 2.0));
    assert_eq!(down.time_ms, 3.0);
    assert_eq!(PointerEvent::moved(0.0, 0.0, 0.0).kind, PointerKind::Move);
    assert_eq!(PointerEvent::up(0.0, 0.0, 0.0).kind, PointerKind::Up);
}

// =============================================================
// Cursor
// =============================================================

#[test]
fn cursor_css_values() {
    assert_eq!(Cursor::Default.as_css(), "default");
    assert_eq!(Cursor::Grab.as_css(), "grab");
    assert_eq!(Cursor::Grabbing.as_css(), "grabbing");
    assert_eq!(Cursor::Move.as_css(), "move");
}

#[test]
fn ui_state_defaults() {
    let ui = UiState::default();
    assert_eq!(ui.selected, None);
    assert_eq!(ui.cursor, Cursor::Default);
    assert_eq!(ui.fill_color, DEFAULT_FILL);
}

// =============================================================
// Sketch closing
// =============================================================

fn two_vertex_sketch() -> Sketch {
    let mut sketch = Sketch::start(pt(100.0, 100.0));
    sketch.vertices.push(pt(200.0, 100.0));
    sketch
}

#[test]
fn start_commits_first_vertex() {
    let sketch = Sketch::start(pt(3.0, 4.0));
    assert_eq!(sketch.vertices, vec![pt(3.0, 4.0)]);
    assert_eq!(sketch.cursor, None);
}

#[test]
fn closes_at_exactly_ten_pixels() {
    assert!(two_vertex_sketch().closes_at(pt(110.0, 100.0)));
}

#[test]
fn does_not_close_just_beyond_ten_pixels() {
    assert!(!two_vertex_sketch().closes_at(pt(110.0001, 100.0)));
}

#[test]
fn closes_on_the_first_vertex_itself() {
    assert!(two_vertex_sketch().closes_at(pt(100.0, 100.0)));
}

#[test]
fn single_vertex_sketch_never_closes() {
    let sketch = Sketch::start(pt(100.0, 100.0));
    assert!(!sketch.closes_at(pt(100.0, 100.0)));
    assert!(!sketch.closes_at(pt(101.0, 101.0)));
}

#[test]
fn closing_is_measured_from_first_vertex_only() {
    // Near the last vertex but far from the first.
    assert!(!two_vertex_sketch().closes_at(pt(201.0, 100.0)));
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_modes() {
    assert_eq!(InputState::Idle.mode(), CanvasMode::Idle);
    assert_eq!(InputState::Drawing(Sketch::start(pt(0.0, 0.0))).mode(), CanvasMode::Drawing);
    let drag = InputState::Dragging { index: 0, gesture: DragGesture::Rotate, last: pt(0.0, 0.0) };
    assert_eq!(drag.mode(), CanvasMode::Drag);
}

#[test]
fn default_mode_is_idle() {
    assert_eq!(InputState::default().mode(), CanvasMode::Idle);
    assert_eq!(CanvasMode::default(), CanvasMode::Idle);
}

// =============================================================
// Throttle
// =============================================================

#[test]
fn throttle_first_update_passes() {
    let mut throttle = Throttle::new(16.0);
    assert!(throttle.ready(1000.0));
    assert!(!throttle.take_pending());
}

#[test]
fn throttle_refuses_within_interval_and_remembers() {
    let mut throttle = Throttle::new(16.0);
    assert!(throttle.ready(0.0));
    assert!(!throttle.ready(10.0));
    assert!(throttle.take_pending());
    assert!(!throttle.take_pending());
}

#[test]
fn throttle_opens_after_interval() {
    let mut throttle = Throttle::new(16.0);
    assert!(throttle.ready(0.0));
    assert!(!throttle.ready(15.0));
    assert!(throttle.ready(16.0));
    assert!(!throttle.take_pending());
}

#[test]
fn throttle_reset_reopens_immediately() {
    let mut throttle = Throttle::new(16.0);
    assert!(throttle.ready(100.0));
    assert!(!throttle.ready(101.0));
    throttle.reset();
    assert!(!throttle.take_pending());
    assert!(throttle.ready(102.0));
}

#[test]
fn throttle_flush_waits_for_interval() {
    let mut throttle = Throttle::new(16.0);
    assert!(throttle.ready(0.0));
    assert!(!throttle.ready(5.0));
    assert!(throttle.is_pending());
    assert!(!throttle.flush(10.0));
    assert!(throttle.flush(16.0));
    assert!(!throttle.is_pending());
    assert!(!throttle.ready(20.0));
}

#[test]
fn throttle_flush_without_refusal_is_quiet() {
    let mut throttle = Throttle::new(16.0);
    assert!(throttle.ready(0.0));
    assert!(!throttle.flush(100.0));
    assert!(throttle.ready(16.0));
}
