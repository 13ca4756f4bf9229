//! Shared numeric and color constants for the canvas crate.

// ── Drawing ─────────────────────────────────────────────────────

/// A click within this distance of the first vertex closes the polygon, in canvas pixels.
pub const CLOSING_RADIUS_PX: f64 = 10.0;

/// Committed vertices required before a click can close the polygon.
pub const MIN_VERTICES_TO_CLOSE: usize = 2;

/// Smallest vertex count promoted into a figure on close.
pub const MIN_FIGURE_VERTICES: usize = 3;

/// Minimum spacing between preview redraws while drawing (one frame).
pub const PREVIEW_THROTTLE_MS: f64 = 16.0;

/// Timer delay for the trailing preview redraw, in whole milliseconds.
pub const PREVIEW_FLUSH_DELAY_MS: i32 = 16;

// ── Rotation handle ─────────────────────────────────────────────

/// Radius of the drawn rotation handle.
pub const HANDLE_DRAW_RADIUS_PX: f64 = 6.0;

/// Radius of the rotation handle hit disc. Larger than the drawn handle.
pub const HANDLE_HIT_RADIUS_PX: f64 = 8.0;

// ── Styling ─────────────────────────────────────────────────────

/// Alpha applied to a figure's fill color.
pub const FILL_ALPHA: f64 = 0.5;

/// Outline width for figures and the drawing preview.
pub const FIGURE_STROKE_WIDTH: f64 = 2.0;

/// Outline width for the selection frame.
pub const SELECTION_STROKE_WIDTH: f64 = 1.0;

/// Selection frame color.
pub const SELECTION_STROKE_COLOR: &str = "black";

/// Rotation handle fill color.
pub const ACCENT_COLOR: &str = "#00ff00";

/// Default fill channels ("R, G, B") for new figures.
pub const DEFAULT_FILL: &str = "63, 27, 160";

// ── Popup layout ────────────────────────────────────────────────

/// Width the editor popup is laid out for before scaling.
pub const DESIGN_WIDTH: f64 = 1200.0;

/// Height the editor popup is laid out for before scaling.
pub const DESIGN_HEIGHT: f64 = 850.0;

/// Share of the window the popup may occupy.
pub const POPUP_FILL_RATIO: f64 = 0.95;
