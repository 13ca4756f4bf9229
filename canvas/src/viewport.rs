#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::consts::{DESIGN_HEIGHT, DESIGN_WIDTH, POPUP_FILL_RATIO};
use crate::figure::Point;

/// On-screen placement of the canvas element.
///
/// The element may be displayed at a different CSS size than its pixel
/// size (popup scaling); pointer coordinates must be scaled back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge of the element in client coordinates.
    pub left: f64,
    /// Top edge of the element in client coordinates.
    pub top: f64,
    /// Displayed width in CSS pixels.
    pub css_width: f64,
    /// Displayed height in CSS pixels.
    pub css_height: f64,
    /// Backing store width in canvas pixels.
    pub canvas_width: f64,
    /// Backing store height in canvas pixels.
    pub canvas_height: f64,
}

impl Viewport {
    /// Convert a client-space point to canvas pixels.
    #[must_use]
    pub fn client_to_canvas(&self, client: Point) -> Point {
        Point {
            x: (client.x - self.left) * ratio(self.canvas_width, self.css_width),
            y: (client.y - self.top) * ratio(self.canvas_height, self.css_height),
        }
    }
}

/// A collapsed element maps 1:1.
fn ratio(canvas: f64, css: f64) -> f64 {
    if css > 0.0 { canvas / css } else { 1.0 }
}

/// Scale factor that fits the editor popup inside a window of the given size.
#[must_use]
pub fn fit_scale(window_width: f64, window_height: f64) -> f64 {
    let sx = window_width * POPUP_FILL_RATIO / DESIGN_WIDTH;
    let sy = window_height * POPUP_FILL_RATIO / DESIGN_HEIGHT;
    sx.min(sy)
}
