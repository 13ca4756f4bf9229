//! Render-surface contract.
//!
//! Figures and the controller never hold a drawing context. Every draw or
//! containment query receives the surface explicitly, so the same code runs
//! against the browser canvas ([`crate::web`]) and the in-memory
//! [`crate::recording::RecordingSurface`] used by tests and the native host.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::consts::FILL_ALPHA;
use crate::figure::Point;

/// Geometry handed to a surface for filling, stroking, or containment tests.
#[derive(Debug, Clone, PartialEq)]
pub enum Path {
    /// Closed polygon: the last point connects back to the first.
    Polygon(Vec<Point>),
    /// Open chain of line segments.
    Polyline(Vec<Point>),
    /// Full circle.
    Circle { center: Point, radius: f64 },
}

impl Path {
    /// Whether the path has nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Polygon(points) | Self::Polyline(points) => points.is_empty(),
            Self::Circle { radius, .. } => *radius <= 0.0,
        }
    }
}

/// A 2-D drawing surface.
///
/// Implementations must treat an empty [`Path`] as a no-op for drawing and as
/// containing nothing.
pub trait Surface {
    /// Error raised by the backing drawing API.
    type Error;

    /// Clear the whole surface.
    fn clear(&mut self, width: f64, height: f64);

    /// Fill `path` with a CSS color.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the path.
    fn fill(&mut self, path: &Path, color: &str) -> Result<(), Self::Error>;

    /// Stroke `path` with a CSS color and line width.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the path.
    fn stroke(&mut self, path: &Path, color: &str, width: f64) -> Result<(), Self::Error>;

    /// Whether `point` lies inside `path` under the surface's fill rule.
    fn contains(&self, path: &Path, point: Point) -> bool;
}

/// CSS fill style for an "R, G, B" channel string.
#[must_use]
pub fn fill_style(channels: &str) -> String {
    format!("rgba({channels}, {FILL_ALPHA})")
}

/// CSS stroke style (full alpha) for an "R, G, B" channel string.
#[must_use]
pub fn stroke_style(channels: &str) -> String {
    format!("rgba({channels}, 1)")
}
