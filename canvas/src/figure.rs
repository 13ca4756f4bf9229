//! Figure model: a user-drawn polygon with a rotation and a fill color.
//!
//! Rotation is never baked into the stored vertices. Every geometric query
//! rotates on the fly about the center of the *un-rotated* bounding box, so
//! repeated reads never accumulate error and translation carries the pivot
//! along with the shape.

#[cfg(test)]
#[path = "figure_test.rs"]
mod figure_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ACCENT_COLOR, DEFAULT_FILL, FIGURE_STROKE_WIDTH, HANDLE_DRAW_RADIUS_PX, HANDLE_HIT_RADIUS_PX,
    SELECTION_STROKE_COLOR, SELECTION_STROKE_WIDTH,
};
use crate::surface::{Path, Surface, fill_style, stroke_style};

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned bounds of a vertex list, with the derived center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of `points`. An empty list yields the zero box at the origin.
    #[must_use]
    pub fn of(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let mut bounds = Self { min_x: first.x, max_x: first.x, min_y: first.y, max_y: first.y };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        bounds
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.min_x + (self.max_x - self.min_x) / 2.0
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.min_y + (self.max_y - self.min_y) / 2.0
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Corners in order: top-left, top-right, bottom-right, bottom-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }
}

fn default_fill() -> String {
    DEFAULT_FILL.to_owned()
}

/// One polygon on the canvas.
///
/// Serializes as `{ "vertices": [{x, y}...], "rotation": number, "fillColor": string }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Figure {
    vertices: Vec<Point>,
    #[serde(default)]
    rotation: f64,
    #[serde(default = "default_fill")]
    fill_color: String,
}

impl Figure {
    /// Build a figure. `fill_color` is an "R, G, B" channel string.
    #[must_use]
    pub fn new(vertices: Vec<Point>, rotation: f64, fill_color: impl Into<String>) -> Self {
        Self { vertices, rotation, fill_color: fill_color.into() }
    }

    /// Stored (un-rotated) vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Rotation in radians about the un-rotated bounding-box center.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub fn fill_color(&self) -> &str {
        &self.fill_color
    }

    /// Bounds of the stored vertices, ignoring rotation.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::of(&self.vertices)
    }

    /// Rotate arbitrary points by the figure's rotation about its pivot.
    #[must_use]
    pub fn rotated_points(&self, points: &[Point]) -> Vec<Point> {
        let pivot = self.bounds().center();
        let (sin, cos) = self.rotation.sin_cos();
        points
            .iter()
            .map(|p| {
                let dx = p.x - pivot.x;
                let dy = p.y - pivot.y;
                Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
            })
            .collect()
    }

    /// Closed outline through the rotated vertices.
    #[must_use]
    pub fn outline(&self) -> Path {
        Path::Polygon(self.rotated_points(&self.vertices))
    }

    /// On-canvas position of the rotation anchor (the top-left bounding-box corner).
    #[must_use]
    pub fn rotation_anchor(&self) -> Point {
        let b = self.bounds();
        let rotated = self.rotated_points(&[Point::new(b.min_x, b.min_y)]);
        rotated[0]
    }

    /// Fill at half alpha, then stroke at full alpha.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let outline = self.outline();
        surface.fill(&outline, &fill_style(&self.fill_color))?;
        surface.stroke(&outline, &stroke_style(&self.fill_color), FIGURE_STROKE_WIDTH)
    }

    /// Shift every vertex. Rotation is untouched.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for v in &mut self.vertices {
            v.x += dx;
            v.y += dy;
        }
    }

    /// Whether `point` lies inside the rotated outline.
    #[must_use]
    pub fn is_pointer_over<S: Surface>(&self, surface: &S, point: Point) -> bool {
        surface.contains(&self.outline(), point)
    }

    /// Stroke the rotated bounding box and draw the rotation handle.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn draw_selection_frame<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let corners = self.rotated_points(&self.bounds().corners());
        let handle = Path::Circle { center: corners[0], radius: HANDLE_DRAW_RADIUS_PX };
        surface.stroke(&Path::Polygon(corners), SELECTION_STROKE_COLOR, SELECTION_STROKE_WIDTH)?;
        surface.fill(&handle, ACCENT_COLOR)
    }

    /// Whether `point` is within grabbing distance of the rotation handle.
    #[must_use]
    pub fn is_pointer_near_rotation_handle<S: Surface>(&self, surface: &S, point: Point) -> bool {
        let disc = Path::Circle { center: self.rotation_anchor(), radius: HANDLE_HIT_RADIUS_PX };
        surface.contains(&disc, point)
    }

    /// Absolute rotation that puts the anchor corner on the ray toward the pointer.
    #[must_use]
    pub fn angle_for_rotation(&self, pointer: Point) -> f64 {
        let b = self.bounds();
        let center = b.center();
        let anchor_angle = (b.min_y - center.y).atan2(b.min_x - center.x);
        let pointer_angle = (pointer.y - center.y).atan2(pointer.x - center.x);
        pointer_angle - anchor_angle
    }

    /// Point the rotation anchor at `pointer`. Replaces the rotation outright.
    pub fn rotate_toward(&mut self, pointer: Point) {
        self.rotation = self.angle_for_rotation(pointer);
    }

    pub fn set_rotation(&mut self, radians: f64) {
        self.rotation = radians;
    }
}
