//! In-memory surface that records draw calls.
//!
//! Containment follows the canvas default (nonzero winding) for polygons and
//! treats circles as closed discs. Open polylines are tested as if closed,
//! matching how a 2D context tests an unclosed path.

#[cfg(test)]
#[path = "recording_test.rs"]
mod recording_test;

use std::convert::Infallible;

use crate::figure::Point;
use crate::surface::{Path, Surface};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { width: f64, height: f64 },
    Fill { path: Path, color: String },
    Stroke { path: Path, color: String, width: f64 },
}

/// Surface that keeps the draw calls since the last clear.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    frames: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded since (and including) the last clear.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of clears seen, i.e. full redraws started.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Fill calls in the current frame.
    pub fn fills(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Fill { path, color } => Some((path, color.as_str())),
            _ => None,
        })
    }

    /// Stroke calls in the current frame.
    pub fn strokes(&self) -> impl Iterator<Item = (&Path, &str, f64)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Stroke { path, color, width } => Some((path, color.as_str(), *width)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn clear(&mut self, width: f64, height: f64) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear { width, height });
        self.frames += 1;
    }

    fn fill(&mut self, path: &Path, color: &str) -> Result<(), Infallible> {
        if !path.is_empty() {
            self.ops.push(DrawOp::Fill { path: path.clone(), color: color.to_owned() });
        }
        Ok(())
    }

    fn stroke(&mut self, path: &Path, color: &str, width: f64) -> Result<(), Infallible> {
        if !path.is_empty() {
            self.ops.push(DrawOp::Stroke { path: path.clone(), color: color.to_owned(), width });
        }
        Ok(())
    }

    fn contains(&self, path: &Path, point: Point) -> bool {
        match path {
            Path::Polygon(points) | Path::Polyline(points) => winding_number(points, point) != 0,
            Path::Circle { center, radius } => *radius > 0.0 && center.distance_to(point) <= *radius,
        }
    }
}

/// Nonzero winding number of the closed ring through `points` around `p`.
fn winding_number(points: &[Point], p: Point) -> i32 {
    if points.len() < 3 {
        return 0;
    }
    let mut winding = 0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let side = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
        if a.y <= p.y {
            if b.y > p.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}
