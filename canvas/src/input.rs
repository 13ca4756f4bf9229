//! Input model: typed pointer events, the interaction state machine, and the
//! in-progress polygon.
//!
//! `PointerEvent` is the boundary type: whatever produced the event (mouse,
//! pen, touch, a replayed script) is reduced to a kind, a canvas-space point,
//! and a timestamp. `InputState` is the active gesture tracked between
//! pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::{CLOSING_RADIUS_PX, DEFAULT_FILL, MIN_VERTICES_TO_CLOSE};
use crate::doc::FigureIndex;
use crate::figure::Point;

/// Pointer event phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub point: Point,
    /// Event time in milliseconds. Only differences matter.
    pub time_ms: f64,
}

impl PointerEvent {
    #[must_use]
    pub fn down(x: f64, y: f64, time_ms: f64) -> Self {
        Self { kind: PointerKind::Down, point: Point::new(x, y), time_ms }
    }

    #[must_use]
    pub fn moved(x: f64, y: f64, time_ms: f64) -> Self {
        Self { kind: PointerKind::Move, point: Point::new(x, y), time_ms }
    }

    #[must_use]
    pub fn up(x: f64, y: f64, time_ms: f64) -> Self {
        Self { kind: PointerKind::Up, point: Point::new(x, y), time_ms }
    }
}

/// The externally visible interaction mode.
///
/// `Moving` and `Rotating` are the classification of a pointer-down; the
/// controller confirms them immediately into `Drag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasMode {
    #[default]
    Idle,
    Drawing,
    Moving,
    Rotating,
    Drag,
}

/// What a confirmed drag does to its figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragGesture {
    /// Translate by pointer deltas, clamped to the canvas.
    Move,
    /// Re-aim the rotation anchor at the pointer.
    Rotate,
}

/// Pointer cursor hint for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Over a figure body.
    Grab,
    /// Translating a figure.
    Grabbing,
    /// Over a rotation handle.
    Move,
}

impl Cursor {
    /// CSS `cursor` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::Move => "move",
        }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    /// The figure whose selection frame is drawn, if any.
    pub selected: Option<FigureIndex>,
    /// Last cursor hint sent to the host.
    pub cursor: Cursor,
    /// "R, G, B" channels for newly drawn figures.
    pub fill_color: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self { selected: None, cursor: Cursor::Default, fill_color: DEFAULT_FILL.to_owned() }
    }
}

/// A polygon being drawn, one click per vertex.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sketch {
    /// Committed vertices, in click order.
    pub vertices: Vec<Point>,
    /// Live pointer position for the preview segment.
    pub cursor: Option<Point>,
}

impl Sketch {
    /// Start a sketch at its first vertex.
    #[must_use]
    pub fn start(first: Point) -> Self {
        Self { vertices: vec![first], cursor: None }
    }

    /// Whether a click at `point` closes the polygon rather than extending it.
    #[must_use]
    pub fn closes_at(&self, point: Point) -> bool {
        if self.vertices.len() < MIN_VERTICES_TO_CLOSE {
            return false;
        }
        self.vertices
            .first()
            .is_some_and(|first| first.distance_to(point) <= CLOSING_RADIUS_PX)
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; pointer moves only update the hover cursor.
    #[default]
    Idle,
    /// A polygon is being drawn; pointer-downs add or close vertices.
    Drawing(Sketch),
    /// A figure is being translated or rotated until pointer-up.
    Dragging {
        /// Index of the figure under the gesture.
        index: FigureIndex,
        gesture: DragGesture,
        /// Pointer position at the previous event, used for move deltas.
        last: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn mode(&self) -> CanvasMode {
        match self {
            Self::Idle => CanvasMode::Idle,
            Self::Drawing(_) => CanvasMode::Drawing,
            Self::Dragging { .. } => CanvasMode::Drag,
        }
    }
}

/// Rate limiter for preview redraws that remembers a skipped update.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: f64,
    last_ms: Option<f64>,
    pending: bool,
}

impl Throttle {
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, last_ms: None, pending: false }
    }

    /// Whether an update at `now_ms` should go through. A refused update is
    /// remembered as pending.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        let open = self.last_ms.is_none_or(|last| now_ms - last >= self.interval_ms);
        if open {
            self.last_ms = Some(now_ms);
            self.pending = false;
        } else {
            self.pending = true;
        }
        open
    }

    /// Whether an update was refused since the last one that went through.
    /// Clears the flag.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Whether a refused update is waiting for its trailing redraw.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Let a refused update through once the interval since the last one has
    /// passed at `now_ms`.
    pub fn flush(&mut self, now_ms: f64) -> bool {
        let due = self.pending && self.last_ms.is_none_or(|last| now_ms - last >= self.interval_ms);
        if due {
            self.last_ms = Some(now_ms);
            self.pending = false;
        }
        due
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
        self.pending = false;
    }
}
