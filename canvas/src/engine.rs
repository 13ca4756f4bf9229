use tracing::debug;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{MIN_FIGURE_VERTICES, PREVIEW_THROTTLE_MS};
use crate::doc::{FigureIndex, FigureStore};
use crate::figure::{Bounds, Figure, Point};
use crate::hit::{self, HitPart};
use crate::input::{CanvasMode, Cursor, DragGesture, InputState, PointerEvent, PointerKind, Sketch, Throttle, UiState};
use crate::render;
use crate::session::{Outcome, Session, Subscription};
use crate::surface::Surface;
use crate::viewport::{self, Viewport};
use crate::web;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A closed polygon was promoted into the figure at this index.
    FigureCreated(FigureIndex),
    /// A closed polygon had too few vertices and was dropped.
    SketchDiscarded,
    SetCursor(Cursor),
    RenderNeeded,
}

/// Controller state that doesn't depend on the canvas element.
///
/// Drives any [`Surface`], including the recording one used in tests.
pub struct EngineCore {
    pub doc: FigureStore,
    pub ui: UiState,
    pub input: InputState,
    pub canvas_width: f64,
    pub canvas_height: f64,
    preview: Throttle,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: FigureStore::new(),
            ui: UiState::default(),
            input: InputState::default(),
            canvas_width: 0.0,
            canvas_height: 0.0,
            preview: Throttle::new(PREVIEW_THROTTLE_MS),
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Set the canvas size that drags are clamped to.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Hydrate the collection from a persisted polygon set and return to idle.
    pub fn load_snapshot(&mut self, figures: Vec<Figure>) {
        self.doc.load_snapshot(figures);
        self.ui.selected = None;
        self.input = InputState::Idle;
        self.preview.reset();
    }

    /// Remove every figure. An in-progress polygon survives.
    pub fn clear_all(&mut self) -> Action {
        self.doc.clear();
        self.ui.selected = None;
        if matches!(self.input, InputState::Dragging { .. }) {
            self.input = InputState::Idle;
        }
        debug!("figures cleared");
        Action::RenderNeeded
    }

    /// Set the "R, G, B" channels used for the next finished polygon.
    pub fn set_fill_color(&mut self, channels: impl Into<String>) {
        self.ui.fill_color = channels.into();
    }

    // --- Input events ---

    /// Route one pointer event to its handler.
    pub fn handle<S: Surface>(&mut self, surface: &S, event: PointerEvent) -> Vec<Action> {
        match event.kind {
            PointerKind::Down => self.on_pointer_down(surface, event.point),
            PointerKind::Move => self.on_pointer_move(surface, event.point, event.time_ms),
            PointerKind::Up => self.on_pointer_up(),
        }
    }

    /// How a pointer-down at `pt` would be interpreted from the current state.
    ///
    /// Figure hits win over an in-progress polygon.
    #[must_use]
    pub fn classify_press<S: Surface>(&self, surface: &S, pt: Point) -> CanvasMode {
        match hit::hit_test(pt, &self.doc, surface).map(|h| h.part) {
            Some(HitPart::RotateHandle) => CanvasMode::Rotating,
            Some(HitPart::Body) => CanvasMode::Moving,
            None if matches!(self.input, InputState::Drawing(_)) => CanvasMode::Drawing,
            None => CanvasMode::Idle,
        }
    }

    /// Handles, then bodies, then the in-progress polygon. A press on a figure
    /// while drawing drops the unfinished polygon and starts the drag.
    pub fn on_pointer_down<S: Surface>(&mut self, surface: &S, pt: Point) -> Vec<Action> {
        let hit = hit::hit_test(pt, &self.doc, surface);

        if hit.is_none() {
            if let InputState::Drawing(sketch) = &mut self.input {
                if sketch.closes_at(pt) {
                    return self.finish_sketch();
                }
                sketch.vertices.push(pt);
                debug!(vertices = sketch.vertices.len(), x = pt.x, y = pt.y, "vertex committed");
                return vec![Action::RenderNeeded];
            }
        }

        match &self.input {
            InputState::Dragging { .. } => debug!("pointer-down while dragging; drag ended"),
            InputState::Drawing(sketch) => debug!(vertices = sketch.vertices.len(), "polygon abandoned"),
            InputState::Idle => {}
        }
        self.input = InputState::Idle;
        self.preview.reset();

        let mut actions = Vec::new();
        match hit {
            Some(hit) => {
                let gesture = match hit.part {
                    HitPart::RotateHandle => DragGesture::Rotate,
                    HitPart::Body => DragGesture::Move,
                };
                debug!(index = hit.index, ?gesture, "drag started");
                self.ui.selected = Some(hit.index);
                self.input = InputState::Dragging { index: hit.index, gesture, last: pt };
                if gesture == DragGesture::Move {
                    actions.extend(self.set_cursor(Cursor::Grabbing));
                }
            }
            None => {
                debug!(x = pt.x, y = pt.y, "polygon started");
                self.ui.selected = None;
                self.input = InputState::Drawing(Sketch::start(pt));
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move<S: Surface>(&mut self, surface: &S, pt: Point, time_ms: f64) -> Vec<Action> {
        if matches!(self.input, InputState::Idle) {
            let cursor = hit::hover_cursor(pt, &self.doc, surface);
            return self.set_cursor(cursor);
        }

        match &mut self.input {
            InputState::Drawing(sketch) => {
                sketch.cursor = Some(pt);
                if self.preview.ready(time_ms) {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            InputState::Dragging { index, gesture, last } => {
                let dx = pt.x - last.x;
                let dy = pt.y - last.y;
                *last = pt;
                let Some(figure) = self.doc.get_mut(*index) else {
                    return Vec::new();
                };
                match gesture {
                    DragGesture::Move => {
                        let (dx, dy) = clamp_delta(figure.bounds(), dx, dy, self.canvas_width, self.canvas_height);
                        figure.translate(dx, dy);
                    }
                    DragGesture::Rotate => figure.rotate_toward(pt),
                }
                vec![Action::RenderNeeded]
            }
            InputState::Idle => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        match &self.input {
            InputState::Dragging { index, gesture, .. } => {
                debug!(index = *index, ?gesture, "drag finished");
                let gesture = *gesture;
                self.input = InputState::Idle;
                if gesture == DragGesture::Move {
                    self.set_cursor(Cursor::Grab)
                } else {
                    Vec::new()
                }
            }
            InputState::Drawing(_) if self.preview.take_pending() => vec![Action::RenderNeeded],
            InputState::Drawing(_) | InputState::Idle => Vec::new(),
        }
    }

    /// Redraw a throttled preview once the pointer has rested for an interval.
    ///
    /// Hosts call this from a timer armed when [`Self::preview_pending`] is
    /// true after a move.
    pub fn flush_preview(&mut self, now_ms: f64) -> Vec<Action> {
        if matches!(self.input, InputState::Drawing(_)) && self.preview.flush(now_ms) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Whether the preview is behind the pointer.
    #[must_use]
    pub fn preview_pending(&self) -> bool {
        matches!(self.input, InputState::Drawing(_)) && self.preview.is_pending()
    }

    fn finish_sketch(&mut self) -> Vec<Action> {
        let InputState::Drawing(sketch) = std::mem::take(&mut self.input) else {
            return Vec::new();
        };
        self.preview.reset();

        let count = sketch.vertices.len();
        let created = if count >= MIN_FIGURE_VERTICES {
            let figure = Figure::new(sketch.vertices, 0.0, self.ui.fill_color.clone());
            let index = self.doc.push(figure);
            self.ui.selected = Some(index);
            debug!(index, vertices = count, "polygon closed");
            Action::FigureCreated(index)
        } else {
            debug!(vertices = count, "polygon too small; discarded");
            Action::SketchDiscarded
        };
        vec![created, Action::RenderNeeded]
    }

    fn set_cursor(&mut self, cursor: Cursor) -> Vec<Action> {
        if self.ui.cursor == cursor {
            return Vec::new();
        }
        self.ui.cursor = cursor;
        vec![Action::SetCursor(cursor)]
    }

    // --- Render ---

    /// Redraw the full scene.
    ///
    /// # Errors
    ///
    /// Propagates surface failures.
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        render::draw(surface, &self.doc, &self.ui, self.sketch(), self.canvas_width, self.canvas_height)
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> CanvasMode {
        self.input.mode()
    }

    /// The currently selected figure, if any.
    #[must_use]
    pub fn selection(&self) -> Option<FigureIndex> {
        self.ui.selected
    }

    #[must_use]
    pub fn figure(&self, index: FigureIndex) -> Option<&Figure> {
        self.doc.get(index)
    }

    /// The polygon being drawn, if any.
    #[must_use]
    pub fn sketch(&self) -> Option<&Sketch> {
        match &self.input {
            InputState::Drawing(sketch) => Some(sketch),
            _ => None,
        }
    }

    /// The current collection, ready to persist.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Figure> {
        self.doc.snapshot()
    }
}

/// Clamp a proposed translation so `bounds` stays inside a `width` × `height` canvas.
///
/// Each axis is clamped independently against the current bounds, so a
/// figure dragged into a wall stops flush against it.
#[must_use]
pub fn clamp_delta(bounds: Bounds, dx: f64, dy: f64, width: f64, height: f64) -> (f64, f64) {
    let mut dx = dx;
    let mut dy = dy;
    if bounds.min_x + dx < 0.0 {
        dx = -bounds.min_x;
    }
    if bounds.max_x + dx > width {
        dx = width - bounds.max_x;
    }
    if bounds.min_y + dy < 0.0 {
        dy = -bounds.min_y;
    }
    if bounds.max_y + dy > height {
        dy = height - bounds.max_y;
    }
    (dx, dy)
}

/// The full canvas engine. Owns the browser canvas element and the active session.
pub struct Engine {
    canvas: HtmlCanvasElement,
    session: Option<Session<CanvasRenderingContext2d>>,
}

impl Engine {
    /// Create an engine bound to the given canvas element. No session is open yet.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, session: None }
    }

    /// Open an editing session over a loaded background image.
    ///
    /// The canvas takes the image's natural size. Any previous session is
    /// discarded and its listeners released.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a DOM call fails.
    pub fn open(&mut self, image_src: &str, width: u32, height: u32, figures: Vec<Figure>) -> Result<(), JsValue> {
        if let Some(previous) = self.session.take() {
            debug!("previous session discarded");
            drop(previous.discard());
        }
        let ctx = web::context_2d(&self.canvas)?;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.canvas
            .style()
            .set_property("background-image", &format!("url({image_src})"))?;
        self.session = Some(Session::open(ctx, f64::from(width), f64::from(height), figures)?);
        Ok(())
    }

    /// Tie a listener's lifetime to the open session.
    pub fn subscribe(&mut self, subscription: impl Subscription + 'static) {
        match self.session.as_mut() {
            Some(session) => session.subscribe(subscription),
            None => {
                let mut subscription = subscription;
                subscription.release();
            }
        }
    }

    // --- Input events ---

    /// Feed one canvas-space pointer event through the session.
    ///
    /// # Errors
    ///
    /// Returns `Err` if redrawing or updating the cursor fails.
    pub fn on_pointer(&mut self, event: PointerEvent) -> Result<(), JsValue> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        for action in session.dispatch(event)? {
            if let Action::SetCursor(cursor) = action {
                self.canvas.style().set_property("cursor", cursor.as_css())?;
            }
        }
        Ok(())
    }

    /// Draw a preview update the throttle held back.
    ///
    /// # Errors
    ///
    /// Returns `Err` if redrawing fails.
    pub fn flush_preview(&mut self, now_ms: f64) -> Result<(), JsValue> {
        match self.session.as_mut() {
            Some(session) => {
                session.flush_preview(now_ms)?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn preview_pending(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.core().preview_pending())
    }

    /// Convert client (CSS) coordinates to canvas pixels.
    #[must_use]
    pub fn client_to_canvas(&self, client_x: f64, client_y: f64) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        let viewport = Viewport {
            left: rect.x(),
            top: rect.y(),
            css_width: rect.width(),
            css_height: rect.height(),
            canvas_width: f64::from(self.canvas.width()),
            canvas_height: f64::from(self.canvas.height()),
        };
        viewport.client_to_canvas(Point::new(client_x, client_y))
    }

    /// Scale for the editor popup in the current window.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the window size cannot be read.
    pub fn popup_scale() -> Result<f64, JsValue> {
        let (width, height) = web::window_size()?;
        Ok(viewport::fit_scale(width, height))
    }

    // --- Session commands ---

    pub fn set_fill_color(&mut self, channels: &str) {
        if let Some(session) = self.session.as_mut() {
            session.set_fill_color(channels);
        }
    }

    /// Remove every figure and redraw.
    ///
    /// # Errors
    ///
    /// Returns `Err` if redrawing fails.
    pub fn clear_all(&mut self) -> Result<(), JsValue> {
        match self.session.as_mut() {
            Some(session) => session.clear_all(),
            None => Ok(()),
        }
    }

    /// End the session, returning the polygon set to persist.
    pub fn persist(&mut self) -> Option<Outcome> {
        self.session.take().map(Session::persist)
    }

    /// End the session without persisting.
    pub fn discard(&mut self) -> Option<Outcome> {
        self.session.take().map(Session::discard)
    }

    // --- Queries ---

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    #[must_use]
    pub fn core(&self) -> Option<&EngineCore> {
        self.session.as_ref().map(Session::core)
    }
}
