//! Browser bindings: the `Surface` impl over `CanvasRenderingContext2d` and
//! DOM pointer listeners scoped to a session.
//!
//! This module is the only place that touches [`web_sys`] drawing and event
//! APIs. Pointer-move and pointer-up are attached to the document, not the
//! canvas, so a drag keeps tracking after the pointer leaves the element.

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::{Rc, Weak};

use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, EventTarget, HtmlCanvasElement, MouseEvent, Path2d};

use crate::consts::{PREVIEW_FLUSH_DELAY_MS, PREVIEW_THROTTLE_MS};
use crate::engine::Engine;
use crate::figure::Point;
use crate::input::{PointerEvent, PointerKind};
use crate::session::Subscription;
use crate::surface::{Path, Surface};

impl Surface for CanvasRenderingContext2d {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill(&mut self, path: &Path, color: &str) -> Result<(), JsValue> {
        let path = to_path2d(path)?;
        self.set_fill_style_str(color);
        self.fill_with_path_2d(&path);
        Ok(())
    }

    fn stroke(&mut self, path: &Path, color: &str, width: f64) -> Result<(), JsValue> {
        let path = to_path2d(path)?;
        self.set_stroke_style_str(color);
        self.set_line_width(width);
        self.stroke_with_path(&path);
        Ok(())
    }

    fn contains(&self, path: &Path, point: Point) -> bool {
        match to_path2d(path) {
            Ok(path2d) => self.is_point_in_path_with_path_2d_and_f64(&path2d, point.x, point.y),
            Err(err) => {
                warn!(?err, "path construction failed during hit test");
                false
            }
        }
    }
}

/// Build a `Path2d`. Empty point lists give an empty path.
fn to_path2d(path: &Path) -> Result<Path2d, JsValue> {
    let out = Path2d::new()?;
    match path {
        Path::Polygon(points) | Path::Polyline(points) => {
            let Some((first, rest)) = points.split_first() else {
                return Ok(out);
            };
            out.move_to(first.x, first.y);
            for p in rest {
                out.line_to(p.x, p.y);
            }
            if matches!(path, Path::Polygon(_)) {
                out.close_path();
            }
        }
        Path::Circle { center, radius } => {
            out.arc(center.x, center.y, *radius, 0.0, 2.0 * PI)?;
        }
    }
    Ok(out)
}

/// The canvas element's 2D context.
///
/// # Errors
///
/// Returns `Err` if the browser refuses a 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// Inner size of the browser window in CSS pixels.
///
/// # Errors
///
/// Returns `Err` outside a window context.
pub fn window_size() -> Result<(f64, f64), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let width = window.inner_width()?.as_f64().unwrap_or_default();
    let height = window.inner_height()?.as_f64().unwrap_or_default();
    Ok((width, height))
}

/// A DOM event listener removed from its target on release.
pub struct DomListener {
    target: EventTarget,
    event: &'static str,
    callback: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl DomListener {
    /// Attach `handler` to `event` on `target`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the browser rejects the listener.
    pub fn listen(
        target: EventTarget,
        event: &'static str,
        handler: impl FnMut(MouseEvent) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(MouseEvent)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { target, event, callback: Some(callback) })
    }
}

impl Subscription for DomListener {
    fn release(&mut self) {
        let Some(callback) = self.callback.take() else {
            return;
        };
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, callback.as_ref().unchecked_ref())
        {
            warn!(event_type = self.event, ?err, "failed to remove listener");
        }
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        self.release();
    }
}

/// Wire mouse events to the engine's open session.
///
/// Pointer-down listens on the canvas; move and up listen on the document.
/// The listeners hold only a weak reference to the engine and are released
/// when the session ends.
///
/// # Errors
///
/// Returns `Err` if there is no document or a listener cannot be attached.
pub fn attach_pointer_listeners(engine: &Rc<RefCell<Engine>>) -> Result<(), JsValue> {
    let canvas = engine.borrow().canvas().clone();
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let down = DomListener::listen(canvas.into(), "mousedown", forward(engine, PointerKind::Down))?;
    let moved = DomListener::listen(document.clone().into(), "mousemove", forward(engine, PointerKind::Move))?;
    let up = DomListener::listen(document.into(), "mouseup", forward(engine, PointerKind::Up))?;

    let mut engine = engine.borrow_mut();
    engine.subscribe(down);
    engine.subscribe(moved);
    engine.subscribe(up);
    Ok(())
}

fn forward(engine: &Rc<RefCell<Engine>>, kind: PointerKind) -> impl FnMut(MouseEvent) + 'static {
    let weak: Weak<RefCell<Engine>> = Rc::downgrade(engine);
    move |event: MouseEvent| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let Ok(mut engine) = shared.try_borrow_mut() else {
            return;
        };
        if kind == PointerKind::Down {
            event.prevent_default();
        }
        let point = engine.client_to_canvas(f64::from(event.client_x()), f64::from(event.client_y()));
        let time_ms = event.time_stamp();
        if let Err(err) = engine.on_pointer(PointerEvent { kind, point, time_ms }) {
            warn!(?err, ?kind, "pointer event failed");
        }
        if kind == PointerKind::Move && engine.preview_pending() {
            schedule_preview_flush(weak.clone(), time_ms);
        }
    }
}

/// Arm a one-shot timer that draws the preview the throttle held back, so the
/// rubber band catches up with a pointer that stopped moving.
fn schedule_preview_flush(engine: Weak<RefCell<Engine>>, event_ms: f64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let due_ms = event_ms + PREVIEW_THROTTLE_MS;
    let callback = Closure::once_into_js(move || {
        let Some(shared) = engine.upgrade() else {
            return;
        };
        let Ok(mut engine) = shared.try_borrow_mut() else {
            return;
        };
        if let Err(err) = engine.flush_preview(due_ms) {
            warn!(?err, "preview flush failed");
        }
    });
    if let Err(err) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), PREVIEW_FLUSH_DELAY_MS)
    {
        warn!(?err, "failed to arm preview flush");
    }
}
