//! Editing session: one lifecycle from open to persist or discard.
//!
//! A session owns its surface, its controller, and every pointer listener
//! acquired for it. Ending the session (persist, discard, or drop) releases
//! the listeners and throws away any unfinished polygon.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tracing::{debug, info};

use crate::engine::{Action, EngineCore};
use crate::figure::Figure;
use crate::input::PointerEvent;
use crate::surface::Surface;

/// A resource held for the lifetime of a session, such as a DOM listener.
pub trait Subscription {
    /// Detach from the source. Must be safe to call more than once.
    fn release(&mut self);
}

/// Subscriptions released together, at the latest when dropped.
#[derive(Default)]
pub struct Subscriptions {
    active: Vec<Box<dyn Subscription>>,
}

impl Subscriptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: impl Subscription + 'static) {
        self.active.push(Box::new(subscription));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn release_all(&mut self) {
        for mut subscription in self.active.drain(..) {
            subscription.release();
        }
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.release_all();
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Store this polygon set for the active record.
    Persist(Vec<Figure>),
    /// Leave the stored polygon set untouched.
    Discard,
}

/// One editing session over a `width` × `height` background.
pub struct Session<S: Surface> {
    surface: S,
    core: EngineCore,
    subscriptions: Subscriptions,
}

impl<S: Surface> Session<S> {
    /// Start a session from a previously persisted polygon set and draw it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the first render fails.
    pub fn open(surface: S, width: f64, height: f64, figures: Vec<Figure>) -> Result<Self, S::Error> {
        let mut core = EngineCore::new();
        core.set_canvas_size(width, height);
        core.load_snapshot(figures);
        debug!(width, height, figures = core.doc.len(), "session opened");

        let mut session = Self { surface, core, subscriptions: Subscriptions::new() };
        session.core.render(&mut session.surface)?;
        Ok(session)
    }

    /// Keep `subscription` alive until the session ends.
    pub fn subscribe(&mut self, subscription: impl Subscription + 'static) {
        self.subscriptions.push(subscription);
    }

    /// Handle one pointer event, redrawing on the same turn when needed.
    ///
    /// Returns the actions left for the host (cursor changes, creations).
    ///
    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    pub fn dispatch(&mut self, event: PointerEvent) -> Result<Vec<Action>, S::Error> {
        let mut actions = self.core.handle(&self.surface, event);
        if actions.contains(&Action::RenderNeeded) {
            self.core.render(&mut self.surface)?;
            actions.retain(|a| *a != Action::RenderNeeded);
        }
        Ok(actions)
    }

    /// Redraw a throttled preview if it has come due at `now_ms`.
    ///
    /// Returns whether a frame was drawn.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    pub fn flush_preview(&mut self, now_ms: f64) -> Result<bool, S::Error> {
        let due = self.core.flush_preview(now_ms).contains(&Action::RenderNeeded);
        if due {
            self.core.render(&mut self.surface)?;
        }
        Ok(due)
    }

    /// Remove every figure and redraw immediately.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    pub fn clear_all(&mut self) -> Result<(), S::Error> {
        self.core.clear_all();
        self.core.render(&mut self.surface)
    }

    pub fn set_fill_color(&mut self, channels: &str) {
        self.core.set_fill_color(channels);
    }

    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriptions(&self) -> usize {
        self.subscriptions.len()
    }

    /// End the session and hand back the polygon set to store.
    #[must_use]
    pub fn persist(mut self) -> Outcome {
        self.subscriptions.release_all();
        let figures = self.core.snapshot();
        info!(figures = figures.len(), "session persisted");
        Outcome::Persist(figures)
    }

    /// End the session without storing anything.
    #[must_use]
    pub fn discard(mut self) -> Outcome {
        self.subscriptions.release_all();
        info!("session discarded");
        Outcome::Discard
    }
}
