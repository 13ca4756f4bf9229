//! Scripted editing sessions.
//!
//! A script is JSON Lines, one step per line, tagged by `op`:
//!
//! ```text
//! {"op":"down","x":100,"y":100}
//! {"op":"move","x":140,"y":120,"t":16}
//! {"op":"up","x":140,"y":120}
//! {"op":"color","channels":"255, 0, 0"}
//! {"op":"clear"}
//! {"op":"persist"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Pointer steps without
//! `t` advance the clock by one preview frame. A preview held back by the
//! throttle is drawn before the next non-pointer step. A script that never
//! reaches `persist` or `discard` ends as a discard.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::io::BufRead;

use canvas::consts::PREVIEW_THROTTLE_MS;
use canvas::engine::Action;
use canvas::figure::Figure;
use canvas::input::{Cursor, PointerEvent};
use canvas::recording::RecordingSurface;
use canvas::session::{Outcome, Session};
use serde::Deserialize;
use tracing::debug;

use crate::error::HostError;

/// One script line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        t: Option<f64>,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        t: Option<f64>,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        t: Option<f64>,
    },
    Color {
        channels: String,
    },
    Clear,
    Persist,
    Discard,
}

/// A step with the script line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: Step,
}

/// What a replayed session did.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub outcome: Outcome,
    pub created: usize,
    pub discarded: usize,
    pub frames: usize,
    pub cursor: Cursor,
}

/// Parse a script.
///
/// # Errors
///
/// Returns `Err` on a read failure or a line that is not a valid step.
pub fn parse(reader: impl BufRead) -> Result<Vec<ScriptLine>, HostError> {
    let mut steps = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|err| HostError::script(number, err.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step = serde_json::from_str(trimmed).map_err(|err| HostError::script(number, err.to_string()))?;
        steps.push(ScriptLine { line: number, step });
    }
    Ok(steps)
}

/// Replay `steps` through a session over a `width` × `height` canvas that
/// starts from `figures`.
///
/// # Errors
///
/// Returns `Err` if a step follows `persist` or `discard`.
pub fn run(steps: &[ScriptLine], width: f64, height: f64, figures: Vec<Figure>) -> Result<Report, HostError> {
    let Ok(mut session) = Session::open(RecordingSurface::new(), width, height, figures);
    let mut clock = Clock::default();
    let mut created = 0;
    let mut discarded = 0;
    let mut cursor = Cursor::Default;

    for (position, ScriptLine { line, step }) in steps.iter().enumerate() {
        let event = match step {
            Step::Down { x, y, t } => PointerEvent::down(*x, *y, clock.tick(*t)),
            Step::Move { x, y, t } => PointerEvent::moved(*x, *y, clock.tick(*t)),
            Step::Up { x, y, t } => PointerEvent::up(*x, *y, clock.tick(*t)),
            Step::Color { channels } => {
                settle(&mut session, &clock);
                session.set_fill_color(channels);
                continue;
            }
            Step::Clear => {
                settle(&mut session, &clock);
                let Ok(()) = session.clear_all();
                continue;
            }
            Step::Persist | Step::Discard => {
                if let Some(extra) = steps.get(position + 1) {
                    return Err(HostError::script(extra.line, "step after the session ended"));
                }
                settle(&mut session, &clock);
                let frames = session.surface().frames();
                let outcome = if *step == Step::Persist { session.persist() } else { session.discard() };
                return Ok(Report { outcome, created, discarded, frames, cursor });
            }
        };

        let Ok(actions) = session.dispatch(event);
        for action in actions {
            match action {
                Action::FigureCreated(index) => {
                    debug!(line, index, "figure created");
                    created += 1;
                }
                Action::SketchDiscarded => discarded += 1,
                Action::SetCursor(next) => cursor = next,
                Action::RenderNeeded => {}
            }
        }
    }

    settle(&mut session, &clock);
    let frames = session.surface().frames();
    Ok(Report { outcome: session.discard(), created, discarded, frames, cursor })
}

/// The pointer rests between pointer steps and other commands: draw any
/// preview the throttle held back.
fn settle(session: &mut Session<RecordingSurface>, clock: &Clock) {
    let Ok(flushed) = session.flush_preview(clock.now_ms + PREVIEW_THROTTLE_MS);
    if flushed {
        debug!(at = clock.now_ms, "preview caught up");
    }
}

/// Script time. Steps without a timestamp land one preview frame later.
#[derive(Debug, Default)]
struct Clock {
    now_ms: f64,
}

impl Clock {
    fn tick(&mut self, at: Option<f64>) -> f64 {
        self.now_ms = at.unwrap_or(self.now_ms + PREVIEW_THROTTLE_MS);
        self.now_ms
    }
}
