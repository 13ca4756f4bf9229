#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{FigureIndex, FigureStore};
use crate::figure::Point;
use crate::input::Cursor;
use crate::surface::Surface;

/// Which part of a figure was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    RotateHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub index: FigureIndex,
    pub part: HitPart,
}

impl Hit {
    /// Hover cursor for this hit.
    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self.part {
            HitPart::Body => Cursor::Grab,
            HitPart::RotateHandle => Cursor::Move,
        }
    }
}

/// Test which figure (if any) is under `pt`.
///
/// Rotation handles of every figure are checked before any body, and within
/// each pass the earliest figure in the collection wins.
#[must_use]
pub fn hit_test<S: Surface>(pt: Point, doc: &FigureStore, surface: &S) -> Option<Hit> {
    let handle = doc
        .iter()
        .position(|f| f.is_pointer_near_rotation_handle(surface, pt))
        .map(|index| Hit { index, part: HitPart::RotateHandle });
    handle.or_else(|| {
        doc.iter()
            .position(|f| f.is_pointer_over(surface, pt))
            .map(|index| Hit { index, part: HitPart::Body })
    })
}

/// Hover cursor for `pt`.
#[must_use]
pub fn hover_cursor<S: Surface>(pt: Point, doc: &FigureStore, surface: &S) -> Cursor {
    hit_test(pt, doc, surface).map_or(Cursor::Default, Hit::cursor)
}
