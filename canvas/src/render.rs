//! Rendering: draws the full scene to a [`Surface`].
//!
//! Every redraw is complete: clear, every figure bottom-first, the selection
//! frame of the selected figure, then the drawing preview. This module reads
//! state and never mutates it.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::FIGURE_STROKE_WIDTH;
use crate::doc::FigureStore;
use crate::input::{Sketch, UiState};
use crate::surface::{Path, Surface, stroke_style};

/// Draw the full scene on a `width` × `height` surface.
///
/// # Errors
///
/// Returns `Err` if any surface call fails.
pub fn draw<S: Surface>(
    surface: &mut S,
    doc: &FigureStore,
    ui: &UiState,
    sketch: Option<&Sketch>,
    width: f64,
    height: f64,
) -> Result<(), S::Error> {
    surface.clear(width, height);

    for figure in doc.iter() {
        figure.render(surface)?;
    }

    if let Some(selected) = ui.selected.and_then(|i| doc.get(i)) {
        selected.draw_selection_frame(surface)?;
    }

    if let Some(sketch) = sketch {
        draw_sketch(surface, sketch, &ui.fill_color)?;
    }

    Ok(())
}

/// Committed vertices as an open chain, plus the rubber-band segment to the pointer.
fn draw_sketch<S: Surface>(surface: &mut S, sketch: &Sketch, fill_color: &str) -> Result<(), S::Error> {
    let color = stroke_style(fill_color);

    surface.stroke(&Path::Polyline(sketch.vertices.clone()), &color, FIGURE_STROKE_WIDTH)?;

    if let (Some(last), Some(cursor)) = (sketch.vertices.last(), sketch.cursor) {
        surface.stroke(&Path::Polyline(vec![*last, cursor]), &color, FIGURE_STROKE_WIDTH)?;
    }
    Ok(())
}
