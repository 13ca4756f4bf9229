//! Figure collection and the persisted polygon-set format.
//!
//! `FigureStore` keeps figures in insertion order, which doubles as draw
//! order: later figures paint over earlier ones. A polygon set crosses the
//! host boundary as a JSON array of [`Figure`]s.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use crate::figure::Figure;

/// Index of a figure within the store.
pub type FigureIndex = usize;

/// Insertion-ordered collection of figures owned by one session.
#[derive(Debug, Clone, Default)]
pub struct FigureStore {
    figures: Vec<Figure>,
}

impl FigureStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection.
    pub fn load_snapshot(&mut self, figures: Vec<Figure>) {
        self.figures = figures;
    }

    /// Append a figure and return its index.
    pub fn push(&mut self, figure: Figure) -> FigureIndex {
        self.figures.push(figure);
        self.figures.len() - 1
    }

    pub fn clear(&mut self) {
        self.figures.clear();
    }

    #[must_use]
    pub fn get(&self, index: FigureIndex) -> Option<&Figure> {
        self.figures.get(index)
    }

    pub fn get_mut(&mut self, index: FigureIndex) -> Option<&mut Figure> {
        self.figures.get_mut(index)
    }

    /// Figures in draw order (bottom first).
    pub fn iter(&self) -> impl Iterator<Item = &Figure> {
        self.figures.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Copy of the current collection, suitable for persisting.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Figure> {
        self.figures.clone()
    }
}

/// Decode a persisted polygon set.
///
/// # Errors
///
/// Returns the JSON error if `json` is not an array of figures.
pub fn decode_polygon_set(json: &str) -> Result<Vec<Figure>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Encode a polygon set for persisting.
///
/// # Errors
///
/// Returns the serializer error, if any.
pub fn encode_polygon_set(figures: &[Figure]) -> Result<String, serde_json::Error> {
    serde_json::to_string(figures)
}
