use crate::grid::{Coord, Orientation, Placement};
use serde::{Deserialize, Serialize};

/// One scored way to lay a word onto the current grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub origin: Coord,
    pub orientation: Orientation,
    pub score: f32,
    pub intersections: usize,
}

impl Candidate {
    pub fn placement(&self, word: &str) -> Placement {
        Placement::new(word, self.origin, self.orientation)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    // Top-line Scores
    pub score: f32,
    pub beam_score: f32,

    // Shape
    pub density_pct: f32,
    pub compactness: f32,
    pub width: usize,
    pub height: usize,
    pub enclosed_cells: usize,
    pub outliers: usize,

    // Crossings
    pub intersections: usize,
    pub avg_intersections: f32,

    // Coverage
    pub placed_words: usize,
    pub total_words: usize,
}

impl LayoutMetrics {
    pub fn leftover_words(&self) -> usize {
        self.total_words.saturating_sub(self.placed_words)
    }
}
