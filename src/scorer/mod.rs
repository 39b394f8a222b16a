pub mod candidates;
pub mod metrics;
pub mod types;

use self::metrics::{compactness, count_outliers, density_pct, CrossingStats};
pub use self::types::{Candidate, LayoutMetrics};
use crate::config::ScoringWeights;
use crate::grid::{CharTable, Grid, Placement};

#[derive(Debug, Clone, Default)]
pub struct Scorer {
    pub weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Ranked placements of `word` against `grid`.
    pub fn find_candidates<'a>(
        &self,
        grid: &Grid,
        word: &str,
        others: impl IntoIterator<Item = &'a str>,
        limit: usize,
    ) -> Vec<Candidate> {
        candidates::find_candidates(&self.weights, grid, word, others, limit)
    }

    /// Fast fitness used to order beam states: crossings per word scaled by
    /// compactness.
    pub fn beam_score(&self, grid: &Grid, placements: &[Placement]) -> f32 {
        let crossings = CrossingStats::from_placements(placements);
        crossings.average() * compactness(grid, placements.len()) * self.weights.weight_beam_score
    }

    /// Full metrics for a finished attempt. `table` must be the bounding-box
    /// snapshot of `grid`.
    pub fn score_finished(
        &self,
        grid: &Grid,
        placements: &[Placement],
        table: &CharTable,
        total_words: usize,
    ) -> LayoutMetrics {
        let w = &self.weights;
        let bounds = grid.bounds();
        let crossings = CrossingStats::from_placements(placements);
        let avg = crossings.average();
        let compact = compactness(grid, placements.len());
        let density = density_pct(grid);
        let enclosed = table.enclosed_cells().len();
        let outliers = count_outliers(table);

        let beam_score = avg * compact * w.weight_beam_score;
        let area_term = bounds.area() as f32 * w.weight_area + enclosed as f32;
        let outlier_penalty = (outliers * outliers) as f32 * w.penalty_outlier_quadratic
            + outliers as f32 * w.penalty_outlier_linear;
        let score = beam_score + area_term * density * w.weight_density_blend - outlier_penalty;

        LayoutMetrics {
            score,
            beam_score,
            density_pct: density,
            compactness: compact,
            width: bounds.width(),
            height: bounds.height(),
            enclosed_cells: enclosed,
            outliers,
            intersections: crossings.total,
            avg_intersections: avg,
            placed_words: placements.len(),
            total_words,
        }
    }
}
