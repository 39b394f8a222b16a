// ===== crossforge/src/optimizer/mod.rs =====
pub mod beam;
pub mod canonical;
pub mod completion;
pub mod runner;
pub mod worker;

pub use self::beam::{BeamParams, BeamPhase, BeamSearch};
pub use self::runner::{
    AttemptProgress, OptimizationOptions, Optimizer, ProgressCallback, RunSummary, Silent,
};

use crate::grid::{CharTable, Grid, Placement};
use crate::scorer::{Candidate, LayoutMetrics, Scorer};
use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One branch of the search: what is on the grid and what is still waiting.
#[derive(Debug, Clone)]
pub struct PartialLayout {
    pub grid: Grid,
    pub placements: Vec<Placement>,
    pub remaining: Vec<String>,
    pub score: f32,
}

impl PartialLayout {
    /// A fresh layout holding only `placement`.
    pub fn seeded(placement: Placement, remaining: Vec<String>) -> Self {
        let mut grid = Grid::new();
        grid.apply(&placement);
        Self {
            grid,
            placements: vec![placement],
            remaining,
            score: 0.0,
        }
    }

    /// Lays `remaining[word_idx]` at `candidate` and rescores.
    pub fn place(&mut self, word_idx: usize, candidate: &Candidate, scorer: &Scorer) {
        let word = self.remaining.remove(word_idx);
        let placement = candidate.placement(&word);
        self.grid.apply(&placement);
        self.placements.push(placement);
        self.score = scorer.beam_score(&self.grid, &self.placements);
    }

    /// Copy-on-branch variant of [`PartialLayout::place`].
    pub fn with_placement(&self, word_idx: usize, candidate: &Candidate, scorer: &Scorer) -> Self {
        let mut next = self.clone();
        next.place(word_idx, candidate, scorer);
        next
    }

    pub fn grid_letters(&self) -> FnvHashSet<char> {
        self.grid.iter().map(|(_, ch)| ch).collect()
    }

    /// The unplaced words other than `remaining[skip]`.
    pub fn others(&self, skip: usize) -> impl Iterator<Item = &str> + '_ {
        self.remaining
            .iter()
            .enumerate()
            .filter(move |(j, _)| *j != skip)
            .map(|(_, w)| w.as_str())
    }

    /// Identity of the placed set, independent of placement order.
    pub fn key(&self) -> String {
        let mut parts: Vec<String> = self
            .placements
            .iter()
            .map(|p| format!("{}:{},{}", p.word, p.origin.x, p.origin.y))
            .collect();
        parts.sort();
        parts.join("|")
    }
}

/// Letters of `word` (with repeats) already present on the grid.
pub fn shared_letters(letters: &FnvHashSet<char>, word: &str) -> usize {
    word.chars().filter(|c| letters.contains(c)).count()
}

/// Result of one attempt, normalized so the table starts at (0, 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedLayout {
    pub id: usize,
    pub table: CharTable,
    pub placements: Vec<Placement>,
    pub leftover: Vec<String>,
    pub metrics: LayoutMetrics,
}

impl FinishedLayout {
    pub fn from_partial(id: usize, state: PartialLayout, total_words: usize, scorer: &Scorer) -> Self {
        Self::from_placements(id, &state.placements, state.remaining, total_words, scorer)
    }

    pub fn from_placements(
        id: usize,
        placements: &[Placement],
        leftover: Vec<String>,
        total_words: usize,
        scorer: &Scorer,
    ) -> Self {
        let grid = Grid::from_placements(placements);
        let b = grid.bounds();
        let placements: Vec<Placement> = placements
            .iter()
            .map(|p| p.shifted(-b.min_x, -b.min_y))
            .collect();
        let grid = Grid::from_placements(&placements);
        let table = CharTable::from_grid(&grid, &grid.bounds());
        let metrics = scorer.score_finished(&grid, &placements, &table, total_words);

        Self {
            id,
            table,
            placements,
            leftover,
            metrics,
        }
    }

    pub fn grid(&self) -> Grid {
        Grid::from_placements(&self.placements)
    }

    pub fn signature(&self) -> BTreeSet<String> {
        canonical::signature(&self.table)
    }

    /// Same layout mirrored across the main diagonal.
    pub fn transposed(&self, scorer: &Scorer) -> Self {
        let flipped: Vec<Placement> = self.placements.iter().map(Placement::transposed).collect();
        Self::from_placements(
            self.id,
            &flipped,
            self.leftover.clone(),
            self.metrics.total_words,
            scorer,
        )
    }
}
