use super::{shared_letters, PartialLayout};
use crate::config::SearchParams;
use crate::error::CfResult;
use crate::grid::{Coord, Orientation, Placement};
use crate::rng::RandomSource;
use crate::scorer::Scorer;
use crate::words::validate_words;
use fnv::FnvHashSet;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BeamPhase {
    Seeding,
    Expanding,
    Stalled,
    Exhausted,
}

impl BeamPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, BeamPhase::Stalled | BeamPhase::Exhausted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeamParams {
    pub width: usize,
    pub words_per_state: usize,
    pub placements_per_word: usize,
    pub stagnation_limit: usize,
    pub candidate_limit: usize,
}

impl BeamParams {
    pub fn from_search(params: &SearchParams, width: usize) -> Self {
        Self {
            width,
            words_per_state: params.beam_words_per_state,
            placements_per_word: params.beam_placements_per_word,
            stagnation_limit: params.stagnation_limit,
            candidate_limit: params.candidate_limit,
        }
    }
}

/// Width-limited breadth-first search over partial layouts.
///
/// The first word of the ordering is seeded at the origin; every later step
/// branches each kept state on its most promising unplaced words and keeps the
/// best `width` distinct children.
pub struct BeamSearch<'s> {
    scorer: &'s Scorer,
    params: BeamParams,
    orientation: Orientation,
    pending: Vec<String>,
    beam: Vec<PartialLayout>,
    phase: BeamPhase,
    steps: usize,
    stagnant: usize,
}

impl<'s> BeamSearch<'s> {
    pub fn new(
        scorer: &'s Scorer,
        params: BeamParams,
        words: Vec<String>,
        orientation: Orientation,
    ) -> CfResult<Self> {
        validate_words(&words)?;
        Ok(Self {
            scorer,
            params: BeamParams {
                width: params.width.max(1),
                ..params
            },
            orientation,
            pending: words,
            beam: Vec::new(),
            phase: BeamPhase::Seeding,
            steps: 0,
            stagnant: 0,
        })
    }

    pub fn phase(&self) -> BeamPhase {
        self.phase
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn beam(&self) -> &[PartialLayout] {
        &self.beam
    }

    /// Words placed by the leading state.
    pub fn leading_placed(&self) -> usize {
        self.beam.first().map_or(0, |s| s.placements.len())
    }

    /// Advances one step. Terminal phases are sticky.
    pub fn step<R: RandomSource>(&mut self, rng: &mut R) -> BeamPhase {
        match self.phase {
            BeamPhase::Seeding => self.seed(rng),
            BeamPhase::Expanding => self.expand(),
            BeamPhase::Stalled | BeamPhase::Exhausted => {}
        }
        self.phase
    }

    pub fn run<R: RandomSource>(&mut self, rng: &mut R) -> BeamPhase {
        while !self.phase.is_terminal() {
            self.step(rng);
        }
        self.phase
    }

    /// Highest-scoring state; the earliest wins a tie.
    pub fn best(&self) -> Option<&PartialLayout> {
        self.beam
            .iter()
            .reduce(|best, s| if s.score > best.score { s } else { best })
    }

    pub fn into_best(self) -> Option<PartialLayout> {
        let idx = self
            .beam
            .iter()
            .enumerate()
            .reduce(|best, s| if s.1.score > best.1.score { s } else { best })
            .map(|(i, _)| i)?;
        self.beam.into_iter().nth(idx)
    }

    fn seed<R: RandomSource>(&mut self, rng: &mut R) {
        let mut words = std::mem::take(&mut self.pending);
        let first = words.remove(0);
        rng.shuffle(&mut words);

        let placement = Placement::new(first, Coord::new(0, 0), self.orientation);
        self.beam = vec![PartialLayout::seeded(placement, words)];
        self.steps += 1;
        self.phase = if self.beam[0].remaining.is_empty() {
            BeamPhase::Exhausted
        } else {
            BeamPhase::Expanding
        };
    }

    fn expand(&mut self) {
        let p = self.params;
        let previous_best = self.leading_placed();

        let mut children = Vec::new();
        for state in &self.beam {
            let letters = state.grid_letters();

            // Most shared letters first, longer words break ties
            let mut order: Vec<(usize, usize)> = state
                .remaining
                .iter()
                .enumerate()
                .map(|(i, w)| (i, shared_letters(&letters, w) * 10 + w.chars().count()))
                .collect();
            order.sort_by(|a, b| b.1.cmp(&a.1));

            for &(idx, _) in order.iter().take(p.words_per_state) {
                let word = &state.remaining[idx];
                let found = self.scorer.find_candidates(
                    &state.grid,
                    word,
                    state.others(idx),
                    p.candidate_limit,
                );
                for cand in found.iter().take(p.placements_per_word) {
                    children.push(state.with_placement(idx, cand, self.scorer));
                }
            }
        }
        self.steps += 1;

        if children.is_empty() {
            self.phase = BeamPhase::Stalled;
            return;
        }

        children.sort_by(|a, b| b.score.total_cmp(&a.score));
        let mut keys = FnvHashSet::default();
        children.retain(|c| keys.insert(c.key()));
        children.truncate(p.width);
        self.beam = children;

        if self.beam[0].remaining.is_empty() {
            self.phase = BeamPhase::Exhausted;
        } else if self.leading_placed() == previous_best {
            self.stagnant += 1;
            if self.stagnant >= p.stagnation_limit {
                self.phase = BeamPhase::Stalled;
            }
        } else {
            self.stagnant = 0;
        }
    }
}
