use super::beam::{BeamParams, BeamSearch};
use super::canonical::SeenSignatures;
use super::completion;
use super::FinishedLayout;
use crate::config::Config;
use crate::error::{CfResult, CrossForgeError};
use crate::grid::Orientation;
use crate::rng::RandomSource;
use crate::scorer::Scorer;
use crate::words::validate_words;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct OptimizationOptions {
    pub attempts: usize,
    pub threads: usize,
    pub beam_width_base: usize,
    pub beam_width_per_word: usize,
    pub completion_rounds: usize,
    /// Branching limits shared by every attempt; `width` is drawn per attempt.
    pub beam: BeamParams,
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        let s = &cfg.search;
        Self {
            attempts: s.attempts,
            threads: s.threads.max(1),
            beam_width_base: s.beam_width_base,
            beam_width_per_word: s.beam_width_per_word,
            completion_rounds: s.completion_rounds,
            beam: BeamParams::from_search(s, s.beam_width_base),
        }
    }
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Snapshot handed to [`ProgressCallback::on_progress`] after each attempt.
#[derive(Debug, Clone, Copy)]
pub struct AttemptProgress<'a> {
    /// 1-based attempt number.
    pub attempt: usize,
    pub attempts: usize,
    pub unique: usize,
    pub duplicates: usize,
    /// The layout this attempt produced if it was not a duplicate.
    pub accepted: Option<&'a FinishedLayout>,
    pub best: Option<&'a FinishedLayout>,
}

/// A trait for receiving updates during a run.
/// Boolean return value indicates if the run should continue (true) or abort (false).
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, progress: &AttemptProgress<'_>) -> bool;

    /// Called after every beam step of an attempt. With more than one thread,
    /// calls from different attempts interleave.
    fn on_beam_step(&self, _attempt: usize, _step: usize, _leading_placed: usize) -> bool {
        true
    }
}

/// Callback that never reports and never cancels.
pub struct Silent;

impl ProgressCallback for Silent {
    fn on_progress(&self, _progress: &AttemptProgress<'_>) -> bool {
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub words: Vec<String>,
    /// Unique layouts in attempt order.
    pub candidates: Vec<FinishedLayout>,
    pub attempts_run: usize,
    pub duplicates: usize,
    pub cancelled: bool,
}

impl RunSummary {
    /// Candidates by descending score; equal scores keep attempt order.
    pub fn ranked(&self) -> Vec<&FinishedLayout> {
        let mut out: Vec<&FinishedLayout> = self.candidates.iter().collect();
        out.sort_by(|a, b| b.metrics.score.total_cmp(&a.metrics.score));
        out
    }

    pub fn best(&self) -> Option<&FinishedLayout> {
        self.ranked().into_iter().next()
    }

    pub fn top(&self, n: usize) -> Vec<&FinishedLayout> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

pub struct Optimizer {
    scorer: Arc<Scorer>,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(scorer: Arc<Scorer>, options: OptimizationOptions) -> Self {
        Self { scorer, options }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn options(&self) -> &OptimizationOptions {
        &self.options
    }

    /// Runs all attempts and returns the unique layouts found.
    ///
    /// Each attempt draws from its own source forked off `rng` in attempt
    /// order, and deduplication happens in attempt order, so the result only
    /// depends on the seed and never on `threads`.
    pub fn run<R, CB>(&self, words: &[String], rng: &mut R, callback: &CB) -> CfResult<RunSummary>
    where
        R: RandomSource,
        CB: ProgressCallback,
    {
        validate_words(words)?;
        let opts = &self.options;
        let start = Instant::now();
        info!(
            "🔍 Searching {} words with {} attempts on {} thread(s)",
            words.len(),
            opts.attempts,
            opts.threads
        );

        let mut seen = SeenSignatures::new();
        let mut summary = RunSummary {
            words: words.to_vec(),
            ..RunSummary::default()
        };
        let mut best_idx: Option<usize> = None;
        let mut next = 0;

        'batches: while next < opts.attempts {
            let batch = opts.threads.min(opts.attempts - next);
            let jobs: Vec<(usize, R)> = (0..batch).map(|k| (next + k + 1, rng.fork())).collect();
            next += batch;

            let results: Vec<CfResult<Option<FinishedLayout>>> = if batch == 1 {
                jobs.into_iter()
                    .map(|(id, r)| self.attempt(id, words, r, callback))
                    .collect()
            } else {
                jobs.into_par_iter()
                    .map(|(id, r)| self.attempt(id, words, r, callback))
                    .collect()
            };

            for result in results {
                let Some(layout) = result? else {
                    summary.cancelled = true;
                    break 'batches;
                };
                summary.attempts_run += 1;

                let accepted = seen.try_accept(&layout.table);
                if accepted {
                    debug!(
                        "Attempt {} accepted: {} of {} words, score {:.2}",
                        layout.id,
                        layout.metrics.placed_words,
                        layout.metrics.total_words,
                        layout.metrics.score
                    );
                    let better = best_idx
                        .map_or(true, |i| layout.metrics.score > summary.candidates[i].metrics.score);
                    summary.candidates.push(layout);
                    if better {
                        best_idx = Some(summary.candidates.len() - 1);
                    }
                } else {
                    debug!("Attempt {} duplicates an earlier layout", layout.id);
                    summary.duplicates += 1;
                }

                let progress = AttemptProgress {
                    attempt: summary.attempts_run,
                    attempts: opts.attempts,
                    unique: summary.candidates.len(),
                    duplicates: summary.duplicates,
                    accepted: accepted.then(|| summary.candidates.last()).flatten(),
                    best: best_idx.map(|i| &summary.candidates[i]),
                };
                if !callback.on_progress(&progress) {
                    summary.cancelled = true;
                    break 'batches;
                }
            }
        }

        info!(
            "✅ {} unique layouts from {} attempts ({} duplicates) in {:.2?}",
            summary.candidates.len(),
            summary.attempts_run,
            summary.duplicates,
            start.elapsed()
        );
        Ok(summary)
    }

    /// One randomized attempt. `None` means the callback cancelled mid-search.
    fn attempt<R, CB>(
        &self,
        id: usize,
        words: &[String],
        mut rng: R,
        callback: &CB,
    ) -> CfResult<Option<FinishedLayout>>
    where
        R: RandomSource,
        CB: ProgressCallback,
    {
        let opts = &self.options;

        let mut order = words.to_vec();
        rng.shuffle(&mut order);
        let spread = words.len() * opts.beam_width_per_word;
        let width = opts.beam_width_base + if spread > 0 { rng.below(spread) } else { 0 };
        let orientation = if rng.coin() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };

        let params = BeamParams {
            width,
            ..opts.beam
        };
        let mut search = BeamSearch::new(&self.scorer, params, order, orientation)?;
        while !search.step(&mut rng).is_terminal() {
            if !callback.on_beam_step(id, search.steps(), search.leading_placed()) {
                return Ok(None);
            }
        }
        debug!(
            "Attempt {}: beam width {} ended {} after {} steps",
            id,
            width,
            search.phase(),
            search.steps()
        );

        let Some(state) = search.into_best() else {
            return Err(CrossForgeError::EmptyWordList);
        };
        let state = completion::complete(
            state,
            &self.scorer,
            opts.completion_rounds,
            opts.beam.candidate_limit,
        );
        Ok(Some(FinishedLayout::from_partial(id, state, words.len(), &self.scorer)))
    }
}
