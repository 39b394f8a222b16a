// ===== crossforge/src/api.rs =====
use crate::config::Config;
use crate::error::CfResult;
use crate::grid::{connected_words, CharTable, Grid, Placement};
use crate::optimizer::{FinishedLayout, OptimizationOptions, Optimizer, ProgressCallback, RunSummary};
use crate::rng;
use crate::scorer::Scorer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use crate::words::{load_word_file, prepare_words, validate_words};

/// What remains on screen after hiding some words of a layout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisibleLayout {
    /// Still connected to the first visible word, in layout order.
    pub visible: Vec<Placement>,
    /// Not hidden themselves, but cut off from the rest by the hidden words.
    pub disconnected: Vec<String>,
    /// Visible words re-normalized to the table origin; `None` when nothing is
    /// left to show.
    pub table: Option<CharTable>,
}

/// Service: validate the words and config, then run every attempt.
pub fn generate<CB: ProgressCallback>(
    words: &[String],
    config: &Config,
    seed: Option<u64>,
    callback: &CB,
) -> CfResult<RunSummary> {
    validate_words(words)?;
    config.validate()?;

    let scorer = Arc::new(Scorer::new(config.weights.clone()));
    let optimizer = Optimizer::new(scorer, OptimizationOptions::from(config));
    let mut source = rng::seeded(seed);
    optimizer.run(words, &mut source, callback)
}

/// Service: hide `hidden` words and keep only what stays connected.
pub fn hide_words<S: AsRef<str>>(layout: &FinishedLayout, hidden: &[S]) -> VisibleLayout {
    let hidden: Vec<String> = hidden.iter().map(|h| h.as_ref().trim().to_uppercase()).collect();
    let shown: Vec<Placement> = layout
        .placements
        .iter()
        .filter(|p| !hidden.contains(&p.word))
        .cloned()
        .collect();

    let visible = connected_words(&shown);
    let disconnected = shown
        .iter()
        .filter(|p| !visible.contains(p))
        .map(|p| p.word.clone())
        .collect();

    let table = (!visible.is_empty()).then(|| {
        let grid = Grid::from_placements(&visible);
        CharTable::from_grid(&grid, &grid.bounds())
    });

    VisibleLayout {
        visible,
        disconnected,
        table,
    }
}
