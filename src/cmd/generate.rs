use crate::reports;
use clap::Args;
use crossforge::api;
use crossforge::config::Config;
use crossforge::error::{CfResult, CrossForgeError};
use crossforge::optimizer::{AttemptProgress, ProgressCallback};
use crossforge::solution::overlay_phrase;
use std::fs;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: Config,

    /// File with one word per line
    #[arg(short = 'w', long, conflicts_with = "word")]
    pub words: Option<String>,

    /// Word given directly; repeat for more
    #[arg(long = "word")]
    pub word: Vec<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Candidates shown in the ranking
    #[arg(short = 't', long, default_value_t = 10)]
    pub top: usize,

    /// Write the full run as JSON
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Solution phrase to lay over the best grid
    #[arg(short = 'p', long)]
    pub phrase: Option<String>,
}

struct CliProgress {
    debug: bool,
    best_bits: AtomicU32,
}

impl ProgressCallback for CliProgress {
    fn on_progress(&self, p: &AttemptProgress<'_>) -> bool {
        let Some(best) = p.best else {
            return true;
        };
        let score = best.metrics.score;
        // Only report when the best layout changed
        if self.best_bits.swap(score.to_bits(), Ordering::Relaxed) != score.to_bits() {
            info!(
                "➡️  Attempt {}/{}: best {:.2} ({} unique, {}/{} words)",
                p.attempt,
                p.attempts,
                score,
                p.unique,
                best.metrics.placed_words,
                best.metrics.total_words
            );
        }
        true
    }

    fn on_beam_step(&self, attempt: usize, step: usize, leading_placed: usize) -> bool {
        if self.debug {
            debug!("   attempt {} step {}: {} placed", attempt, step, leading_placed);
        }
        true
    }
}

pub fn run(args: GenerateArgs, debug: bool) -> CfResult<()> {
    let words = match &args.words {
        Some(path) => {
            info!("📂 Loading Words: {}", path);
            api::load_word_file(path)?
        }
        None => api::prepare_words(&args.word),
    };
    if words.is_empty() {
        return Err(CrossForgeError::EmptyWordList);
    }
    info!("🧩 {} words, seed {:?}", words.len(), args.seed);

    let progress = CliProgress {
        debug,
        best_bits: AtomicU32::new(f32::NAN.to_bits()),
    };
    let summary = api::generate(&words, &args.config, args.seed, &progress)?;

    reports::print_ranking(&summary.top(args.top));

    let Some(best) = summary.best() else {
        return Err(CrossForgeError::Config("no attempt produced a layout".to_string()));
    };
    reports::print_layout_grid(&format!("Best layout (attempt #{})", best.id), &best.table);
    reports::print_metrics(&best.metrics, &best.leftover);

    if let Some(phrase) = &args.phrase {
        reports::print_phrase(&overlay_phrase(&best.table, phrase));
    }

    if let Some(path) = &args.output {
        fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        info!("💾 Saved {} candidates to {}", summary.candidates.len(), path);
    }

    println!("Score: {:.4}", best.metrics.score);
    Ok(())
}
