use crate::reports;
use clap::Args;
use crossforge::api;
use crossforge::config::ScoringWeights;
use crossforge::error::{CfResult, CrossForgeError};
use crossforge::optimizer::{FinishedLayout, RunSummary};
use crossforge::scorer::Scorer;
use std::fs;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub weights: ScoringWeights,

    /// JSON written by `generate --output`
    #[arg(short = 'l', long)]
    pub layout: String,

    /// 1-based position in the ranking
    #[arg(short = 'r', long, default_value_t = 1)]
    pub rank: usize,

    /// Words to hide, comma separated
    #[arg(long, value_delimiter = ',')]
    pub hide: Vec<String>,

    /// Show the layout mirrored across its diagonal
    #[arg(long, default_value_t = false)]
    pub transpose: bool,
}

pub fn run(args: InspectArgs) -> CfResult<()> {
    info!("📂 Loading Layouts: {}", args.layout);
    let summary: RunSummary = serde_json::from_str(&fs::read_to_string(&args.layout)?)?;
    let ranked = summary.ranked();

    let Some(chosen) = args.rank.checked_sub(1).and_then(|i| ranked.get(i)) else {
        return Err(CrossForgeError::Config(format!(
            "rank {} is out of range (1..={})",
            args.rank,
            ranked.len()
        )));
    };

    // Metrics follow the current weights, not the ones stored with the run
    let scorer = Scorer::new(args.weights.clone());
    let mut layout = FinishedLayout::from_placements(
        chosen.id,
        &chosen.placements,
        chosen.leftover.clone(),
        chosen.metrics.total_words,
        &scorer,
    );
    if args.transpose {
        layout = layout.transposed(&scorer);
    }

    reports::print_layout_grid(&format!("Rank {} (attempt #{})", args.rank, layout.id), &layout.table);
    reports::print_metrics(&layout.metrics, &layout.leftover);

    if !args.hide.is_empty() {
        let view = api::hide_words(&layout, &args.hide);
        if !view.disconnected.is_empty() {
            warn!("⚠️  Hiding also cuts off: {}", view.disconnected.join(", "));
        }
        match &view.table {
            Some(table) => reports::print_layout_grid("Visible words", table),
            None => warn!("⚠️  Nothing left to show"),
        }
    }

    println!("Score: {:.4}", layout.metrics.score);
    Ok(())
}
