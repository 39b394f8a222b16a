// ===== crossforge/src/main.rs =====
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use crossforge::config::ScoringWeights;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long)]
    weights: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Generate(cmd::generate::GenerateArgs),
    Inspect(cmd::inspect::InspectArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚀 Initializing CrossForge...");

    let (cli_weights, sub_name) = match &cli.command {
        Commands::Generate(args) => (&args.config.weights, "generate"),
        Commands::Inspect(args) => (&args.weights, "inspect"),
    };
    let Some(sub_matches) = matches.subcommand_matches(sub_name) else {
        error!("❌ Missing arguments for '{}'", sub_name);
        process::exit(2);
    };

    let weights = if let Some(path) = &cli.weights {
        info!("⚖️  Loading Weights from: {}", path);
        let mut file_weights = ScoringWeights::load_from_file(path).unwrap_or_else(|e| {
            error!("❌ Could not load weights '{}': {}", path, e);
            process::exit(1);
        });
        file_weights.merge_from_cli(cli_weights, sub_matches);
        file_weights
    } else {
        warn!("⚠️  No external weights loaded. Using defaults and CLI flags.");
        cli_weights.clone()
    };

    let result = match cli.command {
        Commands::Generate(mut args) => {
            args.config.weights = weights;
            cmd::generate::run(args, cli.debug)
        }
        Commands::Inspect(mut args) => {
            args.weights = weights;
            cmd::inspect::run(args)
        }
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
