use crate::error::{CfResult, CrossForgeError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub weights: ScoringWeights,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Independent randomized attempts per run
    #[arg(short = 'a', long, default_value_t = 100)]
    pub attempts: usize,

    // Beam width = base + random(0..words * per_word)
    #[arg(long, default_value_t = 50)]
    pub beam_width_base: usize,
    #[arg(long, default_value_t = 10)]
    pub beam_width_per_word: usize,

    // Branching per beam state
    #[arg(long, default_value_t = 12)]
    pub beam_words_per_state: usize,
    #[arg(long, default_value_t = 8)]
    pub beam_placements_per_word: usize,

    /// Steps without growth of the leading state before the beam gives up
    #[arg(long, default_value_t = 5)]
    pub stagnation_limit: usize,

    #[arg(long, default_value_t = 5)]
    pub completion_rounds: usize,

    /// Candidates kept per word by the candidate finder
    #[arg(long, default_value_t = 30)]
    pub candidate_limit: usize,

    /// Attempts evaluated concurrently. Results do not depend on this.
    #[arg(long, default_value_t = 1)]
    pub threads: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            attempts: 100,
            beam_width_base: 50,
            beam_width_per_word: 10,
            beam_words_per_state: 12,
            beam_placements_per_word: 8,
            stagnation_limit: 5,
            completion_rounds: 5,
            candidate_limit: 30,
            threads: 1,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    // === CANDIDATE (single placement) ===
    #[arg(long, default_value_t = 300.0)]
    pub weight_crossing: f32,
    #[arg(long, default_value_t = 40.0)]
    pub weight_density: f32,
    #[arg(long, default_value_t = 40.0)]
    pub weight_aspect: f32,
    #[arg(long, default_value_t = 10.0)]
    pub weight_future_links: f32,
    #[arg(long, default_value_t = 150.0)]
    pub penalty_expansion: f32,
    // Area growth ratio tolerated before the expansion penalty applies
    #[arg(long, default_value_t = 1.1)]
    pub expansion_tolerance: f32,

    // === LAYOUT ===
    #[arg(long, default_value_t = 100.0)]
    pub weight_beam_score: f32,

    // === FINISHED BLEND ===
    #[arg(long, default_value_t = 0.25)]
    pub weight_area: f32,
    #[arg(long, default_value_t = 0.25)]
    pub weight_density_blend: f32,
    #[arg(long, default_value_t = 0.5)]
    pub penalty_outlier_quadratic: f32,
    #[arg(long, default_value_t = 2.0)]
    pub penalty_outlier_linear: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            weight_crossing: 300.0,
            weight_density: 40.0,
            weight_aspect: 40.0,
            weight_future_links: 10.0,
            penalty_expansion: 150.0,
            expansion_tolerance: 1.1,
            weight_beam_score: 100.0,
            weight_area: 0.25,
            weight_density_blend: 0.25,
            penalty_outlier_quadratic: 0.5,
            penalty_outlier_linear: 2.0,
        }
    }
}

impl ScoringWeights {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Applies only the flags the user actually typed on top of file values.
    pub fn merge_from_cli(&mut self, cli_weights: &ScoringWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field;
                }
            };
        }

        update_if_present!(weight_crossing);
        update_if_present!(weight_density);
        update_if_present!(weight_aspect);
        update_if_present!(weight_future_links);
        update_if_present!(penalty_expansion);
        update_if_present!(expansion_tolerance);

        update_if_present!(weight_beam_score);

        update_if_present!(weight_area);
        update_if_present!(weight_density_blend);
        update_if_present!(penalty_outlier_quadratic);
        update_if_present!(penalty_outlier_linear);
    }
}

impl Config {
    pub fn validate(&self) -> CfResult<()> {
        let s = &self.search;
        let checks = [
            (s.attempts == 0, "attempts must be at least 1"),
            (
                s.beam_width_base == 0 && s.beam_width_per_word == 0,
                "beam width range is empty",
            ),
            (s.beam_words_per_state == 0, "beam_words_per_state must be at least 1"),
            (
                s.beam_placements_per_word == 0,
                "beam_placements_per_word must be at least 1",
            ),
            (s.stagnation_limit == 0, "stagnation_limit must be at least 1"),
            (s.candidate_limit == 0, "candidate_limit must be at least 1"),
            (s.threads == 0, "threads must be at least 1"),
        ];

        if let Some((_, msg)) = checks.iter().find(|(failed, _)| *failed) {
            return Err(CrossForgeError::Config(msg.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches, Parser};

    #[derive(Parser, Debug)]
    struct Harness {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn clap_defaults_match_default_impl() {
        let parsed = Harness::try_parse_from(["test"]).unwrap();
        let d = Config::default();
        assert_eq!(parsed.config.search.attempts, d.search.attempts);
        assert_eq!(parsed.config.search.beam_width_base, d.search.beam_width_base);
        assert_eq!(parsed.config.weights.weight_crossing, d.weights.weight_crossing);
        assert_eq!(
            parsed.config.weights.expansion_tolerance,
            d.weights.expansion_tolerance
        );
    }

    #[test]
    fn cli_flags_override_file_values() {
        let matches = Harness::command()
            .try_get_matches_from(["test", "--weight-aspect", "7"])
            .unwrap();
        let cli = Harness::from_arg_matches(&matches).unwrap();

        let mut from_file = ScoringWeights {
            weight_aspect: 1.0,
            weight_density: 2.0,
            ..Default::default()
        };
        from_file.merge_from_cli(&cli.config.weights, &matches);

        assert_eq!(from_file.weight_aspect, 7.0);
        assert_eq!(from_file.weight_density, 2.0, "untouched flags keep file value");
    }

    #[test]
    fn zero_attempts_rejected() {
        let mut cfg = Config::default();
        cfg.search.attempts = 0;
        assert!(matches!(cfg.validate(), Err(CrossForgeError::Config(_))));
    }

    #[test]
    fn partial_weights_json_fills_defaults() {
        let w: ScoringWeights = serde_json::from_str(r#"{ "weight_crossing": 10.0 }"#).unwrap();
        assert_eq!(w.weight_crossing, 10.0);
        assert_eq!(w.weight_density, 40.0);
    }
}
