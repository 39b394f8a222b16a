use crossforge::config::{Config, ScoringWeights, SearchParams};
use crossforge::error::CrossForgeError;
use rstest::rstest;
use std::io::Write;

// Helper to create a config for testing without relying on Clap parsing
fn get_default_test_config() -> Config {
    Config {
        search: SearchParams {
            attempts: 4,
            beam_width_base: 10,
            beam_width_per_word: 2,
            beam_words_per_state: 6,
            beam_placements_per_word: 4,
            stagnation_limit: 3,
            completion_rounds: 2,
            candidate_limit: 10,
            threads: 2,
        },
        weights: ScoringWeights {
            // Candidate
            weight_crossing: 300.0,
            weight_density: 40.0,
            weight_aspect: 40.0,
            weight_future_links: 10.0,
            penalty_expansion: 150.0,
            expansion_tolerance: 1.1,

            // Beam
            weight_beam_score: 100.0,

            // Finished blend
            weight_area: 0.25,
            weight_density_blend: 0.25,
            penalty_outlier_quadratic: 0.5,
            penalty_outlier_linear: 2.0,
        },
    }
}

#[test]
fn test_test_config_is_valid() {
    assert!(get_default_test_config().validate().is_ok());
}

#[rstest]
#[case::attempts(|c: &mut Config| c.search.attempts = 0)]
#[case::beam_range(|c: &mut Config| { c.search.beam_width_base = 0; c.search.beam_width_per_word = 0; })]
#[case::words_per_state(|c: &mut Config| c.search.beam_words_per_state = 0)]
#[case::placements(|c: &mut Config| c.search.beam_placements_per_word = 0)]
#[case::stagnation(|c: &mut Config| c.search.stagnation_limit = 0)]
#[case::candidates(|c: &mut Config| c.search.candidate_limit = 0)]
#[case::threads(|c: &mut Config| c.search.threads = 0)]
fn test_invalid_search_params(#[case] breaks: fn(&mut Config)) {
    let mut config = get_default_test_config();
    breaks(&mut config);
    assert!(matches!(config.validate(), Err(CrossForgeError::Config(_))));
}

#[test]
fn test_zero_base_width_with_spread_is_valid() {
    let mut config = get_default_test_config();
    config.search.beam_width_base = 0;
    assert!(config.validate().is_ok());
}

#[test]
fn test_weights_load_from_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, r#"{{ "weight_crossing": 12.5, "penalty_outlier_linear": 0.0 }}"#).unwrap();
    let w = ScoringWeights::load_from_file(f.path()).unwrap();
    assert_eq!(w.weight_crossing, 12.5);
    assert_eq!(w.penalty_outlier_linear, 0.0);
    assert_eq!(w.weight_aspect, ScoringWeights::default().weight_aspect);
}

#[test]
fn test_weights_load_errors() {
    let missing = ScoringWeights::load_from_file("/definitely/not/here.json");
    assert!(matches!(missing, Err(CrossForgeError::Io(_))));

    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, "not json").unwrap();
    let broken = ScoringWeights::load_from_file(f.path());
    assert!(matches!(broken, Err(CrossForgeError::Json(_))));
}

#[test]
fn test_config_json_round_trip_keeps_search_params() {
    let config = get_default_test_config();
    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back.search.threads, 2);
    assert_eq!(back.search.stagnation_limit, 3);
    assert_eq!(back.weights.expansion_tolerance, 1.1);
}
