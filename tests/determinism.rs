use crossforge::api;
use crossforge::config::Config;
use crossforge::optimizer::Silent;

fn words() -> Vec<String> {
    api::prepare_words(["stone", "notes", "tones", "onset", "set", "ten", "nest"])
}

fn config(threads: usize) -> Config {
    let mut cfg = Config::default();
    cfg.search.attempts = 16;
    cfg.search.threads = threads;
    cfg
}

#[test]
fn test_same_seed_same_json() {
    let a = api::generate(&words(), &config(1), Some(2024), &Silent).unwrap();
    let b = api::generate(&words(), &config(1), Some(2024), &Silent).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_threads_do_not_change_ranking() {
    let single = api::generate(&words(), &config(1), Some(7), &Silent).unwrap();
    for threads in [2, 3, 8] {
        let multi = api::generate(&words(), &config(threads), Some(7), &Silent).unwrap();
        assert_eq!(single, multi, "threads = {threads}");
        let a: Vec<usize> = single.ranked().iter().map(|l| l.id).collect();
        let b: Vec<usize> = multi.ranked().iter().map(|l| l.id).collect();
        assert_eq!(a, b);
    }
}

#[test]
fn test_summary_survives_json() {
    let summary = api::generate(&words(), &config(1), Some(5), &Silent).unwrap();
    let json = serde_json::to_string_pretty(&summary).unwrap();
    let back: crossforge::optimizer::RunSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back.candidates.len(), summary.candidates.len());
    assert_eq!(back.words, summary.words);
    for (a, b) in back.candidates.iter().zip(&summary.candidates) {
        assert_eq!(a.table, b.table);
        assert_eq!(a.placements, b.placements);
    }
}
