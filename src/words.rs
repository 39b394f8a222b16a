use crate::error::{CfResult, CrossForgeError};
use fnv::FnvHashSet;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Normalizes raw user entries: trims, uppercases, drops entries shorter than
/// two characters and repeats of an earlier entry.
pub fn prepare_words<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = FnvHashSet::default();
    let mut out = Vec::new();
    for entry in raw {
        let word = entry.as_ref().trim().to_uppercase();
        if word.chars().count() < 2 {
            continue;
        }
        if !seen.insert(word.clone()) {
            warn!("⚠️  Dropping repeated word '{}'", word);
            continue;
        }
        out.push(word);
    }
    out
}

/// Checks the engine's input contract.
pub fn validate_words(words: &[String]) -> CfResult<()> {
    if words.is_empty() {
        return Err(CrossForgeError::EmptyWordList);
    }
    let mut seen = FnvHashSet::default();
    for w in words {
        let valid = w.chars().count() >= 2 && w.chars().all(|c| c.is_alphabetic() && !c.is_lowercase());
        if !valid {
            return Err(CrossForgeError::InvalidWord(w.clone()));
        }
        if !seen.insert(w.as_str()) {
            return Err(CrossForgeError::DuplicateWord(w.clone()));
        }
    }
    Ok(())
}

/// Reads one word per line. Blank lines and lines starting with `#` are
/// skipped; anything after the first whitespace is ignored.
pub fn load_word_file<P: AsRef<Path>>(path: P) -> CfResult<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let entries = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| l.split_whitespace().next());
    Ok(prepare_words(entries))
}
