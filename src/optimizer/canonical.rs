use crate::grid::CharTable;
use fnv::FnvHashSet;
use std::collections::BTreeSet;

/// Encodings of `table` under all eight rotations and mirrors.
///
/// Two layouts that differ only by orientation produce the same set.
pub fn signature(table: &CharTable) -> BTreeSet<String> {
    table.symmetries().iter().map(CharTable::encode).collect()
}

/// Signatures of every layout accepted so far in a run.
#[derive(Debug, Default)]
pub struct SeenSignatures {
    seen: FnvHashSet<String>,
}

impl SeenSignatures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `table` and returns true unless one of its orientations was
    /// already recorded.
    pub fn try_accept(&mut self, table: &CharTable) -> bool {
        let sig = signature(table);
        if sig.iter().any(|enc| self.seen.contains(enc)) {
            return false;
        }
        self.seen.extend(sig);
        true
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&str]) -> CharTable {
        CharTable::from(rows.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn horizontal_and_vertical_word_match() {
        assert_eq!(signature(&table(&["HELLO"])), signature(&table(&["H", "E", "L", "L", "O"])));
    }

    #[test]
    fn reversal_is_a_symmetry() {
        assert_eq!(signature(&table(&["HELLO"])), signature(&table(&["OLLEH"])));
    }

    #[test]
    fn distinct_words_differ() {
        assert_ne!(signature(&table(&["CAT"])), signature(&table(&["DOG"])));
    }

    #[test]
    fn corner_has_all_orientations() {
        let s = signature(&table(&["CAT", "--A", "--R"]));
        assert!(s.contains("CAT|--A|--R"));
        // Transposed
        assert!(s.contains("C--|A--|TAR"));
        // Rotated a half turn
        assert!(s.contains("R--|A--|TAC"));
    }

    #[test]
    fn seen_rejects_mirror() {
        let mut seen = SeenSignatures::new();
        assert!(seen.try_accept(&table(&["CAT", "--A", "--R"])));
        assert!(!seen.try_accept(&table(&["TAC", "A--", "R--"])));
        assert!(seen.try_accept(&table(&["DOG"])));
    }
}
