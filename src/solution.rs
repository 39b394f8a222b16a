//! Solution-phrase overlay: maps each character of a phrase onto a distinct
//! table cell holding the same letter.

use crate::grid::CharTable;
use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseSlot {
    pub ch: char,
    /// 1-based position in the phrase, whitespace excluded.
    pub number: usize,
    /// First character after whitespace (or of the phrase).
    pub starts_word: bool,
    /// `(x, y)` of the table cell, or `None` when the letter is given.
    pub cell: Option<(usize, usize)>,
}

impl PhraseSlot {
    pub fn is_given(&self) -> bool {
        self.cell.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseOverlay {
    pub slots: Vec<PhraseSlot>,
}

impl PhraseOverlay {
    /// Cell → slot number, for renderers that print small numbers in cells.
    pub fn cell_numbers(&self) -> BTreeMap<(usize, usize), usize> {
        self.slots
            .iter()
            .filter_map(|s| s.cell.map(|c| (c, s.number)))
            .collect()
    }

    pub fn given(&self) -> usize {
        self.slots.iter().filter(|s| s.is_given()).count()
    }
}

/// Assigns every non-whitespace character of `phrase` to the first unused
/// cell, in row-major order, holding its uppercase form.
pub fn overlay_phrase(table: &CharTable, phrase: &str) -> PhraseOverlay {
    let mut used: FnvHashSet<(usize, usize)> = FnvHashSet::default();
    let mut slots = Vec::new();
    let mut after_space = true;

    for ch in phrase.chars() {
        if ch.is_whitespace() {
            after_space = true;
            continue;
        }
        let starts_word = std::mem::replace(&mut after_space, false);
        let number = slots.len() + 1;

        let cell = single_upper(ch).and_then(|upper| {
            let found = (0..table.height())
                .flat_map(|y| (0..table.width()).map(move |x| (x, y)))
                .find(|&(x, y)| table.get(x, y) == Some(upper) && !used.contains(&(x, y)))?;
            used.insert(found);
            Some(found)
        });

        slots.push(PhraseSlot {
            ch,
            number,
            starts_word,
            cell,
        });
    }

    PhraseOverlay { slots }
}

// Only letters with a one-character uppercase form can match a cell
fn single_upper(ch: char) -> Option<char> {
    let mut it = ch.to_uppercase();
    match (it.next(), it.next()) {
        (Some(u), None) if u.is_alphabetic() => Some(u),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&str]) -> CharTable {
        CharTable::from(rows.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn assigns_first_free_cell_row_major() {
        let t = table(&["CAT", "--A", "--R"]);
        let o = overlay_phrase(&t, "aa");
        assert_eq!(o.slots[0].cell, Some((1, 0)));
        assert_eq!(o.slots[1].cell, Some((2, 1)));
        assert_eq!(o.given(), 0);
    }

    #[test]
    fn missing_letters_are_given() {
        let t = table(&["CAT"]);
        let o = overlay_phrase(&t, "cats");
        assert!(o.slots[3].is_given());
        assert_eq!(o.given(), 1);
        assert_eq!(o.slots[3].number, 4);
    }

    #[test]
    fn word_starts_and_numbers_skip_spaces() {
        let t = table(&["CAT"]);
        let o = overlay_phrase(&t, "a  ct");
        let starts: Vec<bool> = o.slots.iter().map(|s| s.starts_word).collect();
        assert_eq!(starts, vec![true, true, false]);
        let numbers: Vec<usize> = o.slots.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(o.cell_numbers().get(&(2, 0)), Some(&3));
    }

    #[test]
    fn punctuation_never_lands_on_empty_cells() {
        let o = overlay_phrase(&table(&["CAT", "--A"]), "-");
        assert!(o.slots[0].is_given());
    }

    #[test]
    fn empty_phrase() {
        assert!(overlay_phrase(&table(&["CAT"]), "   ").slots.is_empty());
    }
}
