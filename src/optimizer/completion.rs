use super::{shared_letters, PartialLayout};
use crate::scorer::Scorer;

/// Greedy pass over the words the beam left behind.
///
/// Each round tries every remaining word once, best-connected first, and lays
/// it at its top candidate. Stops after `rounds` rounds, when nothing is left,
/// or when a full round places nothing.
pub fn complete(
    mut state: PartialLayout,
    scorer: &Scorer,
    rounds: usize,
    candidate_limit: usize,
) -> PartialLayout {
    for _ in 0..rounds {
        if state.remaining.is_empty() {
            break;
        }

        let letters = state.grid_letters();
        let mut order = state.remaining.clone();
        order.sort_by_key(|w| std::cmp::Reverse(shared_letters(&letters, w)));

        let mut placed_any = false;
        for word in order {
            let Some(idx) = state.remaining.iter().position(|w| *w == word) else {
                continue;
            };
            let best = scorer
                .find_candidates(&state.grid, &word, state.others(idx), candidate_limit.max(1))
                .into_iter()
                .next();
            if let Some(cand) = best {
                state.place(idx, &cand, scorer);
                placed_any = true;
            }
        }

        if !placed_any {
            break;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{check_placement, Coord, Grid, Orientation, Placement};

    fn seeded(word: &str, rest: &[&str]) -> PartialLayout {
        PartialLayout::seeded(
            Placement::new(word, Coord::new(0, 0), Orientation::Horizontal),
            rest.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn places_what_it_can() {
        let scorer = Scorer::default();
        let out = complete(seeded("CAT", &["TAR", "XYZ"]), &scorer, 5, 30);
        assert_eq!(out.placements.len(), 2);
        assert_eq!(out.remaining, vec!["XYZ".to_string()]);
        assert!(out.score > 0.0);
    }

    #[test]
    fn zero_rounds_is_identity() {
        let scorer = Scorer::default();
        let out = complete(seeded("CAT", &["TAR"]), &scorer, 0, 30);
        assert_eq!(out.placements.len(), 1);
        assert_eq!(out.remaining.len(), 1);
    }

    #[test]
    fn every_completed_placement_was_valid() {
        let scorer = Scorer::default();
        let out = complete(seeded("STONE", &["NOTES", "TONE", "SET", "ONE"]), &scorer, 5, 30);

        // Replaying the placements in order must validate each one
        let mut g = Grid::new();
        for p in &out.placements {
            assert!(check_placement(&g, &p.word, p.origin, p.orientation).valid);
            g.apply(p);
        }
        assert_eq!(g, out.grid);
    }
}
