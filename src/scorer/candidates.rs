use super::types::Candidate;
use crate::config::ScoringWeights;
use crate::grid::{check_placement, Coord, Grid, Orientation};
use fnv::{FnvHashMap, FnvHashSet};

/// Enumerates every valid placement of `word` that crosses the grid and ranks
/// them, best first, keeping at most `limit`.
///
/// `others` are the words still waiting to be placed; letters they share with
/// `word` raise its score so the layout stays open for them. An empty grid
/// yields the two seed placements at the origin.
pub fn find_candidates<'a>(
    weights: &ScoringWeights,
    grid: &Grid,
    word: &str,
    others: impl IntoIterator<Item = &'a str>,
    limit: usize,
) -> Vec<Candidate> {
    if grid.is_empty() {
        return [Orientation::Horizontal, Orientation::Vertical]
            .into_iter()
            .map(|orientation| Candidate {
                origin: Coord::new(0, 0),
                orientation,
                score: 0.0,
                intersections: 0,
            })
            .take(limit)
            .collect();
    }

    let letters: Vec<char> = word.chars().collect();
    let len = letters.len();

    // Positions of each letter within the word
    let mut positions: FnvHashMap<char, Vec<usize>> = FnvHashMap::default();
    for (i, &ch) in letters.iter().enumerate() {
        positions.entry(ch).or_default().push(i);
    }

    let lookahead: FnvHashSet<char> = others.into_iter().flat_map(str::chars).collect();
    let future_links = letters.iter().filter(|c| lookahead.contains(c)).count() as f32;

    let bounds = grid.bounds();
    let old_area = bounds.area() as f32;
    let occupied = grid.len();

    let mut seen: FnvHashSet<(Coord, Orientation)> = FnvHashSet::default();
    let mut out = Vec::new();

    for (cell, ch) in grid.iter() {
        let Some(idxs) = positions.get(&ch) else {
            continue;
        };
        for &i in idxs {
            let i = i as i32;
            let options = [
                (Orientation::Horizontal, cell.offset(-i, 0)),
                (Orientation::Vertical, cell.offset(0, -i)),
            ];
            for (dir, origin) in options {
                if !seen.insert((origin, dir)) {
                    continue;
                }
                let check = check_placement(grid, word, origin, dir);
                if !check.valid {
                    continue;
                }

                let nb = bounds.extended(origin, len, dir);
                let (nw, nh) = (nb.width() as f32, nb.height() as f32);
                let new_area = nb.area() as f32;

                let density = (occupied + len - check.intersections) as f32 / new_area;
                let aspect = nw.min(nh) / nw.max(nh);
                let expansion = new_area / old_area;
                let expansion_penalty = if expansion > weights.expansion_tolerance {
                    (expansion - 1.0) * weights.penalty_expansion
                } else {
                    0.0
                };

                let crossings = check.intersections as f32;
                let score = crossings * crossings * weights.weight_crossing
                    + density * weights.weight_density
                    + aspect * weights.weight_aspect
                    + future_links * weights.weight_future_links
                    - expansion_penalty;

                out.push(Candidate {
                    origin,
                    orientation: dir,
                    score,
                    intersections: check.intersections,
                });
            }
        }
    }

    out.sort_by(|a, b| b.score.total_cmp(&a.score));
    out.truncate(limit);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Placement;

    fn weights() -> ScoringWeights {
        ScoringWeights::default()
    }

    #[test]
    fn empty_grid_offers_both_seeds() {
        let c = find_candidates(&weights(), &Grid::new(), "HELLO", [], 30);
        assert_eq!(c.len(), 2);
        assert!(c.iter().all(|c| c.origin == Coord::new(0, 0) && c.score == 0.0));
        assert_ne!(c[0].orientation, c[1].orientation);
    }

    #[test]
    fn only_valid_crossings_are_offered() {
        let mut g = Grid::new();
        g.apply(&Placement::new("CAT", Coord::new(0, 0), Orientation::Horizontal));
        let c = find_candidates(&weights(), &g, "TAR", [], 30);

        assert!(!c.is_empty());
        for cand in &c {
            assert_eq!(cand.orientation, Orientation::Vertical);
            assert!(cand.intersections >= 1);
        }
        // Sorted best first
        assert!(c.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn growing_crossing_pays_expansion_penalty() {
        let mut g = Grid::new();
        g.apply(&Placement::new("CAT", Coord::new(0, 0), Orientation::Horizontal));
        let c = find_candidates(&weights(), &g, "TAR", [], 30);

        // 1x3 box grows to 3x3: 300 + 40 * 5/9 + 40 - (3 - 1) * 150
        let expected = 300.0 + 40.0 * 5.0 / 9.0 + 40.0 - 300.0;
        assert_eq!(c.len(), 2);
        assert!(c.iter().all(|c| (c.score - expected).abs() < 1e-3));
        assert!(c.iter().all(|c| c.intersections == 1));

        let mut origins: Vec<(i32, i32)> = c.iter().map(|c| (c.origin.x, c.origin.y)).collect();
        origins.sort();
        assert_eq!(origins, vec![(1, -1), (2, 0)]);
    }

    #[test]
    fn crossing_inside_the_box_is_not_penalized() {
        let mut g = Grid::new();
        g.apply(&Placement::new("CAT", Coord::new(0, 0), Orientation::Horizontal));
        g.apply(&Placement::new("CUB", Coord::new(0, 0), Orientation::Vertical));
        let c = find_candidates(&weights(), &g, "TOE", [], 30);

        // 3x3 box unchanged: 300 + 40 * 7/9 + 40
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].origin, Coord::new(2, 0));
        assert_eq!(c[0].orientation, Orientation::Vertical);
        assert!((c[0].score - (340.0 + 40.0 * 7.0 / 9.0)).abs() < 1e-3);
    }

    #[test]
    fn unrelated_word_has_no_candidates() {
        let mut g = Grid::new();
        g.apply(&Placement::new("ABC", Coord::new(0, 0), Orientation::Horizontal));
        assert!(find_candidates(&weights(), &g, "XYZ", [], 30).is_empty());
    }

    #[test]
    fn lookahead_raises_score() {
        let mut g = Grid::new();
        g.apply(&Placement::new("CAT", Coord::new(0, 0), Orientation::Horizontal));
        let alone = find_candidates(&weights(), &g, "TAR", [], 30);
        let linked = find_candidates(&weights(), &g, "TAR", ["RAT"], 30);
        // T, A, R all occur in RAT: three links at 10 points each.
        assert!((linked[0].score - alone[0].score - 30.0).abs() < 1e-3);
    }

    #[test]
    fn limit_caps_results() {
        let mut g = Grid::new();
        g.apply(&Placement::new("ABABABAB", Coord::new(0, 0), Orientation::Horizontal));
        let c = find_candidates(&weights(), &g, "BAB", [], 3);
        assert!(c.len() <= 3);
    }
}
