use super::{Coord, Placement};
use fnv::{FnvHashMap, FnvHashSet};
use std::collections::VecDeque;
use std::hash::Hash;

/// Breadth-first reachability from `seeds`.
///
/// `neighbors` yields the nodes adjacent to a node that the walk may enter;
/// filtering (bounds, passability) is its job. Returns every visited node,
/// seeds included.
pub fn flood<N, I, F>(seeds: impl IntoIterator<Item = N>, mut neighbors: F) -> FnvHashSet<N>
where
    N: Copy + Eq + Hash,
    I: IntoIterator<Item = N>,
    F: FnMut(N) -> I,
{
    let mut visited = FnvHashSet::default();
    let mut queue = VecDeque::new();

    for s in seeds {
        if visited.insert(s) {
            queue.push_back(s);
        }
    }

    while let Some(node) = queue.pop_front() {
        for next in neighbors(node) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    visited
}

/// The placements still linked to the first one through shared cells,
/// in their original order.
pub fn connected_words(placements: &[Placement]) -> Vec<Placement> {
    if placements.is_empty() {
        return Vec::new();
    }

    let mut owners: FnvHashMap<Coord, Vec<usize>> = FnvHashMap::default();
    for (idx, p) in placements.iter().enumerate() {
        for (c, _) in p.cells() {
            owners.entry(c).or_default().push(idx);
        }
    }

    let mut adjacency: Vec<FnvHashSet<usize>> = vec![FnvHashSet::default(); placements.len()];
    for idxs in owners.values().filter(|v| v.len() > 1) {
        for &a in idxs {
            for &b in idxs {
                if a != b {
                    adjacency[a].insert(b);
                }
            }
        }
    }

    let reached = flood([0usize], |i| adjacency[i].iter().copied().collect::<Vec<_>>());

    placements
        .iter()
        .enumerate()
        .filter(|(i, _)| reached.contains(i))
        .map(|(_, p)| p.clone())
        .collect()
}
