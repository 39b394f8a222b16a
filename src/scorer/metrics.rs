use crate::grid::{CharTable, Coord, Grid, Placement};
use fnv::{FnvHashMap, FnvHashSet};

/// How often each placement crosses another one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossingStats {
    /// Cells of each placement shared with some other placement, by index.
    pub per_word: Vec<usize>,
    /// Grid cells covered by two placements.
    pub total: usize,
}

impl CrossingStats {
    pub fn from_placements(placements: &[Placement]) -> Self {
        let mut coverage: FnvHashMap<Coord, u32> = FnvHashMap::default();
        for p in placements {
            for (c, _) in p.cells() {
                *coverage.entry(c).or_insert(0) += 1;
            }
        }

        let per_word = placements
            .iter()
            .map(|p| {
                p.cells()
                    .filter(|(c, _)| coverage.get(c).is_some_and(|&n| n > 1))
                    .count()
            })
            .collect();
        let total = coverage.values().filter(|&&n| n > 1).count();

        Self { per_word, total }
    }

    /// Mean crossings per placed word; 0 with nothing placed.
    pub fn average(&self) -> f32 {
        if self.per_word.is_empty() {
            return 0.0;
        }
        self.per_word.iter().sum::<usize>() as f32 / self.per_word.len() as f32
    }
}

/// Ideal perimeter for the occupied cell count over the bounding-box perimeter,
/// capped at 1. A layout of fewer than two words counts as perfectly compact.
pub fn compactness(grid: &Grid, placed_words: usize) -> f32 {
    if placed_words < 2 || grid.len() < 2 {
        return 1.0;
    }
    let b = grid.bounds();
    let perimeter = 2.0 * (b.width() + b.height()) as f32;
    let ideal = 4.0 * (grid.len() as f32).sqrt();
    (ideal / perimeter).min(1.0)
}

/// Occupied share of the bounding box, in percent.
pub fn density_pct(grid: &Grid) -> f32 {
    grid.len() as f32 / grid.bounds().area() as f32 * 100.0
}

/// Occupied cells, enclosed holes included, outside every fully occupied 2×2
/// block.
pub fn count_outliers(table: &CharTable) -> usize {
    let (w, h) = (table.width(), table.height());
    if w * h <= 1 {
        return 0;
    }

    let enclosed = table.enclosed_cells();
    let solid = |x: usize, y: usize| table.is_letter(x, y) || enclosed.contains(&(x, y));

    let mut core: FnvHashSet<(usize, usize)> = FnvHashSet::default();
    for y in 0..h.saturating_sub(1) {
        for x in 0..w.saturating_sub(1) {
            if solid(x, y) && solid(x + 1, y) && solid(x, y + 1) && solid(x + 1, y + 1) {
                core.extend([(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)]);
            }
        }
    }

    (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| solid(x, y) && !core.contains(&(x, y)))
        .count()
}
