use super::{cell_at, Coord, Grid, Orientation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementCheck {
    pub valid: bool,
    pub intersections: usize,
}

impl PlacementCheck {
    const REJECTED: PlacementCheck = PlacementCheck {
        valid: false,
        intersections: 0,
    };
}

/// Checks whether `word` fits at `origin` without disturbing the grid.
///
/// Occupied cells must already hold the same letter and count as crossings.
/// Empty cells must have no occupied neighbour across the axis, and both cap
/// cells must be empty. Unless the grid is empty, at least one crossing is
/// required.
pub fn check_placement(grid: &Grid, word: &str, origin: Coord, dir: Orientation) -> PlacementCheck {
    let mut intersections = 0;
    let mut len = 0;
    let perp = dir.perpendicular();

    for (i, ch) in word.chars().enumerate() {
        let c = cell_at(origin, i, dir);
        len += 1;
        match grid.get(c) {
            Some(existing) if existing != ch => return PlacementCheck::REJECTED,
            Some(_) => intersections += 1,
            None => {
                if perp
                    .iter()
                    .any(|&(dx, dy)| grid.is_occupied(c.offset(dx, dy)))
                {
                    return PlacementCheck::REJECTED;
                }
            }
        }
    }

    let (dx, dy) = dir.step();
    let before = origin.offset(-dx, -dy);
    let after = cell_at(origin, len, dir);
    let caps_clear = !grid.is_occupied(before) && !grid.is_occupied(after);

    PlacementCheck {
        valid: (intersections > 0 || grid.is_empty()) && caps_clear,
        intersections,
    }
}
