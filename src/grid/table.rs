use super::traverse::flood;
use super::{Bounds, Grid};
use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marks a cell that holds no letter. Never alphabetic, so it cannot collide
/// with a word character.
pub const EMPTY_CELL: char = '-';

/// Separator between rows in an encoded table.
pub const ROW_SEPARATOR: char = '|';

/// Dense, rectangular snapshot of a grid's bounding box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CharTable {
    rows: Vec<Vec<char>>,
}

impl CharTable {
    /// Copies the grid into a table covering `bounds`.
    pub fn from_grid(grid: &Grid, bounds: &Bounds) -> Self {
        let mut rows = vec![vec![EMPTY_CELL; bounds.width()]; bounds.height()];
        for (c, ch) in grid.iter() {
            let x = (c.x - bounds.min_x) as usize;
            let y = (c.y - bounds.min_y) as usize;
            rows[y][x] = ch;
        }
        Self { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y).and_then(|r| r.get(x)).copied()
    }

    pub fn is_letter(&self, x: usize, y: usize) -> bool {
        matches!(self.get(x, y), Some(ch) if ch != EMPTY_CELL)
    }

    /// Row-major string, rows joined by [`ROW_SEPARATOR`].
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(self.height() * (self.width() + 1));
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push(ROW_SEPARATOR);
            }
            out.extend(row.iter());
        }
        out
    }

    /// Quarter turn clockwise.
    pub fn rotate_cw(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let rows = (0..w)
            .map(|x| (0..h).rev().map(|y| self.rows[y][x]).collect())
            .collect();
        Self { rows }
    }

    /// Mirror left-right.
    pub fn flip_horizontal(&self) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|r| r.iter().rev().copied().collect())
            .collect();
        Self { rows }
    }

    /// Mirror top-bottom.
    pub fn flip_vertical(&self) -> Self {
        Self {
            rows: self.rows.iter().rev().cloned().collect(),
        }
    }

    /// All eight images under rotations and mirrors, starting with `self`.
    pub fn symmetries(&self) -> Vec<CharTable> {
        let mut out = Vec::with_capacity(8);
        let mut current = self.clone();
        for _ in 0..4 {
            let next = current.rotate_cw();
            let mirrored = current.flip_horizontal();
            out.push(current);
            out.push(mirrored);
            current = next;
        }
        out
    }

    /// Empty cells that cannot reach the border through other empty cells.
    pub fn enclosed_cells(&self) -> FnvHashSet<(usize, usize)> {
        let (w, h) = (self.width(), self.height());
        if w * h <= 1 {
            return FnvHashSet::default();
        }

        let is_empty = |x: usize, y: usize| self.rows[y][x] == EMPTY_CELL;
        let border = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| (y == 0 || y == h - 1 || x == 0 || x == w - 1) && is_empty(x, y));

        let outside = flood(border, |(x, y)| {
            let mut next = Vec::with_capacity(4);
            if x > 0 {
                next.push((x - 1, y));
            }
            if x + 1 < w {
                next.push((x + 1, y));
            }
            if y > 0 {
                next.push((x, y - 1));
            }
            if y + 1 < h {
                next.push((x, y + 1));
            }
            next.retain(|&(nx, ny)| is_empty(nx, ny));
            next
        });

        (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| is_empty(x, y) && !outside.contains(&(x, y)))
            .collect()
    }
}

impl From<Vec<String>> for CharTable {
    fn from(rows: Vec<String>) -> Self {
        Self {
            rows: rows.into_iter().map(|r| r.chars().collect()).collect(),
        }
    }
}

impl From<CharTable> for Vec<String> {
    fn from(table: CharTable) -> Self {
        table
            .rows
            .into_iter()
            .map(|r| r.into_iter().collect())
            .collect()
    }
}

impl fmt::Display for CharTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&str]) -> CharTable {
        CharTable::from(rows.iter().map(|r| r.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn rotate_cw_once() {
        let t = table(&["AB", "CD", "EF"]);
        assert_eq!(t.rotate_cw(), table(&["ECA", "FDB"]));
    }

    #[test]
    fn four_rotations_identity() {
        let t = table(&["CAT", "--A", "--R"]);
        assert_eq!(t.rotate_cw().rotate_cw().rotate_cw().rotate_cw(), t);
    }

    #[test]
    fn symmetries_start_with_self() {
        let t = table(&["HELLO"]);
        let s = t.symmetries();
        assert_eq!(s.len(), 8);
        assert_eq!(s[0], t);
    }

    #[test]
    fn encode_joins_rows() {
        assert_eq!(table(&["AB", "-C"]).encode(), "AB|-C");
    }

    #[test]
    fn ring_encloses_its_middle() {
        let t = table(&["ABC", "D-E", "FGH"]);
        let enclosed = t.enclosed_cells();
        assert_eq!(enclosed.len(), 1);
        assert!(enclosed.contains(&(1, 1)));
    }

    #[test]
    fn open_corners_enclose_nothing() {
        let t = table(&["CAT", "--A", "--R"]);
        assert!(t.enclosed_cells().is_empty());
    }
}
