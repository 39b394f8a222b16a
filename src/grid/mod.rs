pub mod table;
pub mod traverse;
pub mod validator;

pub use self::table::{CharTable, EMPTY_CELL};
pub use self::traverse::connected_words;
pub use self::validator::{check_placement, PlacementCheck};

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Signed cell coordinate on the unbounded plane. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline(always)]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Unit step along the axis.
    #[inline(always)]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }

    /// The two unit offsets across the axis.
    #[inline(always)]
    pub const fn perpendicular(self) -> [(i32, i32); 2] {
        match self {
            Orientation::Horizontal => [(0, -1), (0, 1)],
            Orientation::Vertical => [(-1, 0), (1, 0)],
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Cell of the `i`-th letter of a word laid out from `origin`.
#[inline(always)]
pub fn cell_at(origin: Coord, i: usize, dir: Orientation) -> Coord {
    let (dx, dy) = dir.step();
    let i = i as i32;
    origin.offset(dx * i, dy * i)
}

/// A word laid out on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub word: String,
    pub origin: Coord,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(word: impl Into<String>, origin: Coord, orientation: Orientation) -> Self {
        Self {
            word: word.into(),
            origin,
            orientation,
        }
    }

    /// Length in letters, not bytes.
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        self.word
            .chars()
            .enumerate()
            .map(move |(i, c)| (cell_at(self.origin, i, self.orientation), c))
    }

    /// Cells directly before the first and after the last letter.
    pub fn caps(&self) -> (Coord, Coord) {
        let (dx, dy) = self.orientation.step();
        let before = self.origin.offset(-dx, -dy);
        let after = cell_at(self.origin, self.len(), self.orientation);
        (before, after)
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            word: self.word.clone(),
            origin: self.origin.offset(dx, dy),
            orientation: self.orientation,
        }
    }

    /// Mirror across the main diagonal.
    pub fn transposed(&self) -> Self {
        Self {
            word: self.word.clone(),
            origin: Coord::new(self.origin.y, self.origin.x),
            orientation: self.orientation.flipped(),
        }
    }
}

/// Inclusive bounding box of the occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    pub const UNIT: Bounds = Bounds {
        min_x: 0,
        max_x: 0,
        min_y: 0,
        max_y: 0,
    };

    pub fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn include(&self, c: Coord) -> Bounds {
        Bounds {
            min_x: self.min_x.min(c.x),
            max_x: self.max_x.max(c.x),
            min_y: self.min_y.min(c.y),
            max_y: self.max_y.max(c.y),
        }
    }

    /// Bounds after laying `len` letters from `origin`.
    pub fn extended(&self, origin: Coord, len: usize, dir: Orientation) -> Bounds {
        let last = cell_at(origin, len.saturating_sub(1), dir);
        self.include(origin).include(last)
    }
}

/// Sparse letter store. Cloned per search branch; never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: FnvHashMap<Coord, char>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a grid by applying placements in order.
    pub fn from_placements<'a>(placements: impl IntoIterator<Item = &'a Placement>) -> Self {
        let mut grid = Grid::new();
        for p in placements {
            grid.apply(p);
        }
        grid
    }

    #[inline(always)]
    pub fn get(&self, c: Coord) -> Option<char> {
        self.cells.get(&c).copied()
    }

    #[inline(always)]
    pub fn is_occupied(&self, c: Coord) -> bool {
        self.cells.contains_key(&c)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        self.cells.iter().map(|(&c, &ch)| (c, ch))
    }

    /// Writes the word unconditionally. Callers validate first.
    pub fn apply(&mut self, p: &Placement) {
        for (c, ch) in p.cells() {
            self.cells.insert(c, ch);
        }
    }

    /// Bounding box; a unit box at the origin for an empty grid.
    pub fn bounds(&self) -> Bounds {
        let mut iter = self.cells.keys();
        let Some(&first) = iter.next() else {
            return Bounds::UNIT;
        };
        let start = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        iter.fold(start, |b, &c| b.include(c))
    }
}
