//! Grid coordinates shared by every other module.

use core::fmt;

/// A cell address on a board: `x` is the column, `y` the row.
///
/// Row 0 and column 0 hold the labels, so playable cells start at `(1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// `true` when the coordinate sits in the label row or column.
    pub fn in_gutter(&self) -> bool {
        self.x < 1 || self.y < 1
    }

    /// Coordinate shifted by `(dx, dy)`, or `None` if it would go negative.
    pub fn offset(&self, dx: isize, dy: isize) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Self { x, y })
    }

    /// Letter naming this column, `A` for column 1 through `Z` for 26.
    pub fn column_letter(&self) -> Option<char> {
        match self.x {
            1..=26 => Some((b'A' + (self.x - 1) as u8) as char),
            _ => None,
        }
    }

    /// Up, down, left and right neighbours that do not underflow.
    /// Bounds against a particular board are the caller's concern.
    pub fn orthogonal_neighbours(self) -> impl Iterator<Item = Coordinate> {
        DIRECTIONS
            .iter()
            .filter_map(move |&(dx, dy)| self.offset(dx, dy))
    }
}

/// Unit steps in the four orthogonal directions.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    /// Column letter followed by row number, e.g. `A1` for `(1, 1)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column_letter() {
            Some(col) if self.y >= 1 => write!(f, "{}{}", col, self.y),
            _ => write!(f, "({}, {})", self.x, self.y),
        }
    }
}
