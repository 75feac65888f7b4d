//! Grid geometry: [`Coord`] and [`Bounds`].

use std::fmt;

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A cell coordinate. Rows grow downwards, columns grow to the right.
///
/// Ordering is row-major (row first, then column); the search frontier relies
/// on it to break distance ties.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Top-left corner.
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return the coordinate shifted by (`dr`, `dc`).
    #[inline]
    pub const fn shift(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// The four orthogonal neighbours in search order: down, up, right, left.
    ///
    /// Some of them may fall outside any particular grid.
    #[inline]
    pub const fn neighbors_4(self) -> [Coord; 4] {
        [
            self.shift(1, 0),
            self.shift(-1, 0),
            self.shift(0, 1),
            self.shift(0, -1),
        ]
    }

    /// Manhattan distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Coord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The rectangle `[0, rows) x [0, cols)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

impl Bounds {
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.rows as usize) * (self.cols as usize)
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }

    #[inline]
    pub fn contains(self, p: Coord) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.cols
    }

    /// Row-major flat index of `p`, or `None` outside the bounds.
    #[inline]
    pub fn index(self, p: Coord) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.cols as usize + p.col as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn coord(self, idx: usize) -> Coord {
        let cols = self.cols.max(1) as usize;
        Coord::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Row-major iterator over all coordinates.
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
            len: self.len(),
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Coord;
    type IntoIter = BoundsIter;

    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Iterator returned by [`Bounds::iter`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
    len: usize,
}

impl Iterator for BoundsIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.next >= self.len {
            return None;
        }
        let p = self.bounds.coord(self.next);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.len - self.next;
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_order_is_row_major() {
        let mut v = vec![Coord::new(1, 0), Coord::new(0, 2), Coord::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Coord::new(0, 1), Coord::new(0, 2), Coord::new(1, 0)]);
    }

    #[test]
    fn neighbors_order() {
        let n = Coord::new(5, 5).neighbors_4();
        assert_eq!(
            n,
            [
                Coord::new(6, 5),
                Coord::new(4, 5),
                Coord::new(5, 6),
                Coord::new(5, 4),
            ]
        );
    }

    #[test]
    fn bounds_contains_edges() {
        let b = Bounds::new(3, 4);
        assert!(b.contains(Coord::new(0, 0)));
        assert!(b.contains(Coord::new(2, 3)));
        assert!(!b.contains(Coord::new(3, 0)));
        assert!(!b.contains(Coord::new(0, 4)));
        assert!(!b.contains(Coord::new(-1, 0)));
    }

    #[test]
    fn index_round_trip() {
        let b = Bounds::new(3, 4);
        for (i, p) in b.iter().enumerate() {
            assert_eq!(b.index(p), Some(i));
            assert_eq!(b.coord(i), p);
        }
        assert_eq!(b.index(Coord::new(3, 0)), None);
    }

    #[test]
    fn iter_len() {
        let b = Bounds::new(2, 5);
        assert_eq!(b.iter().len(), 10);
        assert_eq!(b.iter().last(), Some(Coord::new(1, 4)));
        assert_eq!(Bounds::new(0, 5).iter().count(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(Coord::new(2, 7).to_string(), "(2, 7)");
        assert_eq!(Bounds::new(28, 48).to_string(), "28x48");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn coord_round_trip() {
        let c = Coord::new(3, 9);
        let json = serde_json::to_string(&c).unwrap();
        let back: Coord = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
