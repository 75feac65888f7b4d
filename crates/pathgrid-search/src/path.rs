use pathgrid_core::Coord;

use crate::engine::Predecessors;
use crate::error::SearchError;

/// A start → end path, both endpoints included.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    coords: Vec<Coord>,
}

impl Path {
    /// Coordinates from start to end.
    #[inline]
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// Number of edges, i.e. one less than the number of coordinates.
    #[inline]
    pub fn length(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.coords.first().copied()
    }

    #[inline]
    pub fn end(&self) -> Option<Coord> {
        self.coords.last().copied()
    }

    /// Coordinates strictly between the endpoints.
    pub fn interior(&self) -> &[Coord] {
        match self.coords.len() {
            0..=2 => &[],
            n => &self.coords[1..n - 1],
        }
    }
}

/// Walk `predecessors` back from `end` to `start`.
///
/// `start == end` gives a single-coordinate path of length 0. A missing link
/// before reaching `start`, or a chain longer than the grid (a cycle), fails
/// with [`SearchError::NoPredecessorChain`].
pub fn reconstruct(
    predecessors: &Predecessors,
    start: Coord,
    end: Coord,
) -> Result<Path, SearchError> {
    let broken = SearchError::NoPredecessorChain { start, end };
    let limit = predecessors.bounds().len();

    let mut coords = vec![end];
    let mut p = end;
    while p != start {
        if coords.len() > limit {
            return Err(broken);
        }
        p = predecessors.get(p).ok_or_else(|| broken.clone())?;
        coords.push(p);
    }
    coords.reverse();
    Ok(Path { coords })
}
