//! Min-priority frontier keyed by `(distance, coord)`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use pathgrid_core::Coord;

/// One frontier entry. Ordered by distance, then by coordinate (row-major),
/// so equal-distance entries always pop in the same order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrontierEntry {
    pub distance: u32,
    pub pos: Coord,
}

/// Priority queue of tentative distances.
///
/// A coordinate may appear several times with different distances. Entries
/// are never removed early: superseded ones are popped like any other and
/// the caller discards them.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, distance: u32, pos: Coord) {
        self.heap.push(Reverse(FrontierEntry { distance, pos }));
    }

    /// Remove and return the smallest entry.
    #[inline]
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse(e)| e)
    }

    #[inline]
    pub fn peek(&self) -> Option<FrontierEntry> {
        self.heap.peek().map(|Reverse(e)| *e)
    }

    /// Number of entries, stale ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_smallest_distance_first() {
        let mut f = Frontier::new();
        f.push(3, Coord::new(0, 0));
        f.push(1, Coord::new(5, 5));
        f.push(2, Coord::new(1, 1));
        let order: Vec<u32> = std::iter::from_fn(|| f.pop()).map(|e| e.distance).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn ties_pop_in_coordinate_order() {
        let mut f = Frontier::new();
        f.push(3, Coord::new(2, 0));
        f.push(3, Coord::new(0, 4));
        f.push(3, Coord::new(0, 1));
        let order: Vec<Coord> = std::iter::from_fn(|| f.pop()).map(|e| e.pos).collect();
        assert_eq!(
            order,
            vec![Coord::new(0, 1), Coord::new(0, 4), Coord::new(2, 0)]
        );
    }

    #[test]
    fn keeps_duplicates() {
        let mut f = Frontier::new();
        f.push(5, Coord::new(1, 1));
        f.push(2, Coord::new(1, 1));
        assert_eq!(f.len(), 2);
        assert_eq!(f.peek().map(|e| e.distance), Some(2));
        f.pop();
        assert_eq!(f.pop().map(|e| e.distance), Some(5));
        assert!(f.is_empty());
        assert_eq!(f.pop(), None);
    }
}
