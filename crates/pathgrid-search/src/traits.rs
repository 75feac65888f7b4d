use pathgrid_core::{Bounds, Coord, Grid};

/// Neighbour enumeration over a bounded grid with unit edge weights.
pub trait Pather {
    /// The rectangle searched.
    fn bounds(&self) -> Bounds;

    /// Whether `p` is inside the bounds and can be stood on.
    fn is_passable(&self, p: Coord) -> bool;

    /// Append the passable neighbours of `p` into `buf`, in a fixed order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>);
}

impl Pather for Grid {
    #[inline]
    fn bounds(&self) -> Bounds {
        Grid::bounds(self)
    }

    #[inline]
    fn is_passable(&self, p: Coord) -> bool {
        self.cell(p).is_some_and(|c| !c.wall)
    }

    fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>) {
        buf.extend(Grid::neighbors(self, p));
    }
}
