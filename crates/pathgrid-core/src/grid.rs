//! The obstacle [`Grid`]: per-cell wall/start/end flags plus cached endpoints.
//!
//! All mutating operations keep these invariants:
//!
//! - a wall cell is never the start or the end;
//! - there is at most one start and at most one end;
//! - start and end never share a cell;
//! - the cached start/end coordinates agree with the cell flags.

use log::debug;

use crate::error::GridError;
use crate::geom::{Bounds, BoundsIter, Coord};

/// Flags of a single grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub wall: bool,
    pub is_start: bool,
    pub is_end: bool,
}

impl Cell {
    /// Neither a wall nor an endpoint.
    #[inline]
    pub const fn is_empty(self) -> bool {
        !self.wall && !self.is_start && !self.is_end
    }

    #[inline]
    pub const fn is_endpoint(self) -> bool {
        self.is_start || self.is_end
    }
}

/// One of the two search endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    End,
}

/// What [`Grid::cycle_endpoint`] changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EndpointChange {
    Set(Endpoint),
    Cleared(Endpoint),
}

/// A fixed-size rectangular grid of [`Cell`]s.
#[derive(Clone, Debug)]
pub struct Grid {
    bounds: Bounds,
    cells: Vec<Cell>,
    start: Option<Coord>,
    end: Option<Coord>,
}

impl Grid {
    /// Create an empty grid. Both dimensions must be non-zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let empty = GridError::EmptyGrid { rows, cols };
        let r = i32::try_from(rows).map_err(|_| empty.clone())?;
        let c = i32::try_from(cols).map_err(|_| empty.clone())?;
        if r == 0 || c == 0 {
            return Err(empty);
        }
        let bounds = Bounds::new(r, c);
        Ok(Self {
            bounds,
            cells: vec![Cell::default(); bounds.len()],
            start: None,
            end: None,
        })
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    #[inline]
    pub fn contains(&self, p: Coord) -> bool {
        self.bounds.contains(p)
    }

    /// The cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn cell(&self, p: Coord) -> Option<Cell> {
        self.bounds.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is a wall. Out-of-bounds coordinates are not walls.
    #[inline]
    pub fn is_wall(&self, p: Coord) -> bool {
        self.cell(p).is_some_and(|c| c.wall)
    }

    #[inline]
    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Coord> {
        self.end
    }

    /// Both endpoints, or [`GridError::NotReady`] if either is unset.
    pub fn endpoints(&self) -> Result<(Coord, Coord), GridError> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Ok((s, e)),
            _ => Err(GridError::NotReady),
        }
    }

    /// In-bounds, non-wall orthogonal neighbours of `p` in the fixed order
    /// down, up, right, left.
    pub fn neighbors(&self, p: Coord) -> impl Iterator<Item = Coord> + '_ {
        p.neighbors_4()
            .into_iter()
            .filter(move |&n| self.cell(n).is_some_and(|c| !c.wall))
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.wall).count()
    }

    /// Row-major iterator over `(Coord, Cell)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    fn index_of(&self, p: Coord) -> Result<usize, GridError> {
        self.bounds.index(p).ok_or(GridError::OutOfBounds { pos: p })
    }

    /// Flip the wall flag at `p` and return the new value. Endpoint cells
    /// are rejected.
    pub fn toggle_wall(&mut self, p: Coord) -> Result<bool, GridError> {
        let i = self.index_of(p)?;
        let wall = !self.cells[i].wall;
        self.set_wall(p, wall)
    }

    /// Set the wall flag at `p` and return it. Putting a wall on an endpoint
    /// is rejected; clearing one is always allowed.
    pub fn set_wall(&mut self, p: Coord, wall: bool) -> Result<bool, GridError> {
        let i = self.index_of(p)?;
        let cell = &mut self.cells[i];
        if wall && cell.is_endpoint() {
            return Err(GridError::Rejected {
                pos: p,
                reason: "cell is a start or end",
            });
        }
        cell.wall = wall;
        Ok(wall)
    }

    /// Designate `p` as the start. Rejected on walls, on the end cell, or
    /// while another cell is already the start.
    pub fn set_start(&mut self, p: Coord) -> Result<(), GridError> {
        self.set_endpoint(p, Endpoint::Start)
    }

    /// Designate `p` as the end. Same rules as [`set_start`](Self::set_start).
    pub fn set_end(&mut self, p: Coord) -> Result<(), GridError> {
        self.set_endpoint(p, Endpoint::End)
    }

    fn set_endpoint(&mut self, p: Coord, which: Endpoint) -> Result<(), GridError> {
        let i = self.index_of(p)?;
        let current = match which {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        };
        let cell = &mut self.cells[i];
        let reason = if cell.wall {
            Some("cell is a wall")
        } else if current == Some(p) {
            None
        } else if current.is_some() {
            Some("endpoint already placed elsewhere")
        } else if cell.is_endpoint() {
            Some("cell is already the other endpoint")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(GridError::Rejected { pos: p, reason });
        }
        match which {
            Endpoint::Start => {
                cell.is_start = true;
                self.start = Some(p);
            }
            Endpoint::End => {
                cell.is_end = true;
                self.end = Some(p);
            }
        }
        debug!("{which:?} set at {p}");
        Ok(())
    }

    /// Remove the start designation, returning where it was.
    pub fn clear_start(&mut self) -> Option<Coord> {
        let p = self.start.take()?;
        if let Some(i) = self.bounds.index(p) {
            self.cells[i].is_start = false;
        }
        Some(p)
    }

    /// Remove the end designation, returning where it was.
    pub fn clear_end(&mut self) -> Option<Coord> {
        let p = self.end.take()?;
        if let Some(i) = self.bounds.index(p) {
            self.cells[i].is_end = false;
        }
        Some(p)
    }

    /// Advance the endpoint cycle at `p`: empty → start → end → empty.
    ///
    /// An empty cell becomes the start if none exists, otherwise the end if
    /// none exists; with both already placed it is rejected. Clicking the
    /// start or end clears it. Walls are rejected.
    pub fn cycle_endpoint(&mut self, p: Coord) -> Result<EndpointChange, GridError> {
        let cell = self.cell(p).ok_or(GridError::OutOfBounds { pos: p })?;
        if cell.wall {
            return Err(GridError::Rejected {
                pos: p,
                reason: "cell is a wall",
            });
        }
        if cell.is_start {
            self.clear_start();
            return Ok(EndpointChange::Cleared(Endpoint::Start));
        }
        if cell.is_end {
            self.clear_end();
            return Ok(EndpointChange::Cleared(Endpoint::End));
        }
        if self.start.is_none() {
            self.set_start(p)?;
            Ok(EndpointChange::Set(Endpoint::Start))
        } else if self.end.is_none() {
            self.set_end(p)?;
            Ok(EndpointChange::Set(Endpoint::End))
        } else {
            Err(GridError::Rejected {
                pos: p,
                reason: "start and end are both placed",
            })
        }
    }

    /// Reset every cell to empty and forget both endpoints.
    pub fn clear_all(&mut self) {
        self.cells.fill(Cell::default());
        self.start = None;
        self.end = None;
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Coord, Cell)` pairs of a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    inner: BoundsIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Coord, Cell);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let p = self.inner.next()?;
        let i = self.grid.bounds.index(p)?;
        Some((p, self.grid.cells[i]))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
