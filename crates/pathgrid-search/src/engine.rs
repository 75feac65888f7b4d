use log::{debug, trace};
use pathgrid_core::{Bounds, Coord};

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::path::{Path, reconstruct};
use crate::traits::Pather;

/// Sentinel for "not reached yet" in the distance table.
const UNREACHED: u32 = u32::MAX;

// ---------------------------------------------------------------------------
// Step results
// ---------------------------------------------------------------------------

/// Lifecycle of a [`SearchEngine`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EngineState {
    Idle,
    Running,
    Found,
    Exhausted,
}

impl EngineState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

/// What a single [`SearchEngine::step`] concluded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    Continuing,
    /// The goal was settled; its path can be reconstructed.
    Found,
    /// The frontier ran dry without reaching the goal.
    Exhausted,
}

/// A coordinate whose tentative distance improved during a step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Discovery {
    pub pos: Coord,
    pub distance: u32,
    /// The coordinate is the start or the end. Renderers keep the endpoint
    /// colour for these instead of painting them as frontier.
    pub endpoint: bool,
}

/// Side effects of one step, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub outcome: StepOutcome,
    /// Coordinate settled by this step, if any.
    pub settled: Option<Coord>,
    pub discovered: Vec<Discovery>,
    /// The popped entry was a superseded duplicate and was dropped.
    pub stale: bool,
}

impl StepReport {
    fn new(outcome: StepOutcome) -> Self {
        Self {
            outcome,
            settled: None,
            discovered: Vec::new(),
            stale: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Predecessors
// ---------------------------------------------------------------------------

/// Predecessor links recorded by a search: for each reached coordinate, the
/// coordinate it was reached from. The start has no entry.
#[derive(Clone, Debug, Default)]
pub struct Predecessors {
    bounds: Bounds,
    links: Vec<Option<Coord>>,
}

impl Predecessors {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            links: vec![None; bounds.len()],
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn get(&self, p: Coord) -> Option<Coord> {
        self.bounds.index(p).and_then(|i| self.links[i])
    }

    /// Record that `p` was reached from `from`. Ignored outside the bounds.
    #[inline]
    pub fn insert(&mut self, p: Coord, from: Coord) {
        if let Some(i) = self.bounds.index(p) {
            self.links[i] = Some(from);
        }
    }

    fn reset(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.links.clear();
        self.links.resize(bounds.len(), None);
    }
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// Incremental single-source Dijkstra search with unit edge weights.
///
/// State machine: `Idle → Running → {Found, Exhausted}`. `Running` loops on
/// [`StepOutcome::Continuing`]; terminal states require
/// [`initialize`](Self::initialize) before stepping again.
///
/// Per-coordinate tables are flat vectors sized to the grid and reused
/// between runs.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    state: EngineState,
    bounds: Bounds,
    start: Coord,
    end: Coord,
    distance: Vec<u32>,
    settled: Vec<bool>,
    predecessors: Predecessors,
    frontier: Frontier,
    settled_count: usize,
    steps: usize,
    nbuf: Vec<Coord>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self {
            state: EngineState::Idle,
            bounds: Bounds::default(),
            start: Coord::ORIGIN,
            end: Coord::ORIGIN,
            distance: Vec::new(),
            settled: Vec::new(),
            predecessors: Predecessors::default(),
            frontier: Frontier::new(),
            settled_count: 0,
            steps: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Discard any previous run and seed a new one from `start`.
    ///
    /// Both endpoints must be inside the grid and not walls. `start == end`
    /// is allowed; the first step then settles it and reports `Found`.
    /// An unreachable goal is not an error here; it shows up as
    /// [`StepOutcome::Exhausted`].
    pub fn initialize<P: Pather>(
        &mut self,
        pather: &P,
        start: Coord,
        end: Coord,
    ) -> Result<(), SearchError> {
        let bounds = pather.bounds();
        let invalid = |reason| SearchError::InvalidEndpoints { start, end, reason };
        if !bounds.contains(start) || !bounds.contains(end) {
            return Err(invalid("outside the grid"));
        }
        if !pather.is_passable(start) || !pather.is_passable(end) {
            return Err(invalid("endpoint is a wall"));
        }

        self.clear_tables(bounds);
        self.start = start;
        self.end = end;
        if let Some(i) = bounds.index(start) {
            self.distance[i] = 0;
        }
        self.frontier.push(0, start);
        self.state = EngineState::Running;
        debug!("search initialized on {bounds}: {start} -> {end}");
        Ok(())
    }

    /// Drop all search state and return to `Idle`.
    pub fn reset(&mut self) {
        let bounds = self.bounds;
        self.clear_tables(bounds);
        self.state = EngineState::Idle;
    }

    fn clear_tables(&mut self, bounds: Bounds) {
        let len = bounds.len();
        self.bounds = bounds;
        self.distance.clear();
        self.distance.resize(len, UNREACHED);
        self.settled.clear();
        self.settled.resize(len, false);
        self.predecessors.reset(bounds);
        self.frontier.clear();
        self.settled_count = 0;
        self.steps = 0;
    }

    /// Perform exactly one frontier pop.
    ///
    /// A stale pop (coordinate already settled) still counts as a step and
    /// reports `Continuing` with nothing discovered. Calling this with an
    /// empty frontier ends the run as `Exhausted`.
    ///
    /// `pather` must describe the same grid that was passed to
    /// [`initialize`](Self::initialize).
    pub fn step<P: Pather>(&mut self, pather: &P) -> Result<StepReport, SearchError> {
        match self.state {
            EngineState::Idle => return Err(SearchError::NotInitialized),
            EngineState::Found | EngineState::Exhausted => {
                return Err(SearchError::AlreadyTerminal);
            }
            EngineState::Running => {}
        }
        self.steps += 1;

        let Some(entry) = self.frontier.pop() else {
            self.state = EngineState::Exhausted;
            debug!(
                "search exhausted after {} steps, {} settled",
                self.steps, self.settled_count
            );
            return Ok(StepReport::new(StepOutcome::Exhausted));
        };

        let current = entry.pos;
        let Some(ci) = self.bounds.index(current) else {
            // Only in-bounds coordinates are ever pushed.
            return Ok(StepReport::new(StepOutcome::Continuing));
        };

        if self.settled[ci] {
            trace!("step {}: stale entry {current} at {}", self.steps, entry.distance);
            let mut report = StepReport::new(StepOutcome::Continuing);
            report.stale = true;
            return Ok(report);
        }

        self.settled[ci] = true;
        self.settled_count += 1;
        let current_d = self.distance[ci];

        if current == self.end {
            self.state = EngineState::Found;
            debug!(
                "goal {current} settled at distance {current_d} after {} steps",
                self.steps
            );
            let mut report = StepReport::new(StepOutcome::Found);
            report.settled = Some(current);
            return Ok(report);
        }

        let mut report = StepReport::new(StepOutcome::Continuing);
        report.settled = Some(current);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(current, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = self.bounds.index(np) else {
                continue;
            };
            if self.settled[ni] {
                continue;
            }
            let tentative = current_d + 1;
            if tentative >= self.distance[ni] {
                continue;
            }
            self.distance[ni] = tentative;
            self.predecessors.insert(np, current);
            self.frontier.push(tentative, np);
            report.discovered.push(Discovery {
                pos: np,
                distance: tentative,
                endpoint: np == self.start || np == self.end,
            });
        }
        self.nbuf = nbuf;

        trace!(
            "step {}: settled {current} at {current_d}, discovered {}",
            self.steps,
            report.discovered.len()
        );
        Ok(report)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Coord {
        self.end
    }

    /// Best known distance from the start, or `None` if not reached.
    pub fn distance(&self, p: Coord) -> Option<u32> {
        self.bounds
            .index(p)
            .map(|i| self.distance[i])
            .filter(|&d| d != UNREACHED)
    }

    pub fn is_settled(&self, p: Coord) -> bool {
        self.bounds.index(p).is_some_and(|i| self.settled[i])
    }

    /// Settled coordinates in row-major order.
    pub fn settled(&self) -> impl Iterator<Item = Coord> + '_ {
        self.bounds.iter().filter(|&p| self.is_settled(p))
    }

    #[inline]
    pub fn settled_count(&self) -> usize {
        self.settled_count
    }

    /// Frontier size, stale entries included.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Steps taken since the last `initialize`.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn predecessors(&self) -> &Predecessors {
        &self.predecessors
    }

    /// Reconstruct the start → end path. Meaningful once the state is
    /// [`EngineState::Found`].
    pub fn path(&self) -> Result<Path, SearchError> {
        reconstruct(&self.predecessors, self.start, self.end)
    }
}
