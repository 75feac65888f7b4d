//! Edit/run session: the grid being edited plus the search animating over
//! it.
//!
//! The grid must not change under a running search, so every edit is
//! refused with [`SessionError::Busy`] until the run finishes or is
//! cancelled.

use std::time::{Duration, Instant};

use log::debug;
use pathgrid_core::{Config, Coord, EndpointChange, Grid, GridError, MapGen};
use pathgrid_search::{Outcome, SchedulerEvent, SearchError, StepScheduler, Ticket};
use rand::Rng;
use thiserror::Error;

/// Failures of session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("busy: search running")]
    Busy,
    #[error("set start and end first")]
    NotReady,
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// A grid, its search scheduler and the outcome of the last finished run.
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    scheduler: StepScheduler,
    last: Option<Outcome>,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self, SessionError> {
        Ok(Self {
            grid: Grid::new(config.rows, config.cols)?,
            scheduler: StepScheduler::new(config.step_delay()),
            last: None,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn scheduler(&self) -> &StepScheduler {
        &self.scheduler
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Outcome of the last finished run, until paths are cleared or a new
    /// run starts.
    #[inline]
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last.as_ref()
    }

    /// When the next step is due, if a run is active.
    #[inline]
    pub fn next_due(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.scheduler.set_delay(delay);
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.is_running() {
            debug!("edit refused: search running");
            return Err(SessionError::Busy);
        }
        Ok(())
    }

    /// Flip the wall flag at `pos`. Returns the new state.
    pub fn toggle_wall(&mut self, pos: Coord) -> Result<bool, SessionError> {
        self.ensure_idle()?;
        self.grid.toggle_wall(pos).map_err(rejected)
    }

    /// Make `pos` a wall. Returns whether it changed.
    pub fn paint_wall(&mut self, pos: Coord) -> Result<bool, SessionError> {
        self.ensure_idle()?;
        self.grid.set_wall(pos, true).map_err(rejected)
    }

    pub fn cycle_endpoint(&mut self, pos: Coord) -> Result<EndpointChange, SessionError> {
        self.ensure_idle()?;
        self.grid.cycle_endpoint(pos).map_err(rejected)
    }

    /// Empty the grid and forget the last outcome.
    pub fn clear_all(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.grid.clear_all();
        self.last = None;
        Ok(())
    }

    /// Forget the last outcome. Walls and endpoints stay.
    pub fn clear_paths(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.last = None;
        Ok(())
    }

    /// Replace the grid contents with random walls. Returns the number of
    /// walls placed.
    pub fn random_maze<R: Rng>(
        &mut self,
        mapgen: &mut MapGen<R>,
        density: f64,
    ) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        self.last = None;
        Ok(mapgen.scatter_walls(&mut self.grid, density))
    }

    /// Start a run from the placed start to the placed end. The first step
    /// is due at `now`.
    pub fn run(&mut self, now: Instant) -> Result<Ticket, SessionError> {
        self.ensure_idle()?;
        let (start, end) = self.grid.endpoints().map_err(|_| SessionError::NotReady)?;
        self.last = None;
        Ok(self.scheduler.start(&self.grid, start, end, now)?)
    }

    /// Advance the run if its next step is due.
    pub fn tick(&mut self, now: Instant) -> Result<Option<SchedulerEvent>, SessionError> {
        let event = self.scheduler.poll(&self.grid, now)?;
        if let Some(SchedulerEvent::Finished { outcome, .. }) = &event {
            self.last = Some(outcome.clone());
        }
        Ok(event)
    }

    /// Run every remaining step immediately. Returns the outcome, or `None`
    /// when nothing was running.
    pub fn finish(&mut self) -> Result<Option<Outcome>, SessionError> {
        let outcome = self.scheduler.run_to_end(&self.grid, |_| {})?;
        if outcome.is_some() {
            self.last = outcome.clone();
        }
        Ok(outcome)
    }

    /// Stop an in-flight run. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        self.scheduler.cancel()
    }
}

fn rejected(e: GridError) -> SessionError {
    debug!("edit rejected: {e}");
    SessionError::Grid(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(rows: usize, cols: usize) -> Session {
        let config = Config {
            rows,
            cols,
            step_delay_ms: 10,
            ..Config::default()
        };
        Session::new(&config).unwrap()
    }

    fn with_endpoints(rows: usize, cols: usize, start: Coord, end: Coord) -> Session {
        let mut s = session(rows, cols);
        s.cycle_endpoint(start).unwrap();
        s.cycle_endpoint(end).unwrap();
        s
    }

    #[test]
    fn rejects_empty_config() {
        let config = Config {
            rows: 0,
            ..Config::default()
        };
        assert!(matches!(
            Session::new(&config),
            Err(SessionError::Grid(GridError::EmptyGrid { .. }))
        ));
    }

    #[test]
    fn run_needs_both_endpoints() {
        let mut s = session(3, 3);
        let now = Instant::now();
        assert_eq!(s.run(now), Err(SessionError::NotReady));
        s.cycle_endpoint(Coord::new(0, 0)).unwrap();
        assert_eq!(s.run(now), Err(SessionError::NotReady));
        assert_eq!(SessionError::NotReady.to_string(), "set start and end first");
        assert!(!s.is_running());
    }

    #[test]
    fn edits_are_busy_while_running() {
        let mut s = with_endpoints(3, 3, Coord::new(0, 0), Coord::new(2, 2));
        s.run(Instant::now()).unwrap();
        assert!(s.is_running());

        let p = Coord::new(1, 1);
        assert_eq!(s.toggle_wall(p), Err(SessionError::Busy));
        assert_eq!(s.paint_wall(p), Err(SessionError::Busy));
        assert_eq!(s.cycle_endpoint(p), Err(SessionError::Busy));
        assert_eq!(s.clear_all(), Err(SessionError::Busy));
        assert_eq!(s.clear_paths(), Err(SessionError::Busy));
        let mut mg = MapGen::new(StdRng::seed_from_u64(3));
        assert_eq!(s.random_maze(&mut mg, 0.5), Err(SessionError::Busy));
        assert_eq!(s.run(Instant::now()), Err(SessionError::Busy));
        assert!(!s.grid().is_wall(p));

        assert!(s.cancel());
        assert!(!s.is_running());
        assert_eq!(s.toggle_wall(p), Ok(true));
    }

    #[test]
    fn ticks_until_path_found() {
        let mut s = with_endpoints(3, 3, Coord::new(0, 0), Coord::new(2, 2));
        let mut now = Instant::now();
        s.run(now).unwrap();

        let mut steps = 0;
        let outcome = loop {
            match s.tick(now).unwrap() {
                Some(SchedulerEvent::Step(_)) => steps += 1,
                Some(SchedulerEvent::Finished { outcome, .. }) => break outcome,
                None => {}
            }
            now += Duration::from_millis(10);
        };
        // Every cell but the end settles before the end is popped.
        assert_eq!(steps, 8);
        match outcome {
            Outcome::PathFound(path) => assert_eq!(path.length(), 4),
            Outcome::NoPath => panic!("expected a path"),
        }
        assert!(!s.is_running());
        assert!(matches!(s.last_outcome(), Some(Outcome::PathFound(_))));
    }

    #[test]
    fn tick_waits_for_delay() {
        let mut s = with_endpoints(1, 3, Coord::new(0, 0), Coord::new(0, 2));
        let now = Instant::now();
        s.run(now).unwrap();
        assert!(s.tick(now).unwrap().is_some());
        assert!(s.tick(now).unwrap().is_none());
        assert_eq!(s.next_due(), Some(now + Duration::from_millis(10)));
    }

    #[test]
    fn walled_off_goal_reports_no_path() {
        let mut s = with_endpoints(1, 3, Coord::new(0, 0), Coord::new(0, 2));
        s.toggle_wall(Coord::new(0, 1)).unwrap();
        s.run(Instant::now()).unwrap();
        assert_eq!(s.finish().unwrap(), Some(Outcome::NoPath));
        assert_eq!(s.last_outcome(), Some(&Outcome::NoPath));
        s.clear_paths().unwrap();
        assert_eq!(s.last_outcome(), None);
        assert!(s.grid().is_wall(Coord::new(0, 1)));
    }

    #[test]
    fn rejected_edits_surface_grid_errors() {
        let mut s = with_endpoints(2, 2, Coord::new(0, 0), Coord::new(1, 1));
        assert!(matches!(
            s.toggle_wall(Coord::new(0, 0)),
            Err(SessionError::Grid(GridError::Rejected { .. }))
        ));
        assert!(matches!(
            s.paint_wall(Coord::new(5, 5)),
            Err(SessionError::Grid(GridError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn random_maze_clears_endpoints() {
        let mut s = with_endpoints(4, 4, Coord::new(0, 0), Coord::new(3, 3));
        let mut mg = MapGen::new(StdRng::seed_from_u64(11));
        let placed = s.random_maze(&mut mg, 1.0).unwrap();
        assert_eq!(placed, 16);
        assert_eq!(s.grid().start(), None);
        assert_eq!(s.grid().end(), None);
    }
}
