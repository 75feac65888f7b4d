//! Cadenced, cancellable driver for [`SearchEngine`].
//!
//! The scheduler never sleeps or spawns: the caller owns the clock and calls
//! [`StepScheduler::poll`] from its event loop. Each pending step is tied to
//! a [`Ticket`]; cancelling bumps the generation so a ticket handed out
//! earlier can no longer trigger a step.

use std::time::{Duration, Instant};

use log::{debug, info};
use pathgrid_core::Coord;

use crate::engine::{EngineState, SearchEngine, StepOutcome, StepReport};
use crate::error::SearchError;
use crate::path::Path;
use crate::traits::Pather;

/// Handle for one scheduled step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: u64,
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    PathFound(Path),
    NoPath,
}

/// Result of a step driven by the scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// The run continues; another step is armed.
    Step(StepReport),
    /// Final step of the run. Search state has been discarded.
    Finished { report: StepReport, outcome: Outcome },
}

#[derive(Copy, Clone, Debug)]
struct Pending {
    ticket: Ticket,
    due: Instant,
}

/// Drives a [`SearchEngine`] one step per delay interval until it finishes
/// or is cancelled.
#[derive(Debug)]
pub struct StepScheduler {
    engine: SearchEngine,
    delay: Duration,
    generation: u64,
    pending: Option<Pending>,
}

impl StepScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            engine: SearchEngine::new(),
            delay,
            generation: 0,
            pending: None,
        }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the cadence. Takes effect from the next armed step.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Read-only view of the engine (for inspection; events are the
    /// intended way to observe progress).
    #[inline]
    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Whether a run is in progress.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Ticket of the armed step, if any.
    #[inline]
    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.pending.map(|p| p.ticket)
    }

    /// When the armed step becomes due.
    #[inline]
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    fn arm(&mut self, due: Instant) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        let ticket = Ticket {
            generation: self.generation,
        };
        self.pending = Some(Pending { ticket, due });
        ticket
    }

    /// Start a new run, cancelling any run in progress. The first step is
    /// due immediately at `now`.
    pub fn start<P: Pather>(
        &mut self,
        pather: &P,
        start: Coord,
        end: Coord,
        now: Instant,
    ) -> Result<Ticket, SearchError> {
        self.cancel();
        self.engine.initialize(pather, start, end)?;
        info!("search started: {start} -> {end}, delay {:?}", self.delay);
        Ok(self.arm(now))
    }

    /// Stop the current run, discard its state and revoke the pending
    /// ticket. Returns whether anything was running.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.pending.take().is_some();
        self.generation = self.generation.wrapping_add(1);
        if self.engine.state() != EngineState::Idle {
            self.engine.reset();
        }
        if was_running {
            debug!("search cancelled");
        }
        was_running
    }

    /// Run the armed step if it is due at `now`.
    pub fn poll<P: Pather>(
        &mut self,
        pather: &P,
        now: Instant,
    ) -> Result<Option<SchedulerEvent>, SearchError> {
        match self.pending {
            Some(p) if now >= p.due => self.fire(pather, p.ticket, now),
            _ => Ok(None),
        }
    }

    /// Run the step for `ticket` regardless of its due time. Revoked or
    /// already-used tickets are ignored.
    pub fn fire<P: Pather>(
        &mut self,
        pather: &P,
        ticket: Ticket,
        now: Instant,
    ) -> Result<Option<SchedulerEvent>, SearchError> {
        if self.pending_ticket() != Some(ticket) {
            return Ok(None);
        }
        self.pending = None;

        let report = match self.engine.step(pather) {
            Ok(r) => r,
            Err(e) => {
                self.engine.reset();
                return Err(e);
            }
        };

        let outcome = match report.outcome {
            StepOutcome::Continuing => {
                self.arm(now + self.delay);
                return Ok(Some(SchedulerEvent::Step(report)));
            }
            StepOutcome::Found => {
                let path = self.engine.path();
                self.engine.reset();
                let path = path?;
                info!("path found, length {}", path.length());
                Outcome::PathFound(path)
            }
            StepOutcome::Exhausted => {
                self.engine.reset();
                info!("no path found");
                Outcome::NoPath
            }
        };
        Ok(Some(SchedulerEvent::Finished { report, outcome }))
    }

    /// Drive every remaining step without waiting, passing each report to
    /// `on_step`. Returns `None` if no run was in progress.
    pub fn run_to_end<P: Pather>(
        &mut self,
        pather: &P,
        mut on_step: impl FnMut(&StepReport),
    ) -> Result<Option<Outcome>, SearchError> {
        while let Some(ticket) = self.pending_ticket() {
            let now = self.next_due().unwrap_or_else(Instant::now);
            match self.fire(pather, ticket, now)? {
                Some(SchedulerEvent::Step(report)) => on_step(&report),
                Some(SchedulerEvent::Finished { report, outcome }) => {
                    on_step(&report);
                    return Ok(Some(outcome));
                }
                None => break,
            }
        }
        Ok(None)
    }
}
