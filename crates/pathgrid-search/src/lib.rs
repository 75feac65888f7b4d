//! Step-at-a-time shortest-path search over an obstacle grid.
//!
//! The search is split so that a caller can interleave work with rendering
//! and input handling:
//!
//! - [`SearchEngine`] runs Dijkstra with unit edge weights, one frontier
//!   pop per [`step`](SearchEngine::step), and reports what changed.
//! - [`reconstruct`] walks predecessor links back from the goal.
//! - [`StepScheduler`] drives the engine at a fixed cadence and can be
//!   cancelled between any two steps.
//!
//! The grid is supplied through the [`Pather`] trait, implemented for
//! [`pathgrid_core::Grid`].

mod engine;
mod error;
mod frontier;
mod path;
mod scheduler;
mod traits;

pub use engine::{Discovery, EngineState, Predecessors, SearchEngine, StepOutcome, StepReport};
pub use error::SearchError;
pub use frontier::{Frontier, FrontierEntry};
pub use path::{Path, reconstruct};
pub use scheduler::{Outcome, SchedulerEvent, StepScheduler, Ticket};
pub use traits::Pather;
