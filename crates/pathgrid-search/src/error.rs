use pathgrid_core::Coord;
use thiserror::Error;

/// Errors raised by the search engine, path reconstruction and scheduler.
///
/// Only [`InvalidEndpoints`](SearchError::InvalidEndpoints) is a user-facing
/// condition; the others mean the engine's state machine was misused or its
/// bookkeeping is broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid endpoints {start} -> {end}: {reason}")]
    InvalidEndpoints {
        start: Coord,
        end: Coord,
        reason: &'static str,
    },

    #[error("search stepped before initialize")]
    NotInitialized,

    #[error("search already finished; initialize again before stepping")]
    AlreadyTerminal,

    #[error("no predecessor chain from {end} back to {start}")]
    NoPredecessorChain { start: Coord, end: Coord },
}
