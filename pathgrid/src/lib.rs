//! **pathgrid**: watch Dijkstra's algorithm explore an obstacle grid in
//! the terminal.
//!
//! Draw walls with the left mouse button, place the start and end with the
//! right button, then press Enter to animate the search one step per tick.

pub mod cli;
pub mod colors;
pub mod model;
pub mod session;

pub use model::{Overlay, Visualizer};
pub use session::{Session, SessionError};
