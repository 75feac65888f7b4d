//! Palette of the visualizer: dark slate background, one accent per cell
//! state.

use pathgrid_term::Color;

// -- Chrome --

pub const BG: Color = Color::from_rgb(0x0f, 0x17, 0x2a);
/// Empty grid cells.
pub const GRID: Color = Color::from_rgb(0x1e, 0x29, 0x3b);
pub const TEXT: Color = Color::from_rgb(0xe2, 0xe8, 0xf0);

// -- Cells --

pub const WALL: Color = Color::from_rgb(0x0e, 0xa5, 0xe9);
pub const START: Color = Color::from_rgb(0x22, 0xc5, 0x5e);
pub const END: Color = Color::from_rgb(0xef, 0x44, 0x44);

// -- Search overlay --

/// Discovered, not yet settled.
pub const OPEN: Color = Color::from_rgb(0xfd, 0xe0, 0x47);
/// Settled.
pub const CLOSED: Color = Color::from_rgb(0xa7, 0x8b, 0xfa);
pub const PATH: Color = Color::from_rgb(0xfb, 0x71, 0x85);
