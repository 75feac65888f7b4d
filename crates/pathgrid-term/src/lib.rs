//! **pathgrid-term**: the terminal surface of the pathgrid visualizer.
//!
//! A [`Model`] reacts to input [`Msg`]s and draws into a [`Canvas`]; the
//! [`App`] loop diffs successive canvases and hands the changed glyphs to a
//! [`Driver`]. [`CrosstermDriver`] is the terminal back-end.

pub mod app;
pub mod canvas;
pub mod driver;
pub mod messages;
pub mod style;

pub use app::{App, Context, Driver, Effect, Model};
pub use canvas::{Canvas, Frame, FrameGlyph, Glyph};
pub use driver::CrosstermDriver;
pub use messages::{Key, ModMask, MouseAction, Msg};
pub use style::{AttrMask, Color, Style};
