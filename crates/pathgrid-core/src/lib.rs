//! **pathgrid-core**: obstacle grid model for the pathgrid visualizer.
//!
//! This crate provides the types shared by the search engine and the
//! front-end: grid coordinates, the wall/start/end [`Grid`], random wall
//! generation, and the flat [`Config`] structure.

pub mod config;
pub mod error;
pub mod geom;
pub mod grid;
pub mod mapgen;

pub use config::{Config, delay_to_speed, speed_to_delay};
pub use error::{ConfigError, GridError};
pub use geom::{Bounds, Coord};
pub use grid::{Cell, Endpoint, EndpointChange, Grid};
pub use mapgen::MapGen;
