//! Random obstacle generation.

use log::debug;
use rand::Rng;

use crate::grid::Grid;

/// Random wall generator driven by a caller-supplied RNG.
pub struct MapGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MapGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Clear `grid` (walls and endpoints) and turn each cell into a wall
    /// with probability `density`. Density is clamped to `[0, 1]`; NaN is
    /// treated as zero.
    ///
    /// Returns the number of walls placed.
    pub fn scatter_walls(&mut self, grid: &mut Grid, density: f64) -> usize {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        grid.clear_all();

        let mut placed = 0;
        for p in grid.bounds().iter() {
            let r: f64 = self.rng.random();
            // The grid was just cleared, so no cell is an endpoint.
            if r < density && grid.set_wall(p, true).is_ok() {
                placed += 1;
            }
        }
        debug!("scattered {placed} walls over {} (density {density})", grid.bounds());
        placed
    }
}
