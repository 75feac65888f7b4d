//! Command-line flags, folded into a [`Config`].

use clap::Parser;
use clap::builder::TypedValueParser;
use pathgrid_core::config::{MAX_SPEED, MIN_SPEED};
use pathgrid_core::{Config, delay_to_speed, speed_to_delay};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pathgrid",
    about = "Watch Dijkstra's algorithm search an obstacle grid, one step at a time",
    version
)]
pub struct Cli {
    #[arg(long, default_value_t = Config::default().rows, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub rows: usize,

    #[arg(long, default_value_t = Config::default().cols, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub cols: usize,

    /// Wall probability for random mazes, in [0, 1].
    #[arg(long = "density", default_value_t = Config::default().wall_density)]
    pub wall_density: f64,

    /// Milliseconds between search steps.
    #[arg(long = "step-delay-ms", default_value_t = Config::default().step_delay_ms)]
    pub step_delay_ms: u64,

    /// Animation speed in [0.05, 1.0]; overrides --step-delay-ms.
    #[arg(long)]
    pub speed: Option<f64>,

    /// Terminal columns per grid cell.
    #[arg(long = "cell-width", default_value_t = Config::default().cell_width, value_parser = clap::value_parser!(u16).range(1..))]
    pub cell_width: u16,

    /// Seed for random mazes; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Effective animation speed.
    pub fn speed(&self) -> f64 {
        match self.speed {
            Some(speed) if !speed.is_nan() => speed.clamp(MIN_SPEED, MAX_SPEED),
            _ => delay_to_speed(self.config().step_delay()),
        }
    }

    pub fn config(&self) -> Config {
        let step_delay_ms = match self.speed {
            Some(speed) => speed_to_delay(speed).as_millis() as u64,
            None => self.step_delay_ms,
        };
        Config {
            rows: self.rows,
            cols: self.cols,
            wall_density: self.wall_density,
            step_delay_ms,
            cell_width: self.cell_width,
        }
    }
}
