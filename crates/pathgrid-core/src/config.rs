//! Flat configuration shared by the front-end and the scheduler.

use std::time::Duration;

use crate::error::ConfigError;

/// Slowest selectable speed.
pub const MIN_SPEED: f64 = 0.05;
/// Fastest selectable speed.
pub const MAX_SPEED: f64 = 1.0;
/// Increment used by the speed keys.
pub const SPEED_STEP: f64 = 0.05;

/// Map an animation speed in `[MIN_SPEED, MAX_SPEED]` to a per-step delay.
///
/// Higher speed means a shorter delay: `120 * (1.05 - speed)` milliseconds,
/// truncated. The speed is clamped first.
pub fn speed_to_delay(speed: f64) -> Duration {
    let speed = if speed.is_nan() {
        MIN_SPEED
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    };
    let ms = (120.0 * (1.05 - speed)) as u64;
    Duration::from_millis(ms)
}

/// Approximate inverse of [`speed_to_delay`], rounded to two decimals and
/// clamped to the selectable range.
pub fn delay_to_speed(delay: Duration) -> f64 {
    let speed = 1.05 - delay.as_secs_f64() * 1000.0 / 120.0;
    ((speed * 100.0).round() / 100.0).clamp(MIN_SPEED, MAX_SPEED)
}

/// Grid and animation parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    /// Wall probability used by random maze generation.
    pub wall_density: f64,
    pub step_delay_ms: u64,
    /// Terminal columns per grid cell.
    pub cell_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 28,
            cols: 48,
            wall_density: 0.27,
            step_delay_ms: speed_to_delay(0.5).as_millis() as u64,
            cell_width: 2,
        }
    }
}

impl Config {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !(0.0..=1.0).contains(&self.wall_density) {
            return Err(ConfigError::WallDensity(self.wall_density));
        }
        if self.cell_width == 0 {
            return Err(ConfigError::CellWidth);
        }
        Ok(())
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let c: Config = serde_json::from_str(r#"{"rows": 5, "cols": 7}"#).unwrap();
        assert_eq!(c.rows, 5);
        assert_eq!(c.cols, 7);
        assert_eq!(c.wall_density, Config::default().wall_density);
    }
}
