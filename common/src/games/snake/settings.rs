use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{FieldSize, Point};

/// Tunables for one snake widget. Pixel values describe the drawing surface, the grid is derived.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub canvas_width_px: u32,
    pub canvas_height_px: u32,
    pub cell_size_px: u32,
    pub start_x: i32,
    pub start_y: i32,
    pub initial_interval_ms: u32,
    pub interval_step_ms: u32,
    pub min_interval_ms: u32,
    pub swipe_threshold_px: f32,
    pub flash_duration_ms: u32,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            canvas_width_px: 400,
            canvas_height_px: 400,
            cell_size_px: 20,
            start_x: 8,
            start_y: 8,
            initial_interval_ms: 150,
            interval_step_ms: 5,
            min_interval_ms: 50,
            swipe_threshold_px: 30.0,
            flash_duration_ms: 300,
        }
    }
}

impl SnakeSettings {
    pub fn field_size(&self) -> FieldSize {
        let cell = self.cell_size_px.max(1);
        FieldSize {
            width: (self.canvas_width_px / cell) as i32,
            height: (self.canvas_height_px / cell) as i32,
        }
    }

    pub fn start_position(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms as u64)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms as u64)
    }

    pub fn interval_step(&self) -> Duration {
        Duration::from_millis(self.interval_step_ms as u64)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms as u64)
    }

    /// Interval after eating once more, never below the floor.
    pub fn next_interval(&self, current: Duration) -> Duration {
        current
            .saturating_sub(self.interval_step())
            .max(self.min_interval())
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.cell_size_px < 4 || self.cell_size_px > 100 {
            return Err("cell_size_px must be between 4 and 100".to_string());
        }
        if self.canvas_width_px % self.cell_size_px != 0
            || self.canvas_height_px % self.cell_size_px != 0
        {
            return Err("canvas dimensions must be multiples of cell_size_px".to_string());
        }
        let field = self.field_size();
        if field.width < 5 || field.height < 5 {
            return Err("grid must be at least 5x5 cells".to_string());
        }
        if field.width > 100 || field.height > 100 {
            return Err("grid must not exceed 100x100 cells".to_string());
        }
        if !field.contains(self.start_position()) {
            return Err("start position must lie inside the grid".to_string());
        }
        if self.min_interval_ms < 20 {
            return Err("min_interval_ms must be at least 20".to_string());
        }
        if self.initial_interval_ms < self.min_interval_ms || self.initial_interval_ms > 2000 {
            return Err("initial_interval_ms must be between min_interval_ms and 2000".to_string());
        }
        if self.interval_step_ms > self.initial_interval_ms {
            return Err("interval_step_ms must not exceed initial_interval_ms".to_string());
        }
        if self.swipe_threshold_px.is_nan() || self.swipe_threshold_px <= 0.0 {
            return Err("swipe_threshold_px must be greater than 0".to_string());
        }
        if self.flash_duration_ms > 5000 {
            return Err("flash_duration_ms must not exceed 5000".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_is_20_by_20() {
        let settings = SnakeSettings::default();
        assert_eq!(settings.field_size(), FieldSize { width: 20, height: 20 });
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_next_interval_is_floored() {
        let settings = SnakeSettings::default();
        assert_eq!(
            settings.next_interval(Duration::from_millis(150)),
            Duration::from_millis(145)
        );
        assert_eq!(
            settings.next_interval(Duration::from_millis(52)),
            Duration::from_millis(50)
        );
        assert_eq!(
            settings.next_interval(Duration::from_millis(50)),
            Duration::from_millis(50)
        );
    }

    #[test]
    fn test_start_outside_grid_is_invalid() {
        let settings = SnakeSettings {
            start_x: 20,
            ..SnakeSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_canvas_must_divide_into_cells() {
        let settings = SnakeSettings {
            canvas_width_px: 410,
            ..SnakeSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_nan_swipe_threshold_is_invalid() {
        let settings = SnakeSettings {
            swipe_threshold_px: f32::NAN,
            ..SnakeSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
