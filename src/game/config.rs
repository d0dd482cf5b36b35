//! Typed configuration for the play field, speed curve, and gesture capture.

use bevy::prelude::*;
use std::time::Duration;

use super::constants::{CELL_SIZE, FIELD_HEIGHT, FIELD_WIDTH, INITIAL_SPEED, MAX_SPEED, SPEED_STEP};
use super::{ConfigError, Direction, Position};

/// Play field geometry and speed progression.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    /// Ticks per second at the start of a run.
    pub initial_speed: f32,
    /// Added to the speed each time food is eaten.
    pub speed_step: f32,
    pub max_speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            cell_size: CELL_SIZE,
            initial_speed: INITIAL_SPEED,
            speed_step: SPEED_STEP,
            max_speed: MAX_SPEED,
        }
    }
}

impl GameConfig {
    /// Field of the given size with the default speed curve.
    pub fn new(width: i32, height: i32, cell_size: i32) -> Result<Self, ConfigError> {
        let config = GameConfig {
            width,
            height,
            cell_size,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the speed curve, keeping the geometry.
    pub fn with_speed(self, initial: f32, step: f32, max: f32) -> Result<Self, ConfigError> {
        let config = GameConfig {
            initial_speed: initial,
            speed_step: step,
            max_speed: max,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::NonPositiveCell(self.cell_size));
        }
        for (axis, value) in [("width", self.width), ("height", self.height)] {
            if value <= 0 || value % self.cell_size != 0 {
                return Err(ConfigError::MisalignedDimension {
                    axis,
                    value,
                    cell: self.cell_size,
                });
            }
        }
        let speeds_valid = self.initial_speed > 0.0
            && self.speed_step >= 0.0
            && self.max_speed >= self.initial_speed
            && self.max_speed.is_finite();
        if !speeds_valid {
            return Err(ConfigError::InvalidSpeed {
                initial: self.initial_speed,
                step: self.speed_step,
                max: self.max_speed,
            });
        }
        Ok(())
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Starting cell: the field center, snapped down onto the grid.
    pub fn center(&self) -> Position {
        Position::new(
            (self.width / 2) / self.cell_size * self.cell_size,
            (self.height / 2) / self.cell_size * self.cell_size,
        )
    }

    /// Wrap a position onto the torus. Uses Euclidean remainder so that
    /// stepping left from x = 0 lands on the last column, not at -cell.
    pub fn wrap(&self, position: Position) -> Position {
        Position::new(
            position.x.rem_euclid(self.width),
            position.y.rem_euclid(self.height),
        )
    }

    /// Neighbouring cell one step in `direction`, wrapped.
    pub fn step(&self, position: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.unit();
        self.wrap(Position::new(
            position.x + dx * self.cell_size,
            position.y + dy * self.cell_size,
        ))
    }

    /// True when the position is grid-aligned and inside the field.
    #[cfg(test)]
    pub fn contains(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x)
            && (0..self.height).contains(&position.y)
            && position.x % self.cell_size == 0
            && position.y % self.cell_size == 0
    }

    /// Speed after one more food, clamped to the cap.
    pub fn next_speed(&self, speed: f32) -> f32 {
        (speed + self.speed_step).min(self.max_speed)
    }

    /// Wall-clock time between ticks at the given speed.
    pub fn tick_interval(&self, speed: f32) -> Duration {
        Duration::from_secs_f32(1.0 / speed.max(f32::EPSILON))
    }
}

/// Settings for the capture thread and direction classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Offsets from the frame center at or below this many pixels are ignored.
    pub deadzone: f32,
    /// Pause between detector polls.
    pub frame_interval: Duration,
    /// Flip frames horizontally before classifying (selfie view).
    pub mirror: bool,
}

impl GestureConfig {
    pub fn new(deadzone: f32, frame_interval: Duration, mirror: bool) -> Result<Self, ConfigError> {
        if !(deadzone.is_finite() && deadzone > 0.0) {
            return Err(ConfigError::InvalidDeadzone(deadzone));
        }
        Ok(GestureConfig {
            deadzone,
            frame_interval,
            mirror,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CAPTURE_INTERVAL;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.columns(), 40);
        assert_eq!(config.rows(), 30);
        assert_eq!(config.center(), Position::new(400, 300));
    }

    #[test]
    fn test_rejects_misaligned_field() {
        assert_eq!(
            GameConfig::new(810, 600, 20),
            Err(ConfigError::MisalignedDimension {
                axis: "width",
                value: 810,
                cell: 20
            })
        );
        assert_eq!(
            GameConfig::new(800, 600, 0),
            Err(ConfigError::NonPositiveCell(0))
        );
        assert!(GameConfig::new(800, -20, 20).is_err());
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let config = GameConfig::default();
        assert!(config.with_speed(10.0, 0.5, 5.0).is_err());
        assert!(config.with_speed(0.0, 0.5, 5.0).is_err());
        assert!(config.with_speed(10.0, -1.0, 20.0).is_err());
        assert!(config.with_speed(5.0, 1.0, 5.0).is_ok());
    }

    #[test]
    fn test_wrap_right_edge() {
        let config = GameConfig::new(800, 600, 20).unwrap();
        let next = config.step(Position::new(780, 100), Direction::Right);
        assert_eq!(next, Position::new(0, 100));
    }

    #[test]
    fn test_wrap_left_edge_is_not_negative() {
        let config = GameConfig::new(800, 600, 20).unwrap();
        let next = config.step(Position::new(0, 100), Direction::Left);
        assert_eq!(next, Position::new(780, 100));
    }

    #[test]
    fn test_wrap_vertical_edges() {
        let config = GameConfig::default();
        assert_eq!(
            config.step(Position::new(40, 0), Direction::Up),
            Position::new(40, 580)
        );
        assert_eq!(
            config.step(Position::new(40, 580), Direction::Down),
            Position::new(40, 0)
        );
    }

    #[test]
    fn test_contains() {
        let config = GameConfig::default();
        assert!(config.contains(Position::new(0, 0)));
        assert!(config.contains(Position::new(780, 580)));
        assert!(!config.contains(Position::new(800, 0)));
        assert!(!config.contains(Position::new(10, 0)));
        assert!(!config.contains(Position::new(-20, 0)));
    }

    #[test]
    fn test_speed_curve() {
        let config = GameConfig::default();
        assert_eq!(config.next_speed(10.0), 10.5);
        assert_eq!(config.next_speed(19.8), 20.0);
        assert_eq!(config.next_speed(20.0), 20.0);
        let interval = config.tick_interval(10.0).as_secs_f32();
        assert!((interval - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_gesture_config_validation() {
        assert!(GestureConfig::new(70.0, CAPTURE_INTERVAL, true).is_ok());
        assert_eq!(
            GestureConfig::new(0.0, CAPTURE_INTERVAL, false),
            Err(ConfigError::InvalidDeadzone(0.0))
        );
        assert!(GestureConfig::new(f32::NAN, CAPTURE_INTERVAL, false).is_err());
    }
}
