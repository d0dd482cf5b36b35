//! Error types for configuration and gesture capture.

use thiserror::Error;

/// Errors raised when validating game or gesture configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    NonPositiveCell(i32),
    #[error("{axis} of {value}px is not a positive multiple of the {cell}px cell")]
    MisalignedDimension {
        axis: &'static str,
        value: i32,
        cell: i32,
    },
    #[error("speed range is invalid: initial {initial}, step {step}, max {max}")]
    InvalidSpeed { initial: f32, step: f32, max: f32 },
    #[error("deadzone must be a positive pixel distance, got {0}")]
    InvalidDeadzone(f32),
}

/// Errors raised by landmark detectors and the capture thread.
#[derive(Debug, Error)]
pub enum GestureError {
    #[error("hand detector unavailable: {0}")]
    DetectorUnavailable(String),
    #[error("failed to read a frame: {0}")]
    FrameRead(String),
    #[error("failed to spawn capture thread")]
    Spawn(#[from] std::io::Error),
}

/// Anything that keeps the game from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("gesture tracking failed to start: {0}")]
    Gesture(#[from] GestureError),
}
