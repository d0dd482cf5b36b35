//! Frame-loop resources (timers and effects).

use bevy::prelude::*;
use std::time::Duration;

/// Repeating timer that paces simulation ticks at the current speed.
#[derive(Resource)]
pub struct MoveTimer {
    pub timer: Timer,
}

impl MoveTimer {
    pub fn new(interval: Duration) -> Self {
        MoveTimer {
            timer: Timer::new(interval, TimerMode::Repeating),
        }
    }

    /// Change the tick interval if the speed moved; keeps accumulated time.
    pub fn set_interval(&mut self, interval: Duration) {
        if self.timer.duration() != interval {
            self.timer.set_duration(interval);
        }
    }

    pub fn restart(&mut self, interval: Duration) {
        self.timer = Timer::new(interval, TimerMode::Repeating);
    }
}

/// Resource for camera shake effect.
#[derive(Resource)]
pub struct CameraShake {
    pub timer: Timer,
    pub intensity: f32,
}

impl Default for CameraShake {
    fn default() -> Self {
        CameraShake {
            timer: Timer::from_seconds(0.0, TimerMode::Once),
            intensity: 0.0,
        }
    }
}
