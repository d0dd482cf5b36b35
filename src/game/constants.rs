//! Game constants for field size, speed, colors, timing, and rendering layers.

use bevy::prelude::*;
use std::time::Duration;

// Play field, in pixels
pub const FIELD_WIDTH: i32 = 800;
pub const FIELD_HEIGHT: i32 = 600;
pub const CELL_SIZE: i32 = 20;

// Speed in ticks per second
pub const INITIAL_SPEED: f32 = 10.0;
pub const SPEED_STEP: f32 = 0.5;
pub const MAX_SPEED: f32 = 20.0;

// Gesture capture
pub const CAPTURE_WIDTH: u32 = 640;
pub const CAPTURE_HEIGHT: u32 = 480;
pub const DEADZONE_PX: f32 = 70.0;
pub const CAPTURE_INTERVAL: Duration = Duration::from_millis(33);

// Segment shading: green channel fades per index down to a floor
pub const SHADE_MAX: u8 = 255;
pub const SHADE_MIN: u8 = 80;
pub const SHADE_STEP: u8 = 6;

// Colors
pub const SNAKE_RED: u8 = 50;
pub const SNAKE_BLUE: u8 = 120;
pub const FOOD_COLOR: Color = Color::srgb(1.0, 0.314, 0.314);
pub const BACKGROUND_COLOR: Color = Color::srgb(0.078, 0.078, 0.196);
pub const GAME_OVER_BACKGROUND: Color = Color::srgb(0.039, 0.039, 0.157);
pub const SCORE_TEXT_COLOR: Color = Color::WHITE;
pub const DIRECTION_TEXT_COLOR: Color = Color::srgb(0.784, 0.784, 1.0);
pub const GAME_OVER_TEXT_COLOR: Color = Color::srgb(1.0, 0.314, 0.314);
pub const HINT_TEXT_COLOR: Color = Color::srgb(0.784, 0.784, 0.784);
pub const OVERLAY_COLOR: Color = Color::srgba(0.8, 0.8, 0.8, 0.25);

// Visual settings
pub const HUD_FONT_SIZE: f32 = 28.0;
pub const CORNER_RADIUS: f32 = 6.0;
pub const OVERLAY_THICKNESS: f32 = 1.5;

// Z-index constants for rendering layers
pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_OVERLAY: f32 = 0.5;
pub const Z_FOOD: f32 = 1.0;
pub const Z_SNAKE_SEGMENT: f32 = 1.5;
pub const Z_SNAKE_HEAD: f32 = 2.0;
