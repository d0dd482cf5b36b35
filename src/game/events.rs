//! Game events (messages).

use bevy::prelude::*;

use super::Position;

/// Message triggered when food is eaten (for visual effects).
#[derive(Message)]
pub struct FoodEatenEvent {
    pub position: Position,
}

/// Message triggered on the tick the snake runs into itself.
#[derive(Message)]
pub struct GameOverEvent {
    pub score: u32,
}
