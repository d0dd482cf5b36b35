//! Snake simulation state machine.
//!
//! Pure and deterministic for a given seed: the frame loop feeds it one
//! direction per tick and renders whatever [`GameState::render_frame`] says.

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{Direction, GameConfig, Position};
use crate::food::place_food;
use crate::snake::SnakeBody;

/// Game phase enum to track which state the game is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Running,
    GameOver,
}

/// What happened during a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Cell of the food that was eaten this tick.
    pub ate: Option<Position>,
    /// The head ran into the body this tick.
    pub collided: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    /// Head first, so index drives the segment shade.
    pub segments: Vec<Position>,
    /// `None` once the body covers every cell.
    pub food: Option<Position>,
    pub score: u32,
    pub direction: Direction,
    pub phase: GamePhase,
}

/// Main game state resource.
#[derive(Resource)]
pub struct GameState {
    config: GameConfig,
    body: SnakeBody,
    direction: Direction,
    food: Option<Position>,
    score: u32,
    speed: f32,
    phase: GamePhase,
    rng: StdRng,
}

impl GameState {
    /// Fresh game seeded from the OS.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Fresh game with a fixed seed, for reproducible runs.
    #[cfg(test)]
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let body = SnakeBody::new(config.center());
        let food = place_food(&config, &body, &mut rng);
        GameState {
            config,
            body,
            direction: Direction::Right,
            food,
            score: 0,
            speed: config.initial_speed,
            phase: GamePhase::Running,
            rng,
        }
    }

    /// Back to the starting layout: one centered segment heading right.
    pub fn restart(&mut self) {
        self.body = SnakeBody::new(self.config.center());
        self.direction = Direction::Right;
        self.score = 0;
        self.speed = self.config.initial_speed;
        self.phase = GamePhase::Running;
        self.respawn_food();
    }

    /// Advance one step toward `requested`.
    ///
    /// A request for the exact reverse of the current heading is ignored.
    /// Ticks after game over do nothing.
    pub fn tick(&mut self, requested: Direction) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.phase == GamePhase::GameOver {
            return outcome;
        }

        if requested != self.direction.opposite() {
            self.direction = requested;
        }

        let head = self.config.step(self.body.head(), self.direction);
        self.body.push_head(head);

        if self.food == Some(head) {
            self.score += 1;
            self.speed = self.config.next_speed(self.speed);
            outcome.ate = Some(head);
            self.respawn_food();
        } else {
            self.body.pop_tail();
        }

        if self.body.head_hits_body() {
            self.phase = GamePhase::GameOver;
            outcome.collided = true;
        }

        outcome
    }

    fn respawn_food(&mut self) {
        self.food = place_food(&self.config, &self.body, &mut self.rng);
        if self.food.is_none() {
            warn!("No free cell left for food, the snake fills the field");
        }
    }

    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            segments: self.body.iter().copied().collect(),
            food: self.food,
            score: self.score,
            direction: self.direction,
            phase: self.phase,
        }
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }
}

#[cfg(test)]
impl GameState {
    pub(crate) fn config(&self) -> &GameConfig {
        &self.config
    }

    pub(crate) fn body(&self) -> &SnakeBody {
        &self.body
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn set_layout(&mut self, body: SnakeBody, direction: Direction, food: Position) {
        self.body = body;
        self.direction = direction;
        self.food = Some(food);
    }
}
