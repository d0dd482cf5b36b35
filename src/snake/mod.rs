//! Snake plugin - paces simulation ticks and feeds them the gesture direction.

mod body;

use bevy::prelude::*;

use crate::game::{FoodEatenEvent, GameConfig, GameOverEvent, GamePhase, GameState, MoveTimer};
use crate::gesture::GestureLink;

pub use body::SnakeBody;

/// Plugin for snake-related systems.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_snake);
    }
}

/// System to run one simulation tick each time the move timer fires.
///
/// The timer interval follows the current speed, so eating speeds up the
/// following ticks.
fn advance_snake(
    time: Res<Time>,
    config: Res<GameConfig>,
    link: Res<GestureLink>,
    mut game_state: ResMut<GameState>,
    mut move_timer: ResMut<MoveTimer>,
    mut food_eaten_writer: MessageWriter<FoodEatenEvent>,
    mut game_over_writer: MessageWriter<GameOverEvent>,
) {
    if game_state.phase() != GamePhase::Running {
        return;
    }

    move_timer.timer.tick(time.delta());
    if !move_timer.timer.just_finished() {
        return;
    }

    let outcome = game_state.tick(link.read_direction());

    if let Some(position) = outcome.ate {
        debug!(
            "Food eaten at ({}, {}), score {}, speed {}",
            position.x,
            position.y,
            game_state.score(),
            game_state.speed()
        );
        food_eaten_writer.write(FoodEatenEvent { position });
        move_timer.set_interval(config.tick_interval(game_state.speed()));
    }

    if outcome.collided {
        info!("Game over! Final score: {}", game_state.score());
        game_over_writer.write(GameOverEvent {
            score: game_state.score(),
        });
    }
}
