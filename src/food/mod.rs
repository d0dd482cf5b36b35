//! Food plugin - handles food placement, the pulse animation, and the eaten flash.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use rand::prelude::*;

use crate::game::{
    FOOD_COLOR, FoodEatenEvent, FoodPulse, FoodSprite, GameConfig, GameState, Position,
    PulseEffect, Z_FOOD,
};
use crate::rendering::{rounded_corners, to_world};
use crate::snake::SnakeBody;

/// Random draws tried before falling back to scanning the free cells.
const PLACEMENT_ATTEMPTS: usize = 64;

/// Plugin for food-related systems.
pub struct FoodPlugin;

impl Plugin for FoodPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (sync_food_sprite, spawn_food_eaten_effect, food_pulse_animation).chain(),
        );
    }
}

/// Picks a uniformly random grid cell that the snake does not occupy.
///
/// Returns `None` only when the body covers the whole field.
pub fn place_food<R: Rng>(
    config: &GameConfig,
    body: &SnakeBody,
    rng: &mut R,
) -> Option<Position> {
    // Rejection sampling is uniform over free cells and almost always hits early
    for _ in 0..PLACEMENT_ATTEMPTS {
        let position = Position::new(
            rng.random_range(0..config.columns()) * config.cell_size,
            rng.random_range(0..config.rows()) * config.cell_size,
        );
        if !body.contains(&position) {
            return Some(position);
        }
    }

    let free: Vec<Position> = (0..config.rows())
        .flat_map(|row| {
            (0..config.columns())
                .map(move |col| Position::new(col * config.cell_size, row * config.cell_size))
        })
        .filter(|position| !body.contains(position))
        .collect();
    free.choose(rng).copied()
}

fn spawn_food_sprite(commands: &mut Commands, config: &GameConfig, food: Position) {
    let size = config.cell_size as f32;
    commands.spawn((
        ShapeBundle::rect(
            &ShapeConfig {
                color: FOOD_COLOR,
                corner_radii: rounded_corners(size),
                transform: Transform::from_translation(to_world(config, food, Z_FOOD)),
                ..ShapeConfig::default_2d()
            },
            Vec2::splat(size),
        ),
        FoodSprite,
        FoodPulse {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        },
    ));
}

/// System to keep the food sprite on the current food cell.
///
/// The sprite is despawned while the snake fills the field and there is no food.
fn sync_food_sprite(
    mut commands: Commands,
    config: Res<GameConfig>,
    game_state: Res<GameState>,
    mut foods: Query<(Entity, &mut Transform), With<FoodSprite>>,
) {
    if !game_state.is_changed() {
        return;
    }
    match (game_state.food(), foods.single_mut()) {
        (Some(food), Ok((_, mut transform))) => {
            transform.translation = to_world(&config, food, Z_FOOD);
        }
        (Some(food), Err(_)) => spawn_food_sprite(&mut commands, &config, food),
        (None, Ok((entity, _))) => commands.entity(entity).despawn(),
        (None, Err(_)) => {}
    }
}

/// System to spawn visual effect when food is eaten.
fn spawn_food_eaten_effect(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut food_eaten_reader: MessageReader<FoodEatenEvent>,
) {
    for event in food_eaten_reader.read() {
        let translation = to_world(&config, event.position, Z_FOOD + 0.5);
        commands.spawn((
            ShapeBundle::circle(
                &ShapeConfig {
                    color: Color::srgba(1.0, 1.0, 0.3, 0.8),
                    alpha_mode: ShapeAlphaMode::Add,
                    transform: Transform::from_translation(translation),
                    ..ShapeConfig::default_2d()
                },
                config.cell_size as f32 / 2.0,
            ),
            PulseEffect {
                timer: Timer::from_seconds(0.3, TimerMode::Once),
                start_scale: 1.0,
                end_scale: 2.5,
            },
        ));
    }
}

/// System to animate food with a pulsing effect.
fn food_pulse_animation(
    time: Res<Time>,
    mut foods: Query<(&mut Transform, &mut FoodPulse), With<FoodSprite>>,
) {
    for (mut transform, mut pulse) in foods.iter_mut() {
        pulse.timer.tick(time.delta());

        // Use sine wave for smooth pulsing
        let progress = pulse.timer.fraction();
        let scale = 1.0 + (progress * std::f32::consts::PI * 2.0).sin() * 0.15;

        transform.scale = Vec3::splat(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn test_food_is_on_grid_and_off_body() {
        let config = GameConfig::default();
        let body = SnakeBody::new(config.center());
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let food = place_food(&config, &body, &mut rng).unwrap();
            assert!(config.contains(food));
            assert_ne!(food, config.center());
        }
    }

    #[test]
    fn test_food_finds_the_last_free_cell() {
        let config = GameConfig::new(60, 40, 20).unwrap();
        // Six cells, five covered; only (40, 20) is free
        let body = SnakeBody::from_segments([
            Position::new(0, 0),
            Position::new(20, 0),
            Position::new(40, 0),
            Position::new(0, 20),
            Position::new(20, 20),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            assert_eq!(
                place_food(&config, &body, &mut rng),
                Some(Position::new(40, 20))
            );
        }
    }

    #[test]
    fn test_full_field_has_no_food() {
        let config = GameConfig::new(40, 20, 20).unwrap();
        let body = SnakeBody::from_segments([Position::new(0, 0), Position::new(20, 0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(place_food(&config, &body, &mut rng), None);
    }
}
