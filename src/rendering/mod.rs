//! Rendering plugin - mirrors the simulation's render frame into sprites,
//! draws the tracker overlay, and runs the visual effects and camera shake.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use rand::prelude::*;

use crate::game::{
    CAPTURE_HEIGHT, CAPTURE_WIDTH, CORNER_RADIUS, CameraShake, DEADZONE_PX, GameConfig,
    GameOverEvent, GameState, OVERLAY_COLOR, OVERLAY_THICKNESS, Position, PulseEffect, SHADE_MAX,
    SHADE_MIN, SHADE_STEP, SNAKE_BLUE, SNAKE_RED, SegmentSprite, Z_OVERLAY, Z_SNAKE_HEAD,
    Z_SNAKE_SEGMENT,
};

/// Plugin for rendering and visual effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_tracker_overlay).add_systems(
            Update,
            (
                sync_snake_segments,
                pulse_effect_system,
                trigger_camera_shake_on_game_over,
                camera_shake_system,
            )
                .chain(),
        );
    }
}

/// Center of a grid cell in world space.
///
/// Grid cells count from the top-left corner with `y` growing downward; the
/// camera sits at the center of the field with `y` growing upward.
pub fn to_world(config: &GameConfig, position: Position, z: f32) -> Vec3 {
    let half_cell = config.cell_size as f32 / 2.0;
    Vec3::new(
        position.x as f32 - config.width as f32 / 2.0 + half_cell,
        config.height as f32 / 2.0 - position.y as f32 - half_cell,
        z,
    )
}

/// Green channel for the segment at `index` (head is 0), fading to a floor.
pub fn segment_shade(index: usize) -> u8 {
    let fade = u8::try_from(index)
        .unwrap_or(u8::MAX)
        .saturating_mul(SHADE_STEP);
    SHADE_MAX.saturating_sub(fade).max(SHADE_MIN)
}

fn segment_color(index: usize) -> Color {
    Color::srgb_u8(SNAKE_RED, segment_shade(index), SNAKE_BLUE)
}

/// System to keep one sprite per body segment, ordered head first.
fn sync_snake_segments(
    mut commands: Commands,
    config: Res<GameConfig>,
    game_state: Res<GameState>,
    mut sprites: Query<(Entity, &SegmentSprite, &mut Transform)>,
) {
    if !game_state.is_changed() {
        return;
    }

    let frame = game_state.render_frame();
    let mut present = vec![false; frame.segments.len()];

    for (entity, segment, mut transform) in sprites.iter_mut() {
        match frame.segments.get(segment.index) {
            Some(&position) => {
                transform.translation = to_world(&config, position, segment_z(segment.index));
                present[segment.index] = true;
            }
            None => commands.entity(entity).despawn(),
        }
    }

    let size = config.cell_size as f32;
    for (index, position) in frame.segments.iter().enumerate() {
        if present[index] {
            continue;
        }
        commands.spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color: segment_color(index),
                    corner_radii: rounded_corners(size),
                    transform: Transform::from_translation(to_world(
                        &config,
                        *position,
                        segment_z(index),
                    )),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(size),
            ),
            SegmentSprite { index },
        ));
    }
}

/// Corner radii for a cell-sized shape, normalized to the shape size.
pub fn rounded_corners(size: f32) -> Vec4 {
    Vec4::splat(CORNER_RADIUS / (size / 2.0))
}

fn segment_z(index: usize) -> f32 {
    if index == 0 { Z_SNAKE_HEAD } else { Z_SNAKE_SEGMENT }
}

/// Frame-center cross-hair and deadzone square, scaled from the capture frame
/// onto the field.
fn spawn_tracker_overlay(mut commands: Commands, config: Res<GameConfig>) {
    let width = config.width as f32;
    let height = config.height as f32;
    let scale = Vec2::new(width / CAPTURE_WIDTH as f32, height / CAPTURE_HEIGHT as f32);

    let overlay = ShapeConfig {
        color: OVERLAY_COLOR,
        transform: Transform::from_xyz(0.0, 0.0, Z_OVERLAY),
        ..ShapeConfig::default_2d()
    };

    // Cross-hair
    commands.spawn(ShapeBundle::rect(&overlay, Vec2::new(OVERLAY_THICKNESS, height)));
    commands.spawn(ShapeBundle::rect(&overlay, Vec2::new(width, OVERLAY_THICKNESS)));

    // Deadzone
    commands.spawn(ShapeBundle::rect(
        &ShapeConfig {
            hollow: true,
            thickness: OVERLAY_THICKNESS,
            ..overlay.clone()
        },
        Vec2::splat(DEADZONE_PX * 2.0) * scale,
    ));
}

/// System to handle pulse effects (for eaten food flash).
fn pulse_effect_system(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut Transform, &mut PulseEffect)>,
) {
    for (entity, mut transform, mut effect) in effects.iter_mut() {
        effect.timer.tick(time.delta());

        if effect.timer.is_finished() {
            commands.entity(entity).despawn();
        } else {
            let progress = effect.timer.fraction();
            let scale = effect.start_scale + (effect.end_scale - effect.start_scale) * progress;
            transform.scale = Vec3::splat(scale);
        }
    }
}

/// System to trigger camera shake on game over.
fn trigger_camera_shake_on_game_over(
    mut game_over_reader: MessageReader<GameOverEvent>,
    mut camera_shake: ResMut<CameraShake>,
) {
    if game_over_reader.read().next().is_some() {
        camera_shake.timer = Timer::from_seconds(0.5, TimerMode::Once);
        camera_shake.intensity = 8.0;
    }
}

/// System to apply camera shake effect.
fn camera_shake_system(
    time: Res<Time>,
    mut camera_shake: ResMut<CameraShake>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    if camera_shake.timer.is_finished() {
        return;
    }
    camera_shake.timer.tick(time.delta());

    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    if camera_shake.timer.is_finished() {
        camera_transform.translation.x = 0.0;
        camera_transform.translation.y = 0.0;
    } else {
        let amplitude = camera_shake.intensity * (1.0 - camera_shake.timer.fraction());
        let mut rng = rand::rng();
        camera_transform.translation.x = (rng.random::<f32>() - 0.5) * amplitude;
        camera_transform.translation.y = (rng.random::<f32>() - 0.5) * amplitude;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_shade_fades_to_floor() {
        assert_eq!(segment_shade(0), 255);
        assert_eq!(segment_shade(1), 249);
        assert_eq!(segment_shade(10), 195);
        assert_eq!(segment_shade(29), 81);
        assert_eq!(segment_shade(30), 80);
        assert_eq!(segment_shade(31), 80);
        assert_eq!(segment_shade(10_000), 80);
    }

    #[test]
    fn test_to_world_corners() {
        let config = GameConfig::default();
        assert_eq!(
            to_world(&config, Position::new(0, 0), 1.0),
            Vec3::new(-390.0, 290.0, 1.0)
        );
        assert_eq!(
            to_world(&config, Position::new(780, 580), 0.0),
            Vec3::new(390.0, -290.0, 0.0)
        );
        assert_eq!(
            to_world(&config, config.center(), 0.0),
            Vec3::new(10.0, -10.0, 0.0)
        );
    }

    #[test]
    fn test_head_draws_above_body() {
        assert_eq!(segment_z(0), Z_SNAKE_HEAD);
        assert!(segment_z(3) < segment_z(0));
    }
}
