//! UI plugin - handles the camera, arena, HUD, game over screen, and game flow.

use bevy::ecs::system::ParamSet;
use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::view::Hdr;

use bevy_vector_shapes::prelude::*;

use crate::game::{
    BACKGROUND_COLOR, DIRECTION_TEXT_COLOR, DirectionText, GAME_OVER_BACKGROUND,
    GAME_OVER_TEXT_COLOR, GameConfig, GameOverEvent, GameOverUI, GamePhase, GameState,
    HINT_TEXT_COLOR, HUD_FONT_SIZE, MoveTimer, SCORE_TEXT_COLOR, ScoreText, Z_BACKGROUND,
};
use crate::gesture::GestureLink;

/// Plugin for UI and game flow systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_system).add_systems(
            Update,
            (
                restart_game,
                quit_from_game_over,
                update_hud_text,
                spawn_game_over_screen_system,
            )
                .chain(),
        );
    }
}

/// Initial setup system - camera, arena, HUD text.
fn setup_system(mut commands: Commands, config: Res<GameConfig>) {
    // Setup camera with HDR and bloom for glowing effects
    commands.spawn((
        Camera2d,
        Hdr,
        Bloom {
            intensity: 0.15,
            low_frequency_boost: 0.6,
            low_frequency_boost_curvature: 0.5,
            high_pass_frequency: 0.8,
            ..default()
        },
    ));

    let arena_width = config.width as f32;
    let arena_height = config.height as f32;

    // Arena background
    commands.spawn((
        Sprite {
            color: BACKGROUND_COLOR,
            custom_size: Some(Vec2::new(arena_width, arena_height)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, Z_BACKGROUND),
    ));

    // Faint edge so the wrap boundary is visible
    commands.spawn(ShapeBundle::rect(
        &ShapeConfig {
            color: Color::srgba(0.4, 0.4, 0.9, 0.6),
            alpha_mode: ShapeAlphaMode::Add,
            hollow: true,
            thickness: 2.0,
            transform: Transform::from_xyz(0.0, 0.0, 0.1),
            ..ShapeConfig::default_2d()
        },
        Vec2::new(arena_width, arena_height),
    ));

    commands.spawn((
        Text::from("Score: 0"),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(SCORE_TEXT_COLOR),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(20.0),
            left: Val::Px(20.0),
            ..default()
        },
        ScoreText,
    ));

    commands.spawn((
        Text::from("Direction: RIGHT"),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(DIRECTION_TEXT_COLOR),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(60.0),
            left: Val::Px(20.0),
            ..default()
        },
        DirectionText,
    ));
}

/// Spawns the game over screen UI.
fn spawn_game_over_screen(commands: &mut Commands, score: u32) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(GAME_OVER_BACKGROUND),
            GameOverUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::from("GAME OVER"),
                TextFont {
                    font_size: 60.0,
                    ..default()
                },
                TextColor(GAME_OVER_TEXT_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::from(format!("Final Score: {score}")),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(SCORE_TEXT_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::from("Press R to Restart | Q to Quit"),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(HINT_TEXT_COLOR),
            ));
        });
}

/// System to spawn game over screen when game ends.
fn spawn_game_over_screen_system(
    mut commands: Commands,
    mut game_over_reader: MessageReader<GameOverEvent>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    let Some(event) = game_over_reader.read().last() else {
        return;
    };
    if game_over_ui.is_empty() {
        spawn_game_over_screen(&mut commands, event.score);
    }
}

/// System to restart the game from the game over screen.
fn restart_game(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    mut game_state: ResMut<GameState>,
    mut move_timer: ResMut<MoveTimer>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    if game_state.phase() != GamePhase::GameOver || !keyboard_input.just_pressed(KeyCode::KeyR) {
        return;
    }

    for entity in game_over_ui.iter() {
        commands.entity(entity).despawn();
    }

    game_state.restart();
    move_timer.restart(config.tick_interval(game_state.speed()));
    info!("Game restarted");
}

/// System to quit from the game over screen.
fn quit_from_game_over(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    game_state: Res<GameState>,
    mut exit: MessageWriter<AppExit>,
) {
    if game_state.phase() == GamePhase::GameOver && keyboard_input.just_pressed(KeyCode::KeyQ) {
        info!("Quit from game over screen, final score {}", game_state.score());
        exit.write(AppExit::Success);
    }
}

type HudTextQuery<'w, 's> = ParamSet<
    'w,
    's,
    (
        Query<'static, 'static, &'static mut Text, With<ScoreText>>,
        Query<'static, 'static, &'static mut Text, With<DirectionText>>,
    ),
>;

/// System to update the score and direction display.
fn update_hud_text(game_state: Res<GameState>, link: Res<GestureLink>, mut texts: HudTextQuery) {
    let frame = game_state.render_frame();
    if let Ok(mut text) = texts.p0().single_mut() {
        *text = Text::from(format!("Score: {}", frame.score));
    }

    let tracking = if link.is_stopped() { " (tracking off)" } else { "" };
    if let Ok(mut text) = texts.p1().single_mut() {
        *text = Text::from(format!("Direction: {}{tracking}", frame.direction));
    }
}
