mod food;
mod game;
mod gesture;
mod rendering;
mod snake;
mod ui;

use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;

use food::FoodPlugin;
use game::{
    BACKGROUND_COLOR, CAPTURE_HEIGHT, CAPTURE_INTERVAL, CAPTURE_WIDTH, CELL_SIZE, CameraShake,
    DEADZONE_PX, FIELD_HEIGHT, FIELD_WIDTH, FoodEatenEvent, GameConfig, GameOverEvent, GameState,
    GestureConfig, INITIAL_SPEED, MAX_SPEED, MoveTimer, SPEED_STEP, StartupError,
};
use gesture::{GesturePlugin, GestureTracker, PointerDetector, PointerFeed};
use rendering::RenderingPlugin;
use snake::SnakePlugin;
use ui::UiPlugin;

/// Validate the configuration and spawn the capture thread.
fn start(feed: &PointerFeed) -> Result<(GameConfig, GestureTracker), StartupError> {
    let config = GameConfig::new(FIELD_WIDTH, FIELD_HEIGHT, CELL_SIZE)?.with_speed(
        INITIAL_SPEED,
        SPEED_STEP,
        MAX_SPEED,
    )?;
    let gesture_config = GestureConfig::new(DEADZONE_PX, CAPTURE_INTERVAL, false)?;
    let detector = PointerDetector::new(feed.clone(), CAPTURE_WIDTH, CAPTURE_HEIGHT)?;
    let tracker = GestureTracker::start(detector, gesture_config)?;
    Ok((config, tracker))
}

fn main() -> AppExit {
    let feed = PointerFeed::default();
    let (config, mut tracker) = match start(&feed) {
        Ok(started) => started,
        Err(err) => {
            eprintln!("{err}");
            return AppExit::error();
        }
    };

    let exit = App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(config.width as u32, config.height as u32),
                    title: "Hand Controlled Snake".to_string(),
                    resizable: false,
                    ..Default::default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
            GesturePlugin::new(tracker.link(), feed),
            SnakePlugin,
            FoodPlugin,
            RenderingPlugin,
            UiPlugin,
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(config)
        .insert_resource(GameState::new(config))
        .insert_resource(MoveTimer::new(config.tick_interval(config.initial_speed)))
        .init_resource::<CameraShake>()
        .add_message::<FoodEatenEvent>()
        .add_message::<GameOverEvent>()
        .run();

    tracker.shutdown();
    exit
}
