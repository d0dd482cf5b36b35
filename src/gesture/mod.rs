//! Gesture plugin - runs hand tracking on its own thread and publishes a direction.
//!
//! The capture thread polls a [`LandmarkDetector`], turns the index fingertip's
//! offset from the frame center into a [`Direction`], and stores it in a
//! [`SharedDirection`]. The frame loop reads that slot once per tick. The only
//! signal going the other way is the [`CancelToken`].

mod landmarks;
mod shared;

use std::thread::{self, JoinHandle};

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::game::{Direction, GestureConfig, GestureError};

pub use landmarks::{HandLandmarks, LandmarkDetector, PointerDetector, PointerFeed};
pub use shared::{CancelToken, SharedDirection};

/// Plugin wiring the tracker link and pointer feed into the app.
pub struct GesturePlugin {
    link: GestureLink,
    feed: PointerFeed,
}

impl GesturePlugin {
    pub fn new(link: GestureLink, feed: PointerFeed) -> Self {
        GesturePlugin { link, feed }
    }
}

impl Plugin for GesturePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.link.clone())
            .insert_resource(self.feed.clone())
            .add_systems(Startup, report_tracking_state)
            .add_systems(
                Update,
                (publish_pointer, stop_tracking_on_escape, stop_tracking_on_exit),
            );
    }
}

/// Maps a fingertip offset from the frame center to a direction.
///
/// The axis with the larger offset wins; a tie goes to the vertical axis.
/// Offsets within `deadzone` on the winning axis yield `None`, so the caller
/// keeps whatever direction it had.
pub fn classify(dx: f32, dy: f32, deadzone: f32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx > deadzone {
            Some(Direction::Right)
        } else if dx < -deadzone {
            Some(Direction::Left)
        } else {
            None
        }
    } else if dy > deadzone {
        Some(Direction::Down)
    } else if dy < -deadzone {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Handle held by the frame loop: read the direction, request a stop.
#[derive(Resource, Clone, Debug, Default)]
pub struct GestureLink {
    direction: SharedDirection,
    cancel: CancelToken,
}

impl GestureLink {
    /// Latest published direction. Never blocks.
    pub fn read_direction(&self) -> Direction {
        self.direction.load()
    }

    /// Ask the capture thread to exit. Safe to call any number of times.
    pub fn stop(&self) {
        if !self.cancel.is_cancelled() {
            info!("Stopping gesture capture");
        }
        self.cancel.cancel();
    }

    /// True once a stop was requested or the capture loop ended on its own.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Owner of the capture thread.
///
/// Dropping the tracker stops and joins the thread, so the detector (and the
/// device behind it) is released on every exit path that unwinds.
pub struct GestureTracker {
    link: GestureLink,
    worker: Option<JoinHandle<()>>,
}

impl GestureTracker {
    /// Spawn the capture thread. The published direction starts as `Right`.
    pub fn start<D: LandmarkDetector>(
        detector: D,
        config: GestureConfig,
    ) -> Result<Self, GestureError> {
        let link = GestureLink::default();
        let direction = link.direction.clone();
        let cancel = link.cancel.clone();
        let worker = thread::Builder::new()
            .name("gesture-capture".to_string())
            .spawn(move || run_capture(detector, config, direction, cancel))?;
        Ok(GestureTracker {
            link,
            worker: Some(worker),
        })
    }

    pub fn link(&self) -> GestureLink {
        self.link.clone()
    }

    /// Stop the capture thread and wait for it to release the detector.
    pub fn shutdown(&mut self) {
        self.link.stop();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Gesture capture thread panicked");
            } else {
                info!("Gesture capture thread joined");
            }
        }
    }
}

impl Drop for GestureTracker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Capture loop body, run on the `gesture-capture` thread.
fn run_capture<D: LandmarkDetector>(
    mut detector: D,
    config: GestureConfig,
    direction: SharedDirection,
    cancel: CancelToken,
) {
    let (width, height) = detector.frame_size();
    let (width, height) = (width as f32, height as f32);
    let (center_x, center_y) = (width / 2.0, height / 2.0);
    let mut last = direction.load();

    while !cancel.is_cancelled() {
        match detector.detect() {
            Ok(Some(hand)) => {
                let (mut x, y) = hand.index_finger_tip(width, height);
                if config.mirror {
                    x = width - x;
                }
                if let Some(next) = classify(x - center_x, y - center_y, config.deadzone) {
                    if next != last {
                        debug!("Gesture direction {last} -> {next}");
                        last = next;
                    }
                    direction.store(next);
                }
            }
            // No hand in view: keep the last direction
            Ok(None) => {}
            Err(err) => {
                warn!("Gesture capture ended, keeping {last}: {err}");
                break;
            }
        }
        thread::sleep(config.frame_interval);
    }

    cancel.cancel();
    drop(detector);
    info!("Gesture detector released");
}

/// Log the tracker state once logging is up; the capture thread starts before the app.
fn report_tracking_state(link: Res<GestureLink>) {
    if link.is_stopped() {
        warn!("Gesture capture already ended, keeping {}", link.read_direction());
    } else {
        info!("Gesture capture running, heading {}", link.read_direction());
    }
}

/// System to feed the pointer position (normalized to the window) to the detector.
fn publish_pointer(windows: Query<&Window, With<PrimaryWindow>>, feed: Res<PointerFeed>) {
    let Ok(window) = windows.single() else {
        feed.publish(None);
        return;
    };
    let pointer = window
        .cursor_position()
        .map(|cursor| cursor / Vec2::new(window.width(), window.height()));
    feed.publish(pointer);
}

/// Escape stops tracking; the snake keeps its last direction.
fn stop_tracking_on_escape(keyboard_input: Res<ButtonInput<KeyCode>>, link: Res<GestureLink>) {
    if keyboard_input.just_pressed(KeyCode::Escape) {
        link.stop();
    }
}

/// Request the capture thread to exit as soon as the app starts shutting down.
fn stop_tracking_on_exit(mut exit_reader: MessageReader<AppExit>, link: Res<GestureLink>) {
    if exit_reader.read().next().is_some() {
        link.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    type Frame = Result<Option<HandLandmarks>, GestureError>;

    /// Plays back a fixed list of frames, then reports no hand forever.
    struct ScriptedDetector {
        frames: VecDeque<Frame>,
        released: Arc<AtomicBool>,
    }

    impl ScriptedDetector {
        fn new(frames: Vec<Frame>) -> (Self, Arc<AtomicBool>) {
            let released = Arc::new(AtomicBool::new(false));
            let detector = ScriptedDetector {
                frames: frames.into(),
                released: released.clone(),
            };
            (detector, released)
        }
    }

    impl LandmarkDetector for ScriptedDetector {
        fn frame_size(&self) -> (u32, u32) {
            (640, 480)
        }

        fn detect(&mut self) -> Result<Option<HandLandmarks>, GestureError> {
            self.frames.pop_front().unwrap_or(Ok(None))
        }
    }

    impl Drop for ScriptedDetector {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    fn fast_config(mirror: bool) -> GestureConfig {
        GestureConfig::new(70.0, Duration::from_millis(1), mirror).unwrap()
    }

    /// Hand with its index tip at the given frame pixel.
    fn hand_at(x: f32, y: f32) -> Frame {
        Ok(Some(HandLandmarks::pointing_at(x / 640.0, y / 480.0)))
    }

    fn camera_lost() -> Frame {
        Err(GestureError::FrameRead("camera unplugged".to_string()))
    }

    /// Let a scripted run reach its end on its own, then join the thread.
    fn run_to_end(mut tracker: GestureTracker) -> GestureLink {
        let link = tracker.link();
        for _ in 0..1000 {
            if link.is_stopped() {
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        tracker.shutdown();
        link
    }

    #[test]
    fn test_classify_axes() {
        assert_eq!(classify(100.0, 0.0, 70.0), Some(Direction::Right));
        assert_eq!(classify(-100.0, 0.0, 70.0), Some(Direction::Left));
        assert_eq!(classify(0.0, 100.0, 70.0), Some(Direction::Down));
        assert_eq!(classify(0.0, -100.0, 70.0), Some(Direction::Up));
    }

    #[test]
    fn test_classify_deadzone() {
        assert_eq!(classify(0.0, 0.0, 70.0), None);
        assert_eq!(classify(50.0, -20.0, 70.0), None);
        assert_eq!(classify(70.0, 0.0, 70.0), None);
        assert_eq!(classify(0.0, -70.0, 70.0), None);
        // Dominant axis inside the deadzone does not fall back to the other axis
        assert_eq!(classify(60.0, 40.0, 70.0), None);
    }

    #[test]
    fn test_classify_prefers_larger_offset() {
        assert_eq!(classify(100.0, 90.0, 70.0), Some(Direction::Right));
        assert_eq!(classify(-80.0, 120.0, 70.0), Some(Direction::Down));
        assert_eq!(classify(100.0, -60.0, 70.0), Some(Direction::Right));
        // Equal offsets resolve to the vertical axis
        assert_eq!(classify(100.0, 100.0, 70.0), Some(Direction::Down));
        assert_eq!(classify(-100.0, -100.0, 70.0), Some(Direction::Up));
    }

    #[test]
    fn test_no_hand_keeps_last_direction() {
        let (detector, released) =
            ScriptedDetector::new(vec![hand_at(320.0, 40.0), Ok(None), Ok(None), camera_lost()]);
        let tracker = GestureTracker::start(detector, fast_config(false)).unwrap();
        let link = run_to_end(tracker);

        assert!(released.load(Ordering::SeqCst));
        assert_eq!(link.read_direction(), Direction::Up);
    }

    #[test]
    fn test_detector_error_ends_capture() {
        let (detector, released) = ScriptedDetector::new(vec![hand_at(40.0, 240.0), camera_lost()]);
        let tracker = GestureTracker::start(detector, fast_config(false)).unwrap();
        let link = tracker.link();

        // The loop stops on its own and marks the link stopped
        for _ in 0..500 {
            if link.is_stopped() {
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        assert!(link.is_stopped());
        drop(tracker);
        assert!(released.load(Ordering::SeqCst));
        assert_eq!(link.read_direction(), Direction::Left);
    }

    #[test]
    fn test_small_offsets_are_ignored() {
        let (detector, _released) = ScriptedDetector::new(vec![
            hand_at(370.0, 250.0),
            hand_at(300.0, 200.0),
            camera_lost(),
        ]);
        let tracker = GestureTracker::start(detector, fast_config(false)).unwrap();
        let link = run_to_end(tracker);
        assert_eq!(link.read_direction(), Direction::Right);
    }

    #[test]
    fn test_mirror_flips_horizontal_axis() {
        let (detector, _released) =
            ScriptedDetector::new(vec![hand_at(600.0, 240.0), camera_lost()]);
        let tracker = GestureTracker::start(detector, fast_config(true)).unwrap();
        let link = run_to_end(tracker);
        assert_eq!(link.read_direction(), Direction::Left);
    }

    #[test]
    fn test_stop_is_idempotent_and_shutdown_joins() {
        let (detector, released) = ScriptedDetector::new(Vec::new());
        let mut tracker = GestureTracker::start(detector, fast_config(false)).unwrap();
        let link = tracker.link();
        link.stop();
        link.stop();
        tracker.shutdown();
        tracker.shutdown();
        assert!(released.load(Ordering::SeqCst));
        assert!(link.is_stopped());
        assert_eq!(link.read_direction(), Direction::Right);
    }

    #[test]
    fn test_drop_releases_detector() {
        let (detector, released) = ScriptedDetector::new(Vec::new());
        {
            let _tracker = GestureTracker::start(detector, fast_config(false)).unwrap();
        }
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn test_startup_report_reads_link_without_stopping_it() {
        for stopped in [false, true] {
            let link = GestureLink::default();
            if stopped {
                link.stop();
            }
            let mut app = App::new();
            app.insert_resource(link.clone()).add_systems(Startup, report_tracking_state);
            app.update();
            assert_eq!(link.is_stopped(), stopped);
            assert_eq!(link.read_direction(), Direction::Right);
        }
    }

    proptest! {
        #[test]
        fn prop_classify_moves_one_axis(dx in -400.0f32..400.0, dy in -400.0f32..400.0) {
            match classify(dx, dy, 70.0) {
                None => prop_assert!(dx.abs().max(dy.abs()) <= 70.0),
                Some(Direction::Left | Direction::Right) => {
                    prop_assert!(dx.abs() > dy.abs());
                    prop_assert!(dx.abs() > 70.0);
                }
                Some(Direction::Up | Direction::Down) => {
                    prop_assert!(dy.abs() >= dx.abs());
                    prop_assert!(dy.abs() > 70.0);
                }
            }
        }
    }
}
