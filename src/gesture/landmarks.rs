//! Hand landmark types and the detector seam.
//!
//! Landmark indices follow the 21-point hand model used by common
//! hand-tracking libraries; only the index fingertip drives the snake.

use std::sync::{Arc, Mutex};

use bevy::math::Vec2;
use bevy::prelude::Resource;

use crate::game::GestureError;

/// Hand landmark indices
pub mod landmarks {
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const COUNT: usize = 21;
}

/// A single landmark, normalized to the frame (0.0 to 1.0 on each axis).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

/// All landmarks of one detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub landmarks: [Landmark; landmarks::COUNT],
}

impl HandLandmarks {
    /// A hand reduced to a single point, used by pointer-driven detectors.
    pub fn pointing_at(x: f32, y: f32) -> Self {
        HandLandmarks {
            landmarks: [Landmark { x, y }; landmarks::COUNT],
        }
    }

    /// Index fingertip position in frame pixels.
    pub fn index_finger_tip(&self, frame_width: f32, frame_height: f32) -> (f32, f32) {
        let tip = &self.landmarks[landmarks::INDEX_FINGER_TIP];
        (tip.x * frame_width, tip.y * frame_height)
    }
}

/// Anything that can find a hand in the next camera frame.
///
/// Implementations own their capture device; dropping the detector releases it.
pub trait LandmarkDetector: Send + 'static {
    /// Frame size in pixels, used to locate the frame center.
    fn frame_size(&self) -> (u32, u32);

    /// Grab one frame and return the hand in it, if any.
    ///
    /// `Ok(None)` means the frame was read but no hand was found. An error
    /// means the device can no longer deliver frames.
    fn detect(&mut self) -> Result<Option<HandLandmarks>, GestureError>;
}

/// Latest pointer position over the game window, normalized to the window.
#[derive(Resource, Clone, Debug, Default)]
pub struct PointerFeed(Arc<Mutex<Option<Vec2>>>);

impl PointerFeed {
    pub fn publish(&self, position: Option<Vec2>) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = position;
        }
    }

    fn latest(&self) -> Result<Option<Vec2>, GestureError> {
        self.0
            .lock()
            .map(|slot| *slot)
            .map_err(|_| GestureError::FrameRead("pointer feed poisoned".to_string()))
    }
}

/// Detector that treats the mouse pointer as the index fingertip.
///
/// Stands in for a webcam so the game runs without a camera; the capture
/// thread samples it at camera frame rate like a real device.
pub struct PointerDetector {
    feed: PointerFeed,
    frame_size: (u32, u32),
}

impl PointerDetector {
    pub fn new(
        feed: PointerFeed,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<Self, GestureError> {
        if frame_width == 0 || frame_height == 0 {
            return Err(GestureError::DetectorUnavailable(format!(
                "empty {frame_width}x{frame_height} frame"
            )));
        }
        Ok(PointerDetector {
            feed,
            frame_size: (frame_width, frame_height),
        })
    }
}

impl LandmarkDetector for PointerDetector {
    fn frame_size(&self) -> (u32, u32) {
        self.frame_size
    }

    fn detect(&mut self) -> Result<Option<HandLandmarks>, GestureError> {
        Ok(self
            .feed
            .latest()?
            .map(|pointer| HandLandmarks::pointing_at(pointer.x, pointer.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_tip_in_pixels() {
        let hand = HandLandmarks::pointing_at(0.25, 0.5);
        assert_eq!(hand.index_finger_tip(640.0, 480.0), (160.0, 240.0));
    }

    #[test]
    fn test_pointer_detector_follows_feed() {
        let feed = PointerFeed::default();
        let mut detector = PointerDetector::new(feed.clone(), 640, 480).unwrap();
        assert_eq!(detector.frame_size(), (640, 480));
        assert_eq!(detector.detect().unwrap(), None);

        feed.publish(Some(Vec2::new(0.75, 0.25)));
        let hand = detector.detect().unwrap().unwrap();
        assert_eq!(hand.index_finger_tip(640.0, 480.0), (480.0, 120.0));

        feed.publish(None);
        assert_eq!(detector.detect().unwrap(), None);
    }

    #[test]
    fn test_pointer_detector_rejects_empty_frame() {
        let result = PointerDetector::new(PointerFeed::default(), 0, 480);
        assert!(matches!(result, Err(GestureError::DetectorUnavailable(_))));
    }
}
