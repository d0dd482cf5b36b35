//! Single-slot values shared between the capture thread and the frame loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::game::Direction;

/// Latest direction published by the capture thread.
///
/// One writer, one reader, last write wins. There is no history: a reader
/// only ever sees the most recent store.
#[derive(Clone, Debug)]
pub struct SharedDirection(Arc<AtomicU8>);

impl SharedDirection {
    pub fn new(initial: Direction) -> Self {
        SharedDirection(Arc::new(AtomicU8::new(initial.to_u8())))
    }

    pub fn store(&self, direction: Direction) {
        self.0.store(direction.to_u8(), Ordering::Release);
    }

    /// Lock-free read; only valid encodings are ever stored.
    pub fn load(&self) -> Direction {
        Direction::from_u8(self.0.load(Ordering::Acquire)).unwrap_or_default()
    }
}

impl Default for SharedDirection {
    fn default() -> Self {
        SharedDirection::new(Direction::Right)
    }
}

/// Cooperative stop flag for the capture loop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
