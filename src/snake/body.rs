//! Snake position history, head first.

use std::collections::VecDeque;

use crate::game::Position;

/// Ordered snake segments; index 0 is the head.
///
/// Never empty: built from a head position and only shrinks after growing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeBody {
    segments: VecDeque<Position>,
}

impl SnakeBody {
    pub fn new(head: Position) -> Self {
        SnakeBody {
            segments: VecDeque::from([head]),
        }
    }

    /// Body from explicit segments, head first. Returns `None` when empty.
    #[cfg(test)]
    pub fn from_segments(segments: impl IntoIterator<Item = Position>) -> Option<Self> {
        let segments: VecDeque<Position> = segments.into_iter().collect();
        (!segments.is_empty()).then_some(SnakeBody { segments })
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.segments.iter()
    }

    pub fn contains(&self, position: &Position) -> bool {
        self.segments.contains(position)
    }

    pub fn push_head(&mut self, head: Position) {
        self.segments.push_front(head);
    }

    /// Drop the tail segment, keeping at least the head.
    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.segments.len() > 1 {
            self.segments.pop_back()
        } else {
            None
        }
    }

    /// True when the head shares a cell with any later segment.
    pub fn head_hits_body(&self) -> bool {
        let head = self.head();
        self.segments.iter().skip(1).any(|segment| segment.collides_with(&head))
    }
}
