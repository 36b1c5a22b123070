//! The snake body: movement, growth, steering and self-collision
//!
//! The body is an owned sequence of value segments, head first. Nothing
//! outside `Snake` gets a mutable handle to it; accessors hand out copies.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::grid::{Coord, Orientation, wrap};

/// One cell of the snake and the heading it had when it was last updated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub position: Coord,
    pub orientation: Orientation,
}

/// The player's snake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    /// Head at the front, tail at the back. Never empty.
    segments: VecDeque<Segment>,
    /// Moves that will skip the tail pop
    pending_growth: u32,
    /// Heading of the segment that most recently became the tail
    last_tail_orientation: Orientation,
    /// Set once a steering request was accepted since the last move
    direction_changed: bool,
}

impl Snake {
    /// Lay out a straight snake with its head at `head`, trailing behind it
    /// opposite to `orientation`. Positions are wrapped onto the board.
    pub fn new(head: Coord, length: usize, orientation: Orientation) -> Self {
        let behind = orientation.opposite().delta();
        let segments = (0..length.max(1) as i32)
            .map(|i| Segment {
                position: wrap(head + behind * i),
                orientation,
            })
            .collect();

        Self {
            segments,
            pending_growth: 0,
            last_tail_orientation: orientation,
            direction_changed: false,
        }
    }

    /// Arbitrary body, head first
    #[cfg(test)]
    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        let last_tail_orientation = segments[segments.len() - 1].orientation;
        Self {
            segments: segments.into(),
            pending_growth: 0,
            last_tail_orientation,
            direction_changed: false,
        }
    }

    /// Advance one cell in the head's current heading.
    ///
    /// The tail is dropped unless growth is pending, in which case one unit
    /// of growth is consumed instead.
    pub fn advance(&mut self) {
        self.direction_changed = false;

        let head = self.segments[0];
        let new_head = Segment {
            position: wrap(head.position + head.orientation.delta()),
            orientation: head.orientation,
        };

        let len = self.segments.len();
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
            self.last_tail_orientation = self.segments[len - 1].orientation;
            self.segments.push_front(new_head);
        } else {
            self.last_tail_orientation = if len > 1 {
                self.segments[len - 2].orientation
            } else {
                new_head.orientation
            };
            self.segments.push_front(new_head);
            self.segments.pop_back();
        }
    }

    /// Request a new heading for the next move.
    ///
    /// Rejected if a request was already accepted since the last move, or if
    /// it would reverse the snake onto its own neck. Returns whether the
    /// request took effect.
    pub fn change_orientation(&mut self, orientation: Orientation) -> bool {
        let head = &mut self.segments[0];
        if self.direction_changed || orientation == head.orientation.opposite() {
            log::trace!("Steering {} rejected", orientation.as_str());
            return false;
        }
        head.orientation = orientation;
        self.direction_changed = true;
        true
    }

    /// Queue one segment of growth, applied on the next move
    pub fn grow(&mut self) {
        self.pending_growth += 1;
    }

    /// True if the head shares a cell with any other segment
    pub fn self_collision(&self) -> bool {
        let head = self.segments[0].position;
        self.segments.iter().skip(1).any(|s| s.position == head)
    }

    pub fn head_position(&self) -> Coord {
        self.segments[0].position
    }

    pub fn head_orientation(&self) -> Orientation {
        self.segments[0].orientation
    }

    /// Heading used to draw the tail piece
    pub fn tail_orientation(&self) -> Orientation {
        self.last_tail_orientation
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// Logical length: placed segments plus growth not yet stretched out
    pub fn len(&self) -> usize {
        self.segments.len() + self.pending_growth as usize
    }

    /// Always false; a snake has at least a head
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Copy of the body, head first. Pending growth shows up as extra
    /// segments stacked on the tail cell, facing the last tail heading.
    pub fn segments(&self) -> Vec<Segment> {
        let mut out: Vec<Segment> = self.segments.iter().copied().collect();
        if let Some(tail) = self.segments.back() {
            let stub = Segment {
                position: tail.position,
                orientation: self.last_tail_orientation,
            };
            out.extend(std::iter::repeat_n(stub, self.pending_growth as usize));
        }
        out
    }

    /// Positions of `segments()`, head first
    pub fn body_positions(&self) -> Vec<Coord> {
        self.segments().into_iter().map(|s| s.position).collect()
    }

    /// Distinct cells covered by the body
    pub fn occupied_cells(&self) -> HashSet<Coord> {
        self.segments.iter().map(|s| s.position).collect()
    }
}
