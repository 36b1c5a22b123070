//! Board coordinates and wrap-around arithmetic
//!
//! The board is a fixed `GRID_SIZE` x `GRID_SIZE` torus: leaving one edge
//! re-enters from the opposite edge on the same row or column.

use std::str::FromStr;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::GRID_SIZE;
use crate::error::SimError;

/// A board cell, `x` to the right and `y` downward, 0-indexed
pub type Coord = IVec2;

/// Number of cells on the board
pub const CELL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// Map any integer position onto the equivalent cell inside the board.
///
/// Total: every input has an image in `[0, GRID_SIZE)` on both axes.
#[inline]
pub fn wrap(pos: Coord) -> Coord {
    pos.rem_euclid(IVec2::splat(GRID_SIZE))
}

/// True if the position is already a board cell
#[inline]
pub fn in_bounds(pos: Coord) -> bool {
    (0..GRID_SIZE).contains(&pos.x) && (0..GRID_SIZE).contains(&pos.y)
}

/// All board cells in row-major order
pub fn cells() -> impl Iterator<Item = Coord> {
    (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| IVec2::new(x, y)))
}

/// Heading of a snake segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Up,
    Down,
    Left,
    Right,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Down,
        Orientation::Left,
        Orientation::Right,
    ];

    /// Unit step on the board (screen coordinates, so up is -y)
    pub fn delta(self) -> IVec2 {
        match self {
            Orientation::Up => IVec2::new(0, -1),
            Orientation::Down => IVec2::new(0, 1),
            Orientation::Left => IVec2::new(-1, 0),
            Orientation::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Orientation::Up => Orientation::Down,
            Orientation::Down => Orientation::Up,
            Orientation::Left => Orientation::Right,
            Orientation::Right => Orientation::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Up => "up",
            Orientation::Down => "down",
            Orientation::Left => "left",
            Orientation::Right => "right",
        }
    }
}

impl FromStr for Orientation {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Orientation::Up),
            "down" => Ok(Orientation::Down),
            "left" => Ok(Orientation::Left),
            "right" => Ok(Orientation::Right),
            _ => Err(SimError::InvalidOrientation(s.to_string())),
        }
    }
}
