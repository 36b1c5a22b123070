//! Error taxonomy
//!
//! Simulation errors are narrow: bad orientation names from input layers,
//! and a board with nowhere left to put a fruit. Storage errors cover the
//! JSON files behind settings and the leaderboard.

use thiserror::Error;

use crate::sim::grid::Coord;

/// Errors raised by the simulation core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// Orientation name outside up/down/left/right
    #[error("invalid orientation {0:?}, expected one of up, down, left, right")]
    InvalidOrientation(String),
    /// No free cell left for a fruit (caller let the snake fill the board)
    #[error("no free cell for fruit after {attempts} attempts ({occupied} cells occupied)")]
    SpawnExhausted { attempts: u32, occupied: usize },
    /// Fruit placement requested on a cell the snake occupies
    #[error("cell ({}, {}) is occupied by the snake", .0.x, .0.y)]
    CellOccupied(Coord),
}

/// Errors raised while loading or saving persisted data
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}
