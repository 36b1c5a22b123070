//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One snake move per tick, paced by `SimClock`
//! - Seeded RNG only
//! - Single owner for every piece of state (the session)
//! - No rendering, terminal or storage dependencies

pub mod clock;
pub mod collision;
pub mod fruit;
pub mod grid;
pub mod snake;
pub mod state;
pub mod tick;

pub use clock::SimClock;
pub use collision::fruit_eaten;
pub use fruit::{Fruit, FruitKind, FruitSpawner};
pub use grid::{CELL_COUNT, Coord, Orientation, wrap};
pub use snake::{Segment, Snake};
pub use state::{EndCause, GameEvent, GameSession, Piece, SessionStatus, Snapshot};
pub use tick::{TickOutcome, tick};
