//! Grid Snake - a wrap-around snake-and-fruit game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, fruit, clock, session)
//! - `settings`: Player preferences and tick rate
//! - `leaderboard`: Finished-run records
//! - `error`: Error taxonomy shared by the above

pub mod error;
pub mod leaderboard;
pub mod settings;
pub mod sim;

pub use error::{SimError, StoreError};
pub use leaderboard::Leaderboard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use crate::sim::grid::Orientation;

    /// Cells per side of the square board
    pub const GRID_SIZE: i32 = 10;

    /// Default simulation rate (snake moves per second)
    pub const DEFAULT_TICK_RATE: f64 = 2.0;

    /// Snake length at session start
    pub const INITIAL_SNAKE_LENGTH: usize = 4;
    /// Head cell at session start
    pub const INITIAL_SNAKE_HEAD: (i32, i32) = (7, 4);
    /// Heading at session start
    pub const INITIAL_ORIENTATION: Orientation = Orientation::Left;

    /// Random draws before the spawner falls back to scanning free cells
    pub const MAX_SPAWN_ATTEMPTS: u32 = 256;
}

/// Format elapsed whole seconds the way the HUD shows them ("42s", "3m 5s")
pub fn format_elapsed(secs: u64) -> String {
    let minutes = secs / 60;
    let seconds = secs % 60;
    if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
