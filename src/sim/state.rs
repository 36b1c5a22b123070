//! Game session state and lifecycle
//!
//! A session owns the snake, the fruit, the fruit spawner and the tick
//! clock. Score and elapsed ticks only change from inside `tick`. Once a
//! session has ended nothing mutates it again; `reset` replaces it wholesale.

use std::collections::HashSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::clock::SimClock;
use super::fruit::{Fruit, FruitKind, FruitSpawner};
use super::grid::{Coord, Orientation, wrap};
use super::snake::Snake;
use super::tick::{TickOutcome, tick};
use crate::consts::*;
use crate::error::SimError;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Built, waiting for `start`
    Idle,
    /// Ticking
    Running,
    /// Suspended by the player or by losing focus
    Paused,
    /// Terminal
    Ended,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Snake ran into its own body
    Collision,
    /// Ended from outside via `end` (quit, navigation)
    Quit,
    /// Board filled up, no cell left for the next fruit
    SpawnExhausted,
}

impl EndCause {
    /// Only a run lost to a collision is a finished game worth ranking
    pub fn is_game_over(&self) -> bool {
        matches!(self, EndCause::Collision)
    }
}

/// Notifications for collaborators outside the core (sound, HUD, storage)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    FruitEaten { score: u32, kind: FruitKind },
    Ended {
        cause: EndCause,
        score: u32,
        elapsed_ticks: u64,
    },
}

/// Sprite piece for one drawn snake cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Piece {
    Head(Orientation),
    Body(Orientation),
    /// Turn joint: this segment's heading, then the heading of the segment
    /// behind it
    Corner(Orientation, Orientation),
    Tail(Orientation),
}

/// Read-only view handed to the renderer after each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: SessionStatus,
    pub score: u32,
    pub elapsed_ticks: u64,
    /// Head first
    pub snake: Vec<(Coord, Piece)>,
    pub fruit: Fruit,
}

/// One game from start to game over
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) status: SessionStatus,
    pub(crate) snake: Snake,
    pub(crate) fruit: Fruit,
    pub(crate) spawner: FruitSpawner,
    pub(crate) clock: SimClock,
    pub(crate) score: u32,
    pub(crate) elapsed_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
    seed: u64,
}

impl GameSession {
    /// Fresh session: the starting snake and a first fruit on a free cell
    pub fn new(seed: u64, tick_rate: f64) -> Result<Self, SimError> {
        let (hx, hy) = INITIAL_SNAKE_HEAD;
        let snake = Snake::new(
            IVec2::new(hx, hy),
            INITIAL_SNAKE_LENGTH,
            INITIAL_ORIENTATION,
        );
        let mut spawner = FruitSpawner::new(seed);
        let fruit = spawner.spawn_fruit(&snake.occupied_cells())?;

        log::debug!(
            "Session created (seed {}), fruit {} at ({}, {})",
            seed,
            fruit.kind.name(),
            fruit.position.x,
            fruit.position.y
        );

        Ok(Self {
            status: SessionStatus::Idle,
            snake,
            fruit,
            spawner,
            clock: SimClock::new(tick_rate),
            score: 0,
            elapsed_ticks: 0,
            events: Vec::new(),
            seed,
        })
    }

    /// Throw this session away and start over from a new seed
    pub fn reset(&mut self, seed: u64) -> Result<(), SimError> {
        let tick_rate = 1000.0 / self.clock.interval_ms();
        *self = Self::new(seed, tick_rate)?;
        log::info!("Session reset with seed {}", seed);
        Ok(())
    }

    /// Idle -> Running. Returns false from any other state.
    pub fn start(&mut self) -> bool {
        if self.status != SessionStatus::Idle {
            return false;
        }
        self.status = SessionStatus::Running;
        self.clock.stop();
        self.events.push(GameEvent::Started);
        log::info!("Session started");
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        self.status = SessionStatus::Paused;
        self.clock.stop();
        self.events.push(GameEvent::Paused);
        log::info!("Session paused at tick {}", self.elapsed_ticks);
        true
    }

    /// Paused -> Running. The next frame only re-arms the clock.
    pub fn resume(&mut self) -> bool {
        if self.status != SessionStatus::Paused {
            return false;
        }
        self.status = SessionStatus::Running;
        self.events.push(GameEvent::Resumed);
        log::info!("Session resumed");
        true
    }

    /// End the session from outside (navigation, quit). No-op once ended.
    pub fn end(&mut self) {
        if self.status != SessionStatus::Ended {
            self.finish(EndCause::Quit);
        }
    }

    pub(crate) fn finish(&mut self, cause: EndCause) {
        self.status = SessionStatus::Ended;
        self.clock.stop();
        self.events.push(GameEvent::Ended {
            cause,
            score: self.score,
            elapsed_ticks: self.elapsed_ticks,
        });
        log::info!(
            "Session ended ({:?}): score {}, {} ticks",
            cause,
            self.score,
            self.elapsed_ticks
        );
    }

    /// Steering request from input handling. Only honoured while running.
    pub fn steer(&mut self, orientation: Orientation) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        self.snake.change_orientation(orientation)
    }

    /// Steering request by name ("up", "left", ...)
    pub fn steer_named(&mut self, name: &str) -> Result<bool, SimError> {
        let orientation = name.parse::<Orientation>()?;
        Ok(self.steer(orientation))
    }

    /// Per-frame entry point for the renderer's callback.
    ///
    /// Returns `Some` when the frame ran a tick.
    pub fn frame(&mut self, now_ms: f64) -> Result<Option<TickOutcome>, SimError> {
        if self.status != SessionStatus::Running {
            return Ok(None);
        }
        if !self.clock.advance(now_ms) {
            return Ok(None);
        }
        tick(self).map(Some)
    }

    /// Put the fruit on a chosen cell (wrapped onto the board)
    pub fn place_fruit(&mut self, position: Coord) -> Result<(), SimError> {
        let position = wrap(position);
        if self.snake.occupied_cells().contains(&position) {
            return Err(SimError::CellOccupied(position));
        }
        self.fruit.position = position;
        Ok(())
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == SessionStatus::Ended
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// Elapsed ticks as whole seconds of play
    pub fn elapsed_secs(&self) -> u64 {
        (self.elapsed_ticks as f64 * self.clock.interval_ms() / 1000.0).floor() as u64
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> Fruit {
        self.fruit
    }

    pub fn occupied_cells(&self) -> HashSet<Coord> {
        self.snake.occupied_cells()
    }

    /// Everything the renderer needs for one frame
    pub fn snapshot(&self) -> Snapshot {
        let segments = self.snake.segments();
        let last = segments.len() - 1;
        let snake = segments
            .iter()
            .enumerate()
            .map(|(i, seg)| {
                let piece = if i == 0 {
                    Piece::Head(seg.orientation)
                } else if i == last {
                    Piece::Tail(self.snake.tail_orientation())
                } else {
                    let next = segments[i + 1].orientation;
                    if next != seg.orientation {
                        Piece::Corner(seg.orientation, next)
                    } else {
                        Piece::Body(seg.orientation)
                    }
                };
                (seg.position, piece)
            })
            .collect();

        Snapshot {
            status: self.status,
            score: self.score,
            elapsed_ticks: self.elapsed_ticks,
            snake,
            fruit: self.fruit,
        }
    }
}
