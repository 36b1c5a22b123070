//! Fruit placement
//!
//! Fruit goes on a uniformly random free cell. Placement is rejection
//! sampling with a hard attempt cap; once the cap is hit the spawner picks
//! uniformly among the enumerated free cells, and only a full board fails.

use std::collections::HashSet;

use glam::IVec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{CELL_COUNT, Coord, cells, in_bounds};
use crate::consts::{GRID_SIZE, MAX_SPAWN_ATTEMPTS};
use crate::error::SimError;

/// Fruit variety, used only to pick a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Banana,
    Grape,
    Cherry,
    Kiwi,
    Lemon,
    Orange,
    Peach,
    Pear,
    Pineapple,
    Strawberry,
    Watermelon,
}

impl FruitKind {
    pub const ALL: [FruitKind; 12] = [
        FruitKind::Apple,
        FruitKind::Banana,
        FruitKind::Grape,
        FruitKind::Cherry,
        FruitKind::Kiwi,
        FruitKind::Lemon,
        FruitKind::Orange,
        FruitKind::Peach,
        FruitKind::Pear,
        FruitKind::Pineapple,
        FruitKind::Strawberry,
        FruitKind::Watermelon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FruitKind::Apple => "Apple",
            FruitKind::Banana => "Banana",
            FruitKind::Grape => "Grape",
            FruitKind::Cherry => "Cherry",
            FruitKind::Kiwi => "Kiwi",
            FruitKind::Lemon => "Lemon",
            FruitKind::Orange => "Orange",
            FruitKind::Peach => "Peach",
            FruitKind::Pear => "Pear",
            FruitKind::Pineapple => "Pineapple",
            FruitKind::Strawberry => "Strawberry",
            FruitKind::Watermelon => "Watermelon",
        }
    }
}

/// The fruit currently on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fruit {
    pub position: Coord,
    pub kind: FruitKind,
}

/// Seeded source of fruit positions and kinds
#[derive(Debug, Clone)]
pub struct FruitSpawner {
    rng: Pcg32,
    max_attempts: u32,
}

impl FruitSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            max_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }

    /// Override the rejection-sampling cap (0 goes straight to the scan)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Uniform random cell, ignoring occupancy
    pub fn random_cell(&mut self) -> Coord {
        IVec2::new(
            self.rng.random_range(0..GRID_SIZE),
            self.rng.random_range(0..GRID_SIZE),
        )
    }

    pub fn random_kind(&mut self) -> FruitKind {
        FruitKind::ALL[self.rng.random_range(0..FruitKind::ALL.len())]
    }

    /// Pick a cell not in `occupied`.
    ///
    /// Fails with `SpawnExhausted` only when every board cell is occupied.
    pub fn spawn(&mut self, occupied: &HashSet<Coord>) -> Result<Coord, SimError> {
        let taken = occupied.iter().filter(|c| in_bounds(**c)).count();
        if taken >= CELL_COUNT {
            return Err(SimError::SpawnExhausted {
                attempts: 0,
                occupied: taken,
            });
        }

        for _ in 0..self.max_attempts {
            let cell = self.random_cell();
            if !occupied.contains(&cell) {
                return Ok(cell);
            }
        }

        log::warn!(
            "Fruit rejection sampling gave up after {} attempts ({} cells taken), scanning",
            self.max_attempts,
            taken
        );
        let free: Vec<Coord> = cells().filter(|c| !occupied.contains(c)).collect();
        free.choose(&mut self.rng)
            .copied()
            .ok_or(SimError::SpawnExhausted {
                attempts: self.max_attempts,
                occupied: taken,
            })
    }

    /// Spawn a fruit of a random kind on a free cell
    pub fn spawn_fruit(&mut self, occupied: &HashSet<Coord>) -> Result<Fruit, SimError> {
        let position = self.spawn(occupied)?;
        Ok(Fruit {
            position,
            kind: self.random_kind(),
        })
    }
}
